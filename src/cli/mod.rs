pub mod format;
pub mod ss;
