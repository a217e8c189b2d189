use crate::models::ServiceInstance;
use std::fmt::Write;

/// Fixed spacing appended to every column width.
const CELL_SPACING: usize = 3;

const HEADERS: [&str; 3] = ["name", "service", "plan"];

/// Render the instance table: a header line plus one line per record, each
/// column left-aligned to its longest value plus the cell spacing. Records
/// are sorted by (service, plan, name) ascending. The header is printed even
/// when there are no records.
pub fn render_table(instances: &mut [ServiceInstance]) -> String {
    instances.sort();

    let name_width = column_width(instances.iter().map(|i| i.name.len()));
    let service_width = column_width(instances.iter().map(|i| i.service.len()));
    let plan_width = column_width(instances.iter().map(|i| i.plan.len()));

    let mut out = String::new();
    render_row(&mut out, HEADERS[0], HEADERS[1], HEADERS[2], name_width, service_width, plan_width);
    for instance in instances.iter() {
        render_row(
            &mut out,
            &instance.name,
            &instance.service,
            &instance.plan,
            name_width,
            service_width,
            plan_width,
        );
    }
    out
}

fn column_width(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.max().unwrap_or(0) + CELL_SPACING
}

fn render_row(
    out: &mut String,
    name: &str,
    service: &str,
    plan: &str,
    name_width: usize,
    service_width: usize,
    plan_width: usize,
) {
    // The trailing column is padded too, matching the original plugin's
    // fixed-width row format; trailing spaces are part of the contract.
    let _ = writeln!(
        out,
        "{name:<name_width$}{service:<service_width$}{plan:<plan_width$}"
    );
}
