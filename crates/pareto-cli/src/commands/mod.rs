pub mod add;
pub mod collect;
pub mod list;
pub mod manifest;
pub mod query;
pub mod validate;

use pareto::MergeReport;

const SEPARATOR_WIDTH: usize = 60;

pub(crate) fn print_header(title: &str) {
    println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

/// Print every classification list of a merge report, populated or not
/// relevant. The full report always comes before any exit-code decision.
pub(crate) fn print_report(report: &MergeReport, operation: &str) {
    print_header(&format!("Results: {operation}"));

    print_section("Added", '+', &report.added);
    print_section("Updated", '~', &report.updated);
    print_section("Skipped", '=', &report.skipped);
    print_section(
        "Missing benchmark references",
        '!',
        &report.missing_benchmarks,
    );
    print_section("Errors", 'x', &report.errors);
    println!();
}

fn print_section(label: &str, prefix: char, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{} ({}):", label, items.len());
    for item in items {
        println!("  {prefix} {item}");
    }
}
