use crate::model::Severity;
use crate::rules::ValidationReport;

/// Human-readable report grouped by severity, ending in PASS or FAIL
pub fn render_report(report: &ValidationReport) -> String {
    let mut output = String::new();

    for (severity, heading) in [
        (Severity::Error, "ERRORS"),
        (Severity::Warning, "WARNINGS"),
        (Severity::Info, "INFO"),
    ] {
        let group: Vec<_> = report.with_severity(severity).collect();
        if group.is_empty() {
            continue;
        }
        output.push_str(&format!("{} ({})\n", heading, group.len()));
        for violation in group {
            output.push_str(&format!("  {}\n", violation));
        }
        output.push('\n');
    }

    output.push_str(if report.passed { "PASS\n" } else { "FAIL\n" });
    output
}
