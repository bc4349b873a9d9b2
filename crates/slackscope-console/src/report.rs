//! Plain-text rendering of diagnostics reports.

use std::fmt::Write as _;
use std::io::{self, Write};

use num_format::{Locale, ToFormattedString};
use slackscope::DiagnosticsReport;

/// Renders a report as uncolored text, one section per non-empty category.
pub fn render_report(report: &DiagnosticsReport) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let status = if report.is_feasible() {
        "FEASIBLE"
    } else {
        "INFEASIBLE"
    };
    let _ = writeln!(
        out,
        "{} │ {} constraints │ {} binding │ {} violated │ {} undefined │ {} failed",
        status,
        s.total_constraints.to_formatted_string(&Locale::en),
        s.binding_count.to_formatted_string(&Locale::en),
        s.violation_count.to_formatted_string(&Locale::en),
        s.undefined_count.to_formatted_string(&Locale::en),
        s.failure_count.to_formatted_string(&Locale::en),
    );

    if !report.violations.is_empty() {
        let _ = writeln!(out, "\nViolations:");
        for v in &report.violations {
            let _ = writeln!(
                out,
                "  [{}] {} violated by {:.6}",
                v.severity,
                v.name(),
                v.violation_amount
            );
        }
    }

    let binding = report.binding_constraints();
    if !binding.is_empty() {
        let _ = writeln!(out, "\nBinding:");
        for a in binding {
            let _ = write!(out, "  {} {} (body {:.6})", a.name(), a.bounds, a.body);
            if let Some(dual) = a.dual {
                let _ = write!(out, " dual {:.6}", dual);
            }
            out.push('\n');
        }
    }

    let undefined = report.undefined_constraints();
    if !undefined.is_empty() {
        let _ = writeln!(out, "\nUndefined:");
        for a in undefined {
            let _ = writeln!(out, "  {} {}", a.name(), a.bounds);
        }
    }

    if !report.failures.is_empty() {
        let _ = writeln!(out, "\nFailed:");
        for f in &report.failures {
            let _ = writeln!(out, "  {}: {}", f.constraint, f.error);
        }
    }

    out
}

/// Writes [`render_report`] output to stdout.
pub fn print_report(report: &DiagnosticsReport) {
    let _ = io::stdout().write_all(render_report(report).as_bytes());
}
