//! Colorful console output for constraint diagnostics.
//!
//! Provides a custom `tracing` layer that formats diagnostics events with
//! colors, and a plain-text renderer for [`DiagnosticsReport`]s.
//!
//! ## Log Levels
//!
//! - **INFO**: Run lifecycle (start/end with summary counts)
//! - **WARN**: Constraints the model failed to evaluate
//! - **DEBUG**: Individual violations
//! - **TRACE**: Individual constraint analyses (not formatted by the layer)
//!
//! [`DiagnosticsReport`]: slackscope::DiagnosticsReport

mod report;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, Layer};

pub use report::{print_report, render_report};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output for diagnostics events.
///
/// Safe to call multiple times - only the first call has effect. The filter
/// defaults to `info` for SlackScope targets and honours `RUST_LOG`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive("slackscope=info"))
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DiagnosticsConsoleLayer)
            .try_init();
    });
}

fn default_directive(directive: &str) -> tracing_subscriber::filter::Directive {
    directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// A tracing layer that formats diagnostics events with colors.
pub struct DiagnosticsConsoleLayer;

impl<S: Subscriber> Layer<S> for DiagnosticsConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("slackscope") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    constraint: Option<String>,
    severity: Option<String>,
    error: Option<String>,
    amount: Option<f64>,
    constraint_count: Option<u64>,
    binding_count: Option<u64>,
    violation_count: Option<u64>,
    undefined_count: Option<u64>,
    failure_count: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "constraint" => self.constraint = Some(s),
            "severity" => self.severity = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "amount" {
            self.amount = Some(value);
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "constraint_count" => self.constraint_count = Some(value),
            "binding_count" => self.binding_count = Some(value),
            "violation_count" => self.violation_count = Some(value),
            "undefined_count" => self.undefined_count = Some(value),
            "failure_count" => self.failure_count = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "constraint" => self.constraint = Some(value.to_string()),
            "severity" => self.severity = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "diagnostics_start" => format_start(v),
        "diagnostics_end" => format_end(v),
        "constraint_violated" => format_violation(v),
        "constraint_failed" => format_failure(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_start(v: &EventVisitor) -> String {
    format!(
        "{} Analyzing │ {} constraints",
        "▶".bright_green().bold(),
        count(v.constraint_count).bright_yellow()
    )
}

fn format_end(v: &EventVisitor) -> String {
    let violations = v.violation_count.unwrap_or(0);
    let undefined = v.undefined_count.unwrap_or(0);
    let failures = v.failure_count.unwrap_or(0);
    let status = if violations == 0 && undefined == 0 && failures == 0 {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    format!(
        "{} Analysis complete │ {} │ {} binding │ {} violated │ {} undefined │ {} failed │ {}ms",
        "■".bright_cyan().bold(),
        status,
        count(v.binding_count).bright_yellow(),
        count(v.violation_count).bright_yellow(),
        count(v.undefined_count).bright_yellow(),
        count(v.failure_count).bright_yellow(),
        count(v.duration_ms).bright_black()
    )
}

fn format_violation(v: &EventVisitor) -> String {
    let severity = v.severity.as_deref().unwrap_or("?");
    let label = match severity {
        "critical" => severity.bright_red().bold().to_string(),
        "high" => severity.red().to_string(),
        "medium" => severity.yellow().to_string(),
        _ => severity.bright_black().to_string(),
    };
    format!(
        "  {} {} │ violated by {:.6e} │ {}",
        "✗".bright_red(),
        v.constraint.as_deref().unwrap_or("?").bright_white(),
        v.amount.unwrap_or(f64::NAN),
        label
    )
}

fn format_failure(v: &EventVisitor) -> String {
    format!(
        "  {} {} │ {}",
        "!".bright_magenta().bold(),
        v.constraint.as_deref().unwrap_or("?").bright_white(),
        v.error.as_deref().unwrap_or("evaluation failed").bright_black()
    )
}
