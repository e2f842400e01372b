//! Colorful console output for draw progress.
//!
//! Provides a custom `tracing` layer that formats solver and manager events
//! with colors. Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use tracing_subscriber::filter::LevelFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG`, defaulting to INFO for the solver.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initializes the console output with an explicit solver level.
pub fn init_with_level(level: LevelFilter) {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if let Ok(directive) = format!("drawforge_solver={level}").parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DrawConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats draw events with colors.
pub struct DrawConsoleLayer;

impl<S: Subscriber> Layer<S> for DrawConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only handle drawforge_solver events
        if !event.metadata().target().starts_with("drawforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    phase: Option<String>,
    result: Option<String>,
    error: Option<String>,
    solved_by: Option<String>,
    cycle_lengths: Option<String>,
    group: Option<String>,
    drawing: Option<String>,
    participant_count: Option<u64>,
    couple_count: Option<u64>,
    explicit_count: Option<u64>,
    steps: Option<u64>,
    repairs: Option<u64>,
    attempts: Option<u64>,
    nodes: Option<u64>,
    duration_us: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "message" => self.message = Some(s),
            "phase" => self.phase = Some(s),
            "result" => self.result = Some(s),
            "error" => self.error = Some(s),
            "solved_by" => self.solved_by = Some(s),
            "cycle_lengths" => self.cycle_lengths = Some(s),
            "group" => self.group = Some(s),
            "drawing" => self.drawing = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "participant_count" => self.participant_count = Some(value),
            "couple_count" => self.couple_count = Some(value),
            "explicit_count" => self.explicit_count = Some(value),
            "steps" => self.steps = Some(value),
            "repairs" => self.repairs = Some(value),
            "attempts" => self.attempts = Some(value),
            "nodes" => self.nodes = Some(value),
            "duration_us" => self.duration_us = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.message.as_deref().unwrap_or("") {
        "Solving started" => format_solving_started(v),
        "Phase ended" => format_phase_end(v),
        "Solving ended" => format_solving_ended(v),
        "Solving failed" | "Solving rejected before search" => format_solving_failed(v),
        "Drawing completed" => format_drawing_completed(v),
        _ => String::new(),
    }
}

fn prefix(tag: &str) -> String {
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", tag).bright_cyan()
    )
}

fn format_solving_started(v: &EventVisitor) -> String {
    format!(
        "{} participants ({}), couples ({}), exclusions ({})",
        prefix("Solver"),
        count(v.participant_count).bright_yellow(),
        count(v.couple_count).bright_yellow(),
        count(v.explicit_count).bright_yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let result = v.result.as_deref().unwrap_or("N/A");
    let result = if result == "Solved" {
        result.bright_green().to_string()
    } else {
        result.yellow().to_string()
    };

    format!(
        "{} {} phase ended: time spent ({}), steps ({}), repairs ({}), result ({})",
        prefix(phase),
        phase.white().bold(),
        format_duration_us(v.duration_us.unwrap_or(0)).yellow(),
        count(v.steps).white(),
        count(v.repairs).white(),
        result
    )
}

fn format_solving_ended(v: &EventVisitor) -> String {
    let solved_by = v
        .solved_by
        .as_deref()
        .map(|s| s.trim_start_matches("Some(").trim_end_matches(')'))
        .unwrap_or("None");

    format!(
        "{} Solving ended: time spent ({}), attempts ({}), solved by ({}), cycles ({})",
        prefix("Solver"),
        format_duration_us(v.duration_ms.unwrap_or(0) * 1000).yellow(),
        count(v.attempts).white(),
        solved_by.bright_magenta(),
        v.cycle_lengths.as_deref().unwrap_or("[]").bright_green()
    )
}

fn format_solving_failed(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_red(),
        "[Solver]".bright_cyan(),
        v.error.as_deref().unwrap_or("unknown error").bright_red()
    );
    if v.attempts.is_some() || v.nodes.is_some() {
        output.push_str(&format!(
            " (attempts {}, search nodes {})",
            count(v.attempts),
            count(v.nodes)
        ));
    }
    output
}

fn format_drawing_completed(v: &EventVisitor) -> String {
    format!(
        "{} drawing {} completed for group {} ({} participants)",
        prefix("Drawing"),
        v.drawing.as_deref().unwrap_or("?").white().bold(),
        v.group.as_deref().unwrap_or("?").bright_yellow(),
        count(v.participant_count)
    )
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_us(us: u64) -> String {
    if us < 1000 {
        format!("{}us", us)
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}
