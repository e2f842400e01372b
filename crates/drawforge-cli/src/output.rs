//! Human and JSON rendering of command results.

use drawforge::{ApiError, ApiResponse, AssignmentSet, EngineError, SolveResult, ValidationReport};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::input::GroupFile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DrawOutput<'a> {
    assignments: &'a AssignmentSet,
    cycle_lengths: &'a [usize],
    attempts: u32,
    solved_by: Option<String>,
    duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    valid: bool,
    violations: Vec<ViolationOutput>,
}

#[derive(Debug, Serialize)]
struct ViolationOutput {
    invariant: u8,
    message: String,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to render JSON: {e}"),
    }
}

pub fn print_draw(group: &GroupFile, result: &SolveResult, json: bool) {
    let stats = &result.statistics;
    if json {
        print_json(&ApiResponse::ok(DrawOutput {
            assignments: &result.assignments,
            cycle_lengths: &stats.cycle_lengths,
            attempts: stats.attempt_count,
            solved_by: stats.solved_by().map(|kind| kind.to_string()),
            duration_ms: stats.total_duration.as_millis() as u64,
        }));
        return;
    }

    println!(
        "{} {} participants drawn",
        "Draw".bright_green().bold(),
        group.participants.len()
    );
    for participant in &group.participants {
        if let Some(receiver) = result.assignments.receiver_of(&participant.id) {
            println!(
                "  {:<20} {} {}",
                participant.name,
                "->".bright_blue(),
                group.name_of(receiver).bright_yellow()
            );
        }
    }
    println!("{} {:?}", "Cycles".bright_black(), stats.cycle_lengths);
}

pub fn print_engine_error(err: &EngineError, json: bool) {
    let api = ApiError::from(err);
    if json {
        print_json(&ApiResponse::<()>::err(api));
        return;
    }

    eprintln!(
        "{}: {}",
        format!("error[{}]", api.code).bright_red().bold(),
        api.message
    );
    if let Some(details) = &api.details {
        eprintln!("  {} {}", "hint:".bright_cyan(), details);
    }
}

pub fn print_report(report: &ValidationReport, json: bool) {
    if json {
        print_json(&ReportOutput {
            valid: report.is_valid(),
            violations: report
                .violations()
                .iter()
                .map(|v| ViolationOutput {
                    invariant: v.invariant(),
                    message: v.to_string(),
                })
                .collect(),
        });
        return;
    }

    if report.is_valid() {
        println!("{}", "valid".bright_green().bold());
        return;
    }
    println!(
        "{} {} violation(s)",
        "invalid".bright_red().bold(),
        report.violations().len()
    );
    for violation in report.violations() {
        println!(
            "  {} {}",
            format!("[invariant {}]", violation.invariant()).yellow(),
            violation
        );
    }
}

#[cfg(test)]
mod tests {
    use drawforge::{DrawSolver, InfeasibilityReason, Participant, SolveOptions};

    use super::*;

    #[test]
    fn test_print_draw_in_both_formats() {
        let group = GroupFile {
            participants: vec![
                Participant::new("a", "Ann"),
                Participant::new("b", "Bob"),
                Participant::new("c", "Cid"),
            ],
            exclusions: Vec::new(),
        };
        let result = DrawSolver::new(SolveOptions::default().with_seed(1))
            .solve(&group.participants, &group.exclusions)
            .unwrap();

        print_draw(&group, &result, false);
        print_draw(&group, &result, true);
        assert_eq!(result.statistics.cycle_lengths, vec![3]);
    }

    #[test]
    fn test_print_infeasible_error() {
        let err = EngineError::InfeasibleConstraints(InfeasibilityReason::NoCycleFreeAssignment);

        print_engine_error(&err, false);
        print_engine_error(&err, true);
    }
}
