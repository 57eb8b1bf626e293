//! Plain-text explanation of a Cramer's rule computation, step by step.
//!
//! Markup is left to the presentation layer; numbers are shown with four decimals.

use cramer_solver::{CramerOutcome, DeterminantTrace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: usize,
    pub title: String,
    pub lines: Vec<String>,
}

/// Steps plus the one-line-per-variable result summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    pub steps: Vec<Step>,
    pub result: Vec<String>,
}

pub const NO_UNIQUE_SOLUTION: &str = "The system has no unique solution.";

fn fmt4(value: f64) -> String {
    // -0.0 would print as "-0.0000"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.4}", value)
}

/// Narrates `solve`: step 1 is det|A|, then one step per variable when the solution is unique.
pub fn narrate(outcome: &CramerOutcome) -> Narration {
    let trace = outcome.trace();
    let mut steps = vec![Step {
        number: 1,
        title: "Calculate the determinant of the coefficient matrix.".to_string(),
        lines: vec![format!("det|A| = {}", fmt4(trace.main))],
    }];

    let Some(solution) = outcome.solution() else {
        return Narration {
            steps,
            result: vec![NO_UNIQUE_SOLUTION.to_string()],
        };
    };

    let mut result = Vec::with_capacity(solution.len());
    for (variable, value) in trace.variables.iter().zip(solution.values()) {
        let name = &variable.name;
        steps.push(Step {
            number: variable.index + 2,
            title: format!("Calculate det|A_{name}| and {name}."),
            lines: vec![
                format!("det|A_{name}| = {}", fmt4(variable.value)),
                format!("{name} = det|A_{name}| / det|A| = {}", fmt4(*value)),
            ],
        });
        result.push(format!("{name} = {}", fmt4(*value)));
    }
    Narration { steps, result }
}

/// The "Determinants" report: main determinant, then one line per variable.
pub fn describe_determinants(trace: &DeterminantTrace) -> Vec<String> {
    let mut lines = Vec::with_capacity(trace.variables.len() + 1);
    lines.push(format!("Main Determinant: {}", fmt4(trace.main)));
    lines.extend(
        trace
            .variables
            .iter()
            .map(|variable| format!("det|A_{}|: {}", variable.name, fmt4(variable.value))),
    );
    lines
}

impl Narration {
    /// Renders the narration as plain text, one step per paragraph.
    pub fn to_text(&self) -> String {
        let mut text = String::from("Step-by-Step Solution\n");
        for step in &self.steps {
            text.push_str(&format!("\nStep {}: {}\n", step.number, step.title));
            for line in &step.lines {
                text.push_str("  ");
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push_str("\nResult:\n");
        for line in &self.result {
            text.push_str("  ");
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}
