use cramer_core::MatrixSize;
use cramer_rs::{DeterminantsReport, DeterminantTrace, SavedMatrixRecord, SolveReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// --- Request Models ---

/// A linear system as the input grid holds it: raw cell text, row-major, constants last in each row.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_system_request"))]
#[schema(example = json!({
  "size": 2,
  "cells": ["2", "1", "10", "1", "-3", "5"],
  "strict": false
}))]
pub struct SystemRequest {
    /// Number of unknowns: 0, 2, 3 or 4.
    pub size: usize,
    /// `size * (size + 1)` cells.
    pub cells: Vec<String>,
    /// Reject non-numeric text instead of reading it as 0.
    #[serde(default)]
    pub strict: bool,
}

fn validate_system_request(request: &SystemRequest) -> Result<(), ValidationError> {
    let size = MatrixSize::try_from(request.size).map_err(|_| {
        let mut err = ValidationError::new("unsupported_size");
        err.message = Some(format!("size must be 0, 2, 3 or 4, got {}", request.size).into());
        err
    })?;
    if request.cells.len() != size.cell_count() {
        let mut err = ValidationError::new("cell_count");
        err.message = Some(
            format!(
                "a {} system needs {} cells, got {}",
                size,
                size.cell_count(),
                request.cells.len()
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

impl SystemRequest {
    /// Only valid after `validate()` succeeded.
    pub fn matrix_size(&self) -> MatrixSize {
        MatrixSize::try_from(self.size).unwrap_or_default()
    }
}

/// Path parameter naming a saved matrix.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct MatrixName {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

// --- Response Models ---

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DeterminantsResponse {
    pub main_determinant: f64,
    pub variables: Vec<NamedValue>,
    /// Human-readable report, one line per determinant.
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Unique,
    NoUniqueSolution,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StepResponse {
    pub number: usize,
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SolveResponse {
    pub status: SolveStatus,
    pub main_determinant: f64,
    pub determinants: Vec<NamedValue>,
    /// Present only when the solution is unique.
    pub solution: Option<Vec<NamedValue>>,
    pub steps: Vec<StepResponse>,
    pub result: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedMatrixResponse {
    pub name: String,
    pub size: usize,
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    pub details: Option<Vec<String>>,
}

fn named_determinants(trace: &DeterminantTrace) -> Vec<NamedValue> {
    trace
        .variables
        .iter()
        .map(|variable| NamedValue {
            name: variable.name.clone(),
            value: variable.value,
        })
        .collect()
}

impl From<DeterminantsReport> for DeterminantsResponse {
    fn from(report: DeterminantsReport) -> Self {
        Self {
            main_determinant: report.trace.main,
            variables: named_determinants(&report.trace),
            lines: report.lines,
        }
    }
}

impl From<SolveReport> for SolveResponse {
    fn from(report: SolveReport) -> Self {
        let trace = report.outcome.trace();
        let solution = report.outcome.solution().map(|solution| {
            solution
                .iter_named()
                .map(|(name, value)| NamedValue {
                    name: name.to_string(),
                    value,
                })
                .collect()
        });
        Self {
            status: if report.outcome.is_unique() {
                SolveStatus::Unique
            } else {
                SolveStatus::NoUniqueSolution
            },
            main_determinant: trace.main,
            determinants: named_determinants(trace),
            solution,
            steps: report
                .narration
                .steps
                .into_iter()
                .map(|step| StepResponse {
                    number: step.number,
                    title: step.title,
                    lines: step.lines,
                })
                .collect(),
            result: report.narration.result,
        }
    }
}

impl SavedMatrixResponse {
    pub fn new(name: String, record: SavedMatrixRecord) -> Self {
        Self {
            name,
            size: record.size,
            matrix: record.matrix,
        }
    }
}
