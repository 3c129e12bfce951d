use chrono::Local;
use qualitool_core::{Batch, Report, RuleOutcome};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{formatters::table::batch_rows, ReportError, Reporter};

pub struct JsonFormatter {
    version: String,
    include_details: bool,
}

#[derive(Serialize, Deserialize)]
struct ReportDocument {
    version: String,
    timestamp: String,
    total_rows: usize,
    total_violations: usize,
    failed_rules: usize,
    dimensions: Vec<DimensionDocument>,
}

#[derive(Serialize, Deserialize)]
struct DimensionDocument {
    name: String,
    rules: Vec<RuleDocument>,
}

#[derive(Serialize, Deserialize)]
struct RuleDocument {
    description: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<Vec<Map<String, Value>>>,
}

impl JsonFormatter {
    pub fn new(version: String, include_details: bool) -> Self {
        Self {
            version,
            include_details,
        }
    }

    fn rule_document(&self, outcome: &RuleOutcome) -> Result<RuleDocument, ReportError> {
        let document = match outcome {
            RuleOutcome::Evaluated(result) => RuleDocument {
                description: result.description.clone(),
                status: "evaluated".to_string(),
                violation_count: Some(result.violation_count),
                error: None,
                violations: if self.include_details && result.violation_count > 0 {
                    Some(rows_as_objects(&result.violating_rows)?)
                } else {
                    None
                },
            },
            RuleOutcome::Failed(failure) => RuleDocument {
                description: failure.description.clone(),
                status: "failed".to_string(),
                violation_count: None,
                error: Some(failure.message.clone()),
                violations: None,
            },
        };
        Ok(document)
    }
}

fn rows_as_objects(batch: &Batch) -> Result<Vec<Map<String, Value>>, ReportError> {
    let schema = batch.schema();
    let names: Vec<&String> = schema.fields().iter().map(|f| f.name()).collect();
    Ok(batch_rows(batch)?
        .into_iter()
        .map(|row| {
            names
                .iter()
                .zip(row)
                .map(|(name, value)| {
                    let value = value.map(Value::String).unwrap_or(Value::Null);
                    ((*name).clone(), value)
                })
                .collect::<Map<String, Value>>()
        })
        .collect())
}

impl Reporter for JsonFormatter {
    fn render(&self, report: &Report) -> Result<String, ReportError> {
        let dimensions = report
            .dimensions()
            .iter()
            .map(|d| {
                Ok(DimensionDocument {
                    name: d.dimension.to_string(),
                    rules: d
                        .outcomes
                        .iter()
                        .map(|o| self.rule_document(o))
                        .collect::<Result<Vec<_>, ReportError>>()?,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let document = ReportDocument {
            version: self.version.clone(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_rows: report.total_rows,
            total_violations: report.total_violations(),
            failed_rules: report.failed_rules(),
            dimensions,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
