use qualitool_core::{Report, RuleOutcome};

use crate::{formatters::table::render_batch, ReportError, Reporter};

/// Human-readable report, grouped by dimension:
///
/// ```text
///
/// === Accuracy 检查结果 ===
/// 规则: release_year >= 1900
/// 不符合行数: 1
/// 违规详情:
///  release_year
///          1850
/// ```
///
/// Every dimension gets a header, even without rules. Row details are only
/// shown when asked for and when the rule found violations.
pub struct TextFormatter {
    include_details: bool,
}

impl TextFormatter {
    pub fn new(include_details: bool) -> Self {
        Self { include_details }
    }
}

impl Reporter for TextFormatter {
    fn render(&self, report: &Report) -> Result<String, ReportError> {
        let mut lines: Vec<String> = Vec::new();

        for dimension in report.dimensions() {
            lines.push(format!("\n=== {} 检查结果 ===", dimension.dimension));
            for outcome in &dimension.outcomes {
                lines.push(format!("规则: {}", outcome.description()));
                match outcome {
                    RuleOutcome::Evaluated(result) => {
                        lines.push(format!("不符合行数: {}", result.violation_count));
                        if self.include_details && result.violation_count > 0 {
                            lines.push("违规详情:".to_string());
                            lines.push(render_batch(&result.violating_rows)?);
                        }
                    }
                    RuleOutcome::Failed(failure) => {
                        lines.push(format!("评估失败: {}", failure.message));
                    }
                }
            }
        }

        Ok(lines.join("\n"))
    }
}
