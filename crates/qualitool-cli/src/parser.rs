use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub clean: Option<CleanConfig>,
    #[serde(default)]
    pub rule: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    pub delimiter: Option<String>,
    #[serde(default = "default_true")]
    pub infer_schema: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub details: bool,
    pub output: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CleanConfig {
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct RuleConfig {
    pub dimension: String,
    pub kind: String,
    pub column: Option<String>,
    /// Key columns for a composite `unique` rule
    pub over: Option<Vec<String>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub flag: Option<String>,
    pub members: Option<Vec<String>>,
    pub formats: Option<Vec<String>>,
    pub description: Option<String>,
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub clean: bool,
}

fn default_true() -> bool {
    true
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
