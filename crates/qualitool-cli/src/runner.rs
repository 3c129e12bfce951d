use anyhow::{Context, Result};
use chrono::Local;
use qualitool_core::{
    drop_violations,
    readers::{read_dataset, ReaderConfig, ReaderConfigBuilder},
    Dataset, Report,
};
use qualitool_reports::{write_output, Destination, JsonFormatter, Reporter, TextFormatter};
use tracing::info;

use crate::{
    constructor::{construct_cleaning_rules, construct_registry},
    errors::ConfigError,
    parser::{parse_config, CleanConfig, Config, DatasetConfig, RuleConfig},
    Args, OutputFormat,
};

/// Load, audit and optionally clean then re-audit the configured dataset.
///
/// Returns `true` when the final audit found no violations and no failed rules.
pub fn run(args: &Args) -> Result<bool> {
    let config = parse_config(&args.config)?;
    let reader_config = reader_config(&config.dataset)?;
    let dataset = read_dataset(&config.dataset.path, &reader_config)
        .with_context(|| format!("Failed to load dataset: '{}'", config.dataset.path))?;

    let mut reports = vec![audit(dataset.clone(), &config.rule)?];
    if let Some(clean) = &config.clean {
        let cleaned = clean_dataset(&dataset, &config.rule, clean)?;
        reports.push(audit(cleaned, &config.rule)?);
    }

    let rendered = render(args, &config, &reports)?;
    let destination = destination(args, &config)?;
    write_output(&rendered, &destination)?;

    Ok(reports.last().is_some_and(Report::is_clean))
}

pub fn reader_config(dataset: &DatasetConfig) -> Result<ReaderConfig, ConfigError> {
    let mut builder = ReaderConfigBuilder::new().with_infer_schema(dataset.infer_schema);
    if let Some(delimiter) = &dataset.delimiter {
        match delimiter.as_bytes() {
            [byte] if byte.is_ascii() => builder = builder.with_delimiter(*byte),
            _ => return Err(ConfigError::InvalidDelimiter(delimiter.clone())),
        }
    }
    Ok(builder.build())
}

fn audit(dataset: Dataset, rules: &[RuleConfig]) -> Result<Report> {
    let registry = construct_registry(dataset, rules).context("Failed to build rule registry")?;
    Ok(registry.run())
}

fn clean_dataset(dataset: &Dataset, rules: &[RuleConfig], clean: &CleanConfig) -> Result<Dataset> {
    let cleaning_rules = construct_cleaning_rules(rules).context("Failed to build cleaning rules")?;
    info!("清洗前数据量: {}", dataset.num_rows());
    let summary = drop_violations(dataset, &cleaning_rules).context("Cleaning failed")?;
    info!("清洗后数据量: {}", summary.rows_after);
    summary
        .dataset
        .write_csv(&clean.output)
        .with_context(|| format!("Failed to write cleaned dataset: '{}'", clean.output))?;
    info!(
        path = clean.output.as_str(),
        dropped = summary.rows_dropped(),
        "cleaned dataset written"
    );
    Ok(summary.dataset)
}

fn render(args: &Args, config: &Config, reports: &[Report]) -> Result<String> {
    let include_details = args.details || config.report.details;
    let rendered = match args.output {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(include_details);
            reports
                .iter()
                .map(|r| formatter.render(r))
                .collect::<Result<Vec<_>, _>>()?
                .join("\n")
        }
        OutputFormat::Json => {
            let formatter =
                JsonFormatter::new(env!("CARGO_PKG_VERSION").to_string(), include_details);
            let documents = reports
                .iter()
                .map(|r| formatter.render(r))
                .collect::<Result<Vec<_>, _>>()?;
            match documents.len() {
                1 => documents.join(""),
                _ => format!("[\n{}\n]", documents.join(",\n")),
            }
        }
    };
    Ok(rendered)
}

fn destination(args: &Args, config: &Config) -> Result<Destination> {
    let requested = args
        .report_file
        .as_deref()
        .or(config.report.output.as_deref());
    match requested {
        Some(path) => {
            let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
            let extension = match args.output {
                OutputFormat::Text => "ans",
                OutputFormat::Json => "json",
            };
            Ok(Destination::File(crate::writer::resolve_file_path(
                path, &timestamp, extension,
            )?))
        }
        None => Ok(Destination::Stdout),
    }
}
