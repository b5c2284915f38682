//! `saldo run` / `saldo validate` — config-driven profit reconciliation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use saldo_pipeline::engine::ALL_DIMENSIONS;
use saldo_pipeline::model::{DateRange, FilterConfig, RunResult, Status};
use saldo_pipeline::{
    normalize_pair, ContentKey, Dimension, PipelineConfig, PipelineError, TableCache,
};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_MISSING_INPUT};
use crate::CliError;

pub struct RunArgs {
    pub config: PathBuf,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub clients: Vec<String>,
    pub products: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub statuses: Vec<String>,
    pub by: Vec<String>,
}

fn pipeline_err(err: PipelineError) -> CliError {
    let (code, hint) = match &err {
        PipelineError::ConfigParse(_)
        | PipelineError::ConfigValidation(_)
        | PipelineError::MissingColumn { .. } => (EXIT_INVALID_CONFIG, None),
        PipelineError::MissingInput { .. } => (
            EXIT_MISSING_INPUT,
            Some("both the sales and the returns file must be present".to_string()),
        ),
    };
    CliError {
        code,
        message: err.to_string(),
        hint,
    }
}

/// Load inputs, normalize through the cache boundary, filter, and run.
/// Printing is left to `cmd_run` so tests can inspect the result.
pub fn execute(args: &RunArgs) -> Result<RunResult, CliError> {
    let config_str = std::fs::read_to_string(&args.config)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;
    let config = PipelineConfig::from_toml(&config_str).map_err(pipeline_err)?;

    // Resolve input files relative to the config file's directory
    let base_dir = args.config.parent().unwrap_or_else(|| Path::new("."));
    let sales_path = base_dir.join(&config.sales.file);
    let returns_path = base_dir.join(&config.returns.file);

    let sales_bytes = std::fs::read(&sales_path).map_err(|e| {
        pipeline_err(PipelineError::MissingInput {
            side: "sales".into(),
            detail: format!("cannot read {}: {e}", sales_path.display()),
        })
    })?;
    let returns_bytes = std::fs::read(&returns_path).map_err(|e| {
        pipeline_err(PipelineError::MissingInput {
            side: "returns".into(),
            detail: format!("cannot read {}: {e}", returns_path.display()),
        })
    })?;

    let sales_table = saldo_io::load_table_from_bytes(&sales_bytes, &sales_path)
        .map_err(|e| CliError::runtime(format!("cannot parse {}: {e}", sales_path.display())))?;
    let returns_table = saldo_io::load_table_from_bytes(&returns_bytes, &returns_path)
        .map_err(|e| CliError::runtime(format!("cannot parse {}: {e}", returns_path.display())))?;

    // One-shot runs start cold; long-lived embedders keep the cache
    // across filter changes so only the steps after it rerun.
    let mut cache = TableCache::new();
    let key = ContentKey::of(&sales_bytes, &returns_bytes);
    let tables = cache
        .get_or_insert_with(key, || normalize_pair(&config, &sales_table, &returns_table))
        .map_err(pipeline_err)?;

    let filter = build_filter(args)?;
    let dimensions = parse_dimensions(&args.by)?;

    Ok(saldo_pipeline::run(&config, tables, &filter, &dimensions))
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let result = execute(&args)?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    }

    // Human summary to stderr
    let meta = &result.meta;
    eprintln!(
        "pipeline '{}': {} sales rows ({} dropped, {} amounts zeroed), {} return rows ({} dropped, {} amounts zeroed)",
        meta.config_name,
        meta.sales_stats.rows_read,
        meta.sales_stats.rows_dropped_bad_date,
        meta.sales_stats.amounts_zeroed,
        meta.returns_stats.rows_read,
        meta.returns_stats.rows_dropped_bad_date,
        meta.returns_stats.amounts_zeroed,
    );

    let s = &result.summary;
    if s.bucket_count == 0 {
        eprintln!("no buckets match the current filters");
    } else {
        eprintln!(
            "{} buckets — {} profit, {} loss; net total {}",
            s.bucket_count,
            s.profit_buckets,
            s.loss_buckets,
            format_minor(s.net_total),
        );
    }

    Ok(())
}

pub fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    match PipelineConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: pipeline '{}' — sales file '{}', returns file '{}'",
                config.name, config.sales.file, config.returns.file,
            );
            Ok(())
        }
        Err(e) => Err(pipeline_err(e)),
    }
}

/// Translate the repeatable CLI flags into the engine's filter value.
pub fn build_filter(args: &RunArgs) -> Result<FilterConfig, CliError> {
    let from = args.from.as_deref().map(parse_cli_date).transpose()?;
    let to = args.to.as_deref().map(parse_cli_date).transpose()?;
    let date_range = match (from, to) {
        (None, None) => None,
        (from, to) => Some(DateRange {
            start: from.unwrap_or(NaiveDate::MIN),
            end: to.unwrap_or(NaiveDate::MAX),
        }),
    };

    let statuses = args
        .statuses
        .iter()
        .map(|s| s.parse::<Status>().map_err(CliError::usage))
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(FilterConfig {
        clients: args.clients.iter().cloned().collect(),
        products: args.products.iter().cloned().collect(),
        date_range,
        statuses,
    })
}

/// Parse `--by` values, deduplicated in order. No values means every
/// dashboard view.
pub fn parse_dimensions(by: &[String]) -> Result<Vec<Dimension>, CliError> {
    if by.is_empty() {
        return Ok(ALL_DIMENSIONS.to_vec());
    }
    let mut dimensions = Vec::new();
    for value in by {
        let dimension: Dimension = value.parse().map_err(CliError::usage)?;
        if !dimensions.contains(&dimension) {
            dimensions.push(dimension);
        }
    }
    Ok(dimensions)
}

fn parse_cli_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::usage(format!("cannot parse date '{value}' (expected YYYY-MM-DD)")))
}

fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_format_as_decimal() {
        assert_eq!(format_minor(7_000), "70.00");
        assert_eq!(format_minor(-5_000), "-50.00");
        assert_eq!(format_minor(-50), "-0.50");
        assert_eq!(format_minor(0), "0.00");
        assert_eq!(format_minor(123_456), "1234.56");
    }

    #[test]
    fn half_open_date_flags_fall_back_to_extremes() {
        let args = RunArgs {
            config: PathBuf::new(),
            json: false,
            output: None,
            clients: vec![],
            products: vec![],
            from: Some("2025-12-01".into()),
            to: None,
            statuses: vec![],
            by: vec![],
        };
        let filter = build_filter(&args).unwrap();
        let range = filter.date_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(range.end, NaiveDate::MAX);
    }

    #[test]
    fn bad_date_flag_is_a_usage_error() {
        let args = RunArgs {
            config: PathBuf::new(),
            json: false,
            output: None,
            clients: vec![],
            products: vec![],
            from: Some("12/01/2025".into()),
            to: None,
            statuses: vec![],
            by: vec![],
        };
        let err = build_filter(&args).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
    }

    #[test]
    fn dimensions_default_to_all_and_dedupe() {
        assert_eq!(parse_dimensions(&[]).unwrap(), ALL_DIMENSIONS.to_vec());
        let dims = parse_dimensions(&["client".into(), "client".into(), "date".into()]).unwrap();
        assert_eq!(dims, vec![Dimension::Client, Dimension::Date]);
        assert!(parse_dimensions(&["week".into()]).is_err());
    }
}
