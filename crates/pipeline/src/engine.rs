use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::filter;
use crate::model::{
    Dimension, FilterConfig, NormalizedTables, ProfitBucket, RawTable, RunMeta, RunResult,
    SeriesSet,
};
use crate::normalize::normalize_table;
use crate::reconcile::reconcile;
use crate::summary::{compute_summary, status_rollup};

/// All three dashboard views, in the order the page renders them.
pub const ALL_DIMENSIONS: [Dimension; 3] = [Dimension::Date, Dimension::Client, Dimension::Product];

/// Normalize both uploads with their configured column mappings.
pub fn normalize_pair(
    config: &PipelineConfig,
    sales: &RawTable,
    returns: &RawTable,
) -> Result<NormalizedTables, PipelineError> {
    let (sales_txns, sales_stats) = normalize_table("sales", sales, &config.sales.columns)?;
    let (return_txns, returns_stats) =
        normalize_table("returns", returns, &config.returns.columns)?;
    Ok(NormalizedTables {
        sales: sales_txns,
        returns: return_txns,
        sales_stats,
        returns_stats,
    })
}

/// Run the reconciliation pipeline over normalized tables.
///
/// Transaction-level filters are applied once, then one bucket series is
/// built per requested dimension. The first requested dimension is the
/// primary series: the status rollup and the summary are computed from
/// it, the way the dashboard feeds its share-of-total view from the
/// daily frame.
pub fn run(
    config: &PipelineConfig,
    tables: &NormalizedTables,
    filter_config: &FilterConfig,
    dimensions: &[Dimension],
) -> RunResult {
    let sales = filter::apply(filter_config, &tables.sales);
    let returns = filter::apply(filter_config, &tables.returns);

    let mut series = SeriesSet::default();
    let mut primary: Vec<ProfitBucket> = Vec::new();

    for (i, dimension) in dimensions.iter().enumerate() {
        let buckets =
            filter::retain_statuses(reconcile(&sales, &returns, *dimension), filter_config);
        if i == 0 {
            primary = buckets.clone();
        }
        match dimension {
            Dimension::Date => series.date = Some(buckets),
            Dimension::Client => series.client = Some(buckets),
            Dimension::Product => series.product = Some(buckets),
        }
    }

    RunResult {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            sales_stats: tables.sales_stats,
            returns_stats: tables.returns_stats,
        },
        status_rollup: status_rollup(&primary),
        summary: compute_summary(&primary),
        series,
    }
}
