use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Untyped table as loaded from disk: the first file row supplies the
/// headers, every cell stays a string. Typing is the normalizer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// A single normalized transaction from either uploaded table.
///
/// Amounts are signed minor units (hundredths); the normalizer owns the
/// one scaling step, the engine only adds and subtracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub client: String,
    pub product: String,
    pub qty: Option<i64>,
    pub amount_minor: i64,
}

/// Per-side counters from normalization. Dropped rows are a cleaning
/// policy, not failures, so they travel as counts rather than errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_read: usize,
    pub rows_dropped_bad_date: usize,
    pub amounts_zeroed: usize,
}

/// The immutable output of normalizing both uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTables {
    pub sales: Vec<Transaction>,
    pub returns: Vec<Transaction>,
    pub sales_stats: NormalizeStats,
    pub returns_stats: NormalizeStats,
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Grouping axis for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Date,
    Client,
    Product,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Client => write!(f, "client"),
            Self::Product => write!(f, "product"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" | "day" => Ok(Self::Date),
            "client" => Ok(Self::Client),
            "product" => Ok(Self::Product),
            other => Err(format!(
                "unknown dimension '{other}' (expected date, client, or product)"
            )),
        }
    }
}

/// Distinct key value along one dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Date(NaiveDate),
    Client(String),
    Product(String),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Client(name) | Self::Product(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Profit/loss classification. A zero net counts as a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Profit,
    Loss,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profit => write!(f, "PROFIT"),
            Self::Loss => write!(f, "LOSS"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "profit" => Ok(Self::Profit),
            "loss" => Ok(Self::Loss),
            other => Err(format!("unknown status '{other}' (expected profit or loss)")),
        }
    }
}

/// One aggregated row of the profit/loss view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitBucket {
    pub key: BucketKey,
    pub sales_total: i64,
    pub returns_total: i64,
    pub net_profit: i64,
    pub status: Status,
}

/// Net profit summed per status, for the share-of-total view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: Status,
    pub net_profit: i64,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Inclusive date range. An inverted range (start > end) selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// User-selected working-set restriction, passed into every run as a
/// value. Empty selection sets mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub clients: BTreeSet<String>,
    pub products: BTreeSet<String>,
    pub date_range: Option<DateRange>,
    pub statuses: BTreeSet<Status>,
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub sales_stats: NormalizeStats,
    pub returns_stats: NormalizeStats,
}

/// Bucket series keyed by dimension. Only requested dimensions are set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Vec<ProfitBucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Vec<ProfitBucket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Vec<ProfitBucket>>,
}

/// Headline numbers over the primary series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub bucket_count: usize,
    pub profit_buckets: usize,
    pub loss_buckets: usize,
    pub sales_total: i64,
    pub returns_total: i64,
    pub net_total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub meta: RunMeta,
    pub series: SeriesSet,
    pub status_rollup: Vec<StatusSlice>,
    pub summary: RunSummary,
}
