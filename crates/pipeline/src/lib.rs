//! `saldo-pipeline` — sales/returns profit reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns classified
//! bucket series. No file or terminal dependencies.

pub mod cache;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod summary;

pub use cache::{ContentKey, TableCache};
pub use config::PipelineConfig;
pub use engine::{normalize_pair, run};
pub use error::PipelineError;
pub use model::{
    Dimension, FilterConfig, NormalizedTables, ProfitBucket, RawTable, RunResult, Status,
    Transaction,
};
