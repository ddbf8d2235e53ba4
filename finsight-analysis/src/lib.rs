//! Finsight Analysis
//!
//! Aggregation and scoring on top of the `extractors` crate: takes a batch
//! of raw emails through classify -> extract -> aggregate -> finalize and
//! produces a single [`shared_types::AnalysisResult`], plus the composite
//! device-risk score.
//!
//! The pipeline is a pure function of its input batch: no external time
//! source beyond the emails' own timestamps, no randomness, no shared
//! mutable state between runs. Aggregation is strictly additive and
//! two-pass (accumulate per email, then finalize derived metrics once the
//! grand totals are known).

pub mod credit;
pub mod insights;
pub mod pipeline;
pub mod risk;
pub mod spending;

pub use credit::CreditAggregator;
pub use pipeline::AnalysisPipeline;
pub use spending::{detect_recurring_payments, SpendingAggregator};
