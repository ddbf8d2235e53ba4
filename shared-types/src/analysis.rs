use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::email::EmailType;
use crate::transaction::{Category, ExtractedTransaction, PaymentRecord};

/// Analysis registry errors
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no emails provided for analysis")]
    EmptyBatch,

    #[error("analysis not found")]
    NotFound,

    #[error("analysis results not ready")]
    NotReady,
}

/// Derived per-card metrics, computed in the finalize pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardMetrics {
    /// on-time payments / recorded statements; None when no statement
    /// due-dates were observed
    pub payment_ratio: Option<f64>,
    pub average_monthly_spend: f64,
    /// total spend / credit limit * 100; None (not zero) when no credit
    /// limit was ever observed for the card
    pub credit_utilization: Option<f64>,
}

/// One physical card, keyed `issuer_last4`. Created lazily on the first
/// event referencing the key; mutated additively, never deleted within a
/// single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAccount {
    pub issuer: String,
    pub last4: String,
    pub total_spend: f64,
    pub transactions: Vec<ExtractedTransaction>,
    pub payment_history: Vec<PaymentRecord>,
    pub reward_points: i64,
    /// Highest total credit limit seen in any statement or alert
    pub credit_limit: Option<f64>,
    /// Statement due-dates, in the order they were observed
    pub due_dates: Vec<NaiveDate>,
    pub metrics: CardMetrics,
}

impl CardAccount {
    pub fn new(issuer: impl Into<String>, last4: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            last4: last4.into(),
            total_spend: 0.0,
            transactions: Vec::new(),
            payment_history: Vec::new(),
            reward_points: 0,
            credit_limit: None,
            due_dates: Vec::new(),
            metrics: CardMetrics::default(),
        }
    }

    pub fn card_key(&self) -> String {
        format!("{}_{}", self.issuer, self.last4)
    }
}

/// A merchant's share within one category, by transaction count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantShare {
    pub merchant: String,
    pub transaction_count: u64,
    /// Share of the category's transaction count, percent
    pub share: f64,
}

/// Per-category accumulation. Derived fields (`average_transaction`,
/// `spend_percentage`, `top_merchants`) are zero/empty until the finalize
/// pass has run over the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub total_spend: f64,
    pub transaction_count: u64,
    pub merchant_frequency: BTreeMap<String, u64>,
    /// "YYYY-MM" -> spend in that month
    pub monthly_trend: BTreeMap<String, f64>,
    pub largest_transaction: f64,
    /// Most-recent-first, capped at 5
    pub recent_transactions: Vec<ExtractedTransaction>,
    pub average_transaction: f64,
    /// Share of overall spend, percent
    pub spend_percentage: f64,
    pub top_merchants: Vec<MerchantShare>,
}

/// A merchant rolled up across every category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMerchant {
    pub merchant: String,
    pub transaction_count: u64,
    pub total_spend: f64,
    pub average_transaction: f64,
    pub categories: Vec<Category>,
}

/// Batch-wide running totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_spend: f64,
    pub transaction_count: u64,
    /// "YYYY-MM" -> spend in that month
    pub monthly_totals: BTreeMap<String, f64>,
    pub peak_spending_month: Option<String>,
    /// Top 10 merchants across all categories, by transaction count
    pub top_merchants: Vec<OverallMerchant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub categories: BTreeMap<Category, CategoryBucket>,
    pub overall: OverallStats,
}

/// A merchant charge pattern with a regular inter-transaction interval.
/// Feeds insight generation only; not stored in any bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPayment {
    pub merchant: String,
    /// Rounded mean gap between consecutive charges, in days
    pub interval_days: i64,
    pub average_amount: f64,
    pub occurrences: usize,
}

/// Top-level output of one analysis run. Owned by the run that created it
/// and never mutated after finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub credit_analysis: BTreeMap<String, CardAccount>,
    pub spending_analysis: SpendingAnalysis,
    pub insights: Vec<String>,
    pub emails_processed: usize,
    pub transactions_extracted: usize,
    pub category_distribution: BTreeMap<EmailType, u64>,
    pub generated_at: DateTime<Utc>,
}

/// Lifecycle of a stored analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisState {
    Initialized,
    Processing,
    Completed,
    Failed,
}

/// Registry entry for one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: Uuid,
    pub user_id: String,
    pub state: AnalysisState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email_count: usize,
    pub processed_count: usize,
    pub error: Option<String>,
    pub result: Option<AnalysisResult>,
}
