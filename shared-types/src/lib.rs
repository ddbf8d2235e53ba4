use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod api;
pub mod email;
pub mod risk;
pub mod transaction;

pub use analysis::{
    AnalysisError, AnalysisRecord, AnalysisResult, AnalysisState, CardAccount, CardMetrics,
    CategoryBucket, MerchantShare, OverallMerchant, OverallStats, RecurringPayment,
    SpendingAnalysis,
};
pub use api::{
    AnalysisListResponse, AnalysisProgress, AnalysisStatusResponse, AnalysisSubmittedResponse,
    AnalyzeEmailsRequest, Pagination,
};
pub use email::{Classification, EmailType, RawEmail};
pub use risk::{DeviceRiskLevel, RiskBreakdown, RiskComponentScores, RiskInputs};
pub use transaction::{
    CardEvent, CardEventKind, Category, Direction, ExtractedTransaction, PaymentMode,
    PaymentRecord, StatementPeriod, UNKNOWN_MERCHANT,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
