use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{AnalysisRecord, AnalysisState};
use crate::email::RawEmail;

/// Request to analyze a batch of emails supplied directly in the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeEmailsRequest {
    pub user_id: String,
    pub emails: Vec<RawEmail>,
}

/// Response after submitting an analysis
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisSubmittedResponse {
    pub message: String,
    pub analysis_id: Uuid,
    pub status: AnalysisState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisProgress {
    pub total: usize,
    pub processed: usize,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisStatusResponse {
    pub status: AnalysisState,
    pub progress: AnalysisProgress,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisRecord>,
    pub pagination: Pagination,
}
