use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use extractors::PatternLibrary;
use finsight_analysis::AnalysisPipeline;
use shared_types::AnalysisRecord;
use uuid::Uuid;

/// Shared application state: the pattern-backed pipeline (built once at
/// startup) and the in-memory analysis registry. Persistence proper is an
/// external concern; the registry only spans the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub store: Arc<AnalysisStore>,
}

impl AppState {
    pub fn new() -> Self {
        // The pattern tables are compiled exactly once; every request
        // shares them by reference
        let patterns = Arc::new(PatternLibrary::new());
        Self {
            pipeline: Arc::new(AnalysisPipeline::with_patterns(patterns)),
            store: Arc::new(AnalysisStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory registry of analysis runs keyed by analysis id
#[derive(Default)]
pub struct AnalysisStore {
    records: RwLock<HashMap<Uuid, AnalysisRecord>>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: AnalysisRecord) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(record.analysis_id, record);
    }

    /// Apply a mutation to a stored record; returns false when the id is
    /// unknown
    pub fn update<F>(&self, analysis_id: Uuid, mutate: F) -> bool
    where
        F: FnOnce(&mut AnalysisRecord),
    {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records.get_mut(&analysis_id) {
            Some(record) => {
                mutate(record);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, analysis_id: &Uuid) -> Option<AnalysisRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(analysis_id).cloned()
    }

    pub fn remove(&self, analysis_id: &Uuid) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.remove(analysis_id).is_some()
    }

    /// All analyses for one user, newest first
    pub fn list_for_user(&self, user_id: &str) -> Vec<AnalysisRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut analyses: Vec<AnalysisRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        analyses
    }
}
