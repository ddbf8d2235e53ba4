use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::Utc;
use serde::Deserialize;
use shared_types::{
    AnalysisError, AnalysisListResponse, AnalysisProgress, AnalysisRecord, AnalysisState,
    AnalysisStatusResponse, AnalysisSubmittedResponse, AnalyzeEmailsRequest, Pagination,
};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

pub async fn create_analysis(
    state: web::Data<AppState>,
    request: web::Json<AnalyzeEmailsRequest>,
) -> ActixResult<HttpResponse> {
    if request.emails.is_empty() {
        return Err(actix_web::error::ErrorBadRequest(AnalysisError::EmptyBatch));
    }

    let analysis_id = Uuid::new_v4();
    let now = Utc::now();
    state.store.insert(AnalysisRecord {
        analysis_id,
        user_id: request.user_id.clone(),
        state: AnalysisState::Initialized,
        created_at: now,
        updated_at: now,
        email_count: request.emails.len(),
        processed_count: 0,
        error: None,
        result: None,
    });

    info!(
        analysis_id = %analysis_id,
        user_id = %request.user_id,
        emails = request.emails.len(),
        "starting email analysis"
    );
    state.store.update(analysis_id, |r| {
        r.state = AnalysisState::Processing;
        r.updated_at = Utc::now();
    });

    // The pipeline runs to completion within the request lifecycle; a bad
    // email inside the batch degrades to a skip, never an error here
    let result = state.pipeline.analyze(&request.emails);

    state.store.update(analysis_id, |r| {
        r.state = AnalysisState::Completed;
        r.processed_count = r.email_count;
        r.updated_at = Utc::now();
        r.result = Some(result);
    });

    Ok(HttpResponse::Ok().json(AnalysisSubmittedResponse {
        message: "Analysis completed successfully".to_string(),
        analysis_id,
        status: AnalysisState::Completed,
    }))
}

pub async fn get_analysis_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let record = state
        .store
        .get(&path)
        .ok_or_else(|| actix_web::error::ErrorNotFound(AnalysisError::NotFound))?;

    let percentage = if record.email_count > 0 {
        let raw = record.processed_count as f64 / record.email_count as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    } else {
        0.0
    };

    Ok(HttpResponse::Ok().json(AnalysisStatusResponse {
        status: record.state,
        progress: AnalysisProgress {
            total: record.email_count,
            processed: record.processed_count,
            percentage,
        },
        error: record.error,
    }))
}

pub async fn get_analysis_results(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let record = state
        .store
        .get(&path)
        .ok_or_else(|| actix_web::error::ErrorNotFound(AnalysisError::NotFound))?;

    if record.state != AnalysisState::Completed {
        return Err(actix_web::error::ErrorBadRequest(AnalysisError::NotReady));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "results": record.result
    })))
}

#[derive(Deserialize)]
pub struct ListAnalysesQuery {
    user_id: String,
    page: Option<usize>,
    limit: Option<usize>,
}

pub async fn list_analyses(
    state: web::Data<AppState>,
    query: web::Query<ListAnalysesQuery>,
) -> ActixResult<HttpResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let all = state.store.list_for_user(&query.user_id);
    let total = all.len();
    let analyses: Vec<AnalysisRecord> = all
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    Ok(HttpResponse::Ok().json(AnalysisListResponse {
        analyses,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        },
    }))
}

pub async fn delete_analysis(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    if !state.store.remove(&path) {
        return Err(actix_web::error::ErrorNotFound(AnalysisError::NotFound));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Analysis deleted successfully"
    })))
}
