use actix_web::{web, HttpResponse, Result as ActixResult};
use finsight_analysis::risk::compute_risk_score;
use shared_types::RiskInputs;
use tracing::info;

/// Combine already-fetched component signals into the composite risk
/// score. The external risk-model and device-insight calls happen before
/// this endpoint; it only does the arithmetic.
pub async fn compute_score(request: web::Json<RiskInputs>) -> ActixResult<HttpResponse> {
    let breakdown = compute_risk_score(&request);

    info!(
        final_score = breakdown.final_score,
        device_risk_score = breakdown.component_scores.device_risk_score,
        "computed composite risk score"
    );

    Ok(HttpResponse::Ok().json(breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use shared_types::RiskBreakdown;

    #[actix_web::test]
    async fn test_risk_score_endpoint() {
        let app = test::init_service(
            App::new().route("/api/risk/score", web::post().to(compute_score)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/risk/score")
            .set_json(serde_json::json!({
                "risk_score": 700.0,
                "device_risk_level": "VERY_HIGH",
                "claimed_name": "John Doe",
                "alternate_name": "John Doe",
                "device_carrier": "Airtel",
                "alternate_carrier": "Airtel",
                "device_apps": ["amazon", "netflix", "spotify"],
                "account_apps": ["amazon", "facebook", "netflix", "spotify"]
            }))
            .to_request();
        let breakdown: RiskBreakdown = test::call_and_read_body_json(&app, req).await;
        assert!((breakdown.final_score - 587.5).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn test_unknown_device_level_is_rejected() {
        let app = test::init_service(
            App::new().route("/api/risk/score", web::post().to(compute_score)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/risk/score")
            .set_json(serde_json::json!({
                "risk_score": 700.0,
                "device_risk_level": "CATASTROPHIC",
                "claimed_name": "John Doe",
                "alternate_name": "John Doe",
                "device_carrier": "Airtel",
                "alternate_carrier": "Airtel",
                "device_apps": [],
                "account_apps": []
            }))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
