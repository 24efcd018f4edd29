//! REST API handlers for campaign forecasting and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campaign_core::rate_card::RateCard;
use campaign_core::types::{CampaignConfig, CampaignForecast, ChannelRate};
use campaign_forecast::calculator::is_priceable;
use campaign_forecast::{
    compute_forecast, validate_campaign, ForecastDisplay, MediaQuote, ValidationRules,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Maximum number of channel allocations per forecast request.
const MAX_CHANNELS: usize = 64;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub rate_card: Arc<RateCard>,
    pub rules: ValidationRules,
    pub currency_symbol: String,
    pub node_id: String,
    pub start_time: Instant,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

/// POST /v1/forecast: forecast a campaign's delivery and cost.
pub async fn handle_forecast(
    State(state): State<AppState>,
    Json(campaign): Json<CampaignConfig>,
) -> Result<Json<ForecastResponse>, ApiError> {
    if campaign.channels.len() > MAX_CHANNELS {
        metrics::counter!("api.validation_errors").increment(1);
        return Err(bad_request(
            "invalid_campaign",
            format!("campaign exceeds {MAX_CHANNELS} channel allocations"),
        ));
    }
    if let Err(e) = validate_campaign(&campaign, &state.rules) {
        warn!(campaign = ?campaign.name, error = %e, "Campaign validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err(bad_request("invalid_campaign", e.to_string()));
    }

    let forecast = compute_forecast(&campaign, &state.rate_card);
    let display = ForecastDisplay::new(&forecast, &state.currency_symbol);

    metrics::counter!("planner.forecasts").increment(1);
    if !forecast.warnings.is_empty() {
        metrics::counter!("planner.forecast_warnings").increment(forecast.warnings.len() as u64);
    }
    debug!(
        campaign = ?campaign.name,
        channels = forecast.channel_results.len(),
        reach_pct = forecast.reach_percentage,
        "Forecast served"
    );

    Ok(Json(ForecastResponse { forecast, display }))
}

/// POST /v1/quote: price a single-channel spend at rate card terms.
pub async fn handle_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<MediaQuote>, ApiError> {
    let Some(rate) = state.rate_card.get(&request.channel_id) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "unknown_channel".to_string(),
                message: format!("no rate card entry for '{}'", request.channel_id),
            }),
        ));
    };
    if !is_priceable(request.budget) {
        return Err(bad_request(
            "invalid_quote",
            "budget must be a non-negative number".to_string(),
        ));
    }

    let cpm = request.cpm_override.unwrap_or(rate.cpm);
    metrics::counter!("planner.quotes").increment(1);
    Ok(Json(MediaQuote::from_budget(request.budget, cpm, rate.ctr)))
}

/// GET /v1/channels: list the rate card.
pub async fn list_channels(State(state): State<AppState>) -> Json<Vec<ChannelRate>> {
    Json(state.rate_card.iter().cloned().collect())
}

/// GET /health: health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        channels: state.rate_card.len(),
    })
}

/// GET /live: liveness probe for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub channel_id: String,
    pub budget: f64,
    #[serde(default)]
    pub cpm_override: Option<f64>,
}

#[derive(Serialize)]
pub struct ForecastResponse {
    pub forecast: CampaignForecast,
    pub display: ForecastDisplay,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub channels: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::server::router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            rate_card: Arc::new(RateCard::default()),
            rules: ValidationRules::default(),
            currency_symbol: "₹".to_string(),
            node_id: "test-node".to_string(),
            start_time: Instant::now(),
        }
    }

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router(state())
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_forecast_endpoint() {
        let (status, body) = post(
            "/v1/forecast",
            json!({
                "name": "Credit Card Launch",
                "budget": 500000,
                "durationDays": 30,
                "channels": [{"channelId": "meta", "allocationPercent": 100}],
                "audience": {"size": 500000, "ageMin": 21, "ageMax": 45}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["forecast"]["uniqueReach"], 270000.0);
        assert_eq!(body["display"]["totalImpressions"], "5,263,158");
        assert_eq!(body["display"]["reachPercentage"], "54.0%");
        assert_eq!(body["forecast"]["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_forecast_rejects_inverted_age_range() {
        let (status, body) = post(
            "/v1/forecast",
            json!({
                "budget": 1000,
                "durationDays": 7,
                "channels": [],
                "audience": {"size": 1000, "ageMin": 50, "ageMax": 30}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_campaign");
    }

    #[tokio::test]
    async fn test_quote_endpoint() {
        let linkedin = json!({"channelId": "linkedin", "budget": 45000});
        let (status, body) = post("/v1/quote", linkedin).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["impressions"], 100000.0);

        let (status, body) = post("/v1/quote", json!({"channelId": "myspace", "budget": 1})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown_channel");
    }

    #[tokio::test]
    async fn test_quote_rejects_negative_budget() {
        let (status, body) = post("/v1/quote", json!({"channelId": "meta", "budget": -500})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_quote");
    }

    #[tokio::test]
    async fn test_channels_and_health() {
        let response = router(state())
            .oneshot(Request::get("/v1/channels").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let channels: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(channels.as_array().unwrap().len(), 7);
        assert_eq!(channels[0]["id"], "meta");

        let response = router(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
