//! HTTP query surface.
//!
//! `GET /data` copies the series out of the store, evaluates the market-open
//! flag and serializes the result. The lock is released before serialization,
//! so a slow client never holds up the simulator.
//!
//! `GET /health` is a liveness probe.

use crate::model::calendar::{MarketCalendar, MarketClock};
use crate::model::series::SeriesStore;
use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use std::sync::Arc;
use ticker_common::net::DATA_PATH;
use ticker_common::{MarketData, Result, TickerError};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Read-only state shared with every handler.
pub struct AppState {
    pub store: Arc<SeriesStore>,
    pub calendar: MarketCalendar,
    pub clock: MarketClock,
}

impl AppState {
    pub fn new(store: Arc<SeriesStore>, calendar: MarketCalendar, clock: MarketClock) -> Arc<Self> {
        Arc::new(Self {
            store,
            calendar,
            clock,
        })
    }

    /// Build the `/data` payload as seen at local time `now`.
    pub fn market_data(&self, now: NaiveDateTime) -> MarketData {
        let snapshot = self.store.snapshot();
        MarketData {
            timestamps: snapshot.timestamps,
            prices: snapshot.prices,
            market_open: self.calendar.is_market_open(&now),
            current_price: snapshot.current_price,
        }
    }
}

/// Router with all routes, CORS applied.
pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route(DATA_PATH, get(get_data))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Permissive CORS for an empty list, otherwise only the listed origins may call.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| TickerError::InvalidConfig(format!("bad origin {origin:?}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET]))
}

async fn get_data(State(state): State<Arc<AppState>>) -> Json<MarketData> {
    let now = state.clock.now().naive_local();
    Json(state.market_data(now))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::calendar::MarketHours;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn state() -> Arc<AppState> {
        let store = Arc::new(SeriesStore::seeded("17:00"));
        store.append(4500, "17:05").unwrap();
        AppState::new(
            store,
            MarketCalendar::new(MarketHours::default(), None),
            MarketClock::default(),
        )
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn closed_hour_reports_market_closed_with_same_series() {
        let state = state();
        let open = state.market_data(at(17, 10));
        let closed = state.market_data(at(10, 0));
        assert!(open.market_open);
        assert!(!closed.market_open);
        assert_eq!(closed.prices, open.prices);
        assert_eq!(closed.timestamps, vec!["17:00", "17:05"]);
        assert_eq!(closed.current_price, 4500);
    }

    #[tokio::test]
    async fn data_endpoint_serves_series_json() {
        let app = router(state(), CorsLayer::permissive());
        let response = app
            .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let data: MarketData = serde_json::from_slice(&body).unwrap();
        assert_eq!(data.prices, vec![5000, 4500]);
        assert_eq!(data.timestamps, vec!["17:00", "17:05"]);
        assert_eq!(data.current_price, 4500);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = router(state(), CorsLayer::permissive());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn allow_list_echoes_listed_origin_only() {
        let origins = vec![
            "https://myboozeevent.com".to_string(),
            "https://www.myboozeevent.com".to_string(),
        ];
        let app = router(state(), cors_layer(&origins).unwrap());

        let allowed = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/data")
                    .header(header::ORIGIN, "https://www.myboozeevent.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.myboozeevent.com"
        );

        let denied = app
            .oneshot(
                Request::builder()
                    .uri("/data")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn bad_origin_is_config_error() {
        let err = cors_layer(&["bad\norigin".to_string()]).unwrap_err();
        assert!(matches!(err, TickerError::InvalidConfig(_)));
    }
}
