//! Service integration tests
//!
//! Every test starts a stub backend on an ephemeral port and points the
//! client at it, so requests go over real HTTP.

use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use findash::application::TaskTracker;
use findash::config::{ApiConfig, ServiceFamily};
use findash::domain::errors::ApiError;
use findash::domain::portfolio::{
    BacktestRequest, PortfolioMetricsRequest, Position, RebalanceFrequency,
};
use findash::domain::reference::{CryptoMarketsQuery, YieldCurveInterpolationRequest};
use findash::domain::task::{TaskKind, TaskStatus};
use findash::domain::valuation::{
    BondValuationRequest, BondValuationResponse, ForwardValuationRequest, SwapValuationRequest,
};
use findash::infrastructure::{ApiClient, Services};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// ============================================================================
// Test Fixtures
// ============================================================================

type Recorded = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Start a stub backend and return its base URL
async fn start_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn services_for(base_url: &str) -> Services {
    Services::new(ApiClient::new(ApiConfig::with_base_url(base_url)).unwrap())
}

fn bond_request() -> BondValuationRequest {
    BondValuationRequest {
        face_value: 1000.0,
        coupon_rate: 0.07,
        years_to_maturity: 2.0,
        market_rate: 0.12,
        frequency: 2,
        scenario_shifts_bp: Some(vec![-100.0, 0.0, 100.0]),
    }
}

fn bond_response_json() -> Value {
    json!({
        "price": 913.4,
        "accrued_interest": 0.0,
        "ytm": 0.12,
        "macaulay_duration": 1.9,
        "modified_duration": 1.79,
        "convexity": 4.2,
        "cashflows": [
            {"period": 1, "time": 0.5, "amount": 35.0, "discount_factor": 0.943, "present_value": 33.0},
            {"period": 2, "time": 1.0, "amount": 35.0, "discount_factor": 0.890, "present_value": 31.15},
            {"period": 3, "time": 1.5, "amount": 35.0, "discount_factor": 0.840, "present_value": 29.4},
            {"period": 4, "time": 2.0, "amount": 1035.0, "discount_factor": 0.792, "present_value": 819.85}
        ],
        "scenarios": [
            {"shift_bp": -100.0, "price": 930.1, "price_change_pct": 1.83},
            {"shift_bp": 0.0, "price": 913.4, "price_change_pct": 0.0},
            {"shift_bp": 100.0, "price": 897.0, "price_change_pct": -1.8}
        ]
    })
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_etf_candles_fills_ticker_and_skips_absent_params() {
    let recorded: Recorded = Arc::default();
    let rec = recorded.clone();

    let app = Router::new().route(
        "/api/etf/candles/{ticker}",
        get(
            move |Path(ticker): Path<String>, Query(query): Query<HashMap<String, String>>| {
                let rec = rec.clone();
                async move {
                    let mut entry = query;
                    entry.insert("_ticker".to_string(), ticker);
                    rec.lock().unwrap().push(entry);
                    Json(json!({"candles": [], "provider": "moex"}))
                }
            },
        ),
    );
    let base = start_stub(app).await;
    let services = services_for(&base);

    let response = services
        .etf
        .candles("SBMX", 24, None, None, Some(100))
        .await
        .unwrap();

    assert!(response.candles.is_empty());
    assert_eq!(response.ticker, "SBMX");
    assert_eq!(response.provider.as_deref(), Some("moex"));

    let calls = recorded.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get("_ticker").map(String::as_str), Some("SBMX"));
    assert_eq!(calls[0].get("interval").map(String::as_str), Some("24"));
    assert_eq!(calls[0].get("limit").map(String::as_str), Some("100"));
    assert!(!calls[0].contains_key("from"));
    assert!(!calls[0].contains_key("till"));
}

#[tokio::test]
async fn test_etf_candles_sends_date_bounds_and_keeps_backend_ticker() {
    let app = Router::new().route(
        "/api/etf/candles/{ticker}",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            assert_eq!(query.get("from").map(String::as_str), Some("2024-01-01"));
            assert_eq!(query.get("till").map(String::as_str), Some("2024-03-31"));
            Json(json!({
                "ticker": "TMOS",
                "candles": [
                    {"date": "2024-01-03", "open": 6.1, "high": 6.2, "low": 6.0, "close": 6.15, "volume": 120000},
                    {"date": "2024-01-04", "open": 6.15, "high": 6.3, "low": 6.1, "close": 6.28, "volume": 98000}
                ],
                "provider": "moex"
            }))
        }),
    );
    let base = start_stub(app).await;

    let response = services_for(&base)
        .etf
        .candles(
            "tmos",
            24,
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 3, 31),
            None,
        )
        .await
        .unwrap();

    assert_eq!(response.ticker, "TMOS");
    let closes: Vec<f64> = response.candles.iter().map(|c| c.close).collect();
    assert_eq!(closes, vec![6.15, 6.28]);
}

#[tokio::test]
async fn test_bond_response_round_trips_unchanged() {
    let app = Router::new().route(
        "/api/bond/valuate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["face_value"], 1000.0);
            assert_eq!(body["scenario_shifts_bp"], json!([-100.0, 0.0, 100.0]));
            Json(bond_response_json())
        }),
    );
    let base = start_stub(app).await;

    let response = services_for(&base)
        .bond
        .valuate(&bond_request())
        .await
        .unwrap();

    let expected: BondValuationResponse = serde_json::from_value(bond_response_json()).unwrap();
    assert_eq!(response, expected);
    let periods: Vec<u32> = response.cashflows.iter().map(|c| c.period).collect();
    assert_eq!(periods, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_swap_and_forward_valuation() {
    let app = Router::new()
        .route(
            "/api/swap/valuate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["pay_fixed"], true);
                Json(json!({
                    "npv": -1250.5, "fixed_leg_pv": 410000.0, "floating_leg_pv": 408749.5,
                    "par_rate": 0.1495, "dv01": 270.1,
                    "cashflows": [], "scenarios": [{"shift_bp": 100.0, "npv": 25760.0}]
                }))
            }),
        )
        .route(
            "/api/forward/valuate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["day_count_basis"], 365);
                Json(json!({"forward_price": 92.35, "fair_value": 1350.0}))
            }),
        );
    let base = start_stub(app).await;
    let services = services_for(&base);

    let swap = services
        .swap
        .valuate(&SwapValuationRequest {
            notional: 1_000_000.0,
            fixed_rate: 0.15,
            floating_rate: 0.16,
            tenor_years: 3.0,
            frequency: 4,
            discount_rate: 0.155,
            spread_bp: 0.0,
            pay_fixed: true,
        })
        .await
        .unwrap();
    assert_eq!(swap.npv, -1250.5);
    assert_eq!(swap.scenarios.len(), 1);
    assert_eq!(swap.duration, None);

    let forward = services
        .forward
        .valuate(&ForwardValuationRequest {
            spot_price: 90.0,
            strike_price: 91.0,
            notional: 100_000.0,
            domestic_rate: 0.16,
            foreign_rate: 0.05,
            days_to_maturity: 90,
            day_count_basis: 365,
        })
        .await
        .unwrap();
    assert_eq!(forward.forward_price, 92.35);
    assert!(forward.scenarios.is_empty());
}

#[tokio::test]
async fn test_crypto_markets_query() {
    let app = Router::new().route(
        "/api/crypto-data/coingecko/markets",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            assert_eq!(query.get("vs_currency").map(String::as_str), Some("usd"));
            assert_eq!(query.get("ids").map(String::as_str), Some("bitcoin,ethereum"));
            assert!(!query.contains_key("page"));
            Json(json!([
                {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 96000.0, "market_cap_rank": 1},
                {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "current_price": 3400.0, "market_cap_rank": 2}
            ]))
        }),
    );
    let base = start_stub(app).await;

    let markets = services_for(&base)
        .crypto
        .markets(&CryptoMarketsQuery {
            vs_currency: Some("usd".to_string()),
            ids: Some(vec!["bitcoin".to_string(), "ethereum".to_string()]),
            per_page: Some(2),
            page: None,
        })
        .await
        .unwrap();

    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0].id, "bitcoin");
    assert_eq!(markets[1].market_cap_rank, Some(2));
}

#[tokio::test]
async fn test_reference_lookups() {
    let app = Router::new()
        .route(
            "/api/calendar/holidays/{country}/{year}",
            get(|Path((country, year)): Path<(String, i32)>| async move {
                Json(json!({
                    "country": country,
                    "year": year,
                    "holidays": [{"date": format!("{}-01-01", year), "name": "New Year"}]
                }))
            }),
        )
        .route(
            "/api/dadata/company/{inn}",
            get(|Path(inn): Path<String>| async move {
                Json(json!({"inn": inn, "name": "PAO Sberbank", "kpp": "773601001"}))
            }),
        )
        .route(
            "/api/dadata/bank/{bic}",
            get(|Path(bic): Path<String>| async move {
                Json(json!({"bic": bic, "name": "Sberbank", "swift": "SABRRUMM"}))
            }),
        );
    let base = start_stub(app).await;
    let services = services_for(&base);

    let holidays = services.calendar.holidays("RU", 2025).await.unwrap();
    assert_eq!(holidays.country, "RU");
    assert_eq!(holidays.holidays.len(), 1);
    assert!(
        services
            .calendar
            .is_holiday("RU", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .await
            .unwrap()
    );
    assert!(
        !services
            .calendar
            .is_holiday("RU", NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
            .await
            .unwrap()
    );

    let company = services.company.company("7707083893").await.unwrap();
    assert_eq!(company.inn, "7707083893");
    assert_eq!(company.kpp.as_deref(), Some("773601001"));
    assert_eq!(company.address, None);

    let bank = services.company.bank("044525225").await.unwrap();
    assert_eq!(bank.swift.as_deref(), Some("SABRRUMM"));
}

#[tokio::test]
async fn test_yield_curve() {
    let app = Router::new()
        .route(
            "/api/zcyc",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                let date = query
                    .get("date")
                    .cloned()
                    .unwrap_or_else(|| "2025-06-30".to_string());
                Json(json!({
                    "date": date,
                    "points": [{"tenor": 0.25, "rate": 19.1}, {"tenor": 1.0, "rate": 17.8}, {"tenor": 10.0, "rate": 15.2}]
                }))
            }),
        )
        .route(
            "/api/zcyc/interpolate",
            post(|Json(body): Json<Value>| async move {
                let points: Vec<Value> = body["tenors"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|t| json!({"tenor": t, "rate": 16.0}))
                    .collect();
                Json(json!({"points": points}))
            }),
        );
    let base = start_stub(app).await;
    let services = services_for(&base);

    let latest = services.yield_curve.curve(None).await.unwrap();
    assert_eq!(latest.date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    assert_eq!(latest.points.len(), 3);

    let dated = services
        .yield_curve
        .curve(NaiveDate::from_ymd_opt(2025, 1, 15))
        .await
        .unwrap();
    assert_eq!(dated.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

    let interpolated = services
        .yield_curve
        .interpolate(&YieldCurveInterpolationRequest {
            tenors: vec![0.5, 2.0, 7.0],
            date: None,
        })
        .await
        .unwrap();
    let tenors: Vec<f64> = interpolated.points.iter().map(|p| p.tenor).collect();
    assert_eq!(tenors, vec![0.5, 2.0, 7.0]);
}

#[tokio::test]
async fn test_registry_export_returns_bytes_and_filename() {
    let app = Router::new().route(
        "/api/database/export/registry/parquet",
        post(|| async {
            (
                [(
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"registry_2025-06-30.parquet\"",
                )],
                Bytes::from_static(b"PAR1\x00\x01PAR1"),
            )
        }),
    );
    let base = start_stub(app).await;

    let file = services_for(&base)
        .database
        .export_registry_parquet()
        .await
        .unwrap();

    assert_eq!(file.filename, "registry_2025-06-30.parquet");
    assert_eq!(file.bytes, b"PAR1\x00\x01PAR1".to_vec());
}

// ============================================================================
// API Key Injection
// ============================================================================

fn portfolio_request() -> PortfolioMetricsRequest {
    PortfolioMetricsRequest {
        positions: vec![Position {
            symbol: "SBMX".to_string(),
            notional: 100_000.0,
            allocation: 100.0,
            target_allocation: 100.0,
            color: "#2979FF".to_string(),
        }],
        risk_free_rate: Some(0.16),
        confidence_level: None,
    }
}

fn key_echo_router() -> Router {
    let echo = |headers: HeaderMap| async move {
        let key = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let sharpe = if key.is_empty() { 0.0 } else { 1.0 };
        Json(json!({
            "expected_return": 0.12,
            "volatility": 0.18,
            "sharpe_ratio": sharpe,
            "var_95": null
        }))
    };
    Router::new()
        .route("/api/portfolio/metrics", post(echo))
        .route(
            "/api/bond/valuate",
            post(|headers: HeaderMap| async move {
                assert!(headers.get("x-api-key").is_none());
                Json(bond_response_json())
            }),
        )
}

#[tokio::test]
async fn test_portfolio_metrics_sends_api_key() {
    let base = start_stub(key_echo_router()).await;
    let config = ApiConfig::with_base_url(&base).with_api_key("secret");
    let services = Services::new(ApiClient::new(config).unwrap());

    let metrics = services.portfolio.metrics(&portfolio_request()).await.unwrap();
    assert_eq!(metrics.sharpe_ratio, 1.0);
    assert_eq!(metrics.var_95, None);

    // Other services never send the key
    services.bond.valuate(&bond_request()).await.unwrap();
}

#[tokio::test]
async fn test_portfolio_metrics_without_key() {
    let base = start_stub(key_echo_router()).await;

    let metrics = services_for(&base)
        .portfolio
        .metrics(&portfolio_request())
        .await
        .unwrap();
    assert_eq!(metrics.sharpe_ratio, 0.0);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_detail_message_becomes_error_message() {
    let app = Router::new().route(
        "/api/bond/valuate",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "years_to_maturity must be positive"})),
            )
        }),
    );
    let base = start_stub(app).await;

    let err = services_for(&base)
        .bond
        .valuate(&bond_request())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "years_to_maturity must be positive");
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_unparseable_error_body_mentions_status() {
    let app = Router::new().route(
        "/api/etf/list",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "<html>Internal Server Error</html>",
            )
                .into_response()
        }),
    );
    let base = start_stub(app).await;

    let err = services_for(&base).etf.list().await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unknown_route_maps_to_status_message() {
    let base = start_stub(Router::new()).await;

    let err = services_for(&base).backtest.health().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error 404");
}

#[tokio::test]
async fn test_invalid_success_body_is_decode_error() {
    let app = Router::new().route("/api/etf/list", get(|| async { "not json" }));
    let base = start_stub(app).await;

    let err = services_for(&base).etf.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = services_for(&format!("http://{}", addr))
        .backtest
        .health()
        .await
        .unwrap_err();

    match err {
        ApiError::Network(e) => assert!(e.is_connect() || e.is_request()),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_families_can_live_on_different_hosts() {
    let backtest_app = Router::new().route(
        "/api/backtest/health",
        get(|| async { Json(json!({"status": "ok", "version": "1.4.0"})) }),
    );
    let backtest_base = start_stub(backtest_app).await;
    let main_base = start_stub(Router::new()).await;

    let mut config = ApiConfig::with_base_url(&main_base);
    config.set_base_url(ServiceFamily::Backtest, &backtest_base);
    let services = Services::new(ApiClient::new(config).unwrap());

    let health = services.backtest.health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(health.version.as_deref(), Some("1.4.0"));

    assert!(services.etf.list().await.is_err());
}

// ============================================================================
// Progress Tracking Around A Request
// ============================================================================

#[tokio::test]
async fn test_backtest_progress_tracked_by_caller() {
    let app = Router::new().route(
        "/api/backtest/run",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["rebalance"], "monthly");
            Json(json!({
                "metrics": {
                    "total_return": 0.21, "annualized_return": 0.21, "volatility": 0.14,
                    "sharpe_ratio": 1.5, "max_drawdown": -0.08
                },
                "equity_curve": [
                    {"date": "2024-01-01", "value": 1000000.0},
                    {"date": "2024-12-31", "value": 1210000.0}
                ]
            }))
        }),
    );
    let base = start_stub(app).await;
    let services = services_for(&base);
    let tracker = TaskTracker::new(findash::config::TaskTrackerConfig {
        completed_ttl: Duration::from_millis(50),
        failed_ttl: Duration::from_millis(50),
    });

    let id = tracker.add_task("Backtest SBMX", TaskKind::Backtest);
    tracker.update_progress(id, 20);

    let result = services
        .backtest
        .run(&BacktestRequest {
            tickers: vec!["SBMX".to_string()],
            weights: vec![1.0],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            initial_capital: 1_000_000.0,
            rebalance: RebalanceFrequency::Monthly,
            benchmark: None,
        })
        .await
        .unwrap();
    tracker.update_progress(id, 100);

    assert_eq!(result.equity_curve.len(), 2);
    assert_eq!(tracker.get(id).unwrap().status, TaskStatus::Completed);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(tracker.get(id).is_none());
}
