//! Integration tests for the MET Norway source using wiremock.

use std::time::Duration;

use serde_json::{Value, json};
use uvcheck_core::{
    ConfiguredLocation, Coordinate, ForecastSeries, MetNoSource, NominatimGeocoder, Session,
    UvError, WeatherDataSource, summarize,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/complete";
const UA: &str = "uvcheck-tests/0.1";

fn step(time: &str, details: Value) -> Value {
    json!({
        "time": time,
        "data": {
            "instant": { "details": details },
            "next_1_hours": { "summary": { "symbol_code": "clearsky_day" } }
        }
    })
}

fn uv(value: Value) -> Value {
    json!({ "ultraviolet_index_clear_sky": value })
}

fn forecast(steps: Vec<Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [10.75, 59.91, 12] },
        "properties": {
            "meta": { "updated_at": "2026-06-21T08:00:00Z" },
            "timeseries": steps
        }
    })
}

fn source(server: &MockServer) -> MetNoSource {
    let endpoint = format!("{}{FORECAST_PATH}", server.uri());
    MetNoSource::new(endpoint, UA, Duration::from_secs(5))
        .expect("client should build")
}

async fn fetch(server: &MockServer, lat: f64, lon: f64) -> Result<ForecastSeries, UvError> {
    let coordinate = Coordinate::new(lat, lon);
    source(server).fetch_series(coordinate).await
}

#[tokio::test]
async fn test_fetch_and_summarize() {
    let server = MockServer::start().await;

    let first = json!({
        "ultraviolet_index_clear_sky": 3,
        "air_temperature": 18.4,
        "precipitation_rate": 0.0
    });
    let body = forecast(vec![
        step("2026-06-21T09:00:00Z", first),
        step("2026-06-21T10:00:00Z", uv(json!(8))),
        step("2026-06-21T11:00:00Z", json!({})),
    ]);

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("lat", "59.91"))
        .and(query_param("lon", "10.75"))
        .and(header("user-agent", UA))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let series = fetch(&server, 59.91, 10.75).await.unwrap();
    assert_eq!(series.len(), 3);

    let summary = summarize(&series).unwrap();
    assert_eq!(summary.latest.ultraviolet_index_clear_sky, Some(3.0));
    assert_eq!(summary.latest.air_temperature, Some(18.4));
    assert_eq!(summary.peak_uv, 8.0);

    let latest_time = summary.latest_time.map(|t| t.to_rfc3339());
    assert_eq!(latest_time.as_deref(), Some("2026-06-21T09:00:00+00:00"));
}

#[tokio::test]
async fn test_bad_timestamp_does_not_drop_the_series() {
    let server = MockServer::start().await;

    let body = forecast(vec![
        step("2026-06-21T09:00:00Z", uv(json!(2))),
        step("2026-06-21 10:00", uv(json!(8))),
    ]);

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let series = fetch(&server, 59.91, 10.75).await.unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.entries()[1].time, "2026-06-21 10:00");

    let summary = summarize(&series).unwrap();
    assert_eq!(summary.peak_uv, 8.0);
    assert_eq!(summary.latest.ultraviolet_index_clear_sky, Some(2.0));
    assert!(summary.latest_time.is_some());
}

#[tokio::test]
async fn test_coordinates_are_rounded() {
    let server = MockServer::start().await;

    let body = forecast(vec![step("2026-06-21T09:00:00Z", uv(json!(0)))]);

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("lat", "59.9139"))
        .and(query_param("lon", "10.7522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let series = fetch(&server, 59.913_868_5, 10.752_245_1).await.unwrap();
    let summary = summarize(&series).unwrap();
    assert_eq!(summary.peak_uv, 0.0);
    assert_eq!(summary.latest.ultraviolet_index_clear_sky, Some(0.0));
}

#[tokio::test]
async fn test_server_error_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = fetch(&server, 1.0, 2.0).await.unwrap_err();
    match err {
        UvError::Fetch { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_timeseries_fails_to_summarize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast(vec![])))
        .mount(&server)
        .await;

    let series = fetch(&server, 1.0, 2.0).await.unwrap();
    assert!(series.is_empty());
    assert!(matches!(summarize(&series), Err(UvError::EmptySeries)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    let page = ResponseTemplate::new(200).set_body_string("<html/>");

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(page)
        .mount(&server)
        .await;

    let err = fetch(&server, 1.0, 2.0).await.unwrap_err();
    assert!(matches!(err, UvError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on port 1.
    let timeout = Duration::from_secs(2);
    let src = MetNoSource::new("http://127.0.0.1:1/complete", UA, timeout)
        .expect("client should build");

    let err = src
        .fetch_series(Coordinate::new(1.0, 2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, UvError::Transport(_)), "got {err:?}");
    assert!(err.is_data_error());
}

#[tokio::test]
async fn test_server_error_keeps_previous_summary() {
    let server = MockServer::start().await;

    let body = forecast(vec![step("2026-06-21T09:00:00Z", uv(json!(5.2)))]);

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let location = ConfiguredLocation::new(true, Some(Coordinate::new(59.91, 10.75)))
        .with_place_name(Some("Oslo".into()));
    let mut session = Session::new(location, source(&server));

    session.start().await.unwrap();
    let before = session.state().summary.clone().expect("first summary");

    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, UvError::Fetch { status: 500, .. }));

    let state = session.state();
    assert_eq!(state.summary.as_ref(), Some(&before));
    assert_eq!(state.data_error.as_deref(), Some("Failed to get weather data"));
    assert_eq!(state.place_name.as_deref(), Some("Oslo"));
}

#[tokio::test]
async fn test_reverse_geocode_uses_city() {
    let server = MockServer::start().await;

    let body = json!({
        "display_name": "Oslo, Norway",
        "address": { "city": "Oslo", "state": "Oslo", "country": "Norway" }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let url = format!("{}/reverse", server.uri());
    let geocoder = NominatimGeocoder::new(url, UA).unwrap();
    let place = geocoder.reverse(Coordinate::new(59.91, 10.75)).await;
    assert_eq!(place.as_deref(), Some("Oslo"));
}

#[tokio::test]
async fn test_reverse_geocode_failure_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/reverse", server.uri());
    let geocoder = NominatimGeocoder::new(url, UA).unwrap();
    assert_eq!(geocoder.reverse(Coordinate::new(59.91, 10.75)).await, None);
}
