//! End-to-end flows through AppServices against a wiremock forecast API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use swell_app::{AppServices, ForecastBoard, MediaGallery};
use swell_core::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = r#"[
    {"name": "Testpoint", "country": "Nowhere", "lat": 10.0, "lng": 20.0},
    {"name": "Secret Spot", "country": "Unknown"}
]"#;

fn config_for(dir: &Path, api_url: &str) -> Config {
    std::fs::write(dir.join("surfspots.json"), CATALOG).unwrap();
    let mut config = Config::default();
    config.config_dir = dir.to_path_buf();
    config.forecast.api_url = api_url.to_string();
    config.forecast.request_timeout_secs = 5;
    config
}

/// Poll until `done` holds or the deadline passes.
fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

fn mock_forecast(rt: &tokio::runtime::Runtime, wave_height: f64) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        let soon = (Utc::now() + chrono::Duration::minutes(5)).to_rfc3339();
        Mock::given(method("GET"))
            .and(path("/v1/marine"))
            .and(query_param("latitude", "10"))
            .and(query_param("longitude", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "utc_offset_seconds": 0,
                "hourly": {
                    "time": [soon],
                    "wave_height": [wave_height],
                    "wave_direction": [220.0],
                    "wave_period": [11.0]
                }
            })))
            .mount(&server)
            .await;
        server
    })
}

#[test]
fn test_board_refresh_shows_ratings_and_placeholders() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = mock_forecast(&rt, 3.5);
    let dir = tempfile::tempdir().unwrap();
    let services =
        AppServices::new(config_for(dir.path(), &format!("{}/v1/marine", server.uri()))).unwrap();

    let mut board = ForecastBoard::from_catalog(services.catalog());
    assert_eq!(board.refresh(&services), 2);

    assert!(wait_until(|| {
        board.poll_channel(&services);
        !board.is_loading()
    }));

    let testpoint = board.row("Testpoint").unwrap();
    assert_eq!(testpoint.rating_label(), "Good");
    assert_eq!(testpoint.direction_label(), "SW");
    assert_eq!(board.row("Secret Spot").unwrap().summary(), "Secret Spot - N/A");

    let favorites = services.favorites();
    board.toggle_favorite(&*favorites, "Testpoint").unwrap();
    assert!(favorites.contains("Testpoint"));
    assert!(dir.path().join("favorites").join("FavoriteSurfSpots.json").exists());
}

#[test]
fn test_api_failure_shows_placeholder() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        server
    });
    let dir = tempfile::tempdir().unwrap();
    let services =
        AppServices::new(config_for(dir.path(), &format!("{}/v1/marine", server.uri()))).unwrap();

    let mut board = ForecastBoard::from_catalog(services.catalog());
    assert!(board.refresh_spot(&services, "Testpoint"));
    assert!(wait_until(|| {
        board.poll_channel(&services);
        !board.is_loading()
    }));
    assert_eq!(board.row("Testpoint").unwrap().rating_label(), "N/A");
}

#[test]
fn test_gallery_upload_relists() {
    let dir = tempfile::tempdir().unwrap();
    let services =
        AppServices::new(config_for(dir.path(), "http://127.0.0.1:9/v1/marine")).unwrap();

    let mut gallery = MediaGallery::new("St. Ives [Porthmeor]");
    gallery.upload(&services, "https://cdn.example/wave.jpg");

    assert!(wait_until(|| {
        gallery.poll_channel(&services);
        !gallery.entries().is_empty()
    }));
    assert_eq!(gallery.media_urls(), vec!["https://cdn.example/wave.jpg"]);
    assert!(gallery.error_message().is_none());

    // A second gallery for the same spot sees the persisted record.
    let mut other = MediaGallery::new("St. Ives [Porthmeor]");
    other.refresh(&services);
    assert!(wait_until(|| {
        other.poll_channel(&services);
        !other.is_loading()
    }));
    assert_eq!(other.entries().len(), 1);
}

#[test]
fn test_open_galleries_each_get_their_own_results() {
    let dir = tempfile::tempdir().unwrap();
    let services =
        AppServices::new(config_for(dir.path(), "http://127.0.0.1:9/v1/marine")).unwrap();

    let mut malibu = MediaGallery::new("Malibu");
    let mut pipeline = MediaGallery::new("Pipeline");
    malibu.refresh(&services);
    pipeline.upload(&services, "https://cdn.example/pipe.jpg");

    // Malibu settles first and polls repeatedly while Pipeline's answers arrive.
    assert!(wait_until(|| {
        malibu.poll_channel(&services);
        !malibu.is_loading()
    }));
    std::thread::sleep(Duration::from_millis(200));
    malibu.poll_channel(&services);
    assert!(malibu.entries().is_empty());

    assert!(wait_until(|| {
        pipeline.poll_channel(&services);
        !pipeline.is_uploading() && !pipeline.is_loading() && !pipeline.entries().is_empty()
    }));
    assert_eq!(pipeline.media_urls(), vec!["https://cdn.example/pipe.jpg"]);
    assert!(pipeline.error_message().is_none());
}
