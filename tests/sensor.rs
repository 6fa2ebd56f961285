//! End-to-end tests for the sensor snippet pipeline.

use std::time::Duration;

use serde_json::json;

use wallclock::config::ServiceConfig;
use wallclock::tailwind::parse_build_config;

mod common;

const BUILD_CONFIG: &str = r#"{"content": ["*.{html,js,php}"], "darkMode": "selector"}"#;

fn sensor_config(ewelink_url: String) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.location.timezone = "UTC".to_string();
    // Nothing listens on the discard port; almanac data is irrelevant here.
    config.almanac.base_url = "http://127.0.0.1:9".to_string();
    config.sensor.enabled = true;
    config.sensor.api_base_url = ewelink_url;
    config.sensor.app_id = "test-app".to_string();
    config.sensor.device_id = "test-device".to_string();
    config.sensor.token = "test-token".to_string();
    config
}

async fn get_body(addr: std::net::SocketAddr, path: &str) -> String {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    client
        .get(format!("http://{addr}{path}"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn healthy_reading_renders_with_empty_class() {
    let api = common::start_mock_ewelink(common::device_payload("2140", "6320", 80)).await;
    let config = sensor_config(format!("http://{api}"));
    let build = parse_build_config(BUILD_CONFIG).unwrap();

    let (addr, _shutdown) = common::start_dashboard(config, build).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Hundredths scaling: "2140" is 21.4 °C, "6320" is 63 %.
    assert_eq!(
        get_body(addr, "/snippets/temperature").await,
        "<span class=''>21.4°</span>"
    );
    assert_eq!(
        get_body(addr, "/snippets/humidity").await,
        "<span class=''>63%</span>"
    );
}

#[tokio::test]
async fn low_battery_reading_carries_battery_class() {
    // Battery 10 is below the default threshold of 20.
    let api = common::start_mock_ewelink(common::device_payload("2140", "6320", 10)).await;
    let config = sensor_config(format!("http://{api}"));
    let build = parse_build_config(BUILD_CONFIG).unwrap();

    let (addr, _shutdown) = common::start_dashboard(config, build).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(
        get_body(addr, "/snippets/temperature").await,
        "<span class='battery'>21.4°</span>"
    );
    assert_eq!(
        get_body(addr, "/snippets/humidity").await,
        "<span class='battery'>63%</span>"
    );
}

#[tokio::test]
async fn stale_reading_wins_over_low_battery() {
    let api = common::start_mock_ewelink(common::device_payload("2140", "6320", 10)).await;
    let mut config = sensor_config(format!("http://{api}"));
    config.sensor.stale_after_secs = 1;

    let build = parse_build_config(BUILD_CONFIG).unwrap();
    let (addr, _shutdown) = common::start_dashboard(config, build).await;

    // One fetch happens on the first tick; the next is minutes away, so the
    // reading goes stale while still reflecting the low battery.
    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert_eq!(
        get_body(addr, "/snippets/temperature").await,
        "<span class='error'>21.4°</span>"
    );
    assert_eq!(
        get_body(addr, "/snippets/humidity").await,
        "<span class='error'>63%</span>"
    );
}

#[tokio::test]
async fn api_error_code_leaves_reading_absent() {
    let payload = json!({
        "code": 401,
        "error": "authentication failed",
        "params": {"battery": 80, "temperature": "2140", "humidity": "6320"}
    });
    let api = common::start_mock_ewelink(payload).await;
    let config = sensor_config(format!("http://{api}"));
    let build = parse_build_config(BUILD_CONFIG).unwrap();

    let (addr, _shutdown) = common::start_dashboard(config, build).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    // A non-zero code is an API error: the payload's params are discarded.
    assert_eq!(
        get_body(addr, "/snippets/temperature").await,
        "<span class='error'>--°</span>"
    );
    assert_eq!(
        get_body(addr, "/snippets/humidity").await,
        "<span class='error'>--%</span>"
    );
}
