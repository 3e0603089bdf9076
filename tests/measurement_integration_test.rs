use anyhow::Result;
use httpmock::prelude::*;
use ripe_atlas::config::toml_config::{ApiConfig, ProbesConfig};
use ripe_atlas::{AtlasConfig, AtlasError, Client, MeasurementRequest, ReqwestTransport};
use serde_json::json;

fn config_for(server: &MockServer, key: Option<&str>) -> AtlasConfig {
    AtlasConfig {
        api: ApiConfig {
            endpoint: server.base_url(),
            key: key.map(str::to_string),
        },
        probes: ProbesConfig {
            pool_size: 5,
            area_type: "country".to_string(),
            area_value: "NL".to_string(),
            tags: "system-ipv6-works,-system-ipv4-rfc1918".to_string(),
            default_probe: None,
        },
    }
}

#[tokio::test]
async fn test_ping_measurement_end_to_end() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/measurements/ping/")
            .query_param("key", "test-key")
            .json_body(json!({
                "definitions": [{
                    "description": "ping ripe.net",
                    "type": "ping",
                    "af": 4,
                    "target": "ripe.net",
                    "is_oneoff": true,
                    "packets": 3
                }],
                "is_oneoff": true,
                "probes": [{
                    "requested": 5,
                    "type": "country",
                    "value": "NL",
                    "tags_include": "system-ipv6-works",
                    "tags_exclude": "system-ipv4-rfc1918"
                }]
            }));
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(json!({"measurements": [12345]}));
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, Some("test-key")));
    let mut request = client.new_measurement();
    request.add_definition([
        ("Type", "ping"),
        ("Description", "ping ripe.net"),
        ("AF", "4"),
        ("Target", "ripe.net"),
        ("IsOneoff", "true"),
        ("Packets", "3"),
    ]);

    let created = client.ping(&request).await?;

    api_mock.assert();
    assert_eq!(created.measurements, vec![12345]);
    Ok(())
}

#[tokio::test]
async fn test_several_definitions_keep_order() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/measurements/dns/")
            .body_contains(r#""query_argument":"a.example""#)
            .body_contains(r#""query_argument":"b.example""#);
        then.status(201).json_body(json!({"measurements": [100, 101]}));
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, Some("test-key")));
    let mut request = client.new_measurement();
    request
        .add_definition([("Type", "dns"), ("QueryArgument", "a.example")])
        .add_definition([("Type", "dns"), ("QueryArgument", "b.example")]);

    let created = client.dns(&request).await?;

    api_mock.assert();
    assert_eq!(created.measurements, vec![100, 101]);
    Ok(())
}

#[tokio::test]
async fn test_type_mismatch_never_reaches_server() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(json!({"measurements": [1]}));
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, Some("test-key")));
    let mut request = client.new_measurement();
    request
        .add_definition([("Type", "ping"), ("Target", "ripe.net")])
        .add_definition([("Type", "dns"), ("QueryArgument", "ripe.net")]);

    let err = client.ping(&request).await.unwrap_err();

    assert!(matches!(err, AtlasError::InvalidMeasurementType { .. }));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_missing_key_never_reaches_server() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201).json_body(json!({"measurements": [1]}));
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, None));
    let mut request = client.new_measurement();
    request.add_definition([("Type", "traceroute"), ("Target", "ripe.net")]);

    let err = client.traceroute(&request).await.unwrap_err();

    assert!(matches!(err, AtlasError::InvalidApiKey));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_api_rejection_is_reported() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/measurements/http/");
        then.status(403).json_body(json!({
            "error": {
                "status": 403,
                "code": 104,
                "title": "Forbidden",
                "detail": "The provided API key does not grant this permission"
            }
        }));
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, Some("read-only")));
    let mut request = MeasurementRequest::one_off(client.new_measurement().probes);
    request.add_definition([("Type", "http"), ("Target", "www.ripe.net"), ("Path", "/")]);

    let err = client.http(&request).await.unwrap_err();

    api_mock.assert();
    match err {
        AtlasError::ApiError { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("Forbidden"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_response_keeps_raw_body() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/measurements/ntp/");
        then.status(201).body(r#"{"msm":[1]}"#);
    });

    let client = Client::new(ReqwestTransport::new(), config_for(&server, Some("test-key")));
    let mut request = client.new_measurement();
    request.add_definition([("Type", "ntp"), ("Target", "pool.ntp.org")]);

    let err = client.ntp(&request).await.unwrap_err();

    api_mock.assert();
    match err {
        AtlasError::ResponseParseError { body, .. } => assert_eq!(body, r#"{"msm":[1]}"#),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = AtlasConfig {
        api: ApiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            key: Some("test-key".to_string()),
        },
        probes: ProbesConfig::default(),
    };
    let client = Client::new(ReqwestTransport::new(), config);
    let mut request = client.new_measurement();
    request.add_definition([("Type", "sslcert"), ("Target", "ripe.net")]);

    let err = client.ssl_cert(&request).await.unwrap_err();
    assert!(matches!(err, AtlasError::TransportError(_)));
}

#[tokio::test]
async fn test_transport_error_does_not_reveal_key() {
    let config = AtlasConfig {
        api: ApiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            key: Some("SUPER-SECRET-KEY".to_string()),
        },
        probes: ProbesConfig::default(),
    };
    let client = Client::new(ReqwestTransport::new(), config);
    let mut request = client.new_measurement();
    request.add_definition([("Type", "ping"), ("Target", "ripe.net")]);

    let err = client.ping(&request).await.unwrap_err();

    assert!(matches!(err, AtlasError::TransportError(_)));
    assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
}
