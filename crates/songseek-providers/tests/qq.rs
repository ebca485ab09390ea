//! QQ adapter tests against a mocked vkeys relay.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use songseek_core::{Error, HttpError};
use songseek_providers::{backends::qq::QUALITY_PRIORITY, BackendProfile, MusicProvider, QqProvider};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> QqProvider {
    QqProvider::with_profile(&BackendProfile::qq().with_base_url(server.uri())).unwrap()
}

fn rejected_tier() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 404,
        "message": "获取失败",
        "data": null
    }))
}

async fn probed_qualities(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|req| {
            req.url
                .query_pairs()
                .find(|(k, _)| k == "quality")
                .map(|(_, v)| v.into_owned())
        })
        .collect()
}

#[tokio::test]
async fn test_search_drops_records_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/search/song"))
        .and(query_param("word", "周杰伦"))
        .and(header("referer", "https://y.qq.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [
                {"mid": "0039MnYb0qxYhV", "song": "晴天", "singer": "周杰伦", "album": "叶惠美"},
                {"song": "无名", "singer": "周杰伦"},
                {"mid": "002MiiVD0VhF0R", "song": "", "singer": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = provider(&server).search("周杰伦").await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "0039MnYb0qxYhV");
    assert_eq!(items[0].album.as_deref(), Some("叶惠美"));
    assert_eq!(items[1].title, songseek_core::UNKNOWN_TITLE);
    assert_eq!(items[1].artist, songseek_core::UNKNOWN_ARTIST);
    assert!(items.iter().all(|item| item.provider == "qq"));
}

#[tokio::test]
async fn test_search_failure_is_absorbed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/search/song"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let qq = provider(&server);
    assert!(qq.search("晴天").await.is_empty());

    let err = qq.fetch_catalog("晴天").await.unwrap_err();
    assert!(matches!(
        err,
        Error::UpstreamUnavailable {
            source: HttpError::StatusError { status: 503, .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_search_malformed_payload_is_absorbed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/search/song"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let qq = provider(&server);
    assert!(qq.search("晴天").await.is_empty());
    assert!(matches!(
        qq.fetch_catalog("晴天").await.unwrap_err(),
        Error::UpstreamMalformed { .. }
    ));
}

#[tokio::test]
async fn test_resolve_stops_at_first_successful_tier() {
    let server = MockServer::start().await;

    for quality in ["0", "1", "2"] {
        Mock::given(method("GET"))
            .and(path("/v2/music/tencent/geturl"))
            .and(query_param("mid", "0039MnYb0qxYhV"))
            .and(query_param("quality", quality))
            .respond_with(rejected_tier())
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/geturl"))
        .and(query_param("quality", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"url": "https://cdn.example/x.m4a", "quality": "HQ高品质", "kbps": "320kbps"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    for quality in &QUALITY_PRIORITY[4..] {
        Mock::given(method("GET"))
            .and(path("/v2/music/tencent/geturl"))
            .and(query_param("quality", quality.to_string()))
            .respond_with(rejected_tier())
            .expect(0)
            .mount(&server)
            .await;
    }

    let info = provider(&server)
        .resolve("0039MnYb0qxYhV", None)
        .await
        .unwrap();

    assert_eq!(info.url, "https://cdn.example/x.m4a");
    assert_eq!(info.media_type, "m4a");
    assert_eq!(info.bitrate.as_deref(), Some("320kbps"));
    assert_eq!(probed_qualities(&server).await, vec!["0", "1", "2", "3"]);
}

#[tokio::test]
async fn test_resolve_exhaustion_probes_each_tier_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/geturl"))
        .respond_with(rejected_tier())
        .expect(QUALITY_PRIORITY.len() as u64)
        .mount(&server)
        .await;

    let err = provider(&server).resolve("missing", None).await.unwrap_err();

    match err {
        Error::NoPlayableVariant {
            provider,
            id,
            attempts,
        } => {
            assert_eq!(provider, "qq");
            assert_eq!(id, "missing");
            assert_eq!(attempts, QUALITY_PRIORITY.len());
        }
        other => panic!("unexpected error: {other}"),
    }

    let expected: Vec<String> = QUALITY_PRIORITY.iter().map(ToString::to_string).collect();
    assert_eq!(probed_qualities(&server).await, expected);
}

#[tokio::test]
async fn test_resolve_upstream_failure_stops_the_walk() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/geturl"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server).resolve("0039MnYb0qxYhV", None).await.unwrap_err();

    assert!(matches!(
        err,
        Error::UpstreamUnavailable {
            source: HttpError::StatusError { status: 502, .. },
            ..
        }
    ));
    assert_eq!(probed_qualities(&server).await, vec!["0"]);
}

#[tokio::test]
async fn test_resolve_skips_tier_without_usable_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/geturl"))
        .and(query_param("quality", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"url": "not-a-url"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/geturl"))
        .and(query_param("quality", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200.0,
            "data": {"url": "http://cdn.example/C400.mp3?vkey=abc", "quality": "标准品质"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = provider(&server).resolve("0039MnYb0qxYhV", None).await.unwrap();
    assert_eq!(info.url, "http://cdn.example/C400.mp3?vkey=abc");
    assert_eq!(info.media_type, "mp3");
    assert_eq!(info.bitrate.as_deref(), Some("标准品质"));
    assert_eq!(probed_qualities(&server).await, vec!["0", "1"]);
}

#[tokio::test]
async fn test_search_keeps_records_around_malformed_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/music/tencent/search/song"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [null, {"mid": "001", "song": "七里香"}, 7, {"mid": "002"}]
        })))
        .mount(&server)
        .await;

    let ids: Vec<String> = provider(&server)
        .search("七里香")
        .await
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec!["001", "002"]);
}
