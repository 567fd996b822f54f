//! End-to-end orchestration tests against mock HTTP servers and in-process
//! backend fakes.

use async_trait::async_trait;
use courier::{
    CacheBackend, CacheKey, CacheLookup, CacheSettings, CacheWrite, ClientConfig, Error, Logger,
    LoggerSettings, RequestDescriptor, RequestOptions, ResponseDescriptor, ServiceClient,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory cache fake that counts collaborator invocations.
#[derive(Default)]
struct RecordingCache {
    entries: Mutex<HashMap<String, Value>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    sets: Mutex<Vec<(String, Value, Duration)>>,
}

impl RecordingCache {
    fn preloaded(key: &str, value: Value) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value);
        cache
    }
}

#[async_trait]
impl CacheBackend for RecordingCache {
    async fn get(&self, key: &CacheKey) -> courier::Result<CacheLookup> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        match self.entries.lock().unwrap().get(key.as_str()) {
            Some(value) => Ok(CacheLookup::hit(value.clone())),
            None => Ok(CacheLookup::miss()),
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        value: &Value,
        expiry: Duration,
    ) -> courier::Result<CacheWrite> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.sets
            .lock()
            .unwrap()
            .push((key.to_string(), value.clone(), expiry));
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(CacheWrite { is_cached: true })
    }
}

/// Logger fake capturing formatted records.
#[derive(Default)]
struct RecordingLogger {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Logger for RecordingLogger {
    fn info(&self, request: RequestDescriptor<'_>, response: ResponseDescriptor) {
        self.infos.lock().unwrap().push(format!(
            "{} {} cache_hit={}",
            request.method, request.uri, response.cache_hit
        ));
    }

    fn error(&self, request: RequestDescriptor<'_>, error: &Error) {
        self.errors
            .lock()
            .unwrap()
            .push(format!("{} {} {}", request.method, request.uri, error));
    }
}

#[tokio::test]
async fn get_without_cache_returns_the_transport_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/widgets/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "name": "widget"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = ServiceClient::new(ClientConfig::new()).unwrap();
    let body = client
        .get(RequestOptions::new(format!("{}/widgets/1", server.url())))
        .await
        .unwrap();

    assert_eq!(body, json!({"id": 1, "name": "widget"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn transformer_reshapes_a_fresh_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/widgets")
        .with_status(200)
        .with_body(r#"{"items": [1, 2, 3]}"#)
        .create_async()
        .await;

    let client = ServiceClient::new(ClientConfig::new()).unwrap();
    let body = client
        .get(
            RequestOptions::new(format!("{}/widgets", server.url()))
                .with_transformer(|body| body["items"].clone()),
        )
        .await
        .unwrap();

    assert_eq!(body, json!([1, 2, 3]));
}

#[tokio::test]
async fn cache_hit_short_circuits_the_transport() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/widgets/1")
        .expect(0)
        .create_async()
        .await;

    let uri = format!("{}/widgets/1", server.url());
    let cache = Arc::new(RecordingCache::preloaded(&uri, json!({"id": 1})));
    let config = ClientConfig::new().with_cache(CacheSettings::custom(cache.clone()));
    let client = ServiceClient::new(config).unwrap();

    let body = client
        .get(
            RequestOptions::new(&uri)
                .with_cache_expiry(Duration::from_secs(30))
                .with_transformer(|body| body["id"].clone()),
        )
        .await
        .unwrap();

    assert_eq!(body, json!(1));
    assert_eq!(cache.get_calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn cache_miss_invokes_transport_once_then_writes_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/widgets/2")
        .with_status(200)
        .with_body(r#"{"id": 2}"#)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let config = ClientConfig::new().with_cache(CacheSettings::custom(cache.clone()));
    let client = ServiceClient::new(config).unwrap();

    let uri = format!("{}/widgets/2", server.url());
    let body = client
        .get(RequestOptions::new(&uri).with_cache_expiry(Duration::from_secs(30)))
        .await
        .unwrap();

    assert_eq!(body, json!({"id": 2}));
    mock.assert_async().await;
    let sets = cache.sets.lock().unwrap();
    assert_eq!(
        sets.as_slice(),
        &[(uri, json!({"id": 2}), Duration::from_secs(30))]
    );
}

#[tokio::test]
async fn verbs_share_one_cache_entry_per_uri() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/widgets/3")
        .with_status(200)
        .with_body(r#"{"id": 3}"#)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let config = ClientConfig::new().with_cache(CacheSettings::custom(cache.clone()));
    let client = ServiceClient::new(config).unwrap();

    let uri = format!("{}/widgets/3", server.url());
    let first = client
        .get(RequestOptions::new(&uri).with_cache_expiry(Duration::from_secs(30)))
        .await
        .unwrap();
    // The key is the uri alone, so the POST hits the entry the GET wrote.
    let second = client
        .post(RequestOptions::new(&uri).with_cache_expiry(Duration::from_secs(30)))
        .await
        .unwrap();

    assert_eq!(first, second);
    mock.assert_async().await;
    assert_eq!(client.stats().hits, 1);
    assert_eq!(client.stats().misses, 1);
    assert_eq!(client.stats().sets, 1);
}

#[tokio::test]
async fn unresolvable_expiry_fails_before_any_collaborator() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/widgets/4")
        .expect(0)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let config = ClientConfig::new().with_cache(CacheSettings::custom(cache.clone()));
    let client = ServiceClient::new(config).unwrap();

    let uri = format!("{}/widgets/4", server.url());
    let err = client.get(RequestOptions::new(&uri)).await.unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(cache.get_calls.load(Ordering::SeqCst), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn per_call_expiry_satisfies_a_custom_backend() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/widgets/5")
        .with_status(200)
        .with_body(r#"{"id": 5}"#)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let config = ClientConfig::new().with_cache(CacheSettings::custom(cache.clone()));
    let client = ServiceClient::new(config).unwrap();

    let uri = format!("{}/widgets/5", server.url());
    client
        .get(RequestOptions::new(&uri).with_cache_expiry(Duration::from_secs(30)))
        .await
        .unwrap();

    let sets = cache.sets.lock().unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].2, Duration::from_secs(30));
}

#[tokio::test]
async fn transport_failure_is_logged_then_propagated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/widgets/6")
        .with_status(500)
        .create_async()
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let config = ClientConfig::new().with_logger(LoggerSettings::custom(logger.clone()));
    let client = ServiceClient::new(config).unwrap();

    let err = client
        .get(RequestOptions::new(format!("{}/widgets/6", server.url())))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    let errors = logger.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("500"));
    assert!(logger.infos.lock().unwrap().is_empty());
}

#[tokio::test]
async fn custom_logger_sees_cache_hits_flagged() {
    let uri = "http://widgets.svc/widgets/7";
    let cache = Arc::new(RecordingCache::preloaded(uri, json!({"id": 7})));
    let logger = Arc::new(RecordingLogger::default());
    let config = ClientConfig::new()
        .with_cache(CacheSettings::custom(cache))
        .with_logger(LoggerSettings::custom(logger.clone()));
    let client = ServiceClient::new(config).unwrap();

    let body = client
        .get(RequestOptions::new(uri).with_cache_expiry(Duration::from_secs(30)))
        .await
        .unwrap();

    assert_eq!(body, json!({"id": 7}));
    let infos = logger.infos.lock().unwrap();
    assert_eq!(infos.as_slice(), &[format!("GET {uri} cache_hit=true")]);
}
