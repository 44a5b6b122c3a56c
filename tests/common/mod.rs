//! Shared doubles and helpers for integration testing.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{connect_info::MockConnectInfo, Query, State},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use ride_booking::booking::{Booking, BookingService, StepDeadlines};
use ride_booking::captcha::{HumanVerifier, VerifyError};
use ride_booking::config::{BookingConfig, NotifyFailurePolicy};
use ride_booking::http::{ApiResponse, HttpServer};
use ride_booking::notify::{BookingNotifier, NotifyError};
use ride_booking::store::{BookingStore, InMemoryBookingStore, StoreError};

/// Verifier with a fixed verdict. `None` fails the way a service that never answers does.
pub struct StaticVerifier {
    verdict: Option<bool>,
    calls: AtomicUsize,
    last_ip: Mutex<Option<IpAddr>>,
}

impl StaticVerifier {
    pub fn passing() -> Arc<Self> {
        Arc::new(Self::with(Some(true)))
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self::with(Some(false)))
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::with(None))
    }

    fn with(verdict: Option<bool>) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
            last_ip: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_ip(&self) -> Option<IpAddr> {
        *self.last_ip.lock().unwrap()
    }
}

#[async_trait]
impl HumanVerifier for StaticVerifier {
    async fn verify(&self, _token: &str, remote_ip: Option<IpAddr>) -> Result<bool, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ip.lock().unwrap() = remote_ip;
        self.verdict
            .ok_or(VerifyError::TimedOut(Duration::from_secs(10)))
    }
}

/// Notifier that records what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    delay: Option<Duration>,
    sent: Mutex<Vec<Booking>>,
}

impl RecordingNotifier {
    pub fn working() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    /// Sends successfully, but only after `delay`.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn sent(&self) -> Vec<Booking> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingNotifier for RecordingNotifier {
    async fn notify(&self, booking: &Booking) -> Result<(), NotifyError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(NotifyError::TimedOut(Duration::from_secs(10)));
        }
        self.sent.lock().unwrap().push(booking.clone());
        Ok(())
    }
}

/// Store whose every write fails.
pub struct FailingStore;

#[async_trait]
impl BookingStore for FailingStore {
    async fn insert(&self, _booking: &Booking) -> Result<String, StoreError> {
        Err(StoreError::TimedOut(Duration::from_secs(5)))
    }
}

/// In-memory store that takes `delay` to answer each insert.
pub struct SlowStore {
    pub delay: Duration,
    pub inner: InMemoryBookingStore,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            inner: InMemoryBookingStore::new(),
        })
    }
}

#[async_trait]
impl BookingStore for SlowStore {
    async fn insert(&self, booking: &Booking) -> Result<String, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(booking).await
    }
}

/// Deadlines short enough for tests to run into.
pub fn short_deadlines() -> StepDeadlines {
    StepDeadlines {
        verify: Duration::from_millis(200),
        store: Duration::from_millis(200),
        notify: Duration::from_millis(200),
    }
}

/// Pipeline wired to doubles.
pub struct Harness {
    pub verifier: Arc<StaticVerifier>,
    pub store: InMemoryBookingStore,
    pub notifier: Arc<RecordingNotifier>,
    pub service: BookingService,
}

impl Harness {
    pub fn new(
        verifier: Arc<StaticVerifier>,
        notifier: Arc<RecordingNotifier>,
        policy: NotifyFailurePolicy,
    ) -> Self {
        let store = InMemoryBookingStore::new();
        let service = BookingService::new(
            verifier.clone(),
            Arc::new(store.clone()),
            notifier.clone(),
            policy,
        );
        Self {
            verifier,
            store,
            notifier,
            service,
        }
    }

    pub fn healthy() -> Self {
        Self::new(
            StaticVerifier::passing(),
            RecordingNotifier::working(),
            NotifyFailurePolicy::Fail,
        )
    }

    /// Router with default config, as seen from `client`.
    pub fn router(&self, client: &str) -> Router {
        router_for(self.service.clone(), BookingConfig::default(), client)
    }
}

pub fn router_for(service: BookingService, config: BookingConfig, client: &str) -> Router {
    let addr: SocketAddr = format!("{client}:40000").parse().unwrap();
    HttpServer::new(config, service)
        .router()
        .layer(MockConnectInfo(addr))
}

/// A complete, valid submission.
pub fn valid_payload() -> Value {
    json!({
        "rideType": "outstation",
        "pickupCity": "Delhi",
        "dropCity": "Jaipur",
        "pickupAddress": "Connaught Place",
        "date": "2026-11-02",
        "time": "06:30",
        "vehicle": "Sedan",
        "name": "Ravi Kumar",
        "mobile": "9812345678",
        "instructions": "Two large bags",
        "verificationToken": "03AGdBq2"
    })
}

/// `valid_payload` with one field replaced (or removed when `value` is null).
pub fn payload_with(field: &str, value: Value) -> Value {
    let mut payload = valid_payload();
    let map = payload.as_object_mut().unwrap();
    if value.is_null() {
        map.remove(field);
    } else {
        map.insert(field.to_string(), value);
    }
    payload
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub json: Value,
}

impl Reply {
    pub fn envelope(&self) -> ApiResponse {
        serde_json::from_value(self.json.clone()).unwrap()
    }
}

pub async fn post_raw(router: &Router, body: impl Into<Body>) -> Reply {
    let request = Request::builder()
        .method("POST")
        .uri("/api/book")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Reply {
        status,
        headers,
        json,
    }
}

pub async fn post_booking(router: &Router, payload: &Value) -> Reply {
    post_raw(router, payload.to_string()).await
}

/// A local stand-in for the reCAPTCHA siteverify endpoint.
#[derive(Clone)]
pub struct SiteVerifyMock {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl SiteVerifyMock {
    pub fn url(&self) -> String {
        format!("http://{}/recaptcha/api/siteverify", self.addr)
    }

    /// Query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn siteverify(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    state.requests.lock().unwrap().push(params);
    (state.status, [("content-type", "application/json")], state.body)
}

/// Start a mock siteverify endpoint answering every request with `status` and `body`.
pub async fn start_siteverify_mock(status: u16, body: &'static str) -> SiteVerifyMock {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/recaptcha/api/siteverify", post(siteverify))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    SiteVerifyMock { addr, requests }
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
