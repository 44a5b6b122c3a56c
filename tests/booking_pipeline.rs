//! `BookingService` driven directly, without the HTTP layer.

use std::net::IpAddr;
use std::time::Duration;

use ride_booking::booking::{BookingError, BookingRequest, BookingService, Rejection, StepDeadlines};
use ride_booking::config::{BookingConfig, NotifyFailurePolicy};
use ride_booking::notify::NotifyError;
use ride_booking::store::StoreError;

mod common;

use common::{
    short_deadlines, valid_payload, Harness, RecordingNotifier, SlowStore, StaticVerifier,
};

fn request() -> BookingRequest {
    serde_json::from_value(valid_payload()).unwrap()
}

#[tokio::test]
async fn test_receipt_identifies_stored_booking() {
    let harness = Harness::healthy();
    let ip: IpAddr = "198.51.100.4".parse().unwrap();

    let receipt = harness.service.submit(request(), Some(ip)).await.unwrap();

    assert!(receipt.notified);
    let stored = harness.store.get(&receipt.booking_id).unwrap();
    assert_eq!(stored.mobile, "9812345678");
    assert!(stored.is_outstation());
    assert_eq!(harness.verifier.last_ip(), Some(ip));
}

#[tokio::test]
async fn test_best_effort_receipt_reports_missed_notification() {
    let harness = Harness::new(
        StaticVerifier::passing(),
        RecordingNotifier::broken(),
        NotifyFailurePolicy::BestEffort,
    );
    assert_eq!(
        harness.service.notify_failure_policy(),
        NotifyFailurePolicy::BestEffort
    );

    let receipt = harness.service.submit(request(), None).await.unwrap();
    assert!(!receipt.notified);
    assert!(harness.store.get(&receipt.booking_id).is_some());
}

#[tokio::test]
async fn test_failure_kinds() {
    let harness = Harness::new(
        StaticVerifier::passing(),
        RecordingNotifier::broken(),
        NotifyFailurePolicy::Fail,
    );
    let err = harness.service.submit(request(), None).await.unwrap_err();
    assert!(matches!(err, BookingError::Notify(_)));

    let harness = Harness::new(
        StaticVerifier::unreachable(),
        RecordingNotifier::working(),
        NotifyFailurePolicy::Fail,
    );
    let err = harness.service.submit(request(), None).await.unwrap_err();
    assert!(matches!(err, BookingError::Verification(_)));

    let harness = Harness::new(
        StaticVerifier::rejecting(),
        RecordingNotifier::working(),
        NotifyFailurePolicy::Fail,
    );
    let err = harness.service.submit(request(), None).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected(Rejection::CaptchaFailed)));
}

#[tokio::test]
async fn test_gates_run_in_order() {
    let harness = Harness::healthy();

    // Token first
    let mut req = request();
    req.verification_token = None;
    req.mobile = Some("123".into());
    let err = harness.service.submit(req, None).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected(Rejection::CaptchaRequired)));
    assert_eq!(harness.verifier.calls(), 0);

    // Required fields before mobile format
    let mut req = request();
    req.name = None;
    req.mobile = Some("123".into());
    let err = harness.service.submit(req, None).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected(Rejection::MissingFields)));

    // Mobile format before the outstation rule
    let mut req = request();
    req.mobile = Some("123".into());
    req.drop_city = req.pickup_city.clone();
    let err = harness.service.submit(req, None).await.unwrap_err();
    assert!(matches!(err, BookingError::Rejected(Rejection::InvalidMobile)));

    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn test_deadlines_follow_config() {
    let mut config = BookingConfig::default();
    config.store.timeout_secs = 2;
    let deadlines = StepDeadlines::from_config(&config);
    assert_eq!(deadlines.verify, Duration::from_secs(10));
    assert_eq!(deadlines.store, Duration::from_secs(2));
    assert_eq!(deadlines.notify, Duration::from_secs(10));
    assert_eq!(Harness::healthy().service.deadlines(), StepDeadlines::default());
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let store = SlowStore::new(Duration::from_secs(3));
    let service = BookingService::new(
        StaticVerifier::passing(),
        store.clone(),
        RecordingNotifier::working(),
        NotifyFailurePolicy::Fail,
    )
    .with_deadlines(short_deadlines());

    let err = service.submit(request(), None).await.unwrap_err();
    match err {
        BookingError::Store(StoreError::TimedOut(limit)) => {
            assert_eq!(limit, Duration::from_millis(200))
        }
        other => panic!("expected store timeout, got {other:?}"),
    }
    assert!(store.inner.is_empty());
}

#[tokio::test]
async fn test_slow_notifier_times_out() {
    let harness = Harness::new(
        StaticVerifier::passing(),
        RecordingNotifier::slow(Duration::from_secs(3)),
        NotifyFailurePolicy::Fail,
    );
    let service = harness.service.clone().with_deadlines(short_deadlines());

    let err = service.submit(request(), None).await.unwrap_err();
    assert!(matches!(err, BookingError::Notify(NotifyError::TimedOut(_))));
    assert_eq!(harness.store.len(), 1);
}
