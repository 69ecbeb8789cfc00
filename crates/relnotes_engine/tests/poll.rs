use std::sync::Arc;

use relnotes_core::{InMemoryWatermarkStore, NOTIFICATION_CHANNEL};
use relnotes_engine::{
    FailureKind, FetchSettings, PollError, Poller, RecordingNotifier, ReqwestFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = include_str!("fixtures/androidx_feed.xml");
const FEED_TIME: i64 = 1_704_844_800_000;

async fn serve(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/atom+xml"),
        )
        .mount(&server)
        .await;
    server
}

fn poller(
    server: &MockServer,
    store: InMemoryWatermarkStore,
    notifier: Arc<RecordingNotifier>,
) -> Poller {
    Poller::new(
        format!("{}/feed.xml", server.uri()),
        NOTIFICATION_CHANNEL,
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
        Box::new(store),
        notifier,
    )
}

#[tokio::test]
async fn new_release_notifies_then_stores_watermark() {
    engine_logging::initialize_for_tests();
    let server = serve(FEED, 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::default(), notifier.clone());

    let outcome = poller.poll_once().await.expect("poll ok");

    assert_eq!(outcome.previous_watermark, 0);
    assert!(outcome.check.notify);
    assert!(outcome.watermark_stored);
    assert_eq!(poller.watermark(), FEED_TIME);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel_id, "androidxchecker");
    assert_eq!(sent[0].title, "New AndroidX Update!");
    assert_eq!(sent[0].subtitle.as_deref(), Some("January 10, 2024"));
}

#[tokio::test]
async fn unchanged_feed_does_not_notify_twice() {
    engine_logging::initialize_for_tests();
    let server = serve(FEED, 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::default(), notifier.clone());

    poller.poll_once().await.expect("first poll");
    let second = poller.poll_once().await.expect("second poll");

    assert!(!second.check.notify);
    assert!(!second.watermark_stored);
    assert_eq!(second.previous_watermark, FEED_TIME);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn older_feed_than_watermark_is_quiet() {
    let server = serve(FEED, 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(
        &server,
        InMemoryWatermarkStore::new(FEED_TIME + 1),
        notifier.clone(),
    );

    let outcome = poller.poll_once().await.expect("poll ok");
    assert!(!outcome.check.notify);
    assert_eq!(poller.watermark(), FEED_TIME + 1);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn fetch_failure_leaves_watermark_untouched() {
    let server = serve("", 500).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::new(7), notifier.clone());

    let err = poller.poll_once().await.unwrap_err();
    match err {
        PollError::Fetch(fetch) => assert_eq!(fetch.kind, FailureKind::HttpStatus(500)),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(poller.watermark(), 7);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn malformed_feed_fails_the_cycle() {
    let server = serve("<feed><entry></feed>", 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::default(), notifier.clone());

    let err = poller.poll_once().await.unwrap_err();
    assert!(matches!(err, PollError::Parse(_)), "{err:?}");
    assert_eq!(poller.watermark(), 0);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn unparsable_feed_timestamp_never_notifies() {
    let body = FEED.replacen(
        "<updated>2024-01-10T00:00:00.000Z</updated>",
        "<updated>last tuesday</updated>",
        1,
    );
    let server = serve(&body, 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::default(), notifier.clone());

    let outcome = poller.poll_once().await.expect("poll ok");
    assert_eq!(outcome.check.latest_timestamp, 0);
    assert!(!outcome.check.notify);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn failed_watermark_write_renotifies_next_cycle() {
    let server = serve(FEED, 200).await;
    let notifier = Arc::new(RecordingNotifier::new());
    let mut poller = poller(&server, InMemoryWatermarkStore::failing(0), notifier.clone());

    let first = poller.poll_once().await.expect("first poll");
    assert!(first.check.notify);
    assert!(!first.watermark_stored);

    let second = poller.poll_once().await.expect("second poll");
    assert!(second.check.notify);
    assert_eq!(notifier.sent().len(), 2);
}
