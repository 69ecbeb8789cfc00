use relnotes_core::{
    check_for_update, parse_feed_timestamp, FeedDocument, FeedEntry, Notification,
    NOTIFICATION_CHANNEL, NOTIFICATION_ID,
};

fn entry(date: &str, updated: &str) -> FeedEntry {
    FeedEntry::new(date, updated, format!("https://example.com/{date}"), "<p>body</p>")
}

fn feed(updated: &str, entries: Vec<FeedEntry>) -> FeedDocument {
    FeedDocument::new(Some(updated.to_string()), entries)
}

#[test]
fn first_poll_notifies_with_headline() {
    let first = FeedEntry::new("2024-01-10", "2024-01-10T00:00:00.000Z", "l1", "c1");
    let doc = feed("2024-01-10T00:00:00.000Z", vec![first.clone()]);

    let check = check_for_update(&doc, 0);

    assert_eq!(check.latest_timestamp, 1_704_844_800_000);
    assert!(check.notify);
    assert_eq!(check.headline, Some(first));
}

#[test]
fn headline_is_first_entry_in_feed_order() {
    let doc = feed(
        "2024-02-01T00:00:00.000Z",
        vec![
            entry("February 1, 2024", "2024-02-01T00:00:00.000Z"),
            entry("January 20, 2024", "2024-01-20T00:00:00.000Z"),
        ],
    );
    let check = check_for_update(&doc, 0);
    assert_eq!(
        check.headline.map(|e| e.date_label().to_string()),
        Some("February 1, 2024".to_string())
    );
}

#[test]
fn repeated_check_is_idempotent_and_watermark_silences_it() {
    let doc = feed(
        "2024-01-10T00:00:00.000Z",
        vec![entry("January 10, 2024", "2024-01-10T00:00:00.000Z")],
    );

    let first = check_for_update(&doc, 0);
    let again = check_for_update(&doc, 0);
    assert_eq!(first, again);

    let after_notify = check_for_update(&doc, first.latest_timestamp);
    assert!(!after_notify.notify);
    assert_eq!(after_notify.headline, None);
    assert_eq!(after_notify.latest_timestamp, first.latest_timestamp);
}

#[test]
fn notify_iff_feed_timestamp_exceeds_watermark() {
    let doc = feed(
        "2024-01-10T00:00:00.000Z",
        vec![entry("January 10, 2024", "2024-01-10T00:00:00.000Z")],
    );
    let t = parse_feed_timestamp("2024-01-10T00:00:00.000Z").unwrap();

    for watermark in [0, 1, t - 1, t, t + 1, i64::MAX] {
        assert_eq!(
            check_for_update(&doc, watermark).notify,
            t > watermark,
            "watermark {watermark}"
        );
    }
}

#[test]
fn feed_timestamp_wins_over_entry_timestamps() {
    let doc = feed(
        "2024-01-01T00:00:00.000Z",
        vec![entry("January 10, 2024", "2024-01-10T00:00:00.000Z")],
    );
    let entry_time = parse_feed_timestamp("2024-01-10T00:00:00.000Z").unwrap();
    let check = check_for_update(&doc, entry_time - 1);
    assert!(!check.notify);
}

#[test]
fn empty_feed_never_notifies() {
    let doc = feed("2024-01-10T00:00:00.000Z", Vec::new());
    let check = check_for_update(&doc, 0);
    assert_eq!(check.latest_timestamp, 0);
    assert!(!check.notify);
    assert_eq!(check.headline, None);
}

#[test]
fn malformed_or_missing_timestamp_degrades_to_no_update() {
    let entries = vec![entry("January 10, 2024", "garbage")];

    let malformed = check_for_update(&feed("yesterday", entries.clone()), 0);
    assert_eq!(malformed.latest_timestamp, 0);
    assert!(!malformed.notify);

    let missing = check_for_update(&FeedDocument::new(None, entries), 0);
    assert_eq!(missing.latest_timestamp, 0);
    assert!(!missing.notify);
}

#[test]
fn notification_uses_headline_date_as_subtitle() {
    let headline = entry("January 10, 2024", "2024-01-10T00:00:00.000Z");
    let note = Notification::new_release(NOTIFICATION_CHANNEL, Some(&headline));
    assert_eq!(note.id, NOTIFICATION_ID);
    assert_eq!(note.channel_id, "androidxchecker");
    assert_eq!(note.title, "New AndroidX Update!");
    assert_eq!(note.subtitle.as_deref(), Some("January 10, 2024"));

    let bare = Notification::new_release(NOTIFICATION_CHANNEL, None);
    assert_eq!(bare.subtitle, None);
}
