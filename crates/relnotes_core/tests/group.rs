use pretty_assertions::assert_eq;
use relnotes_core::{group, DisplayItem, FeedEntry};

fn entry(date: &str, link: &str) -> FeedEntry {
    FeedEntry::new(date, "2024-01-10T00:00:00.000Z", link, "")
}

#[test]
fn every_entry_gets_its_own_header() {
    let a1 = entry("A", "l1");
    let a2 = entry("A", "l2");
    let b = entry("B", "l3");

    let items = group(&[a1.clone(), a2.clone(), b.clone()]);

    assert_eq!(
        items,
        vec![
            DisplayItem::Header("A".to_string()),
            DisplayItem::Entry(a1),
            DisplayItem::Header("A".to_string()),
            DisplayItem::Entry(a2),
            DisplayItem::Header("B".to_string()),
            DisplayItem::Entry(b),
        ]
    );
}

#[test]
fn output_doubles_length_and_preserves_entry_order() {
    let entries: Vec<FeedEntry> = ["C", "A", "B", "A"]
        .iter()
        .enumerate()
        .map(|(i, date)| entry(date, &format!("l{i}")))
        .collect();

    let items = group(&entries);
    assert_eq!(items.len(), entries.len() * 2);

    let replayed: Vec<FeedEntry> = items
        .iter()
        .filter_map(|item| match item {
            DisplayItem::Entry(entry) => Some(entry.clone()),
            DisplayItem::Header(_) => None,
        })
        .collect();
    assert_eq!(replayed, entries);
}

#[test]
fn each_entry_is_preceded_by_matching_header() {
    let items = group(&[entry("X", "1"), entry("Y", "2"), entry("Y", "3")]);
    for pair in items.chunks(2) {
        match pair {
            [DisplayItem::Header(label), DisplayItem::Entry(entry)] => {
                assert_eq!(label, entry.date_label());
            }
            other => panic!("unexpected pair {other:?}"),
        }
    }
}

#[test]
fn grouping_is_deterministic_and_handles_empty_input() {
    let entries = vec![entry("A", "1"), entry("B", "2")];
    assert_eq!(group(&entries), group(&entries));
    assert!(group(&[]).is_empty());
}
