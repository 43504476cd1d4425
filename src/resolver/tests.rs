use super::*;
use crate::test_utils::{AppInfoBuilder, MockFetcher, init_test_logging};

fn ids(records: &[DepotRecord]) -> Vec<&str> {
    records.iter().map(|r| r.depot_id.as_str()).collect()
}

#[tokio::test]
async fn test_manifest_depots_and_failed_dlc_placeholder() {
    init_test_logging(None);
    let fetcher = MockFetcher::new()
        .with_payload(
            1,
            AppInfoBuilder::new(1)
                .name("Root Game")
                .depot(10, 100, 5000)
                .depot_without_manifest(20)
                .dlc(&[30])
                .build(),
        )
        .with_failure(30, "connection reset");

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(
        records,
        vec![
            DepotRecord {
                depot_id: "10".into(),
                manifest_id: 100,
                size_bytes: 5000,
                decryption_key: String::new(),
                game_name: "Root Game".into(),
            },
            DepotRecord {
                depot_id: "30".into(),
                manifest_id: 0,
                size_bytes: 0,
                decryption_key: String::new(),
                game_name: "Root Game".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_dlc_depots_are_merged_in_order() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).name("G").depot(2, 20, 200).dlc(&[5, 6]).build())
        .with_payload(5, AppInfoBuilder::new(5).name("DLC Five").depot(50, 500, 1).build())
        .with_payload(6, AppInfoBuilder::new(6).depot(60, 600, 2).depot(61, 610, 3).build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["2", "50", "60", "61"]);
    assert!(records.iter().all(|r| r.game_name == "G"));
    assert_eq!(fetcher.calls(), vec![1, 5, 6]);
}

#[tokio::test]
async fn test_shared_sub_dlc_is_emitted_once() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).dlc(&[2, 3]).build())
        .with_payload(2, AppInfoBuilder::new(2).depot(20, 1, 1).dlc(&[9]).build())
        .with_payload(3, AppInfoBuilder::new(3).depot(30, 1, 1).dlc(&[9]).build())
        .with_payload(9, AppInfoBuilder::new(9).depot(90, 1, 1).depot(20, 1, 1).build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["20", "90", "30"]);
    assert_eq!(fetcher.calls().iter().filter(|id| **id == 9).count(), 1);
}

#[tokio::test]
async fn test_dlc_cycle_terminates() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).dlc(&[100]).build())
        .with_payload(100, AppInfoBuilder::new(100).depot(101, 7, 7).dlc(&[200]).build())
        .with_payload(200, AppInfoBuilder::new(200).depot(201, 8, 8).dlc(&[100, 1]).build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["101", "201"]);
    assert_eq!(fetcher.calls(), vec![1, 100, 200]);
}

#[tokio::test]
async fn test_dlc_without_depots_becomes_placeholder() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).depot(10, 1, 1).dlc(&[40]).build())
        .with_payload(40, AppInfoBuilder::new(40).name("Soundtrack").build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["10", "40"]);
    assert!(records[1].is_placeholder());
    assert_eq!(records[1].size_bytes, 0);
    assert!(!records[1].has_key());
}

#[tokio::test]
async fn test_error_payload_dlc_becomes_placeholder() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).dlc(&[7, 8]).build())
        .with_payload(7, r#"{"error": "Invalid appid"}"#)
        .with_payload(8, "\"8\" { \"depots\" {");

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["7", "8"]);
    assert!(records.iter().all(DepotRecord::is_placeholder));
}

#[tokio::test]
async fn test_dlc_matching_emitted_depot_is_skipped() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).depot(11, 1, 1).dlc(&[11, 1]).build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["11"]);
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_dlc_list_tolerates_spaces_and_junk() {
    init_test_logging(None);
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).dlc_list(" 5, ,abc,6 ,").build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    assert_eq!(ids(&records), vec!["5", "6"]);
}

#[tokio::test]
async fn test_depot_filters() {
    let fetcher = MockFetcher::new().with_payload(
        1,
        AppInfoBuilder::new(1)
            .raw_depot("10", "100", "5")
            .raw_depot("11", "abc", "5")
            .raw_depot("12", "100", "")
            .raw_depot("1x3", "100", "5")
            .raw_depot("14", " 140 ", "5")
            .build(),
    );

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();

    // "branches" in the fixture is not digit-only and is ignored as well.
    assert_eq!(ids(&records), vec!["10", "14"]);
    assert_eq!(records[1].manifest_id, 140);
}

#[tokio::test]
async fn test_display_name_precedence() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).name("Outer").appinfo_name("Inner").depot(2, 1, 1).build())
        .with_payload(3, AppInfoBuilder::new(3).depot(4, 1, 1).build());
    let resolver = DepotResolver::new(&fetcher);

    let named = resolver.resolve(1).await.unwrap();
    assert_eq!(named[0].game_name, "Inner");

    let unnamed = resolver.resolve(3).await.unwrap();
    assert_eq!(unnamed[0].game_name, "");
}

#[tokio::test]
async fn test_root_failures_propagate() {
    let fetcher = MockFetcher::new()
        .with_payload(1, r#"{"error": "Invalid appid"}"#)
        .with_payload(2, "")
        .with_payload(3, "\"3\" { \"common\" { }")
        .with_failure(4, "timeout");
    let resolver = DepotResolver::new(&fetcher);

    assert!(matches!(resolver.resolve(1).await, Err(PermaError::AppNotFound { app_id: 1, .. })));
    assert!(matches!(resolver.resolve(2).await, Err(PermaError::AppNotFound { app_id: 2, .. })));
    assert!(matches!(
        resolver.resolve(3).await,
        Err(PermaError::MalformedAppInfo { app_id: 3, .. })
    ));
    assert!(matches!(resolver.resolve(4).await, Err(PermaError::AppNotFound { app_id: 4, .. })));
    assert!(matches!(resolver.resolve(5).await, Err(PermaError::AppNotFound { app_id: 5, .. })));
}

#[tokio::test]
async fn test_mismatched_appid_is_tolerated() {
    let fetcher = MockFetcher::new().with_payload(1, AppInfoBuilder::new(999).depot(2, 1, 1).build());

    let records = DepotResolver::new(&fetcher).resolve(1).await.unwrap();
    assert_eq!(ids(&records), vec!["2"]);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).name("G").depot(2, 3, 4).dlc(&[5, 6, 7]).build())
        .with_payload(5, AppInfoBuilder::new(5).depot(50, 1, 1).dlc(&[6]).build())
        .with_payload(6, AppInfoBuilder::new(6).depot(60, 1, 1).build());
    let resolver = DepotResolver::new(&fetcher);

    let first = resolver.resolve(1).await.unwrap();
    let second = resolver.resolve(1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(ids(&first), vec!["2", "50", "60", "7"]);
}

#[tokio::test]
async fn test_shared_visited_set_across_calls() {
    let fetcher = MockFetcher::new()
        .with_payload(1, AppInfoBuilder::new(1).depot(10, 1, 1).dlc(&[3]).build())
        .with_payload(2, AppInfoBuilder::new(2).depot(10, 1, 1).depot(20, 1, 1).dlc(&[3]).build())
        .with_payload(3, AppInfoBuilder::new(3).depot(30, 1, 1).build());
    let resolver = DepotResolver::new(&fetcher);
    let mut visited = VisitedSet::new();

    let first = resolver.resolve_with_visited(1, &mut visited).await.unwrap();
    let second = resolver.resolve_with_visited(2, &mut visited).await.unwrap();

    assert_eq!(ids(&first), vec!["10", "30"]);
    assert_eq!(ids(&second), vec!["20"]);
    assert!(visited.has_app(3));
}

#[test]
fn test_record_serializes_with_field_names() {
    let record = DepotRecord::placeholder(42);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["depot_id"], "42");
    assert_eq!(json["manifest_id"], 0);
}
