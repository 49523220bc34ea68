//! データ生成とスナップショットの統合テスト

use callcoach::{
    data::{default_roster, DatasetError, FIRST_INTERACTION_ID, INTERACTION_COUNT, LOOKBACK_DAYS},
    io::{load_dataset, save_dataset, write_ndjson, DatasetRecord, NdjsonError},
    SampleDataGenerator,
};
use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;
use tempfile::tempdir;

#[test]
fn test_generated_dataset_invariants_across_seeds() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    for seed in 0..20 {
        let dataset = SampleDataGenerator::with_seed(seed).generate_at(now);
        let roster_ids: HashSet<u32> = dataset.agents().iter().map(|a| a.id).collect();

        assert_eq!(dataset.agents().len(), 5);
        assert_eq!(dataset.interactions().len(), INTERACTION_COUNT);

        for interaction in dataset.interactions() {
            assert!(roster_ids.contains(&interaction.agent_id));
            assert!(interaction.id >= FIRST_INTERACTION_ID);
            assert!(interaction.timestamp <= now);
            assert!(interaction.timestamp >= now - Duration::days(LOOKBACK_DAYS));
            if let Some(duration) = interaction.duration_secs {
                assert!((60..600).contains(&duration));
            }
        }
    }
}

#[test]
fn test_roster_matches_demo_agents() {
    let dataset = SampleDataGenerator::with_seed(1).generate();
    assert_eq!(dataset.agents(), default_roster().as_slice());
    assert_eq!(dataset.agent_name(1), Some("Sarah Johnson"));
}

#[test]
fn test_same_seed_same_dataset() {
    let now = Utc::now();
    let first = SampleDataGenerator::with_seed(7).generate_at(now);
    let second = SampleDataGenerator::with_seed(7).generate_at(now);
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_round_trip() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("dataset.ndjson");

    let dataset = SampleDataGenerator::with_seed(99).generate();
    let written = save_dataset(&path, &dataset).unwrap();
    assert_eq!(written, 5 + INTERACTION_COUNT);

    let first_line = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .next()
        .map(str::to_string)
        .unwrap();
    assert!(first_line.starts_with(r#"{"kind":"agent""#));

    let loaded = load_dataset(&path).unwrap();
    assert_eq!(loaded, dataset);
}

#[test]
fn test_snapshot_with_dangling_agent_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("dangling.ndjson");
    std::fs::write(
        &path,
        concat!(
            r#"{"kind":"agent","id":1,"name":"Sarah Johnson","team":"CustomerSupport","tenure_months":24,"avg_rating":4.7}"#,
            "\n",
            r#"{"kind":"interaction","id":1000,"agent_id":9,"channel":"Call","timestamp":"2024-03-01T12:00:00Z","duration_secs":null,"sentiment":"Negative","resolution":"Pending","topic":"Billing"}"#,
            "\n"
        ),
    )
    .unwrap();

    let error = load_dataset(&path).unwrap_err();
    assert!(matches!(
        error,
        NdjsonError::Dataset(DatasetError::UnknownAgent {
            interaction_id: 1000,
            agent_id: 9
        })
    ));
}

#[test]
fn test_snapshot_with_broken_line_reports_line_number() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("broken.ndjson");
    std::fs::write(&path, "\n{not json}\n").unwrap();

    let error = load_dataset(&path).unwrap_err();
    assert!(matches!(error, NdjsonError::JsonParse { line: 2, .. }));
}

#[test]
fn test_snapshot_with_invalid_rating_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("rating.ndjson");

    let mut roster = default_roster();
    roster[0].avg_rating = 9.0;
    let records: Vec<DatasetRecord> = roster.into_iter().map(DatasetRecord::Agent).collect();
    write_ndjson(&path, &records).unwrap();

    let error = load_dataset(&path).unwrap_err();
    assert!(matches!(
        error,
        NdjsonError::Dataset(DatasetError::RatingOutOfRange { agent_id: 1, rating }) if rating == 9.0
    ));
}
