//! Tests for the JSON-file participant repository.

use chrono::{NaiveDate, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::credentials::Token;
use crate::domain::participant::HouseholdKey;

fn sample_participant(civic_number: &str) -> Participant {
    let slot = NaiveDate::from_ymd_opt(2026, 8, 27)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid slot timestamp");
    Participant {
        id: Uuid::new_v4(),
        token: Token::generate(),
        full_name: "Ada Lovelace".to_owned(),
        phone: "418-555-0199".to_owned(),
        email: Some("ada@example.com".to_owned()),
        zip_code: "G2E6J5".to_owned(),
        civic_number: civic_number.to_owned(),
        apartment: None,
        household_key: HouseholdKey::derive("G2E6J5", civic_number, ""),
        slot_time: slot,
        created_at: Utc::now(),
        checked_in: false,
    }
}

#[tokio::test]
async fn missing_file_heals_to_a_valid_empty_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("participants.json");
    let repository = JsonParticipantRepository::new(&path);

    let loaded = repository.load_all().await.expect("load succeeds");
    assert!(loaded.is_empty());

    let healed = std::fs::read_to_string(&path).expect("file exists after heal");
    assert_eq!(healed.trim(), "[]");
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n")]
#[case::garbage("{not json")]
#[case::wrong_shape("{\"participants\": 3}")]
#[tokio::test]
async fn unreadable_content_heals_to_a_valid_empty_store(#[case] content: &str) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("participants.json");
    std::fs::write(&path, content).expect("seed file");
    let repository = JsonParticipantRepository::new(&path);

    let loaded = repository.load_all().await.expect("load succeeds");
    assert!(loaded.is_empty());

    let healed = std::fs::read_to_string(&path).expect("file readable after heal");
    assert_eq!(healed.trim(), "[]");
}

#[tokio::test]
async fn save_then_load_round_trips_the_collection() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repository = JsonParticipantRepository::new(dir.path().join("participants.json"));
    let participants = vec![sample_participant("2800"), sample_participant("2802")];

    repository.save_all(&participants).await.expect("save succeeds");
    let loaded = repository.load_all().await.expect("load succeeds");
    assert_eq!(loaded, participants);
}

#[tokio::test]
async fn save_fully_replaces_prior_content() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repository = JsonParticipantRepository::new(dir.path().join("participants.json"));

    repository
        .save_all(&[sample_participant("2800"), sample_participant("2802")])
        .await
        .expect("first save succeeds");
    let replacement = vec![sample_participant("2804")];
    repository.save_all(&replacement).await.expect("second save succeeds");

    let loaded = repository.load_all().await.expect("load succeeds");
    assert_eq!(loaded, replacement);
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data").join("participants.json");
    let repository = JsonParticipantRepository::new(&path);

    repository
        .save_all(&[sample_participant("2800")])
        .await
        .expect("save succeeds");
    assert!(path.exists());
}

#[tokio::test]
async fn write_into_an_unwritable_location_surfaces_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file, not dir").expect("seed blocker");

    // Parent "directory" is a regular file, so the temp file cannot land.
    let repository = JsonParticipantRepository::new(blocker.join("participants.json"));
    let error = repository
        .save_all(&[sample_participant("2800")])
        .await
        .expect_err("write fails");
    assert!(matches!(
        error,
        crate::domain::ports::ParticipantRepositoryError::Write { .. }
    ));
}

#[tokio::test]
async fn no_temp_files_are_left_behind_after_saves() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repository = JsonParticipantRepository::new(dir.path().join("participants.json"));

    for civic in 0..5 {
        repository
            .save_all(&[sample_participant(&civic.to_string())])
            .await
            .expect("save succeeds");
    }

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .expect("dir readable")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("participants.json")]);
}
