//! Round-trip tests through the JSON file store: a restart must restore
//! exactly the records that were accepted, field for field.

use std::sync::Arc;
use vcf_collector::{ContactLedger, JsonFileStore, NewContact, SubmitOutcome};

fn submission(name: &str, phone: &str, photo: Option<&str>) -> NewContact {
    NewContact {
        name: name.to_string(),
        phone: phone.to_string(),
        photo: photo.map(str::to_string),
        source_address: "192.0.2.7".to_string(),
    }
}

#[tokio::test]
async fn test_restart_restores_identical_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    let ledger = ContactLedger::open(Arc::new(JsonFileStore::new(&path)), 200).await;
    let submissions = [
        ("Asha", "+255 712 345 678", None),
        ("Ben", "555-0001", Some("data:image/jpeg;base64,/9j/AAAA")),
        ("Cleo", "(020) 7946 0958", None),
    ];
    for (name, phone, photo) in submissions {
        let outcome = ledger.submit(submission(name, phone, photo)).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
    }

    let (before, _) = ledger.list_all().await;
    drop(ledger);

    // Simulated restart: fresh ledger over the same file
    let restored = ContactLedger::open(Arc::new(JsonFileStore::new(&path)), 200).await;
    let (after, _) = restored.list_all().await;

    assert_eq!(after, before);
    assert_eq!(after.len(), 3);
    assert_eq!(after[1].photo, "data:image/jpeg;base64,/9j/AAAA");
    assert_eq!(after[2].source_address, "192.0.2.7");
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_fresh_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    std::fs::write(&path, "{ definitely not a contact array").unwrap();

    let ledger = ContactLedger::open(Arc::new(JsonFileStore::new(&path)), 200).await;
    assert_eq!(ledger.count().await, 0);

    // The first accepted submission overwrites the bad snapshot
    ledger
        .submit(submission("Asha", "0712345678", None))
        .await
        .unwrap();

    let reopened = ContactLedger::open(Arc::new(JsonFileStore::new(&path)), 200).await;
    assert_eq!(reopened.count().await, 1);
}

#[tokio::test]
async fn test_every_accepted_submission_rewrites_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let ledger = ContactLedger::open(Arc::new(JsonFileStore::new(&path)), 200).await;

    for i in 0..3 {
        ledger
            .submit(submission("Grow", &format!("0712 00{}", i), None))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), i + 1, "snapshot must reflect every append");
    }
}
