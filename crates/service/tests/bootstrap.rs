//! Demo-data bootstrap integration tests.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use molar_model::Patient;
use molar_service::{RecordService, bootstrap::PATIENT_COUNT};
use molar_store::{PatientStorage, RecordStorage, SledPatientStore, SqliteRecordStore};

fn service() -> RecordService<SledPatientStore, SqliteRecordStore> {
    let patients = SledPatientStore::temporary().expect("failed to open patient store");
    let records = SqliteRecordStore::in_memory().expect("failed to open record store");
    records.init_schema().expect("failed to init schema");
    RecordService::new(Arc::new(patients), Arc::new(records))
}

#[tokio::test]
async fn test_empty_stores_get_fifty_patients_with_records() {
    let service = service();

    let report = service.seed_demo_data().await.unwrap();

    assert_eq!(report.patients_created, PATIENT_COUNT);
    assert_eq!(report.failures, 0);
    assert_eq!(service.patients().count().await.unwrap(), PATIENT_COUNT as u64);

    // Every patient got between 1 and 3 records.
    let patients = service.patients().list().await.unwrap();
    let mut total = 0;
    for patient in &patients {
        let records = service.records_for_patient(&patient.id).await.unwrap();
        assert!(
            (1..=3).contains(&records.len()),
            "patient {} has {} records",
            patient.id,
            records.len()
        );
        for record in &records {
            assert_eq!(record.patient_id, patient.id);
        }
        total += records.len();
    }
    assert_eq!(report.records_created, total);
    assert_eq!(service.records().count().await.unwrap(), total as u64);
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let service = service();

    service.seed_demo_data().await.unwrap();
    let patients_before = service.patients().count().await.unwrap();
    let records_before = service.records().count().await.unwrap();

    let report = service.seed_demo_data().await.unwrap();

    assert_eq!(report.patients_created, 0);
    assert_eq!(report.records_created, 0);
    assert_eq!(service.patients().count().await.unwrap(), patients_before);
    assert_eq!(service.records().count().await.unwrap(), records_before);
}

#[tokio::test]
async fn test_non_empty_patient_store_is_left_untouched() {
    let service = service();
    let existing = Patient {
        id: "p-existing".to_string(),
        first_name: "Maria".to_string(),
        last_name: "Silva".to_string(),
        email: "maria.silva@example.com".to_string(),
        phone_number: "555-101-2020".to_string(),
        address: "4 Maple Avenue, Riverton".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 9, 23).unwrap(),
        last_appointment: Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap(),
        next_appointment: None,
        notes: String::new(),
    };
    service.patients().insert(&existing).await.unwrap();

    let report = service.seed_demo_data().await.unwrap();

    // No patients added; records are still seeded for the one patient.
    assert_eq!(report.patients_created, 0);
    assert_eq!(service.patients().count().await.unwrap(), 1);
    assert!((1..=3).contains(&(report.records_created)));
    let records = service.records_for_patient("p-existing").await.unwrap();
    assert_eq!(records.len(), report.records_created);
}

#[tokio::test]
async fn test_seeded_dates_are_recent_past() {
    let service = service();
    service.seed_demo_data().await.unwrap();

    let now = Utc::now();
    let patients = service.patients().list().await.unwrap();
    for patient in &patients {
        for record in service.records_for_patient(&patient.id).await.unwrap() {
            assert!(record.record_date <= now);
            assert!((now - record.record_date).num_days() <= 365 * 3 + 2);
        }
    }
}
