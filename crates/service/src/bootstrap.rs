//! Demo-data bootstrap.
//!
//! Fills empty stores with synthetic but plausible patients and visit
//! records at first startup. Each store is gated by its own emptiness
//! check: a store that already holds data is left untouched entirely - no
//! merge, no partial fill - which makes a second run a no-op.
//!
//! Record inserts go in small batches; a failed batch is retried row by
//! row, counting successes and failures independently, so a single bad
//! record cannot sink the rest of the bootstrap. Callers treat bootstrap
//! failure as non-fatal and start with whatever subset succeeded.

use chrono::{Duration, Utc};
use molar_model::{Patient, PatientRecord};
use molar_store::{PatientStorage, RecordStorage, StoreResult};
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::records::RecordService;

/// Number of synthetic patients created into an empty patient store.
pub const PATIENT_COUNT: usize = 50;

/// Records per insert batch.
const BATCH_SIZE: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Daniel", "Karen",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson",
    "Martin", "Lee",
];

const STREETS: &[&str] = &[
    "Oak Street",
    "Maple Avenue",
    "Cedar Lane",
    "Elm Drive",
    "Birch Road",
    "Willow Court",
];

const CITIES: &[&str] = &["Springfield", "Riverton", "Lakewood", "Fairview", "Georgetown"];

const PATIENT_NOTES: &[&str] = &[
    "Prefers morning appointments",
    "Allergic to penicillin",
    "Anxious patient, schedule extra time",
    "Requires premedication before procedures",
    "No known allergies",
    "",
];

const RECORD_TYPES: &[&str] = &[
    "Checkup",
    "Cleaning",
    "Filling",
    "Root Canal",
    "Extraction",
    "Crown",
    "Whitening",
];

const DENTISTS: &[&str] = &[
    "Dr. Adams",
    "Dr. Baker",
    "Dr. Clark",
    "Dr. Davis",
    "Dr. Evans",
];

const TREATMENTS: &[&str] = &[
    "Fluoride treatment",
    "Composite filling",
    "Scaling and polishing",
    "Crown placement",
    "Tooth extraction",
    "Routine examination",
];

const PRESCRIPTIONS: &[&str] = &[
    "None",
    "Amoxicillin 500mg",
    "Ibuprofen 400mg",
    "Chlorhexidine rinse",
];

/// Outcome of a bootstrap run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Patients inserted by this run (0 when the store was non-empty).
    pub patients_created: usize,

    /// Records inserted by this run (0 when the store was non-empty).
    pub records_created: usize,

    /// Individual inserts that failed and were skipped.
    pub failures: usize,
}

impl<P: PatientStorage, R: RecordStorage> RecordService<P, R> {
    /// Seeds both stores with demo data.
    ///
    /// Idempotent: a store that already holds at least one entity of the
    /// relevant kind is skipped entirely. Record seeding reads patients
    /// back from the document store, so patients seeded by the same call
    /// get records too.
    pub async fn seed_demo_data(&self) -> StoreResult<SeedReport> {
        let mut report = SeedReport::default();
        self.seed_patients(&mut report).await?;
        self.seed_records(&mut report).await?;

        info!(
            patients = report.patients_created,
            records = report.records_created,
            failures = report.failures,
            "demo data seeded"
        );
        Ok(report)
    }

    async fn seed_patients(&self, report: &mut SeedReport) -> StoreResult<()> {
        if self.patients().count().await? > 0 {
            info!("patient store not empty, skipping patient seed");
            return Ok(());
        }

        let mut rng = rand::thread_rng();
        for _ in 0..PATIENT_COUNT {
            let patient = sample_patient(&mut rng);
            match self.patients().insert(&patient).await {
                Ok(()) => report.patients_created += 1,
                Err(error) => {
                    warn!(%error, "failed to insert demo patient");
                    report.failures += 1;
                }
            }
        }
        Ok(())
    }

    async fn seed_records(&self, report: &mut SeedReport) -> StoreResult<()> {
        if self.records().count().await? > 0 {
            info!("record store not empty, skipping record seed");
            return Ok(());
        }

        let patients = self.patients().list().await?;
        let mut rng = rand::thread_rng();

        let mut pending = Vec::new();
        for patient in &patients {
            let per_patient = rng.gen_range(1..=3);
            for index in 0..per_patient {
                pending.push(sample_record(&patient.id, index, &mut rng));
            }
        }

        for batch in pending.chunks(BATCH_SIZE) {
            match self.records().insert_batch(batch).await {
                Ok(ids) => report.records_created += ids.len(),
                Err(error) => {
                    // The batch rolled back; retry row by row so one bad
                    // record cannot sink its batch-mates.
                    warn!(%error, size = batch.len(), "batch insert failed, retrying individually");
                    for record in batch {
                        match self.records().insert(record).await {
                            Ok(_) => report.records_created += 1,
                            Err(error) => {
                                warn!(%error, "failed to insert demo record");
                                report.failures += 1;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn pick<'a>(rng: &mut impl Rng, vocabulary: &'a [&'a str]) -> &'a str {
    vocabulary[rng.gen_range(0..vocabulary.len())]
}

fn sample_patient(rng: &mut impl Rng) -> Patient {
    let first_name = pick(rng, FIRST_NAMES).to_string();
    let last_name = pick(rng, LAST_NAMES).to_string();
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );

    // 18 to 90 years old.
    let age_days: i64 = rng.gen_range(18 * 365..=90 * 365);
    let date_of_birth = (Utc::now() - Duration::days(age_days)).date_naive();

    let last_appointment = Utc::now() - Duration::days(rng.gen_range(1..365));
    let next_appointment = if rng.gen_bool(0.5) {
        Some(Utc::now() + Duration::days(rng.gen_range(1..90)))
    } else {
        None
    };

    Patient {
        id: Uuid::new_v4().to_string(),
        first_name,
        last_name,
        email,
        phone_number: format!(
            "555-{:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10000)
        ),
        address: format!(
            "{} {}, {}",
            rng.gen_range(1..999),
            pick(rng, STREETS),
            pick(rng, CITIES)
        ),
        date_of_birth,
        last_appointment,
        next_appointment,
        notes: pick(rng, PATIENT_NOTES).to_string(),
    }
}

fn sample_record(patient_id: &str, index: usize, rng: &mut impl Rng) -> PatientRecord {
    let record_type = pick(rng, RECORD_TYPES);

    // Three fixed phrasings, cycled by record index.
    let diagnosis = match index % 3 {
        0 => format!("{record_type} completed without complications"),
        1 => format!(
            "Early-stage decay noted during {}",
            record_type.to_lowercase()
        ),
        _ => "Healthy dentition, continue routine care".to_string(),
    };

    // Within the past ~3 years.
    let record_date = Utc::now()
        - Duration::days(rng.gen_range(0..365 * 3))
        - Duration::minutes(rng.gen_range(0..1440));

    PatientRecord {
        id: 0, // store-assigned
        patient_id: patient_id.to_string(),
        record_date,
        record_type: record_type.to_string(),
        description: format!("{record_type} visit"),
        treatment: pick(rng, TREATMENTS).to_string(),
        diagnosis,
        prescription: pick(rng, PRESCRIPTIONS).to_string(),
        notes: String::new(),
        dentist_name: pick(rng, DENTISTS).to_string(),
    }
}
