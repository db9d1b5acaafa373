//! HTTP request handlers.

pub mod health;
pub mod patients;
pub mod records;

pub use health::health_handler;
pub use patients::{
    create_patient, delete_patient, get_patient, list_patients, search_patients, update_patient,
};
pub use records::{
    create_record, delete_record, get_record, list_patient_records, patient_chart, update_record,
};
