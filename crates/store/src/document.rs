//! Embedded document store for patients.
//!
//! Patients live in a single `sled` tree keyed by patient id, with
//! JSON-encoded values. The engine serializes access internally, so the
//! adapter carries no locking of its own.

use std::path::Path;

use async_trait::async_trait;
use molar_model::Patient;
use tracing::debug;

use crate::core::PatientStorage;
use crate::error::{StoreError, StoreResult};

const STORE: &str = "patient";
const TREE: &str = "patients";

/// Embedded document store holding [`Patient`] entities.
pub struct SledPatientStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl std::fmt::Debug for SledPatientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledPatientStore")
            .field("entries", &self.tree.len())
            .finish_non_exhaustive()
    }
}

impl SledPatientStore {
    /// Opens (or creates) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::Config::new()
            .path(path)
            .open()
            .map_err(|e| StoreError::connection(STORE, e))?;
        Self::with_db(db)
    }

    /// Creates a store backed by a temporary directory, removed on drop.
    /// Intended for tests.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::connection(STORE, e))?;
        Self::with_db(db)
    }

    fn with_db(db: sled::Db) -> StoreResult<Self> {
        let tree = db
            .open_tree(TREE)
            .map_err(|e| StoreError::internal(STORE, e))?;
        debug!(entries = tree.len(), "patient document store opened");
        Ok(Self { db, tree })
    }

    /// Flushes pending writes to disk.
    pub fn flush(&self) -> StoreResult<()> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| StoreError::internal(STORE, e))
    }

    fn encode(patient: &Patient) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(patient).map_err(|e| StoreError::serialization(STORE, e))
    }

    fn decode(bytes: &[u8]) -> StoreResult<Patient> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::serialization(STORE, e))
    }
}

#[async_trait]
impl PatientStorage for SledPatientStore {
    fn store_name(&self) -> &'static str {
        "sled"
    }

    async fn insert(&self, patient: &Patient) -> StoreResult<()> {
        let value = Self::encode(patient)?;
        self.tree
            .insert(patient.id.as_bytes(), value)
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Patient>> {
        match self
            .tree
            .get(id.as_bytes())
            .map_err(|e| StoreError::internal(STORE, e))?
        {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Patient>> {
        let mut patients = Vec::new();
        for entry in self.tree.iter() {
            let (_, bytes) = entry.map_err(|e| StoreError::internal(STORE, e))?;
            patients.push(Self::decode(&bytes)?);
        }
        Ok(patients)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Patient>> {
        // An exact id match identifies at most one patient.
        if let Some(patient) = self.get(query).await? {
            return Ok(vec![patient]);
        }

        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        for entry in self.tree.iter() {
            let (_, bytes) = entry.map_err(|e| StoreError::internal(STORE, e))?;
            let patient = Self::decode(&bytes)?;
            if patient.first_name.to_lowercase().contains(&needle)
                || patient.last_name.to_lowercase().contains(&needle)
                || patient.full_name().to_lowercase().contains(&needle)
            {
                matches.push(patient);
            }
        }
        Ok(matches)
    }

    async fn replace(&self, patient: &Patient) -> StoreResult<bool> {
        if !self
            .tree
            .contains_key(patient.id.as_bytes())
            .map_err(|e| StoreError::internal(STORE, e))?
        {
            return Ok(false);
        }
        self.tree
            .insert(patient.id.as_bytes(), Self::encode(patient)?)
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let previous = self
            .tree
            .remove(id.as_bytes())
            .map_err(|e| StoreError::internal(STORE, e))?;
        Ok(previous.is_some())
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        self.tree
            .contains_key(id.as_bytes())
            .map_err(|e| StoreError::internal(STORE, e))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.tree.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sample_patient(id: &str, first: &str, last: &str) -> Patient {
        Patient {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone_number: "555-101-2020".to_string(),
            address: "4 Maple Avenue, Riverton".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
            last_appointment: Utc.with_ymd_and_hms(2026, 2, 3, 14, 0, 0).unwrap(),
            next_appointment: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SledPatientStore::temporary().unwrap();
        let patient = sample_patient("p-1", "Maria", "Silva");

        store.insert(&patient).await.unwrap();
        let found = store.get("p-1").await.unwrap().unwrap();
        assert_eq!(found, patient);
        assert!(store.get("p-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_requires_existing() {
        let store = SledPatientStore::temporary().unwrap();
        let mut patient = sample_patient("p-1", "Maria", "Silva");

        assert!(!store.replace(&patient).await.unwrap());

        store.insert(&patient).await.unwrap();
        patient.last_name = "Santos".to_string();
        assert!(store.replace(&patient).await.unwrap());
        assert_eq!(
            store.get("p-1").await.unwrap().unwrap().last_name,
            "Santos"
        );
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = SledPatientStore::temporary().unwrap();
        store
            .insert(&sample_patient("p-1", "Maria", "Silva"))
            .await
            .unwrap();

        assert!(store.delete("p-1").await.unwrap());
        assert!(!store.delete("p-1").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_by_id_returns_exactly_one() {
        let store = SledPatientStore::temporary().unwrap();
        store
            .insert(&sample_patient("p-1", "Maria", "Silva"))
            .await
            .unwrap();
        store
            .insert(&sample_patient("p-2", "Mario", "Rossi"))
            .await
            .unwrap();

        let matches = store.search("p-1").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "p-1");
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_insensitive() {
        let store = SledPatientStore::temporary().unwrap();
        store
            .insert(&sample_patient("p-1", "Maria", "Silva"))
            .await
            .unwrap();
        store
            .insert(&sample_patient("p-2", "Mario", "Rossi"))
            .await
            .unwrap();
        store
            .insert(&sample_patient("p-3", "Anna", "Keller"))
            .await
            .unwrap();

        let matches = store.search("MARI").await.unwrap();
        assert_eq!(matches.len(), 2);

        let matches = store.search("silva").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "p-1");
    }

    #[tokio::test]
    async fn test_search_matches_full_name() {
        let store = SledPatientStore::temporary().unwrap();
        store
            .insert(&sample_patient("p-1", "Maria", "Silva"))
            .await
            .unwrap();

        // Spans the boundary between first and last name.
        let matches = store.search("ia Sil").await.unwrap();
        assert_eq!(matches.len(), 1);

        assert!(store.search("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let store = SledPatientStore::temporary().unwrap();
        for i in 0..5 {
            store
                .insert(&sample_patient(&format!("p-{i}"), "Pat", "Lee"))
                .await
                .unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 5);
        assert_eq!(store.list().await.unwrap().len(), 5);
    }
}
