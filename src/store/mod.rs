//! Persistence contract for comparison runs
//!
//! The comparison engine reads case and hearing snapshots and persists run
//! records through this trait. Production deployments back it with their
//! own storage; the in-memory implementation here serves tests and
//! single-process embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{CallRecord, CaseSnapshot, ComparisonRun, HearingSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A run with the same (case, fingerprint) identity already exists
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ComparisonStore: Send + Sync {
    async fn load_case(&self, case_id: Uuid) -> Result<CaseSnapshot, StoreError>;

    /// `None` when the case has no hearing at all
    async fn load_hearing(&self, case_id: Uuid) -> Result<Option<HearingSnapshot>, StoreError>;

    async fn find_run(
        &self,
        case_id: Uuid,
        fingerprint: &str,
    ) -> Result<Option<ComparisonRun>, StoreError>;

    /// Insert a completed run. Must fail with [`StoreError::Conflict`] when
    /// a run with the same (case, fingerprint) identity already exists.
    async fn insert_run(&self, run: &ComparisonRun) -> Result<(), StoreError>;

    async fn delete_run(&self, case_id: Uuid, fingerprint: &str) -> Result<(), StoreError>;

    /// Append to the case's model-call ledger
    async fn append_call_records(
        &self,
        case_id: Uuid,
        records: &[CallRecord],
    ) -> Result<(), StoreError>;
}

/// Map-backed store for tests and embedded use
#[derive(Default)]
pub struct InMemoryStore {
    cases: Mutex<HashMap<Uuid, CaseSnapshot>>,
    hearings: Mutex<HashMap<Uuid, HearingSnapshot>>,
    runs: Mutex<HashMap<(Uuid, String), ComparisonRun>>,
    ledger: Mutex<HashMap<Uuid, Vec<CallRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_case(&self, case: CaseSnapshot) {
        self.cases.lock().expect("case map poisoned").insert(case.id, case);
    }

    pub fn upsert_hearing(&self, case_id: Uuid, hearing: HearingSnapshot) {
        self.hearings
            .lock()
            .expect("hearing map poisoned")
            .insert(case_id, hearing);
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().expect("run map poisoned").len()
    }

    pub fn ledger_for(&self, case_id: Uuid) -> Vec<CallRecord> {
        self.ledger
            .lock()
            .expect("ledger poisoned")
            .get(&case_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ComparisonStore for InMemoryStore {
    async fn load_case(&self, case_id: Uuid) -> Result<CaseSnapshot, StoreError> {
        self.cases
            .lock()
            .expect("case map poisoned")
            .get(&case_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("case {case_id}")))
    }

    async fn load_hearing(&self, case_id: Uuid) -> Result<Option<HearingSnapshot>, StoreError> {
        Ok(self
            .hearings
            .lock()
            .expect("hearing map poisoned")
            .get(&case_id)
            .cloned())
    }

    async fn find_run(
        &self,
        case_id: Uuid,
        fingerprint: &str,
    ) -> Result<Option<ComparisonRun>, StoreError> {
        Ok(self
            .runs
            .lock()
            .expect("run map poisoned")
            .get(&(case_id, fingerprint.to_string()))
            .cloned())
    }

    async fn insert_run(&self, run: &ComparisonRun) -> Result<(), StoreError> {
        let mut runs = self.runs.lock().expect("run map poisoned");
        let key = (run.case_id, run.fingerprint.clone());
        if runs.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "run for case {} with fingerprint {}",
                run.case_id, run.fingerprint
            )));
        }
        runs.insert(key, run.clone());
        Ok(())
    }

    async fn delete_run(&self, case_id: Uuid, fingerprint: &str) -> Result<(), StoreError> {
        self.runs
            .lock()
            .expect("run map poisoned")
            .remove(&(case_id, fingerprint.to_string()));
        Ok(())
    }

    async fn append_call_records(
        &self,
        case_id: Uuid,
        records: &[CallRecord],
    ) -> Result<(), StoreError> {
        self.ledger
            .lock()
            .expect("ledger poisoned")
            .entry(case_id)
            .or_default()
            .extend_from_slice(records);
        Ok(())
    }
}
