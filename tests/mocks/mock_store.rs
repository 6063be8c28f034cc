use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vcf_collector::models::ContactRecord;
use vcf_collector::storage::{ContactStore, StoreError, StoreResult};

/// Mock contact store for testing.
///
/// Provides an in-memory implementation of ContactStore that can be
/// preloaded with records, tracks save/load calls for verification, and can
/// be switched into a failing mode to exercise the best-effort persistence
/// path.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactStore {
    records: Arc<Mutex<Vec<ContactRecord>>>,
    save_calls: Arc<AtomicUsize>,
    load_calls: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
    fail_loads: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactStore {
    /// Create a new empty MockContactStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with records, as if a snapshot existed.
    pub fn with_records(records: Vec<ContactRecord>) -> Self {
        let store = Self::new();
        *store.records.lock().unwrap() = records;
        store
    }

    /// Everything saved so far.
    pub fn saved_records(&self) -> Vec<ContactRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of times `save` was called.
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Number of times `load` was called.
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent `save` fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `load` fail with an I/O error.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContactStore for MockContactStore {
    async fn load(&self) -> StoreResult<Vec<ContactRecord>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("injected load failure")));
        }

        Ok(self.records.lock().unwrap().clone())
    }

    async fn save(&self, records: &[ContactRecord]) -> StoreResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("injected save failure")));
        }

        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }
}
