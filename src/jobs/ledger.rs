//! Bounded in-memory history of automation jobs

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

use super::JobRecord;

/// Keeps the most recent `capacity` jobs, oldest evicted first
pub struct JobLedger {
    records: DashMap<Uuid, JobRecord>,
    order: Mutex<VecDeque<Uuid>>,
    capacity: usize,
}

impl JobLedger {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: DashMap::with_capacity(capacity),
            order: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Insert a new record, evicting the oldest ones past capacity
    pub fn insert(&self, record: JobRecord) {
        let mut order = self.order.lock();

        order.push_back(record.id);
        self.records.insert(record.id, record);

        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.records.remove(&evicted);
                debug!(job_id = %evicted, "Evicted job from ledger");
            }
        }
    }

    /// Apply `f` to a record in place. Returns false if the job is gone.
    pub fn update<F>(&self, id: &Uuid, f: F) -> bool
    where
        F: FnOnce(&mut JobRecord),
    {
        match self.records.get_mut(id) {
            Some(mut entry) => {
                f(entry.value_mut());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<JobRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// All retained jobs, newest first
    pub fn list(&self) -> Vec<JobRecord> {
        let order = self.order.lock();
        order
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id).map(|r| r.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for JobLedger {
    fn default() -> Self {
        Self::new(100)
    }
}
