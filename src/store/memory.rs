//! In-process durable slot for tests and embedding.

use super::slot::{DurableSlot, SlotTransaction};
use crate::error::StorageError;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

/// A slot kept in memory. Clones of an `Arc<MemorySlot>` share the payload,
/// which makes it a stand-in for storage shared by several store instances.
///
/// Failures can be injected to exercise the store's error paths.
#[derive(Debug, Default)]
pub struct MemorySlot {
    name: String,
    payload: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    failing_writes: AtomicU32,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::named(crate::constants::PAGE_STORE_SLOT_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A slot that already holds `payload`.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let slot = Self::new();
        *slot.payload.lock() = Some(payload.into());
        slot
    }

    /// Current payload, bypassing failure injection.
    pub fn payload(&self) -> Option<String> {
        self.payload.lock().clone()
    }

    /// Overwrites the payload directly, as another writer would.
    pub fn set_payload(&self, payload: impl Into<String>) {
        *self.payload.lock() = Some(payload.into());
    }

    /// Makes every read fail until switched off.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(self.unavailable("injected read failure"));
        }
        Ok(())
    }

    fn take_write_failure(&self) -> bool {
        self.failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn unavailable(&self, reason: &str) -> StorageError {
        StorageError::Unavailable {
            slot: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl DurableSlot for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        self.check_read()?;
        Ok(self.payload.lock().clone())
    }

    fn begin(&self) -> Result<Box<dyn SlotTransaction + '_>, StorageError> {
        Ok(Box::new(MemoryTransaction {
            slot: self,
            payload: self.payload.lock(),
        }))
    }
}

struct MemoryTransaction<'a> {
    slot: &'a MemorySlot,
    payload: MutexGuard<'a, Option<String>>,
}

impl SlotTransaction for MemoryTransaction<'_> {
    fn read(&mut self) -> Result<Option<String>, StorageError> {
        self.slot.check_read()?;
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if self.slot.take_write_failure() {
            return Err(self.slot.unavailable("injected write failure"));
        }
        *self.payload = Some(payload.to_string());
        self.slot.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_stores_writes() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read().unwrap(), None);

        slot.begin().unwrap().write("[]").unwrap();

        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
        assert_eq!(slot.write_count(), 1);
    }

    #[test]
    fn injected_write_failures_are_consumed() {
        let slot = MemorySlot::new();
        slot.fail_next_writes(2);

        assert!(slot.begin().unwrap().write("a").is_err());
        assert!(slot.begin().unwrap().write("b").is_err());
        slot.begin().unwrap().write("c").unwrap();

        assert_eq!(slot.payload().as_deref(), Some("c"));
        assert_eq!(slot.write_count(), 1);
    }

    #[test]
    fn injected_read_failure() {
        let slot = MemorySlot::with_payload("[]");
        slot.fail_reads(true);
        assert!(slot.read().is_err());
        slot.fail_reads(false);
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }
}
