// src/store/mod.rs
//! The page store: the durable, ordered collection of saved landing pages.
//!
//! [`PageStore`] keeps the collection in memory as an [`im::Vector`] so that
//! [`PageStore::list`] hands out cheap, structurally shared snapshots. Every
//! mutation rewrites the whole collection to the injected [`DurableSlot`]:
//!
//! 1. take the store's write gate and the slot's exclusive lock,
//! 2. re-read the durable collection so other writers' commits are kept,
//! 3. apply the change and write the result,
//! 4. only then swap the in-memory collection and notify observers.
//!
//! A failed write leaves memory untouched and fires no observer, so the
//! in-memory view never claims something the slot does not hold.

mod codec;
mod file;
mod memory;
mod retry;
mod slot;

pub use file::FileSlot;
pub use memory::MemorySlot;
pub use retry::RetryingSlot;
pub use slot::{DurableSlot, SlotTransaction};

use crate::error::{AppError, Result};
use crate::model::LandingPageRecord;
use im::Vector;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback invoked with the new snapshot after each successful mutation.
pub type Observer = Arc<dyn Fn(&Vector<LandingPageRecord>) + Send + Sync>;

/// Handle returned by [`PageStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct PageStore {
    slot: Arc<dyn DurableSlot>,
    pages: RwLock<Vector<LandingPageRecord>>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
    write_gate: Mutex<()>,
}

impl PageStore {
    /// Opens the store on `slot`, loading whatever it holds.
    ///
    /// An absent slot yields an empty store. A slot that cannot be read or
    /// decoded is logged and also yields an empty store; this never fails.
    pub fn open(slot: Arc<dyn DurableSlot>) -> Self {
        let pages = load(slot.as_ref());
        log::debug!(
            "Opened page store on slot '{}' with {} page(s)",
            slot.name(),
            pages.len()
        );
        Self {
            slot,
            pages: RwLock::new(pages),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            write_gate: Mutex::new(()),
        }
    }

    /// Saves `record` at the front of the collection.
    ///
    /// Fails with [`AppError::DuplicateRecord`] if a page with the same id is
    /// already saved, or with [`AppError::Storage`] if the write fails.
    pub fn add(&self, record: LandingPageRecord) -> Result<()> {
        let id = record.id.clone();
        self.mutate(move |pages| {
            if pages.iter().any(|page| page.id == record.id) {
                return Err(AppError::DuplicateRecord(record.id.to_string()));
            }
            pages.push_front(record);
            Ok(())
        })?;
        log::info!("Saved landing page {}", id);
        Ok(())
    }

    /// Deletes the page with `id`. A missing id leaves the collection as it is,
    /// but the collection is still written back and observers still run.
    pub fn remove(&self, id: &str) -> Result<()> {
        self.mutate(|pages| {
            let before = pages.len();
            let kept: Vector<LandingPageRecord> =
                pages.iter().filter(|page| page.id != *id).cloned().collect();
            if kept.len() == before {
                log::debug!("No saved landing page with id {}", id);
            } else {
                log::info!("Deleted landing page {}", id);
            }
            *pages = kept;
            Ok(())
        })
    }

    pub fn get(&self, id: &str) -> Option<LandingPageRecord> {
        self.pages
            .read()
            .iter()
            .find(|page| page.id == *id)
            .cloned()
    }

    /// All saved pages, most recent first.
    pub fn list(&self) -> Vector<LandingPageRecord> {
        self.pages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.pages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.read().is_empty()
    }

    pub fn slot_name(&self) -> &str {
        self.slot.name()
    }

    /// Replaces the in-memory collection with what the slot holds now.
    ///
    /// Same failure handling as [`PageStore::open`]. Observers are notified.
    pub fn reload(&self) -> usize {
        let gate = self.write_gate.lock();
        let pages = load(self.slot.as_ref());
        let count = pages.len();
        *self.pages.write() = pages.clone();
        drop(gate);

        self.notify(&pages);
        count
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&Vector<LandingPageRecord>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Vector<LandingPageRecord>) -> Result<()>,
    {
        let gate = self.write_gate.lock();
        let name = self.slot.name();
        let mut tx = self.slot.begin()?;

        let mut pages = match tx.read() {
            Ok(Some(payload)) => codec::decode(name, &payload).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable contents of slot '{}': {}", name, e);
                self.pages.read().clone()
            }),
            Ok(None) => Vector::new(),
            // Durable state unknown: writing now could drop another writer's pages
            Err(e) => {
                log::error!("Could not re-read slot '{}' before writing: {}", e.slot(), e);
                return Err(e.into());
            }
        };

        change(&mut pages)?;

        let payload = codec::encode(name, &pages)?;
        tx.write(&payload)?;
        drop(tx);

        *self.pages.write() = pages.clone();
        drop(gate);

        self.notify(&pages);
        Ok(())
    }

    fn notify(&self, pages: &Vector<LandingPageRecord>) {
        // Observers may call back into the store
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(pages);
        }
    }
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore")
            .field("slot", &self.slot.name())
            .field("pages", &self.pages.read().len())
            .field("observers", &self.observers.lock().len())
            .finish()
    }
}

fn load(slot: &dyn DurableSlot) -> Vector<LandingPageRecord> {
    let payload = match slot.read() {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vector::new(),
        Err(e) => {
            log::warn!("Failed to read slot '{}', starting empty: {}", slot.name(), e);
            return Vector::new();
        }
    };
    codec::decode(slot.name(), &payload).unwrap_or_else(|e| {
        log::warn!("Failed to load saved landing pages, starting empty: {}", e);
        Vector::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FaqEntry, GenerationParams, LandingContent};
    use crate::types::Keywords;
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;

    fn record(keyword: &str, city: &str) -> LandingPageRecord {
        let params =
            GenerationParams::new(Keywords::collect([keyword]).unwrap(), city, "Texas").unwrap();
        let content = LandingContent {
            introduction: "Intro".into(),
            why_us: "Why".into(),
            things_to_do: "Things".into(),
            faq: vec![FaqEntry::new("Q?", "A.")],
        };
        LandingPageRecord::from_generation(&params, content, Utc::now())
    }

    fn memory_store() -> (Arc<MemorySlot>, PageStore) {
        let slot = Arc::new(MemorySlot::new());
        let store = PageStore::open(slot.clone());
        (slot, store)
    }

    #[test]
    fn add_prepends_and_persists() {
        let (slot, store) = memory_store();
        let first = record("plumbing", "Austin");
        let second = record("roofing", "Dallas");

        store.add(first.clone()).unwrap();
        store.add(second.clone()).unwrap();

        let ids: Vec<_> = store.list().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);
        assert_eq!(slot.write_count(), 2);
        assert_eq!(store.get(first.id.as_str()), Some(first));
    }

    #[test]
    fn duplicate_id_is_rejected_without_writing() {
        let (slot, store) = memory_store();
        let page = record("plumbing", "Austin");
        store.add(page.clone()).unwrap();

        let err = store.add(page).unwrap_err();

        assert!(matches!(err, AppError::DuplicateRecord(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(slot.write_count(), 1);
    }

    #[test]
    fn failed_write_rolls_back() {
        let (slot, store) = memory_store();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        slot.fail_next_writes(1);
        let err = store.add(record("plumbing", "Austin")).unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.is_empty());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(slot.payload(), None);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (_slot, store) = memory_store();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.add(record("plumbing", "Austin")).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add(record("roofing", "Austin")).unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observer_may_read_the_store() {
        let (_slot, store) = memory_store();
        let store = Arc::new(store);
        let seen = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&store);
        let seen_in_observer = seen.clone();
        store.subscribe(move |snapshot| {
            if let Some(store) = weak.upgrade() {
                assert_eq!(store.len(), snapshot.len());
                seen_in_observer.store(snapshot.len(), Ordering::SeqCst);
            }
        });

        store.add(record("plumbing", "Austin")).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reload_picks_up_external_writes() {
        let (slot, store) = memory_store();
        let other = PageStore::open(slot.clone());
        other.add(record("plumbing", "Austin")).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.reload(), 1);
        assert_eq!(store.len(), 1);
    }
}
