//! Bounded retry around any durable slot.

use super::slot::{DurableSlot, SlotTransaction};
use crate::error::StorageError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};

/// Wraps a slot whose backend can fail transiently (a network share, a remote
/// key-value service). Each read, lock and write is retried with exponential
/// backoff; once the policy's budget is spent the last error is surfaced.
pub struct RetryingSlot<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: DurableSlot> RetryingSlot<S> {
    pub fn new(inner: S) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    pub fn with_policy(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DurableSlot> DurableSlot for RetryingSlot<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        retry_with_backoff(&self.policy, StorageError::is_transient, || {
            self.inner.read()
        })
    }

    fn begin(&self) -> Result<Box<dyn SlotTransaction + '_>, StorageError> {
        let inner = retry_with_backoff(&self.policy, StorageError::is_transient, || {
            self.inner.begin()
        })?;
        Ok(Box::new(RetryingTransaction {
            inner,
            policy: self.policy,
        }))
    }
}

struct RetryingTransaction<'a> {
    inner: Box<dyn SlotTransaction + 'a>,
    policy: RetryPolicy,
}

impl SlotTransaction for RetryingTransaction<'_> {
    fn read(&mut self) -> Result<Option<String>, StorageError> {
        let inner = &mut self.inner;
        retry_with_backoff(&self.policy, StorageError::is_transient, || inner.read())
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        let inner = &mut self.inner;
        retry_with_backoff(&self.policy, StorageError::is_transient, || {
            inner.write(payload)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySlot;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn write_succeeds_within_budget() {
        let slot = RetryingSlot::with_policy(MemorySlot::new(), fast_policy());
        slot.inner().fail_next_writes(2);

        slot.begin().unwrap().write("[]").unwrap();

        assert_eq!(slot.inner().payload().as_deref(), Some("[]"));
    }

    #[test]
    fn write_fails_past_budget() {
        let slot = RetryingSlot::with_policy(MemorySlot::new(), fast_policy());
        slot.inner().fail_next_writes(3);

        let err = slot.begin().unwrap().write("[]").unwrap_err();

        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert_eq!(slot.inner().payload(), None);
    }

    #[test]
    fn reads_give_up_after_budget() {
        let slot = RetryingSlot::with_policy(MemorySlot::with_payload("[]"), fast_policy());
        slot.inner().fail_reads(true);
        assert!(slot.read().is_err());
    }
}
