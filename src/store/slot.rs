//! Durable slots: named locations that hold one serialized collection.

use crate::error::StorageError;

/// A named location in persistent storage that survives across sessions.
///
/// Plain reads go through [`DurableSlot::read`]. Writes always happen inside a
/// [`SlotTransaction`], which holds the slot's exclusive lock until dropped so
/// a read-modify-write cannot interleave with another writer.
pub trait DurableSlot: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Returns the stored payload, or `None` if nothing was ever written.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Takes the slot's exclusive lock.
    fn begin(&self) -> Result<Box<dyn SlotTransaction + '_>, StorageError>;
}

/// Exclusive access to a slot. The lock is released on drop.
pub trait SlotTransaction {
    /// Reads the payload as currently stored, seeing other writers' commits.
    fn read(&mut self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored payload. Returns once the write is durable.
    fn write(&mut self, payload: &str) -> Result<(), StorageError>;
}
