use crate::{record::Record, Result};

pub use self::memory::MemoryStore;

pub mod memory;

/// A record store holds indexed records and can be scanned by the query
/// executor. Implementations may keep records in memory or act as an
/// adapter to an external document store.
pub trait RecordStore {
    /// Inserts a record or replaces the one with the same identifier. Fails
    /// with [`Error::InvalidRecord`](crate::Error::InvalidRecord) if the
    /// record has neither a location nor a region.
    fn put(&self, record: Record) -> Result<()>;

    /// Returns the record with the given identifier or `None` if there is no
    /// such record
    fn get(&self, id: &str) -> Result<Option<Record>>;

    /// Removes the record with the given identifier. Returns `false` if there
    /// was no such record.
    fn delete(&self, id: &str) -> Result<bool>;

    /// Returns an iterator over all records in insertion order. Every call
    /// starts a new scan.
    fn all(&self) -> Result<impl Iterator<Item = Result<Record>> + '_>;

    /// Returns the number of records in the store
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
