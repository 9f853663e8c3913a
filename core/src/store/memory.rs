use std::{collections::BTreeMap, ops::Bound};

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::RecordStore;
use crate::{record::Record, Error, Result};

#[derive(Debug, Default)]
struct Records {
    /// Sequence number assigned to the next new record
    next_seq: u64,

    /// Records ordered by the sequence number of their first insertion
    by_seq: BTreeMap<u64, Record>,

    /// Maps identifiers to sequence numbers
    seq_by_id: FxHashMap<String, u64>,
}

/// An implementation of the [`RecordStore`] trait keeping all records in
/// memory
///
/// A scan returned by [`RecordStore::all`] holds a read lock until it is
/// dropped. Writers wait for all running scans, and scans never see a
/// half-applied write. Do not call [`RecordStore::put`] or
/// [`RecordStore::delete`] from a thread that still holds a scan.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn put(&self, record: Record) -> Result<()> {
        if !record.is_indexable() {
            return Err(Error::InvalidRecord {
                id: record.id().to_string(),
            });
        }

        let mut guard = self.records.write();
        let records = &mut *guard;
        let seq = match records.seq_by_id.get(record.id()) {
            Some(&seq) => {
                debug!(id = record.id(), "replacing record");
                seq
            }
            None => {
                let seq = records.next_seq;
                records.next_seq += 1;
                records.seq_by_id.insert(record.id().to_string(), seq);
                seq
            }
        };
        records.by_seq.insert(seq, record);

        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Record>> {
        // recursive so a lookup during a scan on the same thread cannot
        // deadlock behind a waiting writer
        let records = self.records.read_recursive();
        Ok(records
            .seq_by_id
            .get(id)
            .and_then(|seq| records.by_seq.get(seq))
            .cloned())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write();
        Ok(match records.seq_by_id.remove(id) {
            Some(seq) => {
                records.by_seq.remove(&seq);
                debug!(id, "deleted record");
                true
            }
            None => false,
        })
    }

    fn all(&self) -> Result<impl Iterator<Item = Result<Record>> + '_> {
        Ok(Scan {
            records: self.records.read(),
            cursor: Bound::Unbounded,
        })
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read_recursive().by_seq.len())
    }
}

/// Iterates over the records of a [`MemoryStore`] while holding its read
/// lock
struct Scan<'a> {
    records: RwLockReadGuard<'a, Records>,

    /// Sequence number of the last record returned
    cursor: Bound<u64>,
}

impl Iterator for Scan<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&seq, record) = self
            .records
            .by_seq
            .range((self.cursor, Bound::Unbounded))
            .next()?;
        self.cursor = Bound::Excluded(seq);
        Some(Ok(record.clone()))
    }
}
