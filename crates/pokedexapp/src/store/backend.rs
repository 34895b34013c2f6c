use crate::error::Result;
use crate::model::Record;

/// Raw persistence for a record set.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::record_store::BackedStore`] handles the "what": filtering,
/// slicing and id assignment.
pub trait StorageBackend: Send + Sync {
    /// Load every persisted record, in insertion order.
    /// An absent store is an empty one.
    fn load_records(&self) -> Result<Vec<Record>>;

    /// Persist the full record set.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_records(&self, records: &[Record]) -> Result<()>;

    /// Human readable location, for logs.
    fn location(&self) -> String;
}
