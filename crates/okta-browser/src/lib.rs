pub mod directory;
pub mod entry;
pub mod profile;

pub use directory::{Directory, DirectoryError};
pub use entry::{DirectoryEntry, EntryId};
pub use profile::{FieldValue, Login, ProfileRecord};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
