#![forbid(unsafe_code)]

pub mod records;
pub mod repository;
pub mod sqlite;

pub use records::LocalRecords;
pub use repository::{Storage, StorageError};
