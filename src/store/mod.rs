//! Record store boundary and reference implementation

pub mod in_memory;
pub mod service;

pub use in_memory::InMemoryRecordStore;
pub use service::RecordStore;
