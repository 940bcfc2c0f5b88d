pub mod client;
pub mod error;
pub mod response;

pub use client::{EapiClient, EapiOptions, Transport};
pub use error::EapiError;
pub use response::{ArpEntry, EntryType, MacTableEntry};
