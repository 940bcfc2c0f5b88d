pub mod config;
pub mod correlate;
pub mod error;
pub mod mac;
pub mod report;
pub mod resolve;

pub use config::Config;
pub use correlate::{Correlation, InterfaceFilter, ResolvedHost, UnresolvedHost, correlate};
pub use error::CoreError;
pub use mac::MacAddr;
