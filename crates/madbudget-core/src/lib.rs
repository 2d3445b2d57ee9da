//! madbudget-core
//!
//! Week partitioning, budget aggregation and the services around them.
//! Depends on madbudget-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod allocation;
pub mod error;
pub mod partition;
pub mod settings_service;
pub mod storage;
pub mod time;
pub mod transaction_service;

pub use allocation::*;
pub use error::CoreError;
pub use partition::*;
pub use settings_service::*;
pub use storage::*;
pub use time::*;
pub use transaction_service::*;

#[cfg(test)]
mod tests;
