//! madbudget-domain
//!
//! Pure domain models (pay periods, week bins, transactions, allocations, settings).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod allocation;
pub mod period;
pub mod settings;
pub mod transaction;

pub use allocation::*;
pub use period::*;
pub use settings::*;
pub use transaction::*;
