pub mod statistics;
pub mod transaction;

pub use statistics::Statistics;
pub use transaction::{Transaction, TransactionRequest};
