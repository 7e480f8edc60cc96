pub mod statistics;
pub mod transaction_manager;

pub use statistics::StatisticsService;
pub use transaction_manager::TransactionManager;
