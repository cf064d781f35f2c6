pub mod audit;
pub mod expense;
pub mod participant;
pub mod settlement;

pub use audit::AppLog;
pub use expense::Expense;
pub use participant::Participant;
pub use settlement::{SettlementResult, Transaction};
