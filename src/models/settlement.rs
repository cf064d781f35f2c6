use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed payment instruction: `from_id` owes `to_id` the amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from_id: String,
    pub to_id: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub transactions: Vec<Transaction>,
    /// Consolidated balances per participant. Positive means the participant
    /// is owed money, negative means they owe. Linked dependents are
    /// exactly 0.
    pub balances: HashMap<String, f64>,
}
