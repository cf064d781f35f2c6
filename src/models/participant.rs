use serde::{Deserialize, Serialize};

/// A person in the expense-sharing group.
///
/// When `linked_payer_id` points at another participant, this participant's
/// settlement balance is absorbed by that payer (couples). They still count
/// as a normal consumer when expenses are split.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub linked_payer_id: Option<String>,
    /// Expenses created without an explicit consumer list leave birthday
    /// participants out by default. The settlement math ignores this flag.
    #[serde(default)]
    pub is_birthday: bool,
}
