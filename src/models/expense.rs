use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared expense paid up-front by one participant and split equally
/// among everyone in `involved_user_ids`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub payer_id: String,
    pub involved_user_ids: Vec<String>,
    /// Creation order, used for display only.
    pub timestamp: DateTime<Utc>,
}
