pub mod template;

use crate::models::{Expense, Participant, Transaction};
use async_trait::async_trait;

/// Turns a computed settlement into a shareable, human-readable message.
///
/// Implementations receive the settlement data read-only and never fail:
/// whatever goes wrong downstream (missing credential, upstream outage) they
/// return descriptive fallback text, so the settlement itself is unaffected.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
        transactions: &[Transaction],
    ) -> String;
}
