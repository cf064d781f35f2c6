use crate::models::{Expense, Participant, Transaction};
use crate::summary::SummaryGenerator;
use async_trait::async_trait;
use std::collections::HashMap;

/// Built-in message formatter, used when no external text generator is
/// configured. Produces the same WhatsApp-style give-and-take rundown the
/// app shares after a gathering.
pub struct TemplateSummary;

impl TemplateSummary {
    pub fn new() -> Self {
        TemplateSummary
    }
}

#[async_trait]
impl SummaryGenerator for TemplateSummary {
    async fn generate(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
        transactions: &[Transaction],
    ) -> String {
        let names: HashMap<&str, &str> = participants
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();
        let display = |id: &str| names.get(id).copied().unwrap_or("Unknown");

        let total: f64 = expenses.iter().map(|e| e.amount).sum();

        let mut message = String::new();
        message.push_str("大家好! 今次聚會嘅數目計好啦 💰\n");
        message.push_str(&format!("總支出: ${:.2}\n", total));

        if !expenses.is_empty() {
            message.push_str("\n費用清單:\n");
            for expense in expenses {
                message.push_str(&format!(
                    "- {}: ${:.2} ({} 先付)\n",
                    expense.title,
                    expense.amount,
                    display(&expense.payer_id)
                ));
            }
        }

        if transactions.is_empty() {
            message.push_str("\n唔使找數, 大家已經平手! 🎉\n");
        } else {
            message.push_str("\n找數安排:\n");
            for transaction in transactions {
                message.push_str(&format!(
                    "👉 {} 俾 {} ${:.2}\n",
                    display(&transaction.from_id),
                    display(&transaction.to_id),
                    transaction.amount
                ));
            }
        }

        message.push_str("\n記得用 PayMe/FPS 找數呀 🙏");
        message
    }
}
