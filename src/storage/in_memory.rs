use crate::error::GapchinError;
use crate::models::{Expense, Participant};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct InMemoryStorage {
    // Roster order is significant: settlement tie-breaking follows it.
    participants: Mutex<Vec<Participant>>,
    expenses: Mutex<HashMap<String, Expense>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            participants: Mutex::new(Vec::new()),
            expenses: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_participant(&self, participant: Participant) -> Result<(), GapchinError> {
        let mut participants = self.participants.lock().await;
        match participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => participants.push(participant),
        }
        Ok(())
    }

    async fn get_participant(&self, id: &str) -> Result<Option<Participant>, GapchinError> {
        Ok(self
            .participants
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_participants(&self) -> Result<Vec<Participant>, GapchinError> {
        Ok(self.participants.lock().await.clone())
    }

    async fn remove_participant(&self, id: &str) -> Result<(), GapchinError> {
        self.participants.lock().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), GapchinError> {
        self.expenses
            .lock()
            .await
            .insert(expense.id.clone(), expense);
        Ok(())
    }

    async fn get_expense(&self, id: &str) -> Result<Option<Expense>, GapchinError> {
        Ok(self.expenses.lock().await.get(id).cloned())
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, GapchinError> {
        // For production: use a database query with ordering
        let mut expenses: Vec<Expense> = self.expenses.lock().await.values().cloned().collect();
        expenses.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    async fn remove_expense(&self, id: &str) -> Result<(), GapchinError> {
        self.expenses.lock().await.remove(id);
        Ok(())
    }
}
