pub mod in_memory;

use crate::error::GapchinError;
use crate::models::{Expense, Participant};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_participant(&self, participant: Participant) -> Result<(), GapchinError>;
    async fn get_participant(&self, id: &str) -> Result<Option<Participant>, GapchinError>;
    async fn list_participants(&self) -> Result<Vec<Participant>, GapchinError>;
    async fn remove_participant(&self, id: &str) -> Result<(), GapchinError>;

    async fn save_expense(&self, expense: Expense) -> Result<(), GapchinError>;
    async fn get_expense(&self, id: &str) -> Result<Option<Expense>, GapchinError>;
    async fn list_expenses(&self) -> Result<Vec<Expense>, GapchinError>;
    async fn remove_expense(&self, id: &str) -> Result<(), GapchinError>;
}
