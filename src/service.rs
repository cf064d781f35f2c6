use crate::cache::Cache;
use crate::constants::{
    BIRTHDAY_TOGGLED, EXPENSE_ADDED, EXPENSE_REMOVED, PARTICIPANT_ADDED, PARTICIPANT_REMOVED,
    PAYER_LINK_UPDATED, SETTLEMENT_CACHE_TTL_SECS, SETTLEMENT_CALCULATED, SUMMARY_GENERATED,
};
use crate::engine;
use crate::error::{FieldError, GapchinError};
use crate::logger::LoggingService;
use crate::models::{AppLog, Expense, Participant, SettlementResult};
use crate::storage::Storage;
use crate::summary::SummaryGenerator;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

pub struct GapchinService<L: LoggingService, S: Storage, C: Cache, G: SummaryGenerator> {
    storage: S,
    logging: L,
    cache: C,
    summary: G,
}

impl<L: LoggingService, S: Storage, C: Cache, G: SummaryGenerator> GapchinService<L, S, C, G> {
    pub fn new(storage: S, logging: L, cache: C, summary: G) -> Self {
        GapchinService {
            storage,
            logging,
            cache,
            summary,
        }
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), GapchinError> {
        if value.trim().is_empty() {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    // Amounts are accepted at full precision; rounding only happens inside
    // the settlement math.
    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), GapchinError> {
        if !amount.is_finite() {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if amount < 0.0 {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount cannot be negative".to_string(),
                },
            ));
        }
        if amount > 1_000_000.0 {
            return Err(GapchinError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: "Amount cannot exceed 1,000,000".to_string(),
                },
            ));
        }
        Ok(())
    }

    // PARTICIPANTS

    pub async fn add_participant(&self, name: String) -> Result<Participant, GapchinError> {
        self.validate_string_input("name", &name, 100)?;
        info!("Adding participant '{}'", name.trim());

        let participant = Participant {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            linked_payer_id: None,
            is_birthday: false,
        };

        self.storage.save_participant(participant.clone()).await?;
        self.cache.invalidate_settlement().await?;

        self.logging
            .log_action(
                PARTICIPANT_ADDED,
                json!({ "participant_id": participant.id, "name": participant.name }),
                Some(participant.id.as_str()),
            )
            .await?;

        Ok(participant)
    }

    pub async fn get_participant(&self, id: &str) -> Result<Option<Participant>, GapchinError> {
        self.storage.get_participant(id).await
    }

    pub async fn list_participants(&self) -> Result<Vec<Participant>, GapchinError> {
        self.storage.list_participants().await
    }

    pub async fn remove_participant(&self, id: &str) -> Result<(), GapchinError> {
        let participant = self
            .storage
            .get_participant(id)
            .await?
            .ok_or_else(|| GapchinError::ParticipantNotFound(id.to_string()))?;

        // Links and expense references pointing here go stale; the engine
        // degrades those softly rather than erroring.
        self.storage.remove_participant(id).await?;
        self.cache.invalidate_settlement().await?;

        self.logging
            .log_action(
                PARTICIPANT_REMOVED,
                json!({ "participant_id": id, "name": participant.name }),
                None,
            )
            .await?;

        Ok(())
    }

    /// Link a participant's settlement balance to another payer, or unlink
    /// with `None`. Links must form a forest of depth 1: the target cannot
    /// itself be linked, and a participant with dependents cannot become one.
    pub async fn set_linked_payer(
        &self,
        participant_id: &str,
        linked_payer_id: Option<String>,
    ) -> Result<Participant, GapchinError> {
        let mut participant = self
            .storage
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| GapchinError::ParticipantNotFound(participant_id.to_string()))?;

        if let Some(payer_id) = &linked_payer_id {
            if payer_id == participant_id {
                warn!("Participant {} attempted to link to themselves", participant_id);
                return Err(GapchinError::SelfLink(participant_id.to_string()));
            }

            let payer = self
                .storage
                .get_participant(payer_id)
                .await?
                .ok_or_else(|| GapchinError::ParticipantNotFound(payer_id.clone()))?;
            if payer.linked_payer_id.is_some() {
                warn!(
                    "Participant {} attempted to link to {}, who is already a dependent",
                    participant_id, payer_id
                );
                return Err(GapchinError::LinkedPayerUnavailable(payer_id.clone()));
            }

            let participants = self.storage.list_participants().await?;
            if participants
                .iter()
                .any(|p| p.linked_payer_id.as_deref() == Some(participant_id))
            {
                warn!(
                    "Participant {} has dependents and cannot become one",
                    participant_id
                );
                return Err(GapchinError::HasDependents(participant_id.to_string()));
            }
        }

        participant.linked_payer_id = linked_payer_id.clone();
        self.storage.save_participant(participant.clone()).await?;
        self.cache.invalidate_settlement().await?;

        self.logging
            .log_action(
                PAYER_LINK_UPDATED,
                json!({ "participant_id": participant_id, "linked_payer_id": linked_payer_id }),
                Some(participant_id),
            )
            .await?;

        Ok(participant)
    }

    pub async fn set_birthday(
        &self,
        participant_id: &str,
        is_birthday: bool,
    ) -> Result<Participant, GapchinError> {
        let mut participant = self
            .storage
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| GapchinError::ParticipantNotFound(participant_id.to_string()))?;

        participant.is_birthday = is_birthday;
        self.storage.save_participant(participant.clone()).await?;

        self.logging
            .log_action(
                BIRTHDAY_TOGGLED,
                json!({ "participant_id": participant_id, "is_birthday": is_birthday }),
                Some(participant_id),
            )
            .await?;

        Ok(participant)
    }

    // EXPENSES

    /// Record a shared expense. With no explicit consumer list, everyone on
    /// the roster shares it except birthday participants.
    pub async fn add_expense(
        &self,
        title: String,
        amount: f64,
        payer_id: &str,
        involved_user_ids: Option<Vec<String>>,
    ) -> Result<Expense, GapchinError> {
        self.validate_string_input("title", &title, 255)?;
        self.validate_amount_input("amount", amount)?;

        let participants = self.storage.list_participants().await?;
        if !participants.iter().any(|p| p.id == payer_id) {
            return Err(GapchinError::ParticipantNotFound(payer_id.to_string()));
        }

        let involved = match involved_user_ids {
            Some(ids) => {
                for id in &ids {
                    if !participants.iter().any(|p| p.id == *id) {
                        return Err(GapchinError::ParticipantNotFound(id.clone()));
                    }
                }
                ids
            }
            None => participants
                .iter()
                .filter(|p| !p.is_birthday)
                .map(|p| p.id.clone())
                .collect(),
        };

        if involved.is_empty() {
            return Err(GapchinError::InvalidInput(
                "involved_user_ids".to_string(),
                FieldError {
                    field: "involved_user_ids".to_string(),
                    title: "Invalid consumer list".to_string(),
                    description: "At least one participant must share the expense".to_string(),
                },
            ));
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            title,
            amount,
            payer_id: payer_id.to_string(),
            involved_user_ids: involved,
            timestamp: Utc::now(),
        };

        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_settlement().await?;

        self.logging
            .log_action(
                EXPENSE_ADDED,
                json!({
                    "expense_id": expense.id,
                    "title": expense.title,
                    "amount": expense.amount,
                    "payer_id": expense.payer_id,
                    "involved": expense.involved_user_ids.len()
                }),
                Some(payer_id),
            )
            .await?;

        Ok(expense)
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, GapchinError> {
        self.storage.list_expenses().await
    }

    pub async fn remove_expense(&self, id: &str) -> Result<(), GapchinError> {
        let expense = self
            .storage
            .get_expense(id)
            .await?
            .ok_or_else(|| GapchinError::ExpenseNotFound(id.to_string()))?;

        self.storage.remove_expense(id).await?;
        self.cache.invalidate_settlement().await?;

        self.logging
            .log_action(
                EXPENSE_REMOVED,
                json!({ "expense_id": id, "title": expense.title }),
                None,
            )
            .await?;

        Ok(())
    }

    // SETTLEMENT & SUMMARY

    pub async fn get_settlement(&self) -> Result<SettlementResult, GapchinError> {
        if let Some(result) = self.cache.get_settlement().await? {
            debug!("Settlement served from cache");
            return Ok(result);
        }

        let participants = self.storage.list_participants().await?;
        let expenses = self.storage.list_expenses().await?;
        let result = engine::calculate_settlement(&participants, &expenses);

        self.cache
            .save_settlement(&result, Duration::from_secs(SETTLEMENT_CACHE_TTL_SECS))
            .await?;

        self.logging
            .log_action(
                SETTLEMENT_CALCULATED,
                json!({
                    "participants": participants.len(),
                    "expenses": expenses.len(),
                    "transactions": result.transactions.len()
                }),
                None,
            )
            .await?;

        Ok(result)
    }

    pub async fn generate_summary(&self) -> Result<String, GapchinError> {
        let participants = self.storage.list_participants().await?;
        let expenses = self.storage.list_expenses().await?;
        let settlement = self.get_settlement().await?;

        let message = self
            .summary
            .generate(&participants, &expenses, &settlement.transactions)
            .await;

        self.logging
            .log_action(
                SUMMARY_GENERATED,
                json!({ "transactions": settlement.transactions.len() }),
                None,
            )
            .await?;

        Ok(message)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, GapchinError> {
        self.logging.get_logs().await
    }
}
