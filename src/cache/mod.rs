pub mod in_memory;

use crate::error::GapchinError;
use crate::models::SettlementResult;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_settlement(&self) -> Result<Option<SettlementResult>, GapchinError>;
    async fn save_settlement(
        &self,
        result: &SettlementResult,
        ttl: std::time::Duration,
    ) -> Result<(), GapchinError>;
    async fn invalidate_settlement(&self) -> Result<(), GapchinError>;
}
