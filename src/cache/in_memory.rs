use crate::cache::Cache;
use crate::error::GapchinError;
use crate::models::SettlementResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

pub struct InMemoryCache {
    settlement: RwLock<Option<(SettlementResult, chrono::DateTime<chrono::Utc>)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            settlement: RwLock::new(None),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_settlement(&self) -> Result<Option<SettlementResult>, GapchinError> {
        let cached = self.settlement.read().await;
        match cached.as_ref() {
            Some((result, expiry)) if *expiry > chrono::Utc::now() => Ok(Some(result.clone())),
            _ => Ok(None),
        }
    }

    async fn save_settlement(
        &self,
        result: &SettlementResult,
        ttl: std::time::Duration,
    ) -> Result<(), GapchinError> {
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| GapchinError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cached = self.settlement.write().await;
        *cached = Some((result.clone(), expiry));
        Ok(())
    }

    async fn invalidate_settlement(&self) -> Result<(), GapchinError> {
        let mut cached = self.settlement.write().await;
        *cached = None;
        Ok(())
    }
}
