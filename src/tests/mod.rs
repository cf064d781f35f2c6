mod participant_tests;
mod settlement_tests;

use crate::cache::in_memory::InMemoryCache;
use crate::logger::in_memory::InMemoryLogging;
use crate::service::GapchinService;
use crate::storage::in_memory::InMemoryStorage;
use crate::summary::template::TemplateSummary;

pub fn create_test_service() -> GapchinService<InMemoryLogging, InMemoryStorage, InMemoryCache, TemplateSummary> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    GapchinService::new(storage, logging, cache, TemplateSummary::new())
}
