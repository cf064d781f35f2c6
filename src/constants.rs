/// Balances within this tolerance of zero count as settled.
pub const SETTLE_TOLERANCE: f64 = 0.01;

/// How long a computed settlement stays cached before recomputation.
pub const SETTLEMENT_CACHE_TTL_SECS: u64 = 3600;

// Audit action names.
pub const PARTICIPANT_ADDED: &str = "PARTICIPANT_ADDED";
pub const PARTICIPANT_REMOVED: &str = "PARTICIPANT_REMOVED";
pub const PAYER_LINK_UPDATED: &str = "PAYER_LINK_UPDATED";
pub const BIRTHDAY_TOGGLED: &str = "BIRTHDAY_TOGGLED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_REMOVED: &str = "EXPENSE_REMOVED";
pub const SETTLEMENT_CALCULATED: &str = "SETTLEMENT_CALCULATED";
pub const SUMMARY_GENERATED: &str = "SUMMARY_GENERATED";
