use serde::{Deserialize, Serialize};

/// Account scope for manual point credits: a user's lifetime progression
/// or their progression inside one stream. The scope is a parameter of the
/// ledger operation, not a separate code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerScope {
    Global { user_id: i64 },
    Stream { stream_id: i64, user_id: i64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditPointsModel {
    pub user_id: i64,
    pub delta: i64,
    pub stream_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustCoinsModel {
    pub user_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceDto {
    pub user_id: i64,
    pub coins: i64,
}
