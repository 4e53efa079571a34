use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::record::{LedgerRecord, RecordKind, UserProfile};

/// Read-only contract to wherever ledger records live.
///
/// Implementations back onto a database, a remote API, or an in-memory store in
/// tests. All three query shapes must tolerate both record kinds.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Records for a user with `occurred_on` inside `[start, end]`.
    async fn query_by_user_and_range(
        &self,
        user_id: i64,
        kind: RecordKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerRecord>>;

    /// Every record for a user, newest first.
    async fn query_all_by_user(&self, user_id: i64, kind: RecordKind)
        -> Result<Vec<LedgerRecord>>;

    /// The `limit` most recent records for a user, newest first.
    async fn query_latest(
        &self,
        user_id: i64,
        kind: RecordKind,
        limit: usize,
    ) -> Result<Vec<LedgerRecord>>;
}

/// Profile lookup. A missing profile aborts an analysis request outright, so
/// this is the one collaborator whose absence is a hard error.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_by_id(&self, user_id: i64) -> Result<Option<UserProfile>>;
}
