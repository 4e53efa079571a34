use chrono::NaiveDate;
use log::{error, warn};

use crate::record::{LedgerRecord, RecordKind};
use crate::store::LedgerStore;

/// How many records the last-resort strategy asks for.
const LAST_RESORT_LIMIT: usize = 5;

/// Fetches a user's records for the window, trying three strategies in order
/// and settling for the first that succeeds. Strategy failures are logged and
/// swallowed; this function never propagates a store error.
///
/// 1. Range-filtered query.
/// 2. Fetch everything, filter client-side. Lower bound only: records past
///    `window_end` are kept on this path.
/// 3. The most recent five records regardless of date.
pub async fn fetch_records(
    store: &dyn LedgerStore,
    user_id: i64,
    kind: RecordKind,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<LedgerRecord> {
    match store
        .query_by_user_and_range(user_id, kind, window_start, window_end)
        .await
    {
        Ok(records) => return records,
        Err(err) => warn!(
            "Range query for {} records failed, retrying with full fetch: {}",
            kind.as_str(),
            err
        ),
    }

    match store.query_all_by_user(user_id, kind).await {
        Ok(records) => {
            return records
                .into_iter()
                .filter(|r| matches!(r.occurred_on, Some(date) if date >= window_start))
                .collect();
        }
        Err(err) => warn!(
            "Full fetch for {} records failed, falling back to latest: {}",
            kind.as_str(),
            err
        ),
    }

    match store.query_latest(user_id, kind, LAST_RESORT_LIMIT).await {
        Ok(records) => records,
        Err(err) => {
            error!(
                "Every fetch strategy for {} records failed: {}",
                kind.as_str(),
                err
            );
            Vec::new()
        }
    }
}
