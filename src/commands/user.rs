//! User Commands
//!
//! Provisioning of the per-user root document.

use chrono::{DateTime, Utc};
use doc_store::{DocumentStore, Record, StoreResult};

use crate::models::UserRecord;
use super::user_doc;

/// Create `users/{email}` if it does not exist yet.
/// Returns `true` when the record was created by this call.
pub async fn ensure_user_record(store: &dyn DocumentStore, email: &str, now: DateTime<Utc>) -> StoreResult<bool> {
    let path = user_doc(email)?;
    if store.get(&path).await?.is_some() {
        return Ok(false);
    }
    let record = UserRecord {
        email: email.to_string(),
        created_at: now,
    };
    store.set(&path, record.to_fields()).await?;
    Ok(true)
}
