//! Record validation against the field tables, including reference existence

use super::StoreError;
use crate::entities::schema::{self, FieldKind, Record};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

/// Checks a full record before it is written.
///
/// Field rules are checked first; then every reference carrying a key is looked up
/// in its target table. All failures are collected into one error so the client
/// sees every offending field at once.
#[instrument(skip_all)]
pub async fn validate_record<R: Record>(pool: &SqlitePool, record: &R) -> Result<(), StoreError> {
    let mut errors = schema::check(record);

    for (rule, id) in schema::references(record) {
        if let FieldKind::Reference { table, key } = rule.kind {
            if !row_exists(pool, table, key, id).await? {
                debug!("Reference {}={} points to a missing row in {}", rule.name, id, table);
                errors.add(rule.name, schema::missing_reference(id));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        warn!("Record rejected: {}", errors);
        Err(StoreError::Validation(errors))
    }
}

async fn row_exists(
    pool: &SqlitePool,
    table: &'static str,
    key: &'static str,
    id: i64,
) -> Result<bool, sqlx::Error> {
    // table and key come from the static field tables, never from input
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {key} = ?)");
    let found: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(found != 0)
}
