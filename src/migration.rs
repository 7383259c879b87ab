//! Schema bootstrap: create the schema, every resource table and its ordering index.

use crate::config::ResolvedModel;
use crate::error::StoreError;
use crate::sql;
use sqlx::PgPool;

/// Idempotent: every statement is `IF NOT EXISTS`, so existing tables are left as they are.
pub async fn apply_migrations(pool: &PgPool, model: &ResolvedModel) -> Result<(), StoreError> {
    for table in &model.tables {
        sqlx::query(&sql::create_schema(table)).execute(pool).await?;
        sqlx::query(&sql::create_table(table)).execute(pool).await?;
        if let Some(index) = sql::create_order_index(table) {
            sqlx::query(&index).execute(pool).await?;
        }
        tracing::info!(table = %table.table_name, "table ensured");
    }
    Ok(())
}
