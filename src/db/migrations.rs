use std::collections::HashSet;

use color_eyre::Result;
use sqlx::SqlitePool;

// Paired with the files under migrations/. New schema changes go at the
// end; versions already recorded in schema_migrations never run again.
const MIGRATIONS: &[(&str, &str)] = &[
    ("V1", include_str!("../../migrations/V1__init.sql")),
    ("V2", include_str!("../../migrations/V2__add_attempts.sql")),
];

pub async fn run(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    let applied: HashSet<String> = sqlx::query_scalar("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

    for &(version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }

        // The migration files hold several statements each.
        sqlx::raw_sql(sql).execute(pool).await?;

        sqlx::query("INSERT INTO schema_migrations (version) VALUES ($1)")
            .bind(version)
            .execute(pool)
            .await?;

        tracing::info!(version, "applied database migration");
    }

    Ok(())
}
