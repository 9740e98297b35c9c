//! SQLite-Implementierung des AppRepository

use async_trait::async_trait;
use sso_core::AppId;
use tracing::info;

use crate::error::{ist_unique_verletzung, DbError, DbResult};
use crate::models::AppRecord;
use crate::repository::AppRepository;
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl AppRepository for SqliteDb {
    async fn get_by_id(&self, id: AppId) -> DbResult<Option<AppRecord>> {
        let row = sqlx::query("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_app(&r)).transpose()
    }
}

impl SqliteDb {
    /// Legt eine App an oder aktualisiert Name und Secret einer bestehenden
    ///
    /// Apps werden nur ueber diesen Weg (Server-Konfiguration, Tests)
    /// provisioniert; der Auth-Service liest sie ausschliesslich.
    pub async fn app_provisionieren(&self, id: AppId, name: &str, secret: &str) -> DbResult<()> {
        // Provisionierte IDs muessen positiv sein
        if id.inner() <= 0 {
            return Err(DbError::UngueltigeDaten(format!("App-ID {} ist ungueltig", id.inner())));
        }
        if secret.is_empty() {
            return Err(DbError::UngueltigeDaten(format!("App '{name}' ohne Secret")));
        }

        sqlx::query(
            "INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, secret = excluded.secret",
        )
        .bind(id.inner())
        .bind(name)
        .bind(secret)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit(format!("App-Name '{name}' bereits vergeben"))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        info!(app_id = %id, name = %name, "App provisioniert");
        Ok(())
    }
}

fn row_to_app(row: &sqlx::sqlite::SqliteRow) -> DbResult<AppRecord> {
    use sqlx::Row as _;

    Ok(AppRecord {
        id: AppId(row.try_get("id")?),
        name: row.try_get("name")?,
        secret: row.try_get("secret")?,
    })
}
