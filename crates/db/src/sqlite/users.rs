//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sso_core::UserId;

use crate::error::{ist_unique_verletzung, DbError, DbResult};
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::UserRepository;
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<UserId> {
        let now_str = Utc::now().to_rfc3339();

        let ergebnis = sqlx::query(
            "INSERT INTO users (email, pass_hash, is_admin, created_at)
             VALUES (?, ?, 0, ?)",
        )
        .bind(data.email)
        .bind(data.pass_hash)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits registriert", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(UserId(ergebnis.last_insert_rowid()))
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, email, pass_hash, is_admin, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn ist_admin(&self, id: UserId) -> DbResult<Option<bool>> {
        let flag: Option<i64> = sqlx::query_scalar("SELECT is_admin FROM users WHERE id = ?")
            .bind(id.inner())
            .fetch_optional(&self.pool)
            .await?;

        Ok(flag.map(|v| v != 0))
    }
}

impl SqliteDb {
    /// Setzt das Admin-Flag eines Benutzers (Provisionierung ausserhalb der Service-API)
    pub async fn admin_setzen(&self, id: UserId, admin: bool) -> DbResult<()> {
        let affected = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(admin as i64)
            .bind(id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("User {id}")));
        }
        Ok(())
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    use sqlx::Row as _;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let is_admin: i64 = row.try_get("is_admin")?;

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        email: row.try_get("email")?,
        pass_hash: row.try_get("pass_hash")?,
        is_admin: is_admin != 0,
        created_at,
    })
}
