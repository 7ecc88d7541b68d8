//! SQLite-Implementierung des UserRepository

use std::str::FromStr;

use chrono::Utc;
use uuid::Uuid;

use gatehouse_core::KontoStatus;

use crate::error::{DbError, DbResult};
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::UserRepository;
use crate::sqlite::pool::SqliteDb;

const BENUTZER_SPALTEN: &str =
    "u.id, u.username, u.email, u.password_hash, s.status, u.created_at";

impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, status_id, created_at)
             VALUES (?, ?, ?, ?, (SELECT id FROM user_status WHERE status = ?), ?)",
        )
        .bind(id.to_string())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.status.als_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!(
                    "Benutzername '{}' oder E-Mail '{}' bereits vergeben",
                    data.username, data.email
                ))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id,
            username: data.username.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            status: data.status,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM users u
             JOIN user_status s ON u.status_id = s.id WHERE u.id = ?"
        );
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_name(&self, username: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM users u
             JOIN user_status s ON u.status_id = s.id WHERE u.username = ?"
        );
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM users u
             JOIN user_status s ON u.status_id = s.id WHERE u.email = ?"
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn exists_name_or_email(&self, username: &str, email: &str) -> DbResult<bool> {
        let anzahl: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = ? OR email = ?",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(anzahl > 0)
    }

    async fn list_by_status(&self, status: KontoStatus) -> DbResult<Vec<BenutzerRecord>> {
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM users u
             JOIN user_status s ON u.status_id = s.id WHERE s.status = ?"
        );
        let rows = sqlx::query(&sql)
            .bind(status.als_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_benutzer).collect()
    }

    async fn set_status(&self, id: Uuid, status: KontoStatus) -> DbResult<()> {
        // Status-Referenzzeile explizit aufloesen statt Subquery, damit eine
        // fehlende Zeile von einer unbekannten Benutzer-ID unterscheidbar ist
        let status_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM user_status WHERE status = ?")
                .bind(status.als_str())
                .fetch_optional(&self.pool)
                .await?;

        let status_id = status_id.ok_or_else(|| {
            DbError::UngueltigeDaten(format!("Status '{status}' nicht angelegt"))
        })?;

        let affected = sqlx::query("UPDATE users SET status_id = ? WHERE id = ?")
            .bind(status_id)
            .bind(id.to_string())
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

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let status_str: String = row.try_get("status")?;
    let status = KontoStatus::from_str(&status_str)
        .map_err(|e| DbError::intern(e.to_string()))?;

    Ok(BenutzerRecord {
        id,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        status,
        created_at,
    })
}
