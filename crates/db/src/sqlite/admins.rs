//! SQLite-Implementierung des AdminRepository

use chrono::Utc;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{AdminRecord, NeuerAdmin};
use crate::repository::AdminRepository;
use crate::sqlite::pool::SqliteDb;

impl AdminRepository for SqliteDb {
    async fn get_by_name(&self, username: &str) -> DbResult<Option<AdminRecord>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_admin(&r)).transpose()
    }

    async fn create(&self, data: NeuerAdmin<'_>) -> DbResult<AdminRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO admins (id, username, email, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("Admin '{}' bereits vorhanden", data.username))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(AdminRecord {
            id,
            username: data.username.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            created_at: now,
        })
    }
}

fn row_to_admin(row: &sqlx::sqlite::SqliteRow) -> DbResult<AdminRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(AdminRecord {
        id,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admin_anlegen_und_laden() {
        let db = SqliteDb::in_memory().await.unwrap();

        let angelegt = db
            .create(NeuerAdmin {
                username: "admin",
                email: "admin@x.com",
                password_hash: "$argon2id$platzhalter",
            })
            .await
            .unwrap();

        let geladen = db.get_by_name("admin").await.unwrap().unwrap();
        assert_eq!(geladen.id, angelegt.id);
        assert_eq!(geladen.email, "admin@x.com");
    }

    #[tokio::test]
    async fn unbekannter_admin_ist_none() {
        let db = SqliteDb::in_memory().await.unwrap();
        assert!(db.get_by_name("niemand").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn doppelter_admin_ist_eindeutigkeitsfehler() {
        let db = SqliteDb::in_memory().await.unwrap();
        let neuer = NeuerAdmin {
            username: "admin",
            email: "admin@x.com",
            password_hash: "$argon2id$platzhalter",
        };
        db.create(neuer.clone()).await.unwrap();

        let ergebnis = db.create(neuer).await;
        assert!(matches!(ergebnis, Err(DbError::Eindeutigkeit(_))));
    }
}
