//! gatehouse-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit: die Geschaeftslogik
//! spricht ausschliesslich mit den Traits in [`repository`], die konkrete
//! SQLite-Implementierung lebt in [`sqlite`]. Der Status eines Benutzers
//! wird als Referenzzeile (`user_status`) gespeichert und beim Lesen auf
//! das `KontoStatus`-Enum abgebildet.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use repository::{AdminRepository, DatabaseConfig, UserRepository};
pub use sqlite::pool::SqliteDb;
