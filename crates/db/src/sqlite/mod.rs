//! SQLite-Implementierung der Gatehouse-Repositories

pub mod admins;
pub mod pool;
pub mod users;

pub use pool::SqliteDb;
