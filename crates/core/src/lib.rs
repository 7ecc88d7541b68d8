//! gatehouse-core – Gemeinsame Domaenentypen
//!
//! Der Konto-Lebenszyklus (PENDING/APPROVED/REJECTED) und die zugehoerigen
//! Admin-Aktionen werden hier definiert, damit DB-, Auth- und Server-Crate
//! dieselben Typen verwenden.

pub mod error;
pub mod types;

pub use error::ParseFehler;
pub use types::{KontoStatus, StatusAktion};
