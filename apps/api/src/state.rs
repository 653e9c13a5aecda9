//! Shared handler state.

use chrono::FixedOffset;
use kasir_db::Database;

/// State cloned into every handler.
///
/// `Database` wraps a pool handle, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,

    /// Zone whose calendar days the reports use.
    pub report_offset: FixedOffset,
}

impl AppState {
    pub fn new(db: Database, report_offset: FixedOffset) -> Self {
        AppState { db, report_offset }
    }
}
