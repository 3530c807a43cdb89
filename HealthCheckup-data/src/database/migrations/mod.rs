// Schema bootstrap. Only idempotent CREATE ... IF NOT EXISTS statements live here.
mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
