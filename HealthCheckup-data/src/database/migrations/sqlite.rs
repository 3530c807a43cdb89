use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_health_records_table(conn)?;
    create_health_records_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the health records table
fn create_health_records_table(conn: &Connection) -> Result<(), String> {
    info!("Creating health_records table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS health_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_name TEXT NOT NULL,
            health_status TEXT NOT NULL,
            check_date TEXT NOT NULL,
            exam_type TEXT NOT NULL,
            height REAL,
            weight REAL,
            blood_pressure TEXT,
            blood_sugar INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create index on created_at for newest-first listing
fn create_health_records_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on created_at");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_health_records_created_at
        ON health_records (created_at DESC)",
        [],
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
