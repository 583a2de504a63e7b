//! Database schema and migrations for files-manager.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded. Identifiers are UUIDs stored as 16-byte BLOBs.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
CREATE TABLE users (
    id          BLOB PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 PHC string
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: File entries (folders, files and images)
    r#"
CREATE TABLE files (
    id          BLOB PRIMARY KEY,
    user_id     BLOB NOT NULL REFERENCES users(id),
    name        TEXT NOT NULL,
    type        TEXT NOT NULL,           -- 'folder', 'file', 'image'
    is_public   INTEGER NOT NULL DEFAULT 0,
    parent_id   BLOB REFERENCES files(id),  -- NULL for entries at the root
    local_path  TEXT,                    -- NULL for folders
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id);
"#,
    // v3: Key-value cache with absolute expiry (epoch milliseconds)
    r#"
CREATE TABLE cache (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    expires_at  INTEGER NOT NULL
);

CREATE INDEX idx_cache_expires_at ON cache(expires_at);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert_eq!(MIGRATIONS.len(), 3);
        assert!(MIGRATIONS.iter().all(|m| !m.trim().is_empty()));
    }

    #[test]
    fn test_migrations_create_core_tables() {
        let all = MIGRATIONS.join("\n");
        assert!(all.contains("CREATE TABLE users"));
        assert!(all.contains("CREATE TABLE files"));
        assert!(all.contains("CREATE TABLE cache"));
    }
}
