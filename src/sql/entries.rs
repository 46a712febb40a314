//! Statements against the `entries` table.

pub const ENTRIES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        id SERIAL PRIMARY KEY,
        title VARCHAR(127) NOT NULL,
        text TEXT NOT NULL,
        created TIMESTAMP NOT NULL
    )"#;

pub const ENTRIES_CREATED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS entries_created_idx ON entries (created DESC)";

pub const INSERT_ENTRY: &str = r#"
    INSERT INTO entries (title, text, created) VALUES ($1, $2, $3)
    RETURNING id, title, text, created"#;

pub const LIST_ENTRIES: &str = r#"
    SELECT id, title, text, created FROM entries ORDER BY created DESC, id DESC"#;

pub const SELECT_ENTRY: &str = r#"
    SELECT id, title, text, created FROM entries WHERE id = $1"#;

pub const UPDATE_ENTRY: &str = r#"
    UPDATE entries SET title = $1, text = $2, created = $3 WHERE id = $4
    RETURNING id, title, text, created"#;

pub const ENTRIES_REACHABLE: &str = "SELECT 1 FROM entries LIMIT 1";
