//! SQL schema for the Veriface SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Identities are create-only.
-- No UPDATE or DELETE is ever issued against this table.
-- document_id carries the UNIQUE constraint that makes concurrent duplicate
-- enrollment impossible; the application-level pre-check is advisory only.
CREATE TABLE IF NOT EXISTS identities (
    identity_id TEXT PRIMARY KEY,
    full_name   TEXT NOT NULL,
    document_id TEXT NOT NULL UNIQUE,
    role        TEXT NOT NULL,
    descriptor  TEXT NOT NULL,   -- JSON array of 128 floats
    enrolled_at TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

PRAGMA user_version = 1;
";
