//! Star-schema DDL for the recruiting warehouse.

/// Set on every connection; SQLite does not persist it.
pub const CONNECTION_PRAGMAS: &str = "
PRAGMA foreign_keys = ON;
";

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dim_candidate (
    candidate_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    email        TEXT NOT NULL UNIQUE
);

-- date_sk is derived from the date (YYYYMMDD), not generated.
CREATE TABLE IF NOT EXISTS dim_date (
    date_sk   INTEGER PRIMARY KEY,
    full_date TEXT    NOT NULL UNIQUE,   -- ISO 8601 day
    year      INTEGER NOT NULL,
    month     INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    day       INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
    quarter   INTEGER NOT NULL CHECK (quarter BETWEEN 1 AND 4)
);

CREATE TABLE IF NOT EXISTS dim_location (
    location_sk INTEGER PRIMARY KEY AUTOINCREMENT,
    country     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS dim_technology (
    technology_sk   INTEGER PRIMARY KEY AUTOINCREMENT,
    technology_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS dim_seniority (
    seniority_sk   INTEGER PRIMARY KEY AUTOINCREMENT,
    seniority_name TEXT NOT NULL UNIQUE
);

-- One row per application event. Append-only.
CREATE TABLE IF NOT EXISTS fact_application (
    application_sk            INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_sk              INTEGER NOT NULL REFERENCES dim_candidate(candidate_sk),
    seniority_sk              INTEGER NOT NULL REFERENCES dim_seniority(seniority_sk),
    technology_sk             INTEGER NOT NULL REFERENCES dim_technology(technology_sk),
    location_sk               INTEGER NOT NULL REFERENCES dim_location(location_sk),
    date_sk                   INTEGER NOT NULL REFERENCES dim_date(date_sk),
    yoe                       INTEGER NOT NULL,
    code_challenge_score      INTEGER NOT NULL,
    technical_interview_score INTEGER NOT NULL,
    is_hired                  INTEGER NOT NULL CHECK (is_hired IN (0, 1))
);

CREATE INDEX IF NOT EXISTS fact_application_candidate_idx  ON fact_application(candidate_sk);
CREATE INDEX IF NOT EXISTS fact_application_seniority_idx  ON fact_application(seniority_sk);
CREATE INDEX IF NOT EXISTS fact_application_technology_idx ON fact_application(technology_sk);
CREATE INDEX IF NOT EXISTS fact_application_location_idx   ON fact_application(location_sk);
CREATE INDEX IF NOT EXISTS fact_application_date_idx       ON fact_application(date_sk);
";
