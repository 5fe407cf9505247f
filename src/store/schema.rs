//! Collection tables and their index sets.
//!
//! Records are JSON documents kept whole in the `doc` column; the fields a
//! query is allowed to filter or sort on are mirrored into real columns so
//! every declared access path is backed by an index. `severity_rank` holds
//! the numeric rank of the severity enum because an index on the text column
//! would order lexicographically, which is wrong for ranking.

pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scans (
    id TEXT PRIMARY KEY,
    domain TEXT NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vulnerabilities (
    id TEXT PRIMARY KEY,
    target TEXT NOT NULL,
    severity TEXT NOT NULL,
    severity_rank INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS assets (
    id TEXT PRIMARY KEY,
    domain TEXT NOT NULL,
    asset_type TEXT NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS monitoring (
    id TEXT PRIMARY KEY,
    target TEXT NOT NULL,
    last_checked TEXT NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scans_domain_created ON scans(domain, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_scans_created ON scans(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_vulns_target_severity ON vulnerabilities(target, severity);
CREATE INDEX IF NOT EXISTS idx_vulns_rank_created ON vulnerabilities(severity_rank, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_vulns_severity ON vulnerabilities(severity);
CREATE INDEX IF NOT EXISTS idx_assets_domain_type ON assets(domain, asset_type);
CREATE INDEX IF NOT EXISTS idx_reports_created ON reports(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_monitoring_target_checked ON monitoring(target, last_checked DESC);
";
