use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params_from_iter;
use serde_json::{Map, Value};

use crate::errors::DashError;
use crate::models::Severity;

use super::Store;

/// The five record collections the store provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Scans,
    Vulnerabilities,
    Assets,
    Reports,
    Monitoring,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Scans => "scans",
            Collection::Vulnerabilities => "vulnerabilities",
            Collection::Assets => "assets",
            Collection::Reports => "reports",
            Collection::Monitoring => "monitoring",
        }
    }

    /// Maps a document field to its mirrored column, for fields an index
    /// covers on this collection. Anything else is rejected rather than
    /// degrading into a full scan.
    fn filter_column(&self, field: &str) -> Option<&'static str> {
        match (self, field) {
            (Collection::Scans, "domain") => Some("domain"),
            (Collection::Scans, "created_at") => Some("created_at"),
            (Collection::Vulnerabilities, "target") => Some("target"),
            (Collection::Vulnerabilities, "severity") => Some("severity"),
            (Collection::Vulnerabilities, "created_at") => Some("created_at"),
            (Collection::Assets, "domain") => Some("domain"),
            (Collection::Assets, "type") => Some("asset_type"),
            (Collection::Reports, "created_at") => Some("created_at"),
            (Collection::Monitoring, "target") => Some("target"),
            (Collection::Monitoring, "last_checked") => Some("last_checked"),
            _ => None,
        }
    }

    /// Like [`filter_column`], plus the rank substitution: ordering
    /// vulnerabilities by severity goes through `severity_rank`, where rank
    /// 0 is critical, so "most severe first" is ascending rank. The flag
    /// tells the query builder to invert the requested direction.
    fn sort_column(&self, field: &str) -> Option<(&'static str, bool)> {
        match (self, field) {
            (Collection::Vulnerabilities, "severity") => Some(("severity_rank", true)),
            _ => self.filter_column(field).map(|col| (col, false)),
        }
    }
}

/// Conjunction of field = value clauses against indexed fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(&'static str, String)>,
}

impl Filter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self { clauses: vec![(field, value.into())] }
    }

    pub fn and_eq(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.clauses.push((field, value.into()));
        self
    }

    fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Timestamps are stored as fixed-width RFC 3339 UTC strings so that the
/// text indexes order them chronologically.
fn normalize_timestamp(value: Option<&Value>) -> Result<String, DashError> {
    match value {
        None => Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        Some(Value::String(s)) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .map_err(|e| DashError::Query(format!("Invalid timestamp '{}': {}", s, e)))?;
            Ok(parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Micros, true))
        }
        Some(_) => Err(DashError::Query("Timestamp must be an RFC 3339 string".to_string())),
    }
}

fn require_str(fields: &Map<String, Value>, key: &str) -> Result<String, DashError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DashError::Query(format!("Record missing required field '{}'", key)))
}

impl Store {
    /// Append-only insert. Generates `id` and stamps `created_at` when the
    /// writer omits them; validates the indexed fields the collection
    /// declares. Returns the record id.
    pub fn insert(&self, collection: Collection, doc: &Value) -> Result<String, DashError> {
        let mut fields = match doc.as_object() {
            Some(map) => map.clone(),
            None => return Err(DashError::Query("Record must be a JSON object".to_string())),
        };

        let id = match fields.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        let created_at = normalize_timestamp(fields.get("created_at"))?;
        fields.insert("id".to_string(), Value::String(id.clone()));
        fields.insert("created_at".to_string(), Value::String(created_at.clone()));

        let conn = self.conn.lock().unwrap();
        let result = match collection {
            Collection::Scans => {
                let domain = require_str(&fields, "domain")?;
                conn.execute(
                    "INSERT INTO scans (id, domain, created_at, doc) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![id, domain, created_at, Value::Object(fields).to_string()],
                )
            }
            Collection::Vulnerabilities => {
                let target = require_str(&fields, "target")?;
                let severity: Severity = require_str(&fields, "severity")?.parse()?;
                fields.insert("severity".to_string(), Value::String(severity.as_str().to_string()));
                conn.execute(
                    "INSERT INTO vulnerabilities (id, target, severity, severity_rank, created_at, doc) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    rusqlite::params![
                        id,
                        target,
                        severity.as_str(),
                        severity.rank(),
                        created_at,
                        Value::Object(fields).to_string()
                    ],
                )
            }
            Collection::Assets => {
                let domain = require_str(&fields, "domain")?;
                let asset_type = require_str(&fields, "type")?;
                conn.execute(
                    "INSERT INTO assets (id, domain, asset_type, created_at, doc) VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![id, domain, asset_type, created_at, Value::Object(fields).to_string()],
                )
            }
            Collection::Reports => conn.execute(
                "INSERT INTO reports (id, created_at, doc) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, created_at, Value::Object(fields).to_string()],
            ),
            Collection::Monitoring => {
                let target = require_str(&fields, "target")?;
                let raw = fields.get("last_checked").cloned().ok_or_else(|| {
                    DashError::Query("Record missing required field 'last_checked'".to_string())
                })?;
                let last_checked = normalize_timestamp(Some(&raw))?;
                fields.insert("last_checked".to_string(), Value::String(last_checked.clone()));
                conn.execute(
                    "INSERT INTO monitoring (id, target, last_checked, created_at, doc) VALUES (?1, ?2, ?3, ?4, ?5)",
                    rusqlite::params![id, target, last_checked, created_at, Value::Object(fields).to_string()],
                )
            }
        };

        result.map_err(|e| {
            DashError::Query(format!("Failed to insert into {}: {}", collection.table(), e))
        })?;
        Ok(id)
    }

    /// Ordered, length-bounded read. Filter and sort fields must be covered
    /// by the collection's declared indexes; the builder rejects anything
    /// else instead of falling back to an unindexed scan.
    pub fn query(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: &[(&str, Direction)],
        limit: usize,
    ) -> Result<Vec<Value>, DashError> {
        let mut params: Vec<String> = Vec::new();
        let mut sql = format!("SELECT doc FROM {}", collection.table());
        sql.push_str(&where_clause(collection, filter, &mut params)?);

        if !sort.is_empty() {
            let mut keys = Vec::new();
            for (field, direction) in sort {
                let (column, inverted) = collection.sort_column(field).ok_or_else(|| {
                    DashError::Query(format!(
                        "No index covers sort field '{}' on {}",
                        field,
                        collection.table()
                    ))
                })?;
                let direction = if inverted { direction.flip() } else { *direction };
                keys.push(format!("{} {}", column, direction.sql()));
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }
        sql.push_str(&format!(" LIMIT {}", limit));

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DashError::Query(format!("Query failed: {}", e)))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| row.get::<_, String>(0))
            .map_err(|e| DashError::Query(format!("Query error: {}", e)))?;

        let mut docs = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| DashError::Query(format!("Row error: {}", e)))?;
            docs.push(
                serde_json::from_str(&raw)
                    .map_err(|e| DashError::Query(format!("Corrupt record document: {}", e)))?,
            );
        }
        Ok(docs)
    }

    /// Count of records matching `filter`, index-backed like [`query`].
    pub fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, DashError> {
        let mut params: Vec<String> = Vec::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", collection.table());
        sql.push_str(&where_clause(collection, filter, &mut params)?);

        let conn = self.conn.lock().unwrap();
        let count: i64 = conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
            .map_err(|e| DashError::Query(format!("Count failed: {}", e)))?;
        Ok(count as u64)
    }
}

fn where_clause(
    collection: Collection,
    filter: &Filter,
    params: &mut Vec<String>,
) -> Result<String, DashError> {
    if filter.is_empty() {
        return Ok(String::new());
    }
    let mut clauses = Vec::new();
    for (field, value) in &filter.clauses {
        let column = collection.filter_column(field).ok_or_else(|| {
            DashError::Query(format!(
                "No index covers filter field '{}' on {}",
                field,
                collection.table()
            ))
        })?;
        params.push(value.clone());
        clauses.push(format!("{} = ?{}", column, params.len()));
    }
    Ok(format!(" WHERE {}", clauses.join(" AND ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vuln(severity: &str, ts: &str) -> Value {
        json!({
            "target": "app.example.com",
            "severity": severity,
            "created_at": ts,
            "title": format!("{} issue at {}", severity, ts),
        })
    }

    #[test]
    fn test_insert_generates_id_and_timestamp() {
        let store = Store::in_memory().unwrap();
        let id = store
            .insert(Collection::Scans, &json!({"domain": "example.com"}))
            .unwrap();

        let docs = store
            .query(Collection::Scans, &Filter::none(), &[], 10)
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], id);
        assert!(docs[0]["created_at"].is_string());
    }

    #[test]
    fn test_insert_rejects_missing_required_field() {
        let store = Store::in_memory().unwrap();
        let err = store
            .insert(Collection::Vulnerabilities, &json!({"severity": "high"}))
            .unwrap_err();
        assert!(matches!(err, DashError::Query(_)));
    }

    #[test]
    fn test_insert_rejects_free_text_severity() {
        let store = Store::in_memory().unwrap();
        let err = store
            .insert(
                Collection::Vulnerabilities,
                &json!({"target": "a", "severity": "catastrophic"}),
            )
            .unwrap_err();
        assert!(matches!(err, DashError::Query(_)));
    }

    #[test]
    fn test_query_orders_by_severity_rank_not_lexicographically() {
        let store = Store::in_memory().unwrap();
        // Lexicographically "high" sorts after "critical" but before "info";
        // rank order must put critical first and info last regardless.
        for (sev, ts) in [
            ("info", "2026-01-01T00:00:00Z"),
            ("high", "2026-01-01T00:00:10Z"),
            ("critical", "2026-01-01T00:00:05Z"),
            ("high", "2026-01-01T00:00:20Z"),
            ("medium", "2026-01-01T00:00:30Z"),
        ] {
            store.insert(Collection::Vulnerabilities, &vuln(sev, ts)).unwrap();
        }

        let docs = store
            .query(
                Collection::Vulnerabilities,
                &Filter::none(),
                &[("severity", Direction::Desc), ("created_at", Direction::Desc)],
                100,
            )
            .unwrap();

        let order: Vec<(&str, &str)> = docs
            .iter()
            .map(|d| (d["severity"].as_str().unwrap(), d["created_at"].as_str().unwrap()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("critical", "2026-01-01T00:00:05.000000Z"),
                ("high", "2026-01-01T00:00:20.000000Z"),
                ("high", "2026-01-01T00:00:10.000000Z"),
                ("medium", "2026-01-01T00:00:30.000000Z"),
                ("info", "2026-01-01T00:00:00.000000Z"),
            ]
        );
    }

    #[test]
    fn test_query_truncates_to_limit() {
        let store = Store::in_memory().unwrap();
        for i in 0..5 {
            store
                .insert(
                    Collection::Scans,
                    &json!({
                        "domain": "example.com",
                        "created_at": format!("2026-01-01T00:00:0{}Z", i),
                    }),
                )
                .unwrap();
        }

        let docs = store
            .query(Collection::Scans, &Filter::none(), &[("created_at", Direction::Desc)], 3)
            .unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["created_at"], "2026-01-01T00:00:04.000000Z");
    }

    #[test]
    fn test_query_empty_collection_returns_empty() {
        let store = Store::in_memory().unwrap();
        let docs = store
            .query(Collection::Scans, &Filter::none(), &[("created_at", Direction::Desc)], 50)
            .unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_query_rejects_unindexed_field() {
        let store = Store::in_memory().unwrap();
        let err = store
            .query(Collection::Scans, &Filter::eq("status", "done"), &[], 10)
            .unwrap_err();
        assert!(matches!(err, DashError::Query(_)));

        let err = store
            .query(Collection::Scans, &Filter::none(), &[("title", Direction::Asc)], 10)
            .unwrap_err();
        assert!(matches!(err, DashError::Query(_)));
    }

    #[test]
    fn test_count_with_filter() {
        let store = Store::in_memory().unwrap();
        store.insert(Collection::Vulnerabilities, &vuln("critical", "2026-01-01T00:00:00Z")).unwrap();
        store.insert(Collection::Vulnerabilities, &vuln("high", "2026-01-01T00:00:01Z")).unwrap();
        store.insert(Collection::Vulnerabilities, &vuln("high", "2026-01-01T00:00:02Z")).unwrap();

        assert_eq!(store.count(Collection::Vulnerabilities, &Filter::none()).unwrap(), 3);
        assert_eq!(
            store.count(Collection::Vulnerabilities, &Filter::eq("severity", "high")).unwrap(),
            2
        );
        assert_eq!(
            store.count(Collection::Vulnerabilities, &Filter::eq("severity", "low")).unwrap(),
            0
        );
    }

    #[test]
    fn test_auxiliary_collections_accept_records() {
        let store = Store::in_memory().unwrap();
        store
            .insert(
                Collection::Assets,
                &json!({"domain": "example.com", "type": "subdomain", "value": "dev.example.com"}),
            )
            .unwrap();
        store
            .insert(Collection::Reports, &json!({"summary": "weekly digest"}))
            .unwrap();
        store
            .insert(
                Collection::Monitoring,
                &json!({"target": "example.com", "last_checked": "2026-01-02T00:00:00Z"}),
            )
            .unwrap();

        assert_eq!(store.count(Collection::Assets, &Filter::eq("type", "subdomain")).unwrap(), 1);
        assert_eq!(store.count(Collection::Reports, &Filter::none()).unwrap(), 1);
        assert_eq!(
            store.count(Collection::Monitoring, &Filter::eq("target", "example.com")).unwrap(),
            1
        );
    }
}
