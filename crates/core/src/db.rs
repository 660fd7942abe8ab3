// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed issue store.
//!
//! The [`Database`] struct implements [`IssueStore`] over one rig's database:
//! issues, blockers, the audit log and the mailbox used for notifications.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fields::{parse_mr_fields, MrFields};
use crate::issue::{Action, Event, Issue, ListOptions, Status};
use crate::mail::Mail;
use crate::store::{IssueStore, RejectionResult};

/// SQL schema for a rig database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS issues (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'open',
    priority INTEGER NOT NULL DEFAULT 2,
    assignee TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- blocker_id must be resolved (closed/rejected) before issue_id is ready
CREATE TABLE IF NOT EXISTS blockers (
    issue_id TEXT NOT NULL,
    blocker_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (issue_id, blocker_id),
    FOREIGN KEY (issue_id) REFERENCES issues(id),
    FOREIGN KEY (blocker_id) REFERENCES issues(id),
    CHECK (issue_id != blocker_id)
);

-- Event log (audit trail)
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    action TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    reason TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

-- Outgoing notifications
CREATE TABLE IF NOT EXISTS mail (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient TEXT NOT NULL,
    subject TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_type ON issues(type);
CREATE INDEX IF NOT EXISTS idx_blockers_blocker ON blockers(blocker_id);
CREATE INDEX IF NOT EXISTS idx_events_issue ON events(issue_id);
CREATE INDEX IF NOT EXISTS idx_mail_recipient ON mail(recipient);
"#;

const ISSUE_COLUMNS: &str = "i.id, i.type, i.title, i.description, i.status, i.priority,
     i.assignee, i.created_at, i.updated_at";

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Map a row selected with [`ISSUE_COLUMNS`]. Blockers are attached separately.
fn issue_from_row(row: &Row<'_>) -> std::result::Result<Issue, rusqlite::Error> {
    let status_str: String = row.get(4)?;
    Ok(Issue {
        id: row.get(0)?,
        issue_type: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parse_db(&status_str, "status")?,
        priority: row.get(5)?,
        assignee: row.get(6)?,
        blocked_by: Vec::new(),
        blocked_by_count: 0,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Run schema creation on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection for one rig.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
    /// Rig name used to address notifications when an MR doesn't name one.
    rig: String,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database {
            conn,
            rig: String::new(),
        };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database {
            conn,
            rig: String::new(),
        };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Set the rig name this database belongs to (builder pattern).
    pub fn with_rig(mut self, rig: impl Into<String>) -> Self {
        self.rig = rig.into();
        self
    }

    /// Create a new issue. Blocker fields on `issue` are ignored; use [`Self::add_blocker`].
    pub fn create_issue(&self, issue: &Issue) -> Result<()> {
        self.conn.execute(
            "INSERT INTO issues (id, type, title, description, status, priority, assignee,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                issue.id,
                issue.issue_type,
                issue.title,
                issue.description,
                issue.status.as_str(),
                issue.priority,
                issue.assignee,
                issue.created_at,
                issue.updated_at,
            ],
        )?;
        self.log_event(&Event::new(issue.id.clone(), Action::Created))?;
        Ok(())
    }

    /// Get an issue by ID, with its unresolved blockers.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        self.find_issue(id)?
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }

    /// Look up an issue by exact ID.
    pub fn find_issue(&self, id: &str) -> Result<Option<Issue>> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues i WHERE i.id = ?1");
        let issue = self
            .conn
            .query_row(&sql, params![id], issue_from_row)
            .optional()?;

        match issue {
            Some(mut issue) => {
                let blockers = self.get_unresolved_blockers(&issue.id)?;
                issue.blocked_by_count = blockers.len();
                issue.blocked_by = blockers;
                Ok(Some(issue))
            }
            None => Ok(None),
        }
    }

    /// Update issue status, recording the change in the audit log.
    pub fn update_issue_status(&mut self, id: &str, status: Status) -> Result<()> {
        let issue = self.get_issue(id)?;
        self.conn.execute(
            "UPDATE issues SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), Utc::now().to_rfc3339(), id],
        )?;
        let event = Event::new(id.to_string(), Action::StatusChanged).with_values(
            Some(issue.status.to_string()),
            Some(status.to_string()),
        );
        self.log_event(&event)?;
        Ok(())
    }

    /// Record that `blocker_id` must be resolved before `issue_id` is ready.
    pub fn add_blocker(&self, issue_id: &str, blocker_id: &str) -> Result<()> {
        if issue_id == blocker_id {
            return Err(Error::SelfDependency);
        }
        for id in [issue_id, blocker_id] {
            if self.find_issue(id)?.is_none() {
                return Err(Error::IssueNotFound(id.to_string()));
            }
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO blockers (issue_id, blocker_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![issue_id, blocker_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Blockers of an issue that are neither closed nor rejected, oldest first.
    pub fn get_unresolved_blockers(&self, issue_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.blocker_id FROM blockers b
             JOIN issues bi ON bi.id = b.blocker_id
             WHERE b.issue_id = ?1 AND bi.status NOT IN ('closed', 'rejected')
             ORDER BY b.created_at, b.blocker_id",
        )?;

        let ids = stmt
            .query_map(params![issue_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    /// Unresolved blockers of every issue, keyed by blocked issue ID.
    fn unresolved_blocker_map(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.issue_id, b.blocker_id FROM blockers b
             JOIN issues bi ON bi.id = b.blocker_id
             WHERE bi.status NOT IN ('closed', 'rejected')
             ORDER BY b.created_at, b.blocker_id",
        )?;

        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (issue_id, blocker_id) in pairs {
            map.entry(issue_id).or_default().push(blocker_id);
        }
        Ok(map)
    }

    /// Run an issue query and attach blockers to each row.
    fn query_issues(&self, sql: &str, values: &[&dyn rusqlite::ToSql]) -> Result<Vec<Issue>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut issues = stmt
            .query_map(values, issue_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut blockers = self.unresolved_blocker_map()?;
        for issue in &mut issues {
            if let Some(ids) = blockers.remove(&issue.id) {
                issue.blocked_by_count = ids.len();
                issue.blocked_by = ids;
            }
        }
        Ok(issues)
    }

    /// List issues matching the options, most urgent first.
    pub fn list_issues(&self, options: &ListOptions) -> Result<Vec<Issue>> {
        let mut sql = format!("SELECT {ISSUE_COLUMNS} FROM issues i");
        let mut conditions = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(t) = &options.issue_type {
            conditions.push("i.type = ?");
            values.push(Box::new(t.clone()));
        }

        if let Some(s) = options.status {
            conditions.push("i.status = ?");
            values.push(Box::new(s.as_str()));
        }

        if let Some(p) = options.priority {
            conditions.push("i.priority = ?");
            values.push(Box::new(p));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY i.priority ASC, i.created_at ASC, i.id ASC");

        let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        self.query_issues(&sql, &refs)
    }

    /// Open issues of any type with no unresolved blockers, most urgent first.
    pub fn ready_issues(&self) -> Result<Vec<Issue>> {
        let sql = format!(
            "SELECT {ISSUE_COLUMNS} FROM issues i
             WHERE i.status = 'open'
               AND NOT EXISTS (
                   SELECT 1 FROM blockers b
                   JOIN issues bi ON bi.id = b.blocker_id
                   WHERE b.issue_id = i.id AND bi.status NOT IN ('closed', 'rejected')
               )
             ORDER BY i.priority ASC, i.created_at ASC, i.id ASC"
        );
        self.query_issues(&sql, &[])
    }

    /// Find the merge request named by an issue ID or a branch.
    ///
    /// IDs win over branches. When several MRs share a branch, the single
    /// non-terminal one is chosen; more than one is ambiguous.
    pub fn resolve_mr(&self, id_or_branch: &str) -> Result<Issue> {
        if let Some(issue) = self.find_issue(id_or_branch)? {
            return Ok(issue);
        }

        let mut candidates: Vec<Issue> = self
            .list_issues(&ListOptions::merge_requests())?
            .into_iter()
            .filter(|issue| parse_mr_fields(issue).is_some_and(|f| f.branch == id_or_branch))
            .collect();

        if candidates.len() > 1 {
            let active: Vec<Issue> = candidates
                .iter()
                .filter(|issue| !issue.status.is_terminal())
                .cloned()
                .collect();
            match active.len() {
                0 => candidates.truncate(1),
                1 => candidates = active,
                _ => {
                    return Err(Error::AmbiguousMr {
                        branch: id_or_branch.to_string(),
                        matches: active.into_iter().map(|i| i.id).collect(),
                    })
                }
            }
        }

        candidates
            .pop()
            .ok_or_else(|| Error::IssueNotFound(id_or_branch.to_string()))
    }

    /// Log an event.
    pub fn log_event(&self, event: &Event) -> Result<i64> {
        insert_event(&self.conn, event)
    }

    /// Get all events for an issue, ordered by creation time.
    pub fn get_events(&self, issue_id: &str) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, action, old_value, new_value, reason, created_at
             FROM events WHERE issue_id = ?1 ORDER BY id",
        )?;

        let events = stmt
            .query_map(params![issue_id], |row| {
                let action_str: String = row.get(2)?;
                let created_str: String = row.get(6)?;
                Ok(Event {
                    id: row.get(0)?,
                    issue_id: row.get(1)?,
                    action: parse_db(&action_str, "action")?,
                    old_value: row.get(3)?,
                    new_value: row.get(4)?,
                    reason: row.get(5)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Messages addressed to `recipient`, oldest first.
    pub fn get_mail(&self, recipient: &str) -> Result<Vec<Mail>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recipient, subject, body, created_at
             FROM mail WHERE recipient = ?1 ORDER BY id",
        )?;

        let mail = stmt
            .query_map(params![recipient], |row| {
                let created_str: String = row.get(4)?;
                Ok(Mail {
                    id: row.get(0)?,
                    recipient: row.get(1)?,
                    subject: row.get(2)?,
                    body: row.get(3)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(mail)
    }
}

fn insert_event(conn: &Connection, event: &Event) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (issue_id, action, old_value, new_value, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event.issue_id,
            event.action.as_str(),
            event.old_value,
            event.new_value,
            event.reason,
            event.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_mail(conn: &Connection, mail: &Mail) -> Result<i64> {
    conn.execute(
        "INSERT INTO mail (recipient, subject, body, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![mail.recipient, mail.subject, mail.body, mail.created_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Best-effort rejection notice. Failures are logged, never returned.
fn notify_rejection(
    conn: &Connection,
    rig: &str,
    mr_id: &str,
    fields: &MrFields,
    reason: &str,
) -> bool {
    let Some(mail) = Mail::rejection(rig, mr_id, fields, reason) else {
        tracing::warn!(mr = %mr_id, "no worker recorded on merge request, skipping notification");
        return false;
    };
    match insert_mail(conn, &mail) {
        Ok(_) => {
            tracing::debug!(mr = %mr_id, recipient = %mail.recipient, "queued rejection notice");
            true
        }
        Err(e) => {
            tracing::warn!(mr = %mr_id, error = %e, "failed to notify worker");
            false
        }
    }
}

impl IssueStore for Database {
    fn list(&self, options: &ListOptions) -> Result<Vec<Issue>> {
        self.list_issues(options)
    }

    fn ready(&self) -> Result<Vec<Issue>> {
        self.ready_issues()
    }

    fn reject_mr(
        &mut self,
        id_or_branch: &str,
        reason: &str,
        notify: bool,
    ) -> Result<RejectionResult> {
        let issue = self.resolve_mr(id_or_branch)?;
        if !issue.is_merge_request() {
            return Err(Error::NotMergeRequest {
                id: issue.id,
                issue_type: issue.issue_type,
            });
        }
        if !issue.status.can_transition_to(Status::Rejected) {
            return Err(Error::InvalidTransition {
                from: issue.status.to_string(),
                to: Status::Rejected.to_string(),
                valid_targets: issue.status.valid_targets(),
            });
        }

        let fields = parse_mr_fields(&issue).unwrap_or_default();
        let now = Utc::now();

        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE issues SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
            params![
                Status::Rejected.as_str(),
                now.to_rfc3339(),
                issue.id,
                issue.status.as_str()
            ],
        )?;
        if changed == 0 {
            // Status moved underneath us; report it as the transition we attempted.
            return Err(Error::InvalidTransition {
                from: issue.status.to_string(),
                to: Status::Rejected.to_string(),
                valid_targets: "status changed concurrently, retry".to_string(),
            });
        }

        let event = Event::new(issue.id.clone(), Action::Rejected)
            .with_values(
                Some(issue.status.to_string()),
                Some(Status::Rejected.to_string()),
            )
            .with_reason(Some(reason.to_string()));
        insert_event(&tx, &event)?;

        let notified = notify && notify_rejection(&tx, &self.rig, &issue.id, &fields, reason);
        tx.commit()?;

        Ok(RejectionResult {
            mr_id: issue.id,
            branch: fields.branch,
            worker: fields.worker,
            issue_id: fields.source_issue,
            reason: reason.to_string(),
            notified,
        })
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
