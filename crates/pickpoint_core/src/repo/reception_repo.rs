//! Reception lifecycle engine: contracts and SQLite implementation.
//!
//! # Responsibility
//! - Execute the four lifecycle operations (`open`, `add_item`,
//!   `remove_last_item`, `close`) as single short-lived transactions.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - At most one reception per pickup point is `in_progress`; the check and
//!   the mutation run inside the same transaction.
//! - Items are inserted only against an `in_progress` latest reception.
//! - `close` requires at least one item; `remove_last_item` requires at
//!   least one item and deletes exactly the newest one.
//! - Domain failures roll the transaction back; partial mutations never
//!   persist.

use crate::db::DbError;
use crate::model::point::PointId;
use crate::model::reception::{Category, Item, Reception, ReceptionId, ReceptionStatus};
use log::debug;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Contract-level classification of repository errors.
///
/// The kind, not the message wording, is the stable part of the error
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An invariant-violating concurrent state was observed.
    Conflict,
    /// The operation's required prior state does not hold.
    Precondition,
    /// The persistence layer failed for reasons unrelated to invariants.
    Storage,
}

/// Errors from reception lifecycle and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// `open` found an `in_progress` reception for the pickup point.
    ReceptionAlreadyOpen(PointId),
    /// No reception exists, or the latest one is closed.
    NoActiveReception(PointId),
    /// `close` found the open reception without a single item.
    EmptyReception(ReceptionId),
    /// `remove_last_item` found the open reception without a single item.
    NoItemsToRemove(ReceptionId),
    /// Transport-level database failure.
    Db(DbError),
    /// Persisted state failed to decode into the domain model.
    InvalidData(String),
}

impl RepoError {
    /// Maps this error onto the stable contract classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ReceptionAlreadyOpen(_) => ErrorKind::Conflict,
            Self::NoActiveReception(_) | Self::EmptyReception(_) | Self::NoItemsToRemove(_) => {
                ErrorKind::Precondition
            }
            Self::Db(_) | Self::InvalidData(_) => ErrorKind::Storage,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReceptionAlreadyOpen(id) => {
                write!(f, "pickup point {id} already has an open reception")
            }
            Self::NoActiveReception(id) => {
                write!(f, "pickup point {id} has no active reception")
            }
            Self::EmptyReception(id) => {
                write!(f, "cannot close empty reception {id}")
            }
            Self::NoItemsToRemove(id) => {
                write!(f, "reception {id} has no items to remove")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the reception lifecycle engine.
///
/// Each operation is a single transaction; callers never compose them into
/// a larger atomic unit.
pub trait ReceptionRepository {
    /// Opens a new reception for the pickup point.
    fn open_reception(&mut self, pickup_point_id: PointId, opened_at: i64)
        -> RepoResult<Reception>;
    /// Scans one item into the pickup point's open reception.
    fn add_item(
        &mut self,
        pickup_point_id: PointId,
        category: Category,
        scanned_at: i64,
    ) -> RepoResult<Item>;
    /// Deletes the newest item of the pickup point's open reception.
    fn remove_last_item(&mut self, pickup_point_id: PointId) -> RepoResult<()>;
    /// Transitions the pickup point's open reception to `closed`.
    fn close_reception(&mut self, pickup_point_id: PointId) -> RepoResult<Reception>;
}

/// SQLite-backed reception lifecycle engine.
pub struct SqliteReceptionRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteReceptionRepository<'conn> {
    /// Constructs the engine from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ReceptionRepository for SqliteReceptionRepository<'_> {
    fn open_reception(
        &mut self,
        pickup_point_id: PointId,
        opened_at: i64,
    ) -> RepoResult<Reception> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(latest) = latest_reception(&tx, pickup_point_id)? {
            if latest.status == ReceptionStatus::InProgress {
                return Err(RepoError::ReceptionAlreadyOpen(pickup_point_id));
            }
        }

        let reception = Reception::open(pickup_point_id, opened_at);
        tx.execute(
            "INSERT INTO receptions (id, pickup_point_id, started_at, status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                reception.id.to_string(),
                reception.pickup_point_id.to_string(),
                reception.started_at,
                status_to_db(reception.status),
            ],
        )?;
        tx.commit()?;

        debug!(
            "event=reception_open module=repo status=ok point={pickup_point_id} reception={}",
            reception.id
        );
        Ok(reception)
    }

    fn add_item(
        &mut self,
        pickup_point_id: PointId,
        category: Category,
        scanned_at: i64,
    ) -> RepoResult<Item> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let reception_id = open_reception_id(&tx, pickup_point_id)?;
        let item = Item::scanned(reception_id, pickup_point_id, category, scanned_at);
        tx.execute(
            "INSERT INTO items (id, reception_id, pickup_point_id, category, scanned_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.id.to_string(),
                item.reception_id.to_string(),
                item.pickup_point_id.to_string(),
                category_to_db(item.category),
                item.scanned_at,
            ],
        )?;
        tx.commit()?;

        debug!(
            "event=item_add module=repo status=ok point={pickup_point_id} reception={reception_id} item={}",
            item.id
        );
        Ok(item)
    }

    fn remove_last_item(&mut self, pickup_point_id: PointId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let reception_id = open_reception_id(&tx, pickup_point_id)?;
        // Scoped delete of the single newest item; deleting nothing is a
        // precondition failure, not a silent success.
        let deleted = tx.execute(
            "DELETE FROM items
             WHERE id = (
                 SELECT id
                 FROM items
                 WHERE reception_id = ?1
                 ORDER BY scanned_at DESC, rowid DESC
                 LIMIT 1
             );",
            [reception_id.to_string()],
        )?;
        if deleted == 0 {
            return Err(RepoError::NoItemsToRemove(reception_id));
        }
        tx.commit()?;

        debug!(
            "event=item_remove module=repo status=ok point={pickup_point_id} reception={reception_id}"
        );
        Ok(())
    }

    fn close_reception(&mut self, pickup_point_id: PointId) -> RepoResult<Reception> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let latest = match latest_reception(&tx, pickup_point_id)? {
            Some(latest) if latest.status == ReceptionStatus::InProgress => latest,
            _ => return Err(RepoError::NoActiveReception(pickup_point_id)),
        };

        let item_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM items WHERE reception_id = ?1;",
            [latest.id.to_string()],
            |row| row.get(0),
        )?;
        if item_count == 0 {
            return Err(RepoError::EmptyReception(latest.id));
        }

        tx.execute(
            "UPDATE receptions SET status = ?2 WHERE id = ?1;",
            params![
                latest.id.to_string(),
                status_to_db(ReceptionStatus::Closed)
            ],
        )?;
        tx.commit()?;

        debug!(
            "event=reception_close module=repo status=ok point={pickup_point_id} reception={} items={item_count}",
            latest.id
        );
        Ok(Reception {
            id: latest.id,
            pickup_point_id,
            started_at: latest.started_at,
            status: ReceptionStatus::Closed,
        })
    }
}

struct LatestReception {
    id: ReceptionId,
    started_at: i64,
    status: ReceptionStatus,
}

/// Fetches the pickup point's latest reception inside the caller's
/// transaction. `None` means the point has never had a reception.
fn latest_reception(
    tx: &Transaction<'_>,
    pickup_point_id: PointId,
) -> RepoResult<Option<LatestReception>> {
    let mut stmt = tx.prepare(
        "SELECT id, started_at, status
         FROM receptions
         WHERE pickup_point_id = ?1
         ORDER BY started_at DESC, rowid DESC
         LIMIT 1;",
    )?;

    let mut rows = stmt.query([pickup_point_id.to_string()])?;
    if let Some(row) = rows.next()? {
        let id_text: String = row.get("id")?;
        let status_text: String = row.get("status")?;
        return Ok(Some(LatestReception {
            id: parse_reception_id(&id_text)?,
            started_at: row.get("started_at")?,
            status: parse_status(&status_text)?,
        }));
    }

    Ok(None)
}

/// Resolves the id of the open reception, treating "no reception" and
/// "latest is closed" identically: both block item mutations.
fn open_reception_id(tx: &Transaction<'_>, pickup_point_id: PointId) -> RepoResult<ReceptionId> {
    match latest_reception(tx, pickup_point_id)? {
        Some(latest) if latest.status == ReceptionStatus::InProgress => Ok(latest.id),
        _ => Err(RepoError::NoActiveReception(pickup_point_id)),
    }
}

fn parse_reception_id(value: &str) -> RepoResult<ReceptionId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in receptions.id"))
    })
}

pub(crate) fn status_to_db(status: ReceptionStatus) -> &'static str {
    match status {
        ReceptionStatus::InProgress => "in_progress",
        ReceptionStatus::Closed => "closed",
    }
}

pub(crate) fn parse_status(value: &str) -> RepoResult<ReceptionStatus> {
    match value {
        "in_progress" => Ok(ReceptionStatus::InProgress),
        "closed" => Ok(ReceptionStatus::Closed),
        other => Err(RepoError::InvalidData(format!(
            "invalid reception status `{other}` in receptions.status"
        ))),
    }
}

pub(crate) fn category_to_db(category: Category) -> &'static str {
    match category {
        Category::Electronics => "electronics",
        Category::Clothing => "clothing",
        Category::Shoes => "shoes",
    }
}

pub(crate) fn parse_category(value: &str) -> RepoResult<Category> {
    match value {
        "electronics" => Ok(Category::Electronics),
        "clothing" => Ok(Category::Clothing),
        "shoes" => Ok(Category::Shoes),
        other => Err(RepoError::InvalidData(format!(
            "invalid item category `{other}` in items.category"
        ))),
    }
}
