//! Point-in-time aggregation over pickup points, receptions and items.
//!
//! # Responsibility
//! - Build the consolidated pickup-point -> receptions -> items view for a
//!   date window, paginated by pickup point.
//!
//! # Invariants
//! - All three queries run inside one transaction, so the in-memory join
//!   reflects a single consistent snapshot.
//! - Only the pickup-point query paginates; receptions and items are
//!   fetched for exactly the page's pickup-point ids.
//! - The aggregator only reads; lifecycle rows are owned by the reception
//!   engine.

use crate::model::point::PickupPoint;
use crate::model::reception::{Item, Reception};
use crate::repo::point_repo::parse_point_row;
use crate::repo::reception_repo::{parse_category, parse_status, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

/// Date window and pagination for [`ReportRepository::point_summaries`].
///
/// Bounds are inclusive epoch milliseconds, applied to pickup-point
/// registration time and, independently, to reception/item creation time.
/// `page` is 1-based; callers normalize `page`/`limit` before this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryQuery {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub page: u32,
    pub limit: u32,
}

/// One reception together with the items scanned into it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReceptionSummary {
    pub reception: Reception,
    pub items: Vec<Item>,
}

/// One pickup point together with its receptions in the window.
///
/// Points with no receptions in the window carry an empty reception list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PickupPointSummary {
    pub point: PickupPoint,
    pub receptions: Vec<ReceptionSummary>,
}

/// Read-only repository interface for the reporting view.
pub trait ReportRepository {
    /// Returns one summary per pickup point in the paginated window.
    fn point_summaries(&mut self, query: &SummaryQuery) -> RepoResult<Vec<PickupPointSummary>>;
}

/// SQLite-backed reporting repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn point_summaries(&mut self, query: &SummaryQuery) -> RepoResult<Vec<PickupPointSummary>> {
        let tx = self.conn.transaction()?;

        let points = query_points_page(&tx, query)?;
        if points.is_empty() {
            tx.commit()?;
            return Ok(Vec::new());
        }

        let point_ids: Vec<String> = points.iter().map(|point| point.id.to_string()).collect();
        let receptions = query_receptions(&tx, query, &point_ids)?;
        let items = query_items(&tx, query, &point_ids)?;
        tx.commit()?;

        let mut items_by_reception: HashMap<Uuid, Vec<Item>> = HashMap::new();
        for item in items {
            items_by_reception
                .entry(item.reception_id)
                .or_default()
                .push(item);
        }

        let mut receptions_by_point: HashMap<Uuid, Vec<Reception>> = HashMap::new();
        for reception in receptions {
            receptions_by_point
                .entry(reception.pickup_point_id)
                .or_default()
                .push(reception);
        }

        let summaries = points
            .into_iter()
            .map(|point| {
                let receptions = receptions_by_point
                    .remove(&point.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|reception| {
                        let items = items_by_reception
                            .remove(&reception.id)
                            .unwrap_or_default();
                        ReceptionSummary { reception, items }
                    })
                    .collect();
                PickupPointSummary { point, receptions }
            })
            .collect();

        Ok(summaries)
    }
}

fn query_points_page(tx: &Transaction<'_>, query: &SummaryQuery) -> RepoResult<Vec<PickupPoint>> {
    let mut sql = String::from(
        "SELECT id, registered_at, city
         FROM pickup_points
         WHERE 1 = 1",
    );
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(start) = query.start {
        sql.push_str(" AND registered_at >= ?");
        bind_values.push(Value::Integer(start));
    }
    if let Some(end) = query.end {
        sql.push_str(" AND registered_at <= ?");
        bind_values.push(Value::Integer(end));
    }

    sql.push_str(" ORDER BY registered_at ASC, rowid ASC LIMIT ? OFFSET ?");
    let offset = query.page.saturating_sub(1).saturating_mul(query.limit);
    bind_values.push(Value::Integer(i64::from(query.limit)));
    bind_values.push(Value::Integer(i64::from(offset)));

    let mut stmt = tx.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut points = Vec::new();
    while let Some(row) = rows.next()? {
        points.push(parse_point_row(row)?);
    }

    Ok(points)
}

fn query_receptions(
    tx: &Transaction<'_>,
    query: &SummaryQuery,
    point_ids: &[String],
) -> RepoResult<Vec<Reception>> {
    let mut sql = format!(
        "SELECT id, pickup_point_id, started_at, status
         FROM receptions
         WHERE pickup_point_id IN ({})",
        placeholders(point_ids.len())
    );
    let mut bind_values: Vec<Value> = point_ids
        .iter()
        .map(|id| Value::Text(id.clone()))
        .collect();
    push_time_bounds(&mut sql, &mut bind_values, "started_at", query);
    sql.push_str(" ORDER BY started_at ASC, rowid ASC");

    let mut stmt = tx.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut receptions = Vec::new();
    while let Some(row) = rows.next()? {
        receptions.push(parse_reception_row(row)?);
    }

    Ok(receptions)
}

fn query_items(
    tx: &Transaction<'_>,
    query: &SummaryQuery,
    point_ids: &[String],
) -> RepoResult<Vec<Item>> {
    let mut sql = format!(
        "SELECT id, reception_id, pickup_point_id, category, scanned_at
         FROM items
         WHERE pickup_point_id IN ({})",
        placeholders(point_ids.len())
    );
    let mut bind_values: Vec<Value> = point_ids
        .iter()
        .map(|id| Value::Text(id.clone()))
        .collect();
    push_time_bounds(&mut sql, &mut bind_values, "scanned_at", query);
    sql.push_str(" ORDER BY scanned_at ASC, rowid ASC");

    let mut stmt = tx.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }

    Ok(items)
}

fn push_time_bounds(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    column: &str,
    query: &SummaryQuery,
) {
    if let Some(start) = query.start {
        sql.push_str(&format!(" AND {column} >= ?"));
        bind_values.push(Value::Integer(start));
    }
    if let Some(end) = query.end {
        sql.push_str(&format!(" AND {column} <= ?"));
        bind_values.push(Value::Integer(end));
    }
}

fn placeholders(count: usize) -> String {
    let mut out = String::new();
    for index in 0..count {
        if index > 0 {
            out.push_str(", ");
        }
        out.push('?');
    }
    out
}

fn parse_reception_row(row: &Row<'_>) -> RepoResult<Reception> {
    let id_text: String = row.get("id")?;
    let point_text: String = row.get("pickup_point_id")?;
    let status_text: String = row.get("status")?;
    Ok(Reception {
        id: parse_uuid(&id_text, "receptions.id")?,
        pickup_point_id: parse_uuid(&point_text, "receptions.pickup_point_id")?,
        started_at: row.get("started_at")?,
        status: parse_status(&status_text)?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let id_text: String = row.get("id")?;
    let reception_text: String = row.get("reception_id")?;
    let point_text: String = row.get("pickup_point_id")?;
    let category_text: String = row.get("category")?;
    Ok(Item {
        id: parse_uuid(&id_text, "items.id")?,
        reception_id: parse_uuid(&reception_text, "items.reception_id")?,
        pickup_point_id: parse_uuid(&point_text, "items.pickup_point_id")?,
        category: parse_category(&category_text)?,
        scanned_at: row.get("scanned_at")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
