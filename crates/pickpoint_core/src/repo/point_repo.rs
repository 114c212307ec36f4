//! Pickup-point repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist pickup-point registrations and list known points.
//!
//! # Invariants
//! - City values are stored as the closed enumeration's wire names; unknown
//!   persisted values are rejected on read instead of masked.

use crate::model::point::{City, PickupPoint, PointId};
use crate::repo::reception_repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for pickup-point registration and listing.
pub trait PointRepository {
    /// Registers one pickup point and returns the stored record.
    fn create_point(&mut self, city: City, registered_at: i64) -> RepoResult<PickupPoint>;
    /// Lists all pickup points ordered by registration time.
    fn list_points(&self) -> RepoResult<Vec<PickupPoint>>;
}

/// SQLite-backed pickup-point repository.
pub struct SqlitePointRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePointRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl PointRepository for SqlitePointRepository<'_> {
    fn create_point(&mut self, city: City, registered_at: i64) -> RepoResult<PickupPoint> {
        let point = PickupPoint::register(city, registered_at);
        self.conn.execute(
            "INSERT INTO pickup_points (id, registered_at, city) VALUES (?1, ?2, ?3);",
            params![
                point.id.to_string(),
                point.registered_at,
                city_to_db(point.city)
            ],
        )?;

        debug!(
            "event=point_register module=repo status=ok point={} city={}",
            point.id,
            city_to_db(point.city)
        );
        Ok(point)
    }

    fn list_points(&self) -> RepoResult<Vec<PickupPoint>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, registered_at, city
             FROM pickup_points
             ORDER BY registered_at ASC, rowid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut points = Vec::new();
        while let Some(row) = rows.next()? {
            points.push(parse_point_row(row)?);
        }

        Ok(points)
    }
}

pub(crate) fn parse_point_row(row: &Row<'_>) -> RepoResult<PickupPoint> {
    let id_text: String = row.get("id")?;
    let city_text: String = row.get("city")?;
    Ok(PickupPoint {
        id: parse_point_id(&id_text)?,
        registered_at: row.get("registered_at")?,
        city: parse_city(&city_text)?,
    })
}

pub(crate) fn parse_point_id(value: &str) -> RepoResult<PointId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in pickup_points.id"))
    })
}

pub(crate) fn city_to_db(city: City) -> &'static str {
    match city {
        City::Moscow => "moscow",
        City::SaintPetersburg => "saint_petersburg",
        City::Kazan => "kazan",
    }
}

pub(crate) fn parse_city(value: &str) -> RepoResult<City> {
    match value {
        "moscow" => Ok(City::Moscow),
        "saint_petersburg" => Ok(City::SaintPetersburg),
        "kazan" => Ok(City::Kazan),
        other => Err(RepoError::InvalidData(format!(
            "invalid city `{other}` in pickup_points.city"
        ))),
    }
}
