//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable that drives one reception round trip
//!   against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use pickpoint_core::db::open_db_in_memory;
use pickpoint_core::{
    Category, City, NoopRecorder, PointService, ReceptionService, ReportService,
    SqlitePointRepository, SqliteReceptionRepository, SqliteReportRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("pickpoint_core version={}", pickpoint_core::core_version());

    let mut conn = open_db_in_memory()?;

    let point = {
        let mut points = PointService::new(SqlitePointRepository::new(&mut conn), NoopRecorder);
        points.create_point(City::Moscow, 1_000)?
    };

    {
        let mut receptions =
            ReceptionService::new(SqliteReceptionRepository::new(&mut conn), NoopRecorder);
        receptions.open_reception(point.id, 2_000)?;
        receptions.add_item(point.id, Category::Electronics, 2_100)?;
        receptions.add_item(point.id, Category::Shoes, 2_200)?;
        receptions.close_reception(point.id)?;
    }

    let mut reports = ReportService::new(SqliteReportRepository::new(&mut conn));
    let summaries = reports.point_summaries(None, None, 1, None)?;
    for summary in &summaries {
        println!(
            "point={} receptions={} items={}",
            summary.point.id,
            summary.receptions.len(),
            summary
                .receptions
                .iter()
                .map(|reception| reception.items.len())
                .sum::<usize>()
        );
    }

    Ok(())
}
