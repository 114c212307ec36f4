use pickpoint_core::db::open_db_in_memory;
use pickpoint_core::{
    Category, City, PickupPoint, PointRepository, ReceptionRepository, ReceptionStatus,
    ReportRepository, ReportService, SqlitePointRepository, SqliteReceptionRepository,
    SqliteReportRepository, SummaryQuery,
};
use rusqlite::Connection;

#[test]
fn summaries_group_receptions_with_their_items() {
    let mut conn = open_db_in_memory().unwrap();
    let point_a = create_point(&mut conn, City::Moscow, 100);
    let point_b = create_point(&mut conn, City::Kazan, 200);

    // Point A: one closed reception holding two items.
    open_with_items(&mut conn, &point_a, 1_000, &[(Category::Electronics, 1_100), (Category::Shoes, 1_200)]);
    close(&mut conn, &point_a);
    // Point B: one still-open reception holding one item.
    open_with_items(&mut conn, &point_b, 2_000, &[(Category::Clothing, 2_100)]);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let summaries = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: None,
            page: 1,
            limit: 10,
        })
        .unwrap();

    assert_eq!(summaries.len(), 2);

    let summary_a = &summaries[0];
    assert_eq!(summary_a.point.id, point_a.id);
    assert_eq!(summary_a.receptions.len(), 1);
    assert_eq!(summary_a.receptions[0].reception.status, ReceptionStatus::Closed);
    assert_eq!(summary_a.receptions[0].items.len(), 2);
    for item in &summary_a.receptions[0].items {
        assert_eq!(item.reception_id, summary_a.receptions[0].reception.id);
        assert_eq!(item.pickup_point_id, point_a.id);
    }

    let summary_b = &summaries[1];
    assert_eq!(summary_b.point.id, point_b.id);
    assert_eq!(summary_b.receptions[0].reception.status, ReceptionStatus::InProgress);
    assert_eq!(summary_b.receptions[0].items.len(), 1);
}

#[test]
fn point_without_receptions_appears_with_empty_list() {
    let mut conn = open_db_in_memory().unwrap();
    let point = create_point(&mut conn, City::SaintPetersburg, 100);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let summaries = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: None,
            page: 1,
            limit: 10,
        })
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].point.id, point.id);
    assert!(summaries[0].receptions.is_empty());
}

#[test]
fn end_bound_filters_points_receptions_and_items_independently() {
    let mut conn = open_db_in_memory().unwrap();
    let point = create_point(&mut conn, City::Moscow, 100);
    let late_point = create_point(&mut conn, City::Kazan, 900);

    // Items at 600 and 700; an end bound of 650 keeps only the first.
    open_with_items(&mut conn, &point, 500, &[(Category::Electronics, 600), (Category::Shoes, 700)]);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let summaries = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: Some(650),
            page: 1,
            limit: 10,
        })
        .unwrap();

    assert_eq!(summaries.len(), 1, "point registered at 900 must be filtered out");
    assert_eq!(summaries[0].point.id, point.id);
    assert_ne!(summaries[0].point.id, late_point.id);
    assert_eq!(summaries[0].receptions.len(), 1);
    let items = &summaries[0].receptions[0].items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].scanned_at, 600);
}

#[test]
fn start_bound_excludes_earlier_registrations() {
    let mut conn = open_db_in_memory().unwrap();
    let early = create_point(&mut conn, City::Moscow, 100);
    let late = create_point(&mut conn, City::Kazan, 500);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let summaries = repo
        .point_summaries(&SummaryQuery {
            start: Some(200),
            end: None,
            page: 1,
            limit: 10,
        })
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].point.id, late.id);
    assert_ne!(summaries[0].point.id, early.id);
}

#[test]
fn pagination_windows_points_and_scopes_their_children() {
    let mut conn = open_db_in_memory().unwrap();
    let first = create_point(&mut conn, City::Moscow, 100);
    let second = create_point(&mut conn, City::Kazan, 200);
    let third = create_point(&mut conn, City::SaintPetersburg, 300);

    open_with_items(&mut conn, &third, 1_000, &[(Category::Clothing, 1_100)]);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let page_one = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: None,
            page: 1,
            limit: 2,
        })
        .unwrap();
    let page_two = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: None,
            page: 2,
            limit: 2,
        })
        .unwrap();

    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0].point.id, first.id);
    assert_eq!(page_one[1].point.id, second.id);
    // The third point's reception belongs to page two only.
    assert!(page_one.iter().all(|summary| summary.receptions.is_empty()));

    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].point.id, third.id);
    assert_eq!(page_two[0].receptions.len(), 1);
    assert_eq!(page_two[0].receptions[0].items.len(), 1);
}

#[test]
fn service_clamps_page_and_limit() {
    let mut conn = open_db_in_memory().unwrap();
    let point = create_point(&mut conn, City::Moscow, 100);

    let mut service = ReportService::new(SqliteReportRepository::new(&mut conn));
    // page 0 behaves as page 1; an oversized limit clamps instead of failing.
    let summaries = service.point_summaries(None, None, 0, Some(1_000)).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].point.id, point.id);
}

#[test]
fn summaries_serialize_with_stable_field_names() {
    let mut conn = open_db_in_memory().unwrap();
    let point = create_point(&mut conn, City::Kazan, 100);
    open_with_items(&mut conn, &point, 500, &[(Category::Electronics, 600)]);

    let mut repo = SqliteReportRepository::new(&mut conn);
    let summaries = repo
        .point_summaries(&SummaryQuery {
            start: None,
            end: None,
            page: 1,
            limit: 10,
        })
        .unwrap();

    let json = serde_json::to_value(&summaries).unwrap();
    let first = &json[0];
    assert_eq!(first["point"]["city"], "kazan");
    assert_eq!(first["receptions"][0]["reception"]["status"], "in_progress");
    assert_eq!(first["receptions"][0]["items"][0]["category"], "electronics");
}

fn create_point(conn: &mut Connection, city: City, registered_at: i64) -> PickupPoint {
    SqlitePointRepository::new(conn)
        .create_point(city, registered_at)
        .unwrap()
}

fn open_with_items(
    conn: &mut Connection,
    point: &PickupPoint,
    opened_at: i64,
    items: &[(Category, i64)],
) {
    let mut repo = SqliteReceptionRepository::new(conn);
    repo.open_reception(point.id, opened_at).unwrap();
    for (category, scanned_at) in items {
        repo.add_item(point.id, *category, *scanned_at).unwrap();
    }
}

fn close(conn: &mut Connection, point: &PickupPoint) {
    SqliteReceptionRepository::new(conn)
        .close_reception(point.id)
        .unwrap();
}
