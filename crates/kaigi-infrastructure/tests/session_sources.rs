use chrono::NaiveDate;
use kaigi_core::KaigiError;
use kaigi_core::favorite::FavoriteSet;
use kaigi_core::timetable::{
    RoomType, SessionId, SessionSource, TimetableFilters, aggregate, build_view, group,
};
use kaigi_infrastructure::FileSessionSource;
use std::path::PathBuf;

fn fixture() -> FileSessionSource {
    FileSessionSource::new(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/timetable.json"),
    )
}

#[tokio::test]
async fn test_fixture_loads_in_document_order() {
    let timetable = fixture().fetch_snapshot().await.unwrap();

    let ids: Vec<&str> = timetable.sessions().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["welcome", "101", "102", "103", "201", "202"]);

    let rooms: Vec<RoomType> = timetable.rooms().iter().map(|r| r.room_type).collect();
    assert_eq!(
        rooms,
        vec![
            RoomType::Flamingo,
            RoomType::Giraffe,
            RoomType::Hedgehog,
            RoomType::Iguana,
            RoomType::Jellyfish,
        ]
    );
    assert_eq!(
        timetable.days(),
        vec![
            NaiveDate::from_ymd_opt(2024, 9, 12).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 13).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_fixture_groups_into_exact_slots() {
    let timetable = fixture().fetch_snapshot().await.unwrap();
    let favorites = FavoriteSet::from_iter([SessionId::new("102"), SessionId::new("gone")]);

    let view = group(aggregate(&timetable, &favorites));

    let slots: Vec<(String, Vec<(&str, bool)>)> = view
        .slots()
        .map(|(slot, items)| {
            (
                slot.label(),
                items
                    .iter()
                    .map(|item| (item.session.id.as_str(), item.is_favorited))
                    .collect(),
            )
        })
        .collect();

    // The 90-minute workshop shares its start with 101/102 but keeps its own slot.
    assert_eq!(
        slots,
        vec![
            ("10:00 - 10:20".to_string(), vec![("welcome", false)]),
            ("10:30 - 11:10".to_string(), vec![("101", false), ("102", true)]),
            ("10:30 - 12:00".to_string(), vec![("103", false)]),
            ("10:00 - 10:40".to_string(), vec![("201", false), ("202", false)]),
        ]
    );
    assert_eq!(view.session_count(), timetable.len());
}

#[tokio::test]
async fn test_fixture_day_and_room_filters() {
    let timetable = fixture().fetch_snapshot().await.unwrap();
    let filters = TimetableFilters::default()
        .with_day(NaiveDate::from_ymd_opt(2024, 9, 13).unwrap())
        .with_room(RoomType::Jellyfish);

    let view = build_view(&timetable, &FavoriteSet::default(), &filters);

    let ids: Vec<&str> = view.sessions().map(|s| s.session.id.as_str()).collect();
    assert_eq!(ids, vec!["202"]);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let source = FileSessionSource::new("/nonexistent/kaigi/timetable.json");

    let err = source.fetch_snapshot().await.unwrap_err();

    assert!(matches!(err, KaigiError::Io { .. }));
}
