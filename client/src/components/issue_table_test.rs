use super::*;

#[test]
fn short_date_drops_time_component() {
    assert_eq!(short_date(Some("2024-05-01T10:00:00Z")), "2024-05-01");
}

#[test]
fn short_date_passes_plain_dates_through() {
    assert_eq!(short_date(Some("2024-05-01")), "2024-05-01");
    assert_eq!(short_date(None), "-");
}
