use super::*;

#[test]
fn format_duration_minutes_and_seconds() {
    assert_eq!(format_duration(125.4), "2m 05s");
    assert_eq!(format_duration(60.0), "1m 00s");
}

#[test]
fn format_duration_seconds_only() {
    assert_eq!(format_duration(42.0), "42s");
}

#[test]
fn format_duration_handles_zero_and_nan() {
    assert_eq!(format_duration(0.0), "0s");
    assert_eq!(format_duration(-3.0), "0s");
    assert_eq!(format_duration(f64::NAN), "0s");
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(5, 0), 5);
}

#[test]
fn format_number_drops_whole_fraction() {
    assert_eq!(format_number(11.0), "11");
    assert_eq!(format_number(-3.0), "-3");
    assert_eq!(format_number(2.5), "2.5");
}
