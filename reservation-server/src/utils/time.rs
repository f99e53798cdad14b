//! Time helpers for the business timezone
//!
//! Reservation dates and times are wall-clock values in the restaurant's
//! timezone. Every comparison against "now" happens on local naive values,
//! so DST transitions never shift a booking.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

const FORMAT_MESSAGE: &str =
    "'reservation_date' or 'reservation_time' field are in incorrect format";

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, FORMAT_MESSAGE)
            .with_detail("field", "reservation_date")
            .with_detail("value", date)
    })
}

/// Parse a time string (HH:MM or HH:MM:SS)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    let trimmed = time.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::InvalidFormat, FORMAT_MESSAGE)
                .with_detail("field", "reservation_time")
                .with_detail("value", time)
        })
}

/// Parse an IANA timezone name (e.g. `America/New_York`)
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| format!("Invalid timezone '{}': {}", name, e))
}

/// Current instant in the business timezone
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Render a time the way guests read it (`10:30AM`)
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M%p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2030-01-07").unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
        );
        let err = parse_date("07/01/2030").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.field(), Some("reservation_date"));
        assert!(parse_date("2030-02-30").is_err());
    }

    #[test]
    fn test_parse_time_accepts_both_forms() {
        let expected = NaiveTime::from_hms_opt(18, 45, 0).unwrap();
        assert_eq!(parse_time("18:45").unwrap(), expected);
        assert_eq!(parse_time("18:45:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time("quarter past six").unwrap_err();
        assert_eq!(err.message, FORMAT_MESSAGE);
        assert_eq!(err.field(), Some("reservation_time"));
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Madrid").unwrap(), chrono_tz::Europe::Madrid);
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(NaiveTime::from_hms_opt(10, 30, 0).unwrap()), "10:30AM");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(22, 30, 0).unwrap()), "10:30PM");
        assert_eq!(format_clock(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "9:05AM");
    }
}
