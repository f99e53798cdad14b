//! Opening hours

use chrono::{DateTime, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::utils::time::format_clock;

/// When the restaurant takes bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    /// First bookable time
    pub open: NaiveTime,
    /// Closing time; bookings at or after it are rejected
    pub close: NaiveTime,
    /// Latest bookable time (one hour before closing)
    pub last_seating: NaiveTime,
    /// Weekday the restaurant is closed
    pub closed_day: Weekday,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: hm(10, 30),
            close: hm(22, 30),
            last_seating: hm(21, 30),
            closed_day: Weekday::Tue,
        }
    }
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl BusinessHours {
    /// Run every calendar check in order, stopping at the first failure
    pub fn check(&self, date: NaiveDate, time: NaiveTime, now: DateTime<Tz>) -> AppResult<()> {
        self.check_open_day(date)?;
        check_in_future(date, time, now)?;
        self.check_opening(time)?;
        self.check_closing(time)?;
        self.check_last_seating(time)
    }

    pub fn check_open_day(&self, date: NaiveDate) -> AppResult<()> {
        use chrono::Datelike;

        if date.weekday() == self.closed_day {
            return Err(AppError::with_message(
                ErrorCode::ReservationClosedDay,
                format!(
                    "'reservation_date' field: restaurant is closed on {}",
                    weekday_name(self.closed_day)
                ),
            )
            .with_detail("field", "reservation_date"));
        }
        Ok(())
    }

    pub fn check_opening(&self, time: NaiveTime) -> AppResult<()> {
        if time < self.open {
            return Err(outside_hours(format!(
                "'reservation_time' field: restaurant is not open until {}",
                format_clock(self.open)
            )));
        }
        Ok(())
    }

    pub fn check_closing(&self, time: NaiveTime) -> AppResult<()> {
        if time >= self.close {
            return Err(outside_hours(format!(
                "'reservation_time' field: restaurant is closed after {}",
                format_clock(self.close)
            )));
        }
        Ok(())
    }

    pub fn check_last_seating(&self, time: NaiveTime) -> AppResult<()> {
        if time > self.last_seating {
            return Err(outside_hours(format!(
                "'reservation_time' field: reservation must be made at least an hour before closing ({})",
                format_clock(self.close)
            )));
        }
        Ok(())
    }
}

/// Reject bookings strictly before `now`, compared as local wall-clock time
pub fn check_in_future(date: NaiveDate, time: NaiveTime, now: DateTime<Tz>) -> AppResult<()> {
    if date.and_time(time) < now.naive_local() {
        return Err(AppError::with_message(
            ErrorCode::ReservationInPast,
            "'reservation_date' and 'reservation_time' field must be in the future",
        )
        .with_detail("field", "reservation_date"));
    }
    Ok(())
}

fn outside_hours(message: String) -> AppError {
    AppError::with_message(ErrorCode::ReservationOutsideHours, message)
        .with_detail("field", "reservation_time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_opening_boundary() {
        let hours = BusinessHours::default();
        let err = hours.check_opening(t(10, 29)).unwrap_err();
        assert_eq!(
            err.message,
            "'reservation_time' field: restaurant is not open until 10:30AM"
        );
        assert!(hours.check_opening(t(10, 30)).is_ok());
    }

    #[test]
    fn test_closing_boundary() {
        let hours = BusinessHours::default();
        assert!(hours.check_closing(t(22, 29)).is_ok());
        let err = hours.check_closing(t(22, 30)).unwrap_err();
        assert_eq!(
            err.message,
            "'reservation_time' field: restaurant is closed after 10:30PM"
        );
        assert_eq!(err.code, ErrorCode::ReservationOutsideHours);
    }

    #[test]
    fn test_last_seating_boundary() {
        let hours = BusinessHours::default();
        assert!(hours.check_last_seating(t(21, 30)).is_ok());
        let err = hours.check_last_seating(t(21, 31)).unwrap_err();
        assert_eq!(
            err.message,
            "'reservation_time' field: reservation must be made at least an hour before closing (10:30PM)"
        );
    }

    #[test]
    fn test_closed_on_tuesday() {
        let hours = BusinessHours::default();
        // 2030-01-08 is a Tuesday
        let err = hours
            .check_open_day(NaiveDate::from_ymd_opt(2030, 1, 8).unwrap())
            .unwrap_err();
        assert_eq!(
            err.message,
            "'reservation_date' field: restaurant is closed on tuesday"
        );
        assert!(
            hours
                .check_open_day(NaiveDate::from_ymd_opt(2030, 1, 7).unwrap())
                .is_ok()
        );
    }

    #[test]
    fn test_in_future_uses_local_wall_clock() {
        let tz: Tz = chrono_tz::America::New_York;
        // 2030-01-07 18:00 in New York is 23:00 UTC
        let now = tz.with_ymd_and_hms(2030, 1, 7, 18, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2030, 1, 7).unwrap();

        assert!(check_in_future(date, t(18, 0), now).is_ok());
        assert!(check_in_future(date, t(19, 0), now).is_ok());
        let err = check_in_future(date, t(17, 59), now).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationInPast);
    }

    #[test]
    fn test_check_order() {
        let hours = BusinessHours::default();
        let now = Tz::UTC.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();

        // Tuesday in the past at 9am: the closed-day rule wins
        let err = hours
            .check(NaiveDate::from_ymd_opt(2029, 12, 25).unwrap(), t(9, 0), now)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationClosedDay);

        // Monday in the past at 9am: past wins over opening
        let err = hours
            .check(NaiveDate::from_ymd_opt(2029, 12, 31).unwrap(), t(9, 0), now)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationInPast);

        // 22:29 passes closing but not last seating
        let err = hours
            .check(NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(), t(22, 29), now)
            .unwrap_err();
        assert!(err.message.contains("at least an hour before closing"));
    }
}
