use chrono::{FixedOffset, NaiveDate, NaiveTime};

use crate::error::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Builds the local-time-with-offset timestamp the reservation API expects:
/// `{date}T{time}:00.000{offset}`. The offset is appended verbatim; no
/// timezone conversion happens here. Both components are parsed strictly so
/// malformed input is caught before it reaches the remote API.
pub fn wire(date: &str, time: &str, offset: &str) -> Result<String, ApiError> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ApiError::InvalidFormat)?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| ApiError::InvalidFormat)?;
    Ok(format!(
        "{}T{}:00.000{}",
        date.format(DATE_FORMAT),
        time.format(TIME_FORMAT),
        offset
    ))
}

/// Real UTC conversion of a wall-clock date/time in a region's offset, for
/// rich display timestamps.
pub fn epoch_seconds(date: &str, time: &str, offset_hours: i32) -> Result<i64, ApiError> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ApiError::InvalidFormat)?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| ApiError::InvalidFormat)?;
    let offset = FixedOffset::east_opt(offset_hours * 3600).ok_or(ApiError::InvalidFormat)?;

    date.and_time(time)
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.timestamp())
        .ok_or(ApiError::InvalidFormat)
}

/// Discord's rich timestamp markup. `style` is one of Discord's single-letter
/// formats ("F" for full date/time).
pub fn discord_format(epoch_seconds: i64, style: &str) -> String {
    format!("<t:{}:{}>", epoch_seconds, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_concatenates_date_time_and_offset() {
        assert_eq!(
            wire("2024-04-09", "21:30", "-05:00").unwrap(),
            "2024-04-09T21:30:00.000-05:00"
        );
        assert_eq!(
            wire("2024-12-31", "00:00", "+11:00").unwrap(),
            "2024-12-31T00:00:00.000+11:00"
        );
    }

    #[test]
    fn wire_normalizes_unpadded_components() {
        // chrono accepts unpadded numbers; the output must still be canonical
        assert_eq!(
            wire("2024-4-9", "21:30", "-05:00").unwrap(),
            "2024-04-09T21:30:00.000-05:00"
        );
    }

    #[test]
    fn wire_rejects_malformed_input() {
        for (date, time) in [
            ("2024-13-01", "21:30"),
            ("2024-02-30", "21:30"),
            ("04-09-2024", "21:30"),
            ("2024-04-09", "25:00"),
            ("2024-04-09", "21:30:00"),
            ("tomorrow", "21:30"),
            ("2024-04-09", "evening"),
            ("", ""),
        ] {
            assert!(
                matches!(wire(date, time, "-05:00"), Err(ApiError::InvalidFormat)),
                "accepted {date:?} {time:?}"
            );
        }
    }

    #[test]
    fn epoch_applies_the_region_offset() {
        // 2024-04-09 21:30 at -05:00 is 2024-04-10 02:30 UTC
        assert_eq!(epoch_seconds("2024-04-09", "21:30", -5).unwrap(), 1712716200);
        // and the same wall clock at UTC is five hours earlier on the epoch
        assert_eq!(epoch_seconds("2024-04-09", "21:30", 0).unwrap(), 1712698200);
    }

    #[test]
    fn epoch_rejects_what_wire_rejects() {
        assert!(matches!(
            epoch_seconds("2024-04-31", "10:00", -5),
            Err(ApiError::InvalidFormat)
        ));
        assert!(matches!(
            epoch_seconds("2024-04-09", "24:30", -5),
            Err(ApiError::InvalidFormat)
        ));
    }

    #[test]
    fn discord_markup_shape() {
        assert_eq!(discord_format(1712716200, "F"), "<t:1712716200:F>");
        assert_eq!(discord_format(0, "R"), "<t:0:R>");
    }
}
