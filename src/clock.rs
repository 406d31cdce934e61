use chrono::{Datelike, Timelike};
use chrono_tz::Tz;

use crate::host::EventLog;
use crate::models::ClockReading;

impl ClockReading {
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            weekday: dt.weekday().num_days_from_monday(),
            day_of_year: dt.ordinal(),
        }
    }
}

/// Read "now" in `timezone`.
///
/// An unknown zone name falls back to the system local time. The fallback
/// changes every computed figure, so it is always reported as a warning.
pub fn resolve_clock(timezone: &str, debug: bool, log: &dyn EventLog) -> ClockReading {
    let reading = match timezone.parse::<Tz>() {
        Ok(tz) => {
            if debug {
                log.info(&format!("[time debug] using timezone {timezone}"));
            }
            ClockReading::from_datetime(&chrono::Utc::now().with_timezone(&tz))
        }
        Err(e) => {
            log.warn(&format!(
                "timezone {timezone:?} is invalid, using system local time: {e}"
            ));
            ClockReading::from_datetime(&chrono::Local::now())
        }
    };

    if debug {
        log.info(&format!(
            "[time debug] now: {:04}-{:02}-{:02} {:02}:{:02} (weekday {}, day {} of year)",
            reading.year,
            reading.month,
            reading.day,
            reading.hour,
            reading.minute,
            reading.weekday,
            reading.day_of_year,
        ));
    }

    reading
}
