/*
Progress calculation logic.
Module is independent from HTTP / Axum and from the clock source for testing:
every function here takes a ClockReading and returns a fresh value.
*/

use crate::models::{AnnualProgress, ClockReading, PeriodKind, ProgressResult, TimeWindow};

const UNIT_HOURS: &str = "hours";
const UNIT_DAYS: &str = "days";

// hour + minute/60
pub fn decimal_hours(hour: u32, minute: u32) -> f64 {
    hour as f64 + minute as f64 / 60.0
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        // ClockReading months come from chrono and are always 1..=12
        _ => unreachable!("month out of range: {month}"),
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

// Parse "H:MM" / "HH:MM" into (hour, minute).
//
// Accepts 0..=24 hours and 0..=59 minutes; "24:00" is end-of-day,
// any other minute with hour 24 is rejected.
pub fn parse_time_string(s: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let h: u32 = parts[0].parse().ok()?;
    let m: u32 = parts[1].parse().ok()?;
    if h > 24 || m > 59 || (h == 24 && m != 0) {
        return None;
    }
    Some((h, m))
}

// Build the custom-window period from the two raw strings the user typed.
pub fn parse_window(start: &str, end: &str) -> Option<PeriodKind> {
    let (start_hour, start_minute) = parse_time_string(start)?;
    let (end_hour, end_minute) = parse_time_string(end)?;
    Some(PeriodKind::Window {
        window: TimeWindow { start_hour, start_minute, end_hour, end_minute },
        label: format!("{}-{}", start.trim(), end.trim()),
    })
}

/// Compute progress through the selected period at `now`.
///
/// Total for every valid reading; never rounds (formatting is the
/// renderer's job).
pub fn compute_progress(kind: &PeriodKind, now: &ClockReading) -> ProgressResult {
    match kind {
        PeriodKind::Today => today_progress(now),
        PeriodKind::Window { window, label } => window_progress(window, label, now),
        PeriodKind::Week => week_progress(now),
        PeriodKind::Month => month_progress(now),
        PeriodKind::Year => compute_annual_progress(now).progress,
    }
}

fn today_progress(now: &ClockReading) -> ProgressResult {
    let current = decimal_hours(now.hour, now.minute);
    ProgressResult {
        title: "Today".to_string(),
        current_label: now.hour.to_string(),
        total_label: "24".to_string(),
        unit: UNIT_HOURS.to_string(),
        percentage: current / 24.0 * 100.0,
    }
}

// Elapsed time is clamped to [0, total]: a reading outside the window
// reports 0% before it and 100% after it.
fn window_progress(window: &TimeWindow, label: &str, now: &ClockReading) -> ProgressResult {
    let current = decimal_hours(now.hour, now.minute);
    let start = window.start_hours();
    let end = window.end_hours();

    let (total, elapsed) = if window.crosses_midnight() {
        let total = (24.0 - start) + end;
        let elapsed = if current >= start {
            current - start
        } else {
            (24.0 - start) + current
        };
        (total, elapsed)
    } else {
        (end - start, current - start)
    };
    let elapsed = elapsed.clamp(0.0, total);

    let percentage = if total > 0.0 { elapsed / total * 100.0 } else { 0.0 };

    ProgressResult {
        title: label.to_string(),
        current_label: format!("{elapsed:.1}"),
        total_label: format!("{total:.1}"),
        unit: UNIT_HOURS.to_string(),
        percentage,
    }
}

fn week_progress(now: &ClockReading) -> ProgressResult {
    let current_day = now.weekday + 1; // Monday = 1
    let value = (current_day - 1) as f64 + decimal_hours(now.hour, now.minute) / 24.0;
    ProgressResult {
        title: "This Week".to_string(),
        current_label: current_day.to_string(),
        total_label: "7".to_string(),
        unit: UNIT_DAYS.to_string(),
        percentage: value / 7.0 * 100.0,
    }
}

fn month_progress(now: &ClockReading) -> ProgressResult {
    let total = days_in_month(now.year, now.month);
    let value = (now.day - 1) as f64 + decimal_hours(now.hour, now.minute) / 24.0;
    ProgressResult {
        title: "This Month".to_string(),
        current_label: now.day.to_string(),
        total_label: total.to_string(),
        unit: UNIT_DAYS.to_string(),
        percentage: value / total as f64 * 100.0,
    }
}

pub fn compute_annual_progress(now: &ClockReading) -> AnnualProgress {
    let total = days_in_year(now.year);
    let value = (now.day_of_year - 1) as f64 + decimal_hours(now.hour, now.minute) / 24.0;
    AnnualProgress {
        progress: ProgressResult {
            title: "This Year".to_string(),
            current_label: now.day_of_year.to_string(),
            total_label: total.to_string(),
            unit: UNIT_DAYS.to_string(),
            percentage: value / total as f64 * 100.0,
        },
        year: now.year,
        day_of_year: now.day_of_year,
        total_days_in_year: total,
    }
}
