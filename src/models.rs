use serde::{Deserialize, Serialize};

// Calendar/clock fields of "now" in the configured zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    pub year: i32,
    pub month: u32,       // 1..=12
    pub day: u32,         // 1..=31
    pub hour: u32,        // 0..=23
    pub minute: u32,      // 0..=59
    pub weekday: u32,     // 0 = Monday .. 6 = Sunday
    pub day_of_year: u32, // 1..=366
}

// Possibly midnight-crossing interval, e.g. 22:00-06:00.
// hour may be 24 only with minute 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl TimeWindow {
    pub fn start_hours(&self) -> f64 {
        self.start_hour as f64 + self.start_minute as f64 / 60.0
    }

    pub fn end_hours(&self) -> f64 {
        self.end_hour as f64 + self.end_minute as f64 / 60.0
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end_hours() < self.start_hours()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeriodKind {
    Today,
    Window { window: TimeWindow, label: String }, // label: "14:00-21:00"
    Week,
    Month,
    Year,
}

// Annual card layout: 0 = progress bar, 1 = one dot per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearStyle {
    #[default]
    Bar,
    Dots,
}

impl YearStyle {
    pub fn from_selector(n: i64) -> Option<Self> {
        match n {
            0 => Some(YearStyle::Bar),
            1 => Some(YearStyle::Dots),
            _ => None,
        }
    }
}

// What a command asks for, after argument validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRequest {
    pub period: PeriodKind,
    pub style: YearStyle,
}

impl ProgressRequest {
    pub fn new(period: PeriodKind) -> Self {
        Self { period, style: YearStyle::Bar }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressResult {
    pub title: String,
    pub current_label: String,
    pub total_label: String,
    pub unit: String,
    pub percentage: f64, // ratio * 100, not rounded
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualProgress {
    pub progress: ProgressResult,
    pub year: i32,
    pub day_of_year: u32,
    pub total_days_in_year: u32, // 365 | 366
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DotStatus {
    Passed,
    Today,
    Future,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timezone: String,  // IANA name, e.g. "Asia/Shanghai"
    pub debug_time: bool,  // log the resolved clock on every request
    pub bind_addr: String, // "127.0.0.1:3000"
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "Asia/Shanghai".to_string(),
            debug_time: false,
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}
