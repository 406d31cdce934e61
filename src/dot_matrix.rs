use serde::Serialize;

use crate::models::DotStatus;

// One status per day of the year, day numbers are 1-based:
//     day < day_of_year  -> Passed
//     day == day_of_year -> Today
//     day > day_of_year  -> Future
pub fn build_dot_statuses(day_of_year: u32, total_days: u32) -> Vec<DotStatus> {
    (1..=total_days)
        .map(|day| {
            if day < day_of_year {
                DotStatus::Passed
            } else if day == day_of_year {
                DotStatus::Today
            } else {
                DotStatus::Future
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DotTally {
    pub passed: usize,
    pub today: usize,
    pub future: usize,
}

// Count each status, used for the dot card caption
pub fn tally(dots: &[DotStatus]) -> DotTally {
    dots.iter().fold(DotTally::default(), |mut t, d| {
        match d {
            DotStatus::Passed => t.passed += 1,
            DotStatus::Today => t.today += 1,
            DotStatus::Future => t.future += 1,
        }
        t
    })
}
