use std::collections::HashMap;

use chrono::{Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::Task;

pub const WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// The 7-day window ending `week_shift` weeks before `today`, oldest day first.
pub fn week_window(today: NaiveDate, week_shift: u32) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_sub_days(Days::new(WINDOW_DAYS * u64::from(week_shift)))
        .unwrap_or(NaiveDate::MIN);
    let start = end
        .checked_sub_days(Days::new(WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// Completions per day over the window, counted by local date in `tz`.
pub fn weekly_completions<Tz: TimeZone>(
    tasks: &[Task],
    today: NaiveDate,
    week_shift: u32,
    tz: &Tz,
) -> Vec<DayCount> {
    let (start, end) = week_window(today, week_shift);
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for at in tasks.iter().filter_map(|t| t.completed_at) {
        let day = at.with_timezone(tz).date_naive();
        if day >= start && day <= end {
            *per_day.entry(day).or_default() += 1;
        }
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DayCount {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// `M/D–M/D` label for the window.
pub fn week_label(today: NaiveDate, week_shift: u32) -> String {
    let (start, end) = week_window(today, week_shift);
    format!("{}–{}", start.format("%-m/%-d"), end.format("%-m/%-d"))
}
