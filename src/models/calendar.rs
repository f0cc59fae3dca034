//! Calendar view state over the clips document.
//!
//! [`CalendarModel`] indexes the document once; [`CalendarState`] holds the
//! user's position (view, selected day, month/week index) and applies the
//! navigation rules.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::clip::{ClipsDoc, Day, Week};
use crate::utils::format::{format_iso_date, format_month_title, format_short_date, parse_date};

/// Maximum dots drawn per day cell before the `+N` overflow label.
pub const MAX_DOTS: u32 = 6;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
}

// ============================================================================
// Model
// ============================================================================

/// Indexed clips document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalendarModel {
    days: Vec<Day>,
    by_date: HashMap<String, usize>,
    /// Distinct `YYYY-MM` keys, sorted.
    pub months: Vec<String>,
    pub weeks: Vec<Week>,
}

impl CalendarModel {
    pub fn new(doc: ClipsDoc) -> Self {
        let mut by_date = HashMap::new();
        for (i, day) in doc.days.iter().enumerate() {
            by_date.insert(day.date.clone(), i);
        }

        let mut months: Vec<String> = doc.days.iter().map(|d| month_key(&d.date)).collect();
        months.sort();
        months.dedup();

        Self {
            days: doc.days,
            by_date,
            months,
            weeks: doc.weeks,
        }
    }

    pub fn day(&self, date: &str) -> Option<&Day> {
        self.by_date.get(date).map(|&i| &self.days[i])
    }

    pub fn clip_count(&self, date: &str) -> u32 {
        self.day(date).map_or(0, |d| d.clip_count)
    }

    /// Most recent day in the document.
    pub fn latest_day(&self) -> Option<&str> {
        self.days
            .iter()
            .filter_map(|d| d.naive_date().map(|n| (n, d.date.as_str())))
            .max_by_key(|(n, _)| *n)
            .map(|(_, date)| date)
    }

    /// First day of `month` in document order.
    pub fn first_day_in_month(&self, month: &str) -> Option<&str> {
        self.days
            .iter()
            .map(|d| d.date.as_str())
            .find(|date| date.starts_with(month))
    }

    /// Keep `persisted` if it names a known day, else fall back to the latest.
    pub fn resolve_selection(&self, persisted: Option<String>) -> Option<String> {
        match persisted {
            Some(date) if self.by_date.contains_key(&date) => Some(date),
            _ => self.latest_day().map(str::to_string),
        }
    }

    /// Month grid cells, Sunday first, with leading blanks and trailing
    /// padding to whole weeks.
    pub fn month_cells(&self, month: &str) -> Vec<Option<String>> {
        let Some((year, month)) = parse_month(month) else {
            return Vec::new();
        };
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Vec::new();
        };

        let mut cells = vec![None; first.weekday().num_days_from_sunday() as usize];
        for day in 1..=days_in_month(first) {
            cells.push(Some(format_iso_date(year, month, day)));
        }
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
    }

    /// Seven cells for a week, each day placed by its weekday.
    pub fn week_cells(week: &Week) -> [Option<String>; 7] {
        let mut cells: [Option<String>; 7] = Default::default();
        for day in &week.days {
            if let Some(date) = day.naive_date() {
                cells[date.weekday().num_days_from_sunday() as usize] = Some(day.date.clone());
            }
        }
        cells
    }

    /// Title for a month key ("May 2024").
    pub fn month_title(month: &str) -> String {
        parse_month(month)
            .map(|(y, m)| format_month_title(y, m))
            .unwrap_or_else(|| month.to_string())
    }

    /// Title for a week ("May 5 – May 11").
    pub fn week_title(week: &Week) -> String {
        match parse_date(&week.week_of) {
            Some(start) => format!(
                "{} – {}",
                format_short_date(start),
                format_short_date(start + Duration::days(6))
            ),
            None => week.week_of.clone(),
        }
    }
}

fn month_key(date: &str) -> String {
    date.chars().take(7).collect()
}

fn parse_month(month: &str) -> Option<(i32, u32)> {
    let (year, month) = month.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map_or(31, |n| (n - first).num_days() as u32)
}

/// Clamp `value` into `0..length`; 0 for empty collections.
pub fn clamp_index(value: isize, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    value.clamp(0, length as isize - 1) as usize
}

/// Dots to draw for `count` clips and the overflow beyond [`MAX_DOTS`].
pub fn dots(count: u32) -> (u32, Option<u32>) {
    let capped = count.min(MAX_DOTS);
    let overflow = (count > MAX_DOTS).then(|| count - MAX_DOTS);
    (capped, overflow)
}

// ============================================================================
// Navigation State
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalendarState {
    pub view: CalendarView,
    pub selection: Option<String>,
    pub month_index: usize,
    pub week_index: usize,
}

impl CalendarState {
    /// Position the calendar on the resolved selection.
    pub fn new(model: &CalendarModel, view: CalendarView, persisted: Option<String>) -> Self {
        let selection = model.resolve_selection(persisted);

        let month = selection
            .as_deref()
            .map(month_key)
            .or_else(|| model.months.last().cloned());
        let month_index = month
            .and_then(|m| model.months.iter().position(|k| *k == m))
            .unwrap_or(0);

        let week_index = selection
            .as_deref()
            .and_then(|sel| {
                model
                    .weeks
                    .iter()
                    .position(|w| w.days.iter().any(|d| d.date == sel))
            })
            .unwrap_or(0);

        Self {
            view,
            selection,
            month_index,
            week_index,
        }
    }

    pub fn current_month<'a>(&self, model: &'a CalendarModel) -> Option<&'a str> {
        model
            .months
            .get(self.month_index)
            .or_else(|| model.months.first())
            .map(String::as_str)
    }

    pub fn current_week<'a>(&self, model: &'a CalendarModel) -> Option<&'a Week> {
        model
            .weeks
            .get(self.week_index)
            .or_else(|| model.weeks.first())
    }

    /// Move one month or week. Selects the first day of the new interval
    /// when it has one; returns the newly selected date.
    pub fn shift(&mut self, model: &CalendarModel, direction: isize) -> Option<String> {
        let fallback = match self.view {
            CalendarView::Week => {
                self.week_index =
                    clamp_index(self.week_index as isize + direction, model.weeks.len());
                model
                    .weeks
                    .get(self.week_index)
                    .and_then(|w| w.days.first())
                    .map(|d| d.date.clone())
            }
            CalendarView::Month => {
                self.month_index =
                    clamp_index(self.month_index as isize + direction, model.months.len());
                model
                    .months
                    .get(self.month_index)
                    .and_then(|m| model.first_day_in_month(m))
                    .map(str::to_string)
            }
        };

        if let Some(date) = &fallback {
            self.selection = Some(date.clone());
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> CalendarModel {
        let doc: ClipsDoc = serde_json::from_value(json!({
            "days": [
                { "date": "2024-04-28", "clipCount": 2 },
                { "date": "2024-05-03", "clipCount": 9 },
                { "date": "2024-05-01", "clipCount": 1 }
            ],
            "weeks": [
                { "weekOf": "2024-04-28", "days": [{ "date": "2024-04-28" }, { "date": "2024-05-01" }, { "date": "2024-05-03" }] },
                { "weekOf": "2024-05-05", "days": [{ "date": "2024-05-06" }] }
            ]
        }))
        .unwrap();
        CalendarModel::new(doc)
    }

    #[test]
    fn test_months_sorted_and_distinct() {
        assert_eq!(model().months, vec!["2024-04", "2024-05"]);
    }

    #[test]
    fn test_selection_fallback() {
        let model = model();
        assert_eq!(model.resolve_selection(None).as_deref(), Some("2024-05-03"));
        assert_eq!(
            model.resolve_selection(Some("1999-01-01".into())).as_deref(),
            Some("2024-05-03")
        );
        assert_eq!(
            model.resolve_selection(Some("2024-04-28".into())).as_deref(),
            Some("2024-04-28")
        );
        assert_eq!(CalendarModel::default().resolve_selection(None), None);
    }

    #[test]
    fn test_initial_state() {
        let model = model();
        let state = CalendarState::new(&model, CalendarView::Month, Some("2024-04-28".into()));
        assert_eq!(state.month_index, 0);
        assert_eq!(state.week_index, 0);

        let state = CalendarState::new(&model, CalendarView::Week, None);
        assert_eq!(state.selection.as_deref(), Some("2024-05-03"));
        assert_eq!(state.month_index, 1);
    }

    #[test]
    fn test_month_cells() {
        // May 2024 starts on a Wednesday
        let cells = model().month_cells("2024-05");
        assert_eq!(cells.len(), 35);
        assert!(cells[..3].iter().all(Option::is_none));
        assert_eq!(cells[3].as_deref(), Some("2024-05-01"));
        assert_eq!(cells[33].as_deref(), Some("2024-05-31"));
        assert_eq!(cells[34], None);

        // February 2024 (leap year) starts on a Thursday
        let cells = model().month_cells("2024-02");
        assert_eq!(cells.iter().flatten().count(), 29);
        assert_eq!(cells.len() % 7, 0);

        assert!(model().month_cells("bogus").is_empty());
    }

    #[test]
    fn test_week_cells() {
        let model = model();
        let cells = CalendarModel::week_cells(&model.weeks[0]);
        assert_eq!(cells[0].as_deref(), Some("2024-04-28"));
        assert_eq!(cells[3].as_deref(), Some("2024-05-01"));
        assert_eq!(cells[5].as_deref(), Some("2024-05-03"));
        assert_eq!(cells[1], None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(CalendarModel::month_title("2024-05"), "May 2024");
        let model = model();
        assert_eq!(CalendarModel::week_title(&model.weeks[1]), "May 5 – May 11");
    }

    #[test]
    fn test_clamp_and_dots() {
        assert_eq!(clamp_index(-1, 3), 0);
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 0), 0);
        assert_eq!(dots(3), (3, None));
        assert_eq!(dots(9), (6, Some(3)));
        assert_eq!(dots(0), (0, None));
    }

    #[test]
    fn test_shift_month_selects_first_day_in_document_order() {
        let model = model();
        let mut state = CalendarState::new(&model, CalendarView::Month, Some("2024-04-28".into()));
        assert_eq!(state.shift(&model, 1).as_deref(), Some("2024-05-03"));
        assert_eq!(state.month_index, 1);
        // clamped at the end
        state.shift(&model, 1);
        assert_eq!(state.month_index, 1);
        assert_eq!(state.shift(&model, -5).as_deref(), Some("2024-04-28"));
    }

    #[test]
    fn test_shift_week() {
        let model = model();
        let mut state = CalendarState::new(&model, CalendarView::Week, None);
        assert_eq!(state.shift(&model, 1).as_deref(), Some("2024-05-06"));
        assert_eq!(state.week_index, 1);
        assert_eq!(state.selection.as_deref(), Some("2024-05-06"));
    }

    #[test]
    fn test_clip_count_lookup() {
        let model = model();
        assert_eq!(model.clip_count("2024-05-03"), 9);
        assert_eq!(model.clip_count("2024-05-04"), 0);
    }
}
