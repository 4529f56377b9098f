//! Date-range presets for the dashboard period picker

use chrono::{Datelike, Duration, NaiveDate};

/// Named reporting periods offered by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    Last7Days,
    Last14Days,
    Last30Days,
    Last60Days,
    Last90Days,
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
}

impl DatePreset {
    pub fn all() -> Vec<DatePreset> {
        vec![
            DatePreset::Today,
            DatePreset::Yesterday,
            DatePreset::ThisWeek,
            DatePreset::LastWeek,
            DatePreset::Last7Days,
            DatePreset::Last14Days,
            DatePreset::Last30Days,
            DatePreset::Last60Days,
            DatePreset::Last90Days,
            DatePreset::ThisMonth,
            DatePreset::LastMonth,
            DatePreset::ThisQuarter,
            DatePreset::LastQuarter,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::ThisWeek => "This Week",
            DatePreset::LastWeek => "Last Week",
            DatePreset::Last7Days => "Last 7 days",
            DatePreset::Last14Days => "Last 14 days",
            DatePreset::Last30Days => "Last 30 days",
            DatePreset::Last60Days => "Last 60 days",
            DatePreset::Last90Days => "Last 90 days",
            DatePreset::ThisMonth => "This Month",
            DatePreset::LastMonth => "Last Month",
            DatePreset::ThisQuarter => "This Quarter",
            DatePreset::LastQuarter => "Last Quarter",
        }
    }

    /// Resolve the preset to an inclusive from/to pair relative to `today`.
    /// Weeks run Sunday through Saturday, matching the upstream dashboard.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let days = |n: i64| today - Duration::days(n);
        let weekday = today.weekday().num_days_from_sunday() as i64;

        let (from, to) = match self {
            DatePreset::Today => (today, today),
            DatePreset::Yesterday => (days(1), days(1)),
            DatePreset::ThisWeek => (days(weekday), today),
            DatePreset::LastWeek => (days(7 + weekday), days(weekday + 1)),
            DatePreset::Last7Days => (days(7), today),
            DatePreset::Last14Days => (days(14), today),
            DatePreset::Last30Days => (days(30), today),
            DatePreset::Last60Days => (days(60), today),
            DatePreset::Last90Days => (days(90), today),
            DatePreset::ThisMonth => (start_of_month(today), today),
            DatePreset::LastMonth => {
                let prev = start_of_month(today) - Duration::days(1);
                (start_of_month(prev), prev)
            }
            DatePreset::ThisQuarter => (start_of_quarter(today), end_of_quarter(today)),
            DatePreset::LastQuarter => {
                let prev = start_of_quarter(today) - Duration::days(1);
                (start_of_quarter(prev), end_of_quarter(prev))
            }
        };

        DateRange { from, to }
    }
}

/// Inclusive reporting period, either from a preset or a custom selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn format(&self) -> String {
        format!("{} - {}", self.from.format("%b %d, %Y"), self.to.format("%b %d, %Y"))
    }
}

/// Active picker selection: a named preset keeps its label, a custom range
/// renders the formatted dates instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    Preset(DatePreset),
    Custom(DateRange),
}

impl PeriodSelection {
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self {
            PeriodSelection::Preset(preset) => preset.resolve(today),
            PeriodSelection::Custom(range) => *range,
        }
    }

    pub fn label(&self, today: NaiveDate) -> String {
        match self {
            PeriodSelection::Preset(preset) => preset.label().to_string(),
            PeriodSelection::Custom(_) => self.range(today).format(),
        }
    }
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

fn end_of_quarter(date: NaiveDate) -> NaiveDate {
    let start = start_of_quarter(date);
    let next = if start.month() >= 10 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 3, 1)
    };
    next.map(|d| d - Duration::days(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_and_yesterday() {
        let today = date(2024, 11, 20); // a Wednesday
        let range = DatePreset::Today.resolve(today);
        assert_eq!(range.from, today);
        assert_eq!(range.to, today);

        let range = DatePreset::Yesterday.resolve(today);
        assert_eq!(range.from, date(2024, 11, 19));
        assert_eq!(range.to, date(2024, 11, 19));
    }

    #[test]
    fn test_week_presets_run_sunday_to_saturday() {
        let today = date(2024, 11, 20); // Wednesday, week starts Sun 17th
        let this_week = DatePreset::ThisWeek.resolve(today);
        assert_eq!(this_week.from, date(2024, 11, 17));
        assert_eq!(this_week.to, today);

        let last_week = DatePreset::LastWeek.resolve(today);
        assert_eq!(last_week.from, date(2024, 11, 10));
        assert_eq!(last_week.to, date(2024, 11, 16));
    }

    #[test]
    fn test_rolling_windows() {
        let today = date(2024, 11, 20);
        let range = DatePreset::Last7Days.resolve(today);
        assert_eq!(range.from, date(2024, 11, 13));
        assert_eq!(range.to, today);

        let range = DatePreset::Last90Days.resolve(today);
        assert_eq!(range.from, date(2024, 8, 22));
    }

    #[test]
    fn test_month_presets() {
        let today = date(2024, 11, 20);
        let this_month = DatePreset::ThisMonth.resolve(today);
        assert_eq!(this_month.from, date(2024, 11, 1));
        assert_eq!(this_month.to, today);

        let last_month = DatePreset::LastMonth.resolve(today);
        assert_eq!(last_month.from, date(2024, 10, 1));
        assert_eq!(last_month.to, date(2024, 10, 31));
    }

    #[test]
    fn test_quarter_presets_cross_year_boundary() {
        let today = date(2024, 1, 15);
        let this_quarter = DatePreset::ThisQuarter.resolve(today);
        assert_eq!(this_quarter.from, date(2024, 1, 1));
        assert_eq!(this_quarter.to, date(2024, 3, 31));

        let last_quarter = DatePreset::LastQuarter.resolve(today);
        assert_eq!(last_quarter.from, date(2023, 10, 1));
        assert_eq!(last_quarter.to, date(2023, 12, 31));
    }

    #[test]
    fn test_custom_selection_labels_with_dates() {
        let today = date(2024, 11, 20);
        let selection = PeriodSelection::Custom(DateRange {
            from: date(2024, 5, 1),
            to: date(2024, 5, 31),
        });
        assert_eq!(selection.label(today), "May 01, 2024 - May 31, 2024");

        let preset = PeriodSelection::Preset(DatePreset::Last7Days);
        assert_eq!(preset.label(today), "Last 7 days");
    }
}
