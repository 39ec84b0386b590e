//! Month grid for the full date picker.

use std::collections::HashSet;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::date::DateToken;

/// First day of a displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor(NaiveDate);

impl MonthCursor {
    /// Month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Initial month for the picker: the selected date, else the most recent
    /// date with data, else the month of `today`.
    #[must_use]
    pub fn initial(tokens: &[DateToken], selected: Option<&DateToken>, today: NaiveDate) -> Self {
        selected
            .and_then(|token| token.normalize().date())
            .or_else(|| tokens.iter().filter_map(|t| t.normalize().date()).max())
            .map_or_else(|| Self::containing(today), Self::containing)
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 to 12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Previous month.
    #[must_use]
    pub fn prev(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map_or(self, Self)
    }

    /// Next month.
    #[must_use]
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map_or(self, Self)
    }

    /// Whether moving forward stays out of the future.
    #[must_use]
    pub fn can_advance(self, today: NaiveDate) -> bool {
        let next = self.next();
        next != self && next.0 <= today
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The day.
    pub date: NaiveDate,
    /// False for leading and trailing days from adjacent months.
    pub in_month: bool,
    /// At least one token falls on this day.
    pub has_data: bool,
    /// The selected token falls on this day.
    pub selected: bool,
    /// The day is after today and cannot be picked.
    pub future: bool,
}

impl CalendarDay {
    /// Whether clicking the day selects something.
    #[must_use]
    pub const fn is_pickable(&self) -> bool {
        self.in_month && self.has_data && !self.future
    }
}

/// A Monday-first month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// Displayed month.
    pub cursor: MonthCursor,
    /// Complete weeks covering the month.
    pub weeks: Vec<[CalendarDay; 7]>,
    /// Whether the next month may be shown.
    pub can_advance: bool,
}

impl MonthGrid {
    /// Builds the grid for `cursor`.
    #[must_use]
    pub fn build(
        cursor: MonthCursor,
        tokens: &[DateToken],
        selected: Option<&DateToken>,
        today: NaiveDate,
    ) -> Self {
        let with_data: HashSet<NaiveDate> =
            tokens.iter().filter_map(|t| t.normalize().date()).collect();
        let selected_day = selected.and_then(|t| t.normalize().date());

        let first = cursor.first_day();
        let lead = u64::from(first.weekday().num_days_from_monday());
        let mut day = first.checked_sub_days(Days::new(lead)).unwrap_or(first);

        let mut weeks = Vec::with_capacity(6);
        loop {
            let week = std::array::from_fn(|offset| {
                let date = day
                    .checked_add_days(Days::new(offset as u64))
                    .unwrap_or(day);
                CalendarDay {
                    date,
                    in_month: date.month() == cursor.month() && date.year() == cursor.year(),
                    has_data: with_data.contains(&date),
                    selected: selected_day == Some(date),
                    future: date > today,
                }
            });
            weeks.push(week);
            match day.checked_add_days(Days::new(7)) {
                Some(next) if next.month() == cursor.month() && next.year() == cursor.year() => {
                    day = next;
                }
                _ => break,
            }
        }

        Self {
            cursor,
            weeks,
            can_advance: cursor.can_advance(today),
        }
    }
}

/// First token, in the given order, that falls on `day`.
#[must_use]
pub fn token_for_day(tokens: &[DateToken], day: NaiveDate) -> Option<&DateToken> {
    tokens.iter().find(|t| t.normalize().date() == Some(day))
}

/// Tokens that cannot be placed on the grid.
#[must_use]
pub fn unplaced(tokens: &[DateToken]) -> Vec<&DateToken> {
    tokens
        .iter()
        .filter(|t| !t.normalize().is_parsed())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tokens(raw: &[&str]) -> Vec<DateToken> {
        raw.iter().copied().map(DateToken::new).collect()
    }

    #[test]
    fn test_grid_covers_month_monday_first() {
        // March 2024 starts on a Friday and ends on a Sunday.
        let cursor = MonthCursor::containing(ymd(2024, 3, 15));
        let grid = MonthGrid::build(cursor, &[], None, ymd(2024, 12, 31));
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0].date, ymd(2024, 2, 26));
        assert!(!grid.weeks[0][0].in_month);
        assert_eq!(grid.weeks[0][4].date, ymd(2024, 3, 1));
        assert_eq!(grid.weeks[4][6].date, ymd(2024, 3, 31));
        let in_month = grid.weeks.iter().flatten().filter(|d| d.in_month).count();
        assert_eq!(in_month, 31);
    }

    #[test]
    fn test_marks_exactly_days_with_data() {
        let dates = tokens(&["2024-03-01", "05/03/2024", "garbage", "2024-04-01"]);
        let cursor = MonthCursor::containing(ymd(2024, 3, 1));
        let grid = MonthGrid::build(cursor, &dates, Some(&dates[1]), ymd(2024, 12, 31));
        let marked: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flatten()
            .filter(|d| d.in_month && d.has_data)
            .map(|d| d.date)
            .collect();
        assert_eq!(marked, vec![ymd(2024, 3, 1), ymd(2024, 3, 5)]);
        let selected: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flatten()
            .filter(|d| d.selected)
            .map(|d| d.date)
            .collect();
        assert_eq!(selected, vec![ymd(2024, 3, 5)]);
    }

    #[test]
    fn test_future_days_not_pickable() {
        let dates = tokens(&["2024-03-10", "2024-03-20"]);
        let today = ymd(2024, 3, 15);
        let grid = MonthGrid::build(MonthCursor::containing(today), &dates, None, today);
        let pickable: Vec<NaiveDate> = grid
            .weeks
            .iter()
            .flatten()
            .filter(|d| d.is_pickable())
            .map(|d| d.date)
            .collect();
        assert_eq!(pickable, vec![ymd(2024, 3, 10)]);
        assert!(!grid.can_advance);
    }

    #[test]
    fn test_navigation() {
        let cursor = MonthCursor::containing(ymd(2024, 1, 20));
        assert_eq!(cursor.prev().first_day(), ymd(2023, 12, 1));
        assert_eq!(cursor.next().first_day(), ymd(2024, 2, 1));
        assert!(cursor.can_advance(ymd(2024, 2, 1)));
        assert!(!cursor.can_advance(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_token_for_day_picks_first() {
        let dates = tokens(&["01/03/2024", "2024-03-01", "2024-03-02"]);
        assert_eq!(
            token_for_day(&dates, ymd(2024, 3, 1)),
            Some(&DateToken::new("01/03/2024"))
        );
        assert_eq!(token_for_day(&dates, ymd(2024, 3, 3)), None);
    }

    #[test]
    fn test_initial_month() {
        let dates = tokens(&["2023-01-05", "2023-02-10", "bad"]);
        let today = ymd(2024, 6, 1);
        assert_eq!(
            MonthCursor::initial(&dates, None, today).first_day(),
            ymd(2023, 2, 1)
        );
        assert_eq!(
            MonthCursor::initial(&dates, Some(&dates[0]), today).first_day(),
            ymd(2023, 1, 1)
        );
        assert_eq!(
            MonthCursor::initial(&[], None, today).first_day(),
            ymd(2024, 6, 1)
        );
    }

    #[test]
    fn test_unplaced() {
        let dates = tokens(&["2024-03-01", "bad", ""]);
        assert_eq!(
            unplaced(&dates),
            vec![&DateToken::new("bad"), &DateToken::new("")]
        );
    }
}
