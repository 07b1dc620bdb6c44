use chrono::{
  Datelike,
  Days,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

pub const WEEKDAY_LABELS: [&str; 7] = [
  "Sun", "Mon", "Tue", "Wed", "Thu",
  "Fri", "Sat"
];

const MONTH_NAMES: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December"
];

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(
  tag = "kind",
  content = "date",
  rename_all = "lowercase"
)]
pub enum CalendarCell {
  Blank,
  Day(NaiveDate)
}

impl CalendarCell {
  pub fn date(&self) -> Option<NaiveDate> {
    match self {
      | Self::Blank => None,
      | Self::Day(date) => Some(*date)
    }
  }

  pub fn is_blank(&self) -> bool {
    matches!(self, Self::Blank)
  }
}

/// Cells of one month, Sunday-first,
/// padded at the front only.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct MonthGrid {
  first_day:      NaiveDate,
  leading_blanks: usize,
  cells:          Vec<CalendarCell>
}

impl MonthGrid {
  pub fn build(
    reference: NaiveDate
  ) -> Self {
    let first_day = reference
      - Days::new(u64::from(
        reference.day0()
      ));
    let leading_blanks = first_day
      .weekday()
      .num_days_from_sunday()
      as usize;

    let mut cells = vec![
      CalendarCell::Blank;
      leading_blanks
    ];
    cells.extend(
      first_day
        .iter_days()
        .take_while(|day| {
          day.month() == first_day.month()
        })
        .map(CalendarCell::Day)
    );

    tracing::trace!(
      first_day = %first_day,
      leading_blanks,
      cells = cells.len(),
      "built month grid"
    );

    Self {
      first_day,
      leading_blanks,
      cells
    }
  }

  pub fn year(&self) -> i32 {
    self.first_day.year()
  }

  pub fn month(&self) -> u32 {
    self.first_day.month()
  }

  pub fn first_day(&self) -> NaiveDate {
    self.first_day
  }

  pub fn last_day(&self) -> NaiveDate {
    self
      .cells
      .last()
      .and_then(CalendarCell::date)
      .unwrap_or(self.first_day)
  }

  pub fn days_in_month(&self) -> usize {
    self.cells.len() - self.leading_blanks
  }

  pub fn leading_blanks(&self) -> usize {
    self.leading_blanks
  }

  pub fn cells(&self) -> &[CalendarCell] {
    &self.cells
  }

  pub fn contains(
    &self,
    date: NaiveDate
  ) -> bool {
    date.year() == self.year()
      && date.month() == self.month()
  }

  /// `October 2026`
  pub fn title(&self) -> String {
    format!(
      "{} {}",
      MONTH_NAMES[self.first_day.month0()
        as usize],
      self.year()
    )
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    Datelike,
    NaiveDate
  };

  use super::{
    CalendarCell,
    MonthGrid
  };

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn thirty_day_month_starting_wednesday()
   {
    // April 2026 starts on a Wednesday.
    let grid =
      MonthGrid::build(ymd(2026, 4, 19));
    assert_eq!(grid.leading_blanks(), 3);
    assert_eq!(grid.days_in_month(), 30);
    assert_eq!(grid.cells().len(), 33);
    assert!(
      grid.cells()[..3]
        .iter()
        .all(CalendarCell::is_blank)
    );
    assert_eq!(
      grid.cells()[3],
      CalendarCell::Day(ymd(2026, 4, 1))
    );
    assert_eq!(
      grid.last_day(),
      ymd(2026, 4, 30)
    );
  }

  #[test]
  fn cell_count_matches_blanks_plus_days()
   {
    for year in [2023, 2024, 2026, 2100]
    {
      for month in 1..=12 {
        let first = ymd(year, month, 1);
        let grid = MonthGrid::build(first);
        let expected_blanks = first
          .weekday()
          .num_days_from_sunday()
          as usize;
        let expected_days = first
          .iter_days()
          .take_while(|d| d.month() == month)
          .count();

        assert_eq!(
          grid.leading_blanks(),
          expected_blanks,
          "{year}-{month}"
        );
        assert_eq!(
          grid.cells().len(),
          expected_blanks + expected_days,
          "{year}-{month}"
        );
      }
    }
  }

  #[test]
  fn leap_february_has_twenty_nine_days()
   {
    assert_eq!(
      MonthGrid::build(ymd(2024, 2, 10))
        .days_in_month(),
      29
    );
    assert_eq!(
      MonthGrid::build(ymd(2026, 2, 10))
        .days_in_month(),
      28
    );
  }

  #[test]
  fn december_does_not_spill_into_january()
   {
    let grid =
      MonthGrid::build(ymd(2026, 12, 31));
    assert_eq!(
      grid.first_day(),
      ymd(2026, 12, 1)
    );
    assert_eq!(
      grid.last_day(),
      ymd(2026, 12, 31)
    );
    assert!(
      !grid.contains(ymd(2027, 1, 1))
    );
  }

  #[test]
  fn month_starting_sunday_has_no_blanks()
   {
    // February 2026 starts on a Sunday.
    let grid =
      MonthGrid::build(ymd(2026, 2, 1));
    assert_eq!(grid.leading_blanks(), 0);
    assert_eq!(grid.cells().len(), 28);
  }

  #[test]
  fn rebuilding_is_idempotent() {
    let reference = ymd(2026, 10, 16);
    assert_eq!(
      MonthGrid::build(reference),
      MonthGrid::build(reference)
    );
    assert_eq!(
      MonthGrid::build(reference),
      MonthGrid::build(ymd(2026, 10, 1))
    );
  }

  #[test]
  fn title_uses_full_month_name() {
    assert_eq!(
      MonthGrid::build(ymd(2026, 10, 16))
        .title(),
      "October 2026"
    );
    assert_eq!(
      MonthGrid::build(ymd(2027, 1, 3))
        .title(),
      "January 2027"
    );
  }
}
