pub mod bucket;
pub mod dates;
pub mod grid;

use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};

pub use bucket::{
  AgendaEntry,
  DayAgenda,
  Dated,
  MonthAgenda,
  MonthCell,
  agenda_for_day,
  items_on,
  meetings_for_day,
  tasks_for_day
};
pub use dates::{
  RawDate,
  parse_calendar_date
};
pub use grid::{
  CalendarCell,
  MonthGrid,
  WEEKDAY_LABELS
};

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:       String,
  #[serde(default)]
  pub title:    String,
  #[serde(default, alias = "due_date")]
  pub due_date: RawDate
}

impl Task {
  pub fn tooltip(&self) -> String {
    self.title.clone()
  }
}

impl Dated for Task {
  fn calendar_date(
    &self
  ) -> Option<NaiveDate> {
    self.due_date.calendar_date()
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Meeting {
  pub id:       String,
  #[serde(default)]
  pub title:    String,
  #[serde(default)]
  pub time:     RawDate,
  #[serde(default)]
  pub duration: String
}

impl Meeting {
  pub fn tooltip(&self) -> String {
    format!(
      "{} ({})",
      self.title, self.duration
    )
  }
}

impl Dated for Meeting {
  fn calendar_date(
    &self
  ) -> Option<NaiveDate> {
    self.time.calendar_date()
  }
}

/// Both agenda lists as delivered by the data owner.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct AgendaSnapshot {
  #[serde(default)]
  pub tasks:    Vec<Task>,
  #[serde(default)]
  pub meetings: Vec<Meeting>
}

impl AgendaSnapshot {
  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
      && self.meetings.is_empty()
  }

  pub fn month_agenda(
    &self,
    reference: NaiveDate
  ) -> MonthAgenda<'_> {
    MonthAgenda::build(
      MonthGrid::build(reference),
      &self.tasks,
      &self.meetings
    )
  }
}
