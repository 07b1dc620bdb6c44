use chrono::NaiveDate;
use serde::Serialize;

use crate::grid::{
  CalendarCell,
  MonthGrid
};
use crate::{
  Meeting,
  Task
};

/// An agenda item that falls on a
/// calendar day.
pub trait Dated {
  fn calendar_date(
    &self
  ) -> Option<NaiveDate>;
}

/// Items whose calendar date equals
/// `date`, in input order. Items without
/// a readable date never match.
pub fn items_on<'a, T: Dated>(
  date: NaiveDate,
  items: &'a [T]
) -> Vec<&'a T> {
  items
    .iter()
    .filter(|item| {
      item.calendar_date() == Some(date)
    })
    .collect()
}

pub fn tasks_for_day(
  date: NaiveDate,
  tasks: &[Task]
) -> Vec<&Task> {
  items_on(date, tasks)
}

pub fn meetings_for_day(
  date: NaiveDate,
  meetings: &[Meeting]
) -> Vec<&Meeting> {
  items_on(date, meetings)
}

#[derive(Debug, Clone, Serialize)]
pub struct DayAgenda<'a> {
  pub date:     NaiveDate,
  pub meetings: Vec<&'a Meeting>,
  pub tasks:    Vec<&'a Task>
}

/// Borrowed view of one entry in a day,
/// meetings before tasks.
#[derive(Debug, Clone, Copy)]
pub enum AgendaEntry<'a> {
  Meeting(&'a Meeting),
  Task(&'a Task)
}

impl AgendaEntry<'_> {
  pub fn title(&self) -> &str {
    match self {
      | Self::Meeting(m) => &m.title,
      | Self::Task(t) => &t.title
    }
  }

  pub fn tooltip(&self) -> String {
    match self {
      | Self::Meeting(m) => m.tooltip(),
      | Self::Task(t) => t.tooltip()
    }
  }

  pub fn is_meeting(&self) -> bool {
    matches!(self, Self::Meeting(_))
  }
}

impl<'a> DayAgenda<'a> {
  pub fn len(&self) -> usize {
    self.meetings.len() + self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn entries(
    &self
  ) -> impl Iterator<Item = AgendaEntry<'a>>
  + '_ {
    self
      .meetings
      .iter()
      .map(|m| AgendaEntry::Meeting(*m))
      .chain(
        self
          .tasks
          .iter()
          .map(|t| AgendaEntry::Task(*t))
      )
  }
}

pub fn agenda_for_day<'a>(
  date: NaiveDate,
  tasks: &'a [Task],
  meetings: &'a [Meeting]
) -> DayAgenda<'a> {
  DayAgenda {
    date,
    meetings: meetings_for_day(
      date, meetings
    ),
    tasks: tasks_for_day(date, tasks)
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCell<'a> {
  pub cell:   CalendarCell,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub agenda: Option<DayAgenda<'a>>
}

/// A month grid with every date cell
/// bucketed.
#[derive(Debug, Clone, Serialize)]
pub struct MonthAgenda<'a> {
  pub title:          String,
  pub leading_blanks: usize,
  pub cells:          Vec<MonthCell<'a>>
}

impl<'a> MonthAgenda<'a> {
  #[tracing::instrument(skip_all, fields(month = %grid.title()))]
  pub fn build(
    grid: MonthGrid,
    tasks: &'a [Task],
    meetings: &'a [Meeting]
  ) -> Self {
    let cells = grid
      .cells()
      .iter()
      .map(|cell| MonthCell {
        cell:   *cell,
        agenda: cell.date().map(|date| {
          agenda_for_day(
            date, tasks, meetings
          )
        })
      })
      .collect::<Vec<_>>();

    let placed: usize = cells
      .iter()
      .filter_map(|c| c.agenda.as_ref())
      .map(DayAgenda::len)
      .sum();
    tracing::debug!(
      tasks = tasks.len(),
      meetings = meetings.len(),
      placed,
      "bucketed agenda into month"
    );

    Self {
      title: grid.title(),
      leading_blanks: grid
        .leading_blanks(),
      cells
    }
  }

  /// Rows of seven cells; the final row
  /// stops at the last day of the month.
  pub fn weeks(
    &self
  ) -> impl Iterator<Item = &[MonthCell<'a>]>
  {
    self.cells.chunks(7)
  }

  pub fn day(
    &self,
    date: NaiveDate
  ) -> Option<&DayAgenda<'a>> {
    self
      .cells
      .iter()
      .filter_map(|c| c.agenda.as_ref())
      .find(|agenda| agenda.date == date)
  }
}
