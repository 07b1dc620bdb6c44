use almanac_shared::{
  AgendaSnapshot,
  WEEKDAY_LABELS
};
use chrono::NaiveDate;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::{
  CalendarHeader,
  DayCell
};

#[derive(Properties, PartialEq)]
pub struct CalendarViewProps {
  pub title:    String,
  pub subtitle: String,
  pub snapshot: AgendaSnapshot,
  pub today:    NaiveDate
}

#[function_component(CalendarView)]
pub fn calendar_view(
  props: &CalendarViewProps
) -> Html {
  let month = props
    .snapshot
    .month_agenda(props.today);

  html! {
      <div class="calendar">
          <CalendarHeader
              title={props.title.clone()}
              subtitle={props.subtitle.clone()}
              month_title={month.title.clone()}
          />
          <div class="calendar-frame">
              <div class="calendar-weekday-row">
                  {
                      for WEEKDAY_LABELS.iter().map(|label| html! {
                          <div key={*label} class="calendar-weekday">{ *label }</div>
                      })
                  }
              </div>
              <div class="calendar-grid calendar-month-grid">
                  {
                      for month.cells.iter().enumerate().map(|(idx, cell)| html! {
                          <DayCell
                              key={idx}
                              date={cell.cell.date()}
                              is_today={cell.cell.date() == Some(props.today)}
                              meetings={cell.agenda.as_ref().map(|a| a.meetings.iter().map(|m| (*m).clone()).collect::<Vec<_>>()).unwrap_or_default()}
                              tasks={cell.agenda.as_ref().map(|a| a.tasks.iter().map(|t| (*t).clone()).collect::<Vec<_>>()).unwrap_or_default()}
                          />
                      })
                  }
              </div>
          </div>
      </div>
  }
}
