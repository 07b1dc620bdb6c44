use almanac_shared::{
  Meeting,
  Task
};
use chrono::{
  Datelike,
  NaiveDate
};
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::{
  MeetingChip,
  TaskChip
};

#[derive(Properties, PartialEq)]
pub struct DayCellProps {
  /// `None` for the padding before
  /// day 1.
  pub date:     Option<NaiveDate>,
  #[prop_or_default]
  pub is_today: bool,
  #[prop_or_default]
  pub meetings: Vec<Meeting>,
  #[prop_or_default]
  pub tasks:    Vec<Task>
}

#[function_component(DayCell)]
pub fn day_cell(
  props: &DayCellProps
) -> Html {
  let Some(date) = props.date else {
    return html! {
        <div class="calendar-day-cell blank"></div>
    };
  };

  html! {
      <div class={classes!("calendar-day-cell", props.is_today.then_some("today"))}>
          <div class="calendar-day-label">{ date.day() }</div>
          <div class="calendar-entries">
              {
                  for props.meetings.iter().map(|meeting| html! {
                      <MeetingChip key={meeting.id.clone()} meeting={meeting.clone()} />
                  })
              }
              {
                  for props.tasks.iter().map(|task| html! {
                      <TaskChip key={task.id.clone()} task={task.clone()} />
                  })
              }
          </div>
      </div>
  }
}
