use almanac_shared::{
  Meeting,
  Task
};
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct MeetingChipProps {
  pub meeting: Meeting
}

#[function_component(MeetingChip)]
pub fn meeting_chip(
  props: &MeetingChipProps
) -> Html {
  html! {
      <div class="calendar-chip meeting" title={props.meeting.tooltip()}>
          <span class="calendar-chip-icon">{ "▶ " }</span>
          <span>{ &props.meeting.title }</span>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskChipProps {
  pub task: Task
}

#[function_component(TaskChip)]
pub fn task_chip(
  props: &TaskChipProps
) -> Html {
  html! {
      <div class="calendar-chip task" title={props.task.tooltip()}>
          { &props.task.title }
      </div>
  }
}
