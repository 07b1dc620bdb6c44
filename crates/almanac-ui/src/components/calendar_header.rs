use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CalendarHeaderProps {
  pub title:       String,
  pub subtitle:    String,
  pub month_title: String
}

/// Title block plus the month switcher
/// and filter button. The buttons carry
/// no handlers yet.
#[function_component(CalendarHeader)]
pub fn calendar_header(
  props: &CalendarHeaderProps
) -> Html {
  html! {
      <header class="calendar-header">
          <div>
              <h2 class="calendar-title">{ &props.title }</h2>
              <p class="calendar-subtitle">{ &props.subtitle }</p>
          </div>
          <div class="calendar-controls">
              <div class="calendar-month-switch">
                  <button type="button" class="btn icon" aria-label="Previous month">{ "‹" }</button>
                  <span class="calendar-month-label">{ &props.month_title }</span>
                  <button type="button" class="btn icon" aria-label="Next month">{ "›" }</button>
              </div>
              <button type="button" class="btn">{ "Filters" }</button>
          </div>
      </header>
  }
}
