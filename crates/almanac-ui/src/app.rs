use almanac_shared::AgendaSnapshot;
use chrono::Local;
use gloo::net::http::Request;
use yew::{
  Html,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::components::CalendarView;
use crate::config::load_calendar_config;

async fn fetch_agenda(
  url: &str
) -> Result<AgendaSnapshot, String> {
  let response = Request::get(url)
    .send()
    .await
    .map_err(|err| err.to_string())?;
  if !response.ok() {
    return Err(format!(
      "HTTP {} fetching {url}",
      response.status()
    ));
  }
  response
    .json::<AgendaSnapshot>()
    .await
    .map_err(|err| err.to_string())
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_state(load_calendar_config);
  let snapshot =
    use_state(AgendaSnapshot::default);

  {
    let snapshot = snapshot.clone();
    let url = config.agenda_url.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match fetch_agenda(&url).await {
            | Ok(loaded) => {
              tracing::info!(
                tasks = loaded.tasks.len(),
                meetings = loaded.meetings.len(),
                "loaded agenda"
              );
              snapshot.set(loaded);
            }
            | Err(error) => {
              tracing::error!(%error, url = %url, "failed loading agenda; showing empty month");
            }
          }
        }
      );
      || ()
    });
  }

  let today = Local::now().date_naive();

  html! {
      <CalendarView
          title={config.title.clone()}
          subtitle={config.subtitle.clone()}
          snapshot={(*snapshot).clone()}
          today={today}
      />
  }
}
