use serde::Deserialize;

const CALENDAR_CONFIG_TOML: &str =
  include_str!(
    "../assets/calendar.toml"
  );

fn calendar_default_title() -> String
{
  "Agency Calendar".to_string()
}

fn calendar_default_subtitle()
-> String {
  "Schedule, deadlines, and \
   deliverables."
    .to_string()
}

fn calendar_default_agenda_url()
-> String {
  "agenda.json".to_string()
}

#[derive(
  Clone, Debug, PartialEq, Deserialize,
)]
pub struct CalendarConfig {
  #[serde(default)]
  pub version:    u32,
  #[serde(default = "calendar_default_title")]
  pub title:      String,
  #[serde(default = "calendar_default_subtitle")]
  pub subtitle:   String,
  #[serde(default = "calendar_default_agenda_url")]
  pub agenda_url: String
}

impl Default for CalendarConfig {
  fn default() -> Self {
    Self {
      version:    0,
      title:      calendar_default_title(
      ),
      subtitle:
        calendar_default_subtitle(),
      agenda_url:
        calendar_default_agenda_url()
    }
  }
}

pub fn load_calendar_config()
-> CalendarConfig {
  parse_calendar_config(
    CALENDAR_CONFIG_TOML
  )
}

fn parse_calendar_config(
  raw: &str
) -> CalendarConfig {
  match toml::from_str::<CalendarConfig>(
    raw
  ) {
    | Ok(mut config) => {
      sanitize_calendar_config(
        &mut config
      );
      tracing::info!(
        version = config.version,
        agenda_url = %config.agenda_url,
        "loaded calendar config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed parsing calendar config; using defaults");
      CalendarConfig::default()
    }
  }
}

fn sanitize_calendar_config(
  config: &mut CalendarConfig
) {
  if config.title.trim().is_empty() {
    config.title =
      calendar_default_title();
  }
  if config
    .agenda_url
    .trim()
    .is_empty()
  {
    config.agenda_url =
      calendar_default_agenda_url();
  }
}

#[cfg(test)]
mod tests {
  use super::{
    CalendarConfig,
    load_calendar_config,
    parse_calendar_config
  };

  #[test]
  fn embedded_config_parses() {
    let config = load_calendar_config();
    assert_eq!(config.version, 1);
    assert_eq!(
      config.agenda_url,
      "agenda.json"
    );
  }

  #[test]
  fn blank_values_fall_back_to_defaults()
   {
    let config = parse_calendar_config(
      "title = \"  \"\nagenda_url = \"\"\n"
    );
    assert_eq!(
      config.title,
      CalendarConfig::default().title
    );
    assert_eq!(
      config.agenda_url,
      "agenda.json"
    );
  }

  #[test]
  fn broken_toml_uses_defaults() {
    assert_eq!(
      parse_calendar_config("title = "),
      CalendarConfig::default()
    );
  }
}
