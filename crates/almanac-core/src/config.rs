use std::collections::BTreeMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const DEFAULT_CELL_WIDTH: usize =
  14;
pub const MIN_CELL_WIDTH: usize = 6;
pub const DEFAULT_MAX_ITEMS: usize = 3;

const ALMANACRC_ENV_VAR: &str =
  "ALMANACRC";

#[derive(Debug, Clone)]
pub struct Config {
  map:              BTreeMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = BTreeMap::new();
    map.insert(
      "data.location".to_string(),
      "~/.almanac".to_string()
    );
    map.insert(
      "default.command".to_string(),
      "month".to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );
    map.insert(
      "calendar.cell_width".to_string(),
      DEFAULT_CELL_WIDTH.to_string()
    );
    map.insert(
      "calendar.max_items".to_string(),
      DEFAULT_MAX_ITEMS.to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let env_value =
      std::env::var(ALMANACRC_ENV_VAR)
        .ok();
    Self::load_with_env(
      rc_override,
      env_value.as_deref()
    )
  }

  /// [`Config::load`] with the value of
  /// `$ALMANACRC` passed in.
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load_with_env(
    rc_override: Option<&Path>,
    almanacrc_env: Option<&str>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(
      rc_override,
      almanacrc_env
    )?;
    if let Some(path) = rc {
      info!(almanacrc = %path.display(), "loading almanacrc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no almanacrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .map
      .get(key)
      .map(|v| {
        parse_bool(v).ok_or_else(|| {
          anyhow!(
            "invalid boolean for {key}: \
             {v}"
          )
        })
      })
      .transpose()
  }

  pub fn get_usize(
    &self,
    key: &str
  ) -> anyhow::Result<Option<usize>> {
    self
      .map
      .get(key)
      .map(|v| {
        v.trim().parse::<usize>().with_context(
          || {
            format!(
              "invalid number for {key}: \
               {v}"
            )
          }
        )
      })
      .transpose()
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    let canonical =
      fs::canonicalize(&path)
        .with_context(|| {
          format!(
            "failed to resolve {}",
            path.display()
          )
        })?;
    self
      .loaded_files
      .push(canonical);

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        match fs::canonicalize(
          &include_path
        ) {
          | Ok(resolved)
            if self
              .loaded_files
              .contains(&resolved) =>
          {
            warn!(include = %include_path.display(), "include already loaded; skipping");
          }
          | Ok(resolved) => {
            self.load_file(&resolved)?;
          }
          | Err(_) => {
            warn!(include = %include_path.display(), "include file does not exist; skipping");
          }
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

/// Layout knobs for the terminal grid,
/// validated once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarSettings {
  pub color:      bool,
  pub cell_width: usize,
  /// 0 shows every entry.
  pub max_items:  usize
}

impl CalendarSettings {
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let color = cfg
      .get_bool("color")?
      .unwrap_or(true);
    let cell_width = cfg
      .get_usize("calendar.cell_width")?
      .unwrap_or(DEFAULT_CELL_WIDTH);
    if cell_width < MIN_CELL_WIDTH {
      return Err(anyhow!(
        "calendar.cell_width must be at \
         least {MIN_CELL_WIDTH}, got \
         {cell_width}"
      ));
    }
    let max_items = cfg
      .get_usize("calendar.max_items")?
      .unwrap_or(DEFAULT_MAX_ITEMS);

    Ok(Self {
      color,
      cell_width,
      max_items
    })
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get("data.location")
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    warn!(dir = %dir.display(), "data directory does not exist; agenda will be empty");
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>,
  almanacrc_env: Option<&str>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Some(rc_env) = almanacrc_env {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping almanacrc"
    );
    return Ok(None);
  };
  let candidate =
    home.join(".almanacrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".almanac"))
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

pub(crate) fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use super::{
    CalendarSettings,
    Config,
    DEFAULT_CELL_WIDTH,
    DEFAULT_MAX_ITEMS
  };

  #[test]
  fn defaults_produce_default_settings() {
    let settings =
      CalendarSettings::from_config(
        &Config::default()
      )
      .expect("defaults are valid");
    assert_eq!(
      settings,
      CalendarSettings {
        color:      true,
        cell_width: DEFAULT_CELL_WIDTH,
        max_items:  DEFAULT_MAX_ITEMS
      }
    );
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::default();
    cfg.apply_overrides([
      (
        "rc.color".to_string(),
        "off".to_string()
      ),
      (
        "calendar.max_items".to_string(),
        "0".to_string()
      )
    ]);
    let settings =
      CalendarSettings::from_config(&cfg)
        .expect("valid overrides");
    assert!(!settings.color);
    assert_eq!(settings.max_items, 0);
  }

  #[test]
  fn rejects_bad_values() {
    for (key, value) in [
      ("color", "purple"),
      ("calendar.cell_width", "wide"),
      ("calendar.cell_width", "3"),
      ("calendar.max_items", "-1")
    ] {
      let mut cfg = Config::default();
      cfg.apply_overrides([(
        key.to_string(),
        value.to_string()
      )]);
      assert!(
        CalendarSettings::from_config(&cfg)
          .is_err(),
        "{key}={value}"
      );
    }
  }

  #[test]
  fn get_bool_reports_garbage() {
    let mut cfg = Config::default();
    assert_eq!(
      cfg.get_bool("color").expect("on"),
      Some(true)
    );
    cfg.apply_overrides([(
      "color".to_string(),
      "maybe".to_string()
    )]);
    assert!(cfg.get_bool("color").is_err());
    assert_eq!(
      cfg
        .get_bool("missing")
        .expect("absent"),
      None
    );
  }
}
