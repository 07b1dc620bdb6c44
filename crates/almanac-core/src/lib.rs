pub mod cli;
pub mod commands;
pub mod config;
pub mod datetime;
pub mod render;
pub mod source;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting almanac CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.almanacrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let source = match cli.agenda.as_deref()
  {
    | Some(path) => {
      source::AgendaSource::snapshot_file(
        path
      )
    }
    | None => {
      let data_dir =
        config::resolve_data_dir(
          &cfg,
          cli.data.as_deref()
        )
        .context(
          "failed to resolve data \
           directory"
        )?;
      source::AgendaSource::open(
        &data_dir
      )
    }
  };
  let snapshot = source
    .load()
    .context("failed to load agenda")?;

  let today = datetime::local_today();
  let reference = match cli.date.as_deref()
  {
    | Some(expr) => {
      datetime::parse_date_expr(
        expr, today
      )?
    }
    | None => today
  };

  let settings =
    config::CalendarSettings::from_config(
      &cfg
    )?;
  let renderer =
    render::Renderer::new(settings);
  let inv = cli::Invocation::parse(
    &cfg, cli.rest
  )?;

  commands::dispatch(
    &commands::CommandContext {
      snapshot: &snapshot,
      renderer: &renderer,
      reference,
      today
    },
    inv
  )?;

  info!("done");
  Ok(())
}
