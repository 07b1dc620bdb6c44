use std::io::{self, Write};

use almanac_shared::{AgendaSnapshot, agenda_for_day};
use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::cli::{Invocation, KNOWN_COMMANDS};
use crate::datetime::parse_date_expr;
use crate::render::Renderer;

/// Everything a command needs, resolved once by [`crate::run`].
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub snapshot: &'a AgendaSnapshot,
    pub renderer: &'a Renderer,
    /// Picks the displayed month.
    pub reference: NaiveDate,
    /// Gets the highlighted cell.
    pub today: NaiveDate,
}

pub fn dispatch(ctx: &CommandContext<'_>, inv: Invocation) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    dispatch_to(ctx, inv, &mut out)
}

#[instrument(skip(ctx, out), fields(reference = %ctx.reference))]
pub fn dispatch_to<W: Write>(
    ctx: &CommandContext<'_>,
    inv: Invocation,
    out: &mut W,
) -> anyhow::Result<()> {
    debug!(
        command = %inv.command,
        args = ?inv.command_args,
        "dispatching command"
    );

    match inv.command.as_str() {
        "month" => cmd_month(ctx, out),
        "day" => cmd_day(ctx, &inv.command_args, out),
        "cells" => cmd_cells(ctx, out),
        "help" => cmd_help(out),
        "version" => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}

#[instrument(skip(ctx, out))]
fn cmd_month<W: Write>(ctx: &CommandContext<'_>, out: &mut W) -> anyhow::Result<()> {
    let month = ctx.snapshot.month_agenda(ctx.reference);
    ctx.renderer.write_month(out, &month, ctx.today)
}

#[instrument(skip(ctx, args, out))]
fn cmd_day<W: Write>(
    ctx: &CommandContext<'_>,
    args: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    let date = match args {
        [] => ctx.reference,
        [expr] => parse_date_expr(expr, ctx.today)?,
        _ => return Err(anyhow!("day takes at most one date argument")),
    };

    let agenda = agenda_for_day(date, &ctx.snapshot.tasks, &ctx.snapshot.meetings);
    ctx.renderer.write_day(out, &agenda)
}

#[instrument(skip(ctx, out))]
fn cmd_cells<W: Write>(ctx: &CommandContext<'_>, out: &mut W) -> anyhow::Result<()> {
    let month = ctx.snapshot.month_agenda(ctx.reference);
    let json = serde_json::to_string_pretty(&month).context("failed to serialize month")?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn cmd_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "usage: almanac [--date EXPR] [--agenda FILE] [--data DIR] [COMMAND] [ARGS]"
    )?;
    writeln!(out)?;
    writeln!(out, "commands: {}", KNOWN_COMMANDS.join(", "))?;
    writeln!(out, "  month        month grid for the reference date (default)")?;
    writeln!(out, "  day [EXPR]   meetings then tasks for one date")?;
    writeln!(out, "  cells        month grid with bucketed entries as JSON")?;
    Ok(())
}
