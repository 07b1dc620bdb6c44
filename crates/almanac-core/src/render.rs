use std::io::{self, IsTerminal, Write};

use almanac_shared::{AgendaEntry, CalendarCell, DayAgenda, MonthAgenda, WEEKDAY_LABELS};
use chrono::{Datelike, NaiveDate};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::CalendarSettings;

const MEETING_MARK: &str = ">";
const TASK_MARK: &str = "-";

#[derive(Debug, Clone)]
pub struct Renderer {
    settings: CalendarSettings,
    color: bool,
}

impl Renderer {
    pub fn new(settings: CalendarSettings) -> Self {
        let color = settings.color && io::stdout().is_terminal();
        Self { settings, color }
    }

    /// Renderer that never emits escape codes, whatever the terminal.
    pub fn plain(settings: CalendarSettings) -> Self {
        Self {
            settings,
            color: false,
        }
    }

    #[tracing::instrument(skip(self, writer, month), fields(month = %month.title))]
    pub fn write_month<W: Write>(
        &self,
        mut writer: W,
        month: &MonthAgenda<'_>,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let width = self.settings.cell_width;

        writeln!(writer, "{}", self.paint(&month.title, "1"))?;

        let header = WEEKDAY_LABELS
            .iter()
            .map(|label| pad(label, width))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", header.trim_end())?;
        writeln!(writer, "{}", rule(width))?;

        for week in month.weeks() {
            let columns = week
                .iter()
                .map(|cell| self.cell_lines(cell.cell, cell.agenda.as_ref(), today))
                .collect::<Vec<_>>();
            let height = columns.iter().map(Vec::len).max().unwrap_or(0);

            for row in 0..height {
                let line = columns
                    .iter()
                    .map(|lines| match lines.get(row) {
                        Some(text) => text.clone(),
                        None => " ".repeat(width),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(writer, "{}", line.trim_end())?;
            }
            writeln!(writer, "{}", rule(width))?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, writer, agenda), fields(date = %agenda.date))]
    pub fn write_day<W: Write>(&self, mut writer: W, agenda: &DayAgenda<'_>) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{}",
            self.paint(&agenda.date.format("%A %Y-%m-%d").to_string(), "1")
        )?;

        if agenda.is_empty() {
            writeln!(writer, "no entries")?;
            return Ok(());
        }

        for entry in agenda.entries() {
            match entry {
                AgendaEntry::Meeting(meeting) => {
                    writeln!(writer, "{}  {}", self.paint("meeting", "34"), meeting.tooltip())?;
                }
                AgendaEntry::Task(task) => {
                    writeln!(writer, "task     {}", task.tooltip())?;
                }
            }
        }

        Ok(())
    }

    /// Every returned line is exactly `cell_width` columns wide once escape
    /// codes are ignored.
    fn cell_lines(
        &self,
        cell: CalendarCell,
        agenda: Option<&DayAgenda<'_>>,
        today: NaiveDate,
    ) -> Vec<String> {
        let width = self.settings.cell_width;
        let Some(date) = cell.date() else {
            return vec![" ".repeat(width)];
        };

        let mut lines = Vec::new();
        let label = if date == today {
            let marked = pad(&format!("[{}]", date.day()), width);
            self.paint(&marked, "1;34")
        } else {
            pad(&date.day().to_string(), width)
        };
        lines.push(label);

        let Some(agenda) = agenda else {
            return lines;
        };

        let total = agenda.len();
        let shown = match self.settings.max_items {
            0 => total,
            limit => total.min(limit),
        };

        for entry in agenda.entries().take(shown) {
            lines.push(self.entry_line(entry, width));
        }

        let hidden = total - shown;
        if hidden > 0 {
            lines.push(pad(&format!("+{hidden} more"), width));
        }

        lines
    }

    fn entry_line(&self, entry: AgendaEntry<'_>, width: usize) -> String {
        let mark = if entry.is_meeting() { MEETING_MARK } else { TASK_MARK };
        let text = pad(&format!("{mark} {}", entry.title()), width);
        if entry.is_meeting() {
            self.paint(&text, "34")
        } else {
            text
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn rule(width: usize) -> String {
    "-".repeat(width * 7 + 6)
}

/// Truncates by display width and right-pads to exactly `width` columns.
pub fn pad(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        let padding = width - UnicodeWidthStr::width(text);
        return format!("{text}{}", " ".repeat(padding));
    }

    let budget = width.saturating_sub(1);
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('~');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::pad;

    #[test]
    fn pad_fills_short_text() {
        assert_eq!(pad("ab", 5), "ab   ");
    }

    #[test]
    fn pad_truncates_long_text_with_marker() {
        assert_eq!(pad("Quarterly review", 8), "Quarter~");
    }

    #[test]
    fn pad_counts_wide_characters() {
        let padded = pad("会議の準備をする", 7);
        assert_eq!(UnicodeWidthStr::width(padded.as_str()), 7);
        assert!(padded.ends_with('~') || padded.ends_with(' '));
    }
}
