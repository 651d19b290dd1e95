use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Local, Utc};
use tasklane_core::badge::DueBadge;
use tasklane_core::page::PageState;
use tasklane_shared::{Task, TaskStats};
use unicode_width::UnicodeWidthStr;

/// One table cell: text plus an optional ANSI color code.
type Cell = (String, Option<&'static str>);

const RED: &str = "31";
const YELLOW: &str = "33";
const DIM: &str = "2";

pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip(self, rows, page))]
    pub fn print_task_table(
        &self,
        rows: &[(&Task, Option<DueBadge>)],
        page: PageState,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "ID".to_string(),
            "Title".to_string(),
            "Status".to_string(),
            "Pri".to_string(),
            "Due".to_string(),
            "Flag".to_string(),
            "Project".to_string(),
            "Tags".to_string(),
        ];

        let mut table = Vec::with_capacity(rows.len());
        for (task, badge) in rows {
            let due = task
                .due_date
                .map(format_date)
                .unwrap_or_default();

            let (flag, flag_color) = match badge {
                Some(DueBadge::Overdue) => ("overdue", Some(RED)),
                Some(DueBadge::DueSoon) => ("due soon", Some(YELLOW)),
                None => ("", None),
            };
            let due_color = match badge {
                Some(DueBadge::Overdue) => Some(RED),
                Some(DueBadge::DueSoon) => Some(YELLOW),
                None => None,
            };

            table.push(vec![
                (task.id.to_string(), Some(DIM)),
                (task.title.clone(), None),
                (task.status.as_str().to_string(), None),
                (task.priority.as_str().to_string(), None),
                (due, due_color),
                (flag.to_string(), flag_color),
                (task.project_name.clone().unwrap_or_default(), None),
                (task.tags.join(", "), None),
            ]);
        }

        self.write_table(&mut out, &headers, &table)?;
        writeln!(
            out,
            "page {} of {} ({} tasks, {} per page)",
            page.page,
            page.pages.max(1),
            page.total,
            page.limit.as_u32()
        )?;
        Ok(())
    }

    #[tracing::instrument(skip(self, stats))]
    pub fn print_stats(&self, stats: &TaskStats) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "total        {}", stats.total)?;
        writeln!(out, "todo         {}", stats.todo)?;
        writeln!(out, "in progress  {}", stats.in_progress)?;
        writeln!(out, "review       {}", stats.review)?;
        writeln!(out, "completed    {}", stats.completed)?;
        writeln!(out, "cancelled    {}", stats.cancelled)?;
        writeln!(out, "overdue      {}", self.paint(&stats.overdue_count.to_string(), RED))?;
        writeln!(
            out,
            "due soon     {}",
            self.paint(&stats.due_soon_count.to_string(), YELLOW)
        )?;
        if let Some(hours) = stats.avg_completion_hours {
            writeln!(out, "avg hours    {hours:.1}")?;
        }
        Ok(())
    }

    /// Pad on the unpainted text, then apply color, so ANSI codes never
    /// distort column widths.
    fn write_table(
        &self,
        out: &mut impl Write,
        headers: &[String],
        rows: &[Vec<Cell>],
    ) -> io::Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in rows {
            for (index, (text, _)) in row.iter().enumerate() {
                widths[index] = widths[index].max(text.width());
            }
        }

        for (index, header) in headers.iter().enumerate() {
            if index > 0 {
                write!(out, "  ")?;
            }
            write!(out, "{header:<width$}", width = widths[index])?;
        }
        writeln!(out)?;

        for row in rows {
            for (index, (text, color)) in row.iter().enumerate() {
                if index > 0 {
                    write!(out, "  ")?;
                }
                let pad = widths[index].saturating_sub(text.width());
                let painted = match color {
                    Some(code) => self.paint(text, code),
                    None => text.clone(),
                };
                write!(out, "{painted}{}", " ".repeat(pad))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color && !text.is_empty() {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
