//! Plain-text rendering of the current page.

use std::fmt::Write;

use tabula::model::{Record, TableRow};
use tabula::{DataTable, PageSelection};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cells wider than this are truncated with an ellipsis.
const MAX_CELL_WIDTH: usize = 32;
const GAP: &str = "  ";

const CHECKED: &str = "■";
const UNCHECKED: &str = "□";
const PARTIAL: &str = "▣";

/// Render the current page: a header row, one line per row and a footer.
pub fn render(table: &DataTable<Record>) -> String {
    let columns = table.columns();
    let sort = table.sort_indicator();

    let headers: Vec<String> = columns
        .iter()
        .map(|column| match &sort {
            Some(active) if active.key == column.key => {
                format!("{} {}", column.label, active.direction.glyph())
            }
            _ => column.label.clone(),
        })
        .collect();

    let page_rows = table.page_rows();
    let page_ids = table.page_row_ids();
    let cells: Vec<Vec<String>> = page_rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| truncate(&row.value(&column.key).to_string(), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|line| line[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_mark = match table.page_selection() {
        PageSelection::All => CHECKED,
        PageSelection::Partial => PARTIAL,
        PageSelection::None => UNCHECKED,
    };
    push_line(&mut out, header_mark, &headers, &widths);

    for (line, id) in cells.iter().zip(&page_ids) {
        let mark = if table.is_row_selected(id) {
            CHECKED
        } else {
            UNCHECKED
        };
        push_line(&mut out, mark, line, &widths);
    }

    out.push_str(&footer(table));
    out.push('\n');
    out
}

/// `Showing 1–10 of 42 · page 1/5 · 3 selected`
pub fn footer(table: &DataTable<Record>) -> String {
    let info = table.page_info();
    format!(
        "Showing {}–{} of {} · page {}/{} · {} selected",
        info.first,
        info.last,
        info.total,
        info.page_index + 1,
        info.total_pages,
        table.selection_count()
    )
}

fn push_line(out: &mut String, mark: &str, cells: &[String], widths: &[usize]) {
    let mut line = String::from(mark);
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(GAP);
        line.push_str(cell);
        let pad = width.saturating_sub(cell.width());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
