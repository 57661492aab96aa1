//! Terminal rendering of views, facets, tabs and settings.
//!
//! Every `render_*` function returns a string; the `*_internal` variants take
//! an explicit color switch so tests see plain text.

use colored::{ColoredString, Colorize};
use rxview::commands::{CmdMessage, MessageLevel};
use rxview::config::{RxviewConfig, CONFIG_KEYS};
use rxview::definition::ViewDefinition;
use rxview::engine::{FacetSummary, Pagination, TabCount};
use rxview::fields::{FacetSpec, FieldSpec};
use rxview::model::Record;
use rxview::state::{FacetChoice, FilterState};
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const MAX_COLUMN_WIDTH: usize = 28;
pub const COLUMN_GAP: &str = "  ";
pub const MISSING_LABEL: &str = "(none)";

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn render_table(fields: &[FieldSpec], rows: &[&Record]) -> String {
    render_table_internal(fields, rows, use_color())
}

fn render_table_internal(fields: &[FieldSpec], rows: &[&Record], color: bool) -> String {
    if rows.is_empty() {
        return "No records found.\n".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            fields
                .iter()
                .map(|f| truncate_to_width(&r.display(&f.name), MAX_COLUMN_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let header = f.title().width().min(MAX_COLUMN_WIDTH);
            cells
                .iter()
                .map(|row| row[i].width())
                .fold(header, usize::max)
        })
        .collect();

    let mut output = String::new();
    let header: Vec<String> = fields
        .iter()
        .zip(&widths)
        .map(|(f, w)| {
            let title = pad_to_width(&truncate_to_width(f.title(), MAX_COLUMN_WIDTH), *w);
            paint(&title, color, |s| s.bold())
        })
        .collect();
    output.push_str(header.join(COLUMN_GAP).trim_end());
    output.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect();
        output.push_str(line.join(COLUMN_GAP).trim_end());
        output.push('\n');
    }
    output
}

pub fn render_tab_bar(tabs: &[TabCount]) -> String {
    render_tab_bar_internal(tabs, use_color())
}

fn render_tab_bar_internal(tabs: &[TabCount], color: bool) -> String {
    let parts: Vec<String> = tabs
        .iter()
        .map(|t| {
            let text = format!("{} ({})", t.label, t.count);
            if t.active {
                paint(&format!("[{}]", text), color, |s| s.bold().cyan())
            } else {
                paint(&text, color, |s| s.dimmed())
            }
        })
        .collect();
    format!("{}\n", parts.join("  "))
}

pub fn render_tab_list(tabs: &[TabCount]) -> String {
    render_tab_list_internal(tabs, use_color())
}

fn render_tab_list_internal(tabs: &[TabCount], color: bool) -> String {
    if tabs.is_empty() {
        return "No tabs defined.\n".to_string();
    }
    let id_width = tabs.iter().map(|t| t.id.width()).max().unwrap_or(0);
    let mut output = String::new();
    for tab in tabs {
        let marker = if tab.active { "*" } else { " " };
        let id = pad_to_width(&tab.id, id_width);
        let line = format!("{} {}  {:>5}  {}", marker, id, tab.count, tab.label);
        if tab.active {
            output.push_str(&paint(&line, color, |s| s.cyan()));
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }
    output
}

pub fn render_facets(facets: &[FacetSpec], summaries: &[FacetSummary], state: &FilterState) -> String {
    render_facets_internal(facets, summaries, state, use_color())
}

fn render_facets_internal(
    facets: &[FacetSpec],
    summaries: &[FacetSummary],
    state: &FilterState,
    color: bool,
) -> String {
    if facets.is_empty() {
        return "No facets defined.\n".to_string();
    }

    let mut output = String::new();
    for spec in facets {
        let Some(summary) = summaries.iter().find(|s| s.facet == spec.id) else {
            continue;
        };
        let heading = format!("{} ({})", spec.title(), summary.total_count);
        output.push_str(&paint(&heading, color, |s| s.bold()));
        output.push('\n');

        if summary.groups.is_empty() {
            output.push_str(&paint("  no values", color, |s| s.dimmed()));
            output.push('\n');
        }

        let selected = state.facet(&spec.id);
        for bucket in &summary.groups {
            let label = match &bucket.value {
                FacetChoice::Value(v) => truncate_to_width(v, MAX_COLUMN_WIDTH * 2),
                FacetChoice::Missing => MISSING_LABEL.to_string(),
            };
            let line = format!("{:>6}  {}", bucket.count, label);
            if selected == Some(&bucket.value) {
                output.push_str(&paint(&format!("* {}", line), color, |s| s.green()));
            } else {
                output.push_str(&format!("  {}", line));
            }
            output.push('\n');
        }
    }
    output
}

pub fn render_pagination(pagination: &Pagination) -> String {
    render_pagination_internal(pagination, use_color())
}

fn render_pagination_internal(pagination: &Pagination, color: bool) -> String {
    let noun = if pagination.total == 1 {
        "record"
    } else {
        "records"
    };
    let text = format!(
        "Page {} of {} · {} {}",
        pagination.page,
        pagination.page_count.max(1),
        pagination.total,
        noun
    );
    format!("{}\n", paint(&text, color, |s| s.dimmed()))
}

pub fn render_presets(presets: &[ViewDefinition]) -> String {
    let mut output = String::new();
    for def in presets {
        let tabs: Vec<&str> = def.tabs.iter().map(|t| t.id.as_str()).collect();
        let facets: Vec<&str> = def.facets.iter().map(|f| f.id.as_str()).collect();
        output.push_str(&format!(
            "{:<6} tabs: {}; facets: {}\n",
            def.name,
            tabs.join(", "),
            facets.join(", ")
        ));
    }
    output
}

pub fn render_config(config: &RxviewConfig) -> String {
    let width = CONFIG_KEYS.iter().map(|k| k.width()).max().unwrap_or(0);
    CONFIG_KEYS
        .iter()
        .filter_map(|key| {
            config
                .get(key)
                .map(|value| format!("{}  {}\n", pad_to_width(key, width), value))
        })
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, use_color())
}

fn render_messages_internal(messages: &[CmdMessage], color: bool) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => paint(&message.content, color, |s| s.dimmed()),
            MessageLevel::Success => paint(&message.content, color, |s| s.green()),
            MessageLevel::Warning => paint(&message.content, color, |s| s.yellow()),
            MessageLevel::Error => paint(&message.content, color, |s| s.red()),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
