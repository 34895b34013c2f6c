//! # Rendering
//!
//! Plain string builders for terminal output. Handlers print what these
//! return, so the layout is testable without a terminal.
//!
//! ## Row Layout
//!
//! ```text
//!   1. #1    Bulbasaur     grass, poison   https://sprites.test/1.png
//!   2. #4    Charmander    fire            (C)
//! ```
//!
//! - position within the page, one-based
//! - record id
//! - name, capitalized and padded to the widest name on the page
//! - types
//! - the sprite when it parses as an absolute URL, else the name's initial
//!
//! Colors come from `console` and switch off when stdout is not a terminal.

use console::Style;
use pokedexapp::model::{PageResponse, Record, Violation};
use unicode_width::UnicodeWidthStr;
use url::Url;

pub const TYPE_SEPARATOR: &str = ", ";

fn muted() -> Style {
    Style::new().dim()
}

fn title() -> Style {
    Style::new().bold()
}

fn error() -> Style {
    Style::new().red()
}

fn success() -> Style {
    Style::new().green()
}

/// Uppercases the first character, leaving the rest alone.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The sprite if it is an absolute URL, else the name's initial in parens.
pub fn avatar(record: &Record) -> String {
    if Url::parse(&record.image_ref).is_ok() {
        return record.image_ref.clone();
    }
    match record.name.trim().chars().next() {
        Some(initial) => format!("({})", initial),
        None => "(?)".to_string(),
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

pub fn render_row(position: usize, record: &Record, name_width: usize, types_width: usize) -> String {
    let name = pad_to_width(&capitalize(&record.name), name_width);
    let types = pad_to_width(&record.tags.join(TYPE_SEPARATOR), types_width);
    format!(
        "{:>3}. {} {}  {}  {}",
        position,
        muted().apply_to(format!("#{:<4}", record.id)),
        title().apply_to(name),
        types,
        muted().apply_to(avatar(record)),
    )
    .trim_end()
    .to_string()
}

/// The footer line: `first-last of total`, plus the page position.
pub fn render_footer(page: &PageResponse, page_number: usize, page_size: usize) -> String {
    let page_size = page_size.max(1);
    let pages = page.total.div_ceil(page_size).max(1);
    if page.records.is_empty() {
        return format!("0 of {} (page {}/{})", page.total, page_number, pages);
    }
    let first = page_number.saturating_sub(1).saturating_mul(page_size) + 1;
    let last = first + page.records.len() - 1;
    format!(
        "{}-{} of {} (page {}/{})",
        first, last, page.total, page_number, pages
    )
}

/// The whole page: rows, or a notice when empty, then the footer.
///
/// `page_number` is one-based.
pub fn render_page(page: &PageResponse, page_number: usize, page_size: usize) -> String {
    let mut out = String::new();
    if page.records.is_empty() {
        out.push_str(&muted().apply_to("No records.").to_string());
        out.push('\n');
    } else {
        let name_width = page
            .records
            .iter()
            .map(|r| capitalize(&r.name).width())
            .max()
            .unwrap_or(0);
        let types_width = page
            .records
            .iter()
            .map(|r| r.tags.join(TYPE_SEPARATOR).width())
            .max()
            .unwrap_or(0);
        for (i, record) in page.records.iter().enumerate() {
            out.push_str(&render_row(i + 1, record, name_width, types_width));
            out.push('\n');
        }
    }
    out.push_str(
        &muted()
            .apply_to(render_footer(page, page_number.max(1), page_size))
            .to_string(),
    );
    out.push('\n');
    out
}

pub fn render_created(record: &Record) -> String {
    format!(
        "{} #{} {} ({})",
        success().apply_to("Created"),
        record.id,
        capitalize(&record.name),
        record.tags.join(TYPE_SEPARATOR)
    )
}

/// One line per violation, in the order reported.
pub fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", error().apply_to("✗"), v.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(message: &str) -> String {
    format!("{} {}", error().apply_to("Error:"), message)
}
