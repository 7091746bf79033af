use super::markdown::render_terminal;
use colored::Colorize;
use marknotes::api::{CmdMessage, MessageLevel};
use marknotes::commands::create::short_id;
use marknotes::config::{KEYS, NotesConfig};
use marknotes::markdown::{plain_text, render_html};
use marknotes::model::{Note, Tag};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_notes(notes: &[Note]) {
    for note in notes {
        println!("{}", format_note_line(note));
    }
}

/// One list row: short id, title, tag badges, then as much of the body
/// preview as fits.
fn format_note_line(note: &Note) -> String {
    let id = format!("{:<width$}", short_id(&note.id), width = ID_WIDTH);
    let badges = format_badges(&note.tags);
    let badges_width = note
        .tags
        .iter()
        .map(|t| t.label.width() + 3)
        .sum::<usize>();

    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + badges_width);
    let title = truncate_to_width(&note.title, available);
    let remaining = available.saturating_sub(title.width() + 2);

    let preview = plain_text(&note.markdown);
    let preview = if preview.is_empty() || remaining < 8 {
        String::new()
    } else {
        format!("  {}", truncate_to_width(&preview, remaining))
    };

    format!(
        "{}{}{}{}",
        id.yellow(),
        title.bold(),
        badges,
        preview.dimmed()
    )
}

fn format_badges(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!(" [{}]", t.label).cyan().to_string())
        .collect()
}

pub(super) fn print_full_note(note: &Note, html: bool) {
    if html {
        print!("{}", render_html(&note.markdown));
        return;
    }

    println!("{} {}", short_id(&note.id).yellow(), note.title.bold());
    if !note.tags.is_empty() {
        println!("{}", format_badges(&note.tags).trim_start());
    }
    println!("--------------------------------");
    let body = render_terminal(&note.markdown);
    if !body.is_empty() {
        println!("{}", body);
    }
}

pub(super) fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("{}  {}", short_id(&tag.id).yellow(), tag.label);
    }
}

pub(super) fn print_config(config: &NotesConfig) {
    for key in KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
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
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
