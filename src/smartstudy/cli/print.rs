use chrono::{DateTime, Utc};
use colored::Colorize;
use smartstudy::commands::{CmdMessage, MessageLevel};
use smartstudy::model::Document;
use smartstudy::store::StoreStatus;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;

/// Fields tried in order for the one-line summary of a document.
const LABEL_FIELDS: [&str; 4] = ["title", "name", "email", "theme"];

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_full_documents(docs: &[Document]) {
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match serde_json::to_string_pretty(doc) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", doc.id.yellow()),
        }
    }
}

pub(super) fn print_documents(docs: &[Document]) {
    for doc in docs {
        let id = truncate_to_width(&doc.id, ID_WIDTH);
        let id_padding = ID_WIDTH.saturating_sub(id.width());

        let time = doc
            .updated_at
            .or(doc.created_at)
            .map(format_time_ago)
            .unwrap_or_default();

        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH + 4);
        let label = truncate_to_width(&document_label(doc), available);
        let padding = available.saturating_sub(label.width());

        println!(
            "  {}{} {}{} {}",
            id.yellow(),
            " ".repeat(id_padding),
            label,
            " ".repeat(padding),
            time.dimmed()
        );
    }
}

pub(super) fn print_status(status: &StoreStatus) {
    let name_width = status
        .collections
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0);

    for (name, count) in &status.collections {
        let padding = name_width - name.width();
        println!("  {}{}  {:>5}", name, " ".repeat(padding), count);
    }
}

pub(super) fn print_user(record: &Document) {
    let email = record.str_field("email").unwrap_or("-");
    match record.str_field("name") {
        Some(name) => println!("{} <{}>", name.bold(), email),
        None => println!("{}", email.bold()),
    }
    println!("  {} {}", "id:".dimmed(), record.id);

    let last_login = record
        .str_field("lastLogin")
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| format_time_ago(ts.with_timezone(&Utc)));
    if let Some(ago) = last_login {
        println!("  {} {}", "last login:".dimmed(), ago.trim_start());
    }
}

fn document_label(doc: &Document) -> String {
    LABEL_FIELDS
        .iter()
        .find_map(|field| doc.str_field(field))
        .map(|s| s.replace('\n', " "))
        .unwrap_or_else(|| format!("({} fields)", doc.fields.len()))
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartstudy::model::Fields;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghijkl", 5), "abcd…");
        assert!(truncate_to_width("日本語のタイトル", 6).width() <= 6);
    }

    #[test]
    fn test_document_label_prefers_title() {
        let mut fields = Fields::new();
        fields.insert("email".to_string(), "a@b.c".into());
        fields.insert("title".to_string(), "Algebra".into());
        assert_eq!(document_label(&Document::new("x", fields)), "Algebra");
        assert_eq!(
            document_label(&Document::new("y", Fields::new())),
            "(0 fields)"
        );
    }

    #[test]
    fn test_format_time_ago_is_padded() {
        let formatted = format_time_ago(Utc::now() - chrono::Duration::minutes(5));
        assert_eq!(formatted.width(), TIME_WIDTH);
        assert_eq!(formatted.trim_start(), "5 minutes ago");
    }
}
