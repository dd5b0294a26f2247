//! Shared widgets and color helpers for the drawing code in `main.rs`

use ratatui::{prelude::*, widgets::*};

use crate::composer::FieldKind;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Bordered block whose border reflects focus and editing
pub fn panel_block(title: String, focused: bool, editing: bool) -> Block<'static> {
    let border_style = if focused && editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Simple JSON syntax highlighting, one line at a time
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut chars = line.char_indices().peekable();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(plain)));
        }
    };

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let literal = &line[start..end];
                // a string followed by ':' is a key
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(literal.to_string(), Style::default().fg(color)));
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            '0'..='9' | '-' => {
                flush(&mut plain, &mut spans);
                let mut end = start + c.len_utf8();
                while let Some(&(i, ch)) = chars.peek() {
                    if ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-') {
                        end = i + ch.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                spans.push(Span::styled(
                    line[start..end].to_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            _ if ["true", "false", "null"]
                .iter()
                .any(|kw| line[start..].starts_with(kw)) =>
            {
                flush(&mut plain, &mut spans);
                let kw = ["true", "false", "null"]
                    .into_iter()
                    .find(|kw| line[start..].starts_with(kw))
                    .unwrap_or_default();
                for _ in 1..kw.len() {
                    chars.next();
                }
                spans.push(Span::styled(kw.to_string(), Style::default().fg(Color::Magenta)));
            }
            _ => plain.push(c),
        }
    }

    flush(&mut plain, &mut spans);
    Line::from(spans)
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

/// Field kind color in the composer
pub fn kind_color(kind: FieldKind) -> Color {
    match kind {
        FieldKind::Header => Color::Magenta,
        FieldKind::Query => Color::Cyan,
        FieldKind::Body => Color::Yellow,
    }
}
