use colored::{ColoredString, Colorize};
use marknotes::markdown::options;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};

#[derive(Default)]
struct Style {
    heading: Option<HeadingLevel>,
    strong: usize,
    emphasis: usize,
    strike: usize,
    link: usize,
    code_block: bool,
}

impl Style {
    fn paint(&self, text: &str) -> ColoredString {
        let mut s = text.normal();
        if let Some(level) = self.heading {
            s = s.bold();
            if level == HeadingLevel::H1 {
                s = s.underline();
            }
        }
        if self.strong > 0 {
            s = s.bold();
        }
        if self.emphasis > 0 {
            s = s.italic();
        }
        if self.strike > 0 {
            s = s.strikethrough();
        }
        if self.link > 0 {
            s = s.blue().underline();
        }
        s
    }
}

/// Render Markdown as styled terminal text.
pub(crate) fn render_terminal(markdown: &str) -> String {
    let mut out = String::new();
    let mut style = Style::default();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut quote_depth = 0usize;
    let mut link_targets: Vec<String> = Vec::new();
    let mut at_line_start = true;

    let push_prefix = |out: &mut String, quote_depth: usize| {
        for _ in 0..quote_depth {
            out.push_str(&"│ ".dimmed().to_string());
        }
    };

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    style.heading = Some(level);
                    let marks = "#".repeat(level as usize);
                    push_prefix(&mut out, quote_depth);
                    out.push_str(&format!("{} ", marks).dimmed().to_string());
                    at_line_start = false;
                }
                Tag::Strong => style.strong += 1,
                Tag::Emphasis => style.emphasis += 1,
                Tag::Strikethrough => style.strike += 1,
                Tag::Link { dest_url, .. } => {
                    style.link += 1;
                    link_targets.push(dest_url.to_string());
                }
                Tag::BlockQuote(_) => quote_depth += 1,
                Tag::CodeBlock(kind) => {
                    style.code_block = true;
                    if let CodeBlockKind::Fenced(lang) = kind
                        && !lang.is_empty()
                    {
                        push_prefix(&mut out, quote_depth);
                        out.push_str(&format!("    [{}]\n", lang).dimmed().to_string());
                    }
                }
                Tag::List(start) => {
                    if !lists.is_empty() && !at_line_start {
                        out.push('\n');
                        at_line_start = true;
                    }
                    lists.push(start);
                }
                Tag::Item => {
                    push_prefix(&mut out, quote_depth);
                    let indent = "  ".repeat(lists.len().saturating_sub(1));
                    let marker = match lists.last_mut() {
                        Some(Some(n)) => {
                            let m = format!("{}. ", n);
                            *n += 1;
                            m
                        }
                        _ => "• ".to_string(),
                    };
                    out.push_str(&indent);
                    out.push_str(&marker.yellow().to_string());
                    at_line_start = false;
                }
                Tag::Paragraph => {
                    if at_line_start {
                        push_prefix(&mut out, quote_depth);
                        at_line_start = false;
                    }
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) => {
                    style.heading = None;
                    out.push_str("\n\n");
                    at_line_start = true;
                }
                TagEnd::Strong => style.strong = style.strong.saturating_sub(1),
                TagEnd::Emphasis => style.emphasis = style.emphasis.saturating_sub(1),
                TagEnd::Strikethrough => style.strike = style.strike.saturating_sub(1),
                TagEnd::Link => {
                    style.link = style.link.saturating_sub(1);
                    if let Some(url) = link_targets.pop() {
                        out.push_str(&format!(" ({})", url).dimmed().to_string());
                    }
                }
                TagEnd::BlockQuote(_) => quote_depth = quote_depth.saturating_sub(1),
                TagEnd::CodeBlock => {
                    style.code_block = false;
                    out.push('\n');
                    at_line_start = true;
                }
                TagEnd::List(_) => {
                    lists.pop();
                    if lists.is_empty() {
                        out.push('\n');
                    }
                }
                TagEnd::Item => {
                    if !at_line_start {
                        out.push('\n');
                        at_line_start = true;
                    }
                }
                TagEnd::Paragraph => {
                    if lists.is_empty() {
                        out.push_str("\n\n");
                    } else {
                        out.push('\n');
                    }
                    at_line_start = true;
                }
                _ => {}
            },
            Event::Text(text) => {
                if style.code_block {
                    for line in text.lines() {
                        push_prefix(&mut out, quote_depth);
                        out.push_str("    ");
                        out.push_str(&line.cyan().to_string());
                        out.push('\n');
                    }
                } else {
                    out.push_str(&style.paint(&text).to_string());
                    at_line_start = false;
                }
            }
            Event::Code(code) => {
                out.push_str(&code.cyan().to_string());
                at_line_start = false;
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => {
                out.push('\n');
                push_prefix(&mut out, quote_depth);
            }
            Event::Rule => {
                out.push_str(&"─".repeat(40).dimmed().to_string());
                out.push_str("\n\n");
                at_line_start = true;
            }
            Event::TaskListMarker(done) => {
                out.push_str(if done { "[x] " } else { "[ ] " });
            }
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            _ => {}
        }
    }

    out.trim_end().to_string()
}
