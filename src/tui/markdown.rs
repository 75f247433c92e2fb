//! Markdown → ratatui `Text` for theory pages.
//!
//! Walks `pulldown_cmark` events and builds styled lines. Covers what lesson
//! text uses: headings, emphasis, inline code, fenced code (highlighted with
//! syntect), lists, blockquotes, rules, and links. Anything else is dropped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static CODE_THEME: LazyLock<Option<Theme>> = LazyLock::new(|| {
    ThemeSet::load_defaults()
        .themes
        .remove("base16-ocean.dark")
});

const HEADING_COLOR: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

/// Render lesson markdown with `base_fg` as the body color.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
    let mut builder = LessonText::new(base_fg);
    for event in parser {
        builder.event(event);
    }
    builder.finish()
}

struct LessonText {
    lines: Vec<Line<'static>>,
    base: Style,
    inline: Vec<Style>,
    /// Prepended to every new line (blockquote bars, code gutters).
    gutters: Vec<Span<'static>>,
    /// `None` for bullets, `Some(next)` for numbered lists.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    pending_link: Option<String>,
    gap_before_block: bool,
}

struct CodeBlock {
    highlighter: Option<HighlightLines<'static>>,
}

impl LessonText {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base: Style::default().fg(base_fg),
            inline: Vec::new(),
            gutters: Vec::new(),
            lists: Vec::new(),
            code: None,
            pending_link: None,
            gap_before_block: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn current_style(&self) -> Style {
        self.inline.last().copied().unwrap_or(self.base)
    }

    fn with_style(&mut self, overlay: Style) {
        let style = self.current_style().patch(overlay);
        self.inline.push(style);
    }

    fn new_line(&mut self, spans: Vec<Span<'static>>) {
        let mut all = self.gutters.clone();
        all.extend(spans);
        self.lines.push(Line::from(all));
    }

    fn append(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.new_line(vec![span]),
        }
    }

    fn start_block(&mut self) {
        if self.gap_before_block {
            self.new_line(Vec::new());
            self.gap_before_block = false;
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.append(Span::styled(
                code.to_string(),
                Style::default().fg(Color::Yellow).bg(Color::Black),
            )),
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(Vec::new()),
            Event::Rule => {
                self.start_block();
                self.new_line(vec![Span::styled("─".repeat(32), Style::default().fg(MUTED))]);
                self.gap_before_block = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // List items open their own line
                if self.lists.is_empty() {
                    self.start_block();
                    self.new_line(Vec::new());
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.new_line(Vec::new());
                self.with_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.gutters.push(Span::styled("┃ ", Style::default().fg(MUTED)));
                self.with_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let syntax = if lang.is_empty() {
                    None
                } else {
                    SYNTAX_SET.find_syntax_by_token(&lang)
                };
                let highlighter = syntax
                    .zip(CODE_THEME.as_ref())
                    .map(|(syntax, theme)| HighlightLines::new(syntax, theme));
                self.gutters.push(Span::styled("  ▏ ", Style::default().fg(MUTED)));
                self.code = Some(CodeBlock { highlighter });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.new_line(vec![Span::styled(marker, Style::default().fg(HEADING_COLOR))]);
            }
            Tag::Emphasis => self.with_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.with_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.with_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.pending_link = Some(dest_url.to_string());
                self.with_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.gap_before_block = true;
                }
            }
            TagEnd::Heading(_) => {
                self.inline.pop();
                self.gap_before_block = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutters.pop();
                self.inline.pop();
                self.gap_before_block = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gutters.pop();
                self.gap_before_block = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.gap_before_block = true;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.pending_link.take() {
                    self.append(Span::styled(format!(" <{url}>"), Style::default().fg(MUTED)));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        let text = raw.replace('\t', "    ");
        let Some(block) = self.code.as_mut() else {
            let style = self.current_style();
            self.append(Span::styled(text, style));
            return;
        };

        let mut code_lines = Vec::new();
        for source_line in LinesWithEndings::from(&text) {
            let spans = match block.highlighter.as_mut() {
                Some(highlighter) => match highlighter.highlight_line(source_line, &SYNTAX_SET) {
                    Ok(ranges) => ranges
                        .into_iter()
                        .map(|(style, fragment)| {
                            let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                            Span::styled(
                                fragment.trim_end_matches('\n').to_string(),
                                Style::default().fg(fg),
                            )
                        })
                        .filter(|span| !span.content.is_empty())
                        .collect(),
                    Err(_) => vec![plain_code(source_line)],
                },
                None => vec![plain_code(source_line)],
            };
            code_lines.push(spans);
        }
        for spans in code_lines {
            self.new_line(spans);
        }
    }
}

fn plain_code(line: &str) -> Span<'static> {
    Span::styled(
        line.trim_end_matches('\n').to_string(),
        Style::default().fg(Color::White),
    )
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().fg(HEADING_COLOR).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.add_modifier(Modifier::ITALIC),
    }
}
