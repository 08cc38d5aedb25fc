//! Event-stream renderer over pulldown-cmark.
//!
//! Structural markdown (paragraphs, emphasis, lists, tables, code,
//! authored links and images) renders as-is; text events that are not
//! inside code, an existing link's content, or an image's alt text are
//! routed through the reference/emoji substituter. The exclusions are
//! state checks on the event stream, never string inspection of produced
//! HTML, and generated markup is never re-scanned.

use std::fmt::Write;

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, TextMergeStream,
};

use crate::context::RenderContext;
use crate::links::resolve_url;
use crate::reference::Substituter;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};
use crate::tasks::{checkbox_html, parse_task_marker};

/// Render flavored-markdown source to an HTML fragment.
///
/// This is the main entry point; every failure mode inside (unresolved
/// references, unknown emoji, malformed task markers) degrades to literal
/// text, so rendering itself never fails.
#[must_use]
pub fn render(source: &str, ctx: &RenderContext<'_>) -> String {
    Renderer::new(ctx).render(source)
}

/// One render invocation's worth of state.
pub struct Renderer<'a> {
    ctx: &'a RenderContext<'a>,
    substituter: Substituter<'a>,
    output: String,
    code: CodeBlockState,
    image: ImageState,
    table: TableState,
    heading: HeadingState,
    link_depth: usize,
    /// The next text event sits at the very start of a list item's
    /// content, where a task marker may appear.
    item_start: bool,
    pending_image: Option<(String, String)>,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self {
            ctx,
            substituter: Substituter::new(ctx),
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            image: ImageState::default(),
            table: TableState::default(),
            heading: HeadingState::default(),
            link_depth: 0,
            item_start: false,
            pending_image: None,
        }
    }

    /// Consume the renderer, producing the HTML fragment.
    #[must_use]
    pub fn render(mut self, source: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(source, options);
        for event in TextMergeStream::new(parser) {
            self.process_event(event);
        }
        self.output
    }

    fn process_event(&mut self, event: Event<'_>) {
        // A task marker is only valid in the very first text of an item;
        // anything but the item's opening (or its paragraph wrapper, for
        // loose lists) invalidates the position.
        match &event {
            Event::Start(Tag::Item | Tag::Paragraph) | Event::Text(_) => {}
            _ => self.item_start = false,
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not enabled in the parser options.
            }
        }
    }

    /// Push inline content to the output or, inside a heading, to the
    /// heading's HTML buffer.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.html_mut().push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                self.heading.start(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => {
                self.output.push_str("<blockquote>");
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => {
                match start {
                    Some(1) => self.output.push_str("<ol>"),
                    Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                    None => self.output.push_str("<ul>"),
                }
            }
            Tag::Item => {
                self.output.push_str("<li>");
                self.item_start = true;
            }
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let href = resolve_url(&dest_url, self.ctx);
                let link_tag = format!(r#"<a href="{}">"#, escape_html(&href));
                self.push_inline(&link_tag);
                self.link_depth += 1;
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start();
                let src = resolve_url(&dest_url, self.ctx).into_owned();
                self.pending_image = Some((src, title.into_string()));
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                let (level, slug, html) = self.heading.finish();
                let html = html.trim();
                if self.ctx.options.no_header_anchors {
                    write!(self.output, "<h{level}>{html}</h{level}>").unwrap();
                } else {
                    write!(
                        self.output,
                        r##"<h{level} id="{slug}">{html}<a href="#{slug}"></a></h{level}>"##
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => {
                self.output.push_str("</blockquote>");
            }
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                match lang {
                    Some(lang) => write!(
                        self.output,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(&lang),
                        escape_html(&content)
                    )
                    .unwrap(),
                    None => write!(
                        self.output,
                        "<pre><code>{}</code></pre>",
                        escape_html(&content)
                    )
                    .unwrap(),
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => {
                self.output.push_str("</li>");
            }
            TagEnd::Table => {
                self.output.push_str("</tbody></table>");
            }
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => {
                self.output.push_str("</tr>");
            }
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => {
                self.push_inline("</a>");
                self.link_depth = self.link_depth.saturating_sub(1);
            }
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, escape_html(&title))
                    };
                    let img = format!(
                        r#"<img src="{}"{title_attr} alt="{}">"#,
                        escape_html(&src),
                        escape_html(&alt)
                    );
                    self.push_inline(&img);
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }
        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        let mut text = text;
        if self.item_start {
            self.item_start = false;
            if self.ctx.options.parse_tasks
                && self.link_depth == 0
                && !self.heading.is_active()
                && let Some((checked, rest)) = parse_task_marker(text)
            {
                self.output.push_str(checkbox_html(checked));
                self.output.push(' ');
                text = rest;
            }
        }

        if self.heading.is_active() {
            self.heading.push_text(text);
            if self.link_depth > 0 {
                let escaped = escape_html(text);
                self.heading.html_mut().push_str(&escaped);
            } else {
                self.substituter.append(text, self.heading.html_mut());
            }
        } else if self.link_depth > 0 {
            self.output.push_str(&escape_html(text));
        } else {
            self.substituter.append(text, &mut self.output);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
            write!(
                self.heading.html_mut(),
                "<code>{}</code>",
                escape_html(code)
            )
            .unwrap();
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            if self.heading.is_active() {
                self.heading.push_text(" ");
            }
            self.push_inline("\n");
        }
    }

    fn hard_break(&mut self) {
        if self.heading.is_active() {
            self.heading.push_text(" ");
        }
        self.push_inline("<br>");
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
