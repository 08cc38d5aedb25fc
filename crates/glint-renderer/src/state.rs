//! Per-render state for the event-stream renderer.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Escape text for use in HTML content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Normalize heading text into an anchor id: lowercase, runs of characters
/// outside `[a-z0-9_]` collapse to a single hyphen, leading/trailing
/// hyphens stripped.
#[must_use]
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Fenced/indented code block capture.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    content: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.content.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.content))
    }
}

/// Alt-text capture while inside an image.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    active: bool,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt)
    }
}

/// Table alignment tracking.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// Heading capture: plain text feeds the slug, the HTML buffer carries the
/// rendered (and reference-linked) inner markup. Slugs are unique per
/// render; repeats get `-1`, `-2`, … suffixes.
#[derive(Debug, Default)]
pub(crate) struct HeadingState {
    active: bool,
    level: u8,
    text: String,
    html: String,
    used_slugs: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn start(&mut self, level: u8) {
        self.active = true;
        self.level = level;
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn html_mut(&mut self) -> &mut String {
        &mut self.html
    }

    /// Close the heading: returns the level, the unique slug, and the inner
    /// HTML.
    pub(crate) fn finish(&mut self) -> (u8, String, String) {
        self.active = false;
        let slug = self.unique_slug(slugify(&self.text));
        (self.level, slug, std::mem::take(&mut self.html))
    }

    fn unique_slug(&mut self, slug: String) -> String {
        let count = self.used_slugs.entry(slug.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            format!("{slug}-{}", *count - 1)
        } else {
            slug
        }
    }
}
