//! Per-render context and options.

use std::collections::BTreeMap;

use glint_types::{AssetUrls, Project, ReferenceStore, UrlBuilder};

use crate::emoji::EmojiTable;

/// Options for a single render call.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Emit headings without ids and permalink anchors.
    pub no_header_anchors: bool,
    /// Rewrite leading `[ ]` / `[x]` list-item markers into checkboxes.
    pub parse_tasks: bool,
    extra_attrs: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Default options: header anchors on, task parsing off, no extra
    /// attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit headings without ids and permalink anchors.
    #[must_use]
    pub fn without_header_anchors(mut self) -> Self {
        self.no_header_anchors = true;
        self
    }

    /// Enable the task-checkbox transformer.
    #[must_use]
    pub fn with_tasks(mut self) -> Self {
        self.parse_tasks = true;
        self
    }

    /// Merge an extra HTML attribute into every generated reference anchor.
    ///
    /// A `class` value is appended to the standard `gfm gfm-<kind>` class
    /// list rather than replacing it.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attrs.insert(name.into(), value.into());
        self
    }

    /// Caller-supplied class to append to generated anchors, if any.
    pub(crate) fn extra_class(&self) -> Option<&str> {
        self.extra_attrs.get("class").map(String::as_str)
    }

    /// Non-class extra attributes, in sorted key order.
    pub(crate) fn extra_attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra_attrs
            .iter()
            .filter(|(name, _)| name.as_str() != "class")
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Everything one render call reads: the project being rendered for, the
/// lookup and URL collaborators, asset configuration, the emoji table, and
/// options.
///
/// A context is immutable once built; renders hold no state beyond it, so
/// contexts can be shared across threads as long as the collaborators
/// support concurrent reads.
pub struct RenderContext<'a> {
    pub(crate) store: &'a dyn ReferenceStore,
    pub(crate) urls: &'a dyn UrlBuilder,
    pub(crate) project: Option<&'a Project>,
    pub(crate) git_ref: Option<&'a str>,
    pub(crate) assets: AssetUrls,
    pub(crate) emoji: &'a EmojiTable,
    pub(crate) options: RenderOptions,
}

impl<'a> RenderContext<'a> {
    /// Context with no project: reference kinds are disabled, emoji and
    /// structural rendering still work.
    #[must_use]
    pub fn new(store: &'a dyn ReferenceStore, urls: &'a dyn UrlBuilder) -> Self {
        Self {
            store,
            urls,
            project: None,
            git_ref: None,
            assets: AssetUrls::new(),
            emoji: EmojiTable::builtin(),
            options: RenderOptions::default(),
        }
    }

    /// Set the project references resolve against.
    #[must_use]
    pub fn with_project(mut self, project: &'a Project) -> Self {
        self.project = Some(project);
        self
    }

    /// Pin the ref relative links resolve against. Defaults to the
    /// project's default ref.
    #[must_use]
    pub fn with_ref(mut self, git_ref: &'a str) -> Self {
        self.git_ref = Some(git_ref);
        self
    }

    /// Set asset URL configuration (CDN host / application URL).
    #[must_use]
    pub fn with_assets(mut self, assets: AssetUrls) -> Self {
        self.assets = assets;
        self
    }

    /// Replace the built-in emoji table.
    #[must_use]
    pub fn with_emoji_table(mut self, emoji: &'a EmojiTable) -> Self {
        self.emoji = emoji;
        self
    }

    /// Set render options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The ref in effect for this render, when a project is set.
    pub(crate) fn current_ref(&self) -> Option<&str> {
        self.git_ref
            .or_else(|| self.project.map(|project| project.default_ref.as_str()))
    }
}
