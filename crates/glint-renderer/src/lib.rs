//! Flavored-markdown rendering with domain-object reference linking.
//!
//! This crate turns project-authored text (commit messages, issue and
//! merge request descriptions, comments, wiki pages) into HTML fragments:
//!
//! - references (`#42`, `!42`, `$42`, `@user`, commit shas, `JIRA-42`,
//!   `group/project#42`) become links, resolved against a
//!   [`glint_types::ReferenceStore`]
//! - `:shortcode:` emoji tokens become images
//! - relative links and image sources resolve against the project tree
//! - headings get stable, de-duplicated anchor ids with permalinks
//! - leading `[ ]` / `[x]` list-item markers become checkboxes (opt-in)
//!
//! Code spans and blocks, existing link content, and attribute values are
//! never substituted into, and any match that fails to resolve is left as
//! literal text.
//!
//! # Example
//!
//! ```
//! use glint_renderer::{RenderContext, render};
//! use glint_types::{Issue, MemoryStore, Project, StandardUrls};
//!
//! let mut store = MemoryStore::new();
//! let project = Project::new("group/project");
//! store.add_project(project.clone());
//! store.add_issue(&project, Issue { iid: 42, title: "Broken".to_owned() });
//!
//! let urls = StandardUrls::new();
//! let ctx = RenderContext::new(&store, &urls).with_project(&project);
//! let html = render("Fixes #42", &ctx);
//! assert!(html.contains(r#"href="/group/project/issues/42""#));
//! ```

mod context;
mod emoji;
mod helpers;
mod links;
mod reference;
mod renderer;
mod state;
mod tasks;

pub use context::{RenderContext, RenderOptions};
pub use emoji::EmojiTable;
pub use helpers::{gfm, link_to_gfm};
pub use reference::ReferenceKind;
pub use renderer::{Renderer, render};
pub use state::escape_html;
