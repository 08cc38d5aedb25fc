//! Domain model and collaborator traits for the Glint markup engine.
//!
//! The rendering engine never talks to a database or an HTTP router
//! directly. It consumes two narrow traits:
//!
//! - [`ReferenceStore`]: lookup of projects, issues, merge requests,
//!   snippets, commits and team members by project + identifier
//! - [`UrlBuilder`]: canonical URLs for the objects a lookup returned
//!
//! Host applications implement both against their own persistence and
//! routing layers. [`MemoryStore`] is an in-memory implementation used in
//! tests and examples.

mod memory;
mod store;
mod urls;

pub use memory::MemoryStore;
pub use store::ReferenceStore;
pub use urls::{AssetUrls, StandardUrls, UrlBuilder};

/// A project, identified by its namespaced path (`group/project`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    /// Full path including the namespace, e.g. `dev/widgets`.
    pub path_with_namespace: String,
    /// Default ref used when the render context does not pin one.
    pub default_ref: String,
    /// Whether the repository has any commits. Empty repositories have no
    /// tree to resolve relative links against.
    pub has_commits: bool,
}

impl Project {
    /// Create a project with a default ref of `master` and a non-empty
    /// repository.
    #[must_use]
    pub fn new(path_with_namespace: impl Into<String>) -> Self {
        Self {
            path_with_namespace: path_with_namespace.into(),
            default_ref: "master".to_owned(),
            has_commits: true,
        }
    }

    /// Set the default ref.
    #[must_use]
    pub fn with_default_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.default_ref = git_ref.into();
        self
    }

    /// Mark the repository as having no commits.
    #[must_use]
    pub fn with_empty_repository(mut self) -> Self {
        self.has_commits = false;
        self
    }
}

/// An issue, addressed by its project-scoped iid (`#42`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub iid: u64,
    pub title: String,
}

/// A merge request, addressed by its project-scoped iid (`!42`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeRequest {
    pub iid: u64,
    pub title: String,
}

/// A code snippet, addressed by its id (`$7`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet {
    pub id: u64,
    pub title: String,
}

/// A team member, addressed by username (`@alice`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub name: String,
}

/// A commit, addressed by its full or abbreviated sha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// Full 40-character hex id.
    pub id: String,
    /// Full commit message.
    pub message: String,
}

impl Commit {
    /// Abbreviated id: the first eight characters of the sha.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(8);
        &self.id[..end]
    }

    /// First line of the commit message.
    #[must_use]
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Link title: abbreviated id joined with the message's first line.
    #[must_use]
    pub fn link_title(&self) -> String {
        format!("{}: {}", self.short_id(), self.title())
    }
}

/// Per-project external issue tracker settings.
///
/// When configured, `PREFIX-123` style references link out via
/// [`issue_url`](Self::issue_url) without any existence check against the
/// external system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalTracker {
    /// Reference prefix, e.g. `JIRA`.
    pub prefix: String,
    /// URL template containing an `:id` placeholder.
    pub issues_url: String,
    /// Human-readable tracker name used in link titles.
    pub display_name: String,
}

impl ExternalTracker {
    /// Expand the URL template for a full reference such as `JIRA-123`.
    #[must_use]
    pub fn issue_url(&self, reference: &str) -> String {
        self.issues_url.replace(":id", reference)
    }
}

/// Kind of entry a repository path resolves to at a given ref.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeEntryKind {
    /// A file; linked through the blob view.
    Blob,
    /// A directory; linked through the tree view.
    Tree,
}
