//! The closed set of reference kinds.

/// Kind of domain object a reference names.
///
/// Adding a kind means adding a variant here plus its scan and resolve
/// arms; kinds are matched in the declaration order below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `#42`
    Issue,
    /// `!42`
    MergeRequest,
    /// `$42`
    Snippet,
    /// `@alice`
    TeamMember,
    /// A bare commit sha (cross-project form `group/project@sha`).
    Commit,
    /// `PREFIX-42` against the project's configured external tracker.
    ExternalIssue,
}

impl ReferenceKind {
    /// Token used in the generated anchor's `gfm gfm-<token>` class list.
    ///
    /// External tracker issues share the `issue` token: they are issues to
    /// the reader, wherever they live.
    #[must_use]
    pub fn css_token(self) -> &'static str {
        match self {
            Self::Issue | Self::ExternalIssue => "issue",
            Self::MergeRequest => "merge_request",
            Self::Snippet => "snippet",
            Self::TeamMember => "team_member",
            Self::Commit => "commit",
        }
    }
}
