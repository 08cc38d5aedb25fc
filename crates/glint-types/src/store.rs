//! Lookup collaborator trait.

use crate::{Commit, ExternalTracker, Issue, MergeRequest, Project, Snippet, TreeEntryKind, User};

/// Read-only lookup of domain objects, keyed by project + identifier.
///
/// Every method returns `None` for anything that does not exist or is not
/// visible; the engine treats absence as "leave the reference as literal
/// text" and never distinguishes the reasons.
///
/// Implementations must be safe for concurrent reads if renders run on
/// multiple threads; the engine itself only ever reads.
pub trait ReferenceStore {
    /// Find a project by its namespaced path (`group/project`).
    fn find_project_by_path(&self, path: &str) -> Option<Project>;

    /// Find an issue by its project-scoped iid.
    fn find_issue(&self, project: &Project, iid: u64) -> Option<Issue>;

    /// Find a merge request by its project-scoped iid.
    fn find_merge_request(&self, project: &Project, iid: u64) -> Option<MergeRequest>;

    /// Find a snippet by id.
    fn find_snippet(&self, project: &Project, id: u64) -> Option<Snippet>;

    /// Find a commit by full or abbreviated (six or more characters) sha.
    fn find_commit(&self, project: &Project, sha: &str) -> Option<Commit>;

    /// Find a member of the project's team. Username comparison is
    /// case-insensitive.
    fn find_team_member(&self, project: &Project, username: &str) -> Option<User>;

    /// External issue tracker settings for the project, if any.
    fn external_tracker(&self, project: &Project) -> Option<ExternalTracker>;

    /// What a repository path points at under the given ref, if anything.
    fn tree_entry(&self, project: &Project, git_ref: &str, path: &str) -> Option<TreeEntryKind>;
}
