//! In-memory [`ReferenceStore`] for tests and examples.

use std::collections::HashMap;

use crate::{
    Commit, ExternalTracker, Issue, MergeRequest, Project, ReferenceStore, Snippet, TreeEntryKind,
    User,
};

/// An in-memory project/team data set.
///
/// Keys are project paths; population happens through the `add_*` methods.
/// Lookup semantics mirror what a real store provides: team-member lookup is
/// case-insensitive, commit lookup accepts abbreviated shas of six or more
/// characters.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: HashMap<String, Project>,
    issues: HashMap<(String, u64), Issue>,
    merge_requests: HashMap<(String, u64), MergeRequest>,
    snippets: HashMap<(String, u64), Snippet>,
    commits: HashMap<String, Vec<Commit>>,
    members: HashMap<String, Vec<User>>,
    trackers: HashMap<String, ExternalTracker>,
    tree_entries: HashMap<(String, String, String), TreeEntryKind>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project.
    pub fn add_project(&mut self, project: Project) {
        self.projects
            .insert(project.path_with_namespace.clone(), project);
    }

    /// Register an issue under a project.
    pub fn add_issue(&mut self, project: &Project, issue: Issue) {
        self.issues
            .insert((project.path_with_namespace.clone(), issue.iid), issue);
    }

    /// Register a merge request under a project.
    pub fn add_merge_request(&mut self, project: &Project, merge_request: MergeRequest) {
        self.merge_requests.insert(
            (project.path_with_namespace.clone(), merge_request.iid),
            merge_request,
        );
    }

    /// Register a snippet under a project.
    pub fn add_snippet(&mut self, project: &Project, snippet: Snippet) {
        self.snippets
            .insert((project.path_with_namespace.clone(), snippet.id), snippet);
    }

    /// Register a commit under a project.
    pub fn add_commit(&mut self, project: &Project, commit: Commit) {
        self.commits
            .entry(project.path_with_namespace.clone())
            .or_default()
            .push(commit);
    }

    /// Register a team member under a project.
    pub fn add_team_member(&mut self, project: &Project, user: User) {
        self.members
            .entry(project.path_with_namespace.clone())
            .or_default()
            .push(user);
    }

    /// Configure an external issue tracker for a project.
    pub fn set_external_tracker(&mut self, project: &Project, tracker: ExternalTracker) {
        self.trackers
            .insert(project.path_with_namespace.clone(), tracker);
    }

    /// Register a tree entry (file or directory) at a ref.
    pub fn add_tree_entry(
        &mut self,
        project: &Project,
        git_ref: &str,
        path: &str,
        kind: TreeEntryKind,
    ) {
        self.tree_entries.insert(
            (
                project.path_with_namespace.clone(),
                git_ref.to_owned(),
                path.to_owned(),
            ),
            kind,
        );
    }
}

impl ReferenceStore for MemoryStore {
    fn find_project_by_path(&self, path: &str) -> Option<Project> {
        self.projects.get(path).cloned()
    }

    fn find_issue(&self, project: &Project, iid: u64) -> Option<Issue> {
        self.issues
            .get(&(project.path_with_namespace.clone(), iid))
            .cloned()
    }

    fn find_merge_request(&self, project: &Project, iid: u64) -> Option<MergeRequest> {
        self.merge_requests
            .get(&(project.path_with_namespace.clone(), iid))
            .cloned()
    }

    fn find_snippet(&self, project: &Project, id: u64) -> Option<Snippet> {
        self.snippets
            .get(&(project.path_with_namespace.clone(), id))
            .cloned()
    }

    fn find_commit(&self, project: &Project, sha: &str) -> Option<Commit> {
        if sha.len() < 6 {
            return None;
        }
        self.commits
            .get(&project.path_with_namespace)?
            .iter()
            .find(|commit| commit.id.starts_with(sha))
            .cloned()
    }

    fn find_team_member(&self, project: &Project, username: &str) -> Option<User> {
        self.members
            .get(&project.path_with_namespace)?
            .iter()
            .find(|user| user.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    fn external_tracker(&self, project: &Project) -> Option<ExternalTracker> {
        self.trackers.get(&project.path_with_namespace).cloned()
    }

    fn tree_entry(&self, project: &Project, git_ref: &str, path: &str) -> Option<TreeEntryKind> {
        self.tree_entries
            .get(&(
                project.path_with_namespace.clone(),
                git_ref.to_owned(),
                path.to_owned(),
            ))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHA: &str = "5937ac0a7beb003549fc5fd26fc247adbce4a52e";

    fn store_with_project() -> (MemoryStore, Project) {
        let mut store = MemoryStore::new();
        let project = Project::new("group/project");
        store.add_project(project.clone());
        (store, project)
    }

    #[test]
    fn test_find_project_by_path() {
        let (store, project) = store_with_project();
        assert_eq!(store.find_project_by_path("group/project"), Some(project));
        assert_eq!(store.find_project_by_path("group/other"), None);
    }

    #[test]
    fn test_find_issue_scoped_to_project() {
        let (mut store, project) = store_with_project();
        let other = Project::new("group/other");
        store.add_issue(
            &project,
            Issue {
                iid: 1,
                title: "Broken".to_owned(),
            },
        );
        assert!(store.find_issue(&project, 1).is_some());
        assert!(store.find_issue(&other, 1).is_none());
        assert!(store.find_issue(&project, 2).is_none());
    }

    #[test]
    fn test_find_commit_by_prefix() {
        let (mut store, project) = store_with_project();
        store.add_commit(
            &project,
            Commit {
                id: SHA.to_owned(),
                message: "Fix".to_owned(),
            },
        );
        assert!(store.find_commit(&project, SHA).is_some());
        assert!(store.find_commit(&project, &SHA[..8]).is_some());
        // Too short to be unambiguous.
        assert!(store.find_commit(&project, &SHA[..4]).is_none());
        // Reversed sha of the right shape does not resolve.
        let reversed: String = SHA.chars().rev().collect();
        assert!(store.find_commit(&project, &reversed).is_none());
    }

    #[test]
    fn test_find_team_member_case_insensitive() {
        let (mut store, project) = store_with_project();
        store.add_team_member(
            &project,
            User {
                username: "gfm".to_owned(),
                name: "G. F. Markdown".to_owned(),
            },
        );
        assert!(store.find_team_member(&project, "GFM").is_some());
        assert!(store.find_team_member(&project, "mfg").is_none());
    }

    #[test]
    fn test_tree_entry_lookup() {
        let (mut store, project) = store_with_project();
        store.add_tree_entry(&project, "master", "doc/api/README.md", TreeEntryKind::Blob);
        store.add_tree_entry(&project, "master", "doc/api", TreeEntryKind::Tree);
        assert_eq!(
            store.tree_entry(&project, "master", "doc/api/README.md"),
            Some(TreeEntryKind::Blob)
        );
        assert_eq!(
            store.tree_entry(&project, "master", "doc/api"),
            Some(TreeEntryKind::Tree)
        );
        assert_eq!(store.tree_entry(&project, "other", "doc/api"), None);
    }
}
