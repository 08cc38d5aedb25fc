//! URL building collaborators.

use crate::{Commit, Issue, MergeRequest, Project, Snippet, User};

/// Canonical URLs for domain objects.
///
/// The engine only ever embeds what these methods return into `href`
/// attributes; whether they are absolute or root-relative is the host's
/// choice.
pub trait UrlBuilder {
    /// URL of a project's landing page.
    fn project_url(&self, project: &Project) -> String;

    /// URL of an issue.
    fn issue_url(&self, project: &Project, issue: &Issue) -> String;

    /// URL of a merge request.
    fn merge_request_url(&self, project: &Project, merge_request: &MergeRequest) -> String;

    /// URL of a snippet.
    fn snippet_url(&self, project: &Project, snippet: &Snippet) -> String;

    /// URL of a commit.
    fn commit_url(&self, project: &Project, commit: &Commit) -> String;

    /// URL of a user's profile page.
    fn user_url(&self, user: &User) -> String;

    /// URL of a file at a ref.
    fn blob_url(&self, project: &Project, git_ref: &str, path: &str) -> String;

    /// URL of a directory at a ref.
    fn tree_url(&self, project: &Project, git_ref: &str, path: &str) -> String;
}

/// Route-style URL builder: `/<namespace>/<project>/issues/42` and friends.
///
/// With no base URL the generated links are root-relative; a base URL makes
/// them absolute.
#[derive(Clone, Debug, Default)]
pub struct StandardUrls {
    base: String,
}

impl StandardUrls {
    /// Root-relative URLs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute URLs under the given base, e.g. `https://git.example.com`.
    #[must_use]
    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }
}

impl UrlBuilder for StandardUrls {
    fn project_url(&self, project: &Project) -> String {
        format!("{}/{}", self.base, project.path_with_namespace)
    }

    fn issue_url(&self, project: &Project, issue: &Issue) -> String {
        format!("{}/issues/{}", self.project_url(project), issue.iid)
    }

    fn merge_request_url(&self, project: &Project, merge_request: &MergeRequest) -> String {
        format!(
            "{}/merge_requests/{}",
            self.project_url(project),
            merge_request.iid
        )
    }

    fn snippet_url(&self, project: &Project, snippet: &Snippet) -> String {
        format!("{}/snippets/{}", self.project_url(project), snippet.id)
    }

    fn commit_url(&self, project: &Project, commit: &Commit) -> String {
        format!("{}/commit/{}", self.project_url(project), commit.id)
    }

    fn user_url(&self, user: &User) -> String {
        format!("{}/u/{}", self.base, user.username)
    }

    fn blob_url(&self, project: &Project, git_ref: &str, path: &str) -> String {
        format!("{}/blob/{git_ref}/{path}", self.project_url(project))
    }

    fn tree_url(&self, project: &Project, git_ref: &str, path: &str) -> String {
        format!("{}/tree/{git_ref}/{path}", self.project_url(project))
    }
}

/// Asset URL resolution honoring CDN and application-URL configuration.
///
/// Precedence for the base: CDN host, else application URL (which may carry
/// a relative sub-path such as `http://localhost/forge`), else empty so
/// links come out root-relative.
#[derive(Clone, Debug, Default)]
pub struct AssetUrls {
    cdn_host: Option<String>,
    app_url: Option<String>,
}

impl AssetUrls {
    /// No CDN, no application URL: root-relative asset links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CDN host, e.g. `https://cdn.example.com`.
    #[must_use]
    pub fn with_cdn_host(mut self, host: impl Into<String>) -> Self {
        self.cdn_host = Some(host.into());
        self
    }

    /// Set the application URL, e.g. `http://localhost/forge`.
    #[must_use]
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = Some(url.into());
        self
    }

    /// Resolve an asset path relative to `assets/`, e.g. `emoji/smile.png`.
    #[must_use]
    pub fn asset_url(&self, relative: &str) -> String {
        let base = self
            .cdn_host
            .as_deref()
            .or(self.app_url.as_deref())
            .unwrap_or("");
        format!("{}/assets/{relative}", base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str) -> Commit {
        Commit {
            id: id.to_owned(),
            message: "Fix the build".to_owned(),
        }
    }

    #[test]
    fn test_standard_urls_root_relative() {
        let urls = StandardUrls::new();
        let project = Project::new("group/project");
        let issue = Issue {
            iid: 42,
            title: "Broken".to_owned(),
        };
        assert_eq!(urls.issue_url(&project, &issue), "/group/project/issues/42");
    }

    #[test]
    fn test_standard_urls_absolute() {
        let urls = StandardUrls::with_base("https://git.example.com/");
        let project = Project::new("group/project");
        let mr = MergeRequest {
            iid: 7,
            title: "Feature".to_owned(),
        };
        assert_eq!(
            urls.merge_request_url(&project, &mr),
            "https://git.example.com/group/project/merge_requests/7"
        );
    }

    #[test]
    fn test_standard_urls_commit_and_blob() {
        let urls = StandardUrls::new();
        let project = Project::new("group/project");
        let sha = "5937ac0a7beb003549fc5fd26fc247adbce4a52e";
        assert_eq!(
            urls.commit_url(&project, &commit(sha)),
            format!("/group/project/commit/{sha}")
        );
        assert_eq!(
            urls.blob_url(&project, "master", "doc/api/README.md"),
            "/group/project/blob/master/doc/api/README.md"
        );
        assert_eq!(
            urls.tree_url(&project, "master", "doc/api"),
            "/group/project/tree/master/doc/api"
        );
    }

    #[test]
    fn test_asset_urls_precedence() {
        let plain = AssetUrls::new();
        assert_eq!(plain.asset_url("emoji/smile.png"), "/assets/emoji/smile.png");

        let app = AssetUrls::new().with_app_url("http://localhost/forge/root");
        assert_eq!(
            app.asset_url("emoji/smile.png"),
            "http://localhost/forge/root/assets/emoji/smile.png"
        );

        let cdn = AssetUrls::new()
            .with_app_url("http://localhost")
            .with_cdn_host("https://cdn.example.com");
        assert_eq!(
            cdn.asset_url("emoji/smile.png"),
            "https://cdn.example.com/assets/emoji/smile.png"
        );
    }
}
