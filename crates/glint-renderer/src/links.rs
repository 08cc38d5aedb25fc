//! Relative link and image-source resolution.
//!
//! Paths authored relative to the repository root are rewritten to the
//! project's blob or tree view at the current ref. External URLs, rooted
//! paths and fragments pass through as authored, and an empty repository
//! disables rewriting entirely (there is no tree to resolve against).

use std::borrow::Cow;

use glint_types::TreeEntryKind;

use crate::context::RenderContext;

/// True for URLs that are not repository-relative paths.
fn is_external(url: &str) -> bool {
    url.starts_with('/')
        || url.starts_with('#')
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.contains("://")
}

/// Resolve a link/image destination against the rendering project and ref.
pub(crate) fn resolve_url<'a>(url: &'a str, ctx: &RenderContext<'_>) -> Cow<'a, str> {
    if url.is_empty() || is_external(url) {
        return Cow::Borrowed(url);
    }
    let Some(project) = ctx.project else {
        return Cow::Borrowed(url);
    };
    if !project.has_commits {
        return Cow::Borrowed(url);
    }
    let Some(git_ref) = ctx.current_ref() else {
        return Cow::Borrowed(url);
    };

    let (path_part, fragment) = match url.find('#') {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    };
    let path = path_part
        .strip_prefix("./")
        .unwrap_or(path_part)
        .trim_end_matches('/');

    let resolved = match ctx.store.tree_entry(project, git_ref, path) {
        Some(TreeEntryKind::Blob) => ctx.urls.blob_url(project, git_ref, path),
        Some(TreeEntryKind::Tree) => ctx.urls.tree_url(project, git_ref, path),
        None => {
            tracing::debug!(path, git_ref, "relative path not found in tree");
            return Cow::Borrowed(url);
        }
    };
    Cow::Owned(format!("{resolved}{fragment}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_types::{MemoryStore, Project, StandardUrls};

    fn fixture() -> (MemoryStore, StandardUrls, Project) {
        let mut store = MemoryStore::new();
        let project = Project::new("group/project").with_default_ref("markdown");
        store.add_project(project.clone());
        store.add_tree_entry(
            &project,
            "markdown",
            "doc/api/README.md",
            TreeEntryKind::Blob,
        );
        store.add_tree_entry(&project, "markdown", "doc/api", TreeEntryKind::Tree);
        (store, StandardUrls::new(), project)
    }

    #[test]
    fn test_file_resolves_to_blob() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert_eq!(
            resolve_url("doc/api/README.md", &ctx),
            "/group/project/blob/markdown/doc/api/README.md"
        );
    }

    #[test]
    fn test_directory_resolves_to_tree() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert_eq!(
            resolve_url("doc/api", &ctx),
            "/group/project/tree/markdown/doc/api"
        );
        // Trailing slash form points at the same directory.
        assert_eq!(
            resolve_url("doc/api/", &ctx),
            "/group/project/tree/markdown/doc/api"
        );
    }

    #[test]
    fn test_fragment_is_preserved() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert_eq!(
            resolve_url("./doc/api/README.md#usage", &ctx),
            "/group/project/blob/markdown/doc/api/README.md#usage"
        );
    }

    #[test]
    fn test_external_and_rooted_urls_untouched() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        for url in [
            "https://www.example.com",
            "mailto:someone@example.com",
            "/already/rooted",
            "#fragment",
            "//cdn.example.com/x.png",
        ] {
            assert_eq!(resolve_url(url, &ctx), url);
        }
    }

    #[test]
    fn test_unresolvable_path_untouched() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert_eq!(resolve_url("doc/missing.md", &ctx), "doc/missing.md");
    }

    #[test]
    fn test_empty_repository_skips_rewriting() {
        let (mut store, urls, _) = fixture();
        let empty = Project::new("group/empty").with_empty_repository();
        store.add_project(empty.clone());
        let ctx = RenderContext::new(&store, &urls).with_project(&empty);
        assert_eq!(resolve_url("doc/api/README.md", &ctx), "doc/api/README.md");
    }

    #[test]
    fn test_no_project_skips_rewriting() {
        let (store, urls, _) = fixture();
        let ctx = RenderContext::new(&store, &urls);
        assert_eq!(resolve_url("doc/api/README.md", &ctx), "doc/api/README.md");
    }
}
