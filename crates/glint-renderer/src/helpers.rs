//! Text-level helpers: reference substitution without the structural
//! renderer.
//!
//! [`gfm`] runs the combined reference/emoji pass over plain text — the
//! right tool for single-line strings such as commit titles or event
//! descriptions that were never markdown to begin with. [`link_to_gfm`]
//! additionally wraps everything that is not a reference in a link of the
//! caller's choosing, splitting that outer link around the generated
//! reference anchors so anchors never nest.

use std::fmt::Write;

use crate::context::{RenderContext, RenderOptions};
use crate::reference::Substituter;
use crate::state::escape_html;

/// Substitute references and emoji in plain text.
///
/// The text is HTML-escaped; everything that is not a resolved reference
/// or a known emoji shortcode passes through byte-for-byte.
#[must_use]
pub fn gfm(text: &str, ctx: &RenderContext<'_>) -> String {
    let substituter = Substituter::new(ctx);
    let mut out = String::with_capacity(text.len());
    substituter.append(text, &mut out);
    out
}

/// Render `body` as a link to `url` while still linking references inside
/// it.
///
/// Reference anchors cannot nest inside another anchor, so the outer link
/// is emitted in pieces around them:
///
/// ```text
/// link_to_gfm("Fixes #42 for real", "/commit/abc", ctx)
/// => <a href="/commit/abc">Fixes </a><a class="gfm gfm-issue" ...>#42</a><a href="/commit/abc"> for real</a>
/// ```
///
/// Extra attributes from [`RenderOptions`] are forwarded to both the outer
/// link pieces and the reference anchors.
#[must_use]
pub fn link_to_gfm(body: &str, url: &str, ctx: &RenderContext<'_>) -> String {
    let substituter = Substituter::new(ctx);
    let open = outer_open_tag(url, &ctx.options);
    let mut out = String::with_capacity(body.len() + url.len());
    let mut last = 0;
    for (range, html) in substituter.replacements(body) {
        out.push_str(&open);
        out.push_str(&escape_html(&body[last..range.start]));
        out.push_str("</a>");
        out.push_str(&html);
        last = range.end;
    }
    out.push_str(&open);
    out.push_str(&escape_html(&body[last..]));
    out.push_str("</a>");
    out
}

fn outer_open_tag(url: &str, options: &RenderOptions) -> String {
    let mut tag = format!(r#"<a href="{}""#, escape_html(url));
    if let Some(class) = options.extra_class() {
        write!(tag, r#" class="{}""#, escape_html(class)).unwrap();
    }
    for (name, value) in options.extra_attrs() {
        write!(tag, r#" {name}="{}""#, escape_html(value)).unwrap();
    }
    tag.push('>');
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_types::{Commit, Issue, MemoryStore, Project, StandardUrls};
    use pretty_assertions::assert_eq;

    const SHA: &str = "5937ac0a7beb003549fc5fd26fc247adbce4a52e";

    fn fixture() -> (MemoryStore, StandardUrls, Project) {
        let mut store = MemoryStore::new();
        let project = Project::new("group/project");
        store.add_project(project.clone());
        store.add_issue(
            &project,
            Issue {
                iid: 1,
                title: "First".to_owned(),
            },
        );
        store.add_issue(
            &project,
            Issue {
                iid: 2,
                title: "Second".to_owned(),
            },
        );
        store.add_commit(
            &project,
            Commit {
                id: SHA.to_owned(),
                message: "Add submodule".to_owned(),
            },
        );
        (store, StandardUrls::new(), project)
    }

    #[test]
    fn test_gfm_requires_project_for_references() {
        let (store, urls, project) = fixture();

        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert!(gfm("Testing references: #1", &ctx).contains("<a "));

        let ctx = RenderContext::new(&store, &urls);
        assert_eq!(
            gfm("Testing references: #1", &ctx),
            "Testing references: #1"
        );
    }

    #[test]
    fn test_link_to_gfm_splits_outer_link_around_references() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        let out = link_to_gfm(
            "This should finally fix #1 and #2 for real",
            "/group/project/commit/abc",
            &ctx,
        );

        let groups: Vec<&str> = out.split("</a>").collect();
        assert!(groups[0].contains(r#"href="/group/project/commit/abc""#));
        assert!(groups[0].ends_with("This should finally fix "));
        assert!(groups[1].contains(r#"href="/group/project/issues/1""#));
        assert!(groups[1].ends_with("#1"));
        assert!(groups[2].contains(r#"href="/group/project/commit/abc""#));
        assert!(groups[2].ends_with(" and "));
        assert!(groups[3].contains(r#"href="/group/project/issues/2""#));
        assert!(groups[3].ends_with("#2"));
        assert!(groups[4].contains(r#"href="/group/project/commit/abc""#));
        assert!(groups[4].ends_with(" for real"));
    }

    #[test]
    fn test_link_to_gfm_without_references_wraps_whole_body() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        assert_eq!(
            link_to_gfm("release notes", "/group/project/wiki", &ctx),
            r#"<a href="/group/project/wiki">release notes</a>"#
        );
    }

    #[test]
    fn test_link_to_gfm_escapes_body_html() {
        let (store, urls, project) = fixture();
        let ctx = RenderContext::new(&store, &urls).with_project(&project);
        let out = link_to_gfm("This is a <h1>test</h1> - see #1", "/x", &ctx);
        assert!(out.contains("&lt;h1&gt;test&lt;/h1&gt;"));
        assert!(out.contains(r#"href="/group/project/issues/1""#));
    }

    #[test]
    fn test_link_to_gfm_forwards_html_options() {
        let (store, urls, project) = fixture();
        let options = RenderOptions::new().with_attribute("class", "foo");
        let ctx = RenderContext::new(&store, &urls)
            .with_project(&project)
            .with_options(options);
        let out = link_to_gfm(&format!("Fixed in {SHA}"), "/x", &ctx);
        assert!(out.contains(r#"class="gfm gfm-commit foo""#));
        assert!(out.contains(r#"<a href="/x" class="foo">"#));
    }
}
