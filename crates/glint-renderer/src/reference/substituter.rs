//! The combined reference + emoji scan-and-replace over one text segment.

use std::fmt::Write;
use std::ops::Range;

use glint_types::{ExternalTracker, Project};
use regex::Regex;

use super::kind::ReferenceKind;
use super::pattern::{self, RawMatch};
use crate::context::RenderContext;
use crate::state::escape_html;

fn overlaps_any(claimed: &[Range<usize>], range: &Range<usize>) -> bool {
    claimed
        .iter()
        .any(|c| c.start < range.end && range.start < c.end)
}

/// Scan-and-replace engine for eligible text segments.
///
/// Built once per render call; holds the context plus the compiled
/// external-tracker pattern for the current project (if one is
/// configured).
pub(crate) struct Substituter<'a> {
    ctx: &'a RenderContext<'a>,
    tracker: Option<(ExternalTracker, Regex)>,
}

impl<'a> Substituter<'a> {
    pub(crate) fn new(ctx: &'a RenderContext<'a>) -> Self {
        let tracker = ctx
            .project
            .and_then(|project| ctx.store.external_tracker(project))
            .and_then(|tracker| {
                let pattern = format!(r"{}-\d+", regex::escape(&tracker.prefix));
                match Regex::new(&pattern) {
                    Ok(re) => Some((tracker, re)),
                    Err(error) => {
                        tracing::warn!(%error, "invalid external tracker prefix");
                        None
                    }
                }
            });
        Self { ctx, tracker }
    }

    /// Append `text` to `out`, escaped, with every match replaced by its
    /// generated markup. Unmatched and unresolved spans come out
    /// byte-identical to the input (modulo HTML escaping).
    pub(crate) fn append(&self, text: &str, out: &mut String) {
        let mut last = 0;
        for (range, html) in self.replacements(text) {
            out.push_str(&escape_html(&text[last..range.start]));
            out.push_str(&html);
            last = range.end;
        }
        out.push_str(&escape_html(&text[last..]));
    }

    /// All replacements for one segment, sorted by position.
    pub(crate) fn replacements(&self, text: &str) -> Vec<(Range<usize>, String)> {
        let mut claimed = pattern::url_guard_spans(text);
        let mut replacements = Vec::new();

        if let Some(project) = self.ctx.project {
            let candidates = [
                pattern::scan_issues(text),
                pattern::scan_merge_requests(text),
                pattern::scan_snippets(text),
                pattern::scan_team_members(text),
                pattern::scan_commits(text),
                self.tracker
                    .as_ref()
                    .map(|(_, re)| pattern::scan_external(text, re))
                    .unwrap_or_default(),
            ];
            for raw in candidates.into_iter().flatten() {
                if overlaps_any(&claimed, &raw.range) {
                    continue;
                }
                // A textual match claims its span even when unresolved:
                // matches never overlap, and failed spans stay literal.
                claimed.push(raw.range.clone());
                let literal = &text[raw.range.clone()];
                match self.resolve(&raw, project, literal) {
                    Some(html) => replacements.push((raw.range, html)),
                    None => {
                        tracing::debug!(kind = ?raw.kind, reference = literal, "unresolved reference");
                    }
                }
            }
        }

        for (range, name) in pattern::emoji_candidates(text) {
            if overlaps_any(&claimed, &range) {
                continue;
            }
            if let Some(html) = self.ctx.emoji.image_html(&name, &self.ctx.assets) {
                claimed.push(range.clone());
                replacements.push((range, html));
            }
        }

        replacements.sort_by_key(|(range, _)| range.start);
        replacements
    }

    /// Resolve one candidate into anchor markup, or `None` to leave it
    /// literal.
    fn resolve(&self, raw: &RawMatch, current: &Project, literal: &str) -> Option<String> {
        let cross_project;
        let project = match &raw.project_path {
            Some(path) => {
                cross_project = self.ctx.store.find_project_by_path(path)?;
                &cross_project
            }
            None => current,
        };

        let store = self.ctx.store;
        let urls = self.ctx.urls;
        let (href, title) = match raw.kind {
            ReferenceKind::Issue => {
                let issue = store.find_issue(project, raw.identifier.parse().ok()?)?;
                (
                    urls.issue_url(project, &issue),
                    format!("Issue: {}", issue.title),
                )
            }
            ReferenceKind::MergeRequest => {
                let merge_request =
                    store.find_merge_request(project, raw.identifier.parse().ok()?)?;
                (
                    urls.merge_request_url(project, &merge_request),
                    format!("Merge Request: {}", merge_request.title),
                )
            }
            ReferenceKind::Snippet => {
                let snippet = store.find_snippet(project, raw.identifier.parse().ok()?)?;
                (
                    urls.snippet_url(project, &snippet),
                    format!("Snippet: {}", snippet.title),
                )
            }
            ReferenceKind::TeamMember => {
                let user = store.find_team_member(project, &raw.identifier)?;
                (urls.user_url(&user), user.name.clone())
            }
            ReferenceKind::Commit => {
                let commit = store.find_commit(project, &raw.identifier)?;
                (urls.commit_url(project, &commit), commit.link_title())
            }
            ReferenceKind::ExternalIssue => {
                let (tracker, _) = self.tracker.as_ref()?;
                (
                    tracker.issue_url(literal),
                    format!("Issue in {}", tracker.display_name),
                )
            }
        };
        Some(self.anchor(&href, &title, raw.kind.css_token(), literal))
    }

    fn anchor(&self, href: &str, title: &str, css_token: &str, literal: &str) -> String {
        let options = &self.ctx.options;
        let mut class = format!("gfm gfm-{css_token}");
        if let Some(extra) = options.extra_class() {
            class.push(' ');
            class.push_str(extra);
        }
        let mut html = format!(
            r#"<a class="{}" href="{}" title="{}""#,
            escape_html(&class),
            escape_html(href),
            escape_html(title)
        );
        for (name, value) in options.extra_attrs() {
            write!(html, r#" {name}="{}""#, escape_html(value)).unwrap();
        }
        write!(html, ">{}</a>", escape_html(literal)).unwrap();
        html
    }
}
