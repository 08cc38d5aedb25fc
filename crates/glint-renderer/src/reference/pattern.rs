//! Textual reference scanning.
//!
//! Scanners locate candidate spans only; whether a candidate becomes a
//! link is the resolver's business. Word boundaries are checked here:
//! a candidate glued to further identifier characters on either side is
//! not a reference at all.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::kind::ReferenceKind;

/// Namespaced project path: at least two `/`-separated segments.
const PROJECT_PATH: &str = r"[A-Za-z0-9_][A-Za-z0-9_.-]*(?:/[A-Za-z0-9_.-]+)+";

static ISSUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?P<proj>{PROJECT_PATH})?#(?P<id>\d+)")).unwrap());

static MERGE_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?P<proj>{PROJECT_PATH})?!(?P<id>\d+)")).unwrap());

static SNIPPET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?P<proj>{PROJECT_PATH})?\$(?P<id>\d+)")).unwrap());

static TEAM_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(?P<user>[A-Za-z0-9][A-Za-z0-9_.-]*)").unwrap());

static COMMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:(?P<proj>{PROJECT_PATH})@)?(?P<sha>[0-9a-f]{{6,40}})")).unwrap()
});

/// URL-shaped runs; nothing inside them is ever substituted, mirroring how
/// autolinked URLs are opaque to the walker.
static URL_GUARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-z][a-z0-9+.-]*://[^\s<>]+|\bmailto:[^\s<>]+").unwrap()
});

static EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(?P<name>[A-Za-z0-9_+-]+):").unwrap());

/// A located candidate reference, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawMatch {
    pub range: Range<usize>,
    pub kind: ReferenceKind,
    /// Cross-project path prefix, when present.
    pub project_path: Option<String>,
    /// Numeric id, username, sha, or full external reference.
    pub identifier: String,
}

/// Identifier characters never border a reference.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check that the span is delimited by non-identifier characters (or the
/// segment edges).
fn bounded(text: &str, range: &Range<usize>) -> bool {
    let before_ok = text[..range.start]
        .chars()
        .next_back()
        .is_none_or(|c| !is_identifier_char(c));
    let after_ok = text[range.end..]
        .chars()
        .next()
        .is_none_or(|c| !is_identifier_char(c));
    before_ok && after_ok
}

fn scan(text: &str, re: &Regex, kind: ReferenceKind, id_group: &str) -> Vec<RawMatch> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0).expect("match has a whole-match group");
            let range = whole.start()..whole.end();
            if !bounded(text, &range) {
                return None;
            }
            Some(RawMatch {
                range,
                kind,
                project_path: caps.name("proj").map(|p| p.as_str().to_owned()),
                identifier: caps
                    .name(id_group)
                    .expect("pattern always captures its identifier")
                    .as_str()
                    .to_owned(),
            })
        })
        .collect()
}

pub(crate) fn scan_issues(text: &str) -> Vec<RawMatch> {
    scan(text, &ISSUE, ReferenceKind::Issue, "id")
}

pub(crate) fn scan_merge_requests(text: &str) -> Vec<RawMatch> {
    scan(text, &MERGE_REQUEST, ReferenceKind::MergeRequest, "id")
}

pub(crate) fn scan_snippets(text: &str) -> Vec<RawMatch> {
    scan(text, &SNIPPET, ReferenceKind::Snippet, "id")
}

pub(crate) fn scan_commits(text: &str) -> Vec<RawMatch> {
    scan(text, &COMMIT, ReferenceKind::Commit, "sha")
}

/// Team member candidates. Trailing periods belong to the sentence, not
/// the username, so they are trimmed off the capture.
pub(crate) fn scan_team_members(text: &str) -> Vec<RawMatch> {
    TEAM_MEMBER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0).expect("match has a whole-match group");
            let user = caps.name("user").expect("pattern always captures user");
            let mut identifier = user.as_str();
            while let Some(stripped) = identifier.strip_suffix('.') {
                identifier = stripped;
            }
            if identifier.is_empty() {
                return None;
            }
            let range = whole.start()..whole.start() + 1 + identifier.len();
            if !bounded(text, &range) {
                return None;
            }
            Some(RawMatch {
                range,
                kind: ReferenceKind::TeamMember,
                project_path: None,
                identifier: identifier.to_owned(),
            })
        })
        .collect()
}

/// External tracker candidates, given the per-project compiled pattern.
/// The identifier is the full `PREFIX-123` reference.
pub(crate) fn scan_external(text: &str, pattern: &Regex) -> Vec<RawMatch> {
    pattern
        .find_iter(text)
        .filter_map(|found| {
            let range = found.start()..found.end();
            if !bounded(text, &range) {
                return None;
            }
            Some(RawMatch {
                range,
                kind: ReferenceKind::ExternalIssue,
                project_path: None,
                identifier: found.as_str().to_owned(),
            })
        })
        .collect()
}

/// Spans of URL-shaped text, pre-claimed before any kind scans.
pub(crate) fn url_guard_spans(text: &str) -> Vec<Range<usize>> {
    URL_GUARD
        .find_iter(text)
        .map(|found| found.start()..found.end())
        .collect()
}

/// Candidate `:shortcode:` tokens with the shortcode name.
pub(crate) fn emoji_candidates(text: &str) -> Vec<(Range<usize>, String)> {
    EMOJI
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("match has a whole-match group");
            let name = caps.name("name").expect("pattern always captures name");
            (whole.start()..whole.end(), name.as_str().to_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "5937ac0a7beb003549fc5fd26fc247adbce4a52e";

    #[test]
    fn test_issue_with_adjacent_punctuation() {
        let matches = scan_issues("Reference to (#42), right?");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, "42");
        assert_eq!(matches[0].project_path, None);
        assert_eq!(&"Reference to (#42), right?"[matches[0].range.clone()], "#42");
    }

    #[test]
    fn test_issue_glued_to_identifier_chars_is_not_a_match() {
        assert!(scan_issues("see #123abc").is_empty());
        assert!(scan_issues("see a#123").is_empty());
    }

    #[test]
    fn test_cross_project_issue() {
        let matches = scan_issues("Reference to dev/widgets#42");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].project_path.as_deref(), Some("dev/widgets"));
        assert_eq!(matches[0].identifier, "42");
    }

    #[test]
    fn test_merge_request_and_snippet_sigils() {
        assert_eq!(scan_merge_requests("Apply !7 now")[0].identifier, "7");
        assert_eq!(scan_snippets("see $123")[0].identifier, "123");
        assert!(scan_snippets("US$123m").is_empty());
    }

    #[test]
    fn test_team_member_grammar() {
        let matches = scan_team_members("@alpha.Beta_ping-pong you are right.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, "alpha.Beta_ping-pong");
    }

    #[test]
    fn test_team_member_trailing_period_not_consumed() {
        let text = "ping @gfm.";
        let matches = scan_team_members(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, "gfm");
        assert_eq!(&text[matches[0].range.clone()], "@gfm");
    }

    #[test]
    fn test_email_addresses_are_not_team_members() {
        assert!(scan_team_members("mail someone@example.com today").is_empty());
    }

    #[test]
    fn test_commit_full_and_short() {
        let text = format!("Reverts {SHA}");
        let matches = scan_commits(&text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, SHA);

        let matches = scan_commits("Backported from 5937ac0a");
        assert_eq!(matches[0].identifier, "5937ac0a");
    }

    #[test]
    fn test_commit_requires_hex_shape_boundaries() {
        // 41 hex characters: the 40-char window is glued to more hex.
        let text = format!("{SHA}0");
        assert!(scan_commits(&text).is_empty());
        // Too short.
        assert!(scan_commits("see 59ac").is_empty());
    }

    #[test]
    fn test_cross_project_commit() {
        let text = format!("other/project@{SHA}");
        let matches = scan_commits(&text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].project_path.as_deref(), Some("other/project"));
        assert_eq!(matches[0].identifier, SHA);
    }

    #[test]
    fn test_external_scan_uses_compiled_prefix() {
        let pattern = Regex::new(r"JIRA-\d+").unwrap();
        let matches = scan_external("Reference to JIRA-123, right?", &pattern);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identifier, "JIRA-123");
        // Glued suffix fails the boundary.
        assert!(scan_external("JIRA-123abc", &pattern).is_empty());
    }

    #[test]
    fn test_url_guard_covers_schemes() {
        let text = "look at http://example.tld/#!42 or mailto:a@b.c now";
        let spans = url_guard_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].clone()], "http://example.tld/#!42");
        assert_eq!(&text[spans[1].clone()], "mailto:a@b.c");
    }

    #[test]
    fn test_emoji_candidates() {
        let text = "+1 (:+1:) :heart_eyes: :not closed";
        let candidates = emoji_candidates(text);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].1, "+1");
        assert_eq!(candidates[1].1, "heart_eyes");
    }
}
