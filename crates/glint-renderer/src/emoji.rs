//! Emoji shortcode table and image markup.

use std::collections::HashMap;
use std::sync::LazyLock;

use glint_types::AssetUrls;

use crate::state::escape_html;

/// Built-in shortcode → image filename pairs.
///
/// Filenames follow the bundled emoji asset set: the shortcode itself,
/// except where the shortcode contains characters that cannot appear in a
/// filename (`+1` → `plus1`, `-1` → `minus1`).
const BUILTIN: &[(&str, &str)] = &[
    ("+1", "plus1"),
    ("-1", "minus1"),
    ("100", "100"),
    ("airplane", "airplane"),
    ("alien", "alien"),
    ("angry", "angry"),
    ("anguished", "anguished"),
    ("art", "art"),
    ("astonished", "astonished"),
    ("blue_heart", "blue_heart"),
    ("blush", "blush"),
    ("boat", "boat"),
    ("bomb", "bomb"),
    ("book", "book"),
    ("boom", "boom"),
    ("bow", "bow"),
    ("broken_heart", "broken_heart"),
    ("bug", "bug"),
    ("bulb", "bulb"),
    ("bus", "bus"),
    ("car", "car"),
    ("cat", "cat"),
    ("chart_with_downwards_trend", "chart_with_downwards_trend"),
    ("chart_with_upwards_trend", "chart_with_upwards_trend"),
    ("checkered_flag", "checkered_flag"),
    ("clap", "clap"),
    ("cloud", "cloud"),
    ("cocktail", "cocktail"),
    ("coffee", "coffee"),
    ("confused", "confused"),
    ("construction", "construction"),
    ("cool", "cool"),
    ("cry", "cry"),
    ("dancer", "dancer"),
    ("dash", "dash"),
    ("disappointed", "disappointed"),
    ("dizzy", "dizzy"),
    ("dog", "dog"),
    ("exclamation", "exclamation"),
    ("eyes", "eyes"),
    ("facepunch", "facepunch"),
    ("fire", "fire"),
    ("fireworks", "fireworks"),
    ("fish", "fish"),
    ("fist", "fist"),
    ("flushed", "flushed"),
    ("frowning", "frowning"),
    ("gem", "gem"),
    ("gift", "gift"),
    ("grimacing", "grimacing"),
    ("grin", "grin"),
    ("grinning", "grinning"),
    ("hammer", "hammer"),
    ("hand", "hand"),
    ("heart", "heart"),
    ("heart_eyes", "heart_eyes"),
    ("innocent", "innocent"),
    ("joy", "joy"),
    ("key", "key"),
    ("kiss", "kiss"),
    ("laughing", "laughing"),
    ("lock", "lock"),
    ("mag", "mag"),
    ("memo", "memo"),
    ("metal", "metal"),
    ("moneybag", "moneybag"),
    ("muscle", "muscle"),
    ("neutral_face", "neutral_face"),
    ("notes", "notes"),
    ("ok", "ok"),
    ("ok_hand", "ok_hand"),
    ("open_mouth", "open_mouth"),
    ("pencil", "pencil"),
    ("pensive", "pensive"),
    ("point_down", "point_down"),
    ("point_left", "point_left"),
    ("point_right", "point_right"),
    ("point_up", "point_up"),
    ("pray", "pray"),
    ("question", "question"),
    ("rage", "rage"),
    ("raised_hands", "raised_hands"),
    ("relaxed", "relaxed"),
    ("relieved", "relieved"),
    ("rocket", "rocket"),
    ("runner", "runner"),
    ("satisfied", "satisfied"),
    ("scream", "scream"),
    ("shit", "shit"),
    ("ship", "ship"),
    ("sleeping", "sleeping"),
    ("sleepy", "sleepy"),
    ("smile", "smile"),
    ("smiley", "smiley"),
    ("smiling_imp", "smiling_imp"),
    ("smirk", "smirk"),
    ("sob", "sob"),
    ("sparkles", "sparkles"),
    ("star", "star"),
    ("stuck_out_tongue", "stuck_out_tongue"),
    ("sunglasses", "sunglasses"),
    ("sunny", "sunny"),
    ("sweat", "sweat"),
    ("sweat_smile", "sweat_smile"),
    ("tada", "tada"),
    ("thought_balloon", "thought_balloon"),
    ("thumbsdown", "thumbsdown"),
    ("thumbsup", "thumbsup"),
    ("tongue", "tongue"),
    ("top", "top"),
    ("tractor", "tractor"),
    ("train", "train"),
    ("triumph", "triumph"),
    ("trophy", "trophy"),
    ("unamused", "unamused"),
    ("unlock", "unlock"),
    ("v", "v"),
    ("warning", "warning"),
    ("wave", "wave"),
    ("wink", "wink"),
    ("worried", "worried"),
    ("wrench", "wrench"),
    ("yum", "yum"),
    ("zap", "zap"),
    ("zzz", "zzz"),
];

static BUILTIN_TABLE: LazyLock<EmojiTable> = LazyLock::new(|| {
    let mut table = EmojiTable::new();
    for (shortcode, filename) in BUILTIN {
        table.insert(*shortcode, *filename);
    }
    table
});

/// A closed set of emoji shortcodes and their image filenames.
///
/// Shortcodes outside the table are never substituted.
#[derive(Clone, Debug, Default)]
pub struct EmojiTable {
    map: HashMap<String, String>,
}

impl EmojiTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide built-in table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// Register a shortcode.
    pub fn insert(&mut self, shortcode: impl Into<String>, filename: impl Into<String>) {
        self.map.insert(shortcode.into(), filename.into());
    }

    /// Image filename (without extension) for a shortcode, if known.
    #[must_use]
    pub fn filename(&self, shortcode: &str) -> Option<&str> {
        self.map.get(shortcode).map(String::as_str)
    }

    /// Image markup for a known shortcode; `None` for unknown shortcodes.
    ///
    /// `alt` and `title` carry the original `:shortcode:` token; the
    /// intrinsic size is fixed at 20×20.
    pub(crate) fn image_html(&self, shortcode: &str, assets: &AssetUrls) -> Option<String> {
        let filename = self.filename(shortcode)?;
        let src = assets.asset_url(&format!("emoji/{filename}.png"));
        let token = format!(":{shortcode}:");
        Some(format!(
            r#"<img class="emoji" title="{token}" alt="{token}" src="{}" height="20" width="20">"#,
            escape_html(&src)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_lookup() {
        let table = EmojiTable::builtin();
        assert_eq!(table.filename("smile"), Some("smile"));
        assert_eq!(table.filename("+1"), Some("plus1"));
        assert_eq!(table.filename("invalid-emoji"), None);
    }

    #[test]
    fn test_image_html_root_relative() {
        let html = EmojiTable::builtin()
            .image_html("smile", &AssetUrls::new())
            .unwrap();
        assert_eq!(
            html,
            r#"<img class="emoji" title=":smile:" alt=":smile:" src="/assets/emoji/smile.png" height="20" width="20">"#
        );
    }

    #[test]
    fn test_image_html_unknown_shortcode() {
        assert!(
            EmojiTable::builtin()
                .image_html("invalid-emoji", &AssetUrls::new())
                .is_none()
        );
    }

    #[test]
    fn test_custom_table() {
        let mut table = EmojiTable::new();
        table.insert("party_parrot", "party_parrot");
        assert!(table.filename("party_parrot").is_some());
        assert!(table.filename("smile").is_none());
    }
}
