//! Prompt and cleanup of generated title/hashtag text.

use std::sync::LazyLock;

use regex::Regex;

/// Prompt asking for a title line followed by a hashtag line.
pub const TITLE_HASHTAGS_PROMPT: &str = "Return exactly two lines:
Line 1: A short, catchy video title (no extra words, no quotation marks).
Line 2: 3-5 hashtags separated by commas (do not add the word \"Hashtag\" or
any labels).";

// Unicode `\s` plus the BOM, which ECMAScript also counts as whitespace
static TITLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title:[\s\x{FEFF}]*").expect("valid title label regex"));

static HASHTAGS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hashtags:[\s\x{FEFF}]*").expect("valid hashtags label regex")
});

/// Strip `title:` and `hashtags:` labels (any case, trailing whitespace
/// included) wherever the model emitted them anyway.
pub fn clean_generated_text(raw: &str) -> String {
    let without_title = TITLE_LABEL.replace_all(raw, "");
    HASHTAGS_LABEL.replace_all(&without_title, "").into_owned()
}

/// Title and hashtags parsed out of cleaned generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleHashtags {
    pub title: Option<String>,
    pub hashtags: Vec<String>,
}

impl TitleHashtags {
    /// First non-blank line is the title, the second holds comma separated
    /// hashtags. Missing lines are left empty.
    pub fn parse(cleaned: &str) -> Self {
        let mut lines = cleaned.lines().map(str::trim).filter(|l| !l.is_empty());

        let title = lines.next().map(str::to_string);
        let hashtags = lines
            .next()
            .map(|line| {
                line.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { title, hashtags }
    }
}
