// ── Language labels ──
//
// Course metadata carries ISO 639-1 codes; cards and the drawer show
// the English name. Unknown codes are shown upper-cased.

use std::borrow::Cow;

const LANGUAGES: &[(&str, &str)] = &[
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Human-readable label for a language code (`"en"` → `"English"`).
///
/// Region suffixes are ignored (`"en-US"` → `"English"`).
pub fn language_label(code: &str) -> Cow<'static, str> {
    let base = code
        .split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == base)
        .map_or_else(|| Cow::Owned(code.to_uppercase()), |(_, label)| Cow::Borrowed(*label))
}
