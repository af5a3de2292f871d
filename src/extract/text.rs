use crate::extract::{EmailStrategy, PageContent, EMAIL_PATTERN};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Human obfuscation idioms and their replacements, applied in order
///
/// The bare " at " / " dot " forms need whitespace on both sides; the
/// bracketed forms may touch the surrounding words.
static OBFUSCATION_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\s*\[at\]\s*", "@"),
        (r"(?i)\s*\(at\)\s*", "@"),
        (r"(?i)\s+at\s+", "@"),
        (r"(?i)\s*\[dot\]\s*", "."),
        (r"(?i)\s*\(dot\)\s*", "."),
        (r"(?i)\s+dot\s+", "."),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Finds addresses in the page text after undoing "[at]"/"[dot]" style
/// obfuscation
pub struct TextPatternStrategy;

impl EmailStrategy for TextPatternStrategy {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extract(&self, page: &PageContent<'_>) -> BTreeSet<String> {
        let normalized = deobfuscate(page.text);
        EMAIL_PATTERN
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Lower-cases `text` and rewrites obfuscated "at"/"dot" separators
///
/// Plain prose is rewritten too ("meet us at noon" becomes "meet us@noon");
/// the email pattern that runs afterwards is what rejects those.
///
/// # Example
///
/// ```
/// use mailsift::extract::deobfuscate;
///
/// assert_eq!(deobfuscate("John [at] Example [dot] com"), "john@example.com");
/// ```
pub fn deobfuscate(text: &str) -> String {
    let mut normalized = text.to_lowercase();
    for (pattern, replacement) in OBFUSCATION_RULES.iter() {
        normalized = pattern.replace_all(&normalized, *replacement).into_owned();
    }
    normalized
}
