use std::{fmt, sync::LazyLock};

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Number of words kept in a key.
pub const MAX_KEY_WORDS: usize = 3;

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\d½¼¾][\d\s/½¼¾,.x×]*\s*(?:(?:cucharadas?|cdas?|tazas?|unidad(?:es)?|paquetes?|latas?|sobres?|litros?|lts|lt|kg|gr|ml|g|l)\b)?\s*",
    )
    .expect("quantity pattern")
});

static AMOUNT_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:un|una|uno|dos|tres|cuatro|cinco|medio|media|pizca|chorro|poco|mucho)\s+")
        .expect("amount word pattern")
});

static PARENTHESIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthesis pattern"));

static QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:c/n|a gusto|cantidad necesaria|opcional)\s*$").expect("qualifier pattern")
});

static LEADING_DE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^de\s+").expect("leading de pattern"));

static NON_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s]").expect("non letter pattern"));

/// Comparison key derived from a raw ingredient string. Never displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key comes from text with nothing comparable left in it
    /// ("3", "(opcional)") and must never be matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalizes a raw ingredient into a key, keeping at most [`MAX_KEY_WORDS`] words.
///
/// ```
/// use weeklist_matching::normalize;
///
/// assert_eq!(normalize("1 kg de puré de tomate").as_str(), "pure de tomate");
/// assert_eq!(normalize("sal y pimienta a gusto").as_str(), "sal pimienta");
/// ```
pub fn normalize(raw: &str) -> NormalizedKey {
    normalize_with(raw, MAX_KEY_WORDS)
}

/// [`normalize`] with a custom word limit.
pub fn normalize_with(raw: &str, max_words: usize) -> NormalizedKey {
    let text = raw.trim().to_lowercase();

    let text = QUANTITY_RE.replace(&text, "");
    let text = AMOUNT_WORD_RE.replace(&text, "");
    let text = PARENTHESIS_RE.replace_all(&text, "");
    let text = QUALIFIER_RE.replace(text.trim(), "");
    let text = strip_accents(text.trim());
    let text = LEADING_DE_RE.replace(&text, "");
    let text = NON_LETTER_RE.replace_all(&text, " ");

    let key = text
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedKey(key)
}

fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
