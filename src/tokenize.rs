//! Text cleaning: strip HTML tags and punctuation, split into lowercase words, drop stopwords.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// NLTK's English stopword list, one word per line.
const ENGLISH_STOPWORDS: &str = include_str!("../resources/stopwords/english");

pub const DEFAULT_LANGUAGE: &str = "english";

/// Characters deleted before tokenization.
const PUNCTUATION: &str = r#"!()-[]{};:'"\,<>./?@#$%^&*_~"#;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Stopword set for one language. Stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The bundled English list.
    pub fn english() -> Self {
        Self::parse(ENGLISH_STOPWORDS)
    }

    /// Parse a line-oriented list, one stopword per line.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Stopwords {
            path: path.to_path_buf(),
            source,
        })?;
        let stopwords = Self::parse(&text);
        debug!(path = ?path, count = stopwords.len(), "loaded stopwords");
        Ok(stopwords)
    }

    /// Load the list for `language`: `<dir>/<language>` when a directory is given,
    /// otherwise the bundled list (English only).
    pub fn for_language(language: &str, dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_file(&dir.join(language)),
            None if language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) => Ok(Self::english()),
            None => Err(Error::UnsupportedLanguage(language.to_string())),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// How `TextCleaner::process` shapes its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Keep only the first occurrence of each token.
    pub remove_duplicates: bool,
    /// Return the token list instead of a space-joined string.
    pub tokenize: bool,
}

/// Output of `TextCleaner::process`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleaned {
    Tokens(Vec<String>),
    Sentence(String),
}

#[derive(Debug, Clone)]
pub struct TextCleaner {
    stopwords: Stopwords,
}

impl TextCleaner {
    pub fn new(stopwords: Stopwords) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Clean `text` into lowercase non-stopword tokens. `None` yields no tokens.
    pub fn tokens(&self, text: Option<&str>, remove_duplicates: bool) -> Vec<String> {
        let Some(text) = text else {
            return Vec::new();
        };
        let text = strip_punctuation(&strip_html(text));
        let words = tokenize(&text)
            .into_iter()
            .filter(|w| !self.stopwords.contains(w));

        if remove_duplicates {
            let mut seen = HashSet::new();
            words.filter(|w| seen.insert(w.clone())).collect()
        } else {
            words.collect()
        }
    }

    /// Cleaned tokens joined by single spaces. `None` yields an empty string.
    pub fn sentence(&self, text: Option<&str>, remove_duplicates: bool) -> String {
        self.tokens(text, remove_duplicates).join(" ")
    }

    pub fn process(&self, text: Option<&str>, options: CleanOptions) -> Cleaned {
        let tokens = self.tokens(text, options.remove_duplicates);
        if options.tokenize {
            Cleaned::Tokens(tokens)
        } else {
            Cleaned::Sentence(tokens.join(" "))
        }
    }
}

/// Delete every `<...>` tag.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect()
}

/// Split text into lowercase words on Unicode word boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TextCleaner {
        TextCleaner::new(Stopwords::english())
    }

    #[test]
    fn test_strips_html_tags() {
        let tokens = cleaner().tokens(Some("<p>Markets <b>rally</b> today</p><br/>"), false);
        assert_eq!(tokens, vec!["markets", "rally", "today"]);
        assert!(tokens.iter().all(|t| !t.contains('<') && !t.contains('>')));
    }

    #[test]
    fn test_html_tags_are_non_greedy() {
        assert_eq!(strip_html("a <i>b</i> c"), "a b c");
    }

    #[test]
    fn test_removes_punctuation() {
        assert_eq!(strip_punctuation("U.S. stocks: up 3%!"), "US stocks up 3");
        assert_eq!(strip_punctuation(r"back\slash"), "backslash");
    }

    #[test]
    fn test_tokens_are_lowercase_and_not_stopwords() {
        let cleaner = cleaner();
        let tokens = cleaner.tokens(Some("The Economy IS Growing And The Outlook Is Bright"), false);
        assert_eq!(tokens, vec!["economy", "growing", "outlook", "bright"]);
        for token in &tokens {
            assert_eq!(token, &token.to_lowercase());
            assert!(!cleaner.stopwords().contains(token));
        }
    }

    #[test]
    fn test_none_yields_empty() {
        assert_eq!(cleaner().sentence(None, false), "");
        assert!(cleaner().tokens(None, true).is_empty());
    }

    #[test]
    fn test_deduplicate_keeps_first_occurrence_order() {
        let tokens = cleaner().tokens(Some("rain rain sun rain clouds sun"), true);
        assert_eq!(tokens, vec!["rain", "sun", "clouds"]);
    }

    #[test]
    fn test_process_output_modes() {
        let cleaner = cleaner();
        let text = Some("Good news, everyone!");
        assert_eq!(
            cleaner.process(text, CleanOptions { remove_duplicates: false, tokenize: true }),
            Cleaned::Tokens(vec!["good".to_string(), "news".to_string(), "everyone".to_string()])
        );
        assert_eq!(
            cleaner.process(text, CleanOptions::default()),
            Cleaned::Sentence("good news everyone".to_string())
        );
    }

    #[test]
    fn test_idempotent_without_dedup() {
        let cleaner = cleaner();
        let text = Some("<h1>Breaking:</h1> Central bank raises rates; markets react.");
        assert_eq!(cleaner.sentence(text, false), cleaner.sentence(text, false));
    }

    #[test]
    fn test_unsupported_language_without_dir() {
        assert!(matches!(
            Stopwords::for_language("greek", None),
            Err(Error::UnsupportedLanguage(lang)) if lang == "greek"
        ));
        assert!(Stopwords::for_language("English", None).is_ok());
    }

    #[test]
    fn test_stopwords_for_language_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("klingon"), "foo\nBar\n\n").unwrap();

        let stopwords = Stopwords::for_language("klingon", Some(dir.path())).unwrap();
        assert_eq!(stopwords.len(), 2);
        let cleaner = TextCleaner::new(stopwords);
        assert_eq!(cleaner.tokens(Some("Foo bar BAZ"), false), vec!["baz"]);

        assert!(matches!(
            Stopwords::for_language("vulcan", Some(dir.path())),
            Err(Error::Stopwords { .. })
        ));
    }

    #[test]
    fn test_custom_stopwords_case_insensitive() {
        let stopwords = Stopwords::new(["Foo", " bar "]);
        assert!(stopwords.contains("FOO"));
        assert!(stopwords.contains("bar"));
        assert_eq!(stopwords.len(), 2);
    }
}
