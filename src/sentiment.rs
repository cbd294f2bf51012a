//! Lexicon-based polarity scoring in the style of VADER (Hutto & Gilbert, 2014),
//! and the per-article title/description/final scores built on it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::article::NormalizedArticle;
use crate::error::{Error, Result};

/// English word valences in `vader_lexicon.txt` format, about 1,500 common news words.
const BUNDLED_LEXICON: &str = include_str!("../resources/lexicon.tsv");

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const ALPHA: f64 = 15.0;

const NEGATE: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOST_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "effing", "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
    "flipping", "flippin", "fricking", "frickin", "frigging", "friggin", "fully", "fucking",
    "greatly", "hella", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "uber", "unbelievably", "unusually", "utterly",
    "very",
];

const BOOST_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta", "sortof", "sort-of",
];

fn booster(word: &str) -> Option<f64> {
    if BOOST_UP.contains(&word) {
        Some(B_INCR)
    } else if BOOST_DOWN.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn negated(word: &str) -> bool {
    NEGATE.contains(&word) || word.contains("n't")
}

/// Uppercase in the sense of Python's `str.isupper`: some cased letter, none lowercase.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Word -> mean valence.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_LEXICON)
    }

    /// Parse `token<TAB>mean[<TAB>...]` lines. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut valences = HashMap::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let word = cols.next().unwrap_or_default().trim();
            let mean = cols.next().ok_or_else(|| Error::LexiconFormat {
                line: n + 1,
                reason: "missing valence column".to_string(),
            })?;
            let mean: f64 = mean.trim().parse().map_err(|_| Error::LexiconFormat {
                line: n + 1,
                reason: format!("invalid valence '{}'", mean.trim()),
            })?;
            valences.insert(word.to_lowercase(), mean);
        }
        Ok(Self { valences })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&text)?;
        debug!(path = ?path, entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// The file at `path`, or the bundled list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// Proportions of negative, neutral and positive valence, plus the normalized compound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Score one text. Words are looked up one at a time; VADER's multi-word idioms
    /// ("bad ass", "kiss of death", ...) are not recognized.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words = words_and_emoticons(text);
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let cap_diff = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for (i, word) in lower.iter().enumerate() {
            if booster(word).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if word == "kind" && lower.get(i + 1).is_some_and(|next| next == "of") {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence(&words, &lower, i, cap_diff));
        }

        but_check(&lower, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn valence(&self, words: &[&str], lower: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(base) = self.lexicon.get(&lower[i]) else {
            return 0.0;
        };
        let mut valence = base;

        if lower[i] == "no" && lower.get(i + 1).is_some_and(|next| self.lexicon.contains(next)) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if cap_diff && is_upper(words[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let prior = i - start - 1;
            if self.lexicon.contains(&lower[prior]) {
                continue;
            }
            let mut scalar = scalar_inc_dec(words[prior], &lower[prior], valence, cap_diff);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lower, start, i);
        }

        self.least_check(valence, lower, i)
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i > 1 && !self.lexicon.contains(&lower[i - 1]) && lower[i - 1] == "least" {
            if lower[i - 2] != "at" && lower[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && !self.lexicon.contains(&lower[i - 1]) && lower[i - 1] == "least" {
            return valence * N_SCALAR;
        }
        valence
    }
}

/// Whitespace-split tokens with surrounding punctuation trimmed (unless that would leave
/// two characters or fewer), dropping single-character tokens.
fn words_and_emoticons(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|w| w.chars().count() > 1)
        .collect()
}

/// True when some, but not all, words are in ALL CAPS.
fn allcap_differential(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_upper(w)).count();
    caps > 0 && caps < words.len()
}

fn scalar_inc_dec(word: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_upper(word) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(valence: f64, lower: &[String], start: usize, i: usize) -> f64 {
    let back = |n: usize| lower[i - n].as_str();
    match start {
        0 if negated(back(1)) => valence * N_SCALAR,
        1 if back(2) == "never" && matches!(back(1), "so" | "this") => valence * 1.25,
        1 if back(2) == "without" && back(1) == "doubt" => valence,
        1 if negated(back(2)) => valence * N_SCALAR,
        2 if back(3) == "never"
            && (matches!(back(2), "so" | "this") || matches!(back(1), "so" | "this")) =>
        {
            valence * 1.25
        }
        2 if back(3) == "without" && (back(2) == "doubt" || back(1) == "doubt") => valence,
        2 if negated(back(3)) => valence * N_SCALAR,
        _ => valence,
    }
}

/// Sentiment before "but" is halved, sentiment after it weighs 1.5x.
fn but_check(lower: &[String], sentiments: &mut [f64]) {
    let Some(but) = lower.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but {
            *sentiment *= 0.5;
        } else if idx > but {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        n if n <= 1 => 0.0,
        n if n <= 3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let (mut pos, mut neg, mut neu) = (0.0, 0.0, 0.0);
    for &s in sentiments {
        if s > 0.0 {
            pos += s + 1.0;
        } else if s < 0.0 {
            neg += s - 1.0;
        } else {
            neu += 1.0;
        }
    }
    if pos > neg.abs() {
        pos += emphasis;
    } else if pos < neg.abs() {
        neg -= emphasis;
    }

    let total = pos + neg.abs() + neu;
    PolarityScores {
        neg: round_to((neg / total).abs(), 3),
        neu: round_to((neu / total).abs(), 3),
        pos: round_to((pos / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

/// A normalized article with its sentiment scores.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: NormalizedArticle,
    pub title_sentiment: f64,
    pub description_sentiment: f64,
    pub final_sentiment: f64,
}

/// Score the tokenized title and description of each article; final is their mean.
pub fn score_articles(
    analyzer: &SentimentAnalyzer,
    articles: Vec<NormalizedArticle>,
) -> Vec<ScoredArticle> {
    articles
        .into_iter()
        .map(|article| {
            let title_sentiment = analyzer.polarity_scores(&article.title_tokenized).compound;
            let description_sentiment =
                analyzer.polarity_scores(&article.description_tokenized).compound;
            ScoredArticle {
                article,
                title_sentiment,
                description_sentiment,
                final_sentiment: (title_sentiment + description_sentiment) / 2.0,
            }
        })
        .collect()
}
