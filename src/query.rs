//! What the user asks for: a news category and, optionally, a country.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    #[default]
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    /// Capitalized name for headings.
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Query(format!("unknown category '{}'", s)))
    }
}

/// Country codes accepted by the top-headlines endpoint, with display names.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("ae", "United Arab Emirates"),
    ("ar", "Argentina"),
    ("at", "Austria"),
    ("au", "Australia"),
    ("be", "Belgium"),
    ("bg", "Bulgaria"),
    ("br", "Brazil"),
    ("ca", "Canada"),
    ("ch", "Switzerland"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("cu", "Cuba"),
    ("cz", "Czechia"),
    ("de", "Germany"),
    ("eg", "Egypt"),
    ("es", "Spain"),
    ("fr", "France"),
    ("gb", "United Kingdom"),
    ("gr", "Greece"),
    ("hk", "Hong Kong"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("in", "India"),
    ("is", "Iceland"),
    ("it", "Italy"),
    ("jp", "Japan"),
    ("kr", "Korea, Republic of"),
    ("lt", "Lithuania"),
    ("lv", "Latvia"),
    ("ma", "Morocco"),
    ("mx", "Mexico"),
    ("my", "Malaysia"),
    ("ng", "Nigeria"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("nz", "New Zealand"),
    ("ph", "Philippines"),
    ("pk", "Pakistan"),
    ("pl", "Poland"),
    ("pt", "Portugal"),
    ("ro", "Romania"),
    ("rs", "Serbia"),
    ("ru", "Russian Federation"),
    ("sa", "Saudi Arabia"),
    ("se", "Sweden"),
    ("sg", "Singapore"),
    ("si", "Slovenia"),
    ("sk", "Slovakia"),
    ("th", "Thailand"),
    ("tr", "Turkey"),
    ("tw", "Taiwan"),
    ("ua", "Ukraine"),
    ("us", "United States"),
    ("ve", "Venezuela"),
    ("za", "South Africa"),
];

/// A supported country, or `Global` for no country filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Country {
    #[default]
    Global,
    Code(&'static str),
}

impl Country {
    /// The `country` query parameter, if any.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Country::Global => None,
            Country::Code(code) => Some(*code),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Country::Global => "Global",
            Country::Code(code) => COUNTRIES
                .iter()
                .find(|(c, _)| c == code)
                .map(|(_, name)| *name)
                .unwrap_or(*code),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a two-letter code, `-`/`global`, or an empty string (Global).
impl FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("global") {
            return Ok(Country::Global);
        }
        COUNTRIES
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(s))
            .map(|(code, _)| Country::Code(*code))
            .ok_or_else(|| Error::Query(format!("unsupported country '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub category: Category,
    pub country: Country,
}

impl HeadlineQuery {
    pub fn new(category: Category, country: Country) -> Self {
        Self { category, country }
    }

    /// e.g. "Business News of Greece".
    pub fn heading(&self) -> String {
        format!("{} News of {}", self.category.title(), self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_and_title() {
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!(Category::Business.title(), "Business");
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_country_parse() {
        assert_eq!("GR".parse::<Country>().unwrap(), Country::Code("gr"));
        assert_eq!("-".parse::<Country>().unwrap(), Country::Global);
        assert_eq!("".parse::<Country>().unwrap(), Country::Global);
        assert!("xx".parse::<Country>().is_err());
    }

    #[test]
    fn test_country_code_and_name() {
        assert_eq!(Country::Global.code(), None);
        let greece: Country = "gr".parse().unwrap();
        assert_eq!(greece.code(), Some("gr"));
        assert_eq!(greece.name(), "Greece");
    }

    #[test]
    fn test_heading() {
        let query = HeadlineQuery::new(Category::Business, "gr".parse().unwrap());
        assert_eq!(query.heading(), "Business News of Greece");
        assert_eq!(HeadlineQuery::default().heading(), "General News of Global");
    }

    #[test]
    fn test_country_table_has_every_code() {
        assert_eq!(COUNTRIES.len(), 57);
    }
}
