//! Order scored articles from most positive to most negative.

use std::cmp::Ordering;

use crate::sentiment::ScoredArticle;

/// Sort by final sentiment, descending. The sort is stable, so ties keep their incoming order.
pub fn rank(mut articles: Vec<ScoredArticle>) -> Vec<ScoredArticle> {
    articles.sort_by(|a, b| {
        b.final_sentiment
            .partial_cmp(&a.final_sentiment)
            .unwrap_or(Ordering::Equal)
    });
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, NormalizedArticle};

    fn scored(title: &str, final_sentiment: f64) -> ScoredArticle {
        let article = Article {
            source_id: None,
            source_name: "Wire".to_string(),
            author: None,
            title: title.to_string(),
            description: None,
            url: format!("https://example.com/{}", title),
            published_at: "2022-01-01T00:00:00Z".parse().unwrap(),
            content: None,
            image_url: None,
        };
        ScoredArticle {
            article: NormalizedArticle {
                article,
                title_tokenized: title.to_lowercase(),
                description_tokenized: String::new(),
                content_tokenized: String::new(),
            },
            title_sentiment: final_sentiment,
            description_sentiment: final_sentiment,
            final_sentiment,
        }
    }

    fn titles(articles: &[ScoredArticle]) -> Vec<&str> {
        articles.iter().map(|a| a.article.article.title.as_str()).collect()
    }

    #[test]
    fn test_sorts_descending() {
        let ranked = rank(vec![scored("meh", 0.0), scored("bad", -0.7), scored("good", 0.8)]);
        assert_eq!(titles(&ranked), vec!["good", "meh", "bad"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].final_sentiment >= pair[1].final_sentiment);
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![scored("first", 0.2), scored("top", 0.9), scored("second", 0.2)]);
        assert_eq!(titles(&ranked), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
