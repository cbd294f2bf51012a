use good_news_first::config::{DataSource, PipelineConfig};
use good_news_first::newsapi::NewsApiClient;
use good_news_first::{pipeline, Category, Error, HeadlineQuery, Headlines};
use url::Url;
use wiremock::{
    matchers::{header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

const BODY: &str = r#"{
    "status": "ok",
    "totalResults": 2,
    "articles": [
        {
            "source": {"id": null, "name": "Gazette"},
            "author": null,
            "title": "Terrible storm causes disaster",
            "description": "Severe damage reported.",
            "url": "https://example.com/storm",
            "urlToImage": null,
            "publishedAt": "2022-01-05T09:00:00Z",
            "content": null
        },
        {
            "source": {"id": "abc", "name": "ABC"},
            "author": "Jane Roe",
            "title": "Local team celebrates wonderful victory",
            "description": "Fans cheer an amazing win.",
            "url": "https://example.com/victory",
            "urlToImage": "https://example.com/victory.jpg",
            "publishedAt": "2022-01-05T10:00:00Z",
            "content": "Great game."
        }
    ]
}"#;

fn client(server: &MockServer, key: &str) -> NewsApiClient {
    NewsApiClient::with_base_url(key, Url::parse(&server.uri()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_top_headlines_sends_query_and_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("category", "sports"))
        .and(query_param("country", "gb"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BODY, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = HeadlineQuery::new(Category::Sports, "gb".parse().unwrap());
    let headlines = client(&mock_server, "secret").top_headlines(&query).await.unwrap();

    assert_eq!(headlines.total_results, 2);
    assert_eq!(headlines.articles.len(), 2);
    assert_eq!(headlines.articles[1].source.id.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_global_query_omits_country() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("category", "general"))
        .and(query_param_is_missing("country"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BODY, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server, "secret")
        .top_headlines(&HeadlineQuery::default())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_key_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client(&mock_server, "wrong")
        .top_headlines(&HeadlineQuery::default())
        .await;

    match result {
        Err(Error::Api { status, code, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(code, "apiKeyInvalid");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server, "secret")
        .top_headlines(&HeadlineQuery::default())
        .await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_live_pipeline_ranks_positive_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BODY, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = PipelineConfig::new(DataSource::Live {
        api_key: "secret".to_string(),
        base_url: Url::parse(&mock_server.uri()).unwrap(),
    });

    let Headlines::Found(ranked) = pipeline::run(&config, &HeadlineQuery::default()).await.unwrap()
    else {
        panic!("expected ranked articles");
    };
    assert_eq!(ranked[0].article.article.url, "https://example.com/victory");
    assert_eq!(ranked[1].article.article.url, "https://example.com/storm");
}

#[tokio::test]
async fn test_live_pipeline_without_key_fails_before_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BODY, "application/json"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = PipelineConfig::new(DataSource::Live {
        api_key: String::new(),
        base_url: Url::parse(&mock_server.uri()).unwrap(),
    });
    let err = pipeline::run(&config, &HeadlineQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
