//! GoodNewsFirst: fetch, score, rank, print or serve.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use url::Url;

use good_news_first::config::{
    DataSource, PipelineConfig, ENV_API_KEY, ENV_BASE_URL, ENV_FIXTURE, ENV_LANGUAGE, ENV_LEXICON,
    ENV_STOPWORDS_DIR,
};
use good_news_first::logging::{self, LoggingConfig};
use good_news_first::newsapi::DEFAULT_BASE_URL;
use good_news_first::query::{Category, Country, HeadlineQuery, COUNTRIES};
use good_news_first::server::{self, HeadlinesResponse, NO_RESULTS_MESSAGE};
use good_news_first::tokenize::DEFAULT_LANGUAGE;
use good_news_first::Headlines;

#[derive(Parser)]
#[command(name = "good-news")]
#[command(about = "Top news headlines, sorted from most positive to most negative")]
struct Cli {
    /// Debug logging (unless RUST_LOG is set).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch headlines once and print them ranked.
    Headlines {
        /// News category.
        #[arg(long, short, value_enum, default_value_t = Category::General)]
        category: Category,

        /// Two-letter country code, or "-" for global.
        #[arg(long, short = 'C', default_value = "-")]
        country: Country,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Start the JSON API.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List supported country codes.
    Countries,
}

#[derive(Args)]
struct SourceArgs {
    /// NewsAPI key.
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,

    /// NewsAPI base URL.
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Read a saved top-headlines JSON file instead of calling the API.
    #[arg(long, env = ENV_FIXTURE)]
    fixture: Option<PathBuf>,

    /// Stopword language.
    #[arg(long, env = ENV_LANGUAGE, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Directory holding one stopword file per language.
    #[arg(long, env = ENV_STOPWORDS_DIR)]
    stopwords_dir: Option<PathBuf>,

    /// Sentiment lexicon file (vader_lexicon.txt format).
    #[arg(long, env = ENV_LEXICON)]
    lexicon: Option<PathBuf>,
}

impl SourceArgs {
    fn into_config(self) -> anyhow::Result<PipelineConfig> {
        let source = match self.fixture {
            Some(path) => DataSource::Fixture(path),
            None => DataSource::Live {
                api_key: self.api_key.unwrap_or_default(),
                base_url: self.base_url,
            },
        };
        let config = PipelineConfig::new(source)
            .with_language(self.language)
            .with_stopwords_dir(self.stopwords_dir)
            .with_lexicon(self.lexicon);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(LoggingConfig::from_env().verbose(cli.verbose))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    match cli.command {
        Command::Headlines {
            category,
            country,
            json,
            source,
        } => {
            let config = source.into_config()?;
            run_headlines(&config, HeadlineQuery::new(category, country), json)?;
        }
        Command::Serve { port, source } => {
            let config = source.into_config()?;
            run_serve(config, port)?;
        }
        Command::Countries => {
            for (code, name) in COUNTRIES {
                println!("{}  {}", code, name);
            }
            println!("-   {}", Country::Global);
        }
    }
    Ok(())
}

fn run_headlines(config: &PipelineConfig, query: HeadlineQuery, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let headlines = rt
        .block_on(good_news_first::pipeline::run(config, &query))
        .with_context(|| format!("failed to get {}", query.heading()))?;

    if json {
        let body = HeadlinesResponse::new(&query, headlines);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("# {}", query.heading());
    match headlines {
        Headlines::NoResults => println!("{}", NO_RESULTS_MESSAGE),
        Headlines::Found(articles) => {
            for scored in &articles {
                let article = &scored.article.article;
                println!(
                    "{:+.4}  {}  ({})",
                    scored.final_sentiment, article.title, article.source_name
                );
                println!("         {}", article.url);
            }
        }
    }
    Ok(())
}

fn run_serve(config: PipelineConfig, port: u16) -> anyhow::Result<()> {
    let state: server::AppState = Arc::new(config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let app = server::router(state);

        let addr = format!("127.0.0.1:{}", port);
        info!("listening on http://{}", addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        axum::serve(listener, app).await?;
        Ok::<(), anyhow::Error>(())
    })?;
    Ok(())
}
