//! # Jaundice Rate
//!
//! Scores news articles for sensationalism: each page is fetched, its article
//! text extracted, and the share of words found in a curated charged-word
//! lexicon reported as the article's score.
//!
//! ## Architecture
//!
//! 1. **Fetching**: every article is fetched concurrently over one shared
//!    connection pool, each under its own time bound
//! 2. **Extraction**: a site adapter isolates the article text from the page
//! 3. **Scoring**: words are normalized and matched against the lexicon
//!
//! Every input yields exactly one [`ArticleResult`], in input order, whatever
//! goes wrong with an individual article.
//!
//! ```ignore
//! let lexicon = Lexicon::global("charged_dict")?;
//! let analyzer = Analyzer::new(lexicon, Arc::new(LowercaseNormalizer), Arc::new(InosmiExtractor));
//! let results = analyzer.process(&[ArticleRequest::new(url)], None).await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lexicon;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod server;
pub mod text_tools;
pub mod utils;

pub use error::{FetchError, LexiconError, PipelineError};
pub use lexicon::Lexicon;
pub use models::{ArticleRequest, ArticleResult, ProcessingStatus};
pub use pipeline::Analyzer;
