//! Command-line interface definitions.
//!
//! Global options can also come from environment variables or the YAML file
//! named by `--config`; see [`crate::config`] for precedence.

use crate::models::ArticleRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Score two articles, the second one with a known title
/// jaundice_rate score https://inosmi.ru/a.html "https://inosmi.ru/b.html|Some title"
///
/// # Serve GET /?urls=... on port 8080 with a 3 second fetch bound
/// jaundice_rate --timeout 3 serve --addr 0.0.0.0:8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, env = "JAUNDICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of charged-word lists (*.txt)
    #[arg(short, long, env = "JAUNDICE_DICT_DIR")]
    pub dict_dir: Option<PathBuf>,

    /// Articles processed at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-article fetch timeout in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score articles and print one report block per article
    Score {
        /// Article URLs, optionally as `URL|Title`
        #[arg(required = true, value_parser = parse_article)]
        articles: Vec<ArticleRequest>,

        /// Also write the results as JSON to this file
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Serve the scoring pipeline over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "JAUNDICE_ADDR")]
        addr: Option<String>,

        /// Largest number of URLs accepted per request
        #[arg(long)]
        max_urls: Option<usize>,
    },
}

fn parse_article(raw: &str) -> Result<ArticleRequest, String> {
    let (url, title) = match raw.split_once('|') {
        Some((url, title)) => (url.trim(), Some(title.trim())),
        None => (raw.trim(), None),
    };
    if url.is_empty() {
        return Err("article URL is empty".to_string());
    }
    Ok(match title.filter(|t| !t.is_empty()) {
        Some(title) => ArticleRequest::with_title(url, title),
        None => ArticleRequest::new(url),
    })
}

fn parse_timeout(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err("timeout must be a positive number of seconds".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_score_parsing() {
        let cli = Cli::parse_from([
            "jaundice_rate",
            "--dict-dir",
            "./charged_dict",
            "score",
            "https://inosmi.ru/a.html",
            "https://inosmi.ru/b.html|Какое влияние",
        ]);

        assert_eq!(cli.dict_dir, Some(PathBuf::from("./charged_dict")));
        match cli.command {
            Command::Score { articles, json } => {
                assert_eq!(articles.len(), 2);
                assert_eq!(articles[0], ArticleRequest::new("https://inosmi.ru/a.html"));
                assert_eq!(articles[1].title.as_deref(), Some("Какое влияние"));
                assert!(json.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_serve_short_flags() {
        let cli = Cli::parse_from([
            "jaundice_rate",
            "-t",
            "0.5",
            "serve",
            "--addr",
            "0.0.0.0:9000",
            "--max-urls",
            "5",
        ]);

        assert_eq!(cli.timeout, Some(0.5));
        match cli.command {
            Command::Serve { addr, max_urls } => {
                assert_eq!(addr.as_deref(), Some("0.0.0.0:9000"));
                assert_eq!(max_urls, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_non_positive_timeout() {
        let res = Cli::try_parse_from(["jaundice_rate", "--timeout", "0", "score", "https://a.b/"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_score_requires_articles() {
        assert!(Cli::try_parse_from(["jaundice_rate", "score"]).is_err());
    }

    #[test]
    fn test_parse_article_blank_title_is_none() {
        let req = parse_article("https://inosmi.ru/a.html| ").unwrap();
        assert_eq!(req.title, None);
        assert!(parse_article("|title").is_err());
    }
}
