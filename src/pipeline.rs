//! Concurrent batch scoring.
//!
//! Each [`ArticleRequest`] is driven through a small state machine:
//!
//! ```text
//! Start ──fetch──▶ Fetched ──extract──▶ Extracted ──score──▶ Done(OK)
//!   │                 │
//!   ├─▶ Done(FETCH_ERROR / TIMEOUT)
//!                     └─▶ Done(PARSING_ERROR)
//! ```
//!
//! Every transition consumes the previous state and returns the next one, so
//! a result only comes into existence at a terminal state. The batch runs
//! all machines concurrently over one shared [`Fetcher`] and writes each
//! result into the slot of its request, so output order always matches
//! input order. A panicking article is caught at its own boundary and
//! reported as `FETCH_ERROR` without disturbing its siblings.

use crate::adapters::Extractor;
use crate::error::{FetchError, PipelineError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::lexicon::Lexicon;
use crate::models::{ArticleRequest, ArticleResult, ProcessingStatus};
use crate::text_tools::{Normalizer, calculate_jaundice_rate, split_by_words};
use crate::utils::timed;
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Fetch wait bound used when the caller gives none.
pub const REQUEST_TIMEOUT_SEC: u64 = 10;

/// Articles processed at the same time within one batch.
pub const DEFAULT_CONCURRENCY: usize = 12;

/// Where one article is in its processing.
#[derive(Debug)]
enum ArticleState {
    Start,
    Fetched { html: String },
    Extracted { text: String },
    Done(ArticleResult),
}

/// Scores batches of articles against a charged-word lexicon.
#[derive(Clone)]
pub struct Analyzer {
    lexicon: Arc<Lexicon>,
    normalizer: Arc<dyn Normalizer>,
    extractor: Arc<dyn Extractor>,
    concurrency: usize,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("lexicon_words", &self.lexicon.len())
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl Analyzer {
    /// Create an analyzer with the default concurrency cap.
    ///
    /// # Arguments
    ///
    /// * `lexicon` - Charged words, usually [`Lexicon::global`]
    /// * `normalizer` - Maps tokens to the form the lexicon is spelled in
    /// * `extractor` - Site adapter turning pages into article text
    pub fn new(
        lexicon: Arc<Lexicon>,
        normalizer: Arc<dyn Normalizer>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            lexicon,
            normalizer,
            extractor,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap on articles in flight at once. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Score a batch over a fresh HTTP connection pool.
    ///
    /// The pool lives for this call only and is dropped on every exit path.
    ///
    /// # Arguments
    ///
    /// * `requests` - Articles to score
    /// * `timeout` - Fetch bound per article, [`REQUEST_TIMEOUT_SEC`] when `None`
    ///
    /// # Returns
    ///
    /// One [`ArticleResult`] per request, in request order.
    ///
    /// # Errors
    ///
    /// Only [`PipelineError::Transport`], when the HTTP client cannot be built.
    /// Per-article failures are reported through each result's status.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let results = analyzer
    ///     .process(&[ArticleRequest::new("https://inosmi.ru/a.html")], None)
    ///     .await?;
    /// assert_eq!(results.len(), 1);
    /// ```
    #[instrument(level = "info", skip_all, fields(count = requests.len()))]
    pub async fn process(
        &self,
        requests: &[ArticleRequest],
        timeout: Option<Duration>,
    ) -> Result<Vec<ArticleResult>, PipelineError> {
        let fetcher = HttpFetcher::new()?;
        Ok(self.process_with(&fetcher, requests, timeout).await)
    }

    /// Score a batch through `fetcher`, which every article shares.
    ///
    /// At most `concurrency` articles are in flight at once. Completion order
    /// is arbitrary; each result is written into the slot of its request.
    /// A panic inside one article yields `FETCH_ERROR` for that article only.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Transport shared by all articles of the batch
    /// * `requests` - Articles to score
    /// * `timeout` - Fetch bound per article, [`REQUEST_TIMEOUT_SEC`] when `None`
    ///
    /// # Returns
    ///
    /// Exactly `requests.len()` results, result `i` belonging to request `i`.
    pub async fn process_with<F: Fetcher>(
        &self,
        fetcher: &F,
        requests: &[ArticleRequest],
        timeout: Option<Duration>,
    ) -> Vec<ArticleResult> {
        let wait = timeout.unwrap_or(Duration::from_secs(REQUEST_TIMEOUT_SEC));
        let t0 = Instant::now();
        info!(
            count = requests.len(),
            concurrency = self.concurrency,
            timeout_ms = wait.as_millis() as u64,
            "Starting batch"
        );

        let mut slots: Vec<Option<ArticleResult>> = vec![None; requests.len()];
        // Items must be owned: a borrowed request makes the future not `Send`.
        let mut completed = stream::iter(requests.iter().cloned().enumerate())
            .map(|(index, request)| async move {
                let request = &request;
                let result = AssertUnwindSafe(self.process_article(fetcher, request, wait))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        error!(
                            index,
                            url = %request.url,
                            panic = %panic_message(panic.as_ref()),
                            "Article task panicked"
                        );
                        ArticleResult::unclassified(request)
                    });
                (index, result)
            })
            .buffer_unordered(self.concurrency);

        while let Some((index, result)) = completed.next().await {
            debug!(index, status = %result.status(), "Article finished");
            slots[index] = Some(result);
        }

        let results: Vec<ArticleResult> = slots
            .into_iter()
            .zip(requests)
            .map(|(slot, request)| slot.unwrap_or_else(|| ArticleResult::unclassified(request)))
            .collect();

        let counts = results.iter().map(ArticleResult::status).counts();
        let count_of = |s: ProcessingStatus| counts.get(&s).copied().unwrap_or(0);
        info!(
            total = results.len(),
            ok = count_of(ProcessingStatus::Ok),
            fetch_error = count_of(ProcessingStatus::FetchError),
            timeout = count_of(ProcessingStatus::Timeout),
            parsing_error = count_of(ProcessingStatus::ParsingError),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Batch complete"
        );
        results
    }

    /// Drive one article to a terminal state.
    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    pub async fn process_article<F: Fetcher>(
        &self,
        fetcher: &F,
        request: &ArticleRequest,
        wait: Duration,
    ) -> ArticleResult {
        let mut state = ArticleState::Start;
        loop {
            state = match state {
                ArticleState::Start => self.fetch(fetcher, request, wait).await,
                ArticleState::Fetched { html } => self.extract(request, &html),
                ArticleState::Extracted { text } => self.score(request, &text),
                ArticleState::Done(result) => return result,
            };
        }
    }

    async fn fetch<F: Fetcher>(
        &self,
        fetcher: &F,
        request: &ArticleRequest,
        wait: Duration,
    ) -> ArticleState {
        match fetcher.get(&request.url, wait).await {
            Ok(html) => ArticleState::Fetched { html },
            Err(FetchError::Timeout) => {
                warn!(timeout_ms = wait.as_millis() as u64, "Fetch timed out");
                ArticleState::Done(ArticleResult::timeout(request))
            }
            Err(e @ (FetchError::Connection(_) | FetchError::InvalidUrl { .. })) => {
                warn!(error = %e, "URL cannot be fetched");
                ArticleState::Done(ArticleResult::fetch_error(request))
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                ArticleState::Done(ArticleResult::unclassified(request))
            }
        }
    }

    fn extract(&self, request: &ArticleRequest, html: &str) -> ArticleState {
        match self.extractor.extract(html) {
            Ok(text) => ArticleState::Extracted { text },
            Err(e) => {
                warn!(host = %request.host(), error = %e, "Page is not a supported article");
                ArticleState::Done(ArticleResult::parsing_error(request))
            }
        }
    }

    fn score(&self, request: &ArticleRequest, text: &str) -> ArticleState {
        let label = request.title.as_deref().unwrap_or(&request.url);
        let words = timed(label, || split_by_words(self.normalizer.as_ref(), text));
        let score = calculate_jaundice_rate(&words, &self.lexicon);
        debug!(score, words = words.len(), "Scored article");
        ArticleState::Done(ArticleResult::ok(request, score, words.len()))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
