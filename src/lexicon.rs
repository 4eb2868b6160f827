//! The charged-word lexicon.
//!
//! A dictionary source is a directory of `*.txt` word lists, one word per
//! line. All lists are merged into a single deduplicated set of lowercased
//! words, spelled with `е` for `ё` the same way
//! [`LowercaseNormalizer`](crate::text_tools::LowercaseNormalizer) folds them. An empty result is a fatal configuration error: scoring every
//! article as `0.0` against an empty lexicon would be silently wrong.
//!
//! The process-wide instance lives in a [`OnceCell`] and is built on first
//! use by [`Lexicon::global`].

use crate::error::LexiconError;
use itertools::Itertools;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

static GLOBAL: OnceCell<Arc<Lexicon>> = OnceCell::new();

/// Immutable set of normalized charged words.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from in-memory words. Fails on an empty set.
    pub fn from_words<I, S>(words: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .filter_map(|w| clean_line(w.as_ref()))
            .collect();
        if words.is_empty() {
            return Err(LexiconError::Empty {
                path: PathBuf::from("<memory>"),
            });
        }
        Ok(Self { words })
    }

    /// Read every `*.txt` word list under `dir`.
    ///
    /// Members are read in file-name order and decoded as UTF-8 (invalid bytes
    /// are replaced). Each line is trimmed, lowercased and `ё`-folded; blank
    /// lines are skipped and duplicates collapse into one entry.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the word lists
    ///
    /// # Returns
    ///
    /// The loaded lexicon.
    ///
    /// # Errors
    ///
    /// * [`LexiconError::Io`] if `dir` or one of its members cannot be read
    /// * [`LexiconError::NotADirectory`] if `dir` is a plain file
    /// * [`LexiconError::Empty`] if no word survives normalization
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jaundice_rate::Lexicon;
    ///
    /// let lexicon = Lexicon::load("charged_dict")?;
    /// assert!(!lexicon.is_empty());
    /// # Ok::<(), jaundice_rate::LexiconError>(())
    /// ```
    #[instrument(level = "info", skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let dir = dir.as_ref();
        let io_err = |source| LexiconError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let meta = fs::metadata(dir).map_err(io_err)?;
        if !meta.is_dir() {
            return Err(LexiconError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let members: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .sorted()
            .collect();

        let mut words = HashSet::new();
        for member in &members {
            let bytes = fs::read(member).map_err(|source| LexiconError::Io {
                path: member.clone(),
                source,
            })?;
            let text = String::from_utf8_lossy(&bytes);
            let before = words.len();
            words.extend(text.lines().filter_map(clean_line));
            debug!(member = %member.display(), added = words.len() - before, "Read word list");
        }

        if words.is_empty() {
            return Err(LexiconError::Empty {
                path: dir.to_path_buf(),
            });
        }

        info!(lists = members.len(), words = words.len(), "Loaded charged-word lexicon");
        Ok(Self { words })
    }

    /// The process-wide lexicon, loaded from `dir` on first call.
    ///
    /// Later calls return the already-loaded instance and ignore `dir`.
    /// A failed load leaves the cell empty so the error surfaces again.
    pub fn global(dir: impl AsRef<Path>) -> Result<Arc<Lexicon>, LexiconError> {
        GLOBAL
            .get_or_try_init(|| Lexicon::load(dir).map(Arc::new))
            .cloned()
    }

    /// True if the normalized `word` is charged.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn clean_line(line: &str) -> Option<String> {
    let word = line.trim_start_matches('\u{feff}').trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase().replace('ё', "е"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_list(dir: &Path, name: &str, body: &[u8]) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(body).unwrap();
    }

    #[test]
    fn test_load_merges_and_dedupes_lists() {
        let tmp = tempfile::tempdir().unwrap();
        write_list(tmp.path(), "negative.txt", "ужасный\nкатастрофа\n\n".as_bytes());
        write_list(tmp.path(), "positive.txt", "Катастрофа\r\nпобеда\n".as_bytes());
        write_list(tmp.path(), "README.md", "not a word list\n".as_bytes());

        let lexicon = Lexicon::load(tmp.path()).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.contains("катастрофа"));
        assert!(lexicon.contains("победа"));
        assert!(!lexicon.contains("not a word list"));
    }

    #[test]
    fn test_load_strips_bom() {
        let tmp = tempfile::tempdir().unwrap();
        write_list(tmp.path(), "list.txt", "\u{feff}скандал\n".as_bytes());
        let lexicon = Lexicon::load(tmp.path()).unwrap();
        assert!(lexicon.contains("скандал"));
    }

    #[test]
    fn test_empty_dictionary_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_list(tmp.path(), "blank.txt", b"\n  \n");
        let err = Lexicon::load(tmp.path()).unwrap_err();
        assert!(matches!(err, LexiconError::Empty { .. }));
    }

    #[test]
    fn test_missing_dictionary_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Lexicon::load(tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }

    #[test]
    fn test_file_source_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_list(tmp.path(), "charged_dict.zip", b"PK");
        let err = Lexicon::load(tmp.path().join("charged_dict.zip")).unwrap_err();
        assert!(matches!(err, LexiconError::NotADirectory { .. }));
    }

    #[test]
    fn test_from_words_rejects_empty() {
        assert!(Lexicon::from_words(Vec::<String>::new()).is_err());
        let lexicon = Lexicon::from_words(["Шок", "шок", " паника "]).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.contains("паника"));
    }

    #[test]
    fn test_yo_folded_like_normalizer() {
        let lexicon = Lexicon::from_words(["Чёрный"]).unwrap();
        assert!(lexicon.contains("черный"));
    }

    #[test]
    fn test_global_initializes_once() {
        let tmp = tempfile::tempdir().unwrap();
        write_list(tmp.path(), "list.txt", "сенсация\n".as_bytes());
        let first = Lexicon::global(tmp.path()).unwrap();
        let second = Lexicon::global("/definitely/not/here").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
