//! Plain word-list dictionary.
//!
//! For deployments that ship a flat list of words instead of hunspell
//! affix/dictionary pairs. One word per line; blank lines and `#` comments are
//! ignored.

use super::Dictionary;
use super::suggest::single_edit_suggestions;
use crate::Result;
use ahash::AHashSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: AHashSet<String>,
    alphabet: Vec<char>,
}

impl WordListDictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: AHashSet<String> = words.into_iter().map(Into::into).collect();
        let mut alphabet: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        Self { words, alphabet }
    }

    pub fn parse(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&content))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }
}

impl Dictionary for WordListDictionary {
    fn spell(&self, word: &str) -> bool {
        self.contains(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        single_edit_suggestions(word, &self.alphabet, |candidate| self.words.contains(candidate))
    }
}
