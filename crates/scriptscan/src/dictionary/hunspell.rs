//! Hunspell dictionaries loaded with `zspell`.
//!
//! Affix and dictionary files are read as bytes and decoded using the `SET`
//! directive of the affix file, since many distributed dictionaries are not
//! UTF-8. The `TRY` directive provides the alphabet used for suggestions.

use super::suggest::single_edit_suggestions;
use super::{Dictionary, DictionarySet};
use crate::language::profiles::LanguageProfile;
use crate::{Result, ScriptscanError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct HunspellDictionary {
    inner: zspell::Dictionary,
    alphabet: Vec<char>,
}

impl std::fmt::Debug for HunspellDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HunspellDictionary")
            .field("alphabet_len", &self.alphabet.len())
            .finish()
    }
}

impl HunspellDictionary {
    /// Build from the text of an affix file and a dictionary file.
    pub fn from_strs(aff: &str, dic: &str) -> Result<Self> {
        let inner = zspell::builder()
            .config_str(aff)
            .dict_str(dic)
            .build()
            .map_err(|e| ScriptscanError::validation(format!("Invalid hunspell dictionary: {}", e)))?;

        Ok(Self {
            inner,
            alphabet: alphabet_from(aff, dic),
        })
    }

    /// Load `<stem>.aff` and `<stem>.dic` from `dir`.
    pub fn load(dir: &Path, stem: &str) -> Result<Self> {
        let aff_path = dir.join(format!("{}.aff", stem));
        let dic_path = dir.join(format!("{}.dic", stem));

        let aff_bytes = std::fs::read(&aff_path)?;
        let dic_bytes = std::fs::read(&dic_path)?;

        let encoding = declared_encoding(&aff_bytes);
        let aff = decode(&aff_bytes, encoding);
        let dic = decode(&dic_bytes, encoding);

        Self::from_strs(&aff, &dic)
    }
}

impl Dictionary for HunspellDictionary {
    fn spell(&self, word: &str) -> bool {
        if self.inner.check_word(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.inner.check_word(&lower)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        single_edit_suggestions(word, &self.alphabet, |candidate| self.inner.check_word(candidate))
    }
}

/// Find the first directory containing both files for `stem`.
pub fn locate(dirs: &[PathBuf], stem: &str) -> Option<PathBuf> {
    dirs.iter()
        .find(|dir| {
            dir.join(format!("{}.aff", stem)).is_file() && dir.join(format!("{}.dic", stem)).is_file()
        })
        .cloned()
}

impl DictionarySet {
    /// Load hunspell dictionaries for `profiles` from the first directory that
    /// has them.
    ///
    /// Languages whose dictionary is missing or unparsable are skipped with a
    /// warning; the returned set may be empty.
    pub fn load_hunspell<'a>(dirs: &[PathBuf], profiles: impl IntoIterator<Item = &'a LanguageProfile>) -> Self {
        let mut set = DictionarySet::new();

        for profile in profiles {
            let Some(dir) = locate(dirs, profile.dictionary) else {
                tracing::warn!(
                    language = profile.code,
                    dictionary = profile.dictionary,
                    "Could not find dictionary; confidence for this language will be neutral"
                );
                continue;
            };

            match HunspellDictionary::load(&dir, profile.dictionary) {
                Ok(dict) => {
                    tracing::debug!(language = profile.code, dir = %dir.display(), "Loaded dictionary");
                    set.insert(profile.code, Arc::new(dict));
                }
                Err(e) => {
                    tracing::warn!(language = profile.code, error = %e, "Could not load dictionary");
                }
            }
        }

        set
    }
}

fn declared_encoding(aff: &[u8]) -> &'static encoding_rs::Encoding {
    aff.split(|b| *b == b'\n')
        .filter_map(|line| std::str::from_utf8(line).ok())
        .find_map(|line| line.trim().strip_prefix("SET "))
        .and_then(|label| encoding_rs::Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(encoding_rs::UTF_8)
}

fn decode(bytes: &[u8], encoding: &'static encoding_rs::Encoding) -> String {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "Dictionary contained undecodable bytes");
    }
    text.into_owned()
}

fn alphabet_from(aff: &str, dic: &str) -> Vec<char> {
    let mut alphabet: Vec<char> = match aff.lines().find_map(|line| line.trim().strip_prefix("TRY ")) {
        Some(try_chars) => try_chars.trim().chars().collect(),
        None => dic
            .lines()
            .skip(1)
            .filter_map(|line| line.split('/').next())
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace())
            .collect(),
    };
    alphabet.sort_unstable();
    alphabet.dedup();
    alphabet
}
