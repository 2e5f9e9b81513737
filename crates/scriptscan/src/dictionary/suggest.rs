//! Single-edit correction candidates.

/// Upper bound on suggestions returned for one word.
pub const MAX_SUGGESTIONS: usize = 8;

/// Generate corrections for `word` that `is_word` accepts.
///
/// Candidates are tried in a fixed order (case variants, transpositions,
/// substitutions, deletions, insertions) over `alphabet`, deduplicated, and
/// capped at [`MAX_SUGGESTIONS`]. The output is deterministic for a given
/// dictionary.
pub fn single_edit_suggestions<F>(word: &str, alphabet: &[char], is_word: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<String> = Vec::new();
    let mut offer = |candidate: String| {
        if found.len() < MAX_SUGGESTIONS && candidate != word && !found.contains(&candidate) && is_word(&candidate) {
            found.push(candidate);
        }
    };

    let lower = word.to_lowercase();
    offer(lower.clone());
    offer(capitalize(&lower));

    for i in 0..chars.len().saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        offer(swapped.into_iter().collect());
    }

    for i in 0..chars.len() {
        for &c in alphabet {
            if c == chars[i] {
                continue;
            }
            let mut replaced = chars.clone();
            replaced[i] = c;
            offer(replaced.into_iter().collect());
        }
    }

    if chars.len() > 1 {
        for i in 0..chars.len() {
            let mut removed = chars.clone();
            removed.remove(i);
            offer(removed.into_iter().collect());
        }
    }

    for i in 0..=chars.len() {
        for &c in alphabet {
            let mut inserted = chars.clone();
            inserted.insert(i, c);
            offer(inserted.into_iter().collect());
        }
    }

    found
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Vec<char> {
        ('a'..='z').collect()
    }

    #[test]
    fn test_finds_single_edits() {
        let words = ["hello", "help", "world"];
        let suggestions = single_edit_suggestions("helo", &alphabet(), |w| words.contains(&w));
        assert!(suggestions.contains(&"hello".to_string()));
        assert!(suggestions.contains(&"help".to_string()));
        assert!(!suggestions.contains(&"world".to_string()));
    }

    #[test]
    fn test_transposition_comes_first() {
        let words = ["form", "from"];
        let suggestions = single_edit_suggestions("fomr", &alphabet(), |w| words.contains(&w));
        assert_eq!(suggestions.first().map(String::as_str), Some("form"));
    }

    #[test]
    fn test_case_variant() {
        let words = ["paris"];
        let suggestions = single_edit_suggestions("PARIS", &alphabet(), |w| words.contains(&w));
        assert_eq!(suggestions, vec!["paris".to_string()]);
    }

    #[test]
    fn test_capped() {
        let suggestions = single_edit_suggestions("ab", &alphabet(), |_| true);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_empty_word() {
        assert!(single_edit_suggestions("", &alphabet(), |_| true).is_empty());
    }
}
