//! Script-agnostic word tokenizer shared by scoring, spellcheck and aggregation.

/// Split text into word tokens.
///
/// Digits (any Unicode numeric, so Arabic-Indic digits too) and underscores act
/// as separators, as does whitespace. Empty tokens are discarded. The same rule
/// applies to every script; punctuation stays attached to its word.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c.is_numeric() || c == '_')
        .filter(|token| !token.is_empty())
        .collect()
}

/// Number of tokens [`tokenize`] would produce, without allocating.
pub fn token_count(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || c.is_numeric() || c == '_')
        .filter(|token| !token.is_empty())
        .count()
}

/// Split text into paragraphs: newline-delimited, non-blank segments.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_digits_and_underscores() {
        assert_eq!(tokenize("abc123 def_45"), vec!["abc", "def"]);
    }

    #[test]
    fn test_digits_inside_word_split_it() {
        assert_eq!(tokenize("abc123def"), vec!["abc", "def"]);
    }

    #[test]
    fn test_arabic_indic_digits_are_stripped() {
        assert_eq!(tokenize("صفحة ١٢٣ نص"), vec!["صفحة", "نص"]);
    }

    #[test]
    fn test_rtl_text_splits_on_whitespace() {
        assert_eq!(tokenize("هذا نص عربي"), vec!["هذا", "نص", "عربي"]);
        assert_eq!(tokenize("זהו טקסט"), vec!["זהו", "טקסט"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("123 _ 456").is_empty());
        assert_eq!(token_count("123 _ 456"), 0);
    }

    #[test]
    fn test_token_count_matches_tokenize() {
        let text = "The quick_brown fox 42 jumps.\nسلام دنیا";
        assert_eq!(token_count(text), tokenize(text).len());
    }

    #[test]
    fn test_paragraphs_skip_blank_lines() {
        let text = "First line\n\n   \nSecond line\r\nThird";
        let paras: Vec<&str> = paragraphs(text).collect();
        assert_eq!(paras, vec!["First line", "Second line", "Third"]);
    }
}
