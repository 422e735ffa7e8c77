//! Tokenization and emoji detection shared by the content, topic and
//! sentiment stages.

/// Unicode ranges counted as emoji.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1FA70, 0x1FAFF), // symbols & pictographs extended-A
    (0x1F1E6, 0x1F1FF), // regional indicators
    (0x2600, 0x26FF),   // miscellaneous symbols
    (0x2700, 0x27BF),   // dingbats
];

/// Words ignored when ranking monthly terms.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "just", "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "ok", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "same", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "so", "some", "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll", "they're",
    "they've", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "wasn't", "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when",
    "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "will",
    "with", "won't", "would", "wouldn't", "yeah", "yes", "you", "you'd", "you'll", "you're",
    "you've", "your", "yours", "yourself", "yourselves",
];

/// Splits text into lowercase word tokens.
///
/// Letters, digits and inner apostrophes form words; everything else
/// separates them.
///
/// # Example
///
/// ```rust
/// use chatpulse::analysis::text::tokenize;
///
/// assert_eq!(tokenize("Don't STOP, me now!"), vec!["don't", "stop", "me", "now"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|token| token.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|token| !token.is_empty())
        .map(|token| token.replace('\u{2019}', "'"))
        .collect()
}

/// Returns `true` if `c` lies in one of the emoji blocks.
pub fn is_emoji(c: char) -> bool {
    let code = u32::from(c);
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// Iterates over the emoji characters of `text`.
pub fn emojis(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| is_emoji(c))
}

/// Returns `true` if `token` is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Tokens worth ranking as topics: no stop words, no single characters, no
/// pure numbers.
pub fn topic_terms(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > 1)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !is_stop_word(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_sorted() {
        assert!(STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tokenize_case_folds() {
        assert_eq!(tokenize("Hello HELLO hello"), vec!["hello"; 3]);
    }

    #[test]
    fn test_tokenize_punctuation_and_unicode() {
        assert_eq!(tokenize("Привет, мир!"), vec!["привет", "мир"]);
        assert_eq!(tokenize("it’s 'quoted'"), vec!["it's", "quoted"]);
        assert!(tokenize("  ... !!! ").is_empty());
    }

    #[test]
    fn test_is_emoji() {
        assert!(is_emoji('😀'));
        assert!(is_emoji('🔥'));
        assert!(is_emoji('❤'));
        assert!(is_emoji('🤣'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('1'));
        assert!(!is_emoji('é'));
    }

    #[test]
    fn test_emojis_iterator() {
        let found: String = emojis("great 🎉 job 👍!").collect();
        assert_eq!(found, "🎉👍");
    }

    #[test]
    fn test_topic_terms_filtering() {
        assert_eq!(
            topic_terms("I think the pizza at 2024 was a 10 out of 10"),
            vec!["think", "pizza"]
        );
    }
}
