/// Question scaffolding that carries no search value.
const STOP_WORDS: [&str; 39] = [
    "what", "is", "are", "the", "a", "an", "how", "do", "does", "can", "could", "should", "would",
    "will", "be", "been", "being", "have", "has", "had", "of", "for", "to", "in", "on", "at", "by",
    "with", "from", "about", "i", "you", "we", "they", "it", "this", "that", "these", "those",
];

/// Tokenizes a sub-query into search keywords: lowercase, strip anything that
/// is not alphanumeric or underscore, drop stop words and tokens of length
/// two or less, deduplicate preserving first-seen order.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.len() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|seen| seen == word) {
            keywords.push(word.to_string());
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::extract_keywords;

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let keywords = extract_keywords("What is the treatment for flu?");
        assert_eq!(keywords, vec!["treatment", "flu"]);
    }

    #[test]
    fn punctuation_is_stripped_before_tokenizing() {
        let keywords = extract_keywords("migraine-headaches, causes?");
        assert_eq!(keywords, vec!["migraine", "headaches", "causes"]);
    }

    #[test]
    fn duplicates_keep_their_first_position() {
        let keywords = extract_keywords("diabetes symptoms diabetes insulin symptoms");
        assert_eq!(keywords, vec!["diabetes", "symptoms", "insulin"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let once = extract_keywords("What causes chest pain during exercise?");
        let joined = once.join(" ");
        let twice = extract_keywords(&joined);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_query_yields_no_keywords() {
        assert!(extract_keywords("what is a ??").is_empty());
    }
}
