use crate::models::SplitterConfig;

/// Splits page text into overlapping chunks. Paragraphs are merged until the
/// configured chunk size is reached; anything still larger than one chunk is
/// windowed with the configured character overlap.
pub fn split_text(text: &str, config: SplitterConfig) -> Vec<String> {
    let paragraphs = text
        .split("\n\n")
        .map(|paragraph| paragraph.trim().replace('\t', " "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>();

    let mut merged = Vec::new();
    let mut current = String::new();

    for paragraph in paragraphs {
        if current.is_empty() {
            current.push_str(&paragraph);
            continue;
        }

        if current.len() + paragraph.len() + 2 <= config.chunk_size {
            current.push_str("\n\n");
            current.push_str(&paragraph);
        } else {
            merged.push(current.clone());
            current.clear();
            current.push_str(&paragraph);
        }
    }

    if !current.is_empty() {
        merged.push(current);
    }

    if merged.is_empty() && !text.trim().is_empty() {
        merged.push(text.trim().to_string());
    }

    let stride = config
        .chunk_size
        .saturating_sub(config.chunk_overlap)
        .max(1);

    let mut with_overlap = Vec::new();
    for chunk in merged {
        if chunk.len() <= config.chunk_size {
            with_overlap.push(chunk);
            continue;
        }

        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + config.chunk_size).min(chars.len());
            with_overlap.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += stride;
        }
    }

    with_overlap
}
