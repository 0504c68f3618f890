use crate::dataset::Record;
use crate::progress::progress_bar;

/// Whitespace tokens of `text`. A length proxy only: no case or punctuation handling.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Token count of every conversation turn, flattened across records in order.
pub fn calculate_tokenized_lengths(records: &[&Record], show_progress: bool) -> Vec<usize> {
    let pb = progress_bar(records.len(), "Tokenizing conversations", show_progress);
    let mut lengths = Vec::new();
    for record in records {
        for turn in record.turns() {
            lengths.push(tokenize(&turn.value).len());
        }
        pb.inc(1);
    }
    pb.finish();
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_on_runs_of_whitespace() {
        assert_eq!(tokenize("a b  c"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("  lead\ttab\nnewline "), vec!["lead", "tab", "newline"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn no_normalization() {
        assert_eq!(tokenize("Hello, World!"), vec!["Hello,", "World!"]);
    }

    #[test]
    fn lengths_are_flattened_per_turn() {
        let data: Vec<Record> = serde_json::from_value(json!([
            {"image": "a.png", "conversations": [{"value": "hi there"}]},
            {"image": "b.png", "conversations": [{"value": "one two three"}]},
        ]))
        .expect("records");
        let refs: Vec<&Record> = data.iter().collect();
        assert_eq!(calculate_tokenized_lengths(&refs, false), vec![2, 3]);
    }

    #[test]
    fn multi_turn_and_missing_conversations() {
        let data: Vec<Record> = serde_json::from_value(json!([
            {"image": "a.png", "conversations": [
                {"from": "human", "value": "<image>\nWhat is this?"},
                {"from": "gpt", "value": ""}
            ]},
            {"image": "b.png"},
        ]))
        .expect("records");
        let refs: Vec<&Record> = data.iter().collect();
        assert_eq!(calculate_tokenized_lengths(&refs, false), vec![4, 0]);
    }
}
