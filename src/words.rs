use std::fs;
use std::path::Path;

/// The words of exactly `word_len` chars in a newline-separated list, in order. Surrounding
/// whitespace on each line is ignored.
pub fn words_of_len(word_list: &str, word_len: usize) -> Vec<String> {
    word_list
        .lines()
        .map(|s| s.trim())
        .filter(|s| s.chars().count() == word_len)
        .map(|s| s.to_owned())
        .collect()
}

/// Like `words_of_len`, reading the list from the file at `path`.
pub fn load_word_list(
    path: impl AsRef<Path>,
    word_len: usize,
) -> Result<Vec<String>, std::io::Error> {
    let word_list = fs::read_to_string(path)?;
    Ok(words_of_len(&word_list, word_len))
}

#[test]
fn test_words_of_len() {
    let list = "complaint\n  placement \r\nint\nintention\t\n\nintentions\ncomplaint\n";
    assert_eq!(
        words_of_len(list, 9),
        vec!["complaint", "placement", "intention", "complaint"]
    );
    assert_eq!(words_of_len(list, 3), vec!["int"]);
    assert!(words_of_len(list, 4).is_empty());
    assert!(words_of_len("", 9).is_empty());
}

#[test]
fn test_load_missing_word_list() {
    assert!(load_word_list("/nonexistent/word/list.txt", 5).is_err());
}
