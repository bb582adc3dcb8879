use std::collections::HashMap;

/// A word's position in the pool.
pub type WordId = usize;
/// An interned partition text.
pub type PartId = u32;

/// The `idx`th partition of `word`, where each partition is `part_len` chars long. For instance
/// `partition("PLACEMENT", 3, 2) == "ENT"`.
pub fn partition(word: &str, part_len: usize, idx: usize) -> &str {
    let mut bounds = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(Some(word.len()))
        .skip(part_len * idx)
        .step_by(part_len);
    let start = bounds.next().unwrap_or(word.len());
    let end = bounds.next().unwrap_or(word.len());
    &word[start..end]
}

/// A partition text, at a position within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    pub part: PartId,
    pub pos: usize,
}

/// Maps each `(partition, position)` to the words that have that partition at that position.
///
/// Buckets list words in pool order. That order decides the order solutions are found in, so
/// it must not be disturbed.
#[derive(Debug, Clone)]
pub struct PartitionIndex {
    words: Vec<String>,
    part_len: usize,
    num_parts: usize,
    /// PartId -> text
    texts: Vec<String>,
    /// text -> PartId
    part_ids: HashMap<String, PartId>,
    /// WordId * num_parts + pos -> PartId
    word_parts: Vec<PartId>,
    buckets: HashMap<PartitionKey, Vec<WordId>>,
}

impl PartitionIndex {
    /// Index every partition of every word in `words`.
    ///
    /// Panics if `part_len` or `num_parts` is zero, or if a word isn't `part_len * num_parts`
    /// chars long.
    pub fn build(
        words: impl IntoIterator<Item = String>,
        part_len: usize,
        num_parts: usize,
    ) -> PartitionIndex {
        assert!(part_len > 0, "Partition length must be positive");
        assert!(num_parts > 0, "Words must have at least one partition");

        let mut index = PartitionIndex {
            words: Vec::new(),
            part_len,
            num_parts,
            texts: Vec::new(),
            part_ids: HashMap::new(),
            word_parts: Vec::new(),
            buckets: HashMap::new(),
        };
        for word in words {
            index.insert(word);
        }
        index
    }

    fn insert(&mut self, word: String) {
        assert_eq!(
            word.chars().count(),
            self.part_len * self.num_parts,
            "Word '{}' has the wrong length",
            word
        );

        let id = self.words.len();
        for pos in 0..self.num_parts {
            let text = partition(&word, self.part_len, pos);
            let part = match self.part_ids.get(text) {
                Some(part) => *part,
                None => {
                    let part = self.texts.len() as PartId;
                    self.texts.push(text.to_owned());
                    self.part_ids.insert(text.to_owned(), part);
                    part
                }
            };
            self.word_parts.push(part);
            self.buckets
                .entry(PartitionKey { part, pos })
                .or_default()
                .push(id);
        }
        self.words.push(word);
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    pub fn part_len(&self) -> usize {
        self.part_len
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    /// The interned partition of word `id` at `pos`.
    pub fn part(&self, id: WordId, pos: usize) -> PartId {
        self.word_parts[id * self.num_parts + pos]
    }

    pub fn part_text(&self, part: PartId) -> &str {
        &self.texts[part as usize]
    }

    /// The words with this key, or `None` if there are none.
    pub fn bucket(&self, key: PartitionKey) -> Option<&[WordId]> {
        self.buckets.get(&key).map(|words| words.as_slice())
    }

    /// Like `bucket`, but looked up by partition text. Unknown texts have no words.
    pub fn lookup(&self, text: &str, pos: usize) -> &[WordId] {
        self.part_ids
            .get(text)
            .and_then(|part| self.bucket(PartitionKey { part: *part, pos }))
            .unwrap_or(&[])
    }

    /// The number of distinct keys.
    pub fn num_keys(&self) -> usize {
        self.buckets.len()
    }

    pub fn largest_bucket(&self) -> usize {
        self.buckets.values().map(|words| words.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_partition() {
    assert_eq!(partition("PLACEMENT", 3, 0), "PLA");
    assert_eq!(partition("PLACEMENT", 3, 1), "CEM");
    assert_eq!(partition("PLACEMENT", 3, 2), "ENT");
    assert_eq!(partition("abcdef", 1, 4), "e");
    assert_eq!(partition("abcdef", 6, 0), "abcdef");
    // chars, not bytes
    assert_eq!(partition("żółwiek", 1, 2), "ł");
    assert_eq!(partition("ñandúes", 1, 4), "ú");
}

#[test]
fn test_build_index() {
    let index = PartitionIndex::build(
        owned(&["COMPLAINT", "PLACEMENT", "INTENTION", "PLAINTIFF"]),
        3,
        3,
    );

    assert_eq!(index.lookup("PLA", 0), &[1, 3]);
    assert_eq!(index.lookup("PLA", 1), &[0]);
    assert_eq!(index.lookup("INT", 2), &[0]);
    assert_eq!(index.lookup("ENT", 1), &[2]);
    assert_eq!(index.lookup("ENT", 2), &[1]);
    assert_eq!(index.num_keys(), 11);
    assert_eq!(index.largest_bucket(), 2);

    // Absent keys are not errors
    assert_eq!(index.lookup("XYZ", 0), &[] as &[WordId]);
    assert_eq!(index.lookup("PLA", 2), &[] as &[WordId]);

    let pla = index.part(1, 0);
    assert_eq!(index.part_text(pla), "PLA");
    assert_eq!(index.part(3, 0), pla);
    assert_eq!(index.bucket(PartitionKey { part: pla, pos: 2 }), None);
}

#[test]
fn test_index_keeps_repeats() {
    let index = PartitionIndex::build(owned(&["abab", "abab", "cdcd"]), 2, 2);
    assert_eq!(index.lookup("ab", 0), &[0, 1]);
    assert_eq!(index.lookup("ab", 1), &[0, 1]);
    assert_eq!(index.words().len(), 3);
}

#[test]
#[should_panic]
fn test_index_wrong_length() {
    PartitionIndex::build(owned(&["abcd", "abc"]), 2, 2);
}
