use crate::index::{PartitionIndex, PartitionKey, WordId};
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;
#[cfg(test)]
use std::time::Duration;

/// How many search states between deadline checks.
pub const INTERRUPT_FREQUENCY: usize = 64;

/************************
 *     Assignment       *
 ************************/

/// The words that may still go in each row of the square. Rows before the one currently being
/// decided hold exactly one word.
///
/// Rows start out borrowed from the index's buckets, and are only copied once they're narrowed.
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    /// row -> candidate words, in pool order
    rows: Vec<Cow<'a, [WordId]>>,
}

impl<'a> Assignment<'a> {
    /// Fix `first` as the top row, and find the candidates for each other row from the first
    /// column. Returns `None` if some row has no candidates.
    pub fn seed(index: &'a PartitionIndex, first: WordId) -> Option<Assignment<'a>> {
        let mut rows = Vec::with_capacity(index.num_parts());
        rows.push(Cow::Owned(vec![first]));
        for row in 1..index.num_parts() {
            // cell[row][0] == cell[0][row]
            let key = PartitionKey {
                part: index.part(first, row),
                pos: 0,
            };
            rows.push(Cow::Borrowed(index.bucket(key)?));
        }
        Some(Assignment { rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn candidates(&self, row: usize) -> &[WordId] {
        &self.rows[row]
    }

    /// Fix `word` in row `word_idx`, and narrow every later row down to the words that agree
    /// with it. Returns `None` if that leaves some row empty. `self` is left unchanged.
    pub fn narrow(
        &self,
        index: &'a PartitionIndex,
        word_idx: usize,
        word: WordId,
    ) -> Option<Assignment<'a>> {
        let mut narrowed = self.clone();
        narrowed.rows[word_idx] = Cow::Owned(vec![word]);
        for row in word_idx + 1..self.rows.len() {
            // cell[row][word_idx] == cell[word_idx][row]
            let key = PartitionKey {
                part: index.part(word, row),
                pos: word_idx,
            };
            let remaining = intersect(&narrowed.rows[row], index.bucket(key)?);
            if remaining.is_empty() {
                return None;
            }
            narrowed.rows[row] = Cow::Owned(remaining);
        }
        Some(narrowed)
    }

    /// Every way to complete this assignment by picking a word for the last row. All other rows
    /// must already be fixed.
    fn completions(&self) -> impl Iterator<Item = Vec<WordId>> + '_ {
        self.rows
            .split_last()
            .into_iter()
            .flat_map(|(last, fixed)| {
                last.iter().map(move |word| {
                    let mut solution = fixed.iter().map(|row| row[0]).collect::<Vec<_>>();
                    solution.push(*word);
                    solution
                })
            })
    }
}

/// The words present in both lists. Both must be in ascending order; so is the result.
fn intersect(a: &[WordId], b: &[WordId]) -> Vec<WordId> {
    let mut result = Vec::new();
    let mut b_iter = b.iter().peekable();
    for x in a {
        while b_iter.next_if(|y| *y < x).is_some() {}
        match b_iter.peek() {
            None => break,
            Some(y) if *y == x => result.push(*x),
            Some(_) => (),
        }
    }
    result
}

/************************
 *     Watchdog         *
 ************************/

/// The search was stopped before it was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Search interrupted")
    }
}

impl std::error::Error for Interrupted {}

/// Counts search states, and stops the search once it passes a state limit or a deadline.
/// Shared between threads when first words are searched in parallel.
#[derive(Debug, Default)]
pub struct Watchdog {
    deadline: Option<Instant>,
    max_states: Option<usize>,
    states: AtomicUsize,
    dead_ends: AtomicUsize,
    tripped: AtomicBool,
}

impl Watchdog {
    pub fn new(deadline: Option<Instant>, max_states: Option<usize>) -> Watchdog {
        Watchdog {
            deadline,
            max_states,
            ..Watchdog::default()
        }
    }

    /// Call once per search state.
    fn tick(&self) -> Result<(), Interrupted> {
        if self.tripped.load(Ordering::Relaxed) {
            return Err(Interrupted);
        }
        let states = self.states.fetch_add(1, Ordering::Relaxed);
        let over_limit = self.max_states.is_some_and(|max| states >= max);
        let past_deadline = states % INTERRUPT_FREQUENCY == 0
            && self.deadline.is_some_and(|deadline| Instant::now() > deadline);
        if over_limit || past_deadline {
            self.tripped.store(true, Ordering::Relaxed);
            return Err(Interrupted);
        }
        Ok(())
    }

    fn dead_end(&self) {
        self.dead_ends.fetch_add(1, Ordering::Relaxed);
    }

    pub fn tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    /// The number of search states visited so far.
    pub fn states(&self) -> usize {
        self.states.load(Ordering::Relaxed)
    }

    /// The number of candidate words rejected because they emptied some later row.
    pub fn dead_ends(&self) -> usize {
        self.dead_ends.load(Ordering::Relaxed)
    }
}

/************************
 *     Search           *
 ************************/

/// Decide rows `word_idx..` of `assignment`, pushing each complete square onto `solutions` in
/// the order they're found.
pub fn assign<'a>(
    index: &'a PartitionIndex,
    assignment: &Assignment<'a>,
    word_idx: usize,
    watchdog: &Watchdog,
    solutions: &mut Vec<Vec<WordId>>,
) -> Result<(), Interrupted> {
    watchdog.tick()?;

    if word_idx + 1 >= assignment.num_rows() {
        // Every word left in the last row survived every narrowing step, so it agrees with all
        // the fixed rows.
        solutions.extend(assignment.completions());
        return Ok(());
    }

    for word in assignment.candidates(word_idx) {
        match assignment.narrow(index, word_idx, *word) {
            Some(narrowed) => assign(index, &narrowed, word_idx + 1, watchdog, solutions)?,
            None => watchdog.dead_end(),
        }
    }
    Ok(())
}

/// Push every square with `first` as its top row onto `solutions`.
pub fn solve_from(
    index: &PartitionIndex,
    first: WordId,
    watchdog: &Watchdog,
    solutions: &mut Vec<Vec<WordId>>,
) -> Result<(), Interrupted> {
    match Assignment::seed(index, first) {
        Some(assignment) => assign(index, &assignment, 1, watchdog, solutions),
        None => Ok(()),
    }
}

#[cfg(test)]
fn test_index(words: &[&str], part_len: usize) -> PartitionIndex {
    let num_parts = words[0].chars().count() / part_len;
    PartitionIndex::build(words.iter().map(|w| w.to_string()), part_len, num_parts)
}

#[test]
fn test_intersect() {
    assert_eq!(intersect(&[1, 3, 5, 7], &[2, 3, 4, 7, 9]), vec![3, 7]);
    assert_eq!(intersect(&[1, 2], &[3, 4]), Vec::<WordId>::new());
    assert_eq!(intersect(&[], &[3, 4]), Vec::<WordId>::new());
    assert_eq!(intersect(&[4, 5, 6], &[4, 5, 6]), vec![4, 5, 6]);
}

#[test]
fn test_seed() {
    let index = test_index(
        &["COMPLAINT", "PLACEMENT", "INTENTION", "PLAINTIFF", "COMPUTING"],
        3,
    );

    let seeded = Assignment::seed(&index, 0).unwrap();
    assert_eq!(seeded.candidates(0), &[0]);
    assert_eq!(seeded.candidates(1), &[1, 3]);
    assert_eq!(seeded.candidates(2), &[2]);

    // Nothing starts with "CEM"
    assert!(Assignment::seed(&index, 1).is_none());
    // Nothing starts with "PUT"
    assert!(Assignment::seed(&index, 4).is_none());
}

#[test]
fn test_narrow_only_shrinks() {
    let index = test_index(
        &[
            "abcd", "bdaa", "bdcc", "cabd", "cacc", "ccbd", "dbca", "bdcd", "cccc",
        ],
        1,
    );

    fn check<'a>(index: &'a PartitionIndex, parent: &Assignment<'a>, word_idx: usize) {
        for word in parent.candidates(word_idx) {
            if let Some(child) = parent.narrow(index, word_idx, *word) {
                assert_eq!(child.candidates(word_idx), &[*word]);
                for row in 0..parent.num_rows() {
                    for candidate in child.candidates(row) {
                        assert!(parent.candidates(row).contains(candidate));
                    }
                }
                for row in 0..word_idx {
                    assert_eq!(child.candidates(row), parent.candidates(row));
                }
                if word_idx + 1 < parent.num_rows() {
                    check(index, &child, word_idx + 1);
                }
            }
        }
    }

    for first in 0..index.words().len() {
        if let Some(seeded) = Assignment::seed(&index, first) {
            let before = seeded.clone();
            check(&index, &seeded, 1);
            for row in 0..seeded.num_rows() {
                assert_eq!(seeded.candidates(row), before.candidates(row));
            }
        }
    }
}

#[cfg(test)]
fn solutions_from(
    index: &PartitionIndex,
    first: WordId,
    watchdog: &Watchdog,
) -> Result<Vec<Vec<WordId>>, Interrupted> {
    let mut solutions = Vec::new();
    solve_from(index, first, watchdog, &mut solutions)?;
    Ok(solutions)
}

#[test]
fn test_solve_from() {
    let index = test_index(&["COMPLAINT", "PLACEMENT", "INTENTION"], 3);
    let watchdog = Watchdog::default();
    assert_eq!(solutions_from(&index, 0, &watchdog), Ok(vec![vec![0, 1, 2]]));
    assert_eq!(solutions_from(&index, 1, &watchdog), Ok(vec![]));
    assert_eq!(solutions_from(&index, 2, &watchdog), Ok(vec![]));
    assert_eq!(watchdog.states(), 2);
    assert_eq!(watchdog.dead_ends(), 0);
}

#[test]
fn test_last_row_completions() {
    // Once "abc" and "bde" are fixed, both "cef" and "ceg" fit the last row.
    let index = test_index(&["abc", "bde", "cef", "ceg"], 1);
    let watchdog = Watchdog::default();
    let solutions = solutions_from(&index, 0, &watchdog).unwrap();
    assert_eq!(solutions, vec![vec![0, 1, 2], vec![0, 1, 3]]);
}

#[test]
fn test_watchdog_state_limit() {
    let index = test_index(&["abc", "bde", "cef", "ceg"], 1);
    let watchdog = Watchdog::new(None, Some(1));
    assert_eq!(solutions_from(&index, 0, &watchdog), Err(Interrupted));
    assert!(watchdog.tripped());
    // Stays tripped
    assert_eq!(solutions_from(&index, 0, &watchdog), Err(Interrupted));
}

#[test]
fn test_watchdog_deadline() {
    let index = test_index(&["abc", "bde", "cef", "ceg"], 1);

    let watchdog = Watchdog::new(Some(Instant::now() + Duration::from_secs(3600)), None);
    assert_eq!(
        solutions_from(&index, 0, &watchdog),
        Ok(vec![vec![0, 1, 2], vec![0, 1, 3]])
    );
    assert!(!watchdog.tripped());

    // The deadline is checked on the very first state
    let watchdog = Watchdog::new(Some(Instant::now() - Duration::from_secs(1)), None);
    assert_eq!(solutions_from(&index, 0, &watchdog), Err(Interrupted));
    assert!(watchdog.tripped());
}
