//! Finds symmetric word squares: `N` words, each cut into `N` equal partitions, that read the
//! same down the columns as they do across the rows. For example with three 9-letter words cut
//! into 3-letter partitions:
//!
//! ```text
//! COM PLA INT
//! PLA CEM ENT
//! INT ENT ION
//! ```
//!
//! wordgrid can be used either as an application run on a word list, or as a library.
//!
//! ## Searching a word list
//!
//! First describe the squares you want with `Params`: how long the words are, and how long
//! each partition is. The partition length has to divide the word length evenly, and the
//! quotient is the number of words in each square.
//!
//! ```
//! use wordgrid::Params;
//!
//! let params = Params::new(9, 3).unwrap();
//! assert_eq!(params.num_parts(), 3);
//! assert!(Params::new(9, 2).is_err());
//! ```
//!
//! Then give a `WordGrid` the words to choose from. They must all be `word_len` chars long;
//! `words_of_len` and `load_word_list` pick those out of a word list. Call `solve()` to find
//! every square:
//!
//! ```
//! use wordgrid::{words_of_len, Params, WordGrid};
//!
//! let word_list = "complaint\nintention\nplacement\nplaintiff\ncomputing\n";
//! let params = Params::new(9, 3).unwrap();
//! let words = words_of_len(word_list, params.word_len());
//!
//! let mut solver = WordGrid::new(params, words);
//! solver.config().parallel = true;
//! let report = solver.solve();
//!
//! assert!(report.complete);
//! assert_eq!(report.grids.len(), 1);
//! assert_eq!(
//!     report.grids.0[0].words(),
//!     &["complaint", "placement", "intention"]
//! );
//! println!("{}", report.grids);
//! ```
//!
//! Squares are found in a fixed order: by the position of their first word in the list, then by
//! the positions of the words after it. Searching in parallel doesn't change that order.
//!
//! Large word lists can take a long time. Set `Config::time_limit` or `Config::max_states` to
//! stop early; the report then holds whatever was found before stopping, with `complete` set to
//! `false`.

mod grid;
mod index;
mod params;
mod search;
mod words;

pub use grid::{Grid, GridSet};
pub use index::{partition, PartId, PartitionIndex, PartitionKey, WordId};
pub use params::{BadParams, Params};
pub use search::{assign, solve_from, Assignment, Interrupted, Watchdog, INTERRUPT_FREQUENCY};
pub use words::{load_word_list, words_of_len};

use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Every symmetric square that can be made from `words`, which must all be
/// `part_len * num_parts` chars long.
pub fn solve(words: &[String], part_len: usize, num_parts: usize) -> Vec<Grid> {
    WordGrid {
        index: PartitionIndex::build(words.iter().cloned(), part_len, num_parts),
        config: Config::default(),
    }
    .solve()
    .grids
    .0
}

/************************
 *     Solver           *
 ************************/

pub struct WordGrid {
    index: PartitionIndex,
    config: Config,
}

/// What a call to `WordGrid::solve()` found.
#[derive(Debug, Clone)]
pub struct Report {
    /// Every square found, in search order.
    pub grids: GridSet,
    /// False if the search was stopped early by a time or state limit.
    pub complete: bool,
    /// The number of search states visited.
    pub states: usize,
    /// The number of candidate words rejected because they left some row with no candidates.
    pub dead_ends: usize,
    pub elapsed: Duration,
}

impl WordGrid {
    /// Construct a solver over `words`. Panics if any word isn't `params.word_len()` chars long.
    pub fn new(params: Params, words: impl IntoIterator<Item = String>) -> WordGrid {
        WordGrid {
            index: PartitionIndex::build(words, params.part_len(), params.num_parts()),
            config: Config::default(),
        }
    }

    pub fn config(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn index(&self) -> &PartitionIndex {
        &self.index
    }

    fn grid(&self, solution: &[WordId]) -> Grid {
        Grid::new(
            solution
                .iter()
                .map(|id| self.index.word(*id).to_owned())
                .collect(),
            self.index.part_len(),
        )
    }

    fn log_first_word(&self, first: WordId, found: &[Vec<WordId>]) {
        if self.config.log_steps && !found.is_empty() {
            eprintln!(
                "First word {:6}/{}: {} -> {} square(s)",
                first + 1,
                self.index.words().len(),
                self.index.word(first),
                found.len()
            );
        }
    }

    /// Find every square. Try each word as the top row, in order.
    pub fn solve(&self) -> Report {
        let start_time = Instant::now();
        let num_words = self.index.words().len();

        if self.config.log_index {
            eprintln!(
                "Index: {} words, {} partitions each, {} keys, largest bucket {}",
                num_words,
                self.index.num_parts(),
                self.index.num_keys(),
                self.index.largest_bucket(),
            );
        }

        let watchdog = Watchdog::new(
            self.config.time_limit.map(|limit| start_time + limit),
            self.config.max_states,
        );
        let search_from = |first: WordId| -> Vec<Vec<WordId>> {
            let mut found = Vec::new();
            // Interrupted: keep what was found before it, but don't log a partial count
            if search::solve_from(&self.index, first, &watchdog, &mut found).is_ok() {
                self.log_first_word(first, &found);
            }
            found
        };

        let solutions = if self.config.parallel {
            (0..num_words)
                .into_par_iter()
                .map(search_from)
                .collect::<Vec<_>>()
        } else {
            let mut solutions = Vec::new();
            for first in 0..num_words {
                solutions.push(search_from(first));
                if watchdog.tripped() {
                    break;
                }
            }
            solutions
        };

        let report = Report {
            grids: GridSet(
                solutions
                    .iter()
                    .flatten()
                    .map(|solution| self.grid(solution))
                    .collect(),
            ),
            complete: !watchdog.tripped(),
            states: watchdog.states(),
            dead_ends: watchdog.dead_ends(),
            elapsed: start_time.elapsed(),
        };

        if self.config.log_elapsed {
            eprintln!(
                "Found {} square(s) in {}ms ({} states, {} dead ends){}",
                report.grids.len(),
                report.elapsed.as_millis(),
                report.states,
                report.dead_ends,
                if report.complete { "" } else { ", stopped early" },
            );
        }
        report
    }
}

/************************
 *     Config           *
 ************************/

// When running `main`, this is loaded from command line args.
// See `Args` in `main.rs`.
/// Configuration options. Set these using `WordGrid.config()`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Log the size of the partition index before solving
    pub log_index: bool,
    /// Log each first word that leads to a square
    pub log_steps: bool,
    /// Log how long the search took
    pub log_elapsed: bool,
    /// Search from different first words on different threads
    pub parallel: bool,
    /// Stop searching after this long
    pub time_limit: Option<Duration>,
    /// Stop searching after visiting this many search states
    pub max_states: Option<usize>,
}

#[cfg(test)]
fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
fn word_lists(grids: &[Grid]) -> Vec<Vec<&str>> {
    grids
        .iter()
        .map(|grid| grid.words().iter().map(|w| w.as_str()).collect())
        .collect()
}

/// Every sequence of `n` words from `words` (by position, in lexicographic order) that forms a
/// symmetric square.
#[cfg(test)]
fn brute_force(words: &[String], part_len: usize, n: usize) -> Vec<Vec<String>> {
    let mut result = Vec::new();
    let mut ids = vec![0; n];
    'outer: loop {
        let grid = Grid::new(ids.iter().map(|i| words[*i].clone()).collect(), part_len);
        if grid.is_symmetric() {
            result.push(grid.into_words());
        }
        for slot in (0..n).rev() {
            ids[slot] += 1;
            if ids[slot] < words.len() {
                continue 'outer;
            }
            ids[slot] = 0;
        }
        return result;
    }
}

#[cfg(test)]
fn binary_words(len: usize) -> Vec<String> {
    (0..1usize << len)
        .map(|bits| {
            (0..len)
                .map(|i| if bits & (1 << i) == 0 { 'a' } else { 'b' })
                .collect::<String>()
        })
        .collect()
}

#[test]
fn test_watsky_square() {
    let words = owned(&["COMPLAINT", "PLACEMENT", "INTENTION"]);
    let grids = solve(&words, 3, 3);
    assert_eq!(
        word_lists(&grids),
        vec![vec!["COMPLAINT", "PLACEMENT", "INTENTION"]]
    );
    assert!(grids[0].is_symmetric());
}

#[test]
fn test_no_shared_partitions() {
    let words = owned(&["abcdef", "ghijkl", "mnopqr", "stuvwx"]);
    assert!(solve(&words, 2, 3).is_empty());
    assert!(solve(&[], 2, 3).is_empty());
}

#[test]
fn test_one_partition_per_word() {
    let words = owned(&["cat", "dog", "cat"]);
    let grids = solve(&words, 3, 1);
    assert_eq!(word_lists(&grids), vec![vec!["cat"], vec!["dog"], vec!["cat"]]);
}

#[test]
fn test_repeated_word() {
    // Each of the three copies can go in either row.
    let words = owned(&["ABAB", "ABAB", "ABAB"]);
    let grids = solve(&words, 2, 2);
    assert_eq!(grids.len(), 9);
    for grid in &grids {
        assert_eq!(grid.words(), &["ABAB", "ABAB"]);
    }

    let grids = solve(&owned(&["aaa", "aaa"]), 1, 3);
    assert_eq!(grids.len(), 8);
}

#[test]
fn test_matches_brute_force() {
    let mut words = binary_words(3);
    words.push("aba".to_owned());
    assert_eq!(
        solve(&words, 1, 3)
            .into_iter()
            .map(Grid::into_words)
            .collect::<Vec<_>>(),
        brute_force(&words, 1, 3)
    );

    let words = binary_words(4);
    let expected = brute_force(&words, 1, 4);
    assert!(!expected.is_empty());
    assert_eq!(
        solve(&words, 1, 4)
            .into_iter()
            .map(Grid::into_words)
            .collect::<Vec<_>>(),
        expected
    );

    let words = owned(&["abab", "abba", "baab", "abaa", "baba", "aaab", "abab"]);
    assert_eq!(
        solve(&words, 2, 2)
            .into_iter()
            .map(Grid::into_words)
            .collect::<Vec<_>>(),
        brute_force(&words, 2, 2)
    );
}

#[test]
fn test_solutions_are_sound() {
    let words = binary_words(6);
    let grids = solve(&words, 2, 3);
    assert!(!grids.is_empty());
    for grid in &grids {
        assert_eq!(grid.size(), 3);
        assert!(grid.is_symmetric());
        for word in grid.words() {
            assert!(words.contains(word));
        }
    }
}

#[test]
fn test_deterministic() {
    let words = binary_words(4);
    let params = Params::new(4, 1).unwrap();

    let first = solve(&words, 1, 4);
    assert_eq!(solve(&words, 1, 4), first);

    let mut solver = WordGrid::new(params, words.clone());
    solver.config().parallel = true;
    let report = solver.solve();
    assert!(report.complete);
    assert_eq!(report.grids.0, first);
    assert_eq!(solver.solve().grids.0, first);
}

#[test]
fn test_state_limit() {
    let params = Params::new(9, 3).unwrap();
    let words = owned(&["COMPLAINT", "PLACEMENT", "INTENTION"]);

    let mut solver = WordGrid::new(params, words.clone());
    solver.config().max_states = Some(0);
    let report = solver.solve();
    assert!(!report.complete);
    assert!(report.grids.is_empty());

    let mut solver = WordGrid::new(params, words);
    solver.config().max_states = Some(1000);
    let report = solver.solve();
    assert!(report.complete);
    assert_eq!(report.grids.len(), 1);
    assert_eq!(report.states, 2);
}

#[test]
fn test_time_limit() {
    let params = Params::new(4, 1).unwrap();

    let mut solver = WordGrid::new(params, binary_words(4));
    solver.config().time_limit = Some(Duration::ZERO);
    let report = solver.solve();
    assert!(!report.complete);
    assert!(report.grids.is_empty());

    let mut solver = WordGrid::new(params, binary_words(4));
    solver.config().time_limit = Some(Duration::from_secs(3600));
    let report = solver.solve();
    assert!(report.complete);
    assert_eq!(report.grids.0, solve(&binary_words(4), 1, 4));
}

#[test]
fn test_interrupted_keeps_earlier_squares() {
    // Each first word takes one search state and yields two squares.
    let words = binary_words(2);
    let all = solve(&words, 1, 2);
    assert_eq!(all.len(), 8);

    let mut solver = WordGrid::new(Params::new(2, 1).unwrap(), words);
    solver.config().max_states = Some(2);
    let report = solver.solve();
    assert!(!report.complete);
    assert_eq!(report.grids.0, all[..4]);
}
