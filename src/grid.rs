use crate::index::partition;
use std::fmt;
use std::fmt::Display;

const GRID_PADDING: usize = 4;
const DEFAULT_WIDTH: usize = 90;

/// A solved square: `words[i]` is row `i`, and also column `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    words: Vec<String>,
    part_len: usize,
}

impl Grid {
    pub fn new(words: Vec<String>, part_len: usize) -> Grid {
        Grid { words, part_len }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    /// The number of rows (and columns).
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// The partition at row `i`, column `j`.
    pub fn cell(&self, i: usize, j: usize) -> &str {
        partition(&self.words[i], self.part_len, j)
    }

    /// Whether cell `(i, j)` equals cell `(j, i)` everywhere.
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| self.cell(i, j) == self.cell(j, i)))
    }

    /// The original layout: a dashed line, then one row per word.
    pub fn display_plain(&self) -> String {
        let mut out = String::from("---------------\n");
        for i in 0..self.size() {
            for j in 0..self.size() {
                out.push_str(self.cell(i, j));
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.size() {
            for j in 0..self.size() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A bunch of grids. Its `Display` shows them side by side, as many per line as fit in the
/// terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSet(pub Vec<Grid>);

impl GridSet {
    fn width() -> usize {
        termsize::get()
            .map(|size| size.cols as usize)
            .filter(|cols| *cols > 0)
            .unwrap_or(DEFAULT_WIDTH)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lay the grids out side by side in bands at most `max_width` columns wide, with a blank
    /// line between bands. A grid wider than `max_width` gets a band to itself.
    pub fn layout(&self, max_width: usize) -> String {
        // band -> (grid lines, width including padding)
        let mut bands: Vec<Vec<(Vec<String>, usize)>> = Vec::new();
        let mut band_width = 0;
        for grid in &self.0 {
            let lines = grid.to_string().lines().map(str::to_owned).collect::<Vec<_>>();
            let width = GRID_PADDING
                + lines
                    .iter()
                    .map(|line| line.chars().count())
                    .max()
                    .unwrap_or(0);
            match bands.last_mut() {
                Some(band) if band_width + width <= max_width => {
                    band.push((lines, width));
                    band_width += width;
                }
                _ => {
                    bands.push(vec![(lines, width)]);
                    band_width = width;
                }
            }
        }

        let mut out = String::new();
        for (i, band) in bands.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let height = band.iter().map(|(lines, _)| lines.len()).max().unwrap_or(0);
            for row in 0..height {
                let mut line = String::new();
                let mut col = 0;
                for (lines, width) in band {
                    if let Some(text) = lines.get(row) {
                        let len = line.chars().count();
                        line.push_str(&" ".repeat((col + GRID_PADDING).saturating_sub(len)));
                        line.push_str(text);
                    }
                    col += width;
                }
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

impl Display for GridSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.layout(GridSet::width()))
    }
}

#[cfg(test)]
fn watsky() -> Grid {
    Grid::new(
        vec![
            "COMPLAINT".to_owned(),
            "PLACEMENT".to_owned(),
            "INTENTION".to_owned(),
        ],
        3,
    )
}

#[test]
fn test_grid_cells() {
    let grid = watsky();
    assert_eq!(grid.size(), 3);
    assert_eq!(grid.cell(0, 1), "PLA");
    assert_eq!(grid.cell(1, 0), "PLA");
    assert_eq!(grid.cell(2, 2), "ION");
    assert!(grid.is_symmetric());

    let swapped = Grid::new(
        vec![
            "COMPLAINT".to_owned(),
            "INTENTION".to_owned(),
            "PLACEMENT".to_owned(),
        ],
        3,
    );
    assert!(!swapped.is_symmetric());
}

#[test]
fn test_display_grid() {
    assert_eq!(watsky().to_string(), "COM PLA INT\nPLA CEM ENT\nINT ENT ION\n");
    assert_eq!(
        watsky().display_plain(),
        "---------------\nCOM PLA INT \nPLA CEM ENT \nINT ENT ION \n"
    );
}

#[test]
fn test_layout_side_by_side() {
    let set = GridSet(vec![watsky(), watsky()]);
    assert_eq!(
        set.layout(90),
        "    COM PLA INT    COM PLA INT\n    \
         PLA CEM ENT    PLA CEM ENT\n    \
         INT ENT ION    INT ENT ION\n"
    );

    // Too narrow for two: the second goes below the first
    assert_eq!(
        set.layout(20),
        "    COM PLA INT\n    \
         PLA CEM ENT\n    \
         INT ENT ION\n\
         \n    \
         COM PLA INT\n    \
         PLA CEM ENT\n    \
         INT ENT ION\n"
    );

    assert_eq!(GridSet::default().layout(90), "");
}

#[test]
fn test_layout_wide_grid() {
    // Wider than the box: still printed, alone in its band
    let set = GridSet(vec![watsky(), watsky(), watsky()]);
    let layout = set.layout(10);
    assert_eq!(layout.matches("COM PLA INT").count(), 3);
    assert_eq!(layout.lines().filter(|line| line.is_empty()).count(), 2);
    assert!(layout.lines().all(|line| line.is_empty() || line.starts_with("    ")));
}
