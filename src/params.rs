use std::fmt;

/// The shape of the squares to search for: how long the words are, and how long each of their
/// partitions is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    word_len: usize,
    part_len: usize,
}

impl Params {
    /// Fails unless both lengths are positive and `part_len` evenly divides `word_len`.
    pub fn new(word_len: usize, part_len: usize) -> Result<Params, BadParams> {
        if word_len == 0 || part_len == 0 {
            Err(BadParams::ZeroLength)
        } else if word_len % part_len != 0 {
            Err(BadParams::NotDivisible { word_len, part_len })
        } else {
            Ok(Params { word_len, part_len })
        }
    }

    pub fn word_len(&self) -> usize {
        self.word_len
    }

    pub fn part_len(&self) -> usize {
        self.part_len
    }

    /// The number of partitions per word, which is also the number of words per square.
    pub fn num_parts(&self) -> usize {
        self.word_len / self.part_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadParams {
    ZeroLength,
    NotDivisible { word_len: usize, part_len: usize },
}

impl fmt::Display for BadParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BadParams::ZeroLength => write!(f, "Lengths must be positive"),
            BadParams::NotDivisible { word_len, part_len } => write!(
                f,
                "Word length {} is not a multiple of partition length {}",
                word_len, part_len
            ),
        }
    }
}

impl std::error::Error for BadParams {}

#[test]
fn test_params() {
    let params = Params::new(9, 3).unwrap();
    assert_eq!(params.num_parts(), 3);
    assert_eq!(params.word_len(), 9);
    assert_eq!(params.part_len(), 3);

    assert_eq!(Params::new(5, 5).unwrap().num_parts(), 1);
    assert_eq!(Params::new(12, 2).unwrap().num_parts(), 6);

    assert_eq!(
        Params::new(10, 3),
        Err(BadParams::NotDivisible {
            word_len: 10,
            part_len: 3
        })
    );
    assert_eq!(Params::new(9, 0), Err(BadParams::ZeroLength));
    assert_eq!(Params::new(0, 3), Err(BadParams::ZeroLength));
    assert_eq!(
        BadParams::NotDivisible {
            word_len: 10,
            part_len: 3
        }
        .to_string(),
        "Word length 10 is not a multiple of partition length 3"
    );
}
