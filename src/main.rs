//! See README.md

use argh::FromArgs;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Duration;
use wordgrid::{load_word_list, Params, WordGrid};

/************************
 *     Parameters       *
 ************************/

/// Print `question` and read a number back. `Ok(None)` if the answer isn't a number.
fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
) -> Result<Option<usize>, io::Error> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
    }
    Ok(answer.trim().parse().ok())
}

/// Keep asking for a word length and partition length until they work together.
fn ask_params(input: &mut impl BufRead, output: &mut impl Write) -> Result<Params, io::Error> {
    loop {
        let word_len = ask(input, output, "How long are the words? ")?;
        let part_len = ask(input, output, "How long are the partitions? ")?;
        if let (Some(word_len), Some(part_len)) = (word_len, part_len) {
            if let Ok(params) = Params::new(word_len, part_len) {
                return Ok(params);
            }
        }
        writeln!(output, "Those parameters don't work. Try again.")?;
    }
}

/************************
 *     Main             *
 ************************/

/// wordgrid: find sets of words that, cut into equal partitions and stacked into a square,
/// read the same down the columns as across the rows
#[derive(Debug, Clone, FromArgs)]
struct Args {
    /// the word list to search, one word per line (default: words.txt)
    #[argh(option, short = 'w', default = "String::from(\"words.txt\")")]
    words: String,

    /// how long the words are (asked for if missing)
    #[argh(option, long = "word-len")]
    word_len: Option<usize>,

    /// how long each partition is (asked for if missing)
    #[argh(option, long = "part-len")]
    part_len: Option<usize>,

    /// search from different first words on all cores
    #[argh(switch, short = 'p', long = "parallel")]
    parallel: bool,

    /// stop searching after this many seconds
    #[argh(option, long = "time-limit")]
    time_limit: Option<f64>,

    /// stop searching after visiting this many search states
    #[argh(option, long = "max-states")]
    max_states: Option<usize>,

    /// print one grid after another, separated by dashed lines
    #[argh(switch, long = "plain")]
    plain: bool,

    /// don't log anything besides the solutions
    #[argh(switch, short = 'q', long = "quiet")]
    quiet: bool,

    /// log the size of the partition index before solving
    #[argh(switch, long = "log-index")]
    log_index: bool,

    /// log each first word that leads to a square
    #[argh(switch, long = "log-steps")]
    log_steps: bool,
}

fn fail(err: impl Display) -> ! {
    eprintln!("{}", err);
    process::exit(1)
}

fn main() {
    let args = argh::from_env::<Args>();

    let params = match (args.word_len, args.part_len) {
        (Some(word_len), Some(part_len)) => {
            Params::new(word_len, part_len).unwrap_or_else(|err| fail(err))
        }
        _ => ask_params(&mut io::stdin().lock(), &mut io::stdout())
            .unwrap_or_else(|err| fail(err)),
    };
    let time_limit = args.time_limit.map(|secs| {
        Duration::try_from_secs_f64(secs)
            .unwrap_or_else(|err| fail(format!("Bad time limit {}: {}", secs, err)))
    });

    let words = load_word_list(&args.words, params.word_len())
        .unwrap_or_else(|err| fail(format!("Failed to load word list '{}': {}", args.words, err)));

    let mut solver = WordGrid::new(params, words);
    solver.config().parallel = args.parallel;
    solver.config().time_limit = time_limit;
    solver.config().max_states = args.max_states;
    if !args.quiet {
        solver.config().log_elapsed = true;
        solver.config().log_index = args.log_index;
        solver.config().log_steps = args.log_steps;
    }

    let report = solver.solve();
    if !report.complete {
        eprintln!("Stopped early; these are only the squares found so far.");
    }
    if report.grids.is_empty() {
        println!("There are no word grids with the requested parameters.");
    } else if args.plain {
        for grid in &report.grids.0 {
            print!("{}", grid.display_plain());
        }
    } else {
        print!("{}", report.grids);
    }
}

#[test]
fn test_ask_params_until_valid() {
    let mut output = Vec::new();
    let params = ask_params(&mut "x\n3\n10\n3\n9\n3\n".as_bytes(), &mut output).unwrap();
    assert_eq!(params, Params::new(9, 3).unwrap());

    let output = String::from_utf8(output).unwrap();
    assert_eq!(
        output.matches("Those parameters don't work. Try again.").count(),
        2
    );
    assert_eq!(output.matches("How long are the words? ").count(), 3);
}

#[test]
fn test_ask_params_out_of_input() {
    let mut output = Vec::new();
    let err = ask_params(&mut "9\n".as_bytes(), &mut output).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
