//! Find all 3x3 grids of 9-letter words, cut into 3-letter partitions, that read the same down
//! as across

use wordgrid::{words_of_len, Params, WordGrid};

const WORDS: &str = "
complaint
placement
intention
plaintiff
intensity
completed
plaintive
computing
important
portrayal
entertain
tainted
";

fn main() {
    println!("Finding all 3x3 grids of 9-letter words with 3-letter partitions.");
    println!();

    let params = Params::new(9, 3).unwrap();
    let words = words_of_len(WORDS, params.word_len());

    let mut solver = WordGrid::new(params, words);
    solver.config().log_index = true;
    solver.config().log_steps = true;
    solver.config().log_elapsed = true;

    let report = solver.solve();
    if report.grids.is_empty() {
        println!("No solutions");
    } else {
        println!("{}", report.grids);
    }
}
