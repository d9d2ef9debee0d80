//! Number of ways to place non-attacking queens on an `n x n` board, eight by
//! default.

use anyhow::Result;
use clap::Parser;
use scratchpad::{
    init_logging,
    println_flush,
    puzzles::queens,
};

#[derive(Parser)]
#[command(name = "nqueens", about = "Count solutions to the N-queens problem by brute force")]
struct Cli {
    /// Board size.
    #[arg(short, default_value_t = 8)]
    n: usize,

    /// Also print every solution after the count.
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if cli.show {
        let solutions = queens::solutions(cli.n);
        println_flush!("{}", solutions.len());
        for cols in solutions.iter() {
            println_flush!("");
            println_flush!("{}", queens::render(cols));
        }
    } else {
        println_flush!("{}", queens::count_solutions(cli.n));
    }
    return Ok(());
}
