//! Sum of the natural numbers below 1000 that are multiples of 3 or 5, by
//! brute force and in closed form.

use anyhow::{ bail, Result };
use clap::Parser;
use scratchpad::{
    euler::multiples,
    init_logging,
    println_flush,
};

#[derive(Parser)]
#[command(
    name = "euler001",
    about = "Sum of the natural numbers below a bound divisible by any of a set of divisors",
)]
struct Cli {
    /// Exclusive upper bound.
    #[arg(long, short, default_value_t = 1000)]
    bound: u64,

    /// Divisor; repeat to give several.
    #[arg(long = "divisor", short, default_values_t = [3, 5])]
    divisors: Vec<u64>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let brute = multiples::sum_multiples_brute(cli.bound, &cli.divisors)?;
    let closed = multiples::sum_multiples(cli.bound, &cli.divisors)?;
    if brute != closed {
        bail!("brute force ({}) and closed form ({}) disagree", brute, closed);
    }
    println_flush!("{}", brute);
    println_flush!("{}", closed);
    return Ok(());
}
