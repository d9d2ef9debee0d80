//! Sum of the even Fibonacci numbers not exceeding four million.

use anyhow::{ bail, Result };
use clap::{ Parser, ValueEnum };
use scratchpad::{
    euler::fibonacci,
    init_logging,
    println_flush,
};
use tracing::info;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Build the list of terms and filter it.
    Brute,
    /// Running pair of terms with early termination.
    Pairwise,
    /// Half the sum of all terms up to a multiple-of-three index.
    Identity,
    /// Recurrence over the even terms only.
    Recurrence,
}

impl Method {
    fn run(self, ceiling: u64) -> scratchpad::euler::EulerResult<u64> {
        return match self {
            Self::Brute => fibonacci::even_sum_brute(ceiling),
            Self::Pairwise => fibonacci::even_sum_pairwise(ceiling),
            Self::Identity => fibonacci::even_sum_identity(ceiling),
            Self::Recurrence => fibonacci::even_sum_recurrence(ceiling),
        };
    }
}

#[derive(Parser)]
#[command(
    name = "euler002",
    about = "Sum of the even Fibonacci numbers not exceeding a ceiling",
)]
struct Cli {
    /// Largest term to include.
    #[arg(long, short, default_value_t = 4_000_000)]
    ceiling: u64,

    /// Summation method.
    #[arg(long, short, value_enum, default_value_t = Method::Identity)]
    method: Method,

    /// Run every method and fail unless they agree.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let total = cli.method.run(cli.ceiling)?;
    if cli.check {
        for other in Method::value_variants() {
            let t = other.run(cli.ceiling)?;
            info!(method = ?other, total = t);
            if t != total {
                bail!("{:?} gives {} but {:?} gives {}", other, t, cli.method, total);
            }
        }
    }
    println_flush!("{}", total);
    return Ok(());
}
