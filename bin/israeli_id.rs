//! Check digit of an Israeli ID number, and whether the ID carries it.

use anyhow::Result;
use clap::Parser;
use scratchpad::{
    init_logging,
    println_flush,
    puzzles::ident,
};

#[derive(Parser)]
#[command(name = "israeli-id", about = "Compute and verify the check digit of an Israeli ID")]
struct Cli {
    /// The ID, as up to ten decimal digits.
    #[arg(default_value = "3201579484")]
    id: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let id = ident::parse_id(&cli.id)?;
    println_flush!("{}", id.check_digit());
    println_flush!("{}", id.is_valid());
    return Ok(());
}
