//! `dars-audit`: command-line front end for the degree-audit parser.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
