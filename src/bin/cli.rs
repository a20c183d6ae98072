// src/bin/cli.rs
use gym_reviews::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
