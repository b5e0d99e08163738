//! CLI entry point for replaying route scenarios into path tile images

use clap::Parser;
use pathtile::io::cli::{Cli, ScenarioProcessor};

fn main() -> pathtile::Result<()> {
    let cli = Cli::parse();
    let mut processor = ScenarioProcessor::new(cli);
    processor.process()
}
