use std::process::ExitCode;

use clap::Parser;

use silhouette::{Silhouette, SilhouetteResult};

mod cli;
mod report;

use crate::cli::{Cli, derive_svg_path};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Convert the input image and report where the SVG landed.
fn run(cli: Cli) -> SilhouetteResult<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_svg_path(&cli.input));
    Silhouette::new().convert(&cli.input, &output)?;
    println!("SVG saved to {}", output.display());
    Ok(())
}
