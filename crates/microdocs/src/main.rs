//! microdocs CLI - single-page documentation site generator.
//!
//! Renders one or more Markdown files into a self-contained HTML page:
//!
//! ```text
//! microdocs README.md docs/usage.md -o site/index.html --repo-url https://github.com/acme/widget
//! ```

mod build;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use build::BuildArgs;
use output::Output;

/// microdocs - turn Markdown files into a single-page documentation site.
#[derive(Parser)]
#[command(name = "microdocs", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.build.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.build.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
