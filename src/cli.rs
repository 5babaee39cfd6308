//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DEFAULT_OUTPUT_DIR, DEFAULT_RULES_URL};
use crate::error::Result;
use crate::harvester::harvest;
use crate::lookup::{read_index, read_rule, read_term};
use crate::output::Layout;

/// Width used when wrapping glossary definitions for the terminal.
const WRAP_WIDTH: usize = 80;

/// Comprehensive Rules harvester - download and segment the MTG rules.
#[derive(Parser)]
#[command(name = "comprules-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output directory of the segmented layout
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the rules document and segment it into the output layout.
    Harvest {
        /// Document URL to fetch
        #[arg(short, long, default_value = DEFAULT_RULES_URL)]
        url: String,
    },

    /// Print the complete rules index.
    Index,

    /// Print one rule section by its 3-digit number (e.g. 100, 205, 701).
    Rule {
        /// Rule number; for longer numbers like 105.2f, use the first
        /// three digits
        number: String,
    },

    /// Print one glossary definition by term name.
    Term {
        /// Term to look up (e.g. "Ability", "Mana Value")
        term: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let layout = Layout::new(&cli.output);

    match cli.command {
        Commands::Harvest { url } => harvest_command(&url, &layout),
        Commands::Index => {
            println!("{}", read_index(&layout)?);
            Ok(())
        }
        Commands::Rule { number } => {
            println!("{}", read_rule(&layout, &number)?);
            Ok(())
        }
        Commands::Term { term } => term_command(&term, &layout),
    }
}

/// Execute the harvest command.
fn harvest_command(url: &str, layout: &Layout) -> Result<()> {
    println!(
        "{} {}",
        style("Harvesting").bold(),
        style(url).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Downloading and segmenting...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match harvest(url, layout.root()) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Raw document: {} bytes", summary.raw_bytes);
    println!(
        "  Index: {}",
        if summary.index_written {
            style("written").green()
        } else {
            style("missing").yellow()
        }
    );
    println!("  Rules: {}", style(summary.rule_count).green());
    println!("  Glossary terms: {}", style(summary.glossary_count).green());
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.output_root.display()
    );

    Ok(())
}

/// Execute the term command: styled term heading plus wrapped definition.
fn term_command(term: &str, layout: &Layout) -> Result<()> {
    let definition = read_term(layout, term)?;
    println!("{}", style(term).bold());
    println!("{}", textwrap::fill(&definition, WRAP_WIDTH));
    Ok(())
}
