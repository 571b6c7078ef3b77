use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pgn2tex::chess::log;
use pgn2tex::{Error, FormatOptions, convert_file, expand_inputs, output_path_for};
use std::path::PathBuf;
use std::process;

/// Convert PGN games with variations into a LaTeX document with diagrams
#[derive(Parser, Debug)]
#[command(name = "pgn2tex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN files or glob patterns (`.zst` files are decompressed)
    #[arg(required = true)]
    pgn: Vec<String>,

    /// Output file (only with a single input; default: input with .tex)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    number_variations: bool,

    #[arg(long)]
    indent_variations: bool,

    #[arg(long)]
    arrow_last_move: bool,

    /// Reserved, currently has no effect
    #[arg(long)]
    diagrams_start_variation: bool,

    /// Reserved, currently has no effect
    #[arg(long)]
    diagrams_end_variation: bool,

    /// Use different colors for each variation
    #[arg(long)]
    color: bool,

    /// Print boards from black's perspective
    #[arg(long)]
    flip: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            number_variations: self.number_variations,
            indent_variations: self.indent_variations,
            arrow_last_move: self.arrow_last_move,
            color: self.color,
            flip: self.flip,
            diagrams_start_variation: self.diagrams_start_variation,
            diagrams_end_variation: self.diagrams_end_variation,
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.format_options();
    let inputs = expand_inputs(&cli.pgn)?;

    if cli.output.is_some() && inputs.len() != 1 {
        return Err(Error::AmbiguousOutput(inputs.len()).into());
    }

    for input in &inputs {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(input));
        convert_file(input, &output, options)
            .with_context(|| format!("converting '{}'", input.display()))?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    log::init(log::level_for(cli.verbose, cli.quiet));

    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
        process::exit(1);
    }
}
