//! Main CLI application for the crossword generator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossword_generator::{
    config::{CliOverrides, Inference, OutputFormat, Settings},
    crossword::{create_example_puzzles, load_crossword},
    generate::{CrosswordProblem, Solution, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "crossword_generator")]
#[command(about = "Crossword puzzle generator built on a CSP solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output (debug logging; RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a crossword structure from a word list
    Solve {
        /// Structure file ('_' marks open cells)
        structure: PathBuf,

        /// Word list, one word per line
        words: PathBuf,

        /// Where to save the filled grid
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Output file format (overrides config and the output file extension)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Propagation after each choice (overrides config)
        #[arg(short, long, value_enum)]
        inference: Option<Inference>,

        /// Print search statistics
        #[arg(long)]
        stats: bool,

        /// Print row and column numbers around the grid
        #[arg(long)]
        coords: bool,
    },

    /// Create an example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a saved JSON solution against a puzzle
    Validate {
        structure: PathBuf,
        words: PathBuf,
        solution: PathBuf,
    },

    /// Report slot and domain statistics without searching
    Analyze {
        structure: PathBuf,
        words: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Solve { structure, words, output, config, format, inference, stats, coords } => {
            let overrides = CliOverrides {
                structure_file: Some(structure),
                words_file: Some(words),
                output_file: output,
                format,
                inference,
                show_coordinates: coords,
            };
            solve_command(config, overrides, stats)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { structure, words, solution } => validate_command(structure, words, solution),
        Commands::Analyze { structure, words } => analyze_command(structure, words),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::debug!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides, show_statistics: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.output.show_statistics |= show_statistics;

    settings.validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem = CrosswordProblem::new(settings.clone())
        .context("Failed to create crossword problem")?;

    let Some(solution) = problem.solve().context("Failed to solve crossword")? else {
        println!("No solution.");
        if settings.output.show_statistics {
            println!("\n{}", problem.statistics());
        }
        return Ok(());
    };

    print!("{}", SolutionFormatter::format_solution(&solution, &settings.output));
    log::debug!("Total time {:.3}s", start_time.elapsed().as_secs_f64());

    if let Some(ref output_file) = settings.output.output_file {
        SolutionFormatter::save_solution(&solution, output_file, settings.output.format)
            .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", output_file.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up example files..."));

    let config_dir = directory.join("config");
    let data_dir = directory.join("data");

    for dir in [&config_dir, &data_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.structure_file = PathBuf::from("data/frame.txt");
        settings.input.words_file = PathBuf::from("data/frame_words.txt");
        settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display())));
    }

    create_example_puzzles(&data_dir)
        .context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", data_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Run: cargo run -- solve data/frame.txt data/frame_words.txt");
    println!("2. Add your own structures and word lists to {}", data_dir.display());

    Ok(())
}

fn validate_command(structure: PathBuf, words: PathBuf, solution_path: PathBuf) -> Result<()> {
    let crossword = load_crossword(&structure, &words)?;
    let solution = Solution::load_from_file(&solution_path)?;

    let result = SolutionValidator::new(&crossword)
        .validate_solution(&solution)
        .context("Validation failed")?;

    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn analyze_command(structure: PathBuf, words: PathBuf) -> Result<()> {
    let crossword = load_crossword(&structure, &words)?;
    let problem = CrosswordProblem::with_crossword(Settings::default(), crossword);

    println!("{}", problem.analyze());

    Ok(())
}
