//! Configuration settings for the crossword generator

use crate::error::CrosswordError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub structure_file: PathBuf,
    pub words_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Run AC-3 over the whole puzzle before searching
    pub enforce_arc_consistency: bool,
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    pub inference: Inference,
}

/// How the search picks the next slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableOrdering {
    /// Fewest remaining candidates, ties broken by most neighbours
    MinimumRemainingValues,
    /// Slot discovery order
    Static,
}

/// How the search orders candidate words for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    /// Words ruling out the fewest neighbour candidates first
    LeastConstraining,
    /// Alphabetical domain order
    Natural,
}

/// Propagation performed after each tentative choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Inference {
    None,
    ArcConsistency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub show_statistics: bool,
    /// Print row and column numbers around the grid
    #[serde(default)]
    pub show_coordinates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    /// Rendered grid image
    Png,
}

impl OutputFormat {
    /// Format implied by a file extension, if any
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                structure_file: PathBuf::from("data/structure.txt"),
                words_file: PathBuf::from("data/words.txt"),
            },
            solver: SolverConfig {
                enforce_arc_consistency: true,
                variable_ordering: VariableOrdering::MinimumRemainingValues,
                value_ordering: ValueOrdering::LeastConstraining,
                inference: Inference::None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_file: None,
                show_statistics: false,
                show_coordinates: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check that the configured input files exist
    pub fn validate(&self) -> Result<()> {
        if !self.input.structure_file.exists() {
            return Err(CrosswordError::InvalidSettings(format!(
                "structure file does not exist: {}",
                self.input.structure_file.display()
            ))
            .into());
        }

        if !self.input.words_file.exists() {
            return Err(CrosswordError::InvalidSettings(format!(
                "word list does not exist: {}",
                self.input.words_file.display()
            ))
            .into());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref structure_file) = cli_overrides.structure_file {
            self.input.structure_file = structure_file.clone();
        }
        if let Some(ref words_file) = cli_overrides.words_file {
            self.input.words_file = words_file.clone();
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
        // An explicit format wins over the one implied by the output file name
        let implied = cli_overrides.output_file.as_deref().and_then(OutputFormat::from_path);
        if let Some(format) = cli_overrides.format.or(implied) {
            self.output.format = format;
        }
        if cli_overrides.show_coordinates {
            self.output.show_coordinates = true;
        }
        if let Some(inference) = cli_overrides.inference {
            self.solver.inference = inference;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub structure_file: Option<PathBuf>,
    pub words_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub inference: Option<Inference>,
    pub show_coordinates: bool,
}
