//! Configuration management for the crossword generator

pub mod settings;

pub use settings::{
    Settings, InputConfig, SolverConfig, OutputConfig, VariableOrdering, ValueOrdering,
    Inference, OutputFormat, CliOverrides
};
