//! Display and output formatting utilities

use crate::config::{OutputConfig, OutputFormat};
use crate::crossword::Direction;
use crate::generate::solution::{Solution, BLOCKED_CELL};
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solution for console output: the grid, then the words by direction
    pub fn format_solution(solution: &Solution, config: &OutputConfig) -> String {
        let mut output = String::new();

        if config.show_coordinates {
            output.push_str(&Self::format_grid_with_coords(solution));
        } else {
            output.push_str(&Self::format_grid(solution));
        }
        output.push('\n');
        output.push_str(&Self::format_entries(solution));

        if config.show_statistics {
            output.push('\n');
            output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
            output.push_str(&solution.statistics.to_string());
        }

        output
    }

    /// The filled grid, `█` for blocked cells
    pub fn format_grid(solution: &Solution) -> String {
        solution.to_string()
    }

    /// Format the grid with row and column numbers
    pub fn format_grid_with_coords(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..solution.width {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..solution.height {
            output.push_str(&format!("{:2} ", row));
            for col in 0..solution.width {
                let open = solution.structure.get(row).and_then(|r| r.get(col)).copied().unwrap_or(false);
                let ch = if open { solution.letter(row, col).unwrap_or(' ') } else { BLOCKED_CELL };
                output.push(' ');
                output.push(ch);
            }
            output.push('\n');
        }

        output
    }

    /// List placed words grouped by direction
    pub fn format_entries(solution: &Solution) -> String {
        let mut output = String::new();

        for (direction, title) in [(Direction::Across, "Across:"), (Direction::Down, "Down:")] {
            let entries: Vec<_> = solution.entries.iter().filter(|e| e.direction == direction).collect();
            if entries.is_empty() {
                continue;
            }
            output.push_str(title);
            output.push('\n');
            for entry in entries {
                output.push_str(&format!("  ({}, {}) {}\n", entry.row, entry.col, entry.word));
            }
        }

        output
    }

    /// Save a solution in the requested format
    pub fn save_solution<P: AsRef<Path>>(solution: &Solution, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        match format {
            OutputFormat::Text => {
                std::fs::write(path, Self::format_grid(solution))
                    .with_context(|| format!("Failed to write solution: {}", path.display()))?;
            }
            OutputFormat::Json => solution.save_to_file(path)?,
            OutputFormat::Png => super::save_png(solution, path)?,
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::crossword::{parse_structure, Crossword, Variable};
    use crate::csp::{Assignment, SearchStatistics};
    use std::time::Duration;
    use tempfile::tempdir;

    fn solution() -> Solution {
        let cw = Crossword::from_cells(parse_structure("_###\n____\n_###\n"), Vec::new()).unwrap();
        let mut assignment = Assignment::new();
        assignment.insert(Variable::new(0, 0, Direction::Down, 3), "OWE".to_string());
        assignment.insert(Variable::new(1, 0, Direction::Across, 4), "WORD".to_string());
        Solution::new(&cw, &assignment, SearchStatistics::default(), Duration::ZERO)
    }

    #[test]
    fn test_grid_formatting() {
        let solution = solution();

        assert_eq!(SolutionFormatter::format_grid(&solution), "O███\nWORD\nE███\n");

        let with_coords = SolutionFormatter::format_grid_with_coords(&solution);
        assert!(with_coords.starts_with("    0 1 2 3\n"));
        assert!(with_coords.contains(" 1  W O R D"));
    }

    #[test]
    fn test_entries_grouped_by_direction() {
        let entries = SolutionFormatter::format_entries(&solution());
        assert_eq!(entries, "Across:\n  (1, 0) WORD\nDown:\n  (0, 0) OWE\n");
    }

    #[test]
    fn test_statistics_and_coordinates_are_optional() {
        let solution = solution();
        let mut config = Settings::default().output;

        let plain = SolutionFormatter::format_solution(&solution, &config);
        assert!(plain.starts_with("O███\n"));
        assert!(!plain.contains("Search Statistics"));

        config.show_statistics = true;
        config.show_coordinates = true;
        let detailed = SolutionFormatter::format_solution(&solution, &config);
        assert!(detailed.starts_with("    0 1 2 3\n"));
        assert!(detailed.contains("Search Statistics"));
    }

    #[test]
    fn test_save_solution() {
        let temp_dir = tempdir().unwrap();
        let solution = solution();

        let text_path = temp_dir.path().join("out/grid.txt");
        SolutionFormatter::save_solution(&solution, &text_path, OutputFormat::Text).unwrap();
        assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "O███\nWORD\nE███\n");

        let json_path = temp_dir.path().join("grid.json");
        SolutionFormatter::save_solution(&solution, &json_path, OutputFormat::Json).unwrap();
        let loaded = Solution::load_from_file(&json_path).unwrap();
        assert_eq!(loaded.entries, solution.entries);

        let png_path = temp_dir.path().join("images/grid.png");
        SolutionFormatter::save_solution(&solution, &png_path, OutputFormat::Png).unwrap();
        let bytes = std::fs::read(&png_path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
