// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::{CharacterGrid, MeshSummary, ProjectionAxis};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report mesh summary as a framed block
    pub fn report_summary(file: &str, summary: &MeshSummary) {
        println!("{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!("  {} {}", "Header:".bright_black(), summary.header);
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            summary.triangle_count.to_string().cyan()
        );
        Self::print_triple("Dimensions", &summary.dimensions);
        Self::print_triple("Mins", &summary.mins);
        Self::print_triple("Maxs", &summary.maxs);
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Print the raster under a short caption
    pub fn report_projection(axis: ProjectionAxis, grid: &CharacterGrid, filled: char, empty: char) {
        println!(
            "{} {} {}",
            "Projection:".bold(),
            axis.to_string().cyan(),
            format!("({0}x{0})", grid.side()).bright_black()
        );
        print!("{}", grid.render(filled, empty));
    }

    /// Report decode timing
    pub fn report_timing(triangles: usize, duration: Duration) {
        println!(
            "{} {} triangles in {}",
            "Decoded".bright_black(),
            triangles.to_string().cyan(),
            Self::format_duration(duration).yellow()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_triple(name: &str, values: &[f32; 3]) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            format!("[{} {} {}]", values[0], values[1], values[2]).cyan()
        );
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
