//! Result rendering: aligned text tables, pretty JSON and CSV.

use std::io::Write;

use clap::ValueEnum;
use pricer_models::greeks::{GreekMetric, Greeks};
use pricer_models::strategy::{ProfilePoint, Surface};

use crate::Result;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values with a header row
    Csv,
}

const WIDTH: usize = 14;

fn fmt_value(value: f64) -> String {
    format!("{:.6}", value)
}

fn header_row() -> Vec<String> {
    std::iter::once("spot".to_string())
        .chain(GreekMetric::ALL.iter().map(|m| m.name().to_string()))
        .collect()
}

/// Renders one Greeks record.
pub fn write_greeks<W: Write>(out: &mut W, format: OutputFormat, greeks: &Greeks) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rule = "─".repeat(WIDTH + 2);
            writeln!(out, "┌{rule}┬{rule}┐")?;
            writeln!(out, "│ {:<WIDTH$} │ {:>WIDTH$} │", "Metric", "Value")?;
            writeln!(out, "├{rule}┼{rule}┤")?;
            for (metric, value) in greeks.entries() {
                writeln!(out, "│ {:<WIDTH$} │ {:>WIDTH$} │", metric.name(), fmt_value(value))?;
            }
            writeln!(out, "└{rule}┴{rule}┘")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, greeks)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(GreekMetric::ALL.iter().map(|m| m.name()))?;
            writer.write_record(greeks.entries().map(|(_, v)| v.to_string()))?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Renders a spot profile, one row per spot.
pub fn write_profile<W: Write>(out: &mut W, format: OutputFormat, profile: &[ProfilePoint]) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let header = header_row();
            let line: Vec<String> = header.iter().map(|h| format!("{:>WIDTH$}", h)).collect();
            writeln!(out, "{}", line.join(" "))?;
            writeln!(out, "{}", "-".repeat(header.len() * (WIDTH + 1) - 1))?;
            for point in profile {
                let cells: Vec<String> = std::iter::once(point.spot)
                    .chain(point.greeks.entries().map(|(_, v)| v))
                    .map(|v| format!("{:>WIDTH$}", fmt_value(v)))
                    .collect();
                writeln!(out, "{}", cells.join(" "))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, profile)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(header_row())?;
            for point in profile {
                let record = std::iter::once(point.spot)
                    .chain(point.greeks.entries().map(|(_, v)| v))
                    .map(|v| v.to_string());
                writer.write_record(record)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Renders a surface as a matrix: one row per axis value, one column per spot.
pub fn write_surface<W: Write>(out: &mut W, format: OutputFormat, surface: &Surface) -> Result<()> {
    let corner = format!("{}\\spot", surface.variable.name());
    match format {
        OutputFormat::Table => {
            writeln!(out, "{} against spot and {}", surface.metric, surface.variable)?;
            let mut header = vec![format!("{:>WIDTH$}", corner)];
            header.extend(surface.spots.iter().map(|s| format!("{:>WIDTH$}", fmt_value(*s))));
            writeln!(out, "{}", header.join(" "))?;
            for (value, row) in surface.axis.iter().zip(&surface.values) {
                let mut cells = vec![format!("{:>WIDTH$}", fmt_value(*value))];
                cells.extend(row.iter().map(|v| format!("{:>WIDTH$}", fmt_value(*v))));
                writeln!(out, "{}", cells.join(" "))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, surface)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            let header = std::iter::once(corner).chain(surface.spots.iter().map(|s| s.to_string()));
            writer.write_record(header)?;
            for (value, row) in surface.axis.iter().zip(&surface.values) {
                let record = std::iter::once(value).chain(row.iter()).map(|v| v.to_string());
                writer.write_record(record)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
