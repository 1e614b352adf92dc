use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scope", version, about = "Scope trigger overlay tools")]
pub struct Cli {
    /// Settings file (.json or .toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read line commands from stdin and drive one scope
    Session,
    /// Data level at a fraction measured from the top of the plot
    Level {
        #[arg(allow_hyphen_values = true)]
        y_frac: f64,
    },
    /// Fraction from the bottom of the plot at which a level sits
    Norm {
        #[arg(allow_hyphen_values = true)]
        level: f64,
    },
    /// Check trigger parameters against the built-in rules
    Check {
        #[arg(allow_hyphen_values = true)]
        hz: i64,
        #[arg(allow_hyphen_values = true)]
        time_ms: i64,
        #[arg(allow_hyphen_values = true)]
        vol: i64,
    },
    /// Print the effective settings as JSON
    Settings,
}
