use crate::commands::*;
use crate::output::*;
use crate::session::Session;
use scope_core::{load_settings_file, ScopeData, ScopeSettings, SettingsError, Validator};
use std::io;
use std::path::Path;

fn load_settings(path: Option<&Path>) -> Result<ScopeSettings, SettingsError> {
    match path {
        Some(path) => {
            log::debug!("loading settings from {}", path.display());
            load_settings_file(path)
        }
        None => Ok(ScopeSettings::default()),
    }
}

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            print_error(&format!("Failed to load settings: {err}"));
            return Ok(());
        }
    };

    match cli.command {
        Commands::Check { hz, time_ms, vol } => match Validator::check_params(hz, time_ms, vol) {
            Ok(()) => print_info("Parameters accepted"),
            Err(err) => print_error(&err.to_string()),
        },
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Level { y_frac } => {
            let scope = ScopeData::from_settings(&settings)?;
            println!("{}", scope.to_level(y_frac));
        }
        Commands::Norm { level } => {
            let scope = ScopeData::from_settings(&settings)?;
            println!("{}", scope.to_normalized_y(level));
        }
        Commands::Session => {
            let scope = ScopeData::from_settings(&settings)?;
            let mut session = Session::new(scope);
            session.run(io::stdin().lock())?;
        }
    }
    Ok(())
}
