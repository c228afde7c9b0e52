use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::utils::Profile;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Dayplan - dated tasks, reminders and progress in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (uses separate dev config/log file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print the effective configuration and where it was loaded from
    ShowConfig,
}

impl Cli {
    pub fn profile(&self) -> Profile {
        if self.dev { Profile::Dev } else { Profile::Prod }
    }

    /// Resolve the config file path and load it
    pub fn load_config(&self) -> Result<(PathBuf, Config), ConfigError> {
        match &self.config {
            Some(path) => Ok((path.clone(), Config::load_from_path(path)?)),
            None => {
                let profile = self.profile();
                let path = Config::get_config_path(profile)?;
                Ok((path, Config::load_with_profile(profile)?))
            }
        }
    }
}

/// Handle the show-config command
pub fn handle_show_config(path: &std::path::Path, config: &Config) -> Result<(), ConfigError> {
    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_is_the_default_command() {
        let cli = Cli::try_parse_from(["dayplan"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.profile(), Profile::Prod);
    }

    #[test]
    fn parses_flags_and_subcommand() {
        let cli = Cli::try_parse_from(["dayplan", "--dev", "--config", "c.toml", "show-config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::ShowConfig));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert_eq!(cli.profile(), Profile::Dev);
    }
}
