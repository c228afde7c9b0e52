use clap::Parser;
use color_eyre::Result;
use dayplan::cli::{self, Cli, Commands};
use dayplan::scanner::{LocalClock, Scanner};
use dayplan::Registry;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config_path, config) = cli.load_config()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::ShowConfig => {
            cli::handle_show_config(&config_path, &config)?;
        }
        Commands::Tui => {
            if !dayplan::logging::init(&config) {
                eprintln!(
                    "warning: could not open log file {}, logging is disabled",
                    config.get_log_path().display()
                );
            }
            tracing::info!(config = %config_path.display(), "starting dayplan");

            let registry = Registry::new()
                .with_default_reminder_minutes(config.default_reminder_minutes)
                .into_shared();

            let (reminder_tx, reminder_rx) = crossbeam_channel::unbounded();
            let scanner = Scanner::spawn(
                registry.clone(),
                config.scan_interval(),
                LocalClock,
                reminder_tx,
            )?;

            let app = dayplan::tui::App::new(config, registry, reminder_rx);
            let result = dayplan::tui::run_event_loop(app);
            scanner.stop();
            result?;
        }
    }

    Ok(())
}
