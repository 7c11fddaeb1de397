mod cli;

use log::{LevelFilter, info};
use std::path::Path;
use tokenlog::CallSite;
use tokenlog::config::Config;
use tokenlog::error::{self, Result};

/// Initialize console diagnostics; -v / -q override the configured level
fn init_diagnostics(verbose: bool, quiet: bool, configured: LevelFilter) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        configured
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    use clap::Parser;
    let cli = cli::opts::Cli::parse();

    match &cli.command {
        Some(cli::opts::Commands::Write {
            message,
            level,
            file,
            line,
            config,
        }) => {
            let cfg = load_config(config)?;
            init_diagnostics(cli.verbose, cli.quiet, cfg.diagnostics.level_filter()?);

            let call_site = CallSite::new(file, *line);
            cli::write::handle_write(&cfg, message, level.as_deref(), &call_site)?;
            Ok(())
        }
        Some(cli::opts::Commands::Render {
            template,
            text,
            level,
            allow_missing,
        }) => {
            init_diagnostics(cli.verbose, cli.quiet, LevelFilter::Warn);
            let rendered = cli::render::handle_render(template, text, level, *allow_missing)?;
            println!("{rendered}");
            Ok(())
        }
        Some(cli::opts::Commands::Init { output, force }) => {
            init_diagnostics(cli.verbose, cli.quiet, LevelFilter::Info);
            cli::init::handle_init(output, *force)
        }
        Some(cli::opts::Commands::Validate { config }) => {
            let cfg = load_config(config)?;
            eprintln!("Configuration validation passed");

            init_diagnostics(cli.verbose, cli.quiet, LevelFilter::Info);
            info!("Validating {config}");

            cli::validate::handle_validate(&cfg)
        }
        Some(cli::opts::Commands::Completions { shell }) => {
            cli::opts::Cli::generate_completions(*shell);
            Ok(())
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    }
}

fn load_config(config_path: &str) -> Result<Config> {
    let path = Path::new(config_path);
    match Config::from_file(path) {
        Ok(c) => Ok(c),
        Err(e) => {
            if let error::Error::Config(error::ConfigError::NotFound(_)) = &e {
                eprintln!(
                    "Configuration file not found: {config_path}, using default configuration"
                );
                eprintln!("Tip: run 'tokenlog init' to generate a configuration file");
                Ok(Config::default())
            } else {
                Err(e)
            }
        }
    }
}

fn print_help() {
    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("tokenlog - Template-driven file logger");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("\nUsage: tokenlog <COMMAND> [OPTIONS]");
    eprintln!("\nCommands:");
    eprintln!("  write        Append one entry to the configured log file");
    eprintln!("  render       Print a template expanded with the current context");
    eprintln!("  init         Generate a default configuration file");
    eprintln!("  validate     Validate a configuration file");
    eprintln!("  completions  Generate shell completion scripts");
    eprintln!("\nOptions:");
    eprintln!("  -v, --verbose   Enable verbose output (debug level)");
    eprintln!("  -q, --quiet     Suppress non-error output");
    eprintln!("  -h, --help      Print help information");
    eprintln!("  -V, --version   Print version information");
    eprintln!("\nExamples:");
    eprintln!("  # Initialize configuration");
    eprintln!("  tokenlog init");
    eprintln!("\n  # Append an entry, reporting the calling script and line");
    eprintln!("  tokenlog write -l error --file \"$0\" --line \"$LINENO\" \"disk full\"");
    eprintln!("\n  # Try out a template");
    eprintln!("  tokenlog render '[#date{{Y-m-d}}#][#level#] #text#' -t hello -l warn");
    eprintln!("\nFor more help: tokenlog --help");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
