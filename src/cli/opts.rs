use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use tokenlog::constants::DEFAULT_CONFIG_FILE;

/// Template-driven file logger
#[derive(Debug, Parser)]
#[command(
    name = "tokenlog",
    version,
    about = "Append log entries to files named and formatted by #token{arg}# templates",
    long_about = "A small file logger: file names and entry formats are templates with #date{..}#, #server{..}#, #level#, #text#, #file# and #line# tokens; entries are level-filtered and appended under an exclusive file lock."
)]
pub struct Cli {
    /// Enable verbose output (debug level)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Suppress non-error output (error level only)
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append one entry to the configured log file
    Write {
        /// Message text
        message: String,
        /// Entry level (FATAL, ERROR, WARN, INFO, DEBUG, TRACE, ...)
        #[arg(short = 'l', long = "level")]
        level: Option<String>,
        /// Source file reported by #file# (e.g. "$0" from a shell script)
        #[arg(long = "file", default_value = "tokenlog")]
        file: String,
        /// Source line reported by #line# (e.g. "$LINENO")
        #[arg(long = "line", default_value_t = 0)]
        line: u32,
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },
    /// Print a template expanded with the current context
    Render {
        /// Template to expand
        template: String,
        /// Value for #text#
        #[arg(short = 't', long = "text", default_value = "")]
        text: String,
        /// Value for #level#
        #[arg(short = 'l', long = "level", default_value = "INFO")]
        level: String,
        /// Render missing #server{..}# keys as empty strings
        #[arg(long = "allow-missing")]
        allow_missing: bool,
    },
    /// Generate a default configuration file
    Init {
        /// Output configuration file path
        #[arg(short = 'o', long = "output", default_value = DEFAULT_CONFIG_FILE)]
        output: String,
        /// Force overwrite if file exists
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    }
}
