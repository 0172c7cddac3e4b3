use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use repoview_core::{IssueFilter, RepoId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repoview",
    version,
    about = "Browse a GitHub repository's issues from the terminal"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "REPOVIEW_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub API base URL (overrides config file)
    #[arg(long, env = "REPOVIEW_API_URL", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

/// Issue state filter as accepted on the command line
#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum StateArg {
    All,
    #[default]
    Open,
    Closed,
}

impl From<StateArg> for IssueFilter {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::All => IssueFilter::All,
            StateArg::Open => IssueFilter::Open,
            StateArg::Closed => IssueFilter::Closed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a repository and one page of its issues, then exit
    #[command(visible_alias = "s")]
    Show {
        /// Repository as owner/name, percent-encoded or not (e.g., facebook%2Freact)
        #[arg(value_parser = parse_repo)]
        repository: RepoId,

        /// Which issues to list
        #[arg(long, short = 's', value_enum, default_value_t = StateArg::Open)]
        state: StateArg,

        /// Page number (5 issues per page)
        #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Browse a repository's issues interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Repository as owner/name, percent-encoded or not (e.g., facebook%2Freact)
        #[arg(value_parser = parse_repo)]
        repository: RepoId,
    },
    /// Configuration inspection
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file search paths
    Path,
}

fn parse_repo(s: &str) -> Result<RepoId, String> {
    RepoId::from_route_segment(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "repoview", &mut std::io::stdout());
    }
}
