use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod init;
pub mod show;

pub use check::handle_check_command;
pub use init::handle_init_command;
pub use show::handle_config_command;

#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(about = "Meeting transcript summarization and email gateway", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API server (default)
    Serve(ServeCliArgs),
    /// Print version information
    Version,
    /// Write a starter .env file
    Init(InitCliArgs),
    /// Verify the completion provider credentials and connectivity
    Check(CheckCliArgs),
    /// Show the effective configuration with secrets masked
    Config,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ServeCliArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(ClapArgs, Debug)]
pub struct InitCliArgs {
    /// Where to write the file (default: ./.env)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CheckCliArgs {
    /// Only run the connectivity request, skip the sample meeting summary
    #[arg(long)]
    pub skip_summary: bool,
}
