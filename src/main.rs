use anyhow::Result;
use clap::Parser;
use recap::{
    app::{self, ServeOverrides},
    cli::{handle_check_command, handle_config_command, handle_init_command, Cli, CliCommand},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Recap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Init(args)) => handle_init_command(args),
        Some(CliCommand::Check(args)) => handle_check_command(args).await,
        Some(CliCommand::Config) => handle_config_command(),
        Some(CliCommand::Serve(args)) => {
            app::run_service(ServeOverrides {
                host: args.host,
                port: args.port,
            })
            .await
        }
        None => app::run_service(ServeOverrides::default()).await,
    }
}
