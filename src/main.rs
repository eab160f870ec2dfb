use clap::Parser;
use respec::{
    cli::{Cli, Commands},
    commands, Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            schema,
            path,
            method,
            status,
            content_type,
            body,
            default_content_type,
        } => {
            commands::execute_check(
                &schema,
                &path,
                &method,
                status,
                content_type.as_deref(),
                body.as_deref(),
                default_content_type.as_deref(),
            )?;
        }
    }

    Ok(())
}
