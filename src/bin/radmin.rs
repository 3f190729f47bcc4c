use clap::Parser;
use robot_admin::cli::utils::output_error;
use robot_admin::cli::{Cli, OutputFormat};
use robot_admin::error::GatewayError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let default_level = if robot_admin::is_production!() { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = robot_admin::cli::run(cli).await {
        let gateway_error = e.downcast_ref::<GatewayError>();

        // The gateway has already shown a notice for this one
        if !gateway_error.is_some_and(GatewayError::is_reported) {
            match (&output_format, std::env::var("CLI_VERBOSE").as_deref()) {
                (OutputFormat::Text, Ok("true") | Ok("1")) => eprintln!("Error: {e:?}"),
                _ => output_error(
                    &output_format,
                    &e.to_string(),
                    gateway_error.and_then(GatewayError::error_code),
                )?,
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
