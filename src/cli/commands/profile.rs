use clap::Subcommand;

use crate::api::models::UserRequest;
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_record, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::AuthService;

#[derive(Subcommand)]
pub enum ProfileCommands {
    #[command(about = "Show your profile")]
    Show,

    #[command(about = "Update your profile from JSON on stdin")]
    Update,
}

pub async fn handle(cmd: ProfileCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let auth = AuthService::new(open_gateway(server)?);

    match cmd {
        ProfileCommands::Show => {
            let user = auth.profile().await?;
            output_record(&output_format, &user)
        }
        ProfileCommands::Update => {
            let profile: UserRequest = read_json_stdin()?;
            auth.update_profile(&profile).await?;
            output_success(&output_format, "Profile updated", None)
        }
    }
}
