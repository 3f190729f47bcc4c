use clap::Subcommand;
use serde_json::json;

use crate::auth::{inspect_token, Access};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_record, output_success, prompt_if_missing};
use crate::cli::OutputFormat;
use crate::services::AuthService;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget stored tokens")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Refresh the access token now")]
    Refresh,

    #[command(about = "Show current user and what they may access")]
    Whoami,

    #[command(about = "Register new account")]
    Register {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Request a password reset email")]
    ResetPassword {
        #[arg(help = "Email")]
        email: String,
    },

    #[command(about = "Change your password")]
    Password {
        #[arg(long, help = "Current password (will prompt if not provided)")]
        old: Option<String>,
        #[arg(long, help = "New password (will prompt if not provided)")]
        new: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let gateway = open_gateway(server)?;
    let auth = AuthService::new(gateway.clone());

    match cmd {
        AuthCommands::Login { username, password } => {
            let password = prompt_if_missing(password, "Password")?;
            let pair = auth.login(&username, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", username),
                Some(json!({ "expiresIn": pair.expires_in })),
            )
        }
        AuthCommands::Logout => {
            auth.logout().await?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let Some(token) = gateway.access_token().await? else {
                return output_success(
                    &output_format,
                    "Not logged in",
                    Some(json!({ "authenticated": false })),
                );
            };

            let expires_at = inspect_token(&token).ok().and_then(|claims| claims.expires_at());
            let can_refresh = gateway.has_refresh_token().await?;
            let alive = auth.quiet_profile().await.is_ok();

            let message = match (alive, expires_at) {
                (true, Some(at)) => format!("Logged in, access token expires at {}", at.to_rfc3339()),
                (true, None) => "Logged in".to_string(),
                (false, _) if can_refresh => "Access token rejected, will refresh on next request".to_string(),
                (false, _) => "Session expired, please login again".to_string(),
            };
            output_success(
                &output_format,
                &message,
                Some(json!({
                    "authenticated": alive,
                    "expiresAt": expires_at.map(|at| at.to_rfc3339()),
                    "canRefresh": can_refresh,
                })),
            )
        }
        AuthCommands::Refresh => {
            let token = auth.refresh().await?;
            let expires_at = inspect_token(&token).ok().and_then(|claims| claims.expires_at());
            output_success(
                &output_format,
                "Access token refreshed",
                Some(json!({ "expiresAt": expires_at.map(|at| at.to_rfc3339()) })),
            )
        }
        AuthCommands::Whoami => {
            let user = auth.profile().await?;
            let access = Access::for_user(Some(&user));
            match output_format {
                OutputFormat::Json => output_record(&output_format, &json!({ "user": user, "access": access })),
                OutputFormat::Text => {
                    output_record(&output_format, &user)?;
                    println!(
                        "access: admin={} operate={} user={}",
                        access.can_admin, access.can_operate, access.can_user
                    );
                    Ok(())
                }
            }
        }
        AuthCommands::Register { email, password } => {
            let password = prompt_if_missing(password, "Password")?;
            auth.register(&email, &password).await?;
            output_success(
                &output_format,
                &format!("Registered {}, check your inbox to activate the account", email),
                None,
            )
        }
        AuthCommands::ResetPassword { email } => {
            auth.reset_password(&email).await?;
            output_success(&output_format, &format!("Password reset email sent to {}", email), None)
        }
        AuthCommands::Password { old, new } => {
            let old = prompt_if_missing(old, "Current password")?;
            let new = prompt_if_missing(new, "New password")?;
            auth.update_password(&old, &new).await?;
            output_success(&output_format, "Password updated", None)
        }
    }
}
