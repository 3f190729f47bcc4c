use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_server_info, ping_server, resolve_server_url, save_server_info, ServerInfo, ServerStatus};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Save the backend URL used by every other command")]
    Set {
        #[arg(help = "Server URL, e.g. http://127.0.0.1:8000")]
        url: String,
        #[arg(long, default_value = "", help = "Free-form description")]
        description: String,
    },

    #[command(about = "Show the saved server")]
    Show,

    #[command(about = "Health check the server (saved, --server, or default)")]
    Ping,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Set { url, description } => {
            let parsed = url::Url::parse(&url).map_err(|e| anyhow::anyhow!("invalid server URL '{}': {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!("server URL must use http or https"));
            }

            let url = url.trim_end_matches('/').to_string();
            let mut info = ServerInfo::new(url.clone(), description);
            info.update_ping(ping_server(&url).await);
            save_server_info(&info)?;

            output_success(
                &output_format,
                &format!("Server set to {} ({:?})", url, info.status),
                Some(json!({ "server": info })),
            )
        }
        ServerCommands::Show => match load_server_info()? {
            Some(info) => output_record(&output_format, &info),
            None => {
                let url = resolve_server_url(server)?;
                output_success(
                    &output_format,
                    &format!("No server saved, using {}", url),
                    Some(json!({ "url": url })),
                )
            }
        },
        ServerCommands::Ping => {
            let url = resolve_server_url(server)?;
            let status = ping_server(&url).await;

            // Keep the saved record's health current when pinging it
            if let Some(mut info) = load_server_info()? {
                if info.url == url {
                    info.update_ping(status);
                    save_server_info(&info)?;
                }
            }

            if status != ServerStatus::Up {
                return Err(anyhow::anyhow!("server {} is down", url));
            }
            output_success(
                &output_format,
                &format!("Server {} is up", url),
                Some(json!({ "url": url, "status": status })),
            )
        }
    }
}
