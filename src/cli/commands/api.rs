use clap::Subcommand;

use super::PageArgs;
use crate::api::models::{ApiEntryQuery, ApiEntryRequest};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_page, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::ApiService;

#[derive(Subcommand)]
pub enum ApiCommands {
    #[command(about = "List registered API routes")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, help = "Filter by group")]
        group: Option<String>,
        #[arg(long, help = "Filter by name")]
        name: Option<String>,
        #[arg(long, help = "Filter by path")]
        path: Option<String>,
        #[arg(long, help = "Filter by HTTP method")]
        method: Option<String>,
    },

    #[command(about = "Register an API route from JSON on stdin")]
    Create,

    #[command(about = "Update an API route from JSON on stdin")]
    Update {
        #[arg(help = "API id")]
        id: u64,
    },

    #[command(about = "Delete an API route")]
    Delete {
        #[arg(help = "API id")]
        id: u64,
    },
}

pub async fn handle(cmd: ApiCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let apis = ApiService::new(open_gateway(server)?);

    match cmd {
        ApiCommands::List { page, group, name, path, method } => {
            let filter = ApiEntryQuery {
                group,
                name,
                path,
                method: method.map(|m| m.to_uppercase()),
            };
            let result = apis.list(page.into(), &filter).await?;
            output_page(&output_format, "apis", &result, &["id", "group", "method", "path", "name"])
        }
        ApiCommands::Create => {
            let entry: ApiEntryRequest = read_json_stdin()?;
            apis.create(&entry).await?;
            output_success(
                &output_format,
                &format!("API {} {} registered", entry.method, entry.path),
                None,
            )
        }
        ApiCommands::Update { id } => {
            let entry: ApiEntryRequest = read_json_stdin()?;
            apis.update(id, &entry).await?;
            output_success(&output_format, &format!("API {} updated", id), None)
        }
        ApiCommands::Delete { id } => {
            apis.delete(id).await?;
            output_success(&output_format, &format!("API {} deleted", id), None)
        }
    }
}
