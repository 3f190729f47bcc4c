use clap::Subcommand;

use super::PageArgs;
use crate::api::models::{UserQuery, UserRequest};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_page, output_record, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::{AuthService, UserService};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List users")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, help = "Filter by email")]
        email: Option<String>,
        #[arg(long, help = "Filter by username")]
        username: Option<String>,
        #[arg(long, help = "Filter by nickname")]
        nickname: Option<String>,
    },

    #[command(about = "Show one user")]
    Get {
        #[arg(help = "User id")]
        id: u64,
    },

    #[command(about = "Create a user from JSON on stdin")]
    Create,

    #[command(about = "Update a user from JSON on stdin")]
    Update {
        #[arg(help = "User id")]
        id: u64,
    },

    #[command(about = "Delete a user")]
    Delete {
        #[arg(help = "User id")]
        id: u64,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let gateway = open_gateway(server)?;
    let users = UserService::new(gateway.clone());

    match cmd {
        UserCommands::List { page, email, username, nickname } => {
            let filter = UserQuery { email, username, nickname };
            let result = users.list(page.into(), &filter).await?;
            output_page(&output_format, "users", &result, &["userid", "username", "email", "status", "roles"])
        }
        UserCommands::Get { id } => {
            let user = AuthService::new(gateway).user(id).await?;
            output_record(&output_format, &user)
        }
        UserCommands::Create => {
            let user: UserRequest = read_json_stdin()?;
            users.create(&user).await?;
            output_success(&output_format, &format!("User {} created", user.username), None)
        }
        UserCommands::Update { id } => {
            let user: UserRequest = read_json_stdin()?;
            users.update(id, &user).await?;
            output_success(&output_format, &format!("User {} updated", id), None)
        }
        UserCommands::Delete { id } => {
            users.delete(id).await?;
            output_success(&output_format, &format!("User {} deleted", id), None)
        }
    }
}
