use clap::Subcommand;
use serde_json::json;

use super::PageArgs;
use crate::api::models::{RoleQuery, RoleRequest};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_empty_collection, output_page, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::RoleService;

#[derive(Subcommand)]
pub enum RoleCommands {
    #[command(about = "List roles")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, help = "Filter by display name")]
        name: Option<String>,
        #[arg(long, help = "Filter by casbin role")]
        casbin_role: Option<String>,
    },

    #[command(about = "Create a role from JSON on stdin")]
    Create,

    #[command(about = "Update a role from JSON on stdin")]
    Update {
        #[arg(help = "Role id")]
        id: u64,
    },

    #[command(about = "Delete a role")]
    Delete {
        #[arg(help = "Role id")]
        id: u64,
    },

    #[command(about = "Show permissions granted to a casbin role")]
    Permissions {
        #[arg(help = "Casbin role, e.g. operator")]
        role: String,
    },

    #[command(about = "Replace a role's permissions with the given \"path,method\" entries")]
    SetPermissions {
        #[arg(help = "Casbin role, e.g. operator")]
        role: String,
        #[arg(help = "Permission entries such as \"/v1/robots,GET\"")]
        permissions: Vec<String>,
    },
}

pub async fn handle(cmd: RoleCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let roles = RoleService::new(open_gateway(server)?);

    match cmd {
        RoleCommands::List { page, name, casbin_role } => {
            let filter = RoleQuery { name, casbin_role };
            let result = roles.list(page.into(), &filter).await?;
            output_page(&output_format, "roles", &result, &["id", "name", "casbinRole"])
        }
        RoleCommands::Create => {
            let role: RoleRequest = read_json_stdin()?;
            roles.create(&role).await?;
            output_success(&output_format, &format!("Role {} created", role.casbin_role), None)
        }
        RoleCommands::Update { id } => {
            let role: RoleRequest = read_json_stdin()?;
            roles.update(id, &role).await?;
            output_success(&output_format, &format!("Role {} updated", id), None)
        }
        RoleCommands::Delete { id } => {
            roles.delete(id).await?;
            output_success(&output_format, &format!("Role {} deleted", id), None)
        }
        RoleCommands::Permissions { role } => {
            let granted = roles.permissions(&role).await?;
            if granted.list.is_empty() {
                return output_empty_collection(
                    &output_format,
                    "permissions",
                    &format!("Role {} has no permissions", role),
                );
            }
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "role": role, "permissions": granted.list }))?),
                OutputFormat::Text => {
                    for permission in &granted.list {
                        println!("{}", permission);
                    }
                }
            }
            Ok(())
        }
        RoleCommands::SetPermissions { role, permissions } => {
            let count = permissions.len();
            roles.set_permissions(&role, permissions).await?;
            output_success(
                &output_format,
                &format!("Role {} now has {} permission(s)", role, count),
                None,
            )
        }
    }
}
