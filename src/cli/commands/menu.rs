use clap::Subcommand;

use super::PageArgs;
use crate::api::models::{MenuNode, MenuQuery, MenuRequest};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_empty_collection, output_page, output_record, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::{AuthService, MenuService};

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "List menu entries")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, help = "Filter by name")]
        name: Option<String>,
        #[arg(long, help = "Filter by path")]
        path: Option<String>,
        #[arg(long, help = "Filter by access key, e.g. canAdmin")]
        access: Option<String>,
    },

    #[command(about = "Show the menu tree visible to you")]
    Tree,

    #[command(about = "Create a menu entry from JSON on stdin")]
    Create,

    #[command(about = "Update a menu entry from JSON on stdin")]
    Update {
        #[arg(help = "Menu id")]
        id: u64,
    },

    #[command(about = "Delete a menu entry")]
    Delete {
        #[arg(help = "Menu id")]
        id: u64,
    },
}

pub async fn handle(cmd: MenuCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let gateway = open_gateway(server)?;
    let menus = MenuService::new(gateway.clone());

    match cmd {
        MenuCommands::List { page, name, path, access } => {
            let filter = MenuQuery { name, path, access };
            let result = menus.list(page.into(), &filter).await?;
            output_page(&output_format, "menus", &result, &["id", "parentId", "name", "path", "access"])
        }
        MenuCommands::Tree => {
            let tree = AuthService::new(gateway).menu().await?;
            if tree.list.is_empty() {
                return output_empty_collection(&output_format, "list", "No menu entries visible");
            }
            match output_format {
                OutputFormat::Json => output_record(&output_format, &tree),
                OutputFormat::Text => {
                    for node in &tree.list {
                        print_node(node, 0);
                    }
                    Ok(())
                }
            }
        }
        MenuCommands::Create => {
            let menu: MenuRequest = read_json_stdin()?;
            menus.create(&menu).await?;
            output_success(&output_format, &format!("Menu {} created", menu.path), None)
        }
        MenuCommands::Update { id } => {
            let menu: MenuRequest = read_json_stdin()?;
            menus.update(id, &menu).await?;
            output_success(&output_format, &format!("Menu {} updated", id), None)
        }
        MenuCommands::Delete { id } => {
            menus.delete(id).await?;
            output_success(&output_format, &format!("Menu {} deleted", id), None)
        }
    }
}

fn print_node(node: &MenuNode, depth: usize) {
    let name = node.menu.name.as_deref().unwrap_or("-");
    println!("{}{} {}", "  ".repeat(depth), name, node.menu.path);
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
