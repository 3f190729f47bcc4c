use clap::Subcommand;

use super::PageArgs;
use crate::api::models::{RobotQuery, RobotRequest};
use crate::cli::config::open_gateway;
use crate::cli::utils::{output_page, output_record, output_success, read_json_stdin};
use crate::cli::OutputFormat;
use crate::services::RobotService;

#[derive(Subcommand)]
pub enum RobotCommands {
    #[command(about = "List robots")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, help = "Filter by name")]
        name: Option<String>,
        #[arg(long, help = "Filter by description")]
        desc: Option<String>,
        #[arg(long, help = "Filter by owner")]
        owner: Option<String>,
    },

    #[command(about = "Show one robot")]
    Get {
        #[arg(help = "Robot id")]
        id: u64,
    },

    #[command(about = "Create a robot from JSON on stdin")]
    Create,

    #[command(about = "Update a robot from JSON on stdin")]
    Update {
        #[arg(help = "Robot id")]
        id: u64,
    },

    #[command(about = "Delete a robot")]
    Delete {
        #[arg(help = "Robot id")]
        id: u64,
    },
}

pub async fn handle(cmd: RobotCommands, output_format: OutputFormat, server: Option<&str>) -> anyhow::Result<()> {
    let robots = RobotService::new(open_gateway(server)?);

    match cmd {
        RobotCommands::List { page, name, desc, owner } => {
            let filter = RobotQuery { name, desc, owner };
            let result = robots.list(page.into(), &filter).await?;
            output_page(&output_format, "robots", &result, &["id", "name", "owner", "enabled", "webhook"])
        }
        RobotCommands::Get { id } => {
            let robot = robots.get(id).await?;
            output_record(&output_format, &robot)
        }
        RobotCommands::Create => {
            let robot: RobotRequest = read_json_stdin()?;
            robots.create(&robot).await?;
            output_success(&output_format, &format!("Robot {} created", robot.name), None)
        }
        RobotCommands::Update { id } => {
            let robot: RobotRequest = read_json_stdin()?;
            robots.update(id, &robot).await?;
            output_success(&output_format, &format!("Robot {} updated", id), None)
        }
        RobotCommands::Delete { id } => {
            robots.delete(id).await?;
            output_success(&output_format, &format!("Robot {} deleted", id), None)
        }
    }
}
