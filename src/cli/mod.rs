pub mod commands;
pub mod config;
pub mod notify;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "radmin")]
#[command(about = "radmin - command-line client for the robot admin backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Backend URL for this invocation (overrides the saved server)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Backend server selection and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Your own account")]
    Profile {
        #[command(subcommand)]
        cmd: commands::profile::ProfileCommands,
    },

    #[command(about = "User administration")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Role administration and permissions")]
    Role {
        #[command(subcommand)]
        cmd: commands::role::RoleCommands,
    },

    #[command(about = "Menu administration")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "Registered API routes")]
    Api {
        #[command(subcommand)]
        cmd: commands::api::ApiCommands,
    },

    #[command(about = "Robot management")]
    Robot {
        #[command(subcommand)]
        cmd: commands::robot::RobotCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, output_format, server).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format, server).await,
        Commands::Profile { cmd } => commands::profile::handle(cmd, output_format, server).await,
        Commands::User { cmd } => commands::user::handle(cmd, output_format, server).await,
        Commands::Role { cmd } => commands::role::handle(cmd, output_format, server).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, output_format, server).await,
        Commands::Api { cmd } => commands::api::handle(cmd, output_format, server).await,
        Commands::Robot { cmd } => commands::robot::handle(cmd, output_format, server).await,
    }
}
