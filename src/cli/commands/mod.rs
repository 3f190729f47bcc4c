pub mod api;
pub mod auth;
pub mod menu;
pub mod profile;
pub mod robot;
pub mod role;
pub mod server;
pub mod user;

use clap::Args;

use crate::types::PageQuery;

/// Paging flags shared by every `list` command.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    pub page: u32,
    #[arg(long, default_value_t = 10, help = "Items per page (max 100)")]
    pub page_size: u32,
}

impl From<PageArgs> for PageQuery {
    fn from(args: PageArgs) -> Self {
        PageQuery::new(args.page, args.page_size)
    }
}
