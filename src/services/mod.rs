//! Typed wrappers over the backend endpoints. All calls go through the shared [`Gateway`].
//!
//! [`Gateway`]: crate::gateway::Gateway

pub mod api_service;
pub mod auth_service;
pub mod menu_service;
pub mod robot_service;
pub mod role_service;
pub mod user_service;

pub use api_service::ApiService;
pub use auth_service::AuthService;
pub use menu_service::MenuService;
pub use robot_service::RobotService;
pub use role_service::RoleService;
pub use user_service::UserService;
