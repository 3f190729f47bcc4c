pub mod api_entry;
pub mod auth;
pub mod menu;
pub mod robot;
pub mod role;
pub mod user;

pub use api_entry::{ApiEntry, ApiEntryQuery, ApiEntryRequest};
pub use auth::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, ResetPasswordRequest, TokenPair,
    UpdatePasswordRequest,
};
pub use menu::{DynamicMenu, Menu, MenuNode, MenuQuery, MenuRequest};
pub use robot::{Robot, RobotQuery, RobotRequest};
pub use role::{PermissionList, Role, RoleQuery, RolePermissionsUpdate, RoleRequest};
pub use user::{User, UserQuery, UserRequest, UserStatus};
