use serde::Serialize;

use crate::api::models::User;

/// What the current user may reach, derived from the policy roles they hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub can_admin: bool,
    pub can_operate: bool,
    pub can_user: bool,
}

impl Access {
    pub fn for_user(user: Option<&User>) -> Self {
        let Some(user) = user else {
            return Self::default();
        };

        Self {
            can_admin: has_role(user, &["admin"]),
            can_operate: has_role(user, &["admin", "operator"]),
            can_user: has_role(user, &["admin", "operator", "user"]),
        }
    }

    /// Check a menu's `access` key (e.g. `canAdmin`); entries without one are public.
    pub fn allows(&self, key: Option<&str>) -> bool {
        match key {
            None | Some("") => true,
            Some("canAdmin") => self.can_admin,
            Some("canOperate") => self.can_operate,
            Some("canUser") => self.can_user,
            Some(_) => false,
        }
    }
}

fn has_role(user: &User, roles: &[&str]) -> bool {
    user.roles
        .iter()
        .any(|role| roles.contains(&role.casbin_role.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_with(roles: &[&str]) -> User {
        let roles: Vec<_> = roles
            .iter()
            .map(|r| json!({"name": r, "casbinRole": r}))
            .collect();
        serde_json::from_value(json!({"username": "u", "roles": roles})).unwrap()
    }

    #[test]
    fn operator_can_operate_but_not_admin() {
        let access = Access::for_user(Some(&user_with(&["operator"])));
        assert!(!access.can_admin);
        assert!(access.can_operate);
        assert!(access.can_user);
        assert!(access.allows(Some("canOperate")));
        assert!(!access.allows(Some("canAdmin")));
    }

    #[test]
    fn anonymous_has_no_access_except_public_entries() {
        let access = Access::for_user(None);
        assert_eq!(access, Access::default());
        assert!(access.allows(None));
        assert!(!access.allows(Some("canUser")));
    }
}
