mod common;

use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::Mock;

use common::ok;
use robot_admin::api::models::{RobotQuery, UserQuery, UserStatus};
use robot_admin::auth::Access;
use robot_admin::services::{AuthService, RobotService, RoleService, UserService};
use robot_admin::types::PageQuery;

#[tokio::test]
async fn user_list_sends_paging_and_filters() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/admin/users"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "20"))
        .and(query_param("username", "zhang"))
        .respond_with(ok(json!({
            "list": [
                {"userid": 3, "username": "zhangsan", "email": "zs@example.com", "status": 1,
                 "roles": [{"id": 2, "name": "Operator", "casbinRole": "operator"}]}
            ],
            "total": 21
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let filter = UserQuery {
        username: Some("zhang".into()),
        ..Default::default()
    };
    let page = UserService::new(h.gateway.clone())
        .list(PageQuery::new(2, 20), &filter)
        .await?;

    assert_eq!(page.total, 21);
    let user = &page.list[0];
    assert_eq!(user.id, 3);
    assert_eq!(user.status, UserStatus::Active);

    let access = Access::for_user(Some(user));
    assert!(access.can_operate);
    assert!(!access.can_admin);
    Ok(())
}

#[tokio::test]
async fn null_list_decodes_as_empty_page() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/robots"))
        .and(query_param("owner", "ops"))
        .respond_with(ok(json!({"list": null, "total": 0})))
        .mount(&h.server)
        .await;

    let filter = RobotQuery {
        owner: Some("ops".into()),
        ..Default::default()
    };
    let page = RobotService::new(h.gateway.clone())
        .list(PageQuery::default(), &filter)
        .await?;
    assert!(page.is_empty());
    Ok(())
}

#[tokio::test]
async fn role_permissions_round_trip_through_the_api() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/admin/roles/permissions"))
        .and(query_param("role", "operator"))
        .respond_with(ok(json!({"list": ["/v1/robots,GET"]})))
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/admin/roles/permissions"))
        .and(body_json(json!({"role": "operator", "list": ["/v1/robots,GET", "/v1/robots,POST"]})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;

    let roles = RoleService::new(h.gateway.clone());
    let mut granted = roles.permissions("operator").await?.list;
    assert_eq!(granted, vec!["/v1/robots,GET".to_string()]);

    granted.push("/v1/robots,POST".into());
    roles.set_permissions("operator", granted).await?;
    Ok(())
}

#[tokio::test]
async fn dynamic_menu_is_nested() -> Result<()> {
    let h = common::logged_in().await?;

    Mock::given(method("GET"))
        .and(path("/v1/users/menu"))
        .respond_with(ok(json!({
            "list": [{
                "id": 1, "path": "/admin", "name": "admin", "access": "canAdmin",
                "children": [{"id": 2, "parentId": 1, "path": "/admin/user", "name": "user"}]
            }]
        })))
        .mount(&h.server)
        .await;

    let menu = AuthService::new(h.gateway.clone()).menu().await?;
    let root = &menu.list[0];
    assert_eq!(root.menu.access.as_deref(), Some("canAdmin"));
    assert_eq!(root.children[0].menu.path, "/admin/user");
    Ok(())
}
