use std::sync::Arc;

use crate::api::models::{Robot, RobotQuery, RobotRequest};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::types::{Page, PageQuery};

pub struct RobotService {
    gateway: Arc<Gateway>,
}

impl RobotService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: PageQuery, filter: &RobotQuery) -> Result<Page<Robot>, GatewayError> {
        let request = ApiRequest::get("/robots").query(&page)?.query(filter)?;
        self.gateway.send(request).await
    }

    pub async fn get(&self, id: u64) -> Result<Robot, GatewayError> {
        self.gateway.send(ApiRequest::get(format!("/robots/{}", id))).await
    }

    pub async fn create(&self, robot: &RobotRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post("/robots").json(robot)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update(&self, id: u64, robot: &RobotRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put(format!("/robots/{}", id)).json(robot)?;
        self.gateway.send_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway
            .send_unit(ApiRequest::delete(format!("/robots/{}", id)))
            .await
    }
}
