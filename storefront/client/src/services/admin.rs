use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::admin},
    error::Result,
    models::{UserInfo, UserStatus},
};

#[derive(Serialize)]
struct StatusChange {
    status: UserStatus,
}

#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Table counts for the admin dashboard, passed through untouched.
    pub async fn stats(&self) -> Result<Value> {
        self.api.get::<Value>(admin::STATS).await?.into_data()
    }

    pub async fn users(&self) -> Result<Vec<UserInfo>> {
        self.api.get::<Vec<UserInfo>>(admin::USERS).await?.into_data()
    }

    pub async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<Reply<Value>> {
        self.api
            .send_json(Method::PATCH, &admin::user(id), &StatusChange { status })
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<Reply<Value>> {
        self.api.delete(&admin::user(id)).await
    }
}
