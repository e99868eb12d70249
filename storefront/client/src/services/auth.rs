use reqwest::Method;
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::auth},
    error::{Error, Result},
    models::{ProfileUpdate, Session, UserInfo},
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `None` when the caller has no live session.
    pub async fn session(&self) -> Result<Option<Session>> {
        self.api.get_session().await
    }

    pub async fn me(&self) -> Result<UserInfo> {
        self.api.get::<UserInfo>(auth::ME).await?.into_data()
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Reply<Value>> {
        if update.name.is_none() && update.phone.is_none() {
            return Err(Error::Validation("Nothing to update".to_string()));
        }

        self.api
            .send_json(Method::PATCH, auth::UPDATE_PROFILE, update)
            .await
    }
}
