use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::cart},
    cart::{CartApi, RawCartItem},
    error::{Error, Result},
};

#[derive(Deserialize)]
struct CartData {
    cart: Option<CartBody>,
}

#[derive(Deserialize)]
struct CartBody {
    items: Option<Vec<RawCartItem>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItem<'a> {
    medicine_id: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct SetQuantity {
    quantity: u32,
}

#[derive(Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartApi for CartService {
    async fn cart_items(&self) -> Result<Vec<RawCartItem>> {
        let reply: Reply<CartData> = self.api.get(cart::ITEMS).await?;

        reply
            .into_data()?
            .cart
            .and_then(|body| body.items)
            .ok_or(Error::MissingData)
    }

    async fn add_item(&self, medicine_id: &str, quantity: u32) -> Result<Reply<Value>> {
        let body = AddItem {
            medicine_id,
            quantity,
        };

        self.api
            .send_json(Method::POST, cart::ADD, &body)
            .await
    }

    async fn update_item(&self, id: &str, quantity: u32) -> Result<Reply<Value>> {
        self.api
            .send_json(Method::PUT, &cart::item(id), &SetQuantity { quantity })
            .await
    }

    async fn remove_item(&self, id: &str) -> Result<Reply<Value>> {
        self.api.delete(&cart::item(id)).await
    }

    async fn clear(&self) -> Result<Reply<Value>> {
        self.api.delete(cart::CLEAR).await
    }
}
