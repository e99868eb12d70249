use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::seller},
    error::{Error, Result},
    models::{MedicinePage, MedicineUpdate, OrderList, OrderStatus, PageQuery},
};

const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub(crate) fn validate_listing(name: &str, description: &str, price: Decimal, manufacturer: &str) -> Result<()> {
    let rules = [
        (name.trim().chars().count() >= 2, "Name must be at least 2 characters"),
        (
            description.trim().chars().count() >= 10,
            "Description must be at least 10 characters",
        ),
        (price >= MIN_PRICE, "Price must be greater than 0"),
        (
            manufacturer.trim().chars().count() >= 2,
            "Manufacturer must be at least 2 characters",
        ),
    ];

    match rules.into_iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err(Error::Validation(message.to_string())),
        None => Ok(()),
    }
}

pub fn validate_update(update: &MedicineUpdate) -> Result<()> {
    validate_listing(&update.name, &update.description, update.price, &update.manufacturer)
}

#[derive(Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Clone)]
pub struct SellerService {
    api: ApiClient,
}

impl SellerService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Shape is owned by the backend and passed through untouched.
    pub async fn stats(&self) -> Result<Value> {
        self.api.get::<Value>(seller::STATS).await?.into_data()
    }

    pub async fn medicines(&self, page: PageQuery) -> Result<MedicinePage> {
        self.api
            .get_with_query::<MedicinePage, _>(seller::MEDICINES, &page)
            .await?
            .into_data()
    }

    pub async fn orders(&self, page: PageQuery) -> Result<OrderList> {
        self.api
            .get_with_query::<OrderList, _>(seller::ORDERS, &page)
            .await?
            .into_data()
    }

    pub async fn update_medicine(&self, id: &str, update: &MedicineUpdate) -> Result<Reply<Value>> {
        validate_update(update)?;

        self.api
            .send_json(Method::PUT, &seller::medicine(id), update)
            .await
    }

    pub async fn delete_medicine(&self, id: &str) -> Result<Reply<Value>> {
        self.api.delete(&seller::medicine(id)).await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Reply<Value>> {
        self.api
            .send_json(Method::PATCH, &seller::order(id), &StatusChange { status })
            .await
    }
}
