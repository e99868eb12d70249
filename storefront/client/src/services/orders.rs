use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{ApiClient, Reply, endpoints::orders},
    checkout::OrderApi,
    error::Result,
    models::{CreatedOrder, CustomerStats, Order, OrderList, OrderRequest, OrderStatus, RecentOrder},
};

#[derive(Serialize)]
struct StatusChange {
    status: OrderStatus,
}

#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn customer_stats(&self) -> Result<CustomerStats> {
        self.api
            .get::<CustomerStats>(orders::CUSTOMER_STATS)
            .await?
            .into_data()
    }

    pub async fn recent(&self) -> Result<Vec<RecentOrder>> {
        self.api
            .get::<Vec<RecentOrder>>(orders::RECENT)
            .await?
            .into_data()
    }

    pub async fn list(&self) -> Result<OrderList> {
        self.api.get::<OrderList>(orders::ALL).await?.into_data()
    }

    pub async fn by_id(&self, id: &str) -> Result<Order> {
        self.api.get::<Order>(&orders::by_id(id)).await?.into_data()
    }

    pub async fn cancel(&self, id: &str) -> Result<Reply<Value>> {
        let body = StatusChange {
            status: OrderStatus::Cancelled,
        };

        self.api
            .send_json(Method::PATCH, &orders::cancel(id), &body)
            .await
    }
}

#[async_trait]
impl OrderApi for OrderService {
    async fn create_order(&self, request: &OrderRequest) -> Result<Vec<CreatedOrder>> {
        self.api
            .send_json::<Vec<CreatedOrder>, _>(Method::POST, orders::CREATE, request)
            .await?
            .into_data()
    }
}
