use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Uri},
};
use medica_client::{
    CartItem, OrderSummary, Role,
    cart::CartApi,
    models::{CustomerStats, OrderList, RecentOrder, UserInfo},
};
use serde::Serialize;
use serde_json::Value;

use crate::{error::AppError, state::AppState, utils::guarded};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDashboard {
    pub stats: CustomerStats,
    pub recent_orders: Vec<RecentOrder>,
}

#[derive(Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
}

impl CartView {
    pub fn new(items: Vec<CartItem>) -> Self {
        let summary = OrderSummary::from_items(&items);

        Self { items, summary }
    }
}

pub async fn admin_dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<Value>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Admin]).await?;

    Ok(Json(services.admin.stats().await?))
}

pub async fn admin_users_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Admin]).await?;

    Ok(Json(services.admin.users().await?))
}

/// The orders endpoint scopes by role, so an admin cookie sees every order.
pub async fn admin_orders_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<OrderList>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Admin]).await?;

    Ok(Json(services.orders.list().await?))
}

pub async fn seller_dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<Value>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Seller]).await?;

    Ok(Json(services.seller.stats().await?))
}

pub async fn seller_orders_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<OrderList>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Seller]).await?;

    Ok(Json(services.seller.orders(Default::default()).await?))
}

pub async fn customer_dashboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<CustomerDashboard>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Customer]).await?;

    let (stats, recent_orders) =
        tokio::try_join!(services.orders.customer_stats(), services.orders.recent())?;

    Ok(Json(CustomerDashboard {
        stats,
        recent_orders,
    }))
}

pub async fn cart_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<CartView>, AppError> {
    let services = guarded(&state, &headers, uri.path(), &[Role::Customer]).await?;

    let items = services
        .cart
        .cart_items()
        .await?
        .into_iter()
        .map(CartItem::from)
        .collect();

    Ok(Json(CartView::new(items)))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
