use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::guard::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    #[serde(default)]
    pub session: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "ACTIVE"),
            UserStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub role: Role,
    pub phone: Option<String>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub stocks: i64,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub manufacturer: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub views: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Option<CategoryRef>,
    pub seller: Option<PersonRef>,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub average_rating: f64,
}

impl Medicine {
    pub fn in_stock(&self) -> bool {
        self.stocks > 0 && self.is_active
    }
}

/// Shop filters; unset fields never reach the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total: u64,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub total_pages: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicinePage {
    #[serde(rename = "response")]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stocks: u32,
    pub manufacturer: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineUpdate {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stocks: u32,
    pub manufacturer: String,
    pub is_featured: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderMedicine {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub medicine_id: String,
    pub quantity: u32,
    pub price: Decimal,
    pub medicine: Option<OrderMedicine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Vec<OrderLine>,
    pub customer: Option<PersonRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderList {
    #[serde(rename = "result")]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub medicine_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
}

/// Reply to order creation: one entry per created order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedOrder {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub total_spent: Decimal,
    pub total_order_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderMedicine {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_count: u32,
    #[serde(default)]
    pub medicines: Vec<RecentOrderMedicine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub medicine_id: String,
    pub rating: u8,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_medicine_from_listing() {
        let medicine: Medicine = serde_json::from_value(json!({
            "id": "m1",
            "name": "Paracetamol 500mg",
            "description": "Pain relief",
            "price": 4.5,
            "stocks": 0,
            "thumbnail": null,
            "manufacturer": "Square",
            "isActive": true,
            "isFeatured": false,
            "views": 12,
            "createdAt": "2026-01-05T10:00:00.000Z",
            "updatedAt": "2026-01-05T10:00:00.000Z",
            "category": { "id": "c1", "name": "Pain" },
            "seller": { "id": "s1", "name": "Pharma", "email": "s@medica.test" },
            "reviewCount": 3,
            "averageRating": 4.3
        }))
        .unwrap();

        assert_eq!(medicine.price, dec!(4.5));
        assert!(!medicine.in_stock());
        assert_eq!(medicine.category.unwrap().name, "Pain");
    }

    #[test]
    fn test_query_skips_blank_fields() {
        let query = MedicineQuery {
            search: Some("  ".to_string()),
            is_active: Some(true),
            limit: Some(12),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "isActive": true, "limit": 12, "sortOrder": "desc" })
        );
    }

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            order_items: vec![OrderItemRequest {
                medicine_id: "m1".to_string(),
                quantity: 2,
            }],
            shipping_address: "221B Baker Street, London".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "orderItems": [{ "medicineId": "m1", "quantity": 2 }],
                "shippingAddress": "221B Baker Street, London",
                "paymentMethod": "COD"
            })
        );
    }

    #[test]
    fn test_order_with_string_amounts() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "userId": "u1",
            "totalAmount": "30.99",
            "paymentMethod": "COD",
            "status": "SHIPPED",
            "shippingAddress": "221B Baker Street, London",
            "createdAt": "2026-01-05T10:00:00.000Z",
            "updatedAt": "2026-01-06T10:00:00.000Z",
            "orderItems": [{
                "id": "l1",
                "orderId": "o1",
                "medicineId": "m1",
                "quantity": 2,
                "price": "12.50",
                "medicine": { "id": "m1", "name": "Paracetamol", "price": "12.50" }
            }]
        }))
        .unwrap();

        assert_eq!(order.total_amount, dec!(30.99));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.order_items[0].price, dec!(12.50));
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!("delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert!("processing".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_medicine_update_price_is_number() {
        let update = MedicineUpdate {
            name: "Ibuprofen".to_string(),
            description: "Anti-inflammatory".to_string(),
            price: dec!(7.25),
            stocks: 10,
            manufacturer: "Beximco".to_string(),
            is_featured: false,
            is_active: true,
        };

        assert_eq!(serde_json::to_value(&update).unwrap()["price"], json!(7.25));
    }
}
