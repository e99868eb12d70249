use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    guard::Role,
    models::{OrderStatus, PaymentMethod, UserStatus},
};

/// `2026-01-05T10:00:00Z` becomes `January 5, 2026`; anything unparsable is returned as is.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| long_date(&date.with_timezone(&Utc)))
        .unwrap_or_else(|_| raw.to_string())
}

pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn initials(name: Option<&str>) -> String {
    let initials: String = name
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("${rounded:.2}")
}

/// Badge palette shared by the dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Red,
    Gray,
}

pub fn order_status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Pending => Tone::Orange,
        OrderStatus::Shipped => Tone::Blue,
        OrderStatus::Delivered => Tone::Green,
        OrderStatus::Cancelled => Tone::Red,
        OrderStatus::Confirmed => Tone::Gray,
    }
}

pub fn user_status_tone(status: UserStatus) -> Tone {
    match status {
        UserStatus::Active => Tone::Green,
        UserStatus::Inactive => Tone::Red,
    }
}

pub fn role_tone(role: Role) -> Tone {
    match role {
        Role::Customer => Tone::Blue,
        Role::Admin => Tone::Purple,
        Role::Seller => Tone::Orange,
    }
}

pub fn payment_tone(method: PaymentMethod) -> Tone {
    match method {
        PaymentMethod::CashOnDelivery => Tone::Orange,
    }
}
