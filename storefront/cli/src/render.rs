use medica_client::{
    CartItem, Notice, OrderSummary, Role,
    format::{
        Tone, format_price, initials, long_date, order_status_tone, payment_tone, role_tone,
        user_status_tone,
    },
    models::{Category, Medicine, MedicinePage, Order, RecentOrder, Session, UserInfo},
};
use tokio::sync::broadcast::Receiver;

fn ansi(tone: Tone) -> &'static str {
    match tone {
        Tone::Green => "32",
        Tone::Blue => "34",
        Tone::Yellow => "33",
        Tone::Orange => "38;5;208",
        Tone::Purple => "35",
        Tone::Red => "31",
        Tone::Gray => "90",
    }
}

pub fn badge(tone: Tone, text: &str) -> String {
    format!("\x1b[{}m[{text}]\x1b[0m", ansi(tone))
}

pub fn medicine_row(medicine: &Medicine) -> String {
    let stock = if medicine.in_stock() {
        badge(Tone::Green, "in stock")
    } else {
        badge(Tone::Gray, "out of stock")
    };
    let category = medicine
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    format!(
        "{:<26} {:<28} {:>9}  {:<14} {stock}",
        medicine.id,
        medicine.name,
        format_price(medicine.price),
        category
    )
}

pub fn print_medicines(medicines: &[Medicine]) {
    if medicines.is_empty() {
        println!("No medicines found");
        return;
    }

    for medicine in medicines {
        println!("{}", medicine_row(medicine));
    }
}

pub fn print_page(page: &MedicinePage) {
    print_medicines(&page.medicines);

    let meta = &page.meta;
    match (meta.page, meta.total_pages) {
        (Some(page), Some(pages)) => println!("\nPage {page} of {pages}, {} total", meta.total),
        _ => println!("\n{} total", meta.total),
    }
}

pub fn print_medicine(medicine: &Medicine) {
    println!("{}", medicine.name);
    println!("  id            {}", medicine.id);
    println!("  price         {}", format_price(medicine.price));
    println!("  stock         {}", medicine.stocks);
    println!("  manufacturer  {}", medicine.manufacturer);
    if let Some(category) = &medicine.category {
        println!("  category      {}", category.name);
    }
    if let Some(seller) = &medicine.seller {
        println!("  seller        {}", seller.name);
    }
    println!(
        "  rating        {:.1} ({} reviews)",
        medicine.average_rating, medicine.review_count
    );
    if !medicine.description.is_empty() {
        println!("\n{}", medicine.description);
    }
}

pub fn print_categories(categories: &[Category]) {
    for category in categories {
        println!(
            "{:<26} {:<20} {}",
            category.id,
            category.name,
            category.description.as_deref().unwrap_or("")
        );
    }
}

pub fn cart_row(item: &CartItem) -> String {
    let name = if item.in_stock {
        item.name.clone()
    } else {
        format!("{} {}", item.name, badge(Tone::Red, "out of stock"))
    };

    format!(
        "{:<26} {name:<28} {:>3} x {:>9} = {:>9}",
        item.id,
        item.quantity,
        format_price(item.price),
        format_price(item.line_total())
    )
}

pub fn print_cart(items: &[CartItem], summary: &OrderSummary) {
    if items.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for item in items {
        println!("{}", cart_row(item));
    }
    print_summary(summary);
}

pub fn print_summary(summary: &OrderSummary) {
    let shipping = if summary.shipping.is_zero() {
        "Free".to_string()
    } else {
        format_price(summary.shipping)
    };

    println!();
    println!("  Items     {}", summary.item_count);
    println!("  Subtotal  {}", format_price(summary.subtotal));
    println!("  Shipping  {shipping}");
    println!("  Total     {}", format_price(summary.total));
}

pub fn order_row(order: &Order) -> String {
    format!(
        "{:<26} {:<20} {:>9}  {}",
        order.id,
        long_date(&order.created_at),
        format_price(order.total_amount),
        badge(order_status_tone(order.status), order.status.label())
    )
}

pub fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders yet");
        return;
    }

    for order in orders {
        println!("{}", order_row(order));
    }
}

pub fn print_order(order: &Order) {
    println!("{}", order_row(order));
    println!(
        "  payment   {}",
        badge(payment_tone(order.payment_method), "Cash on delivery")
    );
    println!("  ship to   {}", order.shipping_address);
    if let Some(customer) = &order.customer {
        println!("  customer  {} <{}>", customer.name, customer.email);
    }

    for line in &order.order_items {
        let name = line
            .medicine
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or(medica_client::cart::UNKNOWN_MEDICINE);

        println!("    {:>3} x {name:<28} {:>9}", line.quantity, format_price(line.price));
    }
}

pub fn print_recent(orders: &[RecentOrder]) {
    for order in orders {
        println!(
            "{:<26} {:<20} {:>2} items {:>9}  {}",
            order.id,
            long_date(&order.created_at),
            order.item_count,
            format_price(order.total_amount),
            badge(order_status_tone(order.status), order.status.label())
        );
    }
}

pub fn print_users(users: &[UserInfo]) {
    for user in users {
        println!(
            "{:<3} {:<26} {:<24} {:<28} {} {}",
            initials(Some(&user.name)),
            user.id,
            user.name,
            user.email,
            badge(role_tone(user.role), &user.role.to_string()),
            badge(user_status_tone(user.status), &user.status.to_string())
        );
    }
}

pub fn print_session(session: &Session) {
    let user = &session.user;
    let role: Role = user.role;

    println!("{}  {}", initials(Some(&user.name)), user.name);
    println!("  email  {}", user.email);
    println!("  role   {}", badge(role_tone(role), &role.to_string()));
    if let Some(status) = user.status {
        println!("  status {}", badge(user_status_tone(status), &status.to_string()));
    }
    println!("  home   {}", role.home());
}

/// Prints whatever the cart store announced since the receiver was taken.
pub fn drain_notices(notices: &mut Receiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        match notice {
            Notice::Success(text) => println!("{}", badge(Tone::Green, &text)),
            Notice::Failure(text) => eprintln!("{}", badge(Tone::Red, &text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use medica_client::models::OrderStatus;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn item(in_stock: bool) -> CartItem {
        CartItem {
            id: "c1".to_string(),
            medicine_id: "m1".to_string(),
            name: "Napa".to_string(),
            price: Decimal::new(1250, 2),
            quantity: 2,
            image: None,
            category: None,
            in_stock,
        }
    }

    #[test]
    fn test_badge() {
        assert_eq!(badge(Tone::Red, "x"), "\x1b[31m[x]\x1b[0m");
    }

    #[test]
    fn test_cart_row() {
        let row = cart_row(&item(true));

        assert!(row.contains("$12.50"));
        assert!(row.contains("$25.00"));
        assert!(!row.contains("out of stock"));
        assert!(cart_row(&item(false)).contains("out of stock"));
    }

    #[test]
    fn test_order_row() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "userId": "u1",
            "totalAmount": "30.99",
            "paymentMethod": "COD",
            "status": "SHIPPED",
            "shippingAddress": "House 12, Road 5",
            "createdAt": "2026-01-05T10:00:00.000Z",
            "updatedAt": "2026-01-05T10:00:00.000Z"
        }))
        .unwrap();

        let row = order_row(&order);

        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(row.contains("January 5, 2026"));
        assert!(row.contains("$30.99"));
        assert!(row.contains("[Shipped]"));
    }
}
