//! Backend paths, relative to the backend (or auth service) base url.

pub mod auth {
    pub const ME: &str = "/api/auth/me";
    pub const SESSION: &str = "/get-session";
    pub const UPDATE_PROFILE: &str = "/api/auth/update";
}

pub mod medicines {
    pub const ALL: &str = "/api/medicines";
    pub const FEATURED: &str = "/api/medicines/isFeatured";
    pub const POPULAR: &str = "/api/medicines/topViewed-medicine";
    pub const CREATE: &str = "/api/seller/medicines";

    pub fn by_id(id: &str) -> String {
        format!("/api/medicines/{id}")
    }
}

pub mod category {
    pub const ALL: &str = "/api/category";
    pub const CREATE: &str = "/api/category";

    pub fn medicines(id: &str) -> String {
        format!("/api/medicines/category/{id}")
    }
}

pub mod orders {
    pub const CUSTOMER_STATS: &str = "/api/orders/customerOrderStats";
    pub const RECENT: &str = "/api/orders/recent";
    pub const ALL: &str = "/api/orders";
    pub const CREATE: &str = "/api/orders";

    pub fn by_id(id: &str) -> String {
        format!("/api/orders/{id}")
    }

    pub fn cancel(id: &str) -> String {
        format!("/api/orders/cancel/{id}")
    }
}

pub mod cart {
    pub const ITEMS: &str = "/api/cart";
    pub const ADD: &str = "/api/cart/add";
    pub const CLEAR: &str = "/api/cart/clear";

    pub fn item(id: &str) -> String {
        format!("/api/cart/item/{id}")
    }
}

pub mod reviews {
    pub const POST: &str = "/api/reviews";
}

pub mod seller {
    pub const STATS: &str = "/api/seller/statistics";
    pub const MEDICINES: &str = "/api/seller/medicines";
    pub const ORDERS: &str = "/api/seller/orders";

    pub fn medicine(id: &str) -> String {
        format!("/api/seller/medicines/{id}")
    }

    pub fn order(id: &str) -> String {
        format!("/api/seller/orders/{id}")
    }
}

pub mod admin {
    pub const STATS: &str = "/api/admin/getAllTableStats";
    pub const USERS: &str = "/api/admin/users";

    pub fn user(id: &str) -> String {
        format!("/api/admin/users/{id}")
    }
}
