//! One thin service per backend area. Each wraps a cloned [`ApiClient`], so
//! they share the connection pool and the caller's cookie.
use crate::api::ApiClient;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod medicines;
pub mod orders;
pub mod reviews;
pub mod seller;

pub use admin::AdminService;
pub use auth::AuthService;
pub use cart::CartService;
pub use categories::CategoryService;
pub use medicines::MedicineService;
pub use orders::OrderService;
pub use reviews::ReviewService;
pub use seller::SellerService;

#[derive(Clone)]
pub struct Services {
    pub admin: AdminService,
    pub auth: AuthService,
    pub cart: CartService,
    pub categories: CategoryService,
    pub medicines: MedicineService,
    pub orders: OrderService,
    pub reviews: ReviewService,
    pub seller: SellerService,
}

impl Services {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            admin: AdminService::new(api.clone()),
            auth: AuthService::new(api.clone()),
            cart: CartService::new(api.clone()),
            categories: CategoryService::new(api.clone()),
            medicines: MedicineService::new(api.clone()),
            orders: OrderService::new(api.clone()),
            reviews: ReviewService::new(api.clone()),
            seller: SellerService::new(api.clone()),
        }
    }
}
