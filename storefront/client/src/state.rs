use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::{
    api::ApiClient,
    cart::CartStore,
    checkout::Checkout,
    config::Config,
    guard::{Access, Role, authorize},
    models::Session,
    services::Services,
};

/// Everything one storefront caller needs, built once and passed around.
pub struct Storefront {
    pub config: Config,
    pub api: ApiClient,
    pub services: Services,
    pub cart: Arc<CartStore>,
    pub checkout: Checkout,
    session: RwLock<Option<Session>>,
}

impl Storefront {
    /// Builds the services, then loads the session and the cart.
    pub async fn create(config: Config) -> Arc<Self> {
        let storefront = Self::detached(config);

        storefront.refresh().await;
        info!(
            "Storefront ready with {} cart items",
            storefront.cart.total_items()
        );

        Arc::new(storefront)
    }

    /// Same wiring as [`Storefront::create`], nothing fetched yet.
    pub fn detached(config: Config) -> Self {
        let api = ApiClient::new(&config);
        let services = Services::new(&api);

        let cart = Arc::new(CartStore::new(Arc::new(services.cart.clone())));
        let checkout = Checkout::new(cart.clone(), Arc::new(services.orders.clone()));

        Self {
            config,
            api,
            services,
            cart,
            checkout,
            session: RwLock::new(None),
        }
    }

    /// A session lookup that fails counts as no session.
    pub async fn refresh(&self) {
        let session = self.services.auth.session().await.unwrap_or_else(|e| {
            warn!("Session lookup failed: {e:?}");
            None
        });
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;

        self.cart.refresh_cart().await;
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs the page guard against the cached session.
    pub fn require(&self, allowed: &[Role]) -> Result<Session, &'static str> {
        let session = self.session();

        match authorize(session.as_ref(), allowed) {
            Access::Granted(session) => Ok(session.clone()),
            Access::Redirect(path) => Err(path),
        }
    }

    pub fn dispose(&self) {
        self.cart.reset();
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        info!("Storefront disposed");
    }
}
