//! # Cart
//!
//! Local mirror of the caller's server-side cart.
//!
//! ## Lines
//! - Unique by line `id`, not by medicine. The backend decides whether adding a
//!   medicine twice merges quantities or opens a new line
//! - A quantity of zero or less never survives, the line is removed instead
//!
//! ## Mutations
//! 1. Wait for the mutation gate (FIFO, one mutation at a time)
//! 2. Snapshot the current lines
//! 3. Apply the change locally so readers see it immediately
//! 4. Confirm against the backend
//! 5. On failure, or a reply without data, put the snapshot back
//!
//! Adding is the exception: the backend is asked first and the whole cart is
//! fetched again afterwards.
//!
//! ## Totals
//! Never stored. `subtotal` and `total_items` walk the lines on every read.
use std::{
    str::FromStr,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use crate::{
    api::Reply,
    checkout::OrderSummary,
    error::{Error, Result},
};

pub const UNKNOWN_MEDICINE: &str = "Unknown Medicine";

const NOTICE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub medicine_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
}

impl CartItem {
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Cart line as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartItem {
    pub id: String,
    pub medicine_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub medicine: Option<RawCartMedicine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartMedicine {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    pub thumbnail: Option<String>,
    pub stocks: Option<i64>,
    pub is_active: Option<bool>,
    pub category: Option<RawCartCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCartCategory {
    pub name: Option<String>,
}

/// Prices arrive as decimal strings; anything unreadable counts as absent.
fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    })
}

impl From<RawCartItem> for CartItem {
    fn from(raw: RawCartItem) -> Self {
        let medicine = raw.medicine.unwrap_or_default();

        CartItem {
            id: raw.id,
            medicine_id: raw.medicine_id,
            name: medicine
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_MEDICINE.to_string()),
            price: medicine.price.unwrap_or(Decimal::ZERO),
            quantity: raw.quantity,
            image: medicine.thumbnail,
            category: medicine.category.and_then(|c| c.name),
            in_stock: medicine.stocks.unwrap_or(0) > 0 && medicine.is_active.unwrap_or(false),
        }
    }
}

pub fn total_items(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

pub fn subtotal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// A local change to the cart, applied before the backend confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<'a> {
    SetQuantity { id: &'a str, quantity: u32 },
    Remove { id: &'a str },
    Clear,
}

impl Mutation<'_> {
    pub fn apply(&self, items: &[CartItem]) -> Vec<CartItem> {
        match *self {
            Mutation::SetQuantity { id, quantity } => items
                .iter()
                .map(|item| {
                    if item.id == id {
                        CartItem {
                            quantity,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
            Mutation::Remove { id } => items.iter().filter(|item| item.id != id).cloned().collect(),
            Mutation::Clear => Vec::new(),
        }
    }

    fn success_text(&self) -> &'static str {
        match self {
            Mutation::SetQuantity { .. } => "Cart updated",
            Mutation::Remove { .. } => "Item removed from cart",
            Mutation::Clear => "Cart cleared",
        }
    }

    fn failure_text(&self) -> &'static str {
        match self {
            Mutation::SetQuantity { .. } => "Failed to update cart",
            Mutation::Remove { .. } => "Failed to remove item",
            Mutation::Clear => "Failed to clear cart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

#[async_trait]
pub trait CartApi: Send + Sync {
    async fn cart_items(&self) -> Result<Vec<RawCartItem>>;

    async fn add_item(&self, medicine_id: &str, quantity: u32) -> Result<Reply<Value>>;

    async fn update_item(&self, id: &str, quantity: u32) -> Result<Reply<Value>>;

    async fn remove_item(&self, id: &str) -> Result<Reply<Value>>;

    async fn clear(&self) -> Result<Reply<Value>>;
}

/// A confirmation only counts when the backend sent data back.
fn confirmed(reply: Reply<Value>) -> Result<Option<String>> {
    let message = reply.message.clone().filter(|m| !m.is_empty());
    reply.into_data()?;

    Ok(message)
}

pub struct CartStore {
    api: Arc<dyn CartApi>,
    items: RwLock<Vec<CartItem>>,
    initial_loading: AtomicBool,
    loading: AtomicBool,
    gate: Mutex<()>,
    notices: broadcast::Sender<Notice>,
}

impl CartStore {
    pub fn new(api: Arc<dyn CartApi>) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            api,
            items: RwLock::new(Vec::new()),
            initial_loading: AtomicBool::new(true),
            loading: AtomicBool::new(false),
            gate: Mutex::new(()),
            notices,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn total_items(&self) -> u64 {
        total_items(&self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn subtotal(&self) -> Decimal {
        subtotal(&self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_items(&self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// True until the first fetch has finished, whatever its outcome.
    pub fn is_initial_loading(&self) -> bool {
        self.initial_loading.load(Ordering::Acquire)
    }

    /// True while a refresh after the first load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn replace(&self, items: Vec<CartItem>) {
        *self.items.write().unwrap_or_else(PoisonError::into_inner) = items;
    }

    fn notify(&self, notice: Notice) {
        // Nobody listening is fine.
        let _ = self.notices.send(notice);
    }

    pub async fn fetch_cart_items(&self) {
        let _gate = self.gate.lock().await;

        self.sync().await;
    }

    pub async fn refresh_cart(&self) {
        self.fetch_cart_items().await;
    }

    /// Fetch while already holding the gate.
    async fn sync(&self) {
        if !self.is_initial_loading() {
            self.loading.store(true, Ordering::Release);
        }

        match self.api.cart_items().await {
            Ok(raw) => {
                let items: Vec<CartItem> = raw.into_iter().map(CartItem::from).collect();
                debug!("Fetched {} cart lines", items.len());
                self.replace(items);
            }
            Err(e) => {
                warn!("Failed to fetch cart items: {e:?}");
                self.replace(Vec::new());
            }
        }

        self.loading.store(false, Ordering::Release);
        self.initial_loading.store(false, Ordering::Release);
    }

    pub async fn add_to_cart(&self, medicine_id: &str, quantity: u32) -> Result<()> {
        let _gate = self.gate.lock().await;

        let outcome = self
            .api
            .add_item(medicine_id, quantity)
            .await
            .and_then(confirmed);

        match outcome {
            Ok(message) => {
                info!("Added {quantity} x {medicine_id} to cart");
                self.notify(Notice::Success(
                    message.unwrap_or_else(|| "Item added to cart".to_string()),
                ));
                self.sync().await;

                Ok(())
            }
            Err(e) => {
                warn!("Add to cart failed for {medicine_id}: {e:?}");
                self.notify(Notice::Failure(e.user_message("Failed to add item to cart")));

                Err(e)
            }
        }
    }

    pub async fn update_quantity(&self, id: &str, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return self.remove_item(id).await;
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| Error::Validation(format!("Quantity {quantity} is too large")))?;

        self.commit(Mutation::SetQuantity { id, quantity }).await
    }

    pub async fn remove_item(&self, id: &str) -> Result<()> {
        self.commit(Mutation::Remove { id }).await
    }

    pub async fn clear_cart(&self) -> Result<()> {
        self.commit(Mutation::Clear).await
    }

    /// Drops the local lines without telling the backend.
    pub fn reset(&self) {
        self.replace(Vec::new());
    }

    async fn commit(&self, mutation: Mutation<'_>) -> Result<()> {
        let _gate = self.gate.lock().await;

        let snapshot = self.items();
        self.replace(mutation.apply(&snapshot));

        let outcome = match mutation {
            Mutation::SetQuantity { id, quantity } => self.api.update_item(id, quantity).await,
            Mutation::Remove { id } => self.api.remove_item(id).await,
            Mutation::Clear => self.api.clear().await,
        }
        .and_then(confirmed);

        match outcome {
            Ok(_) => {
                self.notify(Notice::Success(mutation.success_text().to_string()));

                Ok(())
            }
            Err(e) => {
                warn!("Rolling back {mutation:?}: {e:?}");
                self.replace(snapshot);
                self.notify(Notice::Failure(e.user_message(mutation.failure_text())));

                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex as StdMutex;

    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;

    pub fn raw(id: &str, medicine_id: &str, price: &str, quantity: u32) -> RawCartItem {
        serde_json::from_value(json!({
            "id": id,
            "medicineId": medicine_id,
            "quantity": quantity,
            "medicine": {
                "name": format!("Medicine {medicine_id}"),
                "price": price,
                "stocks": 10,
                "isActive": true,
                "category": { "name": "Pain" }
            }
        }))
        .unwrap()
    }

    fn ok_reply() -> Result<Reply<Value>> {
        Ok(Reply {
            message: Some("ok".to_string()),
            data: Some(json!({})),
        })
    }

    /// In-memory backend. Failing calls still burn a `yield_now` so
    /// overlapping mutations really interleave.
    #[derive(Default)]
    pub struct FakeCart {
        pub lines: StdMutex<Vec<RawCartItem>>,
        pub fail_fetch: AtomicBool,
        pub fail_mutations: AtomicBool,
        pub empty_replies: AtomicBool,
        pub fail_next_update: AtomicBool,
        next_id: StdMutex<u32>,
    }

    impl FakeCart {
        pub fn with_lines(lines: Vec<RawCartItem>) -> Arc<Self> {
            Arc::new(Self {
                lines: StdMutex::new(lines),
                ..Default::default()
            })
        }

        fn mutation_result(&self) -> Option<Result<Reply<Value>>> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Some(Err(Error::backend(Some("Cart service unavailable".to_string()))));
            }
            if self.empty_replies.load(Ordering::SeqCst) {
                return Some(Ok(Reply {
                    message: None,
                    data: None,
                }));
            }

            None
        }
    }

    #[async_trait]
    impl CartApi for FakeCart {
        async fn cart_items(&self) -> Result<Vec<RawCartItem>> {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(Error::Transport("connection reset".to_string()));
            }

            Ok(self.lines.lock().unwrap().clone())
        }

        async fn add_item(&self, medicine_id: &str, quantity: u32) -> Result<Reply<Value>> {
            if let Some(result) = self.mutation_result() {
                return result;
            }

            let mut lines = self.lines.lock().unwrap();
            match lines.iter_mut().find(|line| line.medicine_id == medicine_id) {
                Some(line) => line.quantity += quantity,
                None => {
                    let mut next_id = self.next_id.lock().unwrap();
                    *next_id += 1;
                    lines.push(raw(&format!("new-{next_id}"), medicine_id, "10.00", quantity));
                }
            }

            ok_reply()
        }

        async fn update_item(&self, id: &str, quantity: u32) -> Result<Reply<Value>> {
            tokio::task::yield_now().await;

            if self.fail_next_update.swap(false, Ordering::SeqCst) {
                return Err(Error::Transport("timeout".to_string()));
            }
            if let Some(result) = self.mutation_result() {
                return result;
            }

            let mut lines = self.lines.lock().unwrap();
            if let Some(line) = lines.iter_mut().find(|line| line.id == id) {
                line.quantity = quantity;
            }

            ok_reply()
        }

        async fn remove_item(&self, id: &str) -> Result<Reply<Value>> {
            if let Some(result) = self.mutation_result() {
                return result;
            }

            self.lines.lock().unwrap().retain(|line| line.id != id);

            ok_reply()
        }

        async fn clear(&self) -> Result<Reply<Value>> {
            if let Some(result) = self.mutation_result() {
                return result;
            }

            self.lines.lock().unwrap().clear();

            ok_reply()
        }
    }

    async fn loaded_store(fake: &Arc<FakeCart>) -> CartStore {
        let store = CartStore::new(fake.clone());
        store.fetch_cart_items().await;
        store
    }

    #[test]
    fn test_transform_defaults() {
        let item: CartItem = serde_json::from_value::<RawCartItem>(json!({
            "id": "c1",
            "medicineId": "m1",
            "quantity": 1
        }))
        .unwrap()
        .into();

        assert_eq!(item.name, UNKNOWN_MEDICINE);
        assert_eq!(item.price, Decimal::ZERO);
        assert!(!item.in_stock);
        assert!(item.category.is_none());

        let blank: CartItem = serde_json::from_value::<RawCartItem>(json!({
            "id": "c2",
            "medicineId": "m2",
            "quantity": 1,
            "medicine": { "name": "", "price": "3.00" }
        }))
        .unwrap()
        .into();

        assert_eq!(blank.name, UNKNOWN_MEDICINE);
        assert_eq!(blank.price, dec!(3.00));
    }

    #[test]
    fn test_transform_stock_and_price() {
        let item: CartItem = serde_json::from_value::<RawCartItem>(json!({
            "id": "c1",
            "medicineId": "m1",
            "quantity": 2,
            "medicine": {
                "name": "Napa Extra",
                "price": "12.50",
                "thumbnail": "https://cdn.medica.test/napa.png",
                "stocks": 0,
                "isActive": true,
                "category": { "name": "Pain" }
            }
        }))
        .unwrap()
        .into();

        assert_eq!(item.price, dec!(12.50));
        assert_eq!(item.line_total(), dec!(25.00));
        assert!(!item.in_stock);
        assert_eq!(item.category.as_deref(), Some("Pain"));
        assert_eq!(item.image.as_deref(), Some("https://cdn.medica.test/napa.png"));

        let unreadable: RawCartMedicine = serde_json::from_value(json!({ "price": "n/a" })).unwrap();
        assert!(unreadable.price.is_none());
    }

    #[test]
    fn test_mutation_apply_is_pure() {
        let items: Vec<CartItem> = vec![raw("a", "m1", "1.00", 1).into(), raw("b", "m2", "2.00", 3).into()];

        let updated = Mutation::SetQuantity { id: "b", quantity: 5 }.apply(&items);
        assert_eq!(updated[1].quantity, 5);
        assert_eq!(items[1].quantity, 3);

        let removed = Mutation::Remove { id: "a" }.apply(&items);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "b");

        assert!(Mutation::Clear.apply(&items).is_empty());
        assert_eq!(Mutation::Remove { id: "missing" }.apply(&items), items);
    }

    #[tokio::test]
    async fn test_fetch_tracks_initial_load() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 2)]);
        let store = CartStore::new(fake.clone());

        assert!(store.is_initial_loading());
        store.fetch_cart_items().await;

        assert!(!store.is_initial_loading());
        assert!(!store.is_loading());
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.subtotal(), dec!(25.00));
    }

    #[tokio::test]
    async fn test_fetch_failure_empties_cart() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 2)]);
        let store = loaded_store(&fake).await;

        fake.fail_fetch.store(true, Ordering::SeqCst);
        store.refresh_cart().await;

        assert!(store.is_empty());
        assert_eq!(store.subtotal(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_add_resyncs_from_backend() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 1)]);
        let store = loaded_store(&fake).await;
        let mut notices = store.subscribe();

        store.add_to_cart("m1", 2).await.unwrap();
        store.add_to_cart("m9", 1).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[1].medicine_id, "m9");
        assert_eq!(notices.recv().await.unwrap(), Notice::Success("ok".to_string()));
    }

    #[tokio::test]
    async fn test_add_failure_leaves_cart_and_surfaces_message() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 1)]);
        let store = loaded_store(&fake).await;
        let before = store.items();
        let mut notices = store.subscribe();

        fake.fail_mutations.store(true, Ordering::SeqCst);
        let err = store.add_to_cart("m2", 1).await.unwrap_err();

        assert_eq!(err.to_string(), "Cart service unavailable");
        assert_eq!(store.items(), before);
        assert_eq!(
            notices.recv().await.unwrap(),
            Notice::Failure("Cart service unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_to_zero_removes() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 2), raw("b", "m2", "3.00", 1)]);
        let store = loaded_store(&fake).await;

        store.update_quantity("a", 0).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
        assert_eq!(fake.lines.lock().unwrap().len(), 1);

        store.update_quantity("b", -4).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_rolls_back() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 2)]);
        let store = loaded_store(&fake).await;
        let before = store.items();
        let mut notices = store.subscribe();

        fake.fail_next_update.store(true, Ordering::SeqCst);
        let err = store.update_quantity("a", 7).await.unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(store.items(), before);
        assert_eq!(
            notices.recv().await.unwrap(),
            Notice::Failure("Something went wrong".to_string())
        );
    }

    #[tokio::test]
    async fn test_reply_without_data_rolls_back() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "12.50", 2)]);
        let store = loaded_store(&fake).await;
        let before = store.items();

        fake.empty_replies.store(true, Ordering::SeqCst);

        assert!(matches!(store.remove_item("a").await, Err(Error::MissingData)));
        assert_eq!(store.items(), before);
    }

    #[tokio::test]
    async fn test_clear_failure_restores_exact_list() {
        let fake = FakeCart::with_lines(vec![
            raw("a", "m1", "12.50", 2),
            raw("b", "m2", "3.00", 1),
            raw("c", "m3", "7.25", 4),
        ]);
        let store = loaded_store(&fake).await;
        let before = store.items();

        fake.fail_mutations.store(true, Ordering::SeqCst);
        store.clear_cart().await.unwrap_err();

        let after = store.items();
        assert_eq!(after, before);
        assert_eq!(
            after.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[tokio::test]
    async fn test_overlapping_updates_apply_in_order() {
        let fake = FakeCart::with_lines(vec![raw("a", "m1", "1.00", 1)]);
        let store = loaded_store(&fake).await;

        fake.fail_next_update.store(true, Ordering::SeqCst);
        let (first, second) = tokio::join!(store.update_quantity("a", 5), store.update_quantity("a", 9));

        assert!(first.is_err());
        assert!(second.is_ok());
        assert_eq!(store.items()[0].quantity, 9);
        assert_eq!(fake.lines.lock().unwrap()[0].quantity, 9);
    }

    #[tokio::test]
    async fn test_huge_quantities_saturate() {
        let fake = FakeCart::with_lines(vec![
            raw("a", "m1", "1.00", 1),
            raw("b", "m2", "79228162514264337593543950335", 1),
        ]);
        let store = loaded_store(&fake).await;

        store.update_quantity("a", 3_000_000_000).await.unwrap();
        store.update_quantity("b", 3_000_000_000).await.unwrap();

        assert_eq!(store.total_items(), 6_000_000_000);
        assert_eq!(store.items()[1].line_total(), Decimal::MAX);
        assert_eq!(store.subtotal(), Decimal::MAX);

        let summary = store.summary();
        assert_eq!(summary.item_count, 6_000_000_000);
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::MAX);
    }

    /// Holds every fetch until released, so flags can be read mid-flight.
    #[derive(Default)]
    struct SlowCart {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CartApi for SlowCart {
        async fn cart_items(&self) -> Result<Vec<RawCartItem>> {
            self.started.notify_one();
            self.release.notified().await;

            Ok(vec![raw("a", "m1", "1.00", 1)])
        }

        async fn add_item(&self, _medicine_id: &str, _quantity: u32) -> Result<Reply<Value>> {
            ok_reply()
        }

        async fn update_item(&self, _id: &str, _quantity: u32) -> Result<Reply<Value>> {
            ok_reply()
        }

        async fn remove_item(&self, _id: &str) -> Result<Reply<Value>> {
            ok_reply()
        }

        async fn clear(&self) -> Result<Reply<Value>> {
            ok_reply()
        }
    }

    #[tokio::test]
    async fn test_loading_flag_only_on_refresh() {
        let fake = Arc::new(SlowCart::default());
        let store = Arc::new(CartStore::new(fake.clone()));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_cart_items().await }
        });
        fake.started.notified().await;

        assert!(store.is_initial_loading());
        assert!(!store.is_loading());

        fake.release.notify_one();
        first.await.unwrap();
        assert!(!store.is_initial_loading());

        let refresh = tokio::spawn({
            let store = store.clone();
            async move { store.refresh_cart().await }
        });
        fake.started.notified().await;

        assert!(store.is_loading());
        assert!(!store.is_initial_loading());
        assert_eq!(store.items().len(), 1);

        fake.release.notify_one();
        refresh.await.unwrap();
        assert!(!store.is_loading());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u32),
        Update(u8, i64),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..4, 1u32..5).prop_map(|(m, q)| Op::Add(m, q)),
            (0u8..4, -1i64..6).prop_map(|(i, q)| Op::Update(i, q)),
            (0u8..4).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn subtotal_matches_lines_after_successful_ops(ops in proptest::collection::vec(op(), 0..12)) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

            runtime.block_on(async {
                let fake = FakeCart::with_lines(vec![raw("a", "m0", "4.20", 1)]);
                let store = loaded_store(&fake).await;

                for op in ops {
                    let ids: Vec<String> = store.items().into_iter().map(|i| i.id).collect();
                    let pick = |n: u8| ids.get(n as usize % ids.len().max(1)).cloned();

                    match op {
                        Op::Add(m, q) => store.add_to_cart(&format!("m{m}"), q).await.unwrap(),
                        Op::Update(i, q) => {
                            if let Some(id) = pick(i) {
                                store.update_quantity(&id, q).await.unwrap();
                            }
                        }
                        Op::Remove(i) => {
                            if let Some(id) = pick(i) {
                                store.remove_item(&id).await.unwrap();
                            }
                        }
                    }
                }

                let items = store.items();
                let expected: Decimal = items.iter().map(|i| i.price * Decimal::from(i.quantity)).sum();

                prop_assert_eq!(store.subtotal(), expected);
                prop_assert!(items.iter().all(|i| i.quantity >= 1));
                prop_assert_eq!(store.total_items(), items.iter().map(|i| u64::from(i.quantity)).sum::<u64>());

                Ok(())
            })?;
        }
    }
}
