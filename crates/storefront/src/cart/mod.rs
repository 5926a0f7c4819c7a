//! The cart store: single source of truth for cart line items.
//!
//! [`CartStore`] wraps the pure state machine from `bazaar_core::cart` with:
//!
//! - a `tokio::sync::watch` channel, so any number of passive displays
//!   (header badge, cart page) can subscribe to state changes;
//! - a background writer that persists the state after every mutation,
//!   fire-and-forget but strictly FIFO, so each write reflects the state
//!   immediately after the mutation that triggered it;
//! - an explicit hydration lifecycle (`Uninitialized` -> `Ready`): the
//!   persisted cart is loaded exactly once, and readers can await readiness
//!   instead of polling a flag. Reads before `Ready` are permitted but
//!   provisional (they may see an empty cart even if storage holds items).
//!
//! The store is explicitly constructed and passed by handle to consumers;
//! there is no global singleton. Cloning a `CartStore` is cheap and all
//! clones share the same state.
//!
//! Mutations never fail observably: absent-id mutations are no-ops, a
//! non-positive `update_quantity` is a removal, and `add_item` clamps a zero
//! quantity to one. Persistence failures are logged, not surfaced; losing the
//! cart degrades convenience, not catalog correctness.

pub mod storage;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use bazaar_core::cart::{CartAction, CartItem, CartState};
use bazaar_core::types::{Price, Product, ProductId};

pub use storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage, MemoryStorage, StorageError};

/// Hydration lifecycle of a [`CartStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Persisted state has not been loaded yet; reads are provisional.
    Uninitialized,
    /// Persisted state has been loaded (or found absent); reads are
    /// authoritative.
    Ready,
}

/// Result of completing checkout: the cart is emptied and the order is
/// acknowledged with a fresh ID and the charged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Generated order ID.
    pub order_id: Uuid,
    /// Cart total at the moment of checkout.
    pub total: Price,
}

/// The cart store.
///
/// Cheaply cloneable via `Arc`; all clones share one cart. Must be created
/// inside a tokio runtime (the persistence writer is a spawned task).
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: watch::Sender<CartState>,
    hydration: watch::Sender<Hydration>,
    persist: mpsc::UnboundedSender<(u64, CartState)>,
    enqueued: AtomicU64,
    written: watch::Receiver<u64>,
    storage: Arc<dyn CartStorage>,
}

impl CartStore {
    /// Create a store with an empty, not-yet-hydrated cart.
    ///
    /// Spawns the persistence writer task on the current tokio runtime.
    #[must_use]
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        let (state, _) = watch::channel(CartState::new());
        let (hydration, _) = watch::channel(Hydration::Uninitialized);
        let (persist, persist_rx) = mpsc::unbounded_channel();
        let (written_tx, written) = watch::channel(0);

        tokio::spawn(write_loop(Arc::clone(&storage), persist_rx, written_tx));

        Self {
            inner: Arc::new(CartStoreInner {
                state,
                hydration,
                persist,
                enqueued: AtomicU64::new(0),
                written,
                storage,
            }),
        }
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Load the persisted cart into the store and mark it `Ready`.
    ///
    /// Runs at most once per store; later calls are no-ops. A missing record
    /// yields the empty cart. An unreadable record is logged and yields the
    /// empty cart rather than an observable failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend itself could not be read.
    pub async fn hydrate(&self) -> Result<(), StorageError> {
        if self.is_hydrated() {
            return Ok(());
        }

        let storage = Arc::clone(&self.inner.storage);
        let blob = tokio::task::spawn_blocking(move || storage.get(CART_STORAGE_KEY))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))??;

        if let Some(blob) = blob {
            match serde_json::from_str::<CartState>(&blob) {
                Ok(state) => {
                    tracing::info!(lines = state.total_items(), "restored persisted cart");
                    self.inner.state.send_replace(state);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "persisted cart is unreadable; starting empty");
                }
            }
        }

        self.inner.hydration.send_replace(Hydration::Ready);
        Ok(())
    }

    /// Whether the persisted cart has been loaded.
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        *self.inner.hydration.borrow() == Hydration::Ready
    }

    /// Wait until the store is hydrated.
    ///
    /// Resolves immediately if hydration already happened.
    pub async fn ready(&self) {
        let mut rx = self.inner.hydration.subscribe();
        // The sender lives in `inner`, which `self` keeps alive, so this
        // cannot error while we are awaiting it.
        let _ = rx.wait_for(|h| *h == Hydration::Ready).await;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of a product to the cart.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new line is appended. A quantity of zero is clamped to
    /// one. Never fails.
    pub fn add_item(&self, product: Product, quantity: u32) {
        self.dispatch(CartAction::AddItem { product, quantity });
    }

    /// Remove a line item. Silent no-op if the id is absent.
    pub fn remove_item(&self, id: ProductId) {
        self.dispatch(CartAction::RemoveItem { id });
    }

    /// Set a line's quantity to exactly `quantity` (absolute, not a delta).
    ///
    /// A quantity of zero or below behaves as [`Self::remove_item`]. Silent
    /// no-op if the id is absent.
    pub fn update_quantity(&self, id: ProductId, quantity: i32) {
        self.dispatch(CartAction::UpdateQuantity { id, quantity });
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&self) {
        self.dispatch(CartAction::Clear);
    }

    /// Empty the cart and acknowledge the order.
    ///
    /// Not a payment flow; this is only the clear-on-checkout lifecycle step.
    pub fn complete_checkout(&self) -> OrderConfirmation {
        let total = self.cart_total();
        self.dispatch(CartAction::Clear);
        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            total,
        };
        tracing::info!(order_id = %confirmation.order_id, total = %total, "checkout completed");
        confirmation
    }

    /// Apply an action atomically, notify subscribers, and enqueue the new
    /// state for persistence.
    fn dispatch(&self, action: CartAction) {
        let mut snapshot = CartState::new();
        self.inner.state.send_modify(|state| {
            *state = state.apply(action);
            snapshot = state.clone();
        });

        let seq = self.inner.enqueued.fetch_add(1, Ordering::SeqCst) + 1;
        if self.inner.persist.send((seq, snapshot)).is_err() {
            tracing::error!("cart persistence writer is gone; mutation not persisted");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the current cart state.
    #[must_use]
    pub fn current(&self) -> CartState {
        self.inner.state.borrow().clone()
    }

    /// Snapshot of the current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.state.borrow().items.clone()
    }

    /// Sum of `price * quantity` over current items. Pure; recomputed on
    /// every call.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.inner.state.borrow().cart_total()
    }

    /// Total unit count (sum of quantities). Drives the header badge.
    #[must_use]
    pub fn cart_items_count(&self) -> u32 {
        self.inner.state.borrow().cart_items_count()
    }

    /// Distinct line-item count.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.inner.state.borrow().total_items()
    }

    /// Subscribe to cart state changes.
    ///
    /// The receiver is notified after every mutation and always reads the
    /// freshest state (notifications may coalesce, never reorder). Passive
    /// displays should combine this with [`Self::ready`] to avoid rendering
    /// a provisional "0 items" before hydration.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Wait until every mutation enqueued so far has been written to storage.
    ///
    /// Useful before process exit and in tests; normal operation never needs
    /// to wait on persistence.
    pub async fn flush(&self) {
        let target = self.inner.enqueued.load(Ordering::SeqCst);
        let mut rx = self.inner.written.clone();
        // As with `ready`, the writer outlives the store handles.
        let _ = rx.wait_for(|written| *written >= target).await;
    }
}

/// Persistence writer: applies enqueued snapshots to storage in FIFO order.
///
/// One snapshot per mutation, never reordered and never coalesced. Failures
/// are logged and skipped; a failed write does not block later ones.
async fn write_loop(
    storage: Arc<dyn CartStorage>,
    mut rx: mpsc::UnboundedReceiver<(u64, CartState)>,
    written: watch::Sender<u64>,
) {
    while let Some((seq, state)) = rx.recv().await {
        match serde_json::to_string(&state) {
            Ok(blob) => {
                let storage = Arc::clone(&storage);
                match tokio::task::spawn_blocking(move || storage.set(CART_STORAGE_KEY, &blob))
                    .await
                {
                    Ok(Ok(())) => {
                        tracing::debug!(seq, lines = state.total_items(), "persisted cart");
                    }
                    Ok(Err(e)) => tracing::error!(seq, error = %e, "failed to persist cart"),
                    Err(e) => tracing::error!(seq, error = %e, "cart persistence write panicked"),
                }
            }
            Err(e) => tracing::error!(seq, error = %e, "failed to serialize cart"),
        }
        written.send_replace(seq);
    }
}
