//! Catalog store
//!
//! The single in-memory source of truth for the product collection and
//! the loading flag. Single-writer discipline: only the orchestrator
//! mutates it. Every mutation is a total replacement of the affected
//! entry or collection under one lock acquisition, so an observer sees
//! either the pre- or the post-mutation state, never an interleaving.
//!
//! The store mirrors confirmed server state only: nothing is inserted
//! optimistically, and item ordering is preserved exactly as received.

use parking_lot::RwLock;
use tokio::sync::watch;
use vitrine_model::{PageMeta, Product, ProductId};

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    meta: Option<PageMeta>,
    loading: bool,
}

/// In-memory product collection with change notification
#[derive(Debug)]
pub struct CatalogStore {
    inner: RwLock<CatalogState>,
    version: watch::Sender<u64>,
}

impl CatalogStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: RwLock::new(CatalogState::default()),
            version,
        }
    }

    /// Replace the whole collection with one page of results
    ///
    /// Ordering is preserved as received. Uniqueness of ids is enforced
    /// here: a duplicate id keeps its first occurrence and is logged,
    /// never stored twice.
    pub fn replace_all(&self, items: Vec<Product>, meta: PageMeta) {
        let mut unique: Vec<Product> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().any(|existing| existing.id == item.id) {
                tracing::warn!(product = %item.id, "duplicate id in page, keeping first");
                continue;
            }
            unique.push(item);
        }
        {
            let mut state = self.inner.write();
            state.products = unique;
            state.meta = Some(meta);
        }
        self.touch();
    }

    /// Insert a newly confirmed product at head position
    ///
    /// Any stale entry with the same id is dropped first, so the id
    /// appears exactly once afterwards.
    pub fn insert_at_head(&self, product: Product) {
        {
            let mut state = self.inner.write();
            state.products.retain(|existing| existing.id != product.id);
            state.products.insert(0, product);
        }
        self.touch();
    }

    /// Replace one entry with authoritative post-update state
    ///
    /// A no-op when the id is not present (the entry may belong to a
    /// page that is no longer loaded).
    pub fn replace(&self, id: &ProductId, product: Product) {
        let mut replaced = false;
        {
            let mut state = self.inner.write();
            if let Some(entry) = state.products.iter_mut().find(|entry| &entry.id == id) {
                *entry = product;
                replaced = true;
            }
        }
        if replaced {
            self.touch();
        }
    }

    /// Remove one entry
    pub fn remove(&self, id: &ProductId) {
        let mut removed = false;
        {
            let mut state = self.inner.write();
            let before = state.products.len();
            state.products.retain(|entry| &entry.id != id);
            removed = state.products.len() != before;
        }
        if removed {
            self.touch();
        }
    }

    /// Set the "currently loading" flag
    pub fn set_loading(&self, loading: bool) {
        {
            let mut state = self.inner.write();
            if state.loading == loading {
                return;
            }
            state.loading = loading;
        }
        self.touch();
    }

    /// Drop all products and pagination metadata
    ///
    /// Used when the session ends: the next sign-in starts from an empty
    /// mirror.
    pub fn clear(&self) {
        {
            let mut state = self.inner.write();
            state.products.clear();
            state.meta = None;
            state.loading = false;
        }
        self.touch();
    }

    /// Snapshot of the collection in received order
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.read().products.clone()
    }

    /// Look up one product by id
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.inner.read().products.iter().find(|entry| &entry.id == id).cloned()
    }

    /// Whether an id is currently present
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.inner.read().products.iter().any(|entry| &entry.id == id)
    }

    /// Number of products currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().products.len()
    }

    /// Whether the store holds no products
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().products.is_empty()
    }

    /// Whether a page load is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.read().loading
    }

    /// Pagination metadata of the last applied page
    #[must_use]
    pub fn page_meta(&self) -> Option<PageMeta> {
        self.inner.read().meta
    }

    /// Subscribe to change notifications
    ///
    /// The receiver carries a version counter bumped on every mutation;
    /// consumers re-read whatever state they care about when it changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    fn touch(&self) {
        self.version.send_modify(|version| *version += 1);
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            title: format!("Product {id}"),
            description: "A product".to_string(),
            status: true,
            created_at: None,
            updated_at: Utc::now(),
            thumbnail: None,
        }
    }

    fn meta() -> PageMeta {
        PageMeta {
            page: 1,
            page_size: 10,
            total: 2,
            total_pages: 1,
        }
    }

    #[test]
    fn replace_all_preserves_order() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("b"), product("a"), product("c")], meta());

        let ids: Vec<_> = store.products().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.page_meta().unwrap().page, 1);
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a"), product("a"), product("b")], meta());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn insert_at_head_puts_newest_first() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a"), product("b")], meta());
        store.insert_at_head(product("c"));

        let ids: Vec<_> = store.products().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn insert_at_head_never_duplicates() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a"), product("b")], meta());
        store.insert_at_head(product("b"));

        let ids: Vec<_> = store.products().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn replace_swaps_single_entry() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a"), product("b")], meta());

        let mut updated = product("a");
        updated.title = "Renamed".to_string();
        store.replace(&ProductId::from("a"), updated);

        assert_eq!(store.get(&ProductId::from("a")).unwrap().title, "Renamed");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_unknown_id_is_noop() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a")], meta());
        store.replace(&ProductId::from("zzz"), product("zzz"));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&ProductId::from("zzz")));
    }

    #[test]
    fn remove_drops_entry() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a"), product("b")], meta());
        store.remove(&ProductId::from("a"));

        assert!(!store.contains(&ProductId::from("a")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn loading_flag_round_trip() {
        let store = CatalogStore::new();
        assert!(!store.is_loading());
        store.set_loading(true);
        assert!(store.is_loading());
        store.set_loading(false);
        assert!(!store.is_loading());
    }

    #[test]
    fn clear_resets_everything() {
        let store = CatalogStore::new();
        store.replace_all(vec![product("a")], meta());
        store.set_loading(true);
        store.clear();

        assert!(store.is_empty());
        assert!(store.page_meta().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn subscribers_observe_mutations() {
        let store = CatalogStore::new();
        let mut rx = store.subscribe();
        let initial = *rx.borrow_and_update();

        store.insert_at_head(product("a"));
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update() > initial);
    }
}
