#![forbid(unsafe_code)]

//! A named, insertion-ordered set of collections.

use crate::collection::TweakCollection;
use crate::sync;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::trace;

#[derive(Default)]
struct OrderedCollections {
    order: Vec<TweakCollection>,
    index: FxHashMap<String, usize>,
}

struct CategoryInner {
    name: String,
    collections: RwLock<OrderedCollections>,
}

/// A shared handle to a top-level named group of collections.
pub struct TweakCategory {
    inner: Arc<CategoryInner>,
}

impl Clone for TweakCategory {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PartialEq for TweakCategory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TweakCategory {}

impl fmt::Debug for TweakCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweakCategory")
            .field("name", &self.inner.name)
            .field("collections", &self.len())
            .finish()
    }
}

impl TweakCategory {
    pub(crate) fn new(name: String) -> Self {
        Self {
            inner: Arc::new(CategoryInner {
                name,
                collections: RwLock::new(OrderedCollections::default()),
            }),
        }
    }

    /// The category's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Look up a collection by name. Read-only; never creates.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TweakCollection> {
        let collections = sync::read(&self.inner.collections);
        collections
            .index
            .get(name)
            .map(|&slot| collections.order[slot].clone())
    }

    /// Get or create the collection with the given name. Concurrent calls
    /// for one name all observe the same instance.
    pub fn collection(&self, name: &str) -> TweakCollection {
        debug_assert!(!name.is_empty(), "collection names must be non-empty");
        if let Some(existing) = self.get(name) {
            return existing;
        }

        let mut collections = sync::write(&self.inner.collections);
        if let Some(&slot) = collections.index.get(name) {
            return collections.order[slot].clone();
        }

        let collection = TweakCollection::new(self.inner.name.clone(), name.to_string());
        trace!(category = %self.inner.name, collection = name, "tweak collection registered");
        let slot = collections.order.len();
        collections.index.insert(name.to_string(), slot);
        collections.order.push(collection.clone());
        collection
    }

    /// All collections in first-registration order.
    #[must_use]
    pub fn collections(&self) -> Vec<TweakCollection> {
        sync::read(&self.inner.collections).order.clone()
    }

    /// Collection names in first-registration order.
    #[must_use]
    pub fn collection_names(&self) -> Vec<String> {
        sync::read(&self.inner.collections)
            .order
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Number of collections in the category.
    #[must_use]
    pub fn len(&self) -> usize {
        sync::read(&self.inner.collections).order.len()
    }

    /// Whether the category has no collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
