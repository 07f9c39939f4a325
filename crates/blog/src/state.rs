//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::BlogConfig;
use crate::services::MailingList;
use crate::store::BlogStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BlogConfig,
    catalog: Catalog,
    mailing_list: Arc<dyn MailingList>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Blog configuration
    /// * `store` - Backend the catalog reads from
    /// * `mailing_list` - Destination for newsletter signups
    #[must_use]
    pub fn new(
        config: BlogConfig,
        store: Arc<dyn BlogStore>,
        mailing_list: Arc<dyn MailingList>,
    ) -> Self {
        let catalog = Catalog::new(store, config.unknown_category);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                mailing_list,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BlogConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn store(&self) -> &dyn BlogStore {
        self.inner.catalog.store().as_ref()
    }

    #[must_use]
    pub fn mailing_list(&self) -> &dyn MailingList {
        self.inner.mailing_list.as_ref()
    }
}
