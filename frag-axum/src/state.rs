use std::sync::Arc;

use frag_store::FragmentStore;

use crate::auth::BasicUsers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FragmentStore>,
    pub users: Arc<BasicUsers>,
    /// Base URL used to build `Location` headers on creation.
    pub api_url: Arc<str>,
}

impl AppState {
    pub fn new<S>(store: S, users: BasicUsers, api_url: &str) -> Self
    where
        S: FragmentStore + 'static,
    {
        Self {
            store: Arc::new(store),
            users: Arc::new(users),
            api_url: Arc::from(api_url),
        }
    }
}
