use std::sync::Arc;

use engine::AntiRecommender;

/// Shared application state: the recommender built once at startup.
///
/// The underlying catalog is immutable, so cloning the state just bumps the
/// `Arc` and concurrent requests read without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<AntiRecommender>,
}

impl AppState {
    pub fn new(recommender: AntiRecommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}
