//! HTTP shell for the anti-recommendation engine.
//!
//! A thin axum layer over the engine: the catalog and model are loaded once
//! at startup, the recommender is shared as immutable state, and the two
//! operations (`/recommend`, `/search-suggestions`) map straight onto the
//! engine's API.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Settings;
pub use routes::create_router;
pub use state::AppState;
