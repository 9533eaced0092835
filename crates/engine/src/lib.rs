//! Engine for anti-recommendations: title resolution and selection.
//!
//! This crate provides:
//! - Resolution result types (Resolution, Disambiguation)
//! - Match stages and the TitleResolver cascade
//! - The AntiRecommender selector (farthest cluster + band sampling)
//! - Search-box suggestions
//!
//! ## Architecture
//! Resolution runs as an ordered pipeline of stages:
//! 1. ExactStage short-circuits unique case-insensitive matches
//! 2. SubstringStage collects titles containing the query
//! 3. FuzzyStage falls back to similarity matching
//! The first stage to produce candidates feeds the shared year-filter and
//! decision step; the selector then picks the farthest cluster and samples
//! one movie per rating band.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{AntiRecommender, RecommendOutcome};
//!
//! let recommender = AntiRecommender::new(store.clone());
//! match recommender.recommend("the matrix", Some(1999))? {
//!     RecommendOutcome::Bundle(bundle) => println!("{:?}", bundle.recommendations),
//!     RecommendOutcome::Unresolved(d) => println!("{}", d.message),
//! }
//! ```

pub mod recommender;
pub mod resolution;
pub mod resolver;
pub mod stages;
pub mod suggest;

// Re-export main types
pub use recommender::{
    AntiRecommender, EngineError, QueryMovie, RecommendOutcome, RecommendationBundle,
    RecommendedMovie,
};
pub use resolution::{Disambiguation, DisambiguationKind, Resolution, TitleYear};
pub use resolver::{ResolverConfig, TitleResolver};
pub use stages::{MatchStage, StageOutcome};
