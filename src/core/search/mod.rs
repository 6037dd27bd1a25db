//! Retrieval over the vector collection.
//!
//! - **similarity**: cosine similarity and stable top-k ranking
//! - **expander**: LLM-generated query variants
//! - **retriever**: multi-query search with set-union merging

pub mod expander;
pub mod retriever;
pub mod similarity;

pub use expander::{QueryExpander, DEFAULT_QUERY_VARIANTS};
pub use retriever::{Retriever, DEFAULT_K_PER_QUERY};
pub use similarity::cosine_similarity;
