//! Vocabulary construction and presence-vector encoding.

pub mod presence;
pub mod tokenize;
pub mod vocabulary;

pub use policydb_core::traits::Embedder;
pub use presence::{encode_chunks, PresenceEncoder};
pub use vocabulary::Vocabulary;
