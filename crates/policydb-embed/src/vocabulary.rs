//! Bounded, order-stable vocabulary.
//!
//! Terms are kept in the order they are first seen while walking the chunks
//! front to back. That order is the column order of every embedding row and
//! is persisted verbatim next to the matrix; the term-to-column table is
//! filled in the same pass, so the two can never disagree.

use std::collections::HashMap;

use policydb_core::types::Chunk;
use policydb_core::{Error, Result};
use tracing::debug;

use crate::tokenize::terms;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collects at most `max_size` distinct lowercase terms from `chunks`.
    pub fn build(chunks: &[Chunk], max_size: usize) -> Self {
        let mut vocabulary = Self::default();
        'scan: for chunk in chunks {
            for term in terms(&chunk.text) {
                if vocabulary.len() >= max_size { break 'scan; }
                vocabulary.insert(term);
            }
        }
        debug!(terms = vocabulary.len(), max_size, "vocabulary built");
        vocabulary
    }

    /// Rebuilds a vocabulary from a persisted term list, keeping its order.
    pub fn from_terms(terms: Vec<String>) -> Result<Self> {
        let mut vocabulary = Self { terms: Vec::with_capacity(terms.len()), columns: HashMap::with_capacity(terms.len()) };
        for term in terms {
            if !vocabulary.insert(term.clone()) {
                return Err(Error::Integrity(format!("vocabulary term {term:?} appears more than once")));
            }
        }
        Ok(vocabulary)
    }

    fn insert(&mut self, term: String) -> bool {
        if self.columns.contains_key(&term) { return false; }
        self.columns.insert(term.clone(), self.terms.len());
        self.terms.push(term);
        true
    }

    /// Embedding column of `term`, if it made it into the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> { self.columns.get(term).copied() }

    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}
