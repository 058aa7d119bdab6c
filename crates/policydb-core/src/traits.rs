/// Maps text onto a dense vector of fixed length `dim()`.
///
/// Row `i` of an embedding matrix is `embed_text(chunks[i].text)`, so an
/// implementation must return exactly `dim()` values for every input.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_text(&self, text: &str) -> Vec<f64>;
}
