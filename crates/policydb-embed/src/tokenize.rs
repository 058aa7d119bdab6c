/// Lowercased whitespace tokens of `text`, in order, duplicates included.
///
/// Both the vocabulary builder and the encoder go through this function, so
/// a term counts as "present" exactly when it was eligible for the vocabulary.
pub fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}
