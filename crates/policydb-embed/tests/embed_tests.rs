use std::collections::HashSet;

use indicatif::ProgressBar;
use policydb_core::types::Chunk;
use policydb_embed::{encode_chunks, Embedder, PresenceEncoder, Vocabulary};

fn chunk(id: usize, text: &str) -> Chunk {
    Chunk { id, text: text.to_string(), source: "remote_policy.txt".to_string() }
}

#[test]
fn presence_vector_marks_exactly_the_terms_present() {
    let chunks = vec![
        chunk(0, "REMOTE WORK POLICY Standard: 2 days per week"),
        chunk(1, "Must use VPN for company systems VPN vpn"),
    ];
    let encoder = PresenceEncoder::fit(&chunks, 200);
    let matrix = encode_chunks(&encoder, &chunks, &ProgressBar::hidden()).expect("encode");

    assert_eq!(matrix.dim(), (2, encoder.dim()));
    for (row, c) in matrix.rows().into_iter().zip(&chunks) {
        let present: HashSet<String> = c.text.split_whitespace().map(str::to_lowercase).collect();
        for (column, term) in encoder.vocabulary().terms().iter().enumerate() {
            let expected = if present.contains(term) { 1.0 } else { 0.0 };
            assert_eq!(row[column], expected, "chunk {} term {term}", c.id);
        }
    }
}

#[test]
fn repeated_terms_do_not_count_twice() {
    let encoder = PresenceEncoder::fit(&[chunk(0, "vpn VPN Vpn")], 200);
    assert_eq!(encoder.embed_text("vpn vpn vpn"), vec![1.0]);
}

#[test]
fn out_of_vocabulary_terms_contribute_nothing() {
    let chunks: Vec<Chunk> = (0..5).map(|i| chunk(i, &format!("alpha{i} beta{i}"))).collect();
    let encoder = PresenceEncoder::fit(&chunks, 3);

    assert_eq!(encoder.vocabulary().terms(), ["alpha0", "beta0", "alpha1"]);
    let matrix = encode_chunks(&encoder, &chunks, &ProgressBar::hidden()).expect("encode");
    assert_eq!(matrix.row(1).to_vec(), vec![0.0, 0.0, 1.0]);
    assert!(matrix.row(4).iter().all(|&v| v == 0.0));
}

#[test]
fn vocabulary_cap_with_500_distinct_words() {
    let text = (0..500).map(|i| format!("term{i}")).collect::<Vec<_>>().join(" ");
    let chunks = vec![chunk(0, &text)];
    assert_eq!(Vocabulary::build(&chunks, 200).len(), 200);
}

#[test]
fn empty_corpus_encodes_to_zero_by_zero() {
    let encoder = PresenceEncoder::fit(&[], 200);
    let matrix = encode_chunks(&encoder, &[], &ProgressBar::hidden()).expect("encode");
    assert_eq!(matrix.dim(), (0, 0));
}

#[test]
fn vocabulary_is_deterministic_across_builds() {
    let chunks = vec![chunk(0, "Year 1-2: 10 days per year"), chunk(1, "Request 2 weeks in advance")];
    let first = Vocabulary::build(&chunks, 200);
    let second = Vocabulary::build(&chunks, 200);
    assert_eq!(first.terms(), second.terms());
}

struct ShortRows;

impl Embedder for ShortRows {
    fn dim(&self) -> usize { 3 }
    fn embed_text(&self, _text: &str) -> Vec<f64> { vec![1.0] }
}

#[test]
fn encode_rejects_rows_of_the_wrong_length() {
    let err = encode_chunks(&ShortRows, &[chunk(0, "anything")], &ProgressBar::hidden()).unwrap_err();
    assert!(matches!(err, policydb_core::Error::Integrity(_)));
}
