use std::fs::{self, File};
use std::path::Path;

use ndarray::{array, Array2};
use ndarray_npy::WriteNpyExt;
use policydb_core::types::Chunk;
use policydb_core::Error;
use policydb_embed::Vocabulary;
use policydb_index::{IndexPaths, IndexReader, IndexWriter};

fn chunk(id: usize, text: &str) -> Chunk {
    Chunk { id, text: text.to_string(), source: "vacation_policy.txt".to_string() }
}

fn sample() -> (Vec<Chunk>, Array2<f64>, Vocabulary) {
    let chunks = vec![chunk(0, "sick leave"), chunk(1, "leave days")];
    let embeddings = array![[1.0, 1.0, 0.0], [0.0, 1.0, 1.0]];
    let vocabulary = Vocabulary::from_terms(vec!["sick".into(), "leave".into(), "days".into()]).unwrap();
    (chunks, embeddings, vocabulary)
}

fn write_sample(dir: &Path) {
    let (chunks, embeddings, vocabulary) = sample();
    IndexWriter::new(dir).write(&chunks, &embeddings, &vocabulary).expect("write");
}

fn expect_integrity(dir: &Path) -> String {
    match IndexReader::load(dir) {
        Err(Error::Integrity(message)) => message,
        other => panic!("expected integrity violation, got {other:?}"),
    }
}

#[test]
fn written_index_loads_back_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let (chunks, embeddings, vocabulary) = sample();
    let paths = IndexWriter::new(tmp.path()).write(&chunks, &embeddings, &vocabulary).expect("write");
    assert_eq!(paths, IndexPaths::new(tmp.path()));

    let index = IndexReader::load(tmp.path()).expect("load");
    assert_eq!(index.chunks, chunks);
    assert_eq!(index.embeddings, embeddings);
    assert_eq!(index.vocabulary.terms(), vocabulary.terms());
}

#[test]
fn writer_creates_nested_output_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("index").join("faiss");
    write_sample(&nested);
    assert!(nested.join("embeddings.npy").is_file());
}

#[test]
fn writer_refuses_mismatched_shapes_and_keeps_previous_index() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    let before = fs::read(tmp.path().join("chunks.json")).unwrap();

    let (mut chunks, embeddings, vocabulary) = sample();
    chunks.push(chunk(2, "extra"));
    let err = IndexWriter::new(tmp.path()).write(&chunks, &embeddings, &vocabulary).unwrap_err();

    assert!(matches!(err, Error::Integrity(_)), "{err:?}");
    assert_eq!(fs::read(tmp.path().join("chunks.json")).unwrap(), before);
    IndexReader::load(tmp.path()).expect("previous index still valid");
}

#[test]
fn writer_refuses_column_count_mismatch() {
    let tmp = tempfile::tempdir().unwrap();
    let (chunks, embeddings, _) = sample();
    let vocabulary = Vocabulary::from_terms(vec!["sick".into(), "leave".into()]).unwrap();

    let err = IndexWriter::new(tmp.path()).write(&chunks, &embeddings, &vocabulary).unwrap_err();
    assert!(matches!(err, Error::Integrity(_)));
}

#[test]
fn missing_artifact_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::remove_file(tmp.path().join("vocabulary.json")).unwrap();

    let err = IndexReader::load(tmp.path()).unwrap_err();
    assert!(matches!(&err, Error::NotFound(what) if what.contains("vocabulary.json")), "{err:?}");
}

#[test]
fn vocabulary_shorter_than_matrix_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::write(tmp.path().join("vocabulary.json"), r#"["sick", "leave"]"#).unwrap();

    assert!(expect_integrity(tmp.path()).contains("embedding columns"));
}

#[test]
fn chunk_count_not_matching_rows_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::write(tmp.path().join("chunks.json"), r#"[{"id": 0, "text": "sick leave", "source": "a.txt"}]"#).unwrap();

    assert!(expect_integrity(tmp.path()).contains("embedding rows"));
}

#[test]
fn gap_in_chunk_ids_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::write(
        tmp.path().join("chunks.json"),
        r#"[{"id": 0, "text": "sick leave", "source": "a.txt"}, {"id": 2, "text": "leave days", "source": "a.txt"}]"#,
    )
    .unwrap();

    assert!(expect_integrity(tmp.path()).contains("has id 2"));
}

#[test]
fn duplicate_vocabulary_terms_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::write(tmp.path().join("vocabulary.json"), r#"["sick", "leave", "sick"]"#).unwrap();

    assert!(expect_integrity(tmp.path()).contains("more than once"));
}

#[test]
fn non_binary_entries_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    let weighted = array![[2.0, 1.0, 0.0], [0.0, 1.0, 1.0]];
    weighted.write_npy(File::create(tmp.path().join("embeddings.npy")).unwrap()).unwrap();

    assert!(expect_integrity(tmp.path()).contains("embedding[0][0]"));
}

#[test]
fn truncated_matrix_file_is_reported_with_its_path() {
    let tmp = tempfile::tempdir().unwrap();
    write_sample(tmp.path());
    fs::write(tmp.path().join("embeddings.npy"), b"\x93NUMPY").unwrap();

    let err = IndexReader::load(tmp.path()).unwrap_err();
    assert!(matches!(&err, Error::Npy { path, .. } if path.ends_with("embeddings.npy")), "{err:?}");
}
