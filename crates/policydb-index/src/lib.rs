//! Persisted index: artifact layout, atomic writer, verifying reader and the
//! build pipeline that ties the stages together.

pub mod layout;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use layout::IndexPaths;
pub use pipeline::{build_index, BuildOptions, BuildSummary};
pub use reader::{IndexReader, IndexStatus, PolicyIndex};
pub use writer::IndexWriter;
