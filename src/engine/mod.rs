//! Request pipelines for the two retrieval flows.
//!
//! Each engine runs a linear sequence per query: load the corpus blob, embed
//! the query, rank by cosine similarity, summarize, and sign a media URL.

mod document;
mod lecture;

pub use document::{DocumentAnswer, DocumentEngine, DocumentMatch};
pub use lecture::{GroupSummary, LectureAnswer, LectureEngine};
