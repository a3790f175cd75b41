//! Media retrieval collaborators

mod retriever;

pub use retriever::{video_id, LocalFileRetriever, MediaRetriever, YtDlpRetriever};
