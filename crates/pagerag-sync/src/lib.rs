//! Publish-event glue: reacts to page-published events, renders the page's
//! indexable record and hands it to the RAG client. A failure here must
//! never fail the publish operation itself.

pub mod publish;

pub use publish::{PagePublished, PublishHandler};
