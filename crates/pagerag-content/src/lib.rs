//! Content-normalization pipeline: turns a CMS page's declared fields into
//! markdown and assembles the JSON record delivered to the RAG service.

pub mod declare;
pub mod fingerprint;
pub mod markdown;
pub mod normalize;
pub mod page;
pub mod panels;
pub mod seo;
pub mod value;

pub use declare::{ContentType, DeclareError, IndexRegistry};
pub use page::{Indexable, PageFields};
pub use panels::{FieldPanel, MetaField, MetaPanel, Panel, PanelCollection};
pub use value::{Block, BlockValue, FieldValue, RichText, StreamValue};
