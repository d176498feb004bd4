use std::fmt;
use std::sync::Arc;

/// Markup-bearing rich text, as stored by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    pub source: String,
}

impl RichText {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// One block of a stream field.
#[derive(Debug, Clone)]
pub struct Block {
    pub block_type: String,
    pub value: BlockValue,
}

impl Block {
    pub fn new(block_type: impl Into<String>, value: BlockValue) -> Self {
        Self {
            block_type: block_type.into(),
            value,
        }
    }
}

/// The value carried by one stream block.
#[derive(Debug, Clone)]
pub enum BlockValue {
    /// Rich-text markup.
    RichText(RichText),
    /// Structured block: key/value pairs in declaration order.
    Mapping(Vec<(String, FieldValue)>),
    /// Plain text, used verbatim.
    Text(String),
    /// Anything else (images, embeds); contributes nothing to markdown.
    Other(serde_json::Value),
}

/// An ordered, heterogeneous sequence of content blocks composing a page body.
#[derive(Debug, Clone, Default)]
pub struct StreamValue {
    blocks: Vec<Block>,
}

impl StreamValue {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<Vec<Block>> for StreamValue {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

/// A page attribute value, as one of the shapes the normalizer understands.
#[derive(Clone)]
pub enum FieldValue {
    /// Attribute absent on the page.
    Missing,
    Text(String),
    Int(i64),
    RichText(RichText),
    Stream(StreamValue),
    /// Display forms of the items of a to-many relation.
    Relation(Vec<String>),
    /// Deferred value; called with no arguments before any other handling.
    Computed(Arc<dyn Fn() -> FieldValue + Send + Sync>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn rich(source: impl Into<String>) -> Self {
        Self::RichText(RichText::new(source))
    }

    pub fn computed(resolve: impl Fn() -> FieldValue + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(resolve))
    }

    /// Truthiness in the CMS sense: missing, empty and zero values are falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::RichText(rich) => rich.source.is_empty(),
            FieldValue::Stream(stream) => stream.is_empty(),
            FieldValue::Relation(items) => items.is_empty(),
            FieldValue::Computed(_) => false,
        }
    }

    /// Plain string form, used for the title heading.
    pub fn display_string(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::RichText(rich) => rich.source.clone(),
            FieldValue::Stream(stream) => crate::markdown::stream_to_markdown(stream),
            FieldValue::Relation(items) => items.join(", "),
            FieldValue::Computed(resolve) => resolve().display_string(),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "Missing"),
            FieldValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FieldValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            FieldValue::RichText(rich) => f.debug_tuple("RichText").field(rich).finish(),
            FieldValue::Stream(stream) => f.debug_tuple("Stream").field(stream).finish(),
            FieldValue::Relation(items) => f.debug_tuple("Relation").field(items).finish(),
            FieldValue::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}
