use chrono::{DateTime, Utc};
use pagerag_common::types::{IndexableRecord, PageId};

use crate::panels::PanelCollection;
use crate::value::FieldValue;

/// Attribute-style access to a CMS page.
///
/// The explicit counterpart of the host CMS's page model: implementors expose
/// the built-in page attributes directly and any declared content fields
/// through [`PageFields::field`]. All access is read-only.
pub trait PageFields: Send + Sync {
    fn id(&self) -> PageId;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;

    fn seo_title(&self) -> Option<&str> {
        None
    }

    fn search_description(&self) -> Option<&str> {
        None
    }

    /// Raw comma-separated keyword string, as stored.
    fn meta_keywords(&self) -> Option<&str> {
        None
    }

    /// Fully-qualified URL, including scheme and host.
    fn full_url(&self) -> Option<String> {
        None
    }

    fn last_published_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Names of the page's tags, when the page type has a tag relation.
    fn tags(&self) -> Option<Vec<String>> {
        None
    }

    /// Text gathered for the search index; feeds the page fingerprint.
    fn searchable_content(&self) -> Vec<String> {
        Vec::new()
    }

    /// Content-type label, e.g. `blog.BlogPage`.
    fn content_type(&self) -> &str {
        "page"
    }

    fn locale(&self) -> &str {
        "en"
    }

    /// A declared content field by name; `None` when the page has no such field.
    fn field(&self, name: &str) -> Option<FieldValue> {
        let _ = name;
        None
    }

    /// Capability probe: page types that declare panels return themselves.
    fn as_indexable(&self) -> Option<&dyn Indexable> {
        None
    }
}

/// A page type that declared panels for AI indexing.
///
/// Composition over injection: the type holds its [`PanelCollection`] and
/// rendering forwards to it.
pub trait Indexable: PageFields {
    fn panel_collection(&self) -> &PanelCollection;
}

/// Render the indexable record for a page, `None` when its type is not indexable.
pub fn render_record(page: &dyn PageFields) -> Option<IndexableRecord> {
    page.as_indexable()
        .map(|indexable| indexable.panel_collection().render_record(page))
}

/// Render the markdown document for a page, `None` when its type is not indexable.
pub fn render_markdown(page: &dyn PageFields) -> Option<String> {
    page.as_indexable()
        .map(|indexable| indexable.panel_collection().render_markdown(page))
}

/// The field names a page's declaration covers, `None` when not indexable.
pub fn indexed_field_names(page: &dyn PageFields) -> Option<Vec<String>> {
    page.as_indexable()
        .map(|indexable| indexable.panel_collection().field_names())
}
