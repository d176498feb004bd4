use std::collections::HashMap;
use std::sync::Arc;

use crate::panels::{Panel, PanelCollection};

/// Descriptor of a host content type, as supplied by the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub name: String,
    pub is_page: bool,
}

impl ContentType {
    pub fn new(name: impl Into<String>, is_page: bool) -> Self {
        Self {
            name: name.into(),
            is_page,
        }
    }

    pub fn page(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

/// Maps content-type names to their declared panel collections.
///
/// Declarations happen once at startup; pages resolve their collection by
/// content-type name afterwards.
#[derive(Debug, Default)]
pub struct IndexRegistry {
    entries: HashMap<String, Arc<PanelCollection>>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the indexable panels for a page content type.
    ///
    /// Fails immediately on non-page types. Declaring with zero panels is an
    /// explicit no-op: nothing is registered and the call succeeds.
    pub fn declare(
        &mut self,
        content_type: &ContentType,
        panels: Vec<Panel>,
        include_meta: bool,
    ) -> Result<(), DeclareError> {
        if !content_type.is_page {
            return Err(DeclareError::NotAPage {
                type_name: content_type.name.clone(),
            });
        }
        if panels.is_empty() {
            return Ok(());
        }
        self.entries.insert(
            content_type.name.clone(),
            Arc::new(PanelCollection::new(panels, include_meta)),
        );
        Ok(())
    }

    pub fn collection(&self, type_name: &str) -> Option<Arc<PanelCollection>> {
        self.entries.get(type_name).cloned()
    }

    pub fn is_declared(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeclareError {
    #[error("indexable declaration requires a page type, {type_name} is not one")]
    NotAPage { type_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::FieldPanel;

    #[test]
    fn declares_page_type() {
        let mut registry = IndexRegistry::new();
        let blog = ContentType::page("blog.BlogPage");
        registry
            .declare(&blog, vec![FieldPanel::new("body").into()], true)
            .unwrap();
        let collection = registry.collection("blog.BlogPage").unwrap();
        // explicit panel plus the seven standard meta panels
        assert_eq!(collection.panels().len(), 8);
    }

    #[test]
    fn rejects_non_page_type() {
        let mut registry = IndexRegistry::new();
        let snippet = ContentType::new("blog.Author", false);
        let err = registry
            .declare(&snippet, vec![FieldPanel::new("bio").into()], true)
            .unwrap_err();
        assert!(matches!(err, DeclareError::NotAPage { type_name } if type_name == "blog.Author"));
    }

    #[test]
    fn zero_panels_is_a_no_op() {
        let mut registry = IndexRegistry::new();
        let blog = ContentType::page("blog.BlogPage");
        registry.declare(&blog, vec![], true).unwrap();
        assert!(!registry.is_declared("blog.BlogPage"));
    }
}
