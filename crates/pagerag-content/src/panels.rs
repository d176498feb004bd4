use std::fmt;
use std::sync::Arc;

use pagerag_common::types::IndexableRecord;

use crate::normalize::{normalize, Processor};
use crate::page::PageFields;
use crate::seo;
use crate::value::FieldValue;

/// Standard metadata field names, appended to a page's indexed field list
/// when metadata panels are enabled.
pub const META_FIELDS: [&str; 8] = [
    "id",
    "title",
    "seo_title",
    "search_description",
    "meta_keywords",
    "url",
    "slug",
    "last_published_at",
];

/// Binds one page field to the normalizer, with an optional section heading.
/// Immutable after construction; never mutates the page it reads.
#[derive(Clone)]
pub struct FieldPanel {
    field_name: String,
    processor: Option<Arc<Processor>>,
    heading: Option<String>,
}

impl FieldPanel {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            processor: None,
            heading: None,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_processor(
        mut self,
        processor: impl Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.processor = Some(Arc::new(processor));
        self
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn value(&self, page: &dyn PageFields) -> String {
        normalize(page, &self.field_name, self.processor.as_deref())
    }
}

impl fmt::Debug for FieldPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPanel")
            .field("field_name", &self.field_name)
            .field("heading", &self.heading)
            .field("processor", &self.processor.is_some())
            .finish()
    }
}

/// Page metadata fields with fixed resolution rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaField {
    Id,
    Url,
    Title,
    SeoTitle,
    SearchDescription,
    MetaKeywords,
    Slug,
    LastPublishedAt,
    /// Anything else: resolved through the generic normalizer under this name.
    Custom(String),
}

impl MetaField {
    pub fn name(&self) -> &str {
        match self {
            MetaField::Id => "id",
            MetaField::Url => "url",
            MetaField::Title => "title",
            MetaField::SeoTitle => "seo_title",
            MetaField::SearchDescription => "search_description",
            MetaField::MetaKeywords => "meta_keywords",
            MetaField::Slug => "slug",
            MetaField::LastPublishedAt => "last_published_at",
            MetaField::Custom(name) => name,
        }
    }
}

/// Panel for page metadata; bypasses the generic normalizer for the known fields.
#[derive(Debug, Clone)]
pub struct MetaPanel {
    meta_field: MetaField,
    heading: Option<String>,
}

impl MetaPanel {
    pub fn new(meta_field: MetaField) -> Self {
        Self {
            meta_field,
            heading: None,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn field_name(&self) -> &str {
        self.meta_field.name()
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn value(&self, page: &dyn PageFields) -> String {
        match &self.meta_field {
            MetaField::Id => page.id().to_string(),
            MetaField::Url => page.full_url().unwrap_or_default(),
            MetaField::Title => page.title().to_string(),
            MetaField::SeoTitle => match page.seo_title() {
                Some(seo) if !seo.is_empty() => seo.to_string(),
                _ => page.title().to_string(),
            },
            MetaField::SearchDescription => {
                page.search_description().unwrap_or_default().to_string()
            }
            MetaField::MetaKeywords => page.meta_keywords().unwrap_or_default().to_string(),
            MetaField::Slug => page.slug().to_string(),
            MetaField::LastPublishedAt => page
                .last_published_at()
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            MetaField::Custom(name) => normalize(page, name, None),
        }
    }
}

/// The unit of "what to extract": a field panel or a metadata panel.
#[derive(Debug, Clone)]
pub enum Panel {
    Field(FieldPanel),
    Meta(MetaPanel),
}

impl Panel {
    pub fn field_name(&self) -> &str {
        match self {
            Panel::Field(panel) => panel.field_name(),
            Panel::Meta(panel) => panel.field_name(),
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            Panel::Field(panel) => panel.heading(),
            Panel::Meta(panel) => panel.heading(),
        }
    }

    pub fn value(&self, page: &dyn PageFields) -> String {
        match self {
            Panel::Field(panel) => panel.value(page),
            Panel::Meta(panel) => panel.value(page),
        }
    }
}

impl From<FieldPanel> for Panel {
    fn from(panel: FieldPanel) -> Self {
        Panel::Field(panel)
    }
}

impl From<MetaPanel> for Panel {
    fn from(panel: MetaPanel) -> Self {
        Panel::Meta(panel)
    }
}

/// The seven standard metadata panels, in their fixed order.
pub fn default_meta_panels() -> Vec<Panel> {
    vec![
        MetaPanel::new(MetaField::Title).with_heading("Page Title").into(),
        MetaPanel::new(MetaField::SeoTitle).with_heading("SEO Title").into(),
        MetaPanel::new(MetaField::SearchDescription)
            .with_heading("Meta Description")
            .into(),
        MetaPanel::new(MetaField::MetaKeywords)
            .with_heading("Meta Keywords")
            .into(),
        MetaPanel::new(MetaField::Url).with_heading("Page URL").into(),
        MetaPanel::new(MetaField::Slug).with_heading("Page Slug").into(),
        MetaPanel::new(MetaField::LastPublishedAt)
            .with_heading("Last Updated")
            .into(),
    ]
}

/// Ordered panels for one page type. Caller panels come first; the standard
/// metadata panels are appended when `include_meta` is set. Order is
/// preserved and field names are not de-duplicated.
#[derive(Debug, Clone)]
pub struct PanelCollection {
    panels: Vec<Panel>,
    explicit: usize,
    include_meta: bool,
}

impl PanelCollection {
    pub fn new(panels: Vec<Panel>, include_meta: bool) -> Self {
        let explicit = panels.len();
        let mut panels = panels;
        if include_meta {
            panels.extend(default_meta_panels());
        }
        Self {
            panels,
            explicit,
            include_meta,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Render the full markdown document for a page.
    ///
    /// Panels whose value is empty or whitespace-only produce no output at
    /// all, heading included. Kept entries are joined with blank lines in
    /// declaration order.
    pub fn render_markdown(&self, page: &dyn PageFields) -> String {
        let mut parts: Vec<String> = Vec::new();
        for panel in &self.panels {
            let value = panel.value(page);
            if value.trim().is_empty() {
                continue;
            }
            if let Some(heading) = panel.heading() {
                parts.push(format!("## {heading}"));
            }
            parts.push(value);
        }
        parts.join("\n\n")
    }

    /// Assemble the fixed-shape record delivered to the RAG service.
    pub fn render_record(&self, page: &dyn PageFields) -> IndexableRecord {
        IndexableRecord {
            id: page.id(),
            url: page.full_url().unwrap_or_default(),
            slug: page.slug().to_string(),
            title: page.title().to_string(),
            seo_metadata: seo::seo_metadata(page),
            content: self.render_markdown(page),
            last_published_at: page
                .last_published_at()
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
        }
    }

    /// Field names covered by this collection, for publish logging.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.panels[..self.explicit]
            .iter()
            .map(|panel| panel.field_name().to_string())
            .collect();
        if self.include_meta {
            names.extend(META_FIELDS.iter().map(|name| name.to_string()));
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::page::fixtures::TestPage;

    fn about_page() -> TestPage {
        TestPage {
            id: 7,
            title: "About Us".to_string(),
            slug: "about-us".to_string(),
            search_description: Some("desc".to_string()),
            full_url: Some("https://example.com/about-us/".to_string()),
            last_published_at: Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).single(),
            ..TestPage::default()
        }
    }

    #[test]
    fn meta_panels_follow_explicit_panels_in_fixed_order() {
        let collection = PanelCollection::new(
            vec![FieldPanel::new("body").into(), FieldPanel::new("intro").into()],
            true,
        );
        let names: Vec<&str> = collection
            .panels()
            .iter()
            .map(|panel| panel.field_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "body",
                "intro",
                "title",
                "seo_title",
                "search_description",
                "meta_keywords",
                "url",
                "slug",
                "last_published_at",
            ]
        );
    }

    #[test]
    fn no_meta_panels_when_disabled() {
        let collection = PanelCollection::new(vec![FieldPanel::new("body").into()], false);
        assert_eq!(collection.panels().len(), 1);
        assert_eq!(collection.field_names(), vec!["body".to_string()]);
    }

    #[test]
    fn field_names_include_standard_meta_list() {
        let collection = PanelCollection::new(vec![FieldPanel::new("body").into()], true);
        let names = collection.field_names();
        assert_eq!(names[0], "body");
        assert_eq!(names[1..].to_vec(), META_FIELDS.map(String::from).to_vec());
    }

    #[test]
    fn empty_panels_are_skipped_entirely() {
        let page = about_page();
        // no meta_keywords on the page: its section must not appear
        let collection = PanelCollection::new(vec![], true);
        let markdown = collection.render_markdown(&page);
        assert!(!markdown.contains("Meta Keywords"));
        assert!(markdown.contains("## Meta Description"));
    }

    #[test]
    fn whitespace_only_value_is_skipped() {
        let mut page = about_page();
        page.fields
            .insert("note".to_string(), FieldValue::text("   "));
        let collection = PanelCollection::new(
            vec![FieldPanel::new("note").with_heading("Note").into()],
            false,
        );
        assert_eq!(collection.render_markdown(&page), "");
    }

    #[test]
    fn render_markdown_is_idempotent() {
        let page = about_page();
        let collection = PanelCollection::new(vec![FieldPanel::new("body").into()], true);
        assert_eq!(
            collection.render_markdown(&page),
            collection.render_markdown(&page)
        );
    }

    #[test]
    fn meta_sections_render_in_order_with_headings() {
        let page = about_page();
        let collection = PanelCollection::new(vec![], true);
        let markdown = collection.render_markdown(&page);
        let expected = [
            "## Page Title",
            "About Us",
            "## SEO Title",
            "About Us",
            "## Meta Description",
            "desc",
            "## Page URL",
            "https://example.com/about-us/",
            "## Page Slug",
            "about-us",
            "## Last Updated",
        ];
        let mut position = 0;
        for needle in expected {
            let found = markdown[position..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing {needle:?} in {markdown:?}"));
            position += found + needle.len();
        }
        assert!(markdown.contains("\n\n"));
    }

    #[test]
    fn seo_title_panel_falls_back_to_title() {
        let mut page = about_page();
        page.seo_title = Some(String::new());
        let panel = MetaPanel::new(MetaField::SeoTitle);
        assert_eq!(panel.value(&page), "About Us");
    }

    #[test]
    fn id_panel_renders_decimal() {
        let panel = MetaPanel::new(MetaField::Id);
        assert_eq!(panel.value(&about_page()), "7");
    }

    #[test]
    fn last_published_panel_renders_rfc3339_or_empty() {
        let panel = MetaPanel::new(MetaField::LastPublishedAt);
        assert_eq!(panel.value(&about_page()), "2024-05-02T12:00:00+00:00");
        let unpublished = TestPage::default();
        assert_eq!(panel.value(&unpublished), "");
    }

    #[test]
    fn custom_meta_field_falls_back_to_normalizer() {
        let mut page = about_page();
        page.fields
            .insert("subtitle".to_string(), FieldValue::text("Who we are"));
        let panel = MetaPanel::new(MetaField::Custom("subtitle".to_string()));
        assert_eq!(panel.value(&page), "Who we are");
    }

    #[test]
    fn record_has_fixed_shape() {
        let page = about_page();
        let collection = PanelCollection::new(vec![], true);
        let record = collection.render_record(&page);
        assert_eq!(record.id.0, 7);
        assert_eq!(record.url, "https://example.com/about-us/");
        assert_eq!(record.slug, "about-us");
        assert_eq!(record.title, "About Us");
        assert_eq!(record.seo_metadata.seo_title, "About Us");
        assert_eq!(record.last_published_at, "2024-05-02T12:00:00+00:00");
        assert!(record.content.contains("## Page Title"));
    }
}
