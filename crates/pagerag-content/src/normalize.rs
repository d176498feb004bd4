use crate::markdown;
use crate::page::PageFields;
use crate::value::FieldValue;

/// Transform applied to a field value before shape dispatch.
pub type Processor = dyn Fn(FieldValue) -> FieldValue + Send + Sync;

/// Resolve `name` on a page: declared fields first, then built-in attributes.
pub fn lookup(page: &dyn PageFields, name: &str) -> FieldValue {
    if let Some(value) = page.field(name) {
        return value;
    }
    match name {
        "id" => FieldValue::Int(page.id().0),
        "title" => FieldValue::text(page.title()),
        "slug" => FieldValue::text(page.slug()),
        "seo_title" => opt_text(page.seo_title()),
        "search_description" => opt_text(page.search_description()),
        "meta_keywords" => opt_text(page.meta_keywords()),
        "url" => page
            .full_url()
            .map(FieldValue::Text)
            .unwrap_or(FieldValue::Missing),
        "last_published_at" => page
            .last_published_at()
            .map(|at| FieldValue::Text(at.to_rfc3339()))
            .unwrap_or(FieldValue::Missing),
        "tags" => page
            .tags()
            .map(FieldValue::Relation)
            .unwrap_or(FieldValue::Missing),
        _ => FieldValue::Missing,
    }
}

fn opt_text(value: Option<&str>) -> FieldValue {
    match value {
        Some(text) => FieldValue::text(text),
        None => FieldValue::Missing,
    }
}

/// Normalize one page attribute into plain text or markdown.
///
/// Resolution: look the field up, call it if deferred, apply the optional
/// processor, then dispatch on shape in fixed priority order — title heading
/// special case, rich text, block stream, relation, markup catch-all.
/// Falsy final values come back as the empty string; unrecognized shapes are
/// treated as markup rather than rejected.
pub fn normalize(
    page: &dyn PageFields,
    field_name: &str,
    processor: Option<&Processor>,
) -> String {
    let mut value = match lookup(page, field_name) {
        FieldValue::Computed(resolve) => resolve(),
        value => value,
    };
    if let Some(processor) = processor {
        value = processor(value);
    }
    if field_name == "title" {
        return format!("# {}", value.display_string());
    }
    match value {
        FieldValue::RichText(rich) => markdown::to_markdown(&rich.source),
        FieldValue::Stream(stream) => markdown::stream_to_markdown(&stream),
        FieldValue::Relation(items) => items.join(", "),
        FieldValue::Text(text) => markdown::to_markdown(&text),
        FieldValue::Int(0) | FieldValue::Missing => String::new(),
        FieldValue::Int(n) => markdown::to_markdown(&n.to_string()),
        // a processor handed back another deferred value; nothing to render
        FieldValue::Computed(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fixtures::TestPage;
    use crate::value::{Block, BlockValue, RichText, StreamValue};

    fn page_with(name: &str, value: FieldValue) -> TestPage {
        let mut page = TestPage {
            title: "About Us".to_string(),
            ..TestPage::default()
        };
        page.fields.insert(name.to_string(), value);
        page
    }

    #[test]
    fn missing_field_is_empty() {
        let page = TestPage::default();
        assert_eq!(normalize(&page, "body", None), "");
    }

    #[test]
    fn title_always_renders_as_heading() {
        let page = TestPage {
            title: "About Us".to_string(),
            ..TestPage::default()
        };
        assert_eq!(normalize(&page, "title", None), "# About Us");
    }

    #[test]
    fn title_heading_wins_over_processor_shape() {
        let page = TestPage {
            title: "About Us".to_string(),
            ..TestPage::default()
        };
        let processor: Box<Processor> =
            Box::new(|_| FieldValue::rich("<p>replaced</p>"));
        assert_eq!(
            normalize(&page, "title", Some(processor.as_ref())),
            "# <p>replaced</p>"
        );
    }

    #[test]
    fn rich_text_converts_to_markdown() {
        let page = page_with("body", FieldValue::rich("<h2>Team</h2><p>People</p>"));
        let rendered = normalize(&page, "body", None);
        assert!(rendered.contains("Team"));
        assert!(rendered.contains("People"));
        assert!(!rendered.contains("<p>"));
    }

    #[test]
    fn stream_converts_via_block_converter() {
        let stream = StreamValue::new(vec![
            Block::new("text", BlockValue::Text("first".to_string())),
            Block::new(
                "paragraph",
                BlockValue::RichText(RichText::new("<p>second</p>")),
            ),
        ]);
        let page = page_with("body", FieldValue::Stream(stream));
        assert_eq!(normalize(&page, "body", None), "first\n\nsecond");
    }

    #[test]
    fn relation_renders_comma_separated() {
        let page = page_with(
            "authors",
            FieldValue::Relation(vec!["Ada".to_string(), "Grace".to_string()]),
        );
        assert_eq!(normalize(&page, "authors", None), "Ada, Grace");
    }

    #[test]
    fn computed_value_is_called_before_dispatch() {
        let page = page_with(
            "summary",
            FieldValue::computed(|| FieldValue::text("lazy text")),
        );
        assert_eq!(normalize(&page, "summary", None), "lazy text");
    }

    #[test]
    fn processor_replaces_value_before_dispatch() {
        let page = page_with("body", FieldValue::text("ignored"));
        let processor: Box<Processor> =
            Box::new(|_| FieldValue::Relation(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(normalize(&page, "body", Some(processor.as_ref())), "a, b");
    }

    #[test]
    fn scalar_catch_all_treats_value_as_markup() {
        let page = page_with("note", FieldValue::text("plain <b>bold</b>"));
        assert_eq!(normalize(&page, "note", None), "plain **bold**");
    }

    #[test]
    fn builtin_attributes_resolve_by_name() {
        let page = TestPage {
            slug: "about".to_string(),
            ..TestPage::default()
        };
        assert_eq!(normalize(&page, "slug", None), "about");
    }

    #[test]
    fn falsy_values_render_empty() {
        assert_eq!(
            normalize(&page_with("n", FieldValue::Int(0)), "n", None),
            ""
        );
        assert_eq!(
            normalize(&page_with("r", FieldValue::Relation(vec![])), "r", None),
            ""
        );
        assert_eq!(
            normalize(&page_with("t", FieldValue::text("")), "t", None),
            ""
        );
    }
}
