use pagerag_common::types::SeoMetadata;

use crate::page::PageFields;

/// Extract the SEO metadata block from a page.
///
/// Keywords are split on commas and trimmed, with empty entries dropped;
/// the SEO title falls back to the page title when unset or blank.
pub fn seo_metadata(page: &dyn PageFields) -> SeoMetadata {
    let meta_keywords = page
        .meta_keywords()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let seo_title = match page.seo_title() {
        Some(seo) if !seo.is_empty() => seo.to_string(),
        _ => page.title().to_string(),
    };

    SeoMetadata {
        seo_title,
        search_description: page.search_description().unwrap_or_default().to_string(),
        meta_keywords,
        tags: page.tags().unwrap_or_default(),
    }
}
