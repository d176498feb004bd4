use std::panic::{catch_unwind, AssertUnwindSafe};

use pagerag_client::{RagClient, RagClientError};
use pagerag_common::config::RagConfig;
use pagerag_content::fingerprint::page_fingerprint;
use pagerag_content::page::{self, PageFields};

/// A page-published event, as delivered by the host CMS.
pub struct PagePublished<'a> {
    pub page: &'a dyn PageFields,
    /// Revision that was published, when the host tracks revisions.
    pub revision_id: Option<i64>,
}

/// The single registered handler for page-published events.
///
/// Runs inline on the publisher's task: no queue, no retry. Delivery adds
/// latency to the publish request but can never fail it.
pub struct PublishHandler {
    client: RagClient,
    active: bool,
}

impl PublishHandler {
    pub fn new(config: &RagConfig) -> Result<Self, RagClientError> {
        Ok(Self {
            client: RagClient::new(config)?,
            active: config.is_active,
        })
    }

    /// Handle one publish event.
    ///
    /// Pages whose type declares no panels are skipped with a debug log.
    /// Rendering runs inside `catch_unwind` so a misbehaving field processor
    /// is contained here rather than unwinding into the publish path.
    pub async fn handle(&self, event: PagePublished<'_>) {
        let page = event.page;
        if page.as_indexable().is_none() {
            tracing::debug!(page_id = %page.id(), "page type is not indexable, skipping");
            return;
        }

        let rendered = catch_unwind(AssertUnwindSafe(|| {
            let record = page::render_record(page)?;
            let fields = page::indexed_field_names(page).unwrap_or_default();
            Some((record, fields))
        }));
        let Ok(Some((record, fields))) = rendered else {
            tracing::error!(page_id = %page.id(), "failed to render page for indexing");
            return;
        };

        tracing::info!(
            page_id = %page.id(),
            title = %record.title,
            revision_id = ?event.revision_id,
            fields = ?fields,
            content_length = record.content.len(),
            "indexing published page"
        );
        tracing::debug!(fingerprint = %page_fingerprint(page), "page fingerprint");

        if !self.active {
            tracing::debug!(page_id = %page.id(), "rag sync disabled, skipping delivery");
            return;
        }
        self.client.index_page(&record).await;
    }
}
