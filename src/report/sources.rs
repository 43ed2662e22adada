//! Grounding-citation extraction
//!
//! The provider's grounding metadata is a side channel next to the main JSON
//! payload. Chunks referencing web pages become citation records; chunks
//! referencing anything else are skipped without complaint, since grounding
//! may point at non-web material.

use crate::models::SourceRef;
use crate::report::provider::GenerateContentResponse;

/// Pull citation records out of a provider response's grounding side channel.
///
/// Provider order is preserved; there is no deduplication or ranking. An
/// entirely absent side channel yields an empty list, never an error.
#[must_use]
pub fn extract_sources(response: &GenerateContentResponse) -> Vec<SourceRef> {
    let Some(metadata) = response
        .candidates
        .first()
        .and_then(|candidate| candidate.grounding_metadata.as_ref())
    else {
        return Vec::new();
    };

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| SourceRef {
            // The uri doubles as the title when the page has none
            title: web.title.clone().unwrap_or_else(|| web.uri.clone()),
            uri: web.uri.clone(),
        })
        .collect()
}
