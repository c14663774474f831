use std::sync::Arc;

use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{FilterError, FilterResult},
        models::{ExportManifest, OutputEntry, ProxyEndpoint, RequestContext, SynthesizedCategories},
        value_objects::OwnerId,
    },
    ports::services::OutputFilter,
};

/// A manifest entry whose origin URL has been checked against the caller's
/// owner partition.
#[derive(Debug, Clone)]
pub struct VerifiedEntry<'a> {
    pub entry: &'a OutputEntry,
    pub origin: Url,
}

/// Rewrites completed export job-status responses: enforces owner isolation,
/// routes file URLs through the public proxy and appends synthesized
/// categories.
#[derive(Debug, Clone)]
pub struct ExportCompletionTransformer {
    id: String,
    endpoint: ProxyEndpoint,
    categories: Arc<SynthesizedCategories>,
}

impl ExportCompletionTransformer {
    pub const NAME: &'static str = "ExportCompletionTransformer";

    pub fn new(endpoint: ProxyEndpoint, categories: Arc<SynthesizedCategories>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            endpoint,
            categories,
        }
    }

    /// Parse a job-status body and build the transformed manifest.
    ///
    /// Either every entry belongs to `owner` and the full manifest is
    /// returned, or nothing is.
    pub fn transform(&self, body: &str, owner: &OwnerId) -> FilterResult<ExportManifest> {
        let manifest = ExportManifest::from_json(body).map_err(|e| {
            self.malformed(format!("export status body is not a valid manifest: {}", e))
        })?;

        let verified = self.validate_ownership(&manifest, owner)?;
        let mut output = self.rewrite_urls(verified);
        let synthesized = self.synthesize(&output)?;
        output.extend(synthesized);

        debug!(
            filter_id = %self.id,
            owner_id = %owner,
            entries = output.len(),
            "Export manifest transformed"
        );

        Ok(ExportManifest {
            requires_access_token: true,
            output,
            extra: manifest.extra,
        })
    }

    /// Check every entry's origin path starts with the owner's partition.
    /// Fails on the first entry that does not.
    pub fn validate_ownership<'a>(
        &self,
        manifest: &'a ExportManifest,
        owner: &OwnerId,
    ) -> FilterResult<Vec<VerifiedEntry<'a>>> {
        let mut verified = Vec::with_capacity(manifest.output.len());

        for entry in &manifest.output {
            let origin = Url::parse(&entry.url).map_err(|e| {
                self.malformed(format!(
                    "output entry '{}' has an invalid url '{}': {}",
                    entry.resource_type, entry.url, e
                ))
            })?;

            let segment = origin
                .path_segments()
                .and_then(|mut segments| segments.next())
                .unwrap_or_default()
                .to_string();

            if !owner.owns_segment(&segment) {
                warn!(
                    filter_id = %self.id,
                    owner_id = %owner,
                    container = %segment,
                    "Export access attempted with a token for the wrong owner"
                );
                return Err(FilterError::ownership_violation(
                    Self::NAME,
                    &self.id,
                    owner.as_str(),
                    segment,
                ));
            }

            verified.push(VerifiedEntry { entry, origin });
        }

        Ok(verified)
    }

    /// Point every verified entry at the public proxy, keeping the
    /// owner-scoped path, query and fragment.
    pub fn rewrite_urls(&self, verified: Vec<VerifiedEntry<'_>>) -> Vec<OutputEntry> {
        verified
            .into_iter()
            .map(|VerifiedEntry { entry, origin }| OutputEntry {
                url: self
                    .endpoint
                    .export_url(origin.path(), origin.query(), origin.fragment()),
                ..entry.clone()
            })
            .collect()
    }

    /// Build the synthesized entries from the already rewritten template
    /// entry, in configured order.
    pub fn synthesize(&self, rewritten: &[OutputEntry]) -> FilterResult<Vec<OutputEntry>> {
        let template_category = self.categories.template_category();

        let template = rewritten
            .iter()
            .find(|entry| entry.resource_type == template_category)
            .ok_or_else(|| {
                self.malformed(format!(
                    "export output has no '{}' entry to derive synthesized entries from",
                    template_category
                ))
            })?;

        Ok(self
            .categories
            .categories()
            .iter()
            .map(|category| {
                OutputEntry::new(
                    category.name.clone(),
                    template.url.replace(template_category, &category.name),
                    category.count,
                )
            })
            .collect())
    }

    fn malformed(&self, reason: String) -> FilterError {
        FilterError::malformed_manifest(Self::NAME, &self.id, reason, None)
    }
}

impl OutputFilter for ExportCompletionTransformer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, mut context: RequestContext) -> FilterResult<RequestContext> {
        if !context.is_completed_export_check() {
            return Ok(context);
        }

        info!(filter_id = %self.id, uri = %context.request_uri, "Entered {}", Self::NAME);

        let manifest = self
            .transform(&context.body, &context.owner_id)
            .and_then(|manifest| {
                manifest.to_json().map_err(|e| {
                    self.malformed(format!("could not serialize transformed manifest: {}", e))
                })
            });

        match manifest {
            Ok(body) => {
                context.body = body;
                Ok(context)
            }
            Err(err) if err.is_ownership_violation() => Err(err),
            Err(err) => {
                error!(
                    filter_id = %self.id,
                    error = %err,
                    body = %context.body,
                    "Could not process export check result"
                );
                Err(err.with_response_body(context.body))
            }
        }
    }
}
