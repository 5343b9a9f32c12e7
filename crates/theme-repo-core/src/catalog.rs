//! Global catalog of template identifiers.

use crate::error::FetchError;
use crate::template::TemplateId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum CatalogState {
    #[default]
    NotFetched,
    Fetching,
    Ready(Vec<TemplateId>),
    Failed,
}

/// Fetched once and cached for the process lifetime. A failed fetch is
/// retried the next time someone asks for it.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    state: CatalogState,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should issue `GET /templates`.
    pub fn begin_fetch(&mut self) -> bool {
        match self.state {
            CatalogState::NotFetched | CatalogState::Failed => {
                self.state = CatalogState::Fetching;
                true
            }
            CatalogState::Fetching | CatalogState::Ready(_) => false,
        }
    }

    /// Apply the `/templates` result. Duplicate ids are dropped, keeping
    /// the first occurrence.
    pub fn resolve(
        &mut self,
        result: Result<Vec<TemplateId>, FetchError>,
    ) -> Result<usize, FetchError> {
        match result {
            Ok(ids) => {
                let mut unique: Vec<TemplateId> = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(&id) {
                        unique.push(id);
                    }
                }
                let count = unique.len();
                self.state = CatalogState::Ready(unique);
                Ok(count)
            }
            Err(err) => {
                self.state = CatalogState::Failed;
                Err(err)
            }
        }
    }

    /// Options for the selector; empty until the catalog is ready.
    pub fn templates(&self) -> &[TemplateId] {
        match &self.state {
            CatalogState::Ready(ids) => ids,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, CatalogState::Ready(_))
    }
}
