//! Client for the theme-repo backend HTTP API.
//!
//! - `GET /themes` lists theme summaries
//! - `GET /templates` lists template identifiers
//! - `GET /themes/{name}?template={id}` renders one theme
//!
//! Every call is blocking; callers run them off the UI thread.

use std::time::Duration;
use theme_repo_core::render::RenderResponse;
use theme_repo_core::{FetchError, TemplateId, ThemeSummary};
use url::Url;

/// The three backend requests the gallery needs.
pub trait Backend: Send + Sync {
    fn list_themes(&self) -> Result<Vec<ThemeSummary>, FetchError>;

    fn list_templates(&self) -> Result<Vec<TemplateId>, FetchError>;

    fn render_theme(
        &self,
        theme: &str,
        template: &TemplateId,
    ) -> Result<RenderResponse, FetchError>;
}

/// [`Backend`] over HTTP, using a shared `ureq` agent.
pub struct HttpBackend {
    agent: ureq::Agent,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, base }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` joined with `segments`, each pushed as one encoded path
    /// segment so names containing `/`, `?` or spaces stay intact.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn render_url(&self, theme: &str, template: &TemplateId) -> Url {
        let mut url = self.endpoint(&["themes", theme]);
        url.query_pairs_mut()
            .append_pair("template", template.as_str());
        url
    }

    fn get(&self, url: &Url) -> Result<(String, Option<String>), FetchError> {
        tracing::debug!("GET {}", url);
        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                tracing::debug!("GET {} -> {}", url, status);
                return Err(FetchError::http(status, url.path(), &body));
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::network(transport.to_string()));
            }
        };

        let content_type = response.header("Content-Type").map(str::to_string);
        let body = response.into_string().map_err(|e| match e.kind() {
            // Oversized or non-UTF-8 bodies arrive intact but can't be used
            std::io::ErrorKind::InvalidData => {
                FetchError::parse(format!("unreadable response body: {e}"))
            }
            _ => FetchError::network(format!("failed to read response body: {e}")),
        })?;
        tracing::debug!("GET {} -> {} bytes", url, body.len());
        Ok((body, content_type))
    }
}

impl Backend for HttpBackend {
    fn list_themes(&self) -> Result<Vec<ThemeSummary>, FetchError> {
        let (body, _) = self.get(&self.endpoint(&["themes"]))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn list_templates(&self) -> Result<Vec<TemplateId>, FetchError> {
        let (body, _) = self.get(&self.endpoint(&["templates"]))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn render_theme(
        &self,
        theme: &str,
        template: &TemplateId,
    ) -> Result<RenderResponse, FetchError> {
        let (body, content_type) = self.get(&self.render_url(theme, template))?;
        Ok(RenderResponse::new(body, content_type.as_deref()))
    }
}
