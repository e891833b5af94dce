use std::sync::Arc;

use linkbox_core::Shortener;

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    fallback_page: Option<Arc<str>>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>) -> Self {
        Self {
            shortener,
            fallback_page: None,
        }
    }

    /// HTML served by the redirect route when a short code cannot be resolved.
    pub fn with_fallback_page(mut self, html: impl Into<Arc<str>>) -> Self {
        self.fallback_page = Some(html.into());
        self
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn fallback_page(&self) -> Option<&str> {
        self.fallback_page.as_deref()
    }
}
