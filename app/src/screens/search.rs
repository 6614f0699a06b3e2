/// Search screens
///
/// Two entry points share the filter engine: the tag picker runs the
/// two-phase remote-then-local search with exact AND semantics, and the
/// free-text screen fetches the feed and refines it with loose
/// case-insensitive matching.
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::models::Post;
use crate::search::filter_posts_by_terms;
use crate::services::PostService;

/// Tag-picker search over the material catalog.
pub struct MaterialSearchScreen {
    posts_service: Arc<PostService>,
    pub selected: Vec<String>,
    pub results: Vec<Post>,
    pub searched: bool,
    pub error: Option<String>,
}

impl MaterialSearchScreen {
    pub fn new(posts_service: Arc<PostService>) -> Self {
        Self {
            posts_service,
            selected: Vec::new(),
            results: Vec::new(),
            searched: false,
            error: None,
        }
    }

    /// Toggle a catalog tag in the selection.
    pub fn toggle(&mut self, tag: &str) {
        if let Some(pos) = self.selected.iter().position(|t| t == tag) {
            self.selected.remove(pos);
        } else {
            self.selected.push(tag.to_string());
        }
    }

    /// Run the search. An empty selection clears the results without any
    /// remote call.
    pub async fn search(&mut self) {
        self.error = None;
        if self.selected.is_empty() {
            self.results.clear();
            self.searched = false;
            return;
        }

        match self.posts_service.search_by_materials(&self.selected).await {
            Ok(posts) => {
                self.results = posts;
                self.searched = true;
            }
            Err(err) => {
                warn!("material search failed: {}", err);
                self.error = Some("Failed to search posts".to_string());
            }
        }
    }
}

/// Free-text search with growable term rows, mirroring the composer's
/// material rows.
pub struct TextSearchScreen {
    posts_service: Arc<PostService>,
    pub terms: Vec<String>,
    pub results: Vec<Post>,
    pub searched: bool,
    pub error: Option<String>,
}

impl TextSearchScreen {
    pub fn new(posts_service: Arc<PostService>) -> Self {
        Self {
            posts_service,
            terms: vec![String::new()],
            results: Vec::new(),
            searched: false,
            error: None,
        }
    }

    pub fn add_term_row(&mut self) {
        self.terms.push(String::new());
    }

    pub fn update_term(&mut self, index: usize, value: &str) {
        if let Some(slot) = self.terms.get_mut(index) {
            *slot = value.to_string();
        }
    }

    pub fn remove_term_row(&mut self, index: usize) {
        if self.terms.len() > 1 && index < self.terms.len() {
            self.terms.remove(index);
        }
    }

    /// Run the search over the whole feed.
    pub async fn search(&mut self) {
        self.error = None;
        let terms: Vec<String> = self
            .terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            self.error = Some("Please add at least one material to search for".to_string());
            return;
        }

        match self.fetch_and_filter(&terms).await {
            Ok(posts) => {
                self.results = posts;
                self.searched = true;
            }
            Err(err) => {
                warn!("text search failed: {}", err);
                self.error = Some("Failed to search posts".to_string());
            }
        }
    }

    async fn fetch_and_filter(&self, terms: &[String]) -> Result<Vec<Post>> {
        let posts = self.posts_service.list_posts().await?;
        Ok(filter_posts_by_terms(posts, terms))
    }
}
