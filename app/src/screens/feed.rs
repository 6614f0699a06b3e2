/// Community feed screen
///
/// The feed holds the fetched posts; each rendered post gets a `PostCard`
/// carrying the interaction state for likes and comments. Both writes are
/// optimistic: the card updates its local copy immediately, confirms the
/// baseline when the remote write lands and reverts to the last confirmed
/// baseline when it fails. Card methods take `&mut self`, so concurrent
/// writes on one card cannot interleave.
use std::sync::Arc;

use firebase_client::CurrentUser;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::{Post, ANONYMOUS_COMMENTER};
use crate::services::PostService;

pub struct FeedScreen {
    posts_service: Arc<PostService>,
    pub posts: Vec<Post>,
    pub error: Option<String>,
    pub loading: bool,
}

impl FeedScreen {
    pub fn new(posts_service: Arc<PostService>) -> Self {
        Self {
            posts_service,
            posts: Vec::new(),
            error: None,
            loading: false,
        }
    }

    /// Fetch the feed, newest first. On failure the previous posts stay
    /// visible behind the inline error.
    pub async fn load(&mut self) {
        self.error = None;
        self.loading = true;
        match self.posts_service.list_posts().await {
            Ok(posts) => self.posts = posts,
            Err(err) => {
                warn!("feed fetch failed: {}", err);
                self.error = Some("Failed to fetch posts".to_string());
            }
        }
        self.loading = false;
    }

    /// Pull-to-refresh is a plain reload.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    pub fn card(&self, index: usize) -> Option<PostCard> {
        self.posts
            .get(index)
            .map(|post| PostCard::new(Arc::clone(&self.posts_service), post.clone()))
    }
}

/// Interaction state for one rendered post.
///
/// `post` is the server-confirmed baseline; `likes` and `comments` are the
/// displayed values, which may run ahead of the baseline while a write is
/// in flight.
pub struct PostCard {
    posts_service: Arc<PostService>,
    pub post: Post,
    pub likes: i64,
    pub comments: Vec<String>,
    pub new_comment: String,
}

impl PostCard {
    pub fn new(posts_service: Arc<PostService>, post: Post) -> Self {
        let likes = post.likes;
        let comments = post.comments.clone();
        Self {
            posts_service,
            post,
            likes,
            comments,
            new_comment: String::new(),
        }
    }

    /// Record a like. The displayed count bumps immediately; a failed
    /// write reverts it to the last confirmed count and propagates the
    /// error.
    pub async fn like(&mut self, viewer: Option<&CurrentUser>) -> Result<()> {
        if viewer.is_none() {
            return Err(AppError::Precondition(
                "Please log in to like a post".to_string(),
            ));
        }

        self.likes += 1;
        match self.posts_service.like_post(&self.post.id).await {
            Ok(()) => {
                self.post.likes = self.likes;
                Ok(())
            }
            Err(err) => {
                self.likes = self.post.likes;
                Err(err)
            }
        }
    }

    /// Submit the comment input. A blank input is silently ignored. The
    /// comment appears immediately and the input clears; a failed write
    /// removes the optimistic entry. The cleared input is not restored.
    pub async fn add_comment(&mut self, viewer: Option<&CurrentUser>) -> Result<()> {
        let body = self.new_comment.trim().to_string();
        if body.is_empty() {
            return Ok(());
        }
        let Some(viewer) = viewer else {
            return Err(AppError::Precondition(
                "Please log in to comment".to_string(),
            ));
        };

        let name = viewer.display_name.as_deref().unwrap_or(ANONYMOUS_COMMENTER);
        let comment = Post::format_comment(name, &body);
        self.comments.push(comment.clone());
        self.new_comment.clear();

        match self
            .posts_service
            .add_comment(&self.post.id, viewer.display_name.as_deref(), &body)
            .await
        {
            Ok(_) => {
                self.post.comments = self.comments.clone();
                Ok(())
            }
            Err(err) => {
                self.comments = self.post.comments.clone();
                Err(err)
            }
        }
    }
}
