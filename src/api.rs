//! API layer: endpoint URLs, fetches, and per-entity ordering rules
//!
//! [`ApiClient`] is the typed surface over the retrying HTTP client. It knows
//! the three endpoints, the server-side query filters for child entities, and
//! the client-side recency ordering applied to child lists before truncation.

use crate::client::RetryingClient;
use crate::config::Config;
use crate::error::Result;
use crate::types::{Comment, Post, User};
use chrono::{DateTime, Utc};
use url::Url;

/// Typed client for the users/posts/comments hierarchy
///
/// Cloning is cheap; the underlying HTTP client is reference-counted.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: RetryingClient,
    base_url: Url,
    posts_per_user: usize,
    comments_per_post: usize,
}

impl ApiClient {
    /// Create an API client from the pipeline configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::error::Error::Config) for an invalid
    /// `base_url`, or [`Error::Network`](crate::error::Error::Network) if the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: RetryingClient::new(config)?,
            base_url: config.parse_base_url()?,
            posts_per_user: config.posts_per_user,
            comments_per_post: config.comments_per_post,
        })
    }

    /// Fetch all users. No ordering or filtering is applied here.
    ///
    /// # Errors
    /// Propagates the terminal fetch error unchanged.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.endpoint("users", None);
        self.client.fetch(&url).await
    }

    /// Fetch the most recent posts of one user.
    ///
    /// Posts are filtered server-side by `userId`, ordered most-recent-first
    /// (by `date` when every post carries one, else by `id`), and truncated
    /// to the configured `posts_per_user`.
    ///
    /// # Errors
    /// Propagates the terminal fetch error unchanged.
    pub async fn list_posts_for_user(&self, user_id: u64) -> Result<Vec<Post>> {
        let url = self.endpoint("posts", Some(("userId", user_id)));
        let mut posts: Vec<Post> = self.client.fetch(&url).await?;
        order_most_recent_first(&mut posts, |p| p.date, |p| p.id);
        posts.truncate(self.posts_per_user);
        Ok(posts)
    }

    /// Fetch the most recent comments of one post.
    ///
    /// Analogous to [`list_posts_for_user`](Self::list_posts_for_user), using
    /// the `postId` filter and `comments_per_post`.
    ///
    /// # Errors
    /// Propagates the terminal fetch error unchanged.
    pub async fn list_comments_for_post(&self, post_id: u64) -> Result<Vec<Comment>> {
        let url = self.endpoint("comments", Some(("postId", post_id)));
        let mut comments: Vec<Comment> = self.client.fetch(&url).await?;
        order_most_recent_first(&mut comments, |c| c.date, |c| c.id);
        comments.truncate(self.comments_per_post);
        Ok(comments)
    }

    /// Build an endpoint URL from the base URL, a path segment and an
    /// optional query filter.
    fn endpoint(&self, segment: &str, query: Option<(&str, u64)>) -> Url {
        let mut url = self.base_url.clone();
        // Config::parse_base_url rejects cannot-be-a-base URLs, so the Err
        // branch is unreachable; fall back to the unmodified base rather
        // than panic if that invariant ever breaks
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, &value.to_string());
        }
        url
    }
}

/// Sort a child list descending by `date` when every item carries one, else
/// descending by `id`. The sort is stable, so ties keep original fetch order.
fn order_most_recent_first<T>(
    items: &mut [T],
    date: impl Fn(&T) -> Option<DateTime<Utc>>,
    id: impl Fn(&T) -> u64,
) {
    let all_dated = items.iter().all(|item| date(item).is_some());
    if all_dated {
        items.sort_by_key(|item| std::cmp::Reverse(date(item)));
    } else {
        items.sort_by_key(|item| std::cmp::Reverse(id(item)));
    }
}
