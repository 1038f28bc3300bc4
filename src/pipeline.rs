//! Pipeline orchestration -- full fan-out from users to flattened rows
//!
//! Drives the run as a fixed sequence of phases:
//! 1. Fetch all users; a failure here is fatal and aborts the run.
//! 2. Keep even-id users only (business rule), dropping invalid users before
//!    any child fetch is attempted.
//! 3. Per surviving user, sequentially fetch its posts; a failure skips that
//!    user and the run continues. Users are never processed concurrently, so
//!    at most one user's subtree is in flight.
//! 4. Per user, fetch comments for all of its posts concurrently and join
//!    before moving on. A failed comment fetch is isolated to its post.
//! 5. Validate posts and comments; each valid triple becomes one
//!    [`FlatRecord`], accumulated in user order, then post order, then
//!    comment order.
//!
//! Every concurrent comment fetch returns its own `(post, result)` pair and
//! rows are merged only after the join, so the accumulator is written by a
//! single task.

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::{FlatRecord, Post, User};
use crate::validate::Validate;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Business rule: only users with an even id contribute rows.
fn is_selected_user(user: &User) -> bool {
    user.id % 2 == 0
}

/// Validation gate with skip diagnostics.
///
/// Returns true when the entity is valid; otherwise logs the missing fields
/// and the entity's id (when it has one) and returns false.
fn passes_validation<T: Validate>(entity: &T) -> bool {
    let missing = entity.missing_fields();
    if missing.is_empty() {
        return true;
    }
    warn!(
        kind = T::KIND,
        id = ?entity.id_for_log(),
        missing = ?missing,
        "Skipping entity with missing required fields"
    );
    false
}

/// Run the full retrieval pipeline and return the flattened rows.
///
/// Only the initial user listing can fail the run; every failure below that
/// level is logged, contributes zero rows, and leaves sibling branches
/// untouched. An empty result is reported as a warning, not an error.
///
/// # Errors
/// Returns the terminal fetch error of the user listing (fatal, no partial
/// output).
pub async fn run(api: &ApiClient) -> Result<Vec<FlatRecord>> {
    // Phase 1: user listing, the only fatal fetch
    let users = api.list_users().await?;
    info!(count = users.len(), "Fetched user listing");

    let mut records = Vec::new();

    for user in users {
        // Phase 2: business filter and validation, before any child fetch
        if !is_selected_user(&user) {
            debug!(user_id = user.id, "Skipping user with odd id");
            continue;
        }
        if !passes_validation(&user) {
            continue;
        }

        // Phase 3: posts for this user, non-fatal on failure
        let posts = match api.list_posts_for_user(user.id).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(
                    user_id = user.id,
                    error = %e,
                    "Post fetch failed, skipping user"
                );
                continue;
            }
        };
        debug!(user_id = user.id, posts = posts.len(), "Fetched posts");

        // Phase 4: comment fan-out, joined before the next user starts
        let fetched = fetch_comments_for_posts(api, posts).await;

        // Phase 5: validate and flatten after the join
        for (post, outcome) in fetched {
            if !passes_validation(&post) {
                continue;
            }
            let comments = match outcome {
                Ok(comments) => comments,
                Err(e) => {
                    warn!(
                        user_id = user.id,
                        post_id = post.id,
                        error = %e,
                        "Comment fetch failed, post contributes no rows"
                    );
                    continue;
                }
            };
            for comment in comments {
                if !passes_validation(&comment) {
                    continue;
                }
                records.push(FlatRecord::from_entities(&user, &post, &comment));
            }
        }
    }

    if records.is_empty() {
        warn!("Pipeline produced no rows");
    } else {
        info!(rows = records.len(), "Pipeline complete");
    }
    Ok(records)
}

/// Fetch comments for every post concurrently, one task per post.
///
/// The stream is order-preserving, so results come back in post order, and
/// each task owns its `(post, result)` pair; failures stay attached to the
/// post that produced them.
async fn fetch_comments_for_posts(
    api: &ApiClient,
    posts: Vec<Post>,
) -> Vec<(Post, Result<Vec<crate::types::Comment>>)> {
    let fan_out = posts.len().max(1);
    stream::iter(posts)
        .map(|post| {
            let api = api.clone();
            async move {
                let outcome = api.list_comments_for_post(post.id).await;
                (post, outcome)
            }
        })
        .buffered(fan_out)
        .collect()
        .await
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Comment;

    #[test]
    fn even_id_users_are_selected() {
        let even = User {
            id: 2,
            name: "Ann".to_string(),
        };
        let odd = User {
            id: 3,
            name: "Bob".to_string(),
        };
        assert!(is_selected_user(&even));
        assert!(!is_selected_user(&odd));
    }

    #[test]
    fn validation_gate_reflects_missing_fields() {
        let valid = Comment {
            id: 31,
            body: "nice".to_string(),
            email: "a@b.c".to_string(),
            post_id: 7,
            date: None,
        };
        let invalid = Comment {
            email: String::new(),
            ..valid.clone()
        };
        assert!(passes_validation(&valid));
        assert!(!passes_validation(&invalid));
    }
}
