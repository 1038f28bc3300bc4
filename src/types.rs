//! Core data model: the hierarchical API entities and the flattened output row

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a field that may be absent or explicitly `null` to its default.
///
/// Backends emit both shapes interchangeably, and validation treats them the
/// same way: a decode failure here would escalate a single bad field into a
/// whole-response error, which is never what the pipeline wants.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user as returned by `GET /users`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A post as returned by `GET /posts?userId=<id>`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Post title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Owning user
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: u64,

    /// Publication timestamp; not all backends provide one
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A comment as returned by `GET /comments?postId=<id>`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Comment body text
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    /// Commenter email address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Owning post
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_id: u64,

    /// Publication timestamp; not all backends provide one
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// One flattened output row: a (user, post, comment) triple that passed
/// validation at every level
///
/// Field order matches the fixed sink column order, and the serialized names
/// are the sink's column headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRecord {
    /// Identifier of the user the row belongs to
    pub user_id: u64,
    /// Name of the user the row belongs to
    pub user_name: String,
    /// Identifier of the post the comment was made on
    pub post_id: u64,
    /// Title of the post the comment was made on
    pub post_title: String,
    /// Identifier of the comment
    pub comment_id: u64,
    /// Body of the comment
    pub comment_body: String,
    /// Email of the commenter
    pub comment_email: String,
}

impl FlatRecord {
    /// Combine an already-validated user, post and comment into one row.
    ///
    /// Entities are borrowed and copied into the record; nothing is mutated.
    pub fn from_entities(user: &User, post: &Post, comment: &Comment) -> Self {
        Self {
            user_id: user.id,
            user_name: user.name.clone(),
            post_id: post.id,
            post_title: post.title.clone(),
            comment_id: comment.id,
            comment_body: comment.body.clone(),
            comment_email: comment.email.clone(),
        }
    }
}
