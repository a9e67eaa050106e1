//! Records returned by the yells backend.
//!
//! Every item the API serves is one of three closed variants (post, request,
//! comment) sharing a common base. Ids are only unique within a variant, so
//! an id is always paired with a [`ContentKind`] or the polymorphic `yell`
//! namespace when addressing the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// A type tag the client does not know how to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown content type: {0}")]
pub struct UnknownContentType(pub String);

/// Why a JSON body could not be turned into a record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record has no base_type tag")]
    MissingType,
    #[error(transparent)]
    UnknownType(#[from] UnknownContentType),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three kinds of content the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Post,
    Request,
    Comment,
}

impl ContentKind {
    /// Parse a type tag, accepting the short database synonyms.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownContentType`] for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownContentType> {
        match tag {
            "post" | "pst" => Ok(Self::Post),
            "request" | "req" => Ok(Self::Request),
            "comment" | "com" => Ok(Self::Comment),
            other => Err(UnknownContentType(other.to_string())),
        }
    }

    /// Canonical tag used in URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Request => "request",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// API namespace an item is fetched from.
///
/// `Yell` is the polymorphic namespace: the record's own `base_type` decides
/// which variant it decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Yell,
    Kind(ContentKind),
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yell => f.write_str("yell"),
            Self::Kind(kind) => kind.fmt(f),
        }
    }
}

impl FromStr for Namespace {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "yell" {
            Ok(Self::Yell)
        } else {
            ContentKind::from_tag(s).map(Self::Kind)
        }
    }
}

impl From<ContentKind> for Namespace {
    fn from(kind: ContentKind) -> Self {
        Self::Kind(kind)
    }
}

/// How a single item is addressed in an API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef {
    Id(u64),
    /// The newest item in the namespace.
    Last,
    /// The highest rated item in the namespace.
    Rated,
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Last => f.write_str("last"),
            Self::Rated => f.write_str("rated"),
        }
    }
}

/// Result of looking something up on the backend.
///
/// The backend signals a missing item with the literal `"404"` body rather
/// than an error, so a miss is a value, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

/// Solved state of a request.
///
/// Only a JSON boolean is meaningful; every other value (null, missing,
/// strings, numbers) is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    Solved,
    Open,
    #[default]
    Unknown,
}

impl RequestState {
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::Solved,
            Value::Bool(false) => Self::Open,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for RequestState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Accept integer or float counters (older databases stored ratings as floats).
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    let count = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0);
    Ok(count)
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Fields every record carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordBase {
    pub content_id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// ISO timestamp as sent by the backend.
    #[serde(default, deserialize_with = "lenient_string")]
    pub base_datetime: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub base_title: String,
    /// Upvote count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub base_rating: i64,
    /// Reply count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub base_comments: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_filename: String,
    /// Rendered markdown, sanitized by the backend.
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_description: String,
    /// Highlighted source, sanitized by the backend.
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(default)]
    pub request_state: RequestState,
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comment_content: String,
}

/// A content item, closed over the kinds the renderer knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRecord {
    Post(PostRecord),
    Request(RequestRecord),
    Comment(CommentRecord),
}

impl ContentRecord {
    /// Decode a record, choosing the variant from its `base_type` tag.
    ///
    /// # Errors
    ///
    /// Fails when the tag is missing or unknown, or the fields don't match.
    pub fn from_json(value: Value) -> Result<Self, DecodeError> {
        let kind = value
            .get("base_type")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingType)
            .and_then(|tag| ContentKind::from_tag(tag).map_err(DecodeError::from))?;
        Self::from_json_as(kind, value)
    }

    /// Decode a record as `kind`, ignoring whatever tag it carries.
    ///
    /// # Errors
    ///
    /// Fails when the fields don't match the requested kind.
    pub fn from_json_as(kind: ContentKind, value: Value) -> Result<Self, DecodeError> {
        Ok(match kind {
            ContentKind::Post => Self::Post(serde_json::from_value(value)?),
            ContentKind::Request => Self::Request(serde_json::from_value(value)?),
            ContentKind::Comment => Self::Comment(serde_json::from_value(value)?),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Post(_) => ContentKind::Post,
            Self::Request(_) => ContentKind::Request,
            Self::Comment(_) => ContentKind::Comment,
        }
    }

    #[must_use]
    pub const fn base(&self) -> &RecordBase {
        match self {
            Self::Post(post) => &post.base,
            Self::Request(request) => &request.base,
            Self::Comment(comment) => &comment.base,
        }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.base().content_id
    }

    /// Relative link to the item's own page.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}/{}", self.kind(), self.id())
    }
}

/// Record shape served by the legacy `/yell/{id}` route.
///
/// Every legacy yell is a code post.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyYell {
    pub yell_id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub yell_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub yell_description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub yell_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub yell_filename: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub yell_rating: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub yell_datetime: String,
}

impl From<LegacyYell> for ContentRecord {
    fn from(yell: LegacyYell) -> Self {
        Self::Post(PostRecord {
            base: RecordBase {
                content_id: yell.yell_id,
                author: yell.author,
                base_datetime: yell.yell_datetime,
                base_title: yell.yell_title,
                base_rating: yell.yell_rating,
                base_comments: 0,
            },
            post_filename: yell.yell_filename,
            post_description: yell.yell_description,
            post_code: yell.yell_code,
        })
    }
}

/// Tags attached to an item, in display order.
pub type TagSet = Vec<String>;

/// A reference to one comment in a [`CommentSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommentRef {
    pub comment_id: u64,
}

/// The comments attached to a parent item, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentSet {
    #[serde(default)]
    pub comments: Vec<CommentRef>,
}

/// Whether the current viewer already liked an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    Liked,
    NotLiked,
    Unknown,
}

impl LikeStatus {
    /// Parse the bare text body of the status endpoint.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "True" => Self::Liked,
            "False" => Self::NotLiked,
            _ => Self::Unknown,
        }
    }
}

/// Reply of the like and unlike endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleReply {
    /// `yay`: the toggle was recorded.
    Done,
    /// `unlogged`: the viewer has to log in first.
    Unlogged,
    Unexpected(String),
}

impl ToggleReply {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "yay" => Self::Done,
            "unlogged" => Self::Unlogged,
            other => Self::Unexpected(other.to_string()),
        }
    }
}
