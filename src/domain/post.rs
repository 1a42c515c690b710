//! Post and comment domain models.
//!
//! This module defines the core [`Post`] and [`Comment`] types as they arrive
//! from the remote JSON API. Both are immutable once fetched: posts accumulate
//! in the list store until the process exits, comments live only while a detail
//! view or comments overlay is open.

use serde::{Deserialize, Serialize};

/// A post record fetched from the list or item endpoint.
///
/// Wire shape: `{ "userId": 1, "id": 1, "title": "...", "body": "..." }`.
/// The `userId` field is ignored; ids are unique within one API but uniqueness
/// of the accumulated sequence is not enforced here (a racing duplicate fetch
/// may append the same page twice, which the list store tolerates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Returns the post body flattened to a single line for table display.
    ///
    /// Newlines in the wire body are replaced with spaces; the renderer
    /// truncates to the available column width separately.
    #[must_use]
    pub fn body_excerpt(&self) -> String {
        self.body.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Returns true if the post title contains `query` case-insensitively.
    ///
    /// An empty query matches every post. This is the single filtering rule
    /// of the application: a plain substring test on the title, nothing else.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// A comment record fetched from the comments endpoint.
///
/// Wire shape: `{ "postId": 1, "id": 1, "name": "...", "email": "...",
/// "body": "..." }`. The owning post id is implicit in the query parameter
/// used to fetch the comment; the `postId` field is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let p = post(1, "My Title Example");
        assert!(p.title_matches("TITLE"));
        assert!(p.title_matches("title"));
        assert!(p.title_matches("tItLe"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(post(1, "anything").title_matches(""));
        assert!(post(2, "").title_matches(""));
    }

    #[test]
    fn non_substring_does_not_match() {
        assert!(!post(1, "Alpha").title_matches("beta"));
    }

    #[test]
    fn body_excerpt_flattens_whitespace() {
        let p = Post {
            id: 1,
            title: "t".to_string(),
            body: "line one\nline two\n".to_string(),
        };
        assert_eq!(p.body_excerpt(), "line one line two");
    }

    #[test]
    fn post_deserializes_ignoring_user_id() {
        let raw = r#"{"userId": 3, "id": 7, "title": "hello", "body": "world"}"#;
        let p: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.title, "hello");
    }

    #[test]
    fn comment_deserializes_from_wire_shape() {
        let raw = r#"{"postId": 1, "id": 2, "name": "n", "email": "e@x.io", "body": "b"}"#;
        let c: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id, 2);
        assert_eq!(c.email, "e@x.io");
    }
}
