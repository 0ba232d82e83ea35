//! Cursor pagination over GraphQL connections.
//!
//! Connection fields page with `first`/`after` (forward) or `last`/`before`
//! (backward), returning opaque per-edge cursors and a `hasNextPage` flag.
//! [`ListOptions`] validates and encodes a page request, the wire types mirror
//! the connection shape, and [`Page`] is the caller-facing slice with the
//! cursors needed to continue.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error type for invalid page requests.
///
/// Validation happens locally, before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// `first` and `last` were both set.
    #[error("'first' and 'last' cannot be combined in a single page request")]
    ConflictingLimits,

    /// `after` and `before` were both set.
    #[error("'after' and 'before' cannot be combined in a single page request")]
    ConflictingCursors,
}

/// A single page request against a connection field.
///
/// Forward pagination sets `first` (optionally with `after`); backward
/// pagination sets `last` (optionally with `before`). Mixing the two
/// directions in one request is rejected by [`variables`](Self::variables).
///
/// # Example
///
/// ```rust
/// use shopify_graphql::pagination::ListOptions;
///
/// let options = ListOptions {
///     query: Some("created_at:>2024-01-01".to_string()),
///     first: Some(50),
///     ..ListOptions::default()
/// };
/// let variables = options.variables().unwrap();
/// assert_eq!(variables["first"], 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// The search filter, in the Admin API's search syntax.
    pub query: Option<String>,

    /// Page size when paging forward.
    pub first: Option<i32>,

    /// Page size when paging backward.
    pub last: Option<i32>,

    /// Resume after this cursor (forward pagination).
    pub after: Option<String>,

    /// Resume before this cursor (backward pagination).
    pub before: Option<String>,

    /// Reverse the connection's natural sort order.
    pub reverse: bool,
}

impl ListOptions {
    /// Encodes the request as GraphQL variables.
    ///
    /// Unset limits and cursors are omitted entirely so the server applies
    /// its defaults; an unset `query` is sent as the empty string, which
    /// matches everything.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when `first`/`last` or `after`/`before`
    /// are combined.
    pub fn variables(&self) -> Result<serde_json::Value, PaginationError> {
        if self.first.is_some() && self.last.is_some() {
            return Err(PaginationError::ConflictingLimits);
        }
        if self.after.is_some() && self.before.is_some() {
            return Err(PaginationError::ConflictingCursors);
        }

        let mut variables = serde_json::Map::new();
        variables.insert(
            "query".to_string(),
            serde_json::Value::from(self.query.clone().unwrap_or_default()),
        );
        variables.insert("reverse".to_string(), serde_json::Value::from(self.reverse));
        if let Some(first) = self.first {
            variables.insert("first".to_string(), serde_json::Value::from(first));
        }
        if let Some(last) = self.last {
            variables.insert("last".to_string(), serde_json::Value::from(last));
        }
        if let Some(after) = &self.after {
            variables.insert("after".to_string(), serde_json::Value::from(after.clone()));
        }
        if let Some(before) = &self.before {
            variables.insert("before".to_string(), serde_json::Value::from(before.clone()));
        }

        Ok(serde_json::Value::Object(variables))
    }
}

/// Page-boundary metadata of a connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more results exist past this page, in the paging direction.
    #[serde(default)]
    pub has_next_page: bool,
}

/// A connection edge: one node plus its resume cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge<T> {
    /// The record itself.
    pub node: T,

    /// The opaque cursor addressing this edge's position.
    #[serde(default)]
    pub cursor: String,
}

/// The wire shape of a paginated connection field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The edges of this page, in response order.
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,

    /// Page-boundary metadata.
    #[serde(default)]
    pub page_info: PageInfo,
}

/// One page of results with the cursors needed to fetch the next.
///
/// Built from a [`Connection`]; an empty page has no cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The records on this page, in response order.
    pub items: Vec<T>,

    /// The cursor of the first edge, absent when the page is empty.
    pub first_cursor: Option<String>,

    /// The cursor of the last edge, absent when the page is empty. Pass it
    /// as `after` to fetch the next page.
    pub last_cursor: Option<String>,

    /// Whether more results exist past this page.
    pub has_next_page: bool,
}

impl<T> From<Connection<T>> for Page<T> {
    fn from(connection: Connection<T>) -> Self {
        let first_cursor = connection.edges.first().map(|edge| edge.cursor.clone());
        let last_cursor = connection.edges.last().map(|edge| edge.cursor.clone());
        let items = connection.edges.into_iter().map(|edge| edge.node).collect();

        Self {
            items,
            first_cursor,
            last_cursor,
            has_next_page: connection.page_info.has_next_page,
        }
    }
}

/// Deserializes a connection-shaped or plain-array field into a `Vec`.
///
/// Synchronous queries return nested lists as connections
/// (`{"edges":[{"node":...}]}`), while reassembled bulk results carry them as
/// plain arrays. Model types use this on their list fields so one set of
/// types decodes both shapes. `null` and absent fields both decode as empty.
pub fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Connection { edges: Vec<EdgeNode<T>> },
        Plain(Vec<T>),
        Null,
    }

    #[derive(Deserialize)]
    struct EdgeNode<T> {
        node: T,
    }

    match Repr::deserialize(deserializer)? {
        Repr::Connection { edges } => Ok(edges.into_iter().map(|edge| edge.node).collect()),
        Repr::Plain(items) => Ok(items),
        Repr::Null => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variables_omit_unset_cursors_and_limits() {
        let options = ListOptions {
            first: Some(10),
            ..ListOptions::default()
        };
        let variables = options.variables().unwrap();

        assert_eq!(variables["first"], 10);
        assert_eq!(variables["query"], "");
        assert_eq!(variables["reverse"], false);
        assert!(variables.get("last").is_none());
        assert!(variables.get("after").is_none());
        assert!(variables.get("before").is_none());
    }

    #[test]
    fn test_variables_carry_query_cursor_and_reverse() {
        let options = ListOptions {
            query: Some("status:open".to_string()),
            first: Some(25),
            after: Some("cursor-a".to_string()),
            reverse: true,
            ..ListOptions::default()
        };
        let variables = options.variables().unwrap();

        assert_eq!(variables["query"], "status:open");
        assert_eq!(variables["after"], "cursor-a");
        assert_eq!(variables["reverse"], true);
    }

    #[test]
    fn test_first_and_last_conflict() {
        let options = ListOptions {
            first: Some(10),
            last: Some(10),
            ..ListOptions::default()
        };
        assert_eq!(
            options.variables().unwrap_err(),
            PaginationError::ConflictingLimits
        );
    }

    #[test]
    fn test_after_and_before_conflict() {
        let options = ListOptions {
            after: Some("a".to_string()),
            before: Some("b".to_string()),
            ..ListOptions::default()
        };
        assert_eq!(
            options.variables().unwrap_err(),
            PaginationError::ConflictingCursors
        );
    }

    #[test]
    fn test_page_from_connection_extracts_cursors() {
        let connection: Connection<serde_json::Value> = serde_json::from_value(json!({
            "edges": [
                {"node": {"id": "1"}, "cursor": "cur-1"},
                {"node": {"id": "2"}, "cursor": "cur-2"},
            ],
            "pageInfo": {"hasNextPage": true}
        }))
        .unwrap();

        let page = Page::from(connection);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.first_cursor.as_deref(), Some("cur-1"));
        assert_eq!(page.last_cursor.as_deref(), Some("cur-2"));
        assert!(page.has_next_page);
    }

    #[test]
    fn test_empty_page_has_no_cursors() {
        let connection: Connection<serde_json::Value> =
            serde_json::from_value(json!({"edges": [], "pageInfo": {"hasNextPage": false}}))
                .unwrap();

        let page = Page::from(connection);
        assert!(page.items.is_empty());
        assert!(page.first_cursor.is_none());
        assert!(page.last_cursor.is_none());
        assert!(!page.has_next_page);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, deserialize_with = "nodes")]
        items: Vec<String>,
    }

    #[test]
    fn test_nodes_decodes_connection_shape() {
        let holder: Holder = serde_json::from_value(json!({
            "items": {"edges": [{"node": "a"}, {"node": "b"}]}
        }))
        .unwrap();
        assert_eq!(holder.items, vec!["a", "b"]);
    }

    #[test]
    fn test_nodes_decodes_plain_array() {
        let holder: Holder = serde_json::from_value(json!({"items": ["a", "b"]})).unwrap();
        assert_eq!(holder.items, vec!["a", "b"]);
    }

    #[test]
    fn test_nodes_treats_null_and_absent_as_empty() {
        let holder: Holder = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(holder.items.is_empty());

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.items.is_empty());
    }
}
