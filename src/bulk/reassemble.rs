//! Reassembly of flattened bulk results into nested documents.
//!
//! A bulk result file flattens nested connections: every record of a nested
//! type appears as its own line carrying a `__parentId` link instead of being
//! embedded in its parent. The file guarantees that a parent line appears
//! before all of its descendants. Reassembly reverses the flattening, using a
//! caller-supplied [`NestedSchema`] to decide which field of the parent each
//! child type folds back into.

use std::collections::HashMap;

use futures_util::{Stream, StreamExt};
use serde_json::{Map, Value};

use super::errors::BulkError;

/// The synthetic field linking a flattened record to its parent.
const PARENT_LINK_FIELD: &str = "__parentId";

/// Declares how flattened child records fold back into their parents.
///
/// Each entry maps a child type name, as encoded in the record's `id` (e.g.
/// `LineItem` in `gid://shopify/LineItem/123`), to the parent field that
/// collects records of that type. Records whose type has no entry abort the
/// reassembly, since dropping them silently would corrupt the result.
///
/// # Example
///
/// ```rust
/// use shopify_graphql::bulk::NestedSchema;
///
/// let schema = NestedSchema::new()
///     .child("LineItem", "lineItems")
///     .child("FulfillmentOrder", "fulfillmentOrders");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NestedSchema {
    slots: Vec<ChildSlot>,
}

#[derive(Debug, Clone)]
struct ChildSlot {
    type_name: String,
    field: String,
}

impl NestedSchema {
    /// Creates an empty schema. Suitable as-is for queries with no nested
    /// connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that records of `type_name` fold into the parent's `field`.
    #[must_use]
    pub fn child(mut self, type_name: impl Into<String>, field: impl Into<String>) -> Self {
        self.slots.push(ChildSlot {
            type_name: type_name.into(),
            field: field.into(),
        });
        self
    }

    fn field_for(&self, type_name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| slot.type_name == type_name)
            .map(|slot| slot.field.as_str())
    }
}

/// Extracts the resource type segment of a globally unique identifier.
///
/// `gid://shopify/LineItem/123` yields `LineItem`.
fn gid_type(id: &str) -> Option<&str> {
    let rest = id.strip_prefix("gid://")?;
    let mut segments = rest.split('/');
    let _namespace = segments.next()?;
    segments.next().filter(|segment| !segment.is_empty())
}

struct Node {
    fields: Map<String, Value>,
    // Child indexes grouped by parent field, in first-seen order.
    children: Vec<(String, Vec<usize>)>,
}

impl Node {
    fn push_child(&mut self, field: &str, index: usize) {
        if let Some((_, indexes)) = self.children.iter_mut().find(|(name, _)| name == field) {
            indexes.push(index);
        } else {
            self.children.push((field.to_string(), vec![index]));
        }
    }
}

/// Consumes a stream of result lines and rebuilds the nested documents.
///
/// Returns the top-level records in file order, each with its descendants
/// folded back in. Fails on the first malformed or unattachable record; no
/// partial result is returned.
pub(super) async fn reassemble<S>(
    mut lines: S,
    schema: &NestedSchema,
) -> Result<Vec<Value>, BulkError>
where
    S: Stream<Item = Result<String, BulkError>> + Unpin,
{
    let mut arena: Vec<Node> = Vec::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    let mut line_number: u64 = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields: Map<String, Value> =
            serde_json::from_str(&line).map_err(|e| BulkError::Reassembly {
                line: line_number,
                detail: format!("undecodable record: {e}"),
            })?;

        let parent_link = fields.remove(PARENT_LINK_FIELD);
        let index = arena.len();

        if let Some(Value::String(id)) = fields.get("id") {
            index_by_id.insert(id.clone(), index);
        }

        match parent_link {
            None | Some(Value::Null) => {
                arena.push(Node {
                    fields,
                    children: Vec::new(),
                });
                roots.push(index);
            }
            Some(Value::String(parent_id)) => {
                let &parent_index =
                    index_by_id
                        .get(&parent_id)
                        .ok_or_else(|| BulkError::Reassembly {
                            line: line_number,
                            detail: format!("record references unknown parent {parent_id}"),
                        })?;

                let type_name = fields
                    .get("id")
                    .and_then(Value::as_str)
                    .and_then(gid_type)
                    .ok_or_else(|| BulkError::Reassembly {
                        line: line_number,
                        detail: "nested record has no usable gid".to_string(),
                    })?;
                let field = schema
                    .field_for(type_name)
                    .ok_or_else(|| BulkError::Reassembly {
                        line: line_number,
                        detail: format!("no child slot declared for {type_name} records"),
                    })?
                    .to_string();

                arena.push(Node {
                    fields,
                    children: Vec::new(),
                });
                arena[parent_index].push_child(&field, index);
            }
            Some(other) => {
                return Err(BulkError::Reassembly {
                    line: line_number,
                    detail: format!("parent link is not a string: {other}"),
                });
            }
        }
    }

    // Children always carry a higher arena index than their parent, so a
    // reverse sweep materializes leaves before the nodes that embed them.
    let mut built: Vec<Option<Value>> = (0..arena.len()).map(|_| None).collect();
    for index in (0..arena.len()).rev() {
        let node = std::mem::replace(
            &mut arena[index],
            Node {
                fields: Map::new(),
                children: Vec::new(),
            },
        );

        let mut fields = node.fields;
        for (field, child_indexes) in node.children {
            let values: Vec<Value> = child_indexes
                .into_iter()
                .map(|child| built[child].take().unwrap_or(Value::Null))
                .collect();
            fields.insert(field, Value::Array(values));
        }
        built[index] = Some(Value::Object(fields));
    }

    Ok(roots
        .into_iter()
        .map(|root| built[root].take().unwrap_or(Value::Null))
        .collect())
}
