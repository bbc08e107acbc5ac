use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::CodecError;
use crate::schema::{
    ColumnKind, FileRef, LiveSchema, PersonRef, PropertyKind, RelationRef, SampleItem, SampleValue,
    TableTemplate,
};

/// Cursor over the row ids created in a table's related-row source.
///
/// The load pass advances the cursor; the caller's id list is never touched.
#[derive(Debug, Clone)]
pub struct RelatedRows<'a> {
    ids: &'a [String],
    next: usize,
}

impl<'a> RelatedRows<'a> {
    pub fn new(ids: &'a [String]) -> Self {
        Self { ids, next: 0 }
    }

    pub fn empty() -> Self {
        Self { ids: &[], next: 0 }
    }

    /// Take the next id, `None` once exhausted
    pub fn next_id(&mut self) -> Option<&'a str> {
        let id = self.ids.get(self.next)?;
        self.next += 1;
        Some(id.as_str())
    }

    pub fn consumed(&self) -> usize {
        self.next
    }
}

/// Run-wide inputs to placeholder substitution
#[derive(Debug, Clone)]
pub struct EncodeContext<'a> {
    pub default_person: Option<&'a str>,
    pub related: RelatedRows<'a>,
}

impl<'a> EncodeContext<'a> {
    pub fn new(default_person: Option<&'a str>, related: RelatedRows<'a>) -> Self {
        Self {
            default_person,
            related,
        }
    }
}

/// Encode a whole sample item into a page `properties` payload.
///
/// Each field is dispatched on the live schema's kind for its column. Columns
/// missing from the live schema fall back to shape inference, except columns
/// the template declares as status or relation, which are dropped instead.
pub fn encode_item(
    item: &SampleItem,
    template: &TableTemplate,
    live: &LiveSchema,
    ctx: &mut EncodeContext<'_>,
) -> Result<Map<String, Value>, CodecError> {
    let mut props = Map::new();

    for (column, value) in item {
        let encoded = match live.kind_of(column) {
            Some(kind) if !matches!(kind, PropertyKind::Other(_)) => {
                encode_value(column, kind, value, ctx)?
            }
            _ => {
                let declared = template.column(column).map(|c| &c.kind);
                if matches!(
                    declared,
                    Some(ColumnKind::Status) | Some(ColumnKind::Relation { .. })
                ) {
                    warn!(
                        "Column '{}' of {} is not in the live schema, dropping its value",
                        column, template.title
                    );
                    None
                } else {
                    infer_value(column, value, ctx)
                }
            }
        };

        if let Some(payload) = encoded {
            props.insert(column.to_string(), payload);
        }
    }

    Ok(props)
}

/// Encode one value for a column of a known kind.
///
/// `Ok(None)` means the column is omitted from the payload.
pub fn encode_value(
    column: &str,
    kind: &PropertyKind,
    value: &SampleValue,
    ctx: &mut EncodeContext<'_>,
) -> Result<Option<Value>, CodecError> {
    let payload = match (kind, value) {
        (PropertyKind::Title, SampleValue::Text(s)) => json!({ "title": text_content(s) }),
        (PropertyKind::RichText, SampleValue::Text(s)) => json!({ "rich_text": text_content(s) }),
        (PropertyKind::Number, SampleValue::Number(n)) => json!({ "number": n }),
        (PropertyKind::Select, SampleValue::Text(s)) => json!({ "select": { "name": s } }),
        (PropertyKind::Status, SampleValue::Text(s)) => json!({ "status": { "name": s } }),
        (PropertyKind::Date, SampleValue::Text(s)) => encode_date(column, s)?,
        (PropertyKind::People, SampleValue::People(refs)) => {
            return Ok(encode_people(refs, ctx.default_person))
        }
        (PropertyKind::Relation, SampleValue::Relations(refs)) => {
            return Ok(encode_relations(refs, &mut ctx.related))
        }
        (PropertyKind::Files, SampleValue::Files(files)) => encode_files(files),
        _ => {
            return Err(CodecError::KindMismatch {
                column: column.to_string(),
                expected: kind.as_str().to_string(),
            })
        }
    };

    Ok(Some(payload))
}

/// Last-resort treatment for columns with no declared kind
fn infer_value(column: &str, value: &SampleValue, ctx: &EncodeContext<'_>) -> Option<Value> {
    match value {
        SampleValue::People(refs) => encode_people(refs, ctx.default_person),
        SampleValue::Text(s) => Some(json!({ "rich_text": text_content(s) })),
        SampleValue::Number(n) => Some(json!({ "rich_text": text_content(&n.to_string()) })),
        SampleValue::Relations(_) | SampleValue::Files(_) => {
            warn!("Cannot infer a kind for undeclared column '{}', dropping it", column);
            None
        }
    }
}

fn text_content(s: &str) -> Value {
    json!([{ "text": { "content": s } }])
}

/// `start/end` becomes a range, anything else a single start date
pub fn encode_date(column: &str, value: &str) -> Result<Value, CodecError> {
    if !value.contains('/') {
        return Ok(json!({ "date": { "start": value } }));
    }

    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [start, end] if !start.is_empty() && !end.is_empty() => {
            Ok(json!({ "date": { "start": start, "end": end } }))
        }
        _ => Err(CodecError::MalformedDateRange {
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

fn encode_people(refs: &[PersonRef], default_person: Option<&str>) -> Option<Value> {
    let people: Vec<Value> = refs
        .iter()
        .filter_map(|r| match r {
            PersonRef::Id(id) => Some(*id),
            PersonRef::DefaultPerson => default_person,
        })
        .map(|id| json!({ "object": "user", "id": id }))
        .collect();

    if people.is_empty() {
        None
    } else {
        Some(json!({ "people": people }))
    }
}

fn encode_relations(refs: &[RelationRef], related: &mut RelatedRows<'_>) -> Option<Value> {
    let ids: Vec<Value> = refs
        .iter()
        .filter_map(|r| match r {
            RelationRef::Id(id) => Some(*id),
            RelationRef::NextRelated => related.next_id(),
        })
        .map(|id| json!({ "id": id }))
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(json!({ "relation": ids }))
    }
}

fn encode_files(files: &[FileRef]) -> Value {
    let files: Vec<Value> = files
        .iter()
        .map(|f| json!({ "name": f.name, "type": "external", "external": { "url": f.url } }))
        .collect();
    json!({ "files": files })
}

/// Concatenated plain text of a title or rich_text property value
pub fn plain_text(property: &Value) -> String {
    let fragments = property
        .get("title")
        .or_else(|| property.get("rich_text"))
        .and_then(|v| v.as_array());

    fragments
        .into_iter()
        .flatten()
        .filter_map(|t| {
            t.get("plain_text")
                .or_else(|| t.get("text").and_then(|text| text.get("content")))
                .and_then(|v| v.as_str())
        })
        .collect()
}

/// Start of a date property value
pub fn date_start(property: &Value) -> Option<&str> {
    property.get("date")?.get("start")?.as_str()
}
