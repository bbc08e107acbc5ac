use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use super::{ChildBlock, DocumentStore, Page, RowRecord};
use crate::config::NotionSettings;
use crate::error::StoreError;
use crate::schema::{LiveColumn, LiveSchema, PropertyKind};

const PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseResponse {
    #[serde(default)]
    properties: BTreeMap<String, PropertyResponse>,
}

#[derive(Debug, Deserialize)]
struct PropertyResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    config: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    results: Vec<T>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

impl<T> ListResponse<T> {
    fn into_page<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.results.into_iter().map(f).collect(),
            next_cursor: if self.has_more { self.next_cursor } else { None },
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlockResponse {
    id: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    id: String,
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Blocking client for the Notion REST API
pub struct NotionClient {
    client: Client,
    base_url: String,
    token: String,
    version: String,
}

impl NotionClient {
    pub fn new(settings: &NotionSettings) -> Result<Self, StoreError> {
        let client = Client::builder().user_agent("notion-provision").build()?;
        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            version: settings.version.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let err: ErrorResponse = serde_json::from_str(&text).unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                code: err.code,
                message: if err.message.is_empty() { text } else { err.message },
            });
        }

        serde_json::from_str(&text).map_err(|e| StoreError::MalformedResponse(e.to_string()))
    }
}

/// Convert a retrieved database into its live column set
fn live_schema(response: DatabaseResponse) -> LiveSchema {
    let columns = response
        .properties
        .into_iter()
        .map(|(name, prop)| {
            let options = prop
                .config
                .get(&prop.kind)
                .and_then(|c| c.get("options"))
                .and_then(|o| o.as_array())
                .map(|opts| {
                    opts.iter()
                        .filter_map(|o| o.get("name").and_then(|n| n.as_str()))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let column = LiveColumn {
                kind: PropertyKind::from_type(&prop.kind),
                options,
            };
            (name, column)
        })
        .collect();
    LiveSchema { columns }
}

impl DocumentStore for NotionClient {
    fn create_table(
        &self,
        parent_id: &str,
        title: &str,
        icon: &str,
        columns: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let body = json!({
            "parent": { "type": "page_id", "page_id": parent_id },
            "title": [{ "type": "text", "text": { "content": title } }],
            "icon": { "type": "emoji", "emoji": icon },
            "properties": columns,
        });
        let created: Created = self.send(self.request(Method::POST, "databases").json(&body))?;
        Ok(created.id)
    }

    fn retrieve_table(&self, table_id: &str) -> Result<LiveSchema, StoreError> {
        let response: DatabaseResponse =
            self.send(self.request(Method::GET, &format!("databases/{}", table_id)))?;
        Ok(live_schema(response))
    }

    fn update_table(&self, table_id: &str, columns: &Map<String, Value>) -> Result<(), StoreError> {
        let body = json!({ "properties": columns });
        let _: Value = self.send(
            self.request(Method::PATCH, &format!("databases/{}", table_id))
                .json(&body),
        )?;
        Ok(())
    }

    fn delete_block(&self, block_id: &str) -> Result<(), StoreError> {
        let _: Value = self.send(self.request(Method::DELETE, &format!("blocks/{}", block_id)))?;
        Ok(())
    }

    fn list_children(&self, parent_id: &str, cursor: Option<&str>) -> Result<Page<ChildBlock>, StoreError> {
        let mut request = self
            .request(Method::GET, &format!("blocks/{}/children", parent_id))
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response: ListResponse<BlockResponse> = self.send(request)?;
        Ok(response.into_page(|b| ChildBlock {
            id: b.id,
            kind: b.kind,
        }))
    }

    fn create_row(&self, table_id: &str, properties: &Map<String, Value>) -> Result<String, StoreError> {
        let body = json!({
            "parent": { "database_id": table_id },
            "properties": properties,
        });
        let created: Created = self.send(self.request(Method::POST, "pages").json(&body))?;
        Ok(created.id)
    }

    fn query_rows(&self, table_id: &str, cursor: Option<&str>) -> Result<Page<RowRecord>, StoreError> {
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let response: ListResponse<PageResponse> = self.send(
            self.request(Method::POST, &format!("databases/{}/query", table_id))
                .json(&body),
        )?;
        Ok(response.into_page(|p| RowRecord {
            id: p.id,
            properties: p.properties,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_schema_from_response() {
        let response: DatabaseResponse = serde_json::from_value(json!({
            "object": "database",
            "properties": {
                "제목": { "id": "title", "name": "제목", "type": "title", "title": {} },
                "상태": {
                    "id": "s1",
                    "name": "상태",
                    "type": "status",
                    "status": { "options": [{ "name": "미처리" }, { "name": "승인됨" }] }
                },
                "설명": { "id": "d1", "name": "설명", "type": "rich_text", "rich_text": {} }
            }
        }))
        .unwrap();

        let live = live_schema(response);
        assert_eq!(live.kind_of("제목"), Some(&PropertyKind::Title));
        assert_eq!(live.kind_of("설명"), Some(&PropertyKind::RichText));
        let status = live.column("상태").unwrap();
        assert_eq!(status.kind, PropertyKind::Status);
        assert_eq!(status.options, vec!["미처리", "승인됨"]);
    }

    #[test]
    fn test_unknown_property_type_kept() {
        let response: DatabaseResponse = serde_json::from_value(json!({
            "properties": { "공식": { "type": "formula", "formula": {} } }
        }))
        .unwrap();
        assert_eq!(
            live_schema(response).kind_of("공식"),
            Some(&PropertyKind::Other("formula".to_string()))
        );
    }

    #[test]
    fn test_list_response_cursor_only_when_more() {
        let response: ListResponse<BlockResponse> = serde_json::from_value(json!({
            "results": [{ "id": "b1", "type": "child_database" }],
            "next_cursor": "c1",
            "has_more": false
        }))
        .unwrap();
        let page = response.into_page(|b| ChildBlock { id: b.id, kind: b.kind });
        assert_eq!(page.next_cursor, None);
        assert!(page.items[0].is_table());
    }
}
