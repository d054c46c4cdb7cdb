//! Fetch data tool definition.
//!
//! Simulates fetching records from a named source, with offset/limit
//! pagination over a fixed record set.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::ToolDefinition;
use crate::domains::tools::schema::Schema;

const DEFAULT_LIMIT: usize = 10;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the fetch data tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchDataParams {
    /// Data source identifier.
    pub source: String,

    /// Optional filters, echoed back exactly as sent.
    #[serde(default)]
    pub filters: Map<String, Value>,
}

/// Pagination read from the filters. Values are JSON numbers and may be
/// fractional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFilters {
    pub limit: Option<f64>,
    pub offset: Option<f64>,
}

impl DataFilters {
    /// Pick `limit` and `offset` out of the raw filters; other keys are ignored.
    pub fn from_map(filters: &Map<String, Value>) -> Self {
        Self {
            limit: filters.get("limit").and_then(Value::as_f64),
            offset: filters.get("offset").and_then(Value::as_f64),
        }
    }

    /// Records to skip; negative values count as zero.
    pub fn offset(&self) -> usize {
        self.offset.filter(|o| *o > 0.0).map_or(0, |o| o as usize)
    }

    /// Maximum records to return; missing or non-positive means the default.
    pub fn limit(&self) -> usize {
        self.limit
            .map(|l| l as usize)
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit()).min(items.len());
        &items[start..end]
    }
}

/// One record of the simulated data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataRecord {
    pub id: u32,
    pub name: &'static str,
    pub value: u32,
}

const RECORDS: [DataRecord; 3] = [
    DataRecord { id: 1, name: "Item 1", value: 100 },
    DataRecord { id: 2, name: "Item 2", value: 200 },
    DataRecord { id: 3, name: "Item 3", value: 300 },
];

#[derive(Debug, Serialize)]
struct FetchDataResponse<'a> {
    source: &'a str,
    timestamp: String,
    filters: &'a Map<String, Value>,
    results: &'a [DataRecord],
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Fetch data tool - returns a page of the simulated record set as JSON.
pub struct FetchDataTool;

#[async_trait]
impl ToolDefinition for FetchDataTool {
    const NAME: &'static str = "fetchData";
    const DESCRIPTION: &'static str = "Fetch data from a source";
    type Params = FetchDataParams;

    fn schema() -> Schema {
        Schema::object()
            .with_property(
                "source",
                Schema::string().with_description("Data source identifier"),
            )
            .with_property(
                "filters",
                Schema::object()
                    .with_description("Optional filters")
                    .with_property(
                        "limit",
                        Schema::number().with_description("Maximum number of results"),
                    )
                    .with_property(
                        "offset",
                        Schema::number().with_description("Number of results to skip"),
                    ),
            )
            .with_required(["source"])
    }

    #[instrument(skip_all, fields(source = %params.source))]
    async fn execute(&self, params: FetchDataParams) -> ToolResult<String> {
        let results = DataFilters::from_map(&params.filters).page(&RECORDS);
        info!("Fetched {} records", results.len());

        let response = FetchDataResponse {
            source: &params.source,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            filters: &params.filters,
            results,
        };

        Ok(serde_json::to_string_pretty(&response)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::{ToolDispatcher, ToolRegistry};
    use serde_json::json;

    fn fetch(filters: Value) -> Value {
        let Value::Object(filters) = filters else {
            panic!("filters must be an object");
        };
        let text = tokio_test::block_on(FetchDataTool.execute(FetchDataParams {
            source: "inventory".to_string(),
            filters,
        }))
        .unwrap();
        serde_json::from_str(&text).unwrap()
    }

    fn filters(limit: Option<f64>, offset: Option<f64>) -> DataFilters {
        DataFilters { limit, offset }
    }

    #[test]
    fn test_default_returns_all_records() {
        let value = fetch(json!({}));
        assert_eq!(value["source"], json!("inventory"));
        assert_eq!(value["filters"], json!({}));
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_offset_and_limit_select_second_item() {
        let value = fetch(json!({ "offset": 1, "limit": 1 }));
        assert_eq!(
            value["results"],
            json!([{ "id": 2, "name": "Item 2", "value": 200 }])
        );
    }

    #[test]
    fn test_filters_echoed_unchanged() {
        let sent = json!({ "offset": 1, "limit": 1, "sort": "asc" });
        let value = fetch(sent.clone());
        assert_eq!(value["filters"], sent);
        assert!(value["filters"]["limit"].is_u64());

        let fractional = json!({ "limit": 2.5 });
        assert_eq!(fetch(fractional.clone())["filters"], fractional);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let value = fetch(json!({ "offset": 10 }));
        assert_eq!(value["results"], json!([]));
    }

    #[test]
    fn test_non_positive_limit_uses_default() {
        assert_eq!(filters(Some(0.0), None).limit(), DEFAULT_LIMIT);
        assert_eq!(filters(Some(-3.0), None).limit(), DEFAULT_LIMIT);
        assert_eq!(filters(Some(2.7), None).limit(), 2);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        assert_eq!(filters(None, Some(-1.0)).offset(), 0);
        assert_eq!(filters(None, Some(1.9)).offset(), 1);
    }

    #[test]
    fn test_from_map_ignores_other_keys() {
        let map = json!({ "limit": 2, "sort": "asc" });
        let parsed = DataFilters::from_map(map.as_object().unwrap());
        assert_eq!(parsed, filters(Some(2.0), None));
    }

    #[test]
    fn test_params_deserialize_without_filters() {
        let params: FetchDataParams = serde_json::from_value(json!({ "source": "db" })).unwrap();
        assert!(params.filters.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_through_dispatcher() {
        let registry = ToolRegistry::builder().register(FetchDataTool).build().unwrap();
        let dispatcher = ToolDispatcher::new(registry);

        let envelope = dispatcher
            .invoke(
                "fetchData",
                Some(json!({ "source": "s", "filters": { "offset": 1, "limit": 1, "sort": "asc" } })),
            )
            .await;
        assert!(!envelope.is_error());

        let value: Value = serde_json::from_str(&envelope.text()).unwrap();
        assert_eq!(
            value["results"],
            json!([{ "id": 2, "name": "Item 2", "value": 200 }])
        );
        assert_eq!(value["filters"], json!({ "offset": 1, "limit": 1, "sort": "asc" }));
    }

    #[tokio::test]
    async fn test_non_numeric_filter_rejected_through_dispatcher() {
        let registry = ToolRegistry::builder().register(FetchDataTool).build().unwrap();
        let dispatcher = ToolDispatcher::new(registry);

        let envelope = dispatcher
            .invoke("fetchData", Some(json!({ "source": "s", "filters": { "limit": "1" } })))
            .await;
        assert!(envelope.is_error());
        assert_eq!(
            envelope.text(),
            "Error: Property filters.limit must be of type number, got string"
        );
    }
}
