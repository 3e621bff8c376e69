use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FilterByNameParams {
    /// Text to match against restaurant names, case-insensitively. Empty matches everything.
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListItem {
    /// 1-based position in the rendered list.
    pub position: usize,
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MarkerPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MapViewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderedViewResponse {
    pub items: Vec<ListItem>,
    pub markers: Vec<MarkerPoint>,
    pub viewport: MapViewport,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryChartResponse {
    /// Dataset label, e.g. "Restaurants By Category".
    pub label: String,
    /// Category names in first-seen order.
    pub labels: Vec<String>,
    /// Restaurant count per category, aligned with `labels`.
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionStatusResponse {
    /// One of "loading", "empty", "ready", "interactive".
    pub phase: String,
    pub record_count: usize,
    pub category_count: usize,
    pub current_view_len: usize,
    pub submit_visible: bool,
    pub loading_visible: bool,
    /// User-visible message, set when no data could be loaded.
    pub message: Option<String>,
}
