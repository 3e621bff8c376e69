use crate::grouper::GroupedRecords;

pub const CHART_LABEL: &str = "Restaurants By Category";

/// Category-count series for the chart collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub label: String,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl ChartData {
    pub fn from_groups(grouped: &GroupedRecords) -> Self {
        let (labels, counts) = grouped
            .iter()
            .map(|(key, records)| (key.to_string(), records.len()))
            .unzip();
        Self {
            label: CHART_LABEL.to_string(),
            labels,
            counts,
        }
    }
}
