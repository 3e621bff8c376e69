/// Renderer seam.
///
/// The state machine only emits `Effect`s; a `Renderer` turns them into whatever the
/// front end displays. `SnapshotRenderer` keeps the latest displayed state in memory so the
/// tool server can hand it back to clients.
use tracing::debug;

use crate::chart::ChartData;
use crate::map::MarkerLayer;
use crate::model::RecordCollection;
use crate::orchestrator::Effect;

pub trait Renderer {
    fn render_list(&mut self, records: RecordCollection);
    fn place_markers(&mut self, layer: MarkerLayer);
    fn draw_chart(&mut self, chart: ChartData);
    fn set_submit_visible(&mut self, visible: bool);
    fn set_loading_visible(&mut self, visible: bool);
    fn show_message(&mut self, message: String);

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RenderList(records) => self.render_list(records),
                Effect::PlaceMarkers(layer) => self.place_markers(layer),
                Effect::DrawChart(chart) => self.draw_chart(chart),
                Effect::ShowSubmit(visible) => self.set_submit_visible(visible),
                Effect::ShowLoading(visible) => self.set_loading_visible(visible),
                Effect::ShowMessage(message) => self.show_message(message),
            }
        }
    }
}

/// What is currently on screen.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRenderer {
    pub list: RecordCollection,
    pub markers: MarkerLayer,
    pub chart: Option<ChartData>,
    pub submit_visible: bool,
    pub loading_visible: bool,
    pub message: Option<String>,
}

impl Renderer for SnapshotRenderer {
    fn render_list(&mut self, records: RecordCollection) {
        debug!(items = records.len(), "render list");
        self.list = records;
    }

    fn place_markers(&mut self, layer: MarkerLayer) {
        debug!(markers = layer.markers.len(), "place markers");
        self.markers = layer;
    }

    fn draw_chart(&mut self, chart: ChartData) {
        debug!(categories = chart.labels.len(), "draw chart");
        self.chart = Some(chart);
    }

    fn set_submit_visible(&mut self, visible: bool) {
        self.submit_visible = visible;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn show_message(&mut self, message: String) {
        self.message = Some(message);
    }
}
