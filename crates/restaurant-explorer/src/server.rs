use std::sync::Arc;

use rand::rngs::StdRng;
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::orchestrator::{Event, Phase, Session, NO_DATA_MESSAGE};
use crate::render::{Renderer, SnapshotRenderer};
use resto_common::mcp_api::{
    CategoryChartResponse, FilterByNameParams, ListItem, MapViewport, MarkerPoint,
    RenderedViewResponse, SessionStatusResponse,
};

/// One page session: the state machine, what is on screen, and the sampling RNG.
pub struct AppState {
    session: Session,
    renderer: SnapshotRenderer,
    rng: StdRng,
}

impl AppState {
    pub fn new(sample_size: usize, rng: StdRng) -> Self {
        let start = Session::start(sample_size);
        let mut renderer = SnapshotRenderer::default();
        renderer.apply(start.effects);
        Self {
            session: start.session,
            renderer,
            rng,
        }
    }

    /// Feed one event through the state machine and render its effects.
    ///
    /// Returns `false` when the event was ignored in the current phase.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let transition = self.session.handle(event, &mut self.rng);
        let handled = !transition.effects.is_empty();
        self.renderer.apply(transition.effects);
        self.session = transition.session;
        handled
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    fn unavailable_reason(&self) -> String {
        match self.session.phase() {
            Phase::Loading => "restaurant data is still loading".to_string(),
            Phase::Empty => self
                .renderer
                .message
                .clone()
                .unwrap_or_else(|| NO_DATA_MESSAGE.to_string()),
            Phase::Ready | Phase::Interactive => "nothing to update".to_string(),
        }
    }

    fn rendered_view(&self) -> RenderedViewResponse {
        let items = self
            .renderer
            .list
            .iter()
            .enumerate()
            .map(|(i, r)| ListItem {
                position: i + 1,
                name: r.name.clone(),
                category: r.category.clone(),
            })
            .collect();
        let markers = self
            .renderer
            .markers
            .markers
            .iter()
            .map(|m| MarkerPoint {
                name: m.name.clone(),
                latitude: m.latitude,
                longitude: m.longitude,
            })
            .collect();
        let viewport = self.renderer.markers.viewport;

        RenderedViewResponse {
            items,
            markers,
            viewport: MapViewport {
                latitude: viewport.latitude,
                longitude: viewport.longitude,
                zoom: viewport.zoom,
            },
        }
    }

    fn status(&self) -> SessionStatusResponse {
        SessionStatusResponse {
            phase: self.session.phase().as_str().to_string(),
            record_count: self.session.records().len(),
            category_count: self.session.grouped().len(),
            current_view_len: self.session.current_view().len(),
            submit_visible: self.renderer.submit_visible,
            loading_visible: self.renderer.loading_visible,
            message: self.renderer.message.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RestaurantExplorerServer {
    state: Arc<Mutex<AppState>>,
    tool_router: ToolRouter<RestaurantExplorerServer>,
}

impl RestaurantExplorerServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            tool_router: Self::tool_router(),
        }
    }

    async fn interact(&self, event: Event) -> Result<Json<RenderedViewResponse>, String> {
        // Holding the lock for the whole transition serializes overlapping submits.
        let mut state = self.state.lock().await;
        if !state.dispatch(event) {
            return Err(state.unavailable_reason());
        }
        Ok(Json(state.rendered_view()))
    }
}

#[tool_router]
impl RestaurantExplorerServer {
    #[tool(description = "Draw a fresh random sample of restaurants from the dataset and render it as a numbered list with map markers.")]
    async fn submit_sample(&self) -> Result<Json<RenderedViewResponse>, String> {
        info!("submit_sample tool invoked");
        self.interact(Event::Submit).await
    }

    #[tool(description = "Filter the currently sampled restaurants by name (case-insensitive substring). An empty query shows the whole sample.")]
    async fn filter_by_name(
        &self,
        Parameters(params): Parameters<FilterByNameParams>,
    ) -> Result<Json<RenderedViewResponse>, String> {
        self.interact(Event::Input(params.query)).await
    }

    #[tool(description = "Get restaurant counts per category for the whole dataset, in first-seen category order.")]
    async fn category_chart(&self) -> Result<Json<CategoryChartResponse>, String> {
        let state = self.state.lock().await;
        let chart = state
            .renderer
            .chart
            .clone()
            .ok_or_else(|| state.unavailable_reason())?;

        Ok(Json(CategoryChartResponse {
            label: chart.label,
            labels: chart.labels,
            counts: chart.counts,
        }))
    }

    #[tool(description = "Report the session phase, dataset size, and which controls are visible.")]
    async fn session_status(&self) -> Result<Json<SessionStatusResponse>, String> {
        let state = self.state.lock().await;
        Ok(Json(state.status()))
    }
}

#[tool_handler]
impl ServerHandler for RestaurantExplorerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "restaurant-explorer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Restaurant explorer MCP server. The dataset is fetched once at startup. Use \
                 submit_sample to draw a random list of restaurants, filter_by_name to narrow \
                 that list, category_chart for per-category counts, and session_status to check \
                 whether data is available."
                    .to_string(),
            ),
        }
    }
}
