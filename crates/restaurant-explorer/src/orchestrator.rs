/// Session state machine.
///
/// `Loading -> Ready -> Interactive`, with `Empty` as a terminal state when no usable data
/// was fetched. Every transition is computed by `Session::handle` from the current state,
/// one event and a random source, and yields the next state plus the render requests
/// (`Effect`s) for the renderer. Handlers never fail: an event that makes no sense in the
/// current phase leaves the state untouched and produces no effects.
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::chart::ChartData;
use crate::filter::filter_by_name;
use crate::grouper::{group_by_category, GroupedRecords};
use crate::map::{place_markers, MarkerLayer};
use crate::model::{Record, RecordCollection};
use crate::sampler::sample;

pub const NO_DATA_MESSAGE: &str = "no restaurant data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Empty,
    Ready,
    Interactive,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Empty => "empty",
            Phase::Ready => "ready",
            Phase::Interactive => "interactive",
        }
    }

    fn accepts_interaction(self) -> bool {
        matches!(self, Phase::Ready | Phase::Interactive)
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// The fetch finished with validated records (possibly none).
    Loaded(RecordCollection),
    /// The fetch failed; carries the user-facing reason.
    FetchFailed(String),
    /// Draw a fresh random sample from the full dataset.
    Submit,
    /// Filter the current view by name.
    Input(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowSubmit(bool),
    ShowLoading(bool),
    RenderList(RecordCollection),
    PlaceMarkers(MarkerLayer),
    DrawChart(ChartData),
    ShowMessage(String),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    sample_size: usize,
    records: Arc<RecordCollection>,
    grouped: Arc<GroupedRecords>,
    current_view: RecordCollection,
}

#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Session {
    /// Initial `Loading` session and the effects that set up the page for it.
    pub fn start(sample_size: usize) -> Transition {
        Transition {
            session: Session {
                sample_size,
                ..Session::default()
            },
            effects: vec![Effect::ShowSubmit(false), Effect::ShowLoading(true)],
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn grouped(&self) -> &GroupedRecords {
        &self.grouped
    }

    pub fn current_view(&self) -> &[Record] {
        &self.current_view
    }

    pub fn handle<R: Rng + ?Sized>(&self, event: Event, rng: &mut R) -> Transition {
        match (self.phase, event) {
            (Phase::Loading, Event::Loaded(records)) if records.is_empty() => {
                info!("fetch returned no usable records");
                self.enter_empty(NO_DATA_MESSAGE.to_string())
            }
            (Phase::Loading, Event::Loaded(records)) => {
                let grouped = group_by_category(&records);
                info!(
                    records = records.len(),
                    categories = grouped.len(),
                    "restaurant data ready"
                );
                let chart = ChartData::from_groups(&grouped);
                Transition {
                    session: Session {
                        phase: Phase::Ready,
                        records: Arc::new(records),
                        grouped: Arc::new(grouped),
                        ..self.clone()
                    },
                    effects: vec![
                        Effect::DrawChart(chart),
                        Effect::ShowSubmit(true),
                        Effect::ShowLoading(false),
                    ],
                }
            }
            (Phase::Loading, Event::FetchFailed(reason)) => {
                warn!(reason = %reason, "fetch failed, no data to show");
                self.enter_empty(format!("{NO_DATA_MESSAGE}: {reason}"))
            }
            (phase, Event::Submit) if phase.accepts_interaction() => {
                let view = sample(&self.records, self.sample_size, rng);
                debug!(size = view.len(), "sampled new view");
                let markers = place_markers(&view);
                Transition {
                    session: Session {
                        phase: Phase::Interactive,
                        current_view: view.clone(),
                        ..self.clone()
                    },
                    effects: vec![Effect::RenderList(view), Effect::PlaceMarkers(markers)],
                }
            }
            (phase, Event::Input(query)) if phase.accepts_interaction() => {
                let filtered = filter_by_name(&self.current_view, &query);
                debug!(query = %query, matches = filtered.len(), "filtered current view");
                let markers = place_markers(&filtered);
                Transition {
                    session: Session {
                        phase: Phase::Interactive,
                        ..self.clone()
                    },
                    effects: vec![Effect::RenderList(filtered), Effect::PlaceMarkers(markers)],
                }
            }
            (phase, event) => {
                debug!(phase = phase.as_str(), ?event, "event ignored in current phase");
                Transition {
                    session: self.clone(),
                    effects: Vec::new(),
                }
            }
        }
    }

    fn enter_empty(&self, message: String) -> Transition {
        Transition {
            session: Session {
                phase: Phase::Empty,
                ..self.clone()
            },
            effects: vec![
                Effect::ShowSubmit(false),
                Effect::ShowLoading(false),
                Effect::ShowMessage(message),
            ],
        }
    }
}
