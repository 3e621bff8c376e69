/// Marker shaping for the map collaborator.
///
/// Source locations are `[longitude, latitude]`; markers are emitted latitude-first. The
/// viewport follows the first marker, or falls back to the College Park default.
use crate::model::Record;

pub const DEFAULT_CENTER: (f64, f64) = (38.9897, -76.9378);
pub const DEFAULT_ZOOM: u8 = 13;
pub const FOCUS_ZOOM: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_CENTER.0,
            longitude: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// A full replacement for the markers on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerLayer {
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
}

pub fn place_markers(collection: &[Record]) -> MarkerLayer {
    let markers: Vec<Marker> = collection
        .iter()
        .filter_map(|record| {
            let location = record.location?;
            Some(Marker {
                name: record.name.clone(),
                latitude: location.latitude,
                longitude: location.longitude,
            })
        })
        .collect();

    let viewport = markers
        .first()
        .map(|m| Viewport {
            latitude: m.latitude,
            longitude: m.longitude,
            zoom: FOCUS_ZOOM,
        })
        .unwrap_or_default();

    MarkerLayer { markers, viewport }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_latitude_first_and_focus_first_record() {
        let data = vec![
            Record::new("No Point", None),
            Record::new("Ledo Pizza", None).with_location(-76.93, 38.98),
            Record::new("Hanami", None).with_location(-76.88, 39.01),
        ];
        let layer = place_markers(&data);
        assert_eq!(layer.markers.len(), 2);
        assert_eq!(layer.markers[0].name, "Ledo Pizza");
        assert_eq!(layer.markers[0].latitude, 38.98);
        assert_eq!(layer.markers[0].longitude, -76.93);
        assert_eq!(
            layer.viewport,
            Viewport {
                latitude: 38.98,
                longitude: -76.93,
                zoom: FOCUS_ZOOM
            }
        );
    }

    #[test]
    fn empty_view_keeps_default_viewport() {
        let layer = place_markers(&[]);
        assert!(layer.markers.is_empty());
        assert_eq!(layer.viewport, Viewport::default());
        assert_eq!(layer.viewport.zoom, 13);
    }
}
