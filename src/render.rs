use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::bounds;
use crate::error::ChecklistError;
use crate::projector;
use crate::session::Session;
use crate::tracker::VisitedState;
use crate::types::{Bounds, Dataset, FilterMode, ProgressStat};

type Result<T> = std::result::Result<T, ChecklistError>;

/// Everything the front end needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub filter: FilterMode,
    pub datasets: Vec<DatasetView>,
    pub overall: ProgressStat,
    pub overall_label: String,
    /// Visited flag of every known point name.
    pub visited: VisitedState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetView {
    pub name: String,
    pub bounds: Bounds,
    /// Every point, regardless of the filter.
    pub markers: Vec<Marker>,
    pub progress: ProgressStat,
    pub progress_label: String,
    /// Names shown in the list view, after filtering.
    pub listed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub visited: bool,
}

/// Build the render model for the current session state.
///
/// Fails with `EmptyInput` if any dataset has no points.
pub fn render(session: &Session, filter: FilterMode, now_ms: f64) -> Result<RenderModel> {
    let datasets = session
        .datasets()
        .iter()
        .map(|ds| dataset_view(session, ds, filter))
        .collect::<Result<Vec<_>>>()?;

    let overall = session.overall_progress();

    Ok(RenderModel {
        filter,
        datasets,
        overall,
        overall_label: overall.to_string(),
        visited: session.visited().clone(),
        notice: session.active_notice(now_ms).map(str::to_string),
    })
}

fn dataset_view(session: &Session, ds: &Dataset, filter: FilterMode) -> Result<DatasetView> {
    let bounds = bounds::compute(&ds.points)?;
    let visited = session.visited();

    let markers = ds
        .points
        .iter()
        .zip(projector::project_all(&ds.points, &bounds, session.canvas()))
        .map(|(pt, pos)| Marker {
            name: pt.name.clone(),
            x: pos.x,
            y: pos.y,
            visited: visited.is_visited(&pt.name),
        })
        .collect();

    let listed = visited
        .filter(&ds.points, filter)
        .into_iter()
        .map(|pt| pt.name.clone())
        .collect();

    let progress = session.progress(ds);

    Ok(DatasetView {
        name: ds.name.clone(),
        bounds,
        markers,
        progress,
        progress_label: progress.to_string(),
        listed,
    })
}

/// Export every point with its dataset and visited flag as GeoJSON.
pub fn to_feature_collection(session: &Session) -> FeatureCollection {
    let features = session
        .datasets()
        .iter()
        .flat_map(|ds| {
            ds.points.iter().map(move |pt| {
                let mut props = Map::new();
                props.insert("name".to_string(), JsonValue::String(pt.name.clone()));
                props.insert("dataset".to_string(), JsonValue::String(ds.name.clone()));
                props.insert(
                    "visited".to_string(),
                    JsonValue::Bool(session.visited().is_visited(&pt.name)),
                );

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![pt.lon, pt.lat]))),
                    id: None,
                    properties: Some(props),
                    foreign_members: None,
                }
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
