use crate::error::ChecklistError;
use crate::loader;
use crate::options::{Canvas, NoticeOptions, SessionConfig};
use crate::tracker::VisitedState;
use crate::types::{Dataset, Point, ProgressStat};

type Result<T> = std::result::Result<T, ChecklistError>;

/// One running checklist: the loaded datasets plus the only mutable state,
/// the visited flags. Nothing is persisted; dropping the session discards it.
#[derive(Debug, Clone)]
pub struct Session {
    datasets: Vec<Dataset>,
    visited: VisitedState,
    canvas: Canvas,
    notice: NoticeOptions,
    notice_until: Option<f64>,
}

impl Session {
    /// Fails if the canvas margins do not fit, or if a dataset repeats a
    /// name or carries a non-finite coordinate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.canvas.validate()?;
        for ds in &config.datasets {
            loader::validate_points(&ds.points)?;
        }

        let visited = VisitedState::initialize(
            config
                .datasets
                .iter()
                .flat_map(|ds| ds.points.iter().map(|pt| pt.name.as_str())),
            config.initially_visited.iter().map(String::as_str),
        );

        Ok(Self {
            datasets: config.datasets,
            visited,
            canvas: config.canvas,
            notice: config.notice,
            notice_until: None,
        })
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|ds| ds.name == name)
    }

    pub fn visited(&self) -> &VisitedState {
        &self.visited
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Flip `name` and raise the not-saved notice until `now_ms + duration`.
    /// Returns the new visited flag.
    pub fn toggle(&mut self, name: &str, now_ms: f64) -> Result<bool> {
        let flag = self.visited.toggle(name)?;
        self.notice_until = Some(now_ms + self.notice.duration_ms);
        Ok(flag)
    }

    /// The notice text while it is still up at `now_ms`.
    pub fn active_notice(&self, now_ms: f64) -> Option<&str> {
        match self.notice_until {
            Some(until) if now_ms < until => Some(self.notice.message.as_str()),
            _ => None,
        }
    }

    /// Every point across datasets, first occurrence of each name only.
    pub fn all_points(&self) -> Vec<Point> {
        let mut seen = std::collections::HashSet::new();
        self.datasets
            .iter()
            .flat_map(|ds| ds.points.iter())
            .filter(|pt| seen.insert(pt.name.as_str()))
            .cloned()
            .collect()
    }

    pub fn progress(&self, dataset: &Dataset) -> ProgressStat {
        self.visited.progress(&dataset.points)
    }

    pub fn overall_progress(&self) -> ProgressStat {
        self.visited.progress(&self.all_points())
    }
}
