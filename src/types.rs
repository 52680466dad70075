use std::fmt;

use serde::{Deserialize, Serialize};

/// A named geographic point. The name is the join key into the visited state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// A named group of points, e.g. one region of the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub points: Vec<Point>,
}

/// Smallest axis-aligned lat/lon rectangle enclosing a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn contains(&self, point: &Point) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

/// A point on the output canvas. Canvas y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStat {
    pub visited_count: usize,
    pub total_count: usize,
    pub percentage: f64,
}

impl fmt::Display for ProgressStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:.1}%)",
            self.visited_count, self.total_count, self.percentage
        )
    }
}

/// Restricts which points the list view shows. The map always plots every point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterMode {
    #[default]
    All,
    Visited,
    NotVisited,
}

impl FilterMode {
    pub fn accepts(self, visited: bool) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Visited => visited,
            FilterMode::NotVisited => !visited,
        }
    }
}
