use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::ChecklistError;
use crate::types::{FilterMode, Point, ProgressStat};

type Result<T> = std::result::Result<T, ChecklistError>;

/// Visited flag per known point name.
///
/// The key set is fixed at construction; only `toggle` changes a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisitedState {
    flags: BTreeMap<String, bool>,
}

impl VisitedState {
    /// Build the state for `all_names`, marking those in `initially_visited`.
    /// Pre-visited names that are not known points are ignored.
    pub fn initialize<'a, I, V>(all_names: I, initially_visited: V) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let visited: HashSet<&str> = initially_visited.into_iter().collect();
        let flags: BTreeMap<String, bool> = all_names
            .into_iter()
            .map(|name| (name.to_string(), visited.contains(name)))
            .collect();

        for name in visited.iter().filter(|n| !flags.contains_key(**n)) {
            log::warn!("ignoring pre-visited name '{name}': not a known point");
        }

        Self { flags }
    }

    /// Flip the flag for `name` and return its new value.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| ChecklistError::UnknownPoint {
                name: name.to_string(),
            })?;
        *flag = !*flag;
        log::debug!("toggled '{name}' -> visited={flag}");
        Ok(*flag)
    }

    /// Names missing from the state count as not visited.
    pub fn is_visited(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Visited/total counts over `group`. An empty group is 0%.
    pub fn progress(&self, group: &[Point]) -> ProgressStat {
        let total_count = group.len();
        let visited_count = group.iter().filter(|pt| self.is_visited(&pt.name)).count();
        let percentage = if total_count == 0 {
            0.0
        } else {
            visited_count as f64 * 100.0 / total_count as f64
        };

        ProgressStat {
            visited_count,
            total_count,
            percentage,
        }
    }

    /// Points of `group` accepted by `mode`, in input order.
    pub fn filter<'a>(&self, group: &'a [Point], mode: FilterMode) -> Vec<&'a Point> {
        group
            .iter()
            .filter(|pt| mode.accepts(self.is_visited(&pt.name)))
            .collect()
    }
}
