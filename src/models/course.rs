//! Course layout: tees and per-hole data.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{CourseId, EntityId};
use crate::calculate::ScoringError;

/// Valid slope range for a tee.
pub const SLOPE_RANGE: std::ops::RangeInclusive<u32> = 55..=155;

/// Valid course par range (9-hole and 18-hole layouts).
pub const COURSE_PAR_RANGE: std::ops::RangeInclusive<u32> = 27..=80;

/// A tee box with its difficulty ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tee {
    /// Name, unique within a course (e.g. "Amarillas")
    pub name: String,

    /// Slope rating (55..=155)
    pub slope: u32,

    /// Course rating
    pub rating: f64,
}

impl Tee {
    pub fn new(name: impl Into<String>, slope: u32, rating: f64) -> Self {
        Self {
            name: name.into(),
            slope,
            rating,
        }
    }
}

/// Layout of a single hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleData {
    /// Hole number (1..=18)
    pub number: u8,

    /// Par (3, 4 or 5)
    pub par: u8,

    /// Stroke index: 1 is the hardest hole
    pub handicap: u8,

    /// Distance in meters
    #[serde(default)]
    pub distance: u32,

    /// Distance per tee name, when the card lists them
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tee_distances: BTreeMap<String, u32>,
}

impl HoleData {
    pub fn new(number: u8, par: u8, handicap: u8) -> Self {
        Self {
            number,
            par,
            handicap,
            distance: 0,
            tee_distances: BTreeMap::new(),
        }
    }

    /// Distance for a tee, falling back to the default distance.
    pub fn distance_for_tee(&self, tee: &str) -> u32 {
        self.tee_distances
            .get(tee)
            .copied()
            .unwrap_or(self.distance)
    }
}

/// A golf course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier (derived from name + hole count)
    pub id: CourseId,

    pub name: String,

    /// Number of holes (9 or 18)
    pub holes: u8,

    /// Total par
    pub par: u32,

    pub tees: Vec<Tee>,

    pub holes_data: Vec<HoleData>,
}

impl Course {
    /// Create a new Course; par is summed from the hole data.
    pub fn new(name: String, tees: Vec<Tee>, holes_data: Vec<HoleData>) -> Self {
        let holes = holes_data.len() as u8;
        let id = EntityId::generate(&[&name, &holes.to_string()]);
        let par = holes_data.iter().map(|h| h.par as u32).sum();

        Self {
            id,
            name,
            holes,
            par,
            tees,
            holes_data,
        }
    }

    /// Look up a hole by number.
    pub fn hole(&self, number: u8) -> Option<&HoleData> {
        self.holes_data.iter().find(|h| h.number == number)
    }

    /// Look up a tee by name.
    pub fn tee(&self, name: &str) -> Option<&Tee> {
        self.tees.iter().find(|t| t.name == name)
    }

    /// Par over a set of hole numbers. Unknown holes contribute nothing.
    pub fn par_for(&self, holes: &[u8]) -> u32 {
        holes
            .iter()
            .filter_map(|&n| self.hole(n))
            .map(|h| h.par as u32)
            .sum()
    }

    /// Check the structural invariants of the course data.
    ///
    /// Reports the first violation found as `ScoringError::InvalidCourseData`.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let invalid = |reason: String| Err(ScoringError::InvalidCourseData(reason));

        if self.holes != 9 && self.holes != 18 {
            return invalid(format!("course must have 9 or 18 holes, got {}", self.holes));
        }

        if self.holes_data.len() != self.holes as usize {
            return invalid(format!(
                "expected {} holes of data, got {}",
                self.holes,
                self.holes_data.len()
            ));
        }

        let mut numbers: Vec<u8> = self.holes_data.iter().map(|h| h.number).collect();
        numbers.sort_unstable();
        let first = numbers.first().copied().unwrap_or(1);
        let contiguous = numbers
            .iter()
            .enumerate()
            .all(|(i, &n)| n as usize == first as usize + i);
        if !contiguous || first == 0 || numbers.last().copied().unwrap_or(0) > 18 {
            return invalid("hole numbers must be contiguous within 1..=18".to_string());
        }

        for hole in &self.holes_data {
            if !(3..=5).contains(&hole.par) {
                return invalid(format!("hole {} has invalid par {}", hole.number, hole.par));
            }
            if !(1..=18).contains(&hole.handicap) {
                return invalid(format!(
                    "hole {} has invalid stroke index {}",
                    hole.number, hole.handicap
                ));
            }
        }

        if self.holes == 18 {
            let indices: HashSet<u8> = self.holes_data.iter().map(|h| h.handicap).collect();
            if indices.len() != 18 {
                return invalid("stroke indices must be a permutation of 1..=18".to_string());
            }
        }

        let hole_par: u32 = self.holes_data.iter().map(|h| h.par as u32).sum();
        if !COURSE_PAR_RANGE.contains(&self.par) || self.par != hole_par {
            return invalid(format!(
                "course par {} does not match hole pars ({})",
                self.par, hole_par
            ));
        }

        if self.tees.is_empty() {
            return invalid("course must have at least one tee".to_string());
        }

        let mut names = HashSet::new();
        for tee in &self.tees {
            if !names.insert(tee.name.as_str()) {
                return invalid(format!("duplicate tee name '{}'", tee.name));
            }
            if !SLOPE_RANGE.contains(&tee.slope) {
                return invalid(format!("tee '{}' has slope {} out of range", tee.name, tee.slope));
            }
        }

        Ok(())
    }
}
