use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

use crate::{GLOW_BASE_DIAMETER, GLOW_ENERGY_SCALE};

/// Stable identity of a timeline item. Uniqueness within a collection is
/// the supplier's responsibility; the engine only ever compares ids.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[strum(to_string = "completed", serialize = "complete", serialize = "done")]
    Completed,
    #[strum(
        to_string = "in-progress",
        serialize = "in_progress",
        serialize = "inprogress"
    )]
    InProgress,
    #[default]
    #[strum(to_string = "pending", serialize = "todo")]
    Pending,
}

impl Status {
    /// Uppercase badge text for detail views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "COMPLETE",
            Self::InProgress => "IN PROGRESS",
            Self::Pending => "PENDING",
        }
    }
}

/// One entry of the ring. All display strings are opaque to the engine;
/// `related_ids` may reference ids that are not in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub date: String,
    pub content: String,
    pub category: String,
    pub related_ids: Vec<ItemId>,
    pub status: Status,
    /// Visual emphasis in [0, 100] nominal. Out-of-range values are not
    /// rejected; the glow just ends up over- or undersized.
    pub energy: f64,
}

impl TimelineItem {
    /// Diameter of the glow halo a consumer draws behind this node.
    pub fn glow_diameter(&self) -> f64 {
        self.energy * GLOW_ENERGY_SCALE + GLOW_BASE_DIAMETER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserialization() {
        let cases = vec![
            ("\"pending\"", Status::Pending),
            ("\"Pending\"", Status::Pending),
            ("\"PENDING\"", Status::Pending),
            ("\"todo\"", Status::Pending),
            ("\"completed\"", Status::Completed),
            ("\"complete\"", Status::Completed),
            ("\"done\"", Status::Completed),
            ("\"in-progress\"", Status::InProgress),
            ("\"in_progress\"", Status::InProgress),
            ("\"InProgress\"", Status::InProgress),
        ];

        for (json, expected) in cases {
            let deserialized: Status = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_status_display_matches_serialization() {
        assert_eq!(Status::Completed.to_string(), "completed");
        assert_eq!(Status::InProgress.to_string(), "in-progress");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
    }

    #[test]
    fn test_glow_diameter_scales_with_energy() {
        let mut item = TimelineItem {
            id: ItemId::new(1),
            title: "t".into(),
            date: String::new(),
            content: String::new(),
            category: String::new(),
            related_ids: Vec::new(),
            status: Status::Pending,
            energy: 100.0,
        };
        assert_eq!(item.glow_diameter(), 90.0);

        // out of range degrades, never rejects
        item.energy = 200.0;
        assert_eq!(item.glow_diameter(), 140.0);
        item.energy = -10.0;
        assert_eq!(item.glow_diameter(), 35.0);
    }
}
