//! Frame assembly: the engine's complete computed output for one instant.

use serde::Serialize;

use crate::geometry;
use crate::item::{ItemId, TimelineItem};
use crate::state::Engine;
use crate::EXPANDED_Z_ORDER;

/// One visible node, placed and flagged. The expanded node overrides its
/// computed depth cues so the detail view always sits on top, fully
/// opaque.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameItem {
    pub id: ItemId,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub angle_degrees: f64,
    pub z_order: i32,
    pub opacity: f64,
    pub glow_diameter: f64,
    pub is_expanded: bool,
    pub is_related: bool,
    pub is_pulsing: bool,
}

/// Everything a renderer needs for one instant. Re-querying without an
/// intervening transition yields an identical frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Frame {
    pub items: Vec<FrameItem>,
    pub visible_count: usize,
    pub total_count: usize,
    pub rotation_angle_degrees: f64,
}

impl Engine {
    /// Assembles the current layout frame for the visible prefix of the
    /// collection. An empty collection yields an empty frame.
    pub fn frame(&self) -> Frame {
        let visible = self.visible_count();
        let radius = self.radius();
        let expanded = self.expanded_id();

        let items = self.items()[..visible]
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let position =
                    geometry::node_position(index, visible, self.rotation_degrees(), radius);
                let is_expanded = expanded == Some(item.id);
                let is_pulsing = self.is_pulsing(item.id);

                FrameItem {
                    id: item.id,
                    title: item.title.clone(),
                    x: position.x,
                    y: position.y,
                    angle_degrees: position.angle_degrees,
                    z_order: if is_expanded {
                        EXPANDED_Z_ORDER
                    } else {
                        position.z_order
                    },
                    opacity: if is_expanded { 1.0 } else { position.opacity },
                    glow_diameter: item.glow_diameter(),
                    is_expanded,
                    is_related: is_pulsing,
                    is_pulsing,
                }
            })
            .collect();

        Frame {
            items,
            visible_count: visible,
            total_count: self.items().len(),
            rotation_angle_degrees: self.rotation_degrees(),
        }
    }

    /// Resolves an item's related ids against the collection, silently
    /// dropping ids with no matching item. This is what a detail view
    /// lists as connected nodes.
    pub fn related_items(&self, id: ItemId) -> Vec<&TimelineItem> {
        let Some(item) = self.items().iter().find(|item| item.id == id) else {
            return Vec::new();
        };
        item.related_ids
            .iter()
            .filter_map(|related| self.items().iter().find(|other| other.id == *related))
            .collect()
    }
}
