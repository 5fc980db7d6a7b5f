use crate::geometry::{self, Breakpoints, Viewport};
use crate::item::{ItemId, TimelineItem};
use crate::{RECENTER_TARGET_DEGREES, ROTATION_STEP_DEGREES};

/// At most one item is ever expanded; the tagged variant makes the
/// mutual-exclusion invariant unrepresentable rather than merely checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Expanded(ItemId),
}

impl Selection {
    pub fn expanded_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Expanded(id) => Some(*id),
        }
    }
}

/// The radial layout engine. Owns all mutable state; the host applies
/// `tick`/`select`/`clear_selection`/`resize` in delivery order and reads
/// layout back via [`Engine::frame`]. Every transition is an
/// instantaneous, bounded state change with no I/O.
#[derive(Debug, Clone)]
pub struct Engine {
    items: Vec<TimelineItem>,
    compact: bool,
    rotation_degrees: f64,
    auto_rotate: bool,
    selection: Selection,
    pulsing: Vec<ItemId>,
    viewport: Viewport,
    breakpoints: Breakpoints,
}

impl Engine {
    pub fn new(items: Vec<TimelineItem>, compact: bool) -> Self {
        Self {
            items,
            compact,
            rotation_degrees: 0.0,
            auto_rotate: true,
            selection: Selection::Idle,
            pulsing: Vec::new(),
            viewport: Viewport::default(),
            breakpoints: Breakpoints::default(),
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    pub fn expanded_id(&self) -> Option<ItemId> {
        self.selection.expanded_id()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    /// Whether `id` is in the expanded item's related set. Ids absent from
    /// the collection can sit in the set but never match a rendered node.
    pub fn is_pulsing(&self, id: ItemId) -> bool {
        self.pulsing.contains(&id)
    }

    pub fn radius(&self) -> f64 {
        geometry::ring_radius(self.viewport, self.compact)
    }

    pub fn visible_count(&self) -> usize {
        geometry::visible_count(self.items.len(), self.compact, self.breakpoints)
    }

    /// Advances the rotation by one step, wrapping mod 360 and rounding to
    /// three decimals so accumulated float drift never reaches snapshots.
    /// A no-op while auto-rotation is paused. Returns the current angle.
    pub fn tick(&mut self) -> f64 {
        if self.auto_rotate {
            self.rotation_degrees =
                round_millidegrees((self.rotation_degrees + ROTATION_STEP_DEGREES) % 360.0);
        }
        self.rotation_degrees
    }

    /// Item interaction. Re-selecting the expanded item toggles back to
    /// idle; selecting anything else expands it (replacing any previous
    /// expansion), pauses rotation, lights up its related items, and
    /// recenters the ring on it. Unknown ids are ignored.
    ///
    /// Recentering is an instantaneous jump; any visual smoothing is the
    /// consumer's transition, not an engine guarantee.
    pub fn select(&mut self, id: ItemId) {
        if self.selection == Selection::Expanded(id) {
            self.clear_selection();
            return;
        }
        let Some(item) = self.items.iter().find(|item| item.id == id) else {
            return;
        };

        self.pulsing = item.related_ids.clone();
        self.selection = Selection::Expanded(id);
        self.auto_rotate = false;
        self.recenter_on(id);
    }

    /// Background interaction: unconditionally back to the initial idle
    /// state with auto-rotation running.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
        self.pulsing.clear();
        self.auto_rotate = true;
    }

    /// Stores new container dimensions and re-derives the breakpoint flags
    /// from the width. Non-positive dimensions leave the flags unset.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.breakpoints = Breakpoints::from_width(width);
    }

    /// Escape hatch for hosts that run their own media queries instead of
    /// the built-in 768/1024 width derivation.
    pub fn set_breakpoints(&mut self, below_medium: bool, below_large: bool) {
        self.breakpoints = Breakpoints {
            below_medium,
            below_large,
        };
    }

    /// Swaps in a new collection (config reload). Selection state is tied
    /// to the old ids, so it resets to idle.
    pub fn replace_items(&mut self, items: Vec<TimelineItem>) {
        self.clear_selection();
        self.items = items;
    }

    /// Rotates the ring so the item lands at the recenter target (270°,
    /// the top of the circle). An item currently thinned out of the ring
    /// has no angular index, so it stays where it is.
    fn recenter_on(&mut self, id: ItemId) {
        let visible = self.visible_count();
        let Some(index) = self.items[..visible].iter().position(|item| item.id == id) else {
            return;
        };
        let target = (index as f64 / visible as f64) * 360.0;
        self.rotation_degrees = (RECENTER_TARGET_DEGREES - target).rem_euclid(360.0);
    }
}

fn round_millidegrees(angle: f64) -> f64 {
    (angle * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Status;

    fn item(id: u32, related: &[u32]) -> TimelineItem {
        TimelineItem {
            id: ItemId::new(id),
            title: format!("item-{id}"),
            date: String::new(),
            content: String::new(),
            category: String::new(),
            related_ids: related.iter().copied().map(ItemId::new).collect(),
            status: Status::Pending,
            energy: 50.0,
        }
    }

    fn engine_with(ids: &[u32]) -> Engine {
        Engine::new(ids.iter().map(|&id| item(id, &[])).collect(), false)
    }

    #[test]
    fn test_tick_advances_and_rounds() {
        let mut engine = engine_with(&[1]);
        assert_eq!(engine.tick(), 0.3);
        assert_eq!(engine.tick(), 0.6);
        assert_eq!(engine.tick(), 0.9);
    }

    #[test]
    fn test_tick_wraps_after_full_revolution() {
        let mut engine = engine_with(&[1]);
        for _ in 0..1200 {
            engine.tick();
        }
        assert_eq!(engine.rotation_degrees(), 0.0);
    }

    #[test]
    fn test_tick_is_a_noop_while_paused() {
        let mut engine = engine_with(&[1, 2]);
        engine.tick();
        engine.select(ItemId::new(2));
        let angle = engine.rotation_degrees();
        for _ in 0..10 {
            assert_eq!(engine.tick(), angle);
        }
        assert_eq!(engine.rotation_degrees(), angle);
    }

    #[test]
    fn test_select_expands_and_pauses() {
        let mut engine = Engine::new(vec![item(1, &[2, 3]), item(2, &[]), item(3, &[])], false);
        engine.select(ItemId::new(1));

        assert_eq!(engine.expanded_id(), Some(ItemId::new(1)));
        assert!(!engine.is_auto_rotating());
        assert!(engine.is_pulsing(ItemId::new(2)));
        assert!(engine.is_pulsing(ItemId::new(3)));
        assert!(!engine.is_pulsing(ItemId::new(1)));
    }

    #[test]
    fn test_select_twice_toggles_back_to_idle() {
        let mut engine = Engine::new(vec![item(1, &[2]), item(2, &[])], false);
        engine.select(ItemId::new(1));
        engine.select(ItemId::new(1));

        assert_eq!(engine.expanded_id(), None);
        assert!(engine.is_auto_rotating());
        assert!(!engine.is_pulsing(ItemId::new(2)));
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut engine = Engine::new(
            vec![item(1, &[2]), item(2, &[3]), item(3, &[]), item(4, &[])],
            false,
        );
        for &id in &[1u32, 2, 3, 2, 4] {
            engine.select(ItemId::new(id));
            assert_eq!(engine.expanded_id(), Some(ItemId::new(id)));
        }
        // pulsing tracks the latest expansion only
        assert!(!engine.is_pulsing(ItemId::new(3)));
    }

    #[test]
    fn test_select_unknown_id_is_a_noop() {
        let mut engine = engine_with(&[1, 2]);
        engine.tick();
        let before = engine.clone();
        engine.select(ItemId::new(99));

        assert_eq!(engine.expanded_id(), before.expanded_id());
        assert_eq!(engine.rotation_degrees(), before.rotation_degrees());
        assert!(engine.is_auto_rotating());
    }

    #[test]
    fn test_clear_selection_resets_unconditionally() {
        let mut engine = Engine::new(vec![item(1, &[2]), item(2, &[])], false);
        engine.select(ItemId::new(1));
        engine.clear_selection();

        assert_eq!(engine.expanded_id(), None);
        assert!(engine.is_auto_rotating());
        assert!(!engine.is_pulsing(ItemId::new(2)));

        // idempotent on an already-idle engine
        engine.clear_selection();
        assert_eq!(engine.expanded_id(), None);
    }

    #[test]
    fn test_recenter_math() {
        // 8 visible items, index 2: target = 90, rotation = 270 - 90
        let mut engine = engine_with(&[1, 2, 3, 4, 5, 6, 7, 8]);
        engine.select(ItemId::new(3));
        assert_eq!(engine.rotation_degrees(), 180.0);

        // index 0 lands exactly on the target angle
        engine.select(ItemId::new(3));
        engine.select(ItemId::new(1));
        assert_eq!(engine.rotation_degrees(), 270.0);
    }

    #[test]
    fn test_recenter_wraps_into_range() {
        // 4 visible, index 3: target = 270, rotation = (270 - 270) = 0
        let mut engine = engine_with(&[1, 2, 3, 4]);
        engine.select(ItemId::new(4));
        assert_eq!(engine.rotation_degrees(), 0.0);
    }

    #[test]
    fn test_selecting_a_thinned_item_skips_recenter() {
        let mut engine = engine_with(&[1, 2, 3, 4, 5, 6]);
        engine.resize(600.0, 800.0); // below medium: 3 of 6 visible
        assert_eq!(engine.visible_count(), 3);

        let angle = engine.rotation_degrees();
        engine.select(ItemId::new(6));

        assert_eq!(engine.expanded_id(), Some(ItemId::new(6)));
        assert!(!engine.is_auto_rotating());
        assert_eq!(engine.rotation_degrees(), angle);
    }

    #[test]
    fn test_resize_derives_breakpoints() {
        let mut engine = engine_with(&[1, 2, 3, 4, 5]);
        engine.resize(700.0, 900.0);
        assert!(engine.breakpoints().below_medium);
        assert_eq!(engine.visible_count(), 2);

        engine.resize(1920.0, 1080.0);
        assert_eq!(engine.breakpoints(), Breakpoints::default());
        assert_eq!(engine.visible_count(), 5);

        // a bogus measurement falls back to unconstrained layout
        engine.resize(0.0, 0.0);
        assert_eq!(engine.breakpoints(), Breakpoints::default());
        assert_eq!(engine.radius(), crate::BASE_RADIUS);
    }

    #[test]
    fn test_replace_items_clears_selection() {
        let mut engine = Engine::new(vec![item(1, &[2]), item(2, &[])], false);
        engine.select(ItemId::new(1));
        engine.replace_items(vec![item(7, &[])]);

        assert_eq!(engine.expanded_id(), None);
        assert!(engine.is_auto_rotating());
        assert_eq!(engine.items().len(), 1);
    }
}
