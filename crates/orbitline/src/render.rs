//! Text renderer for layout frames. The engine only hands out positions
//! and flags; this module turns one frame into the lines a terminal host
//! prints.

use orbitline_core::{Engine, Frame, FrameItem};
use std::fmt::Write;

const ENERGY_BAR_WIDTH: usize = 20;

/// Visual state of a node, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeMark {
    Expanded,
    Pulsing,
    Idle,
}

impl NodeMark {
    fn resolve(item: &FrameItem) -> Self {
        if item.is_expanded {
            Self::Expanded
        } else if item.is_pulsing {
            Self::Pulsing
        } else {
            Self::Idle
        }
    }

    fn glyph(&self) -> char {
        match self {
            Self::Expanded => '>',
            Self::Pulsing => '~',
            Self::Idle => ' ',
        }
    }
}

pub fn render(engine: &Engine, frame: &Frame) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "orbit {:8.3}°  visible {}/{}  radius {:.0}{}{}",
        frame.rotation_angle_degrees,
        frame.visible_count,
        frame.total_count,
        engine.radius(),
        if engine.compact() { "  compact" } else { "" },
        if engine.is_auto_rotating() {
            ""
        } else {
            "  paused"
        },
    );

    for item in &frame.items {
        let _ = writeln!(out, "{}", item_row(item));
    }

    if let Some(id) = engine.expanded_id() {
        out.push_str(&detail_block(engine, id));
    }

    out
}

fn item_row(item: &FrameItem) -> String {
    format!(
        " {} {:<14} ({:7.1}, {:7.1})  z {:3}  op {:.2}  glow {:3.0}",
        NodeMark::resolve(item).glyph(),
        item.title,
        item.x,
        item.y,
        item.z_order,
        item.opacity,
        item.glow_diameter,
    )
}

/// The expanded item's card: status badge, date, content, energy bar, and
/// the titles of its connected nodes (absent related ids never show up).
fn detail_block(engine: &Engine, id: orbitline_core::ItemId) -> String {
    let Some(item) = engine.items().iter().find(|item| item.id == id) else {
        return String::new();
    };

    let mut out = String::new();
    let _ = writeln!(out, "   [{}] {}  {}", item.status.label(), item.title, item.date);
    if !item.content.is_empty() {
        let _ = writeln!(out, "   {}", item.content);
    }
    let _ = writeln!(out, "   energy [{}] {:.0}%", energy_bar(item.energy), item.energy);

    let connected = engine.related_items(id);
    if !connected.is_empty() {
        let titles: Vec<&str> = connected.iter().map(|item| item.title.as_str()).collect();
        let _ = writeln!(out, "   connected: {}", titles.join(" -> "));
    }
    out
}

fn energy_bar(energy: f64) -> String {
    let filled = ((energy / 100.0) * ENERGY_BAR_WIDTH as f64)
        .round()
        .clamp(0.0, ENERGY_BAR_WIDTH as f64) as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(ENERGY_BAR_WIDTH - filled));
    bar
}
