use orbitline_core::ItemId;

/// Stimuli delivered to the engine loop. The channel is the serialization
/// point: transitions apply in the order events arrive here.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Tick,
    Select(ItemId),
    ClearSelection,
    Resize(f64, f64),
    ConfigReload,
}
