/// Shadow anchor state machine driving the haptic cues
pub mod dynamics;
/// Per-frame shadow rasterization into opacity batches
pub mod renderer;
/// Session context and background surface handoff
pub mod session;
/// Exponential smoothing of pen tilt and movement
pub mod smoothing;
