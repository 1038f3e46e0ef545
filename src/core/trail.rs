//! Cursor trail: short-lived markers spawned at the pointer
//!
//! Marker lifecycle: Visible → Fading (after `fade_delay_ms`) → removed
//! (after `remove_delay_ms`). Times are host milliseconds.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::config::TrailConfig;

pub type MarkerId = u64;

/// Cosmetic offset applied when a marker starts fading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeOffset {
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerPhase {
    Visible,
    Fading(FadeOffset),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub x: f32,
    pub y: f32,
    /// Spawn time (ms)
    pub spawned_at: f64,
    pub opacity: f32,
    pub phase: MarkerPhase,
}

/// Lifecycle step due for a marker, returned by [`CursorTrail::tick`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrailAction {
    Fade(MarkerId, FadeOffset),
    Remove(MarkerId),
}

/// Live markers plus the last known pointer position.
pub struct CursorTrail<R: Rng = StdRng> {
    config: TrailConfig,
    rng: R,
    pointer: Option<[f32; 2]>,
    /// Ordered by id, which is spawn order
    markers: BTreeMap<MarkerId, Marker>,
    next_id: MarkerId,
}

impl CursorTrail<StdRng> {
    pub fn new(config: TrailConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> CursorTrail<R> {
    pub fn with_rng(config: TrailConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            pointer: None,
            markers: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Record the pointer and maybe spawn a marker there.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, now: f64) -> Option<Marker> {
        self.pointer = Some([x, y]);
        if self.rng.gen::<f64>() < self.config.spawn_probability {
            Some(self.spawn(x, y, now))
        } else {
            None
        }
    }

    /// Unconditionally spawn a marker at full opacity
    pub fn spawn(&mut self, x: f32, y: f32, now: f64) -> Marker {
        let id = self.next_id;
        self.next_id += 1;
        let marker = Marker {
            id,
            x,
            y,
            spawned_at: now,
            opacity: self.config.opacity,
            phase: MarkerPhase::Visible,
        };
        self.markers.insert(id, marker);
        trace!(id, x, y, live = self.markers.len(), "Trail marker spawned");
        marker
    }

    /// Start fading a marker. Returns the offset the host should animate to,
    /// or `None` if the marker is gone or already fading.
    pub fn fade(&mut self, id: MarkerId) -> Option<FadeOffset> {
        let half_drift = self.config.drift_px * 0.5;
        let scale = self.config.fade_scale;
        let marker = self.markers.get_mut(&id)?;
        if marker.phase != MarkerPhase::Visible {
            return None;
        }

        let offset = FadeOffset {
            dx: -half_drift + self.rng.gen::<f32>() * 2.0 * half_drift,
            dy: -half_drift + self.rng.gen::<f32>() * 2.0 * half_drift,
            scale,
        };
        marker.opacity = 0.0;
        marker.phase = MarkerPhase::Fading(offset);
        trace!(id, dx = offset.dx, dy = offset.dy, "Trail marker fading");
        Some(offset)
    }

    /// Drop a marker. Returns `true` only for the call that removed it.
    pub fn remove(&mut self, id: MarkerId) -> bool {
        let removed = self.markers.remove(&id).is_some();
        if removed {
            trace!(id, live = self.markers.len(), "Trail marker removed");
        }
        removed
    }

    /// Apply every lifecycle step due at `now`, in spawn order.
    pub fn tick(&mut self, now: f64) -> Vec<TrailAction> {
        let fade_delay = self.config.fade_delay_ms;
        let remove_delay = self.config.remove_delay_ms;

        let due: Vec<(MarkerId, bool, bool)> = self
            .markers
            .values()
            .map(|m| {
                let age = now - m.spawned_at;
                let fade_due = m.phase == MarkerPhase::Visible && age >= fade_delay;
                (m.id, fade_due, age >= remove_delay)
            })
            .filter(|&(_, fade_due, remove_due)| fade_due || remove_due)
            .collect();

        let mut actions = Vec::with_capacity(due.len());
        for (id, fade_due, remove_due) in due {
            if fade_due {
                if let Some(offset) = self.fade(id) {
                    actions.push(TrailAction::Fade(id, offset));
                }
            }
            if remove_due && self.remove(id) {
                actions.push(TrailAction::Remove(id));
            }
        }
        actions
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Last pointer position seen
    pub fn pointer(&self) -> Option<[f32; 2]> {
        self.pointer
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(spawn_probability: f64) -> CursorTrail<StdRng> {
        let config = TrailConfig {
            spawn_probability,
            ..TrailConfig::default()
        };
        CursorTrail::with_rng(config, StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_marker_lifecycle() {
        let mut t = trail(1.0);
        let m = t.on_pointer_move(30.0, 40.0, 1000.0).expect("always spawns");
        assert_eq!((m.x, m.y), (30.0, 40.0));
        assert_eq!(m.opacity, 0.8);
        assert_eq!(m.phase, MarkerPhase::Visible);

        // Nothing due yet
        assert!(t.tick(1049.0).is_empty());

        let actions = t.tick(1050.0);
        assert_eq!(actions.len(), 1);
        let TrailAction::Fade(id, offset) = actions[0] else {
            panic!("expected fade, got {:?}", actions[0]);
        };
        assert_eq!(id, m.id);
        assert!(offset.dx.abs() <= 50.0 && offset.dy.abs() <= 50.0);
        assert_eq!(offset.scale, 0.5);
        assert_eq!(t.marker(m.id).map(|m| m.opacity), Some(0.0));

        assert!(t.tick(2049.0).is_empty());
        assert_eq!(t.tick(2050.0), vec![TrailAction::Remove(m.id)]);
        assert!(t.marker(m.id).is_none());
        assert!(t.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut t = trail(1.0);
        let m = t.spawn(1.0, 2.0, 0.0);
        assert!(t.remove(m.id));
        assert!(!t.remove(m.id));
        assert!(t.fade(m.id).is_none());
    }

    #[test]
    fn test_fade_only_once() {
        let mut t = trail(1.0);
        let m = t.spawn(1.0, 2.0, 0.0);
        assert!(t.fade(m.id).is_some());
        assert!(t.fade(m.id).is_none());
    }

    #[test]
    fn test_late_tick_fades_and_removes_together() {
        let mut t = trail(1.0);
        let m = t.spawn(5.0, 5.0, 0.0);
        let actions = t.tick(5000.0);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], TrailAction::Fade(id, _) if id == m.id));
        assert_eq!(actions[1], TrailAction::Remove(m.id));
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut t = trail(0.0);
        for i in 0..1000 {
            assert!(t.on_pointer_move(i as f32, 0.0, i as f64).is_none());
        }
        assert!(t.is_empty());
        assert_eq!(t.pointer(), Some([999.0, 0.0]));
    }

    #[test]
    fn test_default_probability_is_sparse() {
        let mut t = CursorTrail::with_rng(TrailConfig::default(), StdRng::seed_from_u64(3));
        let spawned = (0..10_000)
            .filter(|&i| t.on_pointer_move(0.0, 0.0, i as f64).is_some())
            .count();
        assert!((700..1300).contains(&spawned), "spawned {}", spawned);
    }

    #[test]
    fn test_ids_follow_spawn_order() {
        let mut t = trail(1.0);
        let a = t.spawn(0.0, 0.0, 0.0);
        let b = t.spawn(0.0, 0.0, 10.0);
        assert!(a.id < b.id);
        let ids: Vec<MarkerId> = t.markers().map(|m| m.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(t.len(), 2);
    }
}
