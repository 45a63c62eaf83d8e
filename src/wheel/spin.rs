//! Spin driver — the `{Idle, Spinning}` state machine of one wheel.
//!
//! A spin request while a spin is in flight is dropped, never queued. The
//! rendered fragment schedules a single completion call after the spin
//! duration; completion is keyed by spin id so a stale or repeated call
//! cannot end a later spin or record a win twice.

use rand::Rng;
use serde::Serialize;

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::wheel::engine;
use crate::wheel::item::Item;

/// Everything the animation and the completion handler need about one spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinPlan {
    pub spin_id: u64,
    pub index: usize,
    /// Winner label, captured when the spin starts.
    pub label: String,
    /// Profile the items were drawn from.
    pub profile: String,
    pub from_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning(SpinPlan),
}

/// Outcome of a spin request.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinRequest {
    /// Idle → Spinning with a fresh draw.
    Started(SpinPlan),
    /// Already spinning; nothing changed. Carries the in-flight plan.
    Busy(SpinPlan),
}

/// One wheel instance: its resting rotation and spin state.
#[derive(Debug, Clone)]
pub struct Wheel {
    state: SpinState,
    /// Absolute rotation in degrees. Jumps to the target when a spin starts;
    /// the CSS transition animates towards it.
    rotation: f64,
    next_spin_id: u64,
}

impl Default for Wheel {
    fn default() -> Self {
        Self {
            state: SpinState::Idle,
            rotation: 0.0,
            next_spin_id: 1,
        }
    }
}

impl Wheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The in-flight plan, if any.
    pub fn in_flight(&self) -> Option<&SpinPlan> {
        match &self.state {
            SpinState::Spinning(plan) => Some(plan),
            SpinState::Idle => None,
        }
    }

    /// Start a spin over `items` unless one is already running.
    pub fn request_spin<R: Rng + ?Sized>(
        &mut self,
        profile: &str,
        items: &[Item],
        config: &WheelConfig,
        rng: &mut R,
    ) -> Result<SpinRequest, WheelError> {
        if let SpinState::Spinning(plan) = &self.state {
            log::debug!("spin {} in flight, request dropped", plan.spin_id);
            return Ok(SpinRequest::Busy(plan.clone()));
        }

        let draw = engine::draw(items, self.rotation, config, rng)?;
        let plan = SpinPlan {
            spin_id: self.next_spin_id,
            index: draw.index,
            label: items[draw.index].label.clone(),
            profile: profile.to_string(),
            from_rotation: self.rotation,
            target_rotation: draw.target_rotation,
            duration_ms: config.spin_duration_ms,
        };
        log::debug!(
            "spin {} started: index {} of {}, {:.1}° -> {:.1}°",
            plan.spin_id,
            plan.index,
            items.len(),
            plan.from_rotation,
            plan.target_rotation
        );

        self.next_spin_id += 1;
        self.rotation = plan.target_rotation;
        self.state = SpinState::Spinning(plan.clone());
        Ok(SpinRequest::Started(plan))
    }

    /// Spinning → Idle for the matching spin id. Returns the finished plan
    /// exactly once; any other call is a no-op.
    pub fn complete(&mut self, spin_id: u64) -> Option<SpinPlan> {
        match &self.state {
            SpinState::Spinning(plan) if plan.spin_id == spin_id => {}
            _ => {
                log::debug!("ignoring completion for spin {}", spin_id);
                return None;
            }
        }
        match std::mem::replace(&mut self.state, SpinState::Idle) {
            SpinState::Spinning(plan) => {
                log::debug!("spin {} finished: {}", plan.spin_id, plan.label);
                Some(plan)
            }
            SpinState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::item::default_items;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started(request: SpinRequest) -> SpinPlan {
        match request {
            SpinRequest::Started(plan) => plan,
            SpinRequest::Busy(_) => panic!("expected a new spin"),
        }
    }

    #[test]
    fn idle_by_default() {
        let wheel = Wheel::new();
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.rotation(), 0.0);
        assert!(wheel.in_flight().is_none());
    }

    #[test]
    fn spin_moves_to_spinning_with_plan() {
        let mut wheel = Wheel::new();
        let mut rng = StdRng::seed_from_u64(1);
        let items = default_items();
        let plan = started(
            wheel
                .request_spin("Standard", &items, &WheelConfig::default(), &mut rng)
                .unwrap(),
        );
        assert!(wheel.is_spinning());
        assert_eq!(plan.spin_id, 1);
        assert_eq!(plan.profile, "Standard");
        assert_eq!(plan.label, items[plan.index].label);
        assert_eq!(plan.duration_ms, 4000);
        assert_eq!(wheel.rotation(), plan.target_rotation);
    }

    #[test]
    fn second_request_while_spinning_is_dropped() {
        let mut wheel = Wheel::new();
        let mut rng = StdRng::seed_from_u64(2);
        let items = default_items();
        let config = WheelConfig::default();
        let first = started(wheel.request_spin("Standard", &items, &config, &mut rng).unwrap());

        let second = wheel.request_spin("Standard", &items, &config, &mut rng).unwrap();
        assert_eq!(second, SpinRequest::Busy(first.clone()));
        assert_eq!(wheel.in_flight(), Some(&first));
        assert_eq!(wheel.rotation(), first.target_rotation);
    }

    #[test]
    fn completion_fires_once_per_spin() {
        let mut wheel = Wheel::new();
        let mut rng = StdRng::seed_from_u64(3);
        let items = default_items();
        let plan = started(
            wheel
                .request_spin("Standard", &items, &WheelConfig::default(), &mut rng)
                .unwrap(),
        );

        assert!(wheel.complete(plan.spin_id + 1).is_none());
        assert!(wheel.is_spinning());

        assert_eq!(wheel.complete(plan.spin_id), Some(plan.clone()));
        assert!(!wheel.is_spinning());
        assert!(wheel.complete(plan.spin_id).is_none());
    }

    #[test]
    fn rotation_keeps_increasing_across_spins() {
        let mut wheel = Wheel::new();
        let mut rng = StdRng::seed_from_u64(4);
        let items = default_items();
        let config = WheelConfig::default();
        let mut last = wheel.rotation();
        for _ in 0..20 {
            let plan = started(wheel.request_spin("Standard", &items, &config, &mut rng).unwrap());
            assert!(plan.target_rotation > last);
            assert_eq!(plan.from_rotation, last);
            wheel.complete(plan.spin_id);
            last = plan.target_rotation;
        }
    }

    #[test]
    fn empty_pool_stays_idle() {
        let mut wheel = Wheel::new();
        let mut rng = StdRng::seed_from_u64(5);
        let result = wheel.request_spin("Leer", &[], &WheelConfig::default(), &mut rng);
        assert_eq!(result, Err(WheelError::EmptySelectionPool));
        assert!(!wheel.is_spinning());
        assert_eq!(wheel.rotation(), 0.0);
    }
}
