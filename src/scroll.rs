//! Scroll-to-uniform binding: maps accumulated scroll travel to a
//! normalized progress value, smooths it, and samples every
//! scroll-driven property from one pure timeline function.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::power2_in_out;

/// Where the orb rests before any scrolling.
pub const ORB_REST_POSITION: Vec3 = Vec3::new(0.0, -2.5, 0.0);
/// Where the orb ends up once the trigger region is fully scrolled.
pub const ORB_END_POSITION: Vec3 = Vec3::new(0.0, 0.0, -2.0);

/// Scroll region boundaries, in logical pixels of accumulated wheel
/// travel. Stands in for the viewport-relative trigger markers of the
/// original page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTrigger {
    pub start: f32,
    pub end: f32,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 800.0,
        }
    }
}

impl ScrollTrigger {
    /// Normalized progress for an absolute scroll offset, clamped to [0, 1].
    pub fn progress(&self, offset: f32) -> f32 {
        if self.end <= self.start {
            // Degenerate region: treat as an instant switch at `end`
            return if offset >= self.end { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Trails the raw scroll progress the way a scrubbed binding trails the
/// scrollbar: exponential approach covering ~95% of the remaining
/// distance in `catch_up` seconds. `catch_up = 0` pins to the target.
#[derive(Debug, Clone, Copy)]
pub struct Scrubber {
    current: f32,
    catch_up: f32,
}

impl Scrubber {
    pub fn new(catch_up: f32) -> Self {
        Self {
            current: 0.0,
            catch_up,
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    /// Advance toward `target` by `dt` seconds and return the new value.
    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        if self.catch_up <= 0.0 {
            self.current = target;
        } else {
            let blend = 1.0 - (-3.0 * dt / self.catch_up).exp();
            self.current += (target - self.current) * blend;
        }
        self.current
    }
}

/// Everything the scroll progress drives, sampled together so all tied
/// properties reach their end states at progress 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub orb_position: Vec3,
    pub color_blend: f32,
    pub heading_opacity: f32,
    pub subtext_opacity: f32,
    pub button_opacity: f32,
}

/// Pure progress -> state timeline. Three sequential segments of equal
/// length: orb movement + color blend + heading fade, then the subtext
/// fade-in, then the button fade-in. One shared easing curve throughout.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    pub rest_position: Vec3,
    pub end_position: Vec3,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            rest_position: ORB_REST_POSITION,
            end_position: ORB_END_POSITION,
        }
    }
}

// Eased local time of a sub-range of the timeline; saturates outside it.
fn segment(progress: f32, start: f32, end: f32) -> f32 {
    power2_in_out((progress - start) / (end - start))
}

impl Timeline {
    pub fn sample(&self, progress: f32) -> ScrollState {
        let lead = segment(progress, 0.0, 1.0 / 3.0);
        let subtext = segment(progress, 1.0 / 3.0, 2.0 / 3.0);
        let button = segment(progress, 2.0 / 3.0, 1.0);

        ScrollState {
            orb_position: self.rest_position.lerp(self.end_position, lead),
            color_blend: lead,
            heading_opacity: 1.0 - lead,
            subtext_opacity: subtext,
            button_opacity: button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_maps_offsets_to_clamped_progress() {
        let trigger = ScrollTrigger::default();
        assert_eq!(trigger.progress(-100.0), 0.0);
        assert_eq!(trigger.progress(0.0), 0.0);
        assert_eq!(trigger.progress(400.0), 0.5);
        assert_eq!(trigger.progress(800.0), 1.0);
        assert_eq!(trigger.progress(5000.0), 1.0);
    }

    #[test]
    fn degenerate_trigger_is_a_step() {
        let trigger = ScrollTrigger {
            start: 300.0,
            end: 300.0,
        };
        assert_eq!(trigger.progress(299.0), 0.0);
        assert_eq!(trigger.progress(300.0), 1.0);
    }

    #[test]
    fn scrubber_converges_on_target() {
        let mut scrubber = Scrubber::new(2.0);
        for _ in 0..600 {
            scrubber.advance(1.0, 1.0 / 60.0);
        }
        assert!((scrubber.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn scrubber_never_overshoots() {
        let mut scrubber = Scrubber::new(2.0);
        let mut prev = 0.0;
        for _ in 0..120 {
            let v = scrubber.advance(1.0, 1.0 / 60.0);
            assert!(v >= prev && v <= 1.0);
            prev = v;
        }
    }

    #[test]
    fn zero_catch_up_pins_to_target() {
        let mut scrubber = Scrubber::new(0.0);
        assert_eq!(scrubber.advance(0.73, 1.0 / 60.0), 0.73);
    }

    #[test]
    fn timeline_start_state_is_at_rest() {
        let state = Timeline::default().sample(0.0);
        assert_eq!(state.orb_position, ORB_REST_POSITION);
        assert_eq!(state.color_blend, 0.0);
        assert_eq!(state.heading_opacity, 1.0);
        assert_eq!(state.subtext_opacity, 0.0);
        assert_eq!(state.button_opacity, 0.0);
    }

    #[test]
    fn timeline_end_state_reaches_everything_together() {
        let state = Timeline::default().sample(1.0);
        assert_eq!(state.orb_position, ORB_END_POSITION);
        assert_eq!(state.color_blend, 1.0);
        assert_eq!(state.heading_opacity, 0.0);
        assert_eq!(state.subtext_opacity, 1.0);
        assert_eq!(state.button_opacity, 1.0);
    }

    #[test]
    fn lead_segment_finishes_at_one_third() {
        let state = Timeline::default().sample(1.0 / 3.0);
        assert_eq!(state.color_blend, 1.0);
        assert_eq!(state.orb_position, ORB_END_POSITION);
        assert_eq!(state.heading_opacity, 0.0);
        // later segments have not started
        assert_eq!(state.subtext_opacity, 0.0);
        assert_eq!(state.button_opacity, 0.0);
    }

    #[test]
    fn color_blend_tracks_orb_motion_in_lockstep() {
        let timeline = Timeline::default();
        for i in 0..=20 {
            let state = timeline.sample(i as f32 / 60.0);
            let expected_y = ORB_REST_POSITION
                .lerp(ORB_END_POSITION, state.color_blend)
                .y;
            assert!((state.orb_position.y - expected_y).abs() < 1e-6);
        }
    }
}
