//! Input sampler: latches per-frame edges until a fixed step consumes them.
//!
//! Press edges arm the jump and dash buffers directly; release and restart
//! edges are held here for the next step.

use super::context::InputSnapshot;

/// Input as one fixed step sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInput {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_held: bool,
    pub jump_released: bool,
    pub restart_pressed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    latest: InputSnapshot,
    jump_released: bool,
    restart_pressed: bool,
}

/// Edges seen in a single `sample` call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampledEdges {
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

impl InputSampler {
    pub fn sample(&mut self, snapshot: InputSnapshot) -> SampledEdges {
        self.latest = InputSnapshot {
            horizontal: snapshot.horizontal.clamp(-1.0, 1.0),
            vertical: snapshot.vertical.clamp(-1.0, 1.0),
            ..snapshot
        };
        self.jump_released |= snapshot.jump_released;
        self.restart_pressed |= snapshot.restart_pressed;

        SampledEdges {
            jump_pressed: snapshot.jump_pressed,
            dash_pressed: snapshot.dash_pressed,
        }
    }

    /// Hands the latched state to a fixed step and clears the edges.
    pub fn consume(&mut self) -> StepInput {
        let input = StepInput {
            horizontal: self.latest.horizontal,
            vertical: self.latest.vertical,
            jump_held: self.latest.jump_held,
            jump_released: self.jump_released,
            restart_pressed: self.restart_pressed,
        };
        self.jump_released = false;
        self.restart_pressed = false;
        input
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
