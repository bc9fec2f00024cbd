//! The simulated character body and its small closed enums.

use bevy::math::Vec2;

use super::probe::ContactSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing for a non-zero horizontal value, `None` for zero.
    pub fn from_axis(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Facing that points away from this wall.
    pub fn away(&self) -> Facing {
        match self {
            WallSide::Left => Facing::Right,
            WallSide::Right => Facing::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Controllable,
    Frozen,
    Teleporting,
}

#[derive(Debug, Clone)]
pub struct CharacterBody {
    /// Centre of the body
    pub position: Vec2,
    /// The character's own velocity; moving-platform carry is added on output
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub state: PlayerState,
    pub contacts: ContactSnapshot,
}

impl CharacterBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            facing: Facing::default(),
            state: PlayerState::default(),
            contacts: ContactSnapshot::default(),
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Bottom-centre of the body.
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.y - self.size.y * 0.5)
    }
}
