//! Capability flags granted by pickups and checkpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Ability {
    DoubleJump,
    WallSlide,
    WallJump,
    Dash,
    FallDamage,
}

/// Granted permanently once true; nothing in normal play revokes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AbilityFlags {
    pub double_jump: bool,
    pub wall_slide: bool,
    pub wall_jump: bool,
    pub dash: bool,
    pub fall_damage: bool,
}

impl AbilityFlags {
    pub fn all() -> Self {
        Self {
            double_jump: true,
            wall_slide: true,
            wall_jump: true,
            dash: true,
            fall_damage: true,
        }
    }

    pub fn has(&self, ability: Ability) -> bool {
        match ability {
            Ability::DoubleJump => self.double_jump,
            Ability::WallSlide => self.wall_slide,
            Ability::WallJump => self.wall_jump,
            Ability::Dash => self.dash,
            Ability::FallDamage => self.fall_damage,
        }
    }

    /// Returns true if the ability was newly granted.
    pub fn grant(&mut self, ability: Ability) -> bool {
        let flag = match ability {
            Ability::DoubleJump => &mut self.double_jump,
            Ability::WallSlide => &mut self.wall_slide,
            Ability::WallJump => &mut self.wall_jump,
            Ability::Dash => &mut self.dash,
            Ability::FallDamage => &mut self.fall_damage,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }
}
