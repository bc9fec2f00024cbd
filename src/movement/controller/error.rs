//! Setup errors. These are raised before the first step, never during one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid body size {width}x{height}: both dimensions must be positive")]
    InvalidBodySize { width: f32, height: f32 },

    #[error("Player entity {entity} has no collider")]
    MissingCollider { entity: String },

    #[error("Player entity {entity} has no rigid body")]
    MissingRigidBody { entity: String },
}
