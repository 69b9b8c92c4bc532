use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

use crate::constants::{G_ACCEL_MPS2, RADIANS_TO_DEGREES};

/// Projectile state at one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub t: f64,       // seconds
    pub speed: f64,   // m/s along the heading
    pub heading: f64, // radians above horizontal
    pub x: f64,       // meters downrange
    pub y: f64,       // meters above the reference ground plane
}

/// Time derivative of `[speed, heading, x, y]`
pub type StateDerivative = Vector4<f64>;

impl ProjectileState {
    pub fn new(t: f64, speed: f64, heading: f64, x: f64, y: f64) -> Self {
        Self { t, speed, heading, x, y }
    }

    /// Integrated variables as `[speed, heading, x, y]`
    pub fn as_vector(&self) -> Vector4<f64> {
        Vector4::new(self.speed, self.heading, self.x, self.y)
    }

    pub fn from_vector(t: f64, v: &Vector4<f64>) -> Self {
        Self {
            t,
            speed: v[0],
            heading: v[1],
            x: v[2],
            y: v[3],
        }
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading * RADIANS_TO_DEGREES
    }

    pub fn is_finite(&self) -> bool {
        self.t.is_finite()
            && self.speed.is_finite()
            && self.heading.is_finite()
            && self.x.is_finite()
            && self.y.is_finite()
    }
}

/// Right-hand side of the point-mass equations of motion with quadratic drag.
///
/// The heading rate divides by speed; callers must guarantee `speed > 0`.
pub fn derivatives(state: &ProjectileState, drag_coefficient: f64) -> StateDerivative {
    let (sin_h, cos_h) = state.heading.sin_cos();
    let v = state.speed;

    Vector4::new(
        -G_ACCEL_MPS2 * sin_h - drag_coefficient * v * v,
        -G_ACCEL_MPS2 * cos_h / v,
        v * cos_h,
        v * sin_h,
    )
}

/// One explicit Euler step. All four variables advance from the same
/// previous state.
pub fn euler_step(state: &ProjectileState, dt: f64, drag_coefficient: f64) -> ProjectileState {
    let rates = derivatives(state, drag_coefficient);
    let next = state.as_vector() + rates * dt;
    ProjectileState::from_vector(state.t + dt, &next)
}
