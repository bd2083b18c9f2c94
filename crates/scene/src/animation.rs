//! Per-frame animation of node transforms.
//!
//! An [`Animation`] is attached to a transform node and applied once per
//! frame, before the node's matrix is read, with the real frame delta in
//! seconds. Each built-in targets one [`Transform`] variant and leaves any
//! other variant untouched.

use std::f32::consts::TAU;
use std::fmt;

use crate::transform::Transform;

/// A single coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Plane in which an orbit traces its circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitPlane {
    XY,
    XZ,
    YZ,
}

impl OrbitPlane {
    fn axes(self) -> (Axis, Axis) {
        match self {
            OrbitPlane::XY => (Axis::X, Axis::Y),
            OrbitPlane::XZ => (Axis::X, Axis::Z),
            OrbitPlane::YZ => (Axis::Y, Axis::Z),
        }
    }
}

/// Host-supplied animation callback.
pub type AnimationFn = Box<dyn FnMut(&mut Transform, f32)>;

/// Time-driven mutation of a node's transform.
pub enum Animation {
    /// Advance a rotation's angle by `speed` units per second, wrapped to one turn.
    Spin { speed: f32 },
    /// Place a translation on a circle of `radius` around the origin.
    Orbit {
        theta: f32,
        speed: f32,
        radius: f32,
        plane: OrbitPlane,
    },
    /// Oscillate one coordinate of a translation around `center`.
    PingPong {
        axis: Axis,
        amplitude: f32,
        speed: f32,
        center: f32,
        offset: f32,
    },
    /// Oscillate a uniform scale between `min` and `max`.
    Pulse {
        min: f32,
        max: f32,
        speed: f32,
        phase: f32,
    },
    Custom(AnimationFn),
}

impl Animation {
    pub fn spin(speed: f32) -> Self {
        Animation::Spin { speed }
    }

    /// Orbit starting at angle `phase` (radians), advancing `speed` radians per second.
    pub fn orbit(phase: f32, speed: f32, radius: f32, plane: OrbitPlane) -> Self {
        Animation::Orbit {
            theta: phase,
            speed,
            radius,
            plane,
        }
    }

    pub fn ping_pong(axis: Axis, amplitude: f32, speed: f32, center: f32) -> Self {
        Animation::PingPong {
            axis,
            amplitude,
            speed,
            center,
            offset: 0.0,
        }
    }

    /// Pulse between `minimum` and `maximum`; the bounds are swapped if reversed.
    pub fn pulse(minimum: f32, maximum: f32, speed: f32) -> Self {
        let (min, max) = if minimum > maximum {
            (maximum, minimum)
        } else {
            (minimum, maximum)
        };
        Animation::Pulse {
            min,
            max,
            speed,
            phase: 0.0,
        }
    }

    pub fn custom(f: impl FnMut(&mut Transform, f32) + 'static) -> Self {
        Animation::Custom(Box::new(f))
    }

    /// Advance the animation by `dt` seconds and write the result into `transform`.
    pub fn apply(&mut self, transform: &mut Transform, dt: f32) {
        match self {
            Animation::Spin { speed } => {
                if let Transform::Rotate { angle, radians, .. } = transform {
                    let turn = if *radians { TAU } else { 360.0 };
                    *angle = (*angle + dt * *speed).rem_euclid(turn);
                }
            }
            Animation::Orbit {
                theta,
                speed,
                radius,
                plane,
            } => {
                if let Transform::Translate(offset) = transform {
                    *theta = (*theta + dt * *speed).rem_euclid(TAU);
                    let (first, second) = plane.axes();
                    offset[first.index()] = theta.cos() * *radius;
                    offset[second.index()] = theta.sin() * *radius;
                }
            }
            Animation::PingPong {
                axis,
                amplitude,
                speed,
                center,
                offset,
            } => {
                if let Transform::Translate(position) = transform {
                    *offset = (*offset + dt * *speed).rem_euclid(TAU);
                    position[axis.index()] = *center + offset.sin() * *amplitude;
                }
            }
            Animation::Pulse {
                min,
                max,
                speed,
                phase,
            } => {
                if let Transform::Scale(factors) = transform {
                    *phase = (*phase + dt * *speed).rem_euclid(TAU);
                    let factor = *min + (phase.sin() * 0.5 + 0.5) * (*max - *min);
                    *factors = glam::Vec3::splat(factor);
                }
            }
            Animation::Custom(f) => f(transform, dt),
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Animation::Spin { speed } => f.debug_struct("Spin").field("speed", speed).finish(),
            Animation::Orbit {
                theta,
                speed,
                radius,
                plane,
            } => f
                .debug_struct("Orbit")
                .field("theta", theta)
                .field("speed", speed)
                .field("radius", radius)
                .field("plane", plane)
                .finish(),
            Animation::PingPong {
                axis,
                amplitude,
                speed,
                center,
                ..
            } => f
                .debug_struct("PingPong")
                .field("axis", axis)
                .field("amplitude", amplitude)
                .field("speed", speed)
                .field("center", center)
                .finish(),
            Animation::Pulse { min, max, speed, .. } => f
                .debug_struct("Pulse")
                .field("min", min)
                .field("max", max)
                .field("speed", speed)
                .finish(),
            Animation::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
