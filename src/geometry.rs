//! Vector and scalar helpers used by the simulation
//!
//! Thin wrappers over `glam::Vec2` with the exact edge-case behavior the game
//! relies on (zero-length normalize returns its input).

use glam::Vec2;

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

#[inline]
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    v * s
}

#[inline]
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`.
///
/// A vector of exactly zero length is returned unchanged.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len == 0.0 {
        return v;
    }
    v / len
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Signed angle from `a` to `b` in degrees (atan2 of x over y)
pub fn angle_degrees(a: Vec2, b: Vec2) -> f32 {
    (b.x.atan2(b.y) - a.x.atan2(a.y)).to_degrees()
}

/// Linear interpolation: `a * (1 - f) + b * f`
#[inline]
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + b * f
}

/// Clamp `value` into `[min, max]`. Unlike `f32::clamp` this never panics
/// when `min > max`; `min` wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Interpolate a rotation in degrees, taking the short way across 0/360
pub fn smooth_rotation(from: f32, to: f32, delta: f32) -> f32 {
    let mut from = from;
    if from > 270.0 && to < 90.0 {
        from -= 360.0;
    }
    if from < 90.0 && to > 270.0 {
        from += 360.0;
    }
    lerp(from, to, delta)
}
