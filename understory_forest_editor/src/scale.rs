// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal depth grid.

/// Linear map from the step domain `[1, steps]` onto `[0, width]`.
///
/// Depth `d` is drawn at step `d + 1`, so roots sit at `x = 0` and each level
/// of the tree moves one step to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthScale {
    steps: u32,
    width: f64,
}

impl DepthScale {
    /// Create a scale. Fewer than two steps are treated as two.
    pub fn new(steps: u32, width: f64) -> Self {
        Self {
            steps: steps.max(2),
            width,
        }
    }

    /// Number of steps.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Horizontal distance between two steps.
    pub fn step_width(&self) -> f64 {
        self.width / f64::from(self.steps - 1)
    }

    /// Position of a (possibly fractional) step.
    pub fn x(&self, step: f64) -> f64 {
        (step - 1.0) * self.step_width()
    }

    /// Step at a position; the inverse of [`DepthScale::x`].
    pub fn invert(&self, x: f64) -> f64 {
        x / self.step_width() + 1.0
    }

    /// Position of depth column `depth`.
    pub fn column_x(&self, depth: u32) -> f64 {
        self.x(f64::from(depth) + 1.0)
    }

    /// Depth column nearest to `x`, clamped to the grid.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The step is clamped to [1, steps] first."
    )]
    pub fn column_at(&self, x: f64) -> u32 {
        let step = self.invert(x).round().clamp(1.0, f64::from(self.steps));
        step as u32 - 1
    }

    /// `x` snapped to the nearest column.
    pub fn snap_x(&self, x: f64) -> f64 {
        self.column_x(self.column_at(x))
    }

    /// `(step, x)` for every grid line, for drawing an axis.
    pub fn ticks(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        (1..=self.steps).map(|step| (step, self.x(f64::from(step))))
    }
}
