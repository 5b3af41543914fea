// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ease-in/ease-out step profile.
//!
//! The step taken on each tick depends only on the distance to the nearer end of the move
//! (`min(|position - start|, |position - goal|)`): the highest set bit of that distance, clipped to
//! [`STEP_CEILING`], halved once more and clamped to `1..=MAX_STEP`. Steps therefore double on the
//! way out of `start`, cruise at [`MAX_STEP`], and halve again on the way into `goal`. No floating
//! point and no velocity state.

use crate::config::{MAX_STEP, STEP_CEILING};

/// Step size for a distance `diff` to the nearer endpoint.
#[inline]
pub fn step_size(diff: u16) -> u16 {
    let clipped = diff.min(STEP_CEILING);
    if clipped == 0 {
        return 1;
    }
    let top_bit = 1u16 << (15 - clipped.leading_zeros());
    (top_bit >> 1).clamp(1, MAX_STEP)
}

/// Next position of a move from `start` to `goal` currently at `position`. Never passes `goal`.
pub fn advance(start: u16, position: u16, goal: u16) -> u16 {
    if position == goal {
        return position;
    }
    let past = position.abs_diff(start);
    let remaining = position.abs_diff(goal);
    let step = step_size(past.min(remaining)).min(remaining);

    if goal > position {
        position + step
    } else {
        position - step
    }
}
