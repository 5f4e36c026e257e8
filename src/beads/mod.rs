// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bead physics for a single soroban register.
//!
//! A register holds one decimal digit, shown as one upper bead (worth 5) and
//! four lower beads (worth 1 each). A *direct move* is a single gesture that
//! only adds beads (moving up) or only removes beads (moving down). Every
//! other component asks these predicates whether a numeric change is
//! physically achievable in one gesture.
//!
//! # Example
//!
//! ```
//! use soroban_gen::beads::{can_move_up, can_move_down, lower, upper};
//!
//! assert_eq!((upper(7), lower(7)), (1, 2));
//! assert!(can_move_up(0, 5));
//! assert!(!can_move_up(4, 1)); // 4 → 5 needs the lower beads cleared
//! assert!(!can_move_down(5, 1));
//! ```

pub mod digit_set;
pub mod moves;
pub mod sign;

pub use digit_set::DigitSet;
pub use moves::{
    apply_direct, can_apply, can_move, can_move_down, can_move_up, lower, upper, MAX_DIGIT,
    UPPER_VALUE,
};
pub use sign::Sign;
