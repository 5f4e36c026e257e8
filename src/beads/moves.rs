// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Legality of direct moves on one register.
//!
//! Moving up may only engage beads, moving down may only release them. The
//! classic illegal case is 4 → 5 (or 5 → 4): the upper bead goes one way
//! while all four lower beads go the other.

use super::Sign;

/// Largest value a register can hold.
pub const MAX_DIGIT: u8 = 9;

/// Value of the upper bead.
pub const UPPER_VALUE: u8 = 5;

/// 1 if the upper bead is engaged, else 0.
pub const fn upper(v: u8) -> u8 {
    if v >= UPPER_VALUE {
        1
    } else {
        0
    }
}

/// Number of engaged lower beads.
pub const fn lower(v: u8) -> u8 {
    v - UPPER_VALUE * upper(v)
}

/// Can `n` be added to register value `v` with a single add-only gesture?
pub fn can_move_up(v: u8, n: u8) -> bool {
    if v > MAX_DIGIT || n == 0 || n > MAX_DIGIT {
        return false;
    }
    let target = v + n;
    if target > MAX_DIGIT {
        return false;
    }
    let du = upper(target) as i8 - upper(v) as i8;
    let dl = lower(target) as i8 - lower(v) as i8;
    du >= 0 && dl >= 0 && (du > 0 || dl > 0)
}

/// Can `n` be subtracted from register value `v` with a single remove-only gesture?
pub fn can_move_down(v: u8, n: u8) -> bool {
    if v > MAX_DIGIT || n == 0 || n > v {
        return false;
    }
    let target = v - n;
    let du = upper(v) as i8 - upper(target) as i8;
    let dl = lower(v) as i8 - lower(target) as i8;
    du >= 0 && dl >= 0 && (du > 0 || dl > 0)
}

pub fn can_move(v: u8, n: u8, sign: Sign) -> bool {
    match sign {
        Sign::Plus => can_move_up(v, n),
        Sign::Minus => can_move_down(v, n),
    }
}

/// Is the signed change `delta` a legal direct move from `v`?
///
/// A zero delta is not a move.
pub fn can_apply(v: u8, delta: i32) -> bool {
    match Sign::of(delta as i64) {
        Some(sign) if delta.unsigned_abs() <= MAX_DIGIT as u32 => {
            can_move(v, delta.unsigned_abs() as u8, sign)
        }
        _ => false,
    }
}

/// The register value after a legal direct move, or `None` if the move is illegal.
pub fn apply_direct(v: u8, delta: i32) -> Option<u8> {
    if can_apply(v, delta) {
        Some((v as i32 + delta) as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bead_decomposition() {
        for v in 0..=MAX_DIGIT {
            assert_eq!(upper(v) * UPPER_VALUE + lower(v), v);
            assert!(lower(v) <= 4);
        }
    }

    #[test]
    fn test_four_to_five_is_not_direct() {
        assert!(!can_move_up(4, 1));
        assert!(!can_move_up(3, 2));
        assert!(!can_move_up(1, 4));
        assert!(!can_move_down(5, 1));
        assert!(!can_move_down(6, 2));
        assert!(!can_move_down(8, 4));
    }

    #[test]
    fn test_upper_and_lower_together() {
        // Engaging the upper bead and lower beads in one sweep is still add-only.
        assert!(can_move_up(1, 6));
        assert!(can_move_down(7, 6));
        assert!(can_move_up(4, 5));
        assert!(can_move_down(9, 5));
    }

    #[test]
    fn test_bounds() {
        assert!(!can_move_up(9, 1));
        assert!(!can_move_up(5, 5));
        assert!(!can_move_down(0, 1));
        assert!(!can_move_down(3, 4));
        assert!(!can_move_up(2, 0));
        assert!(!can_move_down(2, 0));
    }

    #[test]
    fn test_up_and_down_mirror() {
        for v in 0..=MAX_DIGIT {
            for n in 1..=MAX_DIGIT {
                if can_move_up(v, n) {
                    assert!(can_move_down(v + n, n), "{} + {}", v, n);
                }
            }
        }
    }

    #[test]
    fn test_apply_direct() {
        assert_eq!(apply_direct(2, 5), Some(7));
        assert_eq!(apply_direct(7, -7), Some(0));
        assert_eq!(apply_direct(4, 1), None);
        assert_eq!(apply_direct(4, 0), None);
        assert_eq!(apply_direct(4, 12), None);
    }
}
