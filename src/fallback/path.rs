// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Short plain paths on a single register.
//!
//! Breadth-first over (register value, recent magnitudes), so the first hit
//! is a shortest path. When no direct sequence exists the search naturally
//! detours through 0, 5 or 9.
//!
//! [`distances_to`] is the coarse version used to score where a composite
//! step leaves the register.

use crate::beads::{apply_direct, DigitSet, Sign};
use std::collections::{HashSet, VecDeque};

/// Longest preparatory path considered.
pub const MAX_PATH_LEN: usize = 6;

/// Nodes expanded before the search gives up.
pub const PATH_SEARCH_CAP: usize = 2_000;

/// Parameters of one path search.
#[derive(Debug, Clone)]
pub struct PathSearch<'a> {
    /// Digits a plain move may use.
    pub digits: DigitSet,
    /// Signs a plain move may take.
    pub signs: &'a [Sign],
    /// Place value of the register being moved.
    pub place: u64,
    /// Anti-repeat window, in steps.
    pub window: usize,
    pub max_len: usize,
}

#[derive(Debug)]
struct Node {
    value: u8,
    recent: Vec<u64>,
    path: Vec<i64>,
}

impl PathSearch<'_> {
    /// The shortest list of signed plain values taking the register from
    /// `start` into `goal`, such that no magnitude repeats within the window
    /// (starting from `recent`) and `final_magnitude` may follow it.
    pub fn find(
        &self,
        start: u8,
        goal: DigitSet,
        recent: &[u64],
        final_magnitude: u64,
    ) -> Option<Vec<i64>> {
        let start_recent = self.trim(recent.to_vec());
        let mut seen = HashSet::new();
        seen.insert((start, start_recent.clone()));
        let mut queue = VecDeque::from([Node {
            value: start,
            recent: start_recent,
            path: Vec::new(),
        }]);
        let mut expanded = 0;

        while let Some(node) = queue.pop_front() {
            if goal.contains(node.value) && !node.recent.contains(&final_magnitude) {
                return Some(node.path);
            }
            if node.path.len() >= self.max_len || expanded >= PATH_SEARCH_CAP {
                continue;
            }
            expanded += 1;

            for digit in self.digits.iter() {
                let magnitude = digit as u64 * self.place;
                if node.recent.contains(&magnitude) {
                    continue;
                }
                for &sign in self.signs {
                    let Some(value) = apply_direct(node.value, sign.signed(digit as u64) as i32)
                    else {
                        continue;
                    };
                    let mut recent = node.recent.clone();
                    recent.push(magnitude);
                    let recent = self.trim(recent);
                    if seen.insert((value, recent.clone())) {
                        let mut path = node.path.clone();
                        path.push(sign.signed(magnitude));
                        queue.push_back(Node {
                            value,
                            recent,
                            path,
                        });
                    }
                }
            }
        }
        None
    }

    fn trim(&self, mut recent: Vec<u64>) -> Vec<u64> {
        let excess = recent.len().saturating_sub(self.window);
        recent.drain(..excess);
        recent
    }
}

/// Fewest plain moves from each register value into `goal`, ignoring the
/// anti-repeat window. `None` where `goal` is out of reach.
pub fn distances_to(goal: DigitSet, digits: DigitSet, signs: &[Sign]) -> [Option<usize>; 10] {
    std::array::from_fn(|start| {
        let mut depth = [None; 10];
        depth[start] = Some(0);
        let mut queue = VecDeque::from([start as u8]);
        while let Some(value) = queue.pop_front() {
            let Some(steps) = depth[value as usize] else {
                continue;
            };
            if goal.contains(value) {
                return Some(steps);
            }
            for digit in digits.iter() {
                for &sign in signs {
                    let Some(next) = apply_direct(value, sign.signed(digit as u64) as i32) else {
                        continue;
                    };
                    if depth[next as usize].is_none() {
                        depth[next as usize] = Some(steps + 1);
                        queue.push_back(next);
                    }
                }
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(window: usize) -> PathSearch<'static> {
        PathSearch {
            digits: DigitSet::range(1, 9),
            signs: &Sign::BOTH,
            place: 1,
            window,
            max_len: MAX_PATH_LEN,
        }
    }

    #[test]
    fn test_already_there() {
        let path = search(1).find(3, DigitSet::from_digits(&[3]), &[7], 4);
        assert_eq!(path, Some(vec![]));
    }

    #[test]
    fn test_repeat_forces_a_detour() {
        // At 3 after a +3, another 3-magnitude step must not follow directly.
        let path = search(1)
            .find(3, DigitSet::from_digits(&[3]), &[3], 3)
            .unwrap();
        assert!(!path.is_empty());
        let mut value = 3i64;
        let mut last = 3u64;
        for step in &path {
            assert_ne!(step.unsigned_abs(), last);
            value += step;
            last = step.unsigned_abs();
        }
        assert_eq!(value, 3);
        assert_ne!(last, 3);
    }

    #[test]
    fn test_direct_step() {
        let path = search(1).find(7, DigitSet::from_digits(&[9]), &[], 1).unwrap();
        assert_eq!(path, vec![2]);
    }

    #[test]
    fn test_detour_through_five() {
        // 4 + 2 needs the upper bead, so a plain route takes two steps.
        let path = search(1)
            .find(4, DigitSet::from_digits(&[6]), &[], 7)
            .unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.iter().sum::<i64>(), 2);
    }

    #[test]
    fn test_unreachable_with_narrow_digits() {
        let narrow = PathSearch {
            digits: DigitSet::from_digits(&[5]),
            signs: &[Sign::Plus],
            place: 1,
            window: 1,
            max_len: MAX_PATH_LEN,
        };
        assert_eq!(narrow.find(1, DigitSet::from_digits(&[2]), &[], 9), None);
    }

    #[test]
    fn test_distances_into_lower_beads() {
        let distances = distances_to(DigitSet::range(1, 4), DigitSet::range(1, 9), &Sign::BOTH);
        assert_eq!(distances[3], Some(0));
        assert_eq!(distances[0], Some(1));
        assert_eq!(distances[6], Some(1));
        assert_eq!(distances[9], Some(1));
        // Nothing comes off a lone upper bead directly.
        assert_eq!(distances[5], Some(2));

        let upward = distances_to(DigitSet::from_digits(&[2]), DigitSet::range(1, 9), &[Sign::Plus]);
        assert_eq!(upward[7], None);
    }

    #[test]
    fn test_place_value_scales_magnitudes() {
        let tens = PathSearch {
            place: 10,
            ..search(1)
        };
        let path = tens.find(2, DigitSet::from_digits(&[4]), &[], 30).unwrap();
        assert_eq!(path, vec![20]);
    }
}
