// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A single signed move of an exercise.

use crate::beads::Sign;
use crate::config::RuleFamily;
use crate::memo::Formula;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// What kind of gesture an action trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionTag {
    Plain,
    Brother,
    Friend,
    Mix,
}

impl ActionTag {
    /// The tag of composite steps in `family`; [`ActionTag::Plain`] for Simple.
    pub fn for_family(family: RuleFamily) -> ActionTag {
        match family {
            RuleFamily::Simple => ActionTag::Plain,
            RuleFamily::Brothers => ActionTag::Brother,
            RuleFamily::Friends => ActionTag::Friend,
            RuleFamily::Mix => ActionTag::Mix,
        }
    }
}

/// The rule-specific part of a non-plain action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composite {
    pub tag: ActionTag,
    pub trained_digit: u8,
    pub sign: Sign,
    /// Register the formula is anchored at.
    pub target: usize,
    pub formula: Formula,
}

impl Composite {
    pub fn place_value(&self) -> i64 {
        10i64.pow(self.target as u32)
    }

    /// Contribution of the formula to the action's value.
    pub fn formula_value(&self) -> i64 {
        self.formula.net() * self.place_value()
    }
}

/// A signed magnitude, plain or composite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    value: i64,
    composite: Option<Composite>,
}

impl Action {
    pub fn plain(value: i64) -> Self {
        Self {
            value,
            composite: None,
        }
    }

    pub fn composite(value: i64, composite: Composite) -> Self {
        Self {
            value,
            composite: Some(composite),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn magnitude(&self) -> u64 {
        self.value.unsigned_abs()
    }

    /// Ten or more with a zero units digit, such as 40 or 300.
    pub fn is_round(&self) -> bool {
        is_round_number(self.magnitude())
    }

    pub fn sign(&self) -> Option<Sign> {
        Sign::of(self.value)
    }

    pub fn tag(&self) -> ActionTag {
        self.composite
            .as_ref()
            .map_or(ActionTag::Plain, |composite| composite.tag)
    }

    pub fn is_plain(&self) -> bool {
        self.composite.is_none()
    }

    pub fn composite_part(&self) -> Option<&Composite> {
        self.composite.as_ref()
    }

    /// The part of the value moved directly on registers below the target.
    pub fn plain_part(&self) -> i64 {
        match &self.composite {
            Some(composite) => self.value - composite.formula_value(),
            None => self.value,
        }
    }
}

pub fn is_round_number(magnitude: u64) -> bool {
    magnitude >= 10 && magnitude % 10 == 0
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value)
    }
}
