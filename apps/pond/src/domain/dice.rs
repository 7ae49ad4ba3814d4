//! Dice faces, column identifiers and the choices a roll offers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest column identifier (two ones).
pub const MIN_COLUMN: u8 = 2;
/// Highest column identifier (two sixes).
pub const MAX_COLUMN: u8 = 12;
/// Number of dice thrown per hop.
pub const DICE_PER_ROLL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("column identifier {0} is outside {MIN_COLUMN}..={MAX_COLUMN}")]
pub struct InvalidColumn(pub u8);

/// A column identifier: the sum of a die pair, 2 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColumnId(u8);

impl ColumnId {
    pub fn new(sum: u8) -> Result<Self, InvalidColumn> {
        if (MIN_COLUMN..=MAX_COLUMN).contains(&sum) {
            Ok(Self(sum))
        } else {
            Err(InvalidColumn(sum))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index the engine uses for this column.
    pub const fn engine_index(self) -> usize {
        (self.0 - MIN_COLUMN) as usize
    }

    /// Inverse of [`ColumnId::engine_index`].
    pub fn from_engine_index(index: usize) -> Result<Self, InvalidColumn> {
        let sum = u8::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(MIN_COLUMN))
            .ok_or(InvalidColumn(u8::MAX))?;
        Self::new(sum)
    }
}

impl TryFrom<u8> for ColumnId {
    type Error = InvalidColumn;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnId> for u8 {
    fn from(value: ColumnId) -> Self {
        value.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Engine-side addressing of a choice: zero-based column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineColumns {
    pub first: usize,
    pub second: Option<usize>,
}

/// One or two columns selectable from a roll.
///
/// Serialised as the engine's `[first, second | null]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(ColumnId, Option<ColumnId>)", into = "(ColumnId, Option<ColumnId>)")]
pub struct ColumnChoice {
    pub first: ColumnId,
    pub second: Option<ColumnId>,
}

impl ColumnChoice {
    pub const fn single(first: ColumnId) -> Self {
        Self {
            first,
            second: None,
        }
    }

    pub const fn pair(first: ColumnId, second: ColumnId) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    /// Build from raw dice-pair sums, e.g. `ColumnChoice::from_sums(7, Some(9))`.
    pub fn from_sums(first: u8, second: Option<u8>) -> Result<Self, InvalidColumn> {
        Ok(Self {
            first: ColumnId::new(first)?,
            second: second.map(ColumnId::new).transpose()?,
        })
    }

    pub fn engine_columns(&self) -> EngineColumns {
        EngineColumns {
            first: self.first.engine_index(),
            second: self.second.map(ColumnId::engine_index),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = ColumnId> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl From<(ColumnId, Option<ColumnId>)> for ColumnChoice {
    fn from((first, second): (ColumnId, Option<ColumnId>)) -> Self {
        Self { first, second }
    }
}

impl From<ColumnChoice> for (ColumnId, Option<ColumnId>) {
    fn from(choice: ColumnChoice) -> Self {
        (choice.first, choice.second)
    }
}

impl fmt::Display for ColumnChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.second {
            Some(second) => write!(f, "{} & {}", self.first, second),
            None => write!(f, "{}", self.first),
        }
    }
}

/// The result of a roll: the faces and the legal choices they offer.
///
/// An outcome with no dice means nothing is rolled yet. Dice with no
/// choices means the run has failed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    #[serde(default)]
    pub dice: Vec<u8>,
    #[serde(default)]
    pub choices: Vec<ColumnChoice>,
}

impl RollOutcome {
    pub fn new(dice: [u8; DICE_PER_ROLL], choices: Vec<ColumnChoice>) -> Self {
        Self {
            dice: dice.to_vec(),
            choices,
        }
    }

    pub fn is_rolled(&self) -> bool {
        !self.dice.is_empty()
    }

    /// Dice are showing but no pairing fits: the run is lost.
    pub fn is_croaked(&self) -> bool {
        self.is_rolled() && self.choices.is_empty()
    }

    pub fn offers(&self, choice: &ColumnChoice) -> bool {
        self.choices.contains(choice)
    }

    pub fn clear(&mut self) {
        self.dice.clear();
        self.choices.clear();
    }
}
