//! Enumerations and field types for todos and tags.
//!
//! This module defines the tag color palette, the answers accepted by the
//! color prompt, and the argument kinds taken by `mark` and `clear`.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::UlutoError;

/// Display color of a tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// Every color a tag may take, in the order the help listing shows them.
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
        }
    }

    /// Pick one palette member uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Color {
        *PALETTE.choose(rng).unwrap_or(&Color::Red)
    }

    /// The terminal color used when rendering.
    pub fn terminal(self) -> crossterm::style::Color {
        use crossterm::style::Color as Term;
        match self {
            Color::Red => Term::DarkRed,
            Color::Green => Term::DarkGreen,
            Color::Yellow => Term::DarkYellow,
            Color::Blue => Term::DarkBlue,
            Color::Magenta => Term::DarkMagenta,
            Color::Cyan => Term::DarkCyan,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = UlutoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UlutoError::InvalidColor(s.to_string()))
    }
}

/// An answer typed at the color prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAnswer {
    Color(Color),
    Random,
    Help,
}

impl FromStr for ColorAnswer {
    type Err = UlutoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "?" => Ok(ColorAnswer::Help),
            "random" => Ok(ColorAnswer::Random),
            other => other.parse().map(ColorAnswer::Color),
        }
    }
}

/// Target of `mark`: one position or every todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkTarget {
    All,
    Position(usize),
}

impl FromStr for MarkTarget {
    type Err = UlutoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(MarkTarget::All)
        } else {
            parse_position(s).map(MarkTarget::Position)
        }
    }
}

/// Kind argument of `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearKind {
    Done,
    All,
}

impl FromStr for ClearKind {
    type Err = UlutoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(ClearKind::Done),
            "all" => Ok(ClearKind::All),
            other => Err(UlutoError::InvalidClearKind(other.to_string())),
        }
    }
}

/// Parse a 0-based todo position. `all` is not a position.
pub fn parse_position(s: &str) -> Result<usize, UlutoError> {
    s.parse::<usize>()
        .map_err(|_| UlutoError::InvalidPosition(s.to_string()))
}
