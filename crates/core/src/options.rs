//! Conversion direction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConvertError;

/// Which way a document is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Obsidian Markdown -> Consense.
    #[default]
    #[serde(
        rename = "o2c",
        alias = "to-consense",
        alias = "obsidian-to-consense"
    )]
    ToConsense,
    /// Consense -> Obsidian Markdown.
    #[serde(
        rename = "c2o",
        alias = "to-markdown",
        alias = "consense-to-obsidian"
    )]
    ToMarkdown,
}

impl Direction {
    /// Short name used by the converter page (`o2c` / `c2o`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::ToConsense => "o2c",
            Direction::ToMarkdown => "c2o",
        }
    }

    /// The opposite direction, used when input and output are swapped.
    pub const fn reversed(self) -> Self {
        match self {
            Direction::ToConsense => Direction::ToMarkdown,
            Direction::ToMarkdown => Direction::ToConsense,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "o2c" | "to-consense" | "obsidian-to-consense" => Ok(Direction::ToConsense),
            "c2o" | "to-markdown" | "consense-to-obsidian" => Ok(Direction::ToMarkdown),
            _ => Err(ConvertError::UnknownDirection(s.to_string())),
        }
    }
}
