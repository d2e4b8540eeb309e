//! Palette entity and color matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A palette row from the `palettes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Palette {
    pub id: i64,
    pub name: Option<String>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub color3: Option<String>,
    pub color4: Option<String>,
    pub color5: Option<String>,
    pub project_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Palette {
    /// The five color slots in column order.
    pub fn colors(&self) -> [Option<&str>; 5] {
        [
            self.color1.as_deref(),
            self.color2.as_deref(),
            self.color3.as_deref(),
            self.color4.as_deref(),
            self.color5.as_deref(),
        ]
    }

    /// True when any slot holds exactly `color`.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors().iter().any(|slot| *slot == Some(color))
    }
}

/// Keep only palettes that use `color` in any slot.
pub fn filter_by_color(palettes: Vec<Palette>, color: &str) -> Vec<Palette> {
    palettes.into_iter().filter(|p| p.has_color(color)).collect()
}

/// One of the five color columns of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Color1,
    Color2,
    Color3,
    Color4,
    Color5,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 5] = [
        ColorSlot::Color1,
        ColorSlot::Color2,
        ColorSlot::Color3,
        ColorSlot::Color4,
        ColorSlot::Color5,
    ];

    /// Column name; safe to splice into SQL.
    pub fn column(&self) -> &'static str {
        match self {
            ColorSlot::Color1 => "color1",
            ColorSlot::Color2 => "color2",
            ColorSlot::Color3 => "color3",
            ColorSlot::Color4 => "color4",
            ColorSlot::Color5 => "color5",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorSlot(pub String);

impl fmt::Display for UnknownColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The changeColor property must be one of color1, color2, color3, color4, color5. Received: {}",
            self.0
        )
    }
}

impl FromStr for ColorSlot {
    type Err = UnknownColorSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSlot::ALL
            .into_iter()
            .find(|slot| slot.column() == s)
            .ok_or_else(|| UnknownColorSlot(s.to_string()))
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
