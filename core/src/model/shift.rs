use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Display colour of a shift, as 8-bit RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Relative luminance in `0.0..=1.0` (sRGB weights).
    pub fn luminance(self) -> f64 {
        let channel = |c: u8| {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }

    pub fn is_dark(self) -> bool {
        self.luminance() < 0.5
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftType {
    Morning,
    Night,
    Full,
    Day16,
    Evening,
}

/// Static attributes of one shift type.
#[derive(Debug)]
pub struct ShiftSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub hours: u32,
    pub color: Rgb,
}

// Indexed by `ShiftType as usize`, keep in declaration order.
const CATALOG: [ShiftSpec; 5] = [
    ShiftSpec { name: "MORNING", label: "8-16", hours: 8, color: Rgb(0x64, 0xB5, 0xF6) },
    ShiftSpec { name: "NIGHT", label: "16-8", hours: 16, color: Rgb(0x95, 0x75, 0xCD) },
    ShiftSpec { name: "FULL", label: "8-8", hours: 24, color: Rgb(0xF4, 0x43, 0x36) },
    ShiftSpec { name: "DAY16", label: "8-24", hours: 16, color: Rgb(0x4C, 0xAF, 0x50) },
    ShiftSpec { name: "EVENING", label: "16-24", hours: 8, color: Rgb(0xFF, 0x98, 0x00) },
];

impl ShiftType {
    pub const ALL: [ShiftType; 5] = [
        ShiftType::Morning,
        ShiftType::Night,
        ShiftType::Full,
        ShiftType::Day16,
        ShiftType::Evening,
    ];

    pub fn spec(self) -> &'static ShiftSpec {
        &CATALOG[self as usize]
    }

    /// Identifier used in the export format, e.g. `DAY16`.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Human readable working window, e.g. `8-24`.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn hours(self) -> u32 {
        self.spec().hours
    }

    pub fn color(self) -> Rgb {
        self.spec().color
    }

    /// Matches an identifier ignoring case, no prefixes. For user input.
    pub fn from_name(name: &str) -> Option<ShiftType> {
        Self::ALL
            .into_iter()
            .find(|shift| shift.name().eq_ignore_ascii_case(name))
    }

    /// Matches an export identifier exactly, e.g. `NIGHT` but not `night`.
    pub fn from_identifier(name: &str) -> Option<ShiftType> {
        Self::ALL.into_iter().find(|shift| shift.name() == name)
    }
}

pub fn hours_of(shift: ShiftType) -> u32 {
    shift.hours()
}

pub fn color_of(shift: ShiftType) -> Rgb {
    shift.color()
}

pub fn label_of(shift: ShiftType) -> &'static str {
    shift.label()
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ShiftType::from_name(s)
            .or_else(|| ShiftType::ALL.into_iter().find(|shift| shift.label() == s))
            .ok_or_else(|| anyhow!("Unknown shift type: {}", s))
    }
}
