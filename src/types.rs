use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Step through a closed list of variants, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let pos = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(pos + step).rem_euclid(len) as usize]
}

/// Outline of a spawned shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Triangle,
    Star,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Star];

    pub fn cycle(self, step: isize) -> Self {
        cycle(&Self::ALL, self, step)
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Circle => "Circle",
            Shape::Square => "Square",
            Shape::Triangle => "Triangle",
            Shape::Star => "Star",
        }
    }
}

/// Looping animation applied to a shape.
///
/// Names outside the known set resolve to [`Animation::Fade`]; parsing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Animation {
    #[default]
    Fade,
    Bounce,
    Spin,
    Scale,
}

impl Animation {
    pub const ALL: [Animation; 4] = [
        Animation::Fade,
        Animation::Bounce,
        Animation::Spin,
        Animation::Scale,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bounce" => Animation::Bounce,
            "spin" => Animation::Spin,
            "scale" => Animation::Scale,
            _ => Animation::Fade,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Animation::Fade => "fade",
            Animation::Bounce => "bounce",
            Animation::Spin => "spin",
            Animation::Scale => "scale",
        }
    }

    pub fn cycle(self, step: isize) -> Self {
        cycle(&Self::ALL, self, step)
    }

    pub fn label(self) -> &'static str {
        match self {
            Animation::Fade => "Fade",
            Animation::Bounce => "Bounce",
            Animation::Spin => "Spin",
            Animation::Scale => "Scale",
        }
    }
}

impl From<String> for Animation {
    fn from(name: String) -> Self {
        Animation::from_name(&name)
    }
}

impl From<Animation> for String {
    fn from(animation: Animation) -> Self {
        animation.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("colour must start with '#'")]
    MissingHash,
    #[error("expected 3 or 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// An opaque RGB colour written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Cycle through [`PRESET_COLORS`]. A colour that is not a preset jumps to the first one.
    pub fn cycle_preset(self, step: isize) -> Self {
        if PRESET_COLORS.contains(&self) {
            cycle(&PRESET_COLORS, self, step)
        } else {
            PRESET_COLORS[0]
        }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor::WHITE
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.trim().to_string()));
        }
        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigit(s.trim().to_string()))
        };
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, ch) in rgb.iter_mut().zip(digits.chars()) {
                    let v = channel(&ch.to_string())?;
                    *slot = v * 16 + v;
                }
                Ok(HexColor::new(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(HexColor::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            n => Err(ColorParseError::BadLength(n)),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Palette cycled by the arrow keys on the colour row.
pub const PRESET_COLORS: [HexColor; 9] = [
    HexColor::WHITE,
    HexColor::new(0xff, 0x4d, 0x4d),
    HexColor::new(0xff, 0xa9, 0x4d),
    HexColor::new(0xff, 0xe0, 0x66),
    HexColor::new(0x69, 0xdb, 0x7c),
    HexColor::new(0x66, 0xd9, 0xe8),
    HexColor::new(0x4d, 0xab, 0xf7),
    HexColor::new(0xb1, 0x97, 0xfc),
    HexColor::new(0xf7, 0x83, 0xac),
];

/// Number of shapes created per "add", always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct SpawnCount(u8);

impl SpawnCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Coerce free-form numeric input. Empty or non-numeric text lands on the lower bound.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Ok(v) = text.parse::<i64>() {
            return Self::new(v);
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                Self::new(v.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
            }
            Ok(v) if v == f64::INFINITY => Self(Self::MAX),
            _ => Self(Self::MIN),
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for SpawnCount {
    fn default() -> Self {
        Self(5)
    }
}

impl From<i64> for SpawnCount {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<SpawnCount> for i64 {
    fn from(count: SpawnCount) -> Self {
        count.0 as i64
    }
}

/// Session-unique identifier of a spawned shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

/// One spawned shape. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeInstance {
    pub id: ShapeId,
    pub shape: Shape,
    pub color: HexColor,
    pub animation: Animation,
}

/// Pointer position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub x: u16,
    pub y: u16,
}

/// Current control-panel selections. Lives for the session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub shape: Shape,
    pub color: HexColor,
    pub animation: Animation,
    pub spawn_count: SpawnCount,
    pub trail_enabled: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            shape: Shape::Circle,
            color: HexColor::WHITE,
            animation: Animation::Fade,
            spawn_count: SpawnCount::default(),
            trail_enabled: true,
        }
    }
}

/// A row of the control panel, in keyboard navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusItem {
    Shape,
    Animation,
    Color,
    Count,
    Trail,
    Add,
}

impl FocusItem {
    pub const ALL: [FocusItem; 6] = [
        FocusItem::Shape,
        FocusItem::Animation,
        FocusItem::Color,
        FocusItem::Count,
        FocusItem::Trail,
        FocusItem::Add,
    ];

    pub fn cycle(self, step: isize) -> Self {
        cycle(&Self::ALL, self, step)
    }
}

/// Active modal dialog type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Free-form hex colour entry; `error` holds the last rejected input's reason.
    ColorInput {
        value: String,
        error: Option<String>,
    },
    /// Help overlay.
    Help,
}
