use serde::{Deserialize, Serialize};

/// Eight-point compass bucket for a bearing in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Unknown,
}

impl CompassDirection {
    /// Bucket a bearing into 45° sectors centered on the compass points.
    ///
    /// Sectors are half-open (lower bound inclusive). North spans the
    /// wraparound: `[0, 22.5)` and `[337.5, 360)`. Anything outside
    /// `[0, 360)`, NaN included, is `Unknown`.
    pub fn from_degrees(degrees: f64) -> Self {
        if !(0.0..360.0).contains(&degrees) {
            return Self::Unknown;
        }

        match degrees {
            d if d < 22.5 => Self::N,
            d if d < 67.5 => Self::NE,
            d if d < 112.5 => Self::E,
            d if d < 157.5 => Self::SE,
            d if d < 202.5 => Self::S,
            d if d < 247.5 => Self::SW,
            d if d < 292.5 => Self::W,
            d if d < 337.5 => Self::NW,
            _ => Self::N,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`CompassDirection::from_degrees`].
pub fn classify_direction(degrees: f64) -> CompassDirection {
    CompassDirection::from_degrees(degrees)
}
