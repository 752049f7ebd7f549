use serde::{Deserialize, Serialize};

/// Qualitative surf rating derived from wave height
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SurfRating {
    Poor,
    Good,
    Excellent,
}

impl SurfRating {
    /// Classify a wave height in meters.
    ///
    /// Above 4.0 is excellent, above 2.0 is good, everything else
    /// (including zero, negative and NaN) is poor.
    pub fn from_wave_height(wave_height_meters: f64) -> Self {
        if wave_height_meters > 4.0 {
            Self::Excellent
        } else if wave_height_meters > 2.0 {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for SurfRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`SurfRating::from_wave_height`].
pub fn rate(wave_height_meters: f64) -> SurfRating {
    SurfRating::from_wave_height(wave_height_meters)
}
