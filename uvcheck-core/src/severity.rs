use serde::{Deserialize, Serialize};

/// UV risk band used to pick a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Unknown,
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Upper bounds are inclusive: 2 is still low, 2.01 is moderate.
pub fn classify(uv: Option<f64>) -> Severity {
    match uv {
        None => Severity::Unknown,
        Some(uv) if uv <= 2.0 => Severity::Low,
        Some(uv) if uv <= 5.0 => Severity::Moderate,
        Some(uv) if uv <= 7.0 => Severity::High,
        Some(_) => Severity::VeryHigh,
    }
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::VeryHigh => "very high",
        }
    }

    /// Display color as `#rrggbb`.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Unknown => "#cccccc",
            Severity::Low => "#4CAF50",
            Severity::Moderate => "#FFC107",
            Severity::High => "#FF9800",
            Severity::VeryHigh => "#F44336",
        }
    }

    /// The display color as RGB components, matching [`Severity::color`].
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Unknown => (0xcc, 0xcc, 0xcc),
            Severity::Low => (0x4c, 0xaf, 0x50),
            Severity::Moderate => (0xff, 0xc1, 0x07),
            Severity::High => (0xff, 0x98, 0x00),
            Severity::VeryHigh => (0xf4, 0x43, 0x36),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
