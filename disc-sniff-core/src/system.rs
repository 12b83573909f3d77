/// Console systems the magic detector can tell apart.
///
/// The short names match the identifiers frontends already use for
/// database lookups, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    Ps1,
    PcEngineCd,
    SegaCd,
    Psp,
}

const ALL_SYSTEMS: &[System] = &[
    System::Ps1,
    System::PcEngineCd,
    System::SegaCd,
    System::Psp,
];

impl System {
    /// Canonical short name reported by the detector.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Ps1 => "ps1",
            Self::PcEngineCd => "pcecd",
            Self::SegaCd => "scd",
            Self::Psp => "psp",
        }
    }

    /// Full display name for the system.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ps1 => "Sony PlayStation",
            Self::PcEngineCd => "NEC PC Engine CD / TurboGrafx-CD",
            Self::SegaCd => "Sega CD / Mega CD",
            Self::Psp => "Sony PlayStation Portable",
        }
    }

    pub fn manufacturer(&self) -> &'static str {
        match self {
            Self::Ps1 | Self::Psp => "Sony",
            Self::PcEngineCd => "NEC",
            Self::SegaCd => "Sega",
        }
    }

    /// All accepted names for this system (case-insensitive matching).
    ///
    /// The first entry is always the short name.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Ps1 => &["ps1", "psx", "playstation", "playstation1"],
            Self::PcEngineCd => &["pcecd", "pce-cd", "turbografx-cd", "tgcd"],
            Self::SegaCd => &["scd", "segacd", "sega cd", "megacd", "mega cd"],
            Self::Psp => &["psp", "playstation portable"],
        }
    }

    pub fn all() -> &'static [System] {
        ALL_SYSTEMS
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Error returned when a string cannot be parsed into a `System`.
#[derive(Debug, Clone)]
pub struct SystemParseError(pub String);

impl std::fmt::Display for SystemParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown system: '{}'", self.0)
    }
}

impl std::error::Error for SystemParseError {}

impl std::str::FromStr for System {
    type Err = SystemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_SYSTEMS
            .iter()
            .copied()
            .find(|system| system.aliases().contains(&lower.as_str()))
            .ok_or_else(|| SystemParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/system_tests.rs"]
mod tests;
