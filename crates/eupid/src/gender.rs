//! ISO/IEC 5218 gender codes, extended with the values of EU PID Rule
//! Book v1.5.0. Encoded as the bare integer code on every wire format.

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Gender code per ISO/IEC 5218 and the EU PID rule book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum IsoIec5218Gender {
    /// Code 0, not known.
    NotKnown = 0,
    /// Code 1.
    Male = 1,
    /// Code 2.
    Female = 2,
    /// Code 3, EU PID extension.
    Other = 3,
    /// Code 4, EU PID extension.
    Inter = 4,
    /// Code 5, EU PID extension.
    Diverse = 5,
    /// Code 6, EU PID extension.
    Open = 6,
    /// Code 9, not applicable.
    NotApplicable = 9,
}

impl IsoIec5218Gender {
    /// All codes, in ascending order.
    pub const ALL: [IsoIec5218Gender; 8] = [
        Self::NotKnown,
        Self::Male,
        Self::Female,
        Self::Other,
        Self::Inter,
        Self::Diverse,
        Self::Open,
        Self::NotApplicable,
    ];

    /// Numeric codes of [`Self::ALL`], for the ISO item value codec.
    pub const CODES: [u64; 8] = [0, 1, 2, 3, 4, 5, 6, 9];

    /// Numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Gender for a numeric code.
    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|g| u64::from(g.code()) == code)
    }

    /// Lower snake case name, as used in SD-JWT claim sets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotKnown => "not_known",
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Inter => "inter",
            Self::Diverse => "diverse",
            Self::Open => "open",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl std::fmt::Display for IsoIec5218Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IsoIec5218Gender {
    type Err = String;

    /// Accepts the name (any case, `-` or `_`) or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<u64>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown ISO/IEC 5218 code: {code}"));
        }
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| format!("unknown gender: {s:?}"))
    }
}
