use serde::{Deserialize, Serialize};

/// Calendar month an expense is recorded against.
/// Stored as its canonical lowercase name; `Option<Month>` is the
/// "all months" sentinel used when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// All twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "january" => Some(Month::January),
            "february" => Some(Month::February),
            "march" => Some(Month::March),
            "april" => Some(Month::April),
            "may" => Some(Month::May),
            "june" => Some(Month::June),
            "july" => Some(Month::July),
            "august" => Some(Month::August),
            "september" => Some(Month::September),
            "october" => Some(Month::October),
            "november" => Some(Month::November),
            "december" => Some(Month::December),
            _ => None,
        }
    }

    /// Month from a 1-based calendar number (as returned by chrono).
    pub fn from_number(n: u32) -> Option<Self> {
        MONTHS.get(n.checked_sub(1)? as usize).copied()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
