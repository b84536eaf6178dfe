use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bar granularities plus the tick granule, as the host platform names them.
///
/// The feed serves `Minute`, `Hour`, `Daily` and `Tick` through dedicated
/// vendor query shapes. `Weekly` exists in the host contract but has no
/// vendor encoding and fails soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Minute,
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "d")]
    Daily,
    #[serde(rename = "w")]
    Weekly,
    #[serde(rename = "tick")]
    Tick,
}

impl Interval {
    /// Every variant, for exhaustive table checks.
    pub const ALL: [Interval; 5] = [
        Interval::Minute,
        Interval::Hour,
        Interval::Daily,
        Interval::Weekly,
        Interval::Tick,
    ];

    /// The host's wire string for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute => "1m",
            Interval::Hour => "1h",
            Interval::Daily => "d",
            Interval::Weekly => "w",
            Interval::Tick => "tick",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown interval '{0}'")]
pub struct UnknownInterval(pub String);

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::Minute),
            "1h" => Ok(Interval::Hour),
            "d" => Ok(Interval::Daily),
            "w" => Ok(Interval::Weekly),
            "tick" => Ok(Interval::Tick),
            other => Err(UnknownInterval(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_string_round_trip_for_every_variant() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), interval);
        }
    }

    #[test]
    fn unknown_wire_string_is_rejected() {
        let err = "5m".parse::<Interval>().unwrap_err();
        assert_eq!(err, UnknownInterval("5m".to_string()));
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&Interval::Minute).unwrap(), "\"1m\"");
        assert_eq!(serde_json::to_string(&Interval::Daily).unwrap(), "\"d\"");
        let back: Interval = serde_json::from_str("\"tick\"").unwrap();
        assert_eq!(back, Interval::Tick);
    }
}
