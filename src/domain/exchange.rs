use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trading venue identifiers used by the host platform.
///
/// Only the venues the feed can serve are listed, plus `Local` — the host's
/// pseudo-venue for locally synthesized instruments (spreads), which no
/// vendor can answer queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exchange {
    /// Shanghai Stock Exchange
    Sse,
    /// Shenzhen Stock Exchange
    Szse,
    /// China Financial Futures Exchange
    Cffex,
    /// Shanghai Futures Exchange
    Shfe,
    /// Zhengzhou Commodity Exchange
    Czce,
    /// Dalian Commodity Exchange
    Dce,
    /// Shanghai International Energy Exchange
    Ine,
    /// Guangzhou Futures Exchange
    Gfex,
    /// Host-local pseudo-venue for synthesized instruments
    Local,
}

impl Exchange {
    /// Every variant, for exhaustive table checks.
    pub const ALL: [Exchange; 9] = [
        Exchange::Sse,
        Exchange::Szse,
        Exchange::Cffex,
        Exchange::Shfe,
        Exchange::Czce,
        Exchange::Dce,
        Exchange::Ine,
        Exchange::Gfex,
        Exchange::Local,
    ];

    /// The host's canonical code string (the `EXCHANGE` part of a
    /// composite symbol).
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Sse => "SSE",
            Exchange::Szse => "SZSE",
            Exchange::Cffex => "CFFEX",
            Exchange::Shfe => "SHFE",
            Exchange::Czce => "CZCE",
            Exchange::Dce => "DCE",
            Exchange::Ine => "INE",
            Exchange::Gfex => "GFEX",
            Exchange::Local => "LOCAL",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown exchange code '{0}'")]
pub struct UnknownExchange(pub String);

impl FromStr for Exchange {
    type Err = UnknownExchange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SSE" => Ok(Exchange::Sse),
            "SZSE" => Ok(Exchange::Szse),
            "CFFEX" => Ok(Exchange::Cffex),
            "SHFE" => Ok(Exchange::Shfe),
            "CZCE" => Ok(Exchange::Czce),
            "DCE" => Ok(Exchange::Dce),
            "INE" => Ok(Exchange::Ine),
            "GFEX" => Ok(Exchange::Gfex),
            "LOCAL" => Ok(Exchange::Local),
            other => Err(UnknownExchange(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip_for_every_variant() {
        for exchange in Exchange::ALL {
            let code = exchange.as_str();
            assert_eq!(code.parse::<Exchange>().unwrap(), exchange);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "NYSE".parse::<Exchange>().unwrap_err();
        assert_eq!(err, UnknownExchange("NYSE".to_string()));
        // Codes are case-sensitive
        assert!("sse".parse::<Exchange>().is_err());
    }

    #[test]
    fn serde_uses_host_codes() {
        let json = serde_json::to_string(&Exchange::Cffex).unwrap();
        assert_eq!(json, "\"CFFEX\"");
        let back: Exchange = serde_json::from_str("\"SHFE\"").unwrap();
        assert_eq!(back, Exchange::Shfe);
    }
}
