use serde::{Deserialize, Serialize};

/// Stable integer identifier of a region (a prefecture code on the wire).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RegionCode(pub u32);

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RegionCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(RegionCode)
    }
}

#[cfg(test)]
mod tests {
    use super::RegionCode;

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&RegionCode(13)).unwrap();
        assert_eq!(json, "13");
        let back: RegionCode = serde_json::from_str("47").unwrap();
        assert_eq!(back, RegionCode(47));
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 1 ".parse::<RegionCode>().unwrap(), RegionCode(1));
        assert!("tokyo".parse::<RegionCode>().is_err());
        assert!("-3".parse::<RegionCode>().is_err());
    }
}
