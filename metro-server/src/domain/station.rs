//! Station and line name types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest name accepted for a station or line.
pub const MAX_NAME_LEN: usize = 100;

/// Error returned when parsing an invalid station or line name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid name: {reason}")]
pub struct InvalidName {
    reason: &'static str,
}

fn validate(s: &str) -> Result<String, InvalidName> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(InvalidName {
            reason: "must not be empty",
        });
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(InvalidName {
            reason: "must be at most 100 characters",
        });
    }

    Ok(trimmed.to_string())
}

/// Declares a validated name newtype with string-like conversions.
macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Parse a ", $what, " name, trimming surrounding whitespace.")]
            pub fn parse(s: &str) -> Result<Self, InvalidName> {
                validate(s).map($name)
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidName;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_type! {
    /// The name of a station, unique across the whole network.
    ///
    /// Names are trimmed and must be non-empty. The same name appearing on
    /// several lines is how an interchange is represented, so two physically
    /// distinct stations must never share one.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_server::domain::StationName;
    ///
    /// let ameerpet = StationName::parse("  Ameerpet ").unwrap();
    /// assert_eq!(ameerpet.as_str(), "Ameerpet");
    ///
    /// assert!(StationName::parse("").is_err());
    /// assert!(StationName::parse("   ").is_err());
    /// ```
    StationName, "station"
}

name_type! {
    /// The display name of a transit line (e.g. "Red Line").
    LineName, "line"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert!(StationName::parse("Ameerpet").is_ok());
        assert!(StationName::parse("Jubilee Hills Road No. 5").is_ok());
        assert!(StationName::parse("Lakdi-Ka-Pul").is_ok());
        assert!(LineName::parse("Red Line").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let name = StationName::parse("  Nampally\t").unwrap();
        assert_eq!(name.as_str(), "Nampally");
    }

    #[test]
    fn reject_empty() {
        assert!(StationName::parse("").is_err());
        assert!(StationName::parse(" \n ").is_err());
        assert!(LineName::parse("").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(StationName::parse(&long).is_err());
        assert!(StationName::parse(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn error_display() {
        let err = StationName::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid name: must not be empty");
    }

    #[test]
    fn display_and_debug() {
        let name = StationName::parse("Uppal").unwrap();
        assert_eq!(format!("{name}"), "Uppal");
        assert_eq!(format!("{name:?}"), "StationName(Uppal)");

        let line = LineName::parse("Blue Line").unwrap();
        assert_eq!(format!("{line:?}"), "LineName(Blue Line)");
    }

    #[test]
    fn line_name_conversions() {
        let line = LineName::try_from("  Green Line ".to_string()).unwrap();
        assert_eq!(line.as_str(), "Green Line");
        assert_eq!(String::from(line.clone()), "Green Line");
        assert_eq!(line.to_string(), "Green Line");
        assert!(LineName::parse(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(serde_json::from_str::<LineName>("\" \"").is_err());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StationName::parse("Paradise").unwrap());
        assert!(set.contains("Paradise"));
        assert!(!set.contains("Begumpet"));
    }

    #[test]
    fn serde_roundtrip_validates() {
        let name: StationName = serde_json::from_str("\"Stadium\"").unwrap();
        assert_eq!(name.as_str(), "Stadium");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Stadium\"");

        assert!(serde_json::from_str::<StationName>("\"\"").is_err());
    }
}
