use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
}

impl Version {
    pub const fn new(major: usize, minor: usize, patch: usize) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Documents parsed by two versions with the same major share a markup shape
    pub fn is_compatible(&self, other: &Version) -> bool {
        self.major == other.major
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s.split('.').collect::<Vec<&str>>();
        match split.as_slice() {
            [major, minor, patch] => Ok(Version {
                major: major.parse().map_err(|_| Error::InvalidVersion)?,
                minor: minor.parse().map_err(|_| Error::InvalidVersion)?,
                patch: patch.parse().map_err(|_| Error::InvalidVersion)?,
            }),
            _ => Err(Error::InvalidVersion),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}.{}.{}", self.major, self.minor, self.patch))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_version() {
        let version: Version = "1.2.3".parse().unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_invalid_version() {
        assert_eq!("1.2".parse::<Version>(), Err(Error::InvalidVersion));
        assert_eq!("1.x.3".parse::<Version>(), Err(Error::InvalidVersion));
    }

    #[test]
    fn test_compatible_version() {
        let v1 = Version::new(1, 0, 0);
        assert!(v1.is_compatible(&Version::new(1, 4, 2)));
        assert!(!v1.is_compatible(&Version::new(2, 0, 0)));
    }
}
