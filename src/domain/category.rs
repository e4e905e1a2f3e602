use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of number series served by the upstream source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Prime,
    Fibonacci,
    Even,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number id '{0}', expected one of p, f, e, r")]
pub struct InvalidCategory(pub String);

impl Category {
    pub const ALL: [Category; 4] = [Self::Prime, Self::Fibonacci, Self::Even, Self::Random];

    /// Single-character token accepted on the inbound route
    pub fn id(&self) -> &'static str {
        match self {
            Self::Prime => "p",
            Self::Fibonacci => "f",
            Self::Even => "e",
            Self::Random => "r",
        }
    }

    /// Path segment used by the upstream service
    pub fn upstream_path(&self) -> &'static str {
        match self {
            Self::Prime => "primes",
            Self::Fibonacci => "fibo",
            Self::Even => "even",
            Self::Random => "rand",
        }
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.upstream_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!("p".parse::<Category>().unwrap(), Category::Prime);
        assert_eq!("f".parse::<Category>().unwrap(), Category::Fibonacci);
        assert_eq!("e".parse::<Category>().unwrap(), Category::Even);
        assert_eq!("r".parse::<Category>().unwrap(), Category::Random);
    }

    #[test]
    fn test_reject_unknown_ids() {
        for id in ["", "x", "P", "primes", "pp"] {
            let err = id.parse::<Category>().unwrap_err();
            assert_eq!(err, InvalidCategory(id.to_string()));
        }
    }

    #[test]
    fn test_upstream_paths() {
        let paths: Vec<_> = Category::ALL.iter().map(|c| c.upstream_path()).collect();
        assert_eq!(paths, vec!["primes", "fibo", "even", "rand"]);
    }
}
