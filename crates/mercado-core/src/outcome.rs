//! Tagged result of an upstream fetch.

use serde::Serialize;

/// Result of a fetch that always carries a renderable value.
///
/// `Fallback` means a secondary source answered; `Unavailable` means nothing
/// did and `data` is the null-valued placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Primary(T),
    Fallback { data: T, cause: String },
    Unavailable { data: T, cause: String },
}

impl<T> Outcome<T> {
    pub fn data(&self) -> &T {
        match self {
            Self::Primary(data) | Self::Fallback { data, .. } | Self::Unavailable { data, .. } => {
                data
            }
        }
    }

    pub fn data_mut(&mut self) -> &mut T {
        match self {
            Self::Primary(data) | Self::Fallback { data, .. } | Self::Unavailable { data, .. } => {
                data
            }
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Self::Primary(data) | Self::Fallback { data, .. } | Self::Unavailable { data, .. } => {
                data
            }
        }
    }

    /// Failure description of the primary source, if it failed.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Primary(_) => None,
            Self::Fallback { cause, .. } | Self::Unavailable { cause, .. } => Some(cause),
        }
    }

    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Primary(_))
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Primary(data) => Outcome::Primary(f(data)),
            Self::Fallback { data, cause } => Outcome::Fallback {
                data: f(data),
                cause,
            },
            Self::Unavailable { data, cause } => Outcome::Unavailable {
                data: f(data),
                cause,
            },
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_variant_and_cause() {
        let outcome = Outcome::Fallback {
            data: 2,
            cause: String::from("primary timed out"),
        };
        let mapped = outcome.map(|value| value * 10);
        assert!(mapped.is_fallback());
        assert_eq!(*mapped.data(), 20);
        assert_eq!(mapped.cause(), Some("primary timed out"));
    }

    #[test]
    fn serializes_as_inner_data() {
        let outcome = Outcome::Unavailable {
            data: vec![1, 2],
            cause: String::from("down"),
        };
        assert_eq!(serde_json::to_string(&outcome).expect("json"), "[1,2]");
    }
}
