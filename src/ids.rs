//! Identifiers for events, periods and questions
//!
//! Every record referenced by the quiz control row is keyed by a UUID. Each
//! kind of record gets its own newtype so a period id can never be passed
//! where a question id is expected.

use std::{fmt::Display, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

macro_rules! ids {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug,
                Copy,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                DeserializeFromStr,
                SerializeDisplay,
            )]
            pub struct $name(Uuid);

            impl $name {
                /// Creates a new random identifier
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self(Uuid::from_str(s)?))
                }
            }
        )*
    };
}

ids!(
    /// Identifies a quiz event and its single control row
    EventId,
    /// Identifies a period within an event
    PeriodId,
    /// Identifies a question, independent of the periods it is attached to
    QuestionId,
);
