use std::str::FromStr;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Which side of a training pair receives the average of many splits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Strategy {
    /// Input: mean of all splits but one. Target: the held-out split. (`X:1`)
    ManyToOne,
    /// Input: a single split. Target: mean of all the others. (`1:X`)
    OneToMany,
}

impl Strategy {
    /// Number of splits averaged into the input, when there are `num_splits`
    /// splits in total
    pub fn input_size(self, num_splits: usize) -> usize {
        match self {
            Strategy::ManyToOne => num_splits - 1,
            Strategy::OneToMany => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ManyToOne => "many-to-one",
            Strategy::OneToMany => "one-to-many",
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "X:1" | "many-to-one" => Ok(Strategy::ManyToOne),
            "1:X" | "one-to-many" => Ok(Strategy::OneToMany),
            other => Err(Error::configuration(format!(
                "unrecognized strategy `{other}`: use `X:1` (many-to-one) or `1:X` (one-to-many)"
            ))),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
