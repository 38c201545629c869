use std::fmt::{Display, Formatter};
use std::str::FromStr;

use derive_more::{AsRef, From, Into};
use error_stack::Report;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KernelError;

/// Fee per borrowed day, held in minor units of the currency.
#[derive(Debug, Clone, Eq, PartialEq, Hash, From, Into, AsRef)]
pub struct DailyFee(i64);

impl DailyFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }
}

impl Display for DailyFee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for DailyFee {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            Report::new(KernelError::Internal)
                .attach_printable(format!("invalid fee literal: {s}"))
        };
        let (units, cents) = match s.split_once('.') {
            None => (s, 0),
            Some((units, fraction)) => {
                let cents = match fraction.len() {
                    1 | 2 if fraction.bytes().all(|b| b.is_ascii_digit()) => {
                        let raw = fraction.parse::<i64>().map_err(|_| invalid())?;
                        if fraction.len() == 1 {
                            raw * 10
                        } else {
                            raw
                        }
                    }
                    _ => return Err(invalid()),
                };
                (units, cents)
            }
        };
        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let units = units.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self(units * 100 + cents))
    }
}

impl Serialize for DailyFee {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DailyFee {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<DailyFee>()
            .map_err(|report| D::Error::custom(format!("{report}")))
    }
}
