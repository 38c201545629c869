use std::str::FromStr;

use derive_more::Display;
use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::error::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookCover {
    #[display("HARD")]
    Hard,
    #[display("SOFT")]
    Soft,
}

impl FromStr for BookCover {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HARD" => Ok(Self::Hard),
            "SOFT" => Ok(Self::Soft),
            unknown => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown cover kind: {unknown}"))),
        }
    }
}
