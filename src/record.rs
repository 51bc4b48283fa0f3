//! The 13-field NWTA record
//!
//! Wire format: `NWTA|work|task|order|mu||address||||||I`

use crate::error::{Error, Result};
use std::fmt;

/// Number of fields in every record
pub const FIELD_COUNT: usize = 13;

/// Leading tag (field 1)
pub const RECORD_PREFIX: &str = "NWTA";

/// Trailing tag (field 13)
pub const RECORD_SUFFIX: &str = "I";

/// Field separator on the wire
pub const FIELD_SEPARATOR: char = '|';

/// An NWTA record with fixed field positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: [String; FIELD_COUNT],
}

/// Build a record from its variable parts.
pub fn build_record(
    task_code: &str,
    order_code: &str,
    mu_code: &str,
    address: &str,
    work_code: &str,
) -> Record {
    let fields = [
        RECORD_PREFIX.to_string(),
        work_code.to_string(),
        task_code.to_string(),
        order_code.to_string(),
        mu_code.to_string(),
        String::new(),
        address.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        RECORD_SUFFIX.to_string(),
    ];
    Record { fields }
}

impl Record {
    /// All fields in wire order
    pub fn fields(&self) -> &[String; FIELD_COUNT] {
        &self.fields
    }

    /// Work code (field 2)
    pub fn work_code(&self) -> &str {
        &self.fields[1]
    }

    /// Task code (field 3)
    pub fn task_code(&self) -> &str {
        &self.fields[2]
    }

    /// Order code (field 4)
    pub fn order_code(&self) -> &str {
        &self.fields[3]
    }

    /// MU code (field 5)
    pub fn mu_code(&self) -> &str {
        &self.fields[4]
    }

    /// Address (field 7)
    pub fn address(&self) -> &str {
        &self.fields[6]
    }

    /// Pipe-joined string that gets encoded into the QR symbol
    pub fn to_wire(&self) -> String {
        self.fields.join("|")
    }

    /// Parse a wire string back into a record.
    ///
    /// Requires exactly 13 fields with the `NWTA` and `I` tags in place.
    pub fn parse(wire: &str) -> Result<Self> {
        let parts: Vec<&str> = wire.split(FIELD_SEPARATOR).collect();
        if parts.len() != FIELD_COUNT {
            return Err(Error::InvalidRecord(format!(
                "expected {FIELD_COUNT} fields, found {}",
                parts.len()
            )));
        }
        if parts[0] != RECORD_PREFIX {
            return Err(Error::InvalidRecord(format!(
                "expected prefix '{RECORD_PREFIX}', found '{}'",
                parts[0]
            )));
        }
        if parts[FIELD_COUNT - 1] != RECORD_SUFFIX {
            return Err(Error::InvalidRecord(format!(
                "expected suffix '{RECORD_SUFFIX}', found '{}'",
                parts[FIELD_COUNT - 1]
            )));
        }

        let fields = std::array::from_fn(|i| parts[i].to_string());
        Ok(Self { fields })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}
