//! Form input and validation

use crate::catalog::selection_code;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Raw values as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputForm {
    /// Selection string (`"code - description"`) or a bare task code
    pub task_selection: String,
    /// Order code
    pub order_code: String,
    /// MU code
    pub mu_code: String,
    /// Address
    pub address: String,
}

impl InputForm {
    /// Convenience constructor
    pub fn new(
        task_selection: impl Into<String>,
        order_code: impl Into<String>,
        mu_code: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            task_selection: task_selection.into(),
            order_code: order_code.into(),
            mu_code: mu_code.into(),
            address: address.into(),
        }
    }
}

/// Form that passed validation; every value is trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    /// Task code taken from the selection
    pub task_code: String,
    /// Order code
    pub order_code: String,
    /// MU code
    pub mu_code: String,
    /// Address
    pub address: String,
}

/// Check that a task is selected and the three free-text fields are filled.
///
/// Nothing else about the values is checked.
pub fn validate(form: &InputForm) -> Result<ValidForm> {
    let selection = form.task_selection.trim();
    if selection.is_empty() {
        return Err(Error::MissingSelection);
    }

    let order_code = form.order_code.trim();
    let mu_code = form.mu_code.trim();
    let address = form.address.trim();

    let missing: Vec<&'static str> = [
        ("order code", order_code),
        ("MU code", mu_code),
        ("address", address),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(Error::MissingField { fields: missing });
    }

    Ok(ValidForm {
        task_code: selection_code(selection).to_string(),
        order_code: order_code.to_string(),
        mu_code: mu_code.to_string(),
        address: address.to_string(),
    })
}
