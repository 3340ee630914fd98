//! Normalized code identity and the lookup record wire model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::error::ValidationError;

/// Number of digits in a normalized CEP.
pub const CEP_DIGITS: usize = 8;

/// Digit-only normalized CEP, guaranteed to hold exactly 8 ASCII digits.
///
/// This is the request type of every lookup transport. It can only be
/// obtained through [`Cep::from_token`], so a `Cep` in hand means the
/// malformed-input check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Normalizes a candidate token by stripping every non-digit character.
    ///
    /// Fails with [`ValidationError::MalformedCode`] when the digit-only
    /// form is not exactly 8 characters long. Callers must not issue a
    /// lookup for a token that fails normalization.
    pub fn from_token(token: &str) -> Result<Self, ValidationError> {
        let digits: String = token.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CEP_DIGITS {
            return Err(ValidationError::MalformedCode(token.to_string()));
        }
        Ok(Self(digits))
    }

    /// The digit-only form used to template lookup requests.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

/// Structured address attributes returned by the lookup service.
///
/// Every attribute is optional, a not-found reply carries nothing but the
/// error flag. Display layers use the `cep` echoed by the service rather
/// than the normalized request code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Code as formatted by the service (e.g. "01001-000").
    pub cep: Option<String>,
    /// Street name.
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    /// Neighborhood.
    pub bairro: Option<String>,
    /// City.
    pub localidade: Option<String>,
    /// Two-letter state code.
    pub uf: Option<String>,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    pub gia: Option<String>,
    /// Phone area code.
    pub ddd: Option<String>,
    pub siafi: Option<String>,
    /// Set by the service when the code does not exist.
    #[serde(default)]
    pub erro: bool,
}
