use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::currency::CurrencySet;
use crate::error::FeeError;
use crate::revision::{MatchError, FEE_REVISIONS};

/// A validated fee, denominated in a single supported currency.
///
/// The raw form is a mapping with exactly one key, the currency code, whose
/// value holds the fee fields:
///
/// ```json
/// {"BTC": {"amount": "0.5", "address": "1xyz"}}
/// ```
///
/// `amount` is normalized to a floating-point number on load.
#[derive(Debug, Clone, PartialEq)]
pub struct Fee {
    currency_symbol: String,
    fee_version: &'static str,
    amount: f64,
    address: String,
    fields: Map<String, Value>,
}

impl Fee {
    /// Validate a fee from an untyped value.
    pub fn from_value(raw: &Value, currencies: &CurrencySet) -> Result<Self, FeeError> {
        match raw {
            Value::Object(map) => Self::new(map, currencies),
            other => Err(FeeError::Malformed(format!(
                "expected a mapping, got {}",
                other
            ))),
        }
    }

    /// Validate a fee from its raw `{currency: {fields}}` mapping.
    pub fn new(raw: &Map<String, Value>, currencies: &CurrencySet) -> Result<Self, FeeError> {
        let mut entries = raw.iter();
        let (currency, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(FeeError::Malformed(format!(
                    "expected exactly one currency key, got {}",
                    raw.len()
                )))
            }
        };

        if !currencies.contains(currency) {
            return Err(FeeError::UnsupportedCurrency(currency.clone()));
        }

        let body = body.as_object().ok_or_else(|| {
            FeeError::Malformed(format!("fields for {} must be a mapping", currency))
        })?;

        let mut amount = None;
        let mut address = None;
        let matched = FEE_REVISIONS
            .match_fields_with(body, |field, value| match field {
                "amount" => {
                    let parsed = parse_amount(&value)?;
                    amount = Some(parsed);
                    Ok(Value::from(parsed))
                }
                "address" => match value {
                    Value::String(s) => {
                        address = Some(s.clone());
                        Ok(Value::String(s))
                    }
                    other => Err(FeeError::InvalidAddress(other.to_string())),
                },
                _ => Ok(value),
            })
            .map_err(|e| match e {
                MatchError::Claim(e) => e,
                MatchError::Leftover(fields) => FeeError::UnknownField(fields),
                MatchError::Unsatisfied {
                    missing,
                    unconsumed,
                } => FeeError::SchemaMismatch {
                    missing,
                    unconsumed,
                },
            })?;

        let amount = amount.ok_or_else(|| missing_field("amount", body))?;
        let address = address.ok_or_else(|| missing_field("address", body))?;

        tracing::debug!(
            currency = %currency,
            version = matched.revision,
            amount,
            "fee validated"
        );

        Ok(Self {
            currency_symbol: currency.clone(),
            fee_version: matched.revision,
            amount,
            address,
            fields: matched.fields,
        })
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn fee_version(&self) -> &'static str {
        self.fee_version
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The validated fee fields, without the currency wrapper.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The fee in raw form, with the normalized amount.
    pub fn to_value(&self) -> Value {
        let mut outer = Map::new();
        outer.insert(
            self.currency_symbol.clone(),
            Value::Object(self.fields.clone()),
        );
        Value::Object(outer)
    }
}

impl Serialize for Fee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Accept a JSON number or a string holding one.
fn parse_amount(value: &Value) -> Result<f64, FeeError> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.is_finite() => Ok(a),
        _ => {
            tracing::warn!(amount = %value, "failed to convert fee amount");
            Err(FeeError::InvalidAmount(value.to_string()))
        }
    }
}

fn missing_field(field: &str, body: &Map<String, Value>) -> FeeError {
    FeeError::SchemaMismatch {
        missing: vec![field.to_string()],
        unconsumed: body.keys().cloned().collect(),
    }
}
