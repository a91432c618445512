use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error returned when an untyped wire record can't be turned into a typed value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("expected a JSON array")]
    NotAnArray,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
        #[serde(default)]
        pub description: Option<String>,
    }

    impl Category {
        pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
            serde_json::from_value(value.clone()).map_err(|err| DecodeError::InvalidField {
                field: "category",
                reason: err.to_string(),
            })
        }
    }

    pub fn categories_from_json(value: &Value) -> Result<Vec<Category>, DecodeError> {
        value
            .as_array()
            .ok_or(DecodeError::NotAnArray)?
            .iter()
            .map(Category::from_json)
            .collect()
    }
}

pub mod error {
    use super::*;

    /// Body sent by the backend with a `422 Unprocessable Entity`.
    ///
    /// The key is spelled `erros` on the wire.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ValidationErrors {
        #[serde(default)]
        pub erros: Vec<String>,
    }
}

pub mod entry {
    use super::category::Category;
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum EntryType {
        #[default]
        Expense,
        Revenue,
    }

    impl EntryType {
        pub const ALL: [EntryType; 2] = [EntryType::Expense, EntryType::Revenue];

        /// Returns the wire value.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Expense => "expense",
                Self::Revenue => "revenue",
            }
        }

        /// Returns the human readable label.
        pub fn label(self) -> &'static str {
            match self {
                Self::Expense => "Expense",
                Self::Revenue => "Revenue",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            Self::ALL.into_iter().find(|kind| kind.as_str() == value)
        }
    }

    /// A `{value, text}` pair for a choice control.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    pub struct TypeOption {
        pub value: &'static str,
        pub text: &'static str,
    }

    pub fn type_options() -> Vec<TypeOption> {
        EntryType::ALL
            .into_iter()
            .map(|kind| TypeOption {
                value: kind.as_str(),
                text: kind.label(),
            })
            .collect()
    }

    /// A single income or expense record.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Entry {
        /// `None` until the backend has persisted the entry.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        pub name: String,
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub entry_type: EntryType,
        /// Decimal amount, kept as text.
        pub amount: String,
        pub date: NaiveDate,
        pub paid: bool,
        pub category_id: i64,
        /// Filled in only after the category has been resolved.
        pub category: Option<Category>,
    }

    impl Entry {
        /// Builds an entry from an untyped wire record.
        ///
        /// `id`, `description` and `category` default to `None` when absent or
        /// `null`. Every other field is required.
        pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
            let record = value.as_object().ok_or(DecodeError::NotAnObject)?;

            let entry_type = match required(record, "type")? {
                Value::String(raw) => EntryType::parse(raw).ok_or_else(|| invalid("type", raw))?,
                other => return Err(invalid("type", other)),
            };

            let paid = required(record, "paid")?;
            let category = match optional(record, "category") {
                Some(value) => Some(Category::from_json(value)?),
                None => None,
            };

            Ok(Self {
                id: optional(record, "id").map(|v| integer("id", v)).transpose()?,
                name: string("name", required(record, "name")?)?,
                description: optional(record, "description")
                    .map(|v| string("description", v))
                    .transpose()?,
                entry_type,
                amount: amount(required(record, "amount")?)?,
                date: date(required(record, "date")?)?,
                paid: paid.as_bool().ok_or_else(|| invalid("paid", paid))?,
                category_id: integer("categoryId", required(record, "categoryId")?)?,
                category,
            })
        }
    }

    pub fn entries_from_json(value: &Value) -> Result<Vec<Entry>, DecodeError> {
        value
            .as_array()
            .ok_or(DecodeError::NotAnArray)?
            .iter()
            .map(Entry::from_json)
            .collect()
    }

    fn optional<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
        record.get(field).filter(|value| !value.is_null())
    }

    fn required<'a>(
        record: &'a Map<String, Value>,
        field: &'static str,
    ) -> Result<&'a Value, DecodeError> {
        optional(record, field).ok_or(DecodeError::MissingField(field))
    }

    fn invalid(field: &'static str, value: impl std::fmt::Display) -> DecodeError {
        DecodeError::InvalidField {
            field,
            reason: format!("unexpected value {value}"),
        }
    }

    fn string(field: &'static str, value: &Value) -> Result<String, DecodeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(field, value))
    }

    // Select controls tend to hand ids back as strings.
    fn integer(field: &'static str, value: &Value) -> Result<i64, DecodeError> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| invalid(field, value)),
            Value::String(raw) => raw.trim().parse().map_err(|_| invalid(field, value)),
            _ => Err(invalid(field, value)),
        }
    }

    fn amount(value: &Value) -> Result<String, DecodeError> {
        match value {
            Value::Number(n) => Ok(n.to_string()),
            Value::String(raw) if !raw.trim().is_empty() => Ok(raw.trim().to_string()),
            _ => Err(invalid("amount", value)),
        }
    }

    // Browsers serialize date pickers as RFC 3339 timestamps; only the date is kept.
    fn date(value: &Value) -> Result<NaiveDate, DecodeError> {
        let raw = value.as_str().ok_or_else(|| invalid("date", value))?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|d| d.date_naive()))
            .map_err(|_| invalid("date", value))
    }
}
