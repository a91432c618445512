use std::fmt;

use api_types::entry::{Entry, EntryType};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Description,
    Type,
    Amount,
    Date,
    Paid,
    CategoryId,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Type => "type",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Paid => "paid",
            Self::CategoryId => "categoryId",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
}

/// Validation rules per field. `id` and `description` are unconstrained.
pub const SCHEMA: &[(Field, &[Rule])] = &[
    (Field::Id, &[]),
    (Field::Name, &[Rule::Required, Rule::MinLength(2)]),
    (Field::Description, &[]),
    (Field::Type, &[Rule::Required]),
    (Field::Amount, &[Rule::Required]),
    (Field::Date, &[Rule::Required]),
    (Field::Paid, &[Rule::Required]),
    (Field::CategoryId, &[Rule::Required]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "{} is required", self.field.as_str()),
            Rule::MinLength(min) => write!(
                f,
                "{} must be at least {min} characters",
                self.field.as_str()
            ),
        }
    }
}

/// Editable values of the entry form. `None` is an empty control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub entry_type: Option<EntryType>,
    pub amount: Option<String>,
    pub date: Option<NaiveDate>,
    pub paid: Option<bool>,
    pub category_id: Option<i64>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            entry_type: Some(EntryType::Expense),
            amount: None,
            date: None,
            paid: Some(true),
            category_id: None,
        }
    }
}

enum Control<'a> {
    Text(Option<&'a str>),
    Set(bool),
}

impl EntryForm {
    fn control(&self, field: Field) -> Control<'_> {
        match field {
            Field::Id => Control::Set(self.id.is_some()),
            Field::Name => Control::Text(self.name.as_deref()),
            Field::Description => Control::Text(self.description.as_deref()),
            Field::Type => Control::Set(self.entry_type.is_some()),
            Field::Amount => Control::Text(self.amount.as_deref()),
            Field::Date => Control::Set(self.date.is_some()),
            Field::Paid => Control::Set(self.paid.is_some()),
            Field::CategoryId => Control::Set(self.category_id.is_some()),
        }
    }

    /// Checks every control against [`SCHEMA`].
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for (field, rules) in SCHEMA {
            let control = self.control(*field);
            for rule in rules.iter() {
                let ok = match (rule, &control) {
                    (Rule::Required, Control::Text(value)) => value.is_some_and(|v| !v.is_empty()),
                    (Rule::Required, Control::Set(set)) => *set,
                    // Empty values are left to `Required`.
                    (Rule::MinLength(min), Control::Text(value)) => match value {
                        Some(v) if !v.is_empty() => v.chars().count() >= *min,
                        _ => true,
                    },
                    (Rule::MinLength(_), Control::Set(_)) => true,
                };
                if !ok {
                    errors.push(FieldError {
                        field: *field,
                        rule: *rule,
                    });
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copies every field of `entry` into the form.
    pub fn patch(&mut self, entry: &Entry) {
        self.id = entry.id;
        self.name = Some(entry.name.clone());
        self.description = entry.description.clone();
        self.entry_type = Some(entry.entry_type);
        self.amount = Some(entry.amount.clone());
        self.date = Some(entry.date);
        self.paid = Some(entry.paid);
        self.category_id = Some(entry.category_id);
    }

    /// Builds a fresh entry from the current values, without a category.
    pub fn to_entry(&self) -> Result<Entry, Vec<FieldError>> {
        self.validate()?;

        let missing = |field| vec![FieldError {
            field,
            rule: Rule::Required,
        }];
        Ok(Entry {
            id: self.id,
            name: self.name.clone().ok_or_else(|| missing(Field::Name))?,
            description: self.description.clone().filter(|d| !d.is_empty()),
            entry_type: self.entry_type.ok_or_else(|| missing(Field::Type))?,
            amount: self.amount.clone().ok_or_else(|| missing(Field::Amount))?,
            date: self.date.ok_or_else(|| missing(Field::Date))?,
            paid: self.paid.ok_or_else(|| missing(Field::Paid))?,
            category_id: self.category_id.ok_or_else(|| missing(Field::CategoryId))?,
            category: None,
        })
    }
}
