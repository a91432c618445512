use std::fmt;

const ENTRIES_SEGMENT: &str = "entries";
const NEW_SEGMENT: &str = "new";
const EDIT_SEGMENT: &str = "edit";

/// Whether the form creates a new entry or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    New,
    Edit,
}

/// Location of the entry form, relative to the `entries` section.
///
/// `/entries/new` has the single segment `new`; `/entries/7/edit` has `7` and
/// `edit`, with `7` as the `id` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    segments: Vec<String>,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        if segments.first().map(String::as_str) == Some(ENTRIES_SEGMENT) {
            segments.remove(0);
        }
        Self { segments }
    }

    pub fn new_entry() -> Self {
        Self {
            segments: vec![NEW_SEGMENT.to_string()],
        }
    }

    pub fn edit(id: i64) -> Self {
        Self {
            segments: vec![id.to_string(), EDIT_SEGMENT.to_string()],
        }
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Anything but a leading `new` is an edit.
    pub fn action(&self) -> Action {
        if self.first_segment() == Some(NEW_SEGMENT) {
            Action::New
        } else {
            Action::Edit
        }
    }

    /// The raw `id` path parameter of `:id/edit`.
    pub fn id_param(&self) -> Option<&str> {
        match self.action() {
            Action::New => None,
            Action::Edit => self.first_segment(),
        }
    }

    /// The numeric entry id, if the route carries a well-formed one.
    pub fn entry_id(&self) -> Option<i64> {
        self.id_param()?.parse().ok()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{ENTRIES_SEGMENT}")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
