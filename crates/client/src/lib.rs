//! Entry form controller and entry persistence client for the ledger REST API.

pub mod categories;
pub mod client;
pub mod controller;
pub mod entries;
pub mod form;
pub mod notify;
pub mod route;

#[cfg(test)]
mod testing;

pub use categories::{CategoryLookup, CategoryService};
pub use client::{ClientError, HttpClient, Transport};
pub use controller::{EntryFormController, Phase, SubmitOutcome};
pub use entries::EntryService;
pub use form::{EntryForm, Field, FieldError, Rule};
pub use notify::{Navigator, Notifier};
pub use route::{Action, Route};

/// Entry service and category lookup sharing one HTTP client.
pub fn http_services(
    base_url: &str,
) -> Result<EntryService<HttpClient, CategoryService<HttpClient>>, ClientError> {
    let client = HttpClient::new(base_url)?;
    Ok(EntryService::new(client.clone(), CategoryService::new(client)))
}
