use api_types::{
    category::Category,
    entry::{Entry, TypeOption, type_options},
    error::ValidationErrors,
};
use reqwest::StatusCode;

use crate::{
    categories::CategoryLookup,
    client::{ClientError, Transport},
    entries::EntryService,
    form::{EntryForm, FieldError},
    notify::{Navigator, Notifier},
    route::{Action, Route},
};

pub const LOAD_FAILED_MESSAGE: &str = "A server error occurred, please try again later.";
pub const SAVED_MESSAGE: &str = "Request processed successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while processing your request!";
pub const UNREACHABLE_MESSAGE: &str =
    "Failed to communicate with the server. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Editing,
    Submitting,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rejected locally, nothing was sent.
    Invalid(Vec<FieldError>),
    Saved(Entry),
    Failed(ClientError),
}

/// Drives the entry form: mode selection, loading, validation and submit.
pub struct EntryFormController<T, C, N, V> {
    service: EntryService<T, C>,
    notifier: N,
    navigator: V,
    route: Route,
    phase: Phase,
    current_action: Action,
    page_title: String,
    server_error_messages: Option<Vec<String>>,
    submitting_form: bool,
    entry: Option<Entry>,
    categories: Vec<Category>,
    form: EntryForm,
}

impl<T, C, N, V> EntryFormController<T, C, N, V>
where
    T: Transport + Sync,
    C: CategoryLookup + Sync,
    N: Notifier,
    V: Navigator,
{
    pub fn new(service: EntryService<T, C>, notifier: N, navigator: V) -> Self {
        Self {
            service,
            notifier,
            navigator,
            route: Route::new_entry(),
            phase: Phase::Uninitialized,
            current_action: Action::New,
            page_title: String::new(),
            server_error_messages: None,
            submitting_form: false,
            entry: None,
            categories: Vec::new(),
            form: EntryForm::default(),
        }
    }

    /// Starts a fresh form session for `route`.
    pub async fn initialize(&mut self, route: Route) {
        self.phase = Phase::Loading;
        self.current_action = route.action();
        self.route = route;
        self.form = EntryForm::default();
        self.entry = None;
        self.server_error_messages = None;
        self.submitting_form = false;

        self.load_entry().await;
        self.load_categories().await;
        self.set_page_title();
        self.phase = Phase::Editing;
    }

    /// Moves the session onto the saved entry: one history record, fresh state.
    pub async fn reinitialize_for(&mut self, id: i64) {
        let route = Route::edit(id);
        self.navigator.navigate(&route.to_string());
        self.initialize(route).await;
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let entry = match self.form.to_entry() {
            Ok(entry) => entry,
            Err(errors) => {
                tracing::debug!(?errors, "form rejected");
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.server_error_messages = None;
        self.submitting_form = true;
        self.phase = Phase::Submitting;

        let result = match self.current_action {
            Action::New => self.service.create(entry).await,
            Action::Edit => self.service.update(entry).await,
        };

        match result {
            Ok(entry) => self.actions_for_success(entry).await,
            Err(err) => self.actions_for_error(err),
        }
    }

    pub fn type_options(&self) -> Vec<TypeOption> {
        type_options()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_action(&self) -> Action {
        self.current_action
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn server_error_messages(&self) -> Option<&[String]> {
        self.server_error_messages.as_deref()
    }

    pub fn submitting_form(&self) -> bool {
        self.submitting_form
    }

    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    async fn load_entry(&mut self) {
        if self.current_action != Action::Edit {
            return;
        }

        let Some(id) = self.route.entry_id() else {
            tracing::warn!(route = %self.route, "route has no numeric entry id");
            self.notifier.alert(LOAD_FAILED_MESSAGE);
            return;
        };

        match self.service.get_by_id(id).await {
            Ok(entry) => {
                self.form.patch(&entry);
                self.entry = Some(entry);
            }
            Err(_) => self.notifier.alert(LOAD_FAILED_MESSAGE),
        }
    }

    async fn load_categories(&mut self) {
        match self.service.categories().get_all().await {
            Ok(categories) => self.categories = categories,
            Err(_) => {
                self.categories.clear();
                self.notifier.alert(LOAD_FAILED_MESSAGE);
            }
        }
    }

    fn set_page_title(&mut self) {
        self.page_title = match self.current_action {
            Action::New => "New entry".to_string(),
            Action::Edit => {
                let name = self.entry.as_ref().map(|e| e.name.as_str()).unwrap_or("");
                format!("Editing entry: {name}")
            }
        };
    }

    async fn actions_for_success(&mut self, entry: Entry) -> SubmitOutcome {
        self.notifier.success(SAVED_MESSAGE);

        match entry.id {
            Some(id) => self.reinitialize_for(id).await,
            None => {
                tracing::warn!(name = %entry.name, "saved entry has no id, staying on the form");
                self.submitting_form = false;
                self.phase = Phase::Editing;
            }
        }
        SubmitOutcome::Saved(entry)
    }

    fn actions_for_error(&mut self, err: ClientError) -> SubmitOutcome {
        self.notifier.error(SAVE_FAILED_MESSAGE);
        self.submitting_form = false;
        self.phase = Phase::Editing;
        self.server_error_messages = Some(server_error_messages(&err));
        SubmitOutcome::Failed(err)
    }
}

/// Messages to show inline for a failed write.
///
/// A 422 carries its own list under `erros`; everything else collapses to one
/// generic message.
pub fn server_error_messages(err: &ClientError) -> Vec<String> {
    if err.status() == Some(StatusCode::UNPROCESSABLE_ENTITY) {
        let parsed = err
            .body()
            .and_then(|body| serde_json::from_str::<ValidationErrors>(body).ok());
        if let Some(body) = parsed {
            return body.erros;
        }
        tracing::warn!("unreadable 422 body");
    }
    vec![UNREACHABLE_MESSAGE.to_string()]
}
