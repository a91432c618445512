use api_types::entry::type_options;
use clap::Parser;
use ledger_client::{
    Action, CategoryLookup, CategoryService, EntryFormController, EntryService, HttpClient, Route,
    SubmitOutcome,
};

use crate::{
    cli::{Cli, Command, EntryArgs},
    console::{ConsoleNavigator, ConsoleNotifier},
    error::{AppError, Result},
};

mod cli;
mod config;
mod console;
mod error;

type Service = EntryService<HttpClient, CategoryService<HttpClient>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger={level},ledger_client={level}",
            level = settings.level
        ))
        .init();

    let service = ledger_client::http_services(&settings.base_url)?;
    tracing::debug!(base_url = %settings.base_url, "using backend");

    match cli.command {
        Command::List => {
            for entry in service.get_all().await? {
                console::print_entry(&entry);
            }
        }
        Command::Show { id } => console::print_entry(&service.get_by_id(id).await?),
        Command::Categories => {
            for category in service.categories().get_all().await? {
                console::print_category(&category);
            }
        }
        Command::Types => {
            for option in type_options() {
                println!("{:<8} {}", option.value, option.text);
            }
        }
        Command::New(fields) => run_form(service, Route::new_entry(), &fields).await?,
        Command::Edit { id, fields } => run_form(service, Route::edit(id), &fields).await?,
        Command::Delete { id } => {
            service.delete(id).await?;
            println!("deleted entry {id}");
        }
    }

    Ok(())
}

async fn run_form(service: Service, route: Route, fields: &EntryArgs) -> Result<()> {
    let mut form = EntryFormController::new(service, ConsoleNotifier, ConsoleNavigator);
    form.initialize(route).await;
    if form.current_action() == Action::Edit && form.entry().is_none() {
        return Err(AppError::NotSaved);
    }

    fields.apply(form.form_mut());

    match form.submit().await {
        SubmitOutcome::Saved(entry) => {
            console::print_entry(&entry);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => Err(AppError::Invalid(errors)),
        SubmitOutcome::Failed(err) => {
            tracing::debug!("submit failed: {err}");
            for message in form.server_error_messages().unwrap_or_default() {
                eprintln!("  - {message}");
            }
            Err(AppError::NotSaved)
        }
    }
}
