use api_types::{category::Category, entry::Entry};
use ledger_client::{Navigator, Notifier};

/// Notifications written to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }

    fn alert(&self, message: &str) {
        eprintln!("!! {message}");
    }
}

/// There is no browser history on the command line; locations are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(%path, "location changed");
    }
}

pub fn print_entry(entry: &Entry) {
    let id = entry.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let status = if entry.paid { "paid" } else { "pending" };
    let category = entry
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("");
    println!(
        "{id:>5}  {date}  {kind:<7}  {amount:>10}  {status:<7}  {name}  [{category_id}{sep}{category}]",
        date = entry.date,
        kind = entry.entry_type.label(),
        amount = entry.amount,
        name = entry.name,
        category_id = entry.category_id,
        sep = if category.is_empty() { "" } else { " " },
    );
    if let Some(description) = entry.description.as_deref() {
        println!("       {description}");
    }
}

pub fn print_category(category: &Category) {
    match category.description.as_deref() {
        Some(description) => println!("{:>5}  {}  ({description})", category.id, category.name),
        None => println!("{:>5}  {}", category.id, category.name),
    }
}
