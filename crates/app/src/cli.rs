use api_types::entry::EntryType;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ledger_client::EntryForm;

#[derive(Debug, Parser)]
#[command(name = "ledger", disable_version_flag = true)]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override log level.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every entry.
    List,
    /// Show a single entry.
    Show { id: i64 },
    /// List the categories an entry can use.
    Categories,
    /// List the entry types.
    Types,
    /// Create an entry.
    New(EntryArgs),
    /// Edit an entry; omitted fields keep their stored value.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: EntryArgs,
    },
    /// Delete an entry.
    Delete { id: i64 },
}

#[derive(Debug, Default, Args)]
pub struct EntryArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// `expense` or `revenue`.
    #[arg(long = "type", value_parser = parse_entry_type)]
    pub entry_type: Option<EntryType>,
    #[arg(long)]
    pub amount: Option<String>,
    /// Date as YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub paid: Option<bool>,
    #[arg(long)]
    pub category_id: Option<i64>,
}

fn parse_entry_type(value: &str) -> Result<EntryType, String> {
    EntryType::parse(value).ok_or_else(|| format!("unknown entry type: {value}"))
}

impl EntryArgs {
    /// Overwrites the form controls that were given on the command line.
    pub fn apply(&self, form: &mut EntryForm) {
        if let Some(name) = &self.name {
            form.name = Some(name.clone());
        }
        if let Some(description) = &self.description {
            form.description = Some(description.clone());
        }
        if let Some(entry_type) = self.entry_type {
            form.entry_type = Some(entry_type);
        }
        if let Some(amount) = &self.amount {
            form.amount = Some(amount.clone());
        }
        if let Some(date) = self.date {
            form.date = Some(date);
        }
        if let Some(paid) = self.paid {
            form.paid = Some(paid);
        }
        if let Some(category_id) = self.category_id {
            form.category_id = Some(category_id);
        }
    }
}
