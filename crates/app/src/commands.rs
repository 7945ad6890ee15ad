use std::{fs, io::Write, path::PathBuf};

use clap::{Args, Subcommand};
use engine::{Engine, IncomingItem, Recipe, ShoppingList};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::Result, store::ListStore};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add one item, merging it into a matching open entry when possible.
    Add(AddArgs),
    /// Add every ingredient of a recipe read from a JSON file.
    AddRecipe {
        path: PathBuf,
    },
    /// Print the list.
    List,
    /// Mark an entry as bought.
    Check {
        id: Uuid,
    },
    /// Mark an entry as still to buy.
    Uncheck {
        id: Uuid,
    },
    Remove {
        id: Uuid,
    },
    /// Remove every bought entry.
    ClearCompleted,
    /// Write the list as CSV to stdout.
    Export,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub name: String,
    #[arg(short, long, default_value_t = 1.0)]
    pub quantity: f64,
    #[arg(short, long, default_value = "")]
    pub unit: String,
    /// Skip the keyword classifier and use this category.
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: String,
    name: &'a str,
    quantity: Option<&'a str>,
    category: &'a str,
    completed: bool,
    provenance: Option<&'a str>,
}

pub fn run(
    command: Command,
    engine: &Engine,
    store: &impl ListStore,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add(args) => {
            let mut item = IncomingItem::new(args.name, args.quantity, args.unit);
            if let Some(category) = args.category {
                item = item.with_category(category);
            }
            let list = engine.reconcile_list(&store.load()?, &[item]);
            store.save(&list)?;
            writeln!(out, "{} entries", list.len())?;
        }
        Command::AddRecipe { path } => {
            let recipe: Recipe = serde_json::from_str(&fs::read_to_string(&path)?)?;
            tracing::info!(
                "adding {} ingredients from '{}'",
                recipe.ingredients.len(),
                recipe.name
            );
            let list = store.load()?;
            let list: ShoppingList = engine.add_recipe(list.entries(), &recipe).into();
            store.save(&list)?;
            writeln!(out, "{} entries", list.len())?;
        }
        Command::List => {
            for entry in store.load()?.entries() {
                writeln!(out, "{}  {entry}", entry.id)?;
            }
        }
        Command::Check { id } => {
            let mut list = store.load()?;
            list.set_completed(id, true)?;
            store.save(&list)?;
        }
        Command::Uncheck { id } => {
            let mut list = store.load()?;
            list.set_completed(id, false)?;
            store.save(&list)?;
        }
        Command::Remove { id } => {
            let mut list = store.load()?;
            let removed = list.remove(id)?;
            store.save(&list)?;
            writeln!(out, "removed {}", removed.name)?;
        }
        Command::ClearCompleted => {
            let mut list = store.load()?;
            let removed = list.clear_completed();
            store.save(&list)?;
            writeln!(out, "removed {removed} entries")?;
        }
        Command::Export => {
            let list = store.load()?;
            let mut writer = csv::Writer::from_writer(out);
            for entry in list.entries() {
                writer.serialize(ExportRow {
                    id: entry.id.to_string(),
                    name: &entry.name,
                    quantity: entry.quantity.as_deref(),
                    category: &entry.category,
                    completed: entry.completed,
                    provenance: entry.provenance.as_deref(),
                })?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
