use std::path::PathBuf;

use clap::Subcommand;
use learnpath_core::{CourseCatalog, PriceFilter};

#[derive(Subcommand)]
pub enum CourseAction {
    /// List courses as JSON, optionally filtered
    List {
        /// Price filter: all, free or paid
        #[arg(long, default_value_t = PriceFilter::All)]
        price: PriceFilter,
        /// Exact category name; "all" keeps every category
        #[arg(long)]
        category: Option<String>,
        /// Course catalog JSON to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List the distinct course categories
    Categories {
        /// Course catalog JSON to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(action: CourseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CourseAction::List {
            price,
            category,
            catalog,
        } => {
            let catalog = load_catalog(catalog)?;
            let category = category.as_deref().filter(|c| *c != "all");
            let courses = catalog.filter(price, category);
            tracing::debug!(%price, ?category, matched = courses.len(), "course filter applied");
            println!("{}", serde_json::to_string_pretty(&courses)?);
        }
        CourseAction::Categories { catalog } => {
            let catalog = load_catalog(catalog)?;
            println!("{}", serde_json::to_string_pretty(&catalog.categories())?);
        }
    }
    Ok(())
}

fn load_catalog(path: Option<PathBuf>) -> Result<CourseCatalog, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CourseCatalog::load(&path)?),
        None => Ok(CourseCatalog::sample()),
    }
}
