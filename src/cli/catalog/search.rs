use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::core::catalog::{CatalogIndex, Extension};
use crate::error::Result;
use crate::services::SimpleServices;
use crate::ui::Output;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query; lists every extension when omitted
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SearchEntry<'a> {
    uuid: &'a str,
    name: &'a str,
    creator: &'a str,
    link: &'a str,
    shell_versions: Vec<String>,
}

impl<'a> From<&'a Extension> for SearchEntry<'a> {
    fn from(extension: &'a Extension) -> Self {
        Self {
            uuid: &extension.uuid,
            name: &extension.name,
            creator: &extension.creator,
            link: &extension.link,
            shell_versions: extension.shell_versions(),
        }
    }
}

pub fn render_lines(index: &CatalogIndex, output: Output) -> Vec<String> {
    index
        .sorted_by_name()
        .into_iter()
        .map(|extension| output.short_info(extension))
        .collect()
}

pub fn render_json(index: &CatalogIndex) -> Result<String> {
    let entries: Vec<SearchEntry> = index.sorted_by_name().into_iter().map(SearchEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

pub async fn execute(args: SearchArgs, services: &SimpleServices) -> Result<()> {
    let client = services.create_catalog_client().await?;
    let query = args.query.unwrap_or_default();

    let spinner = ProgressUtils::create_search_spinner(ProgressMessages::searching(&query));
    let result = client.search(&query).await;
    spinner.finish_and_clear();
    let index = result?;

    if args.json {
        println!("{}", render_json(&index)?);
        return Ok(());
    }

    if index.is_empty() {
        info!("No extensions found for GNOME Shell {}", client.shell_version());
        println!("no extensions found");
        return Ok(());
    }

    for line in render_lines(&index, Output::detect()) {
        println!("{}", line);
    }

    Ok(())
}
