//! Import command handler.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::models::{ModelKind, NewGame};
use crate::services::ModelService;

use super::{connect, App};

impl App {
    /// Upsert every game record found at `path`.
    pub async fn run_import(&self, path: &Path) -> Result<()> {
        let batches = read_records(path)?;
        let total: usize = batches.iter().map(|(_, games)| games.len()).sum();
        tracing::info!("Read {} game records from {} file(s)", total, batches.len());

        let config = Config::load()?;
        let client = connect(&config).await?;
        let ctx = Context::new(client, config);
        let models = ModelService::from_ref(&ctx);

        for (file, games) in batches {
            for game in games {
                let name = game.content.name.clone();
                let created = models
                    .create_model(ModelKind::Game, game)
                    .await
                    .map_err(|e| eyre!("Failed to import '{}' from {}: {}", name, file.display(), e))?;
                tracing::debug!(name = %created.name, node_id = %created.node_id, "imported game");
            }
            tracing::info!("Imported {}", file.display());
        }

        tracing::info!("Import complete: {} games", total);
        Ok(())
    }
}

/// JSON files at `path`: the file itself, or every `*.json` file in the
/// directory in name order.
fn json_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).wrap_err_with(|| format!("Failed to read {}", path.display()))? {
        let file = entry?.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "json") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Game records per file. A file holds one record or an array of records.
fn read_records(path: &Path) -> Result<Vec<(PathBuf, Vec<NewGame>)>> {
    json_files(path)?
        .into_iter()
        .map(|file| {
            let text = fs::read_to_string(&file)
                .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
            let value: JsonValue = serde_json::from_str(&text)
                .wrap_err_with(|| format!("Invalid JSON in {}", file.display()))?;

            let records = match value {
                JsonValue::Array(records) => records,
                record => vec![record],
            };
            let games = records
                .into_iter()
                .map(serde_json::from_value::<NewGame>)
                .collect::<Result<Vec<_>, _>>()
                .wrap_err_with(|| format!("Invalid game record in {}", file.display()))?;
            Ok((file, games))
        })
        .collect()
}
