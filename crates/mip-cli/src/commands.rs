use std::path::Path;

use anyhow::Context;
use serde_json::json;
use tracing::debug;

use mip_core::{Applied, LabelApi};
use mip_exec::subprocess::{SUCCESS_STATUS, subprocess_api};
use mip_model::{LabelId, ReadMode, ReadOutcome};

use crate::{cli::Commands, config::AppConfig};

pub async fn run(command: Commands, json: bool, cfg: AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
            Ok(())
        }
        Commands::Read { path, full } => read(&connect(cfg)?, &path, full.into(), json).await,
        Commands::Apply { path, label_id } => {
            apply(&connect(cfg)?, &path, LabelId::new(label_id), json).await
        }
        Commands::Copy { source, target } => copy(&connect(cfg)?, &source, &target, json).await,
    }
}

fn connect(cfg: AppConfig) -> anyhow::Result<LabelApi> {
    let api = subprocess_api(cfg.shell).context("invalid shell configuration")?;
    debug!(backend = api.backend_name(), "label api ready");
    Ok(api)
}

async fn read(api: &LabelApi, path: &Path, mode: ReadMode, json: bool) -> anyhow::Result<()> {
    let outcome = api
        .read(path, mode)
        .await
        .with_context(|| format!("failed to read label of '{}'", path.display()))?;

    match outcome {
        ReadOutcome::Status(status) => println!("{}", status.to_json_pretty()?),
        ReadOutcome::LabelId(id) if json => {
            println!("{}", json!({ "path": path.display().to_string(), "label_id": id }));
        }
        ReadOutcome::LabelId(id) => println!("{id}"),
    }
    Ok(())
}

async fn apply(api: &LabelApi, path: &Path, id: LabelId, json: bool) -> anyhow::Result<()> {
    let applied = api
        .apply(path, &id)
        .await
        .with_context(|| format!("failed to apply label '{id}' to '{}'", path.display()))?;

    print_applied(path, &id, applied, json);
    Ok(())
}

async fn copy(api: &LabelApi, source: &Path, target: &Path, json: bool) -> anyhow::Result<()> {
    let (id, applied) = api.copy_label(source, target).await.with_context(|| {
        format!(
            "failed to copy label from '{}' to '{}'",
            source.display(),
            target.display()
        )
    })?;

    print_applied(target, &id, applied, json);
    Ok(())
}

fn print_applied(path: &Path, id: &LabelId, applied: Applied, json: bool) {
    if json {
        println!(
            "{}",
            json!({
                "path": path.display().to_string(),
                "label_id": id,
                "status": SUCCESS_STATUS,
                "elapsed_secs": applied.elapsed_secs(),
            })
        );
    } else {
        println!(
            "{SUCCESS_STATUS}: {id} -> {} ({:.3}s)",
            path.display(),
            applied.elapsed_secs()
        );
    }
}
