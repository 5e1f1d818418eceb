#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use catalog_store::{CatalogStore, CollectionName, Generated, Record, config, read_entries};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A journal path inside a directory that is removed when dropped.
pub struct TempStore {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn temp_store() -> Result<TempStore> {
    let dir = TempDir::new().context("failed to allocate temp dir")?;
    let path = dir.path().join("db.ndjson");
    Ok(TempStore { _dir: dir, path })
}

pub fn seeded_store(path: &Path) -> Result<CatalogStore> {
    let mut store = CatalogStore::open(path)?;
    catalog_store::seed_defaults(&mut store)?;
    Ok(store)
}

/// Raw records for `collection` exactly as written to the journal.
pub fn raw_records(path: &Path, collection: CollectionName) -> Result<Vec<Value>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let entries = read_entries(BufReader::new(file), path)?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.collection == collection)
        .map(|entry| entry.record)
        .collect())
}

pub fn names<R: Record>(items: &[Generated<R>]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.record.name().map(str::to_string))
        .collect()
}

/// A `catalog` invocation with the store-related environment cleared.
pub fn catalog_command(store: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_catalog"));
    cmd.env_remove(config::STORE_PATH_ENV)
        .env_remove(config::SKIP_SEED_ENV)
        .env("RUST_LOG", "warn")
        .arg("--store")
        .arg(store);
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    let text = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(text.trim()).with_context(|| format!("stdout was not JSON: {text}"))
}
