use crate::error::Result;
use crate::models::Document;
use crate::utils;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a pretty-printed export. A directory target gets a
/// `nexus-export-<unix-millis>.json` file inside it.
pub fn write_export(doc: &Document, target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(export_file_name())
    } else {
        target.to_path_buf()
    };
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(&path, json)?;
    Ok(path)
}

pub fn export_file_name() -> String {
    format!("nexus-export-{}.json", utils::now_millis())
}

/// Read an import file as an untyped payload; shape checks happen on the receiving side
pub fn read_import(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
