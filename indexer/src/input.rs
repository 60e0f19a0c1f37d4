use anyhow::{Context, Result};
use recipe_core::RecipeRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `.json` / `.jsonl` files under `input` (or `input` itself), in a stable order.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn read_jsonl(file: &Path, out: &mut Vec<RecipeRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: RecipeRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid recipe", file.display(), n + 1))?;
        out.push(rec);
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<RecipeRecord>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                out.push(serde_json::from_value(v).with_context(|| format!("{}: invalid recipe", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            out.push(serde_json::from_value(json).with_context(|| format!("{}: invalid recipe", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "ignoring JSON that is neither an object nor an array"),
    }
    Ok(())
}

/// Read every recipe record found at `input`.
pub fn load_records(input: &Path) -> Result<Vec<RecipeRecord>> {
    let files = input_files(input);
    if files.is_empty() {
        anyhow::bail!("no .json or .jsonl input found at {}", input.display());
    }
    let mut records = Vec::new();
    for file in files {
        let before = records.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut records)?;
        } else {
            read_json(&file, &mut records)?;
        }
        tracing::info!(file = %file.display(), records = records.len() - before, "read input");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_arrays_objects_and_lines() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"id":"1","title":"Soup"},{"id":"2","title":"Pie"}]"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{"id":"3","title":"Tart","ingredients":["apple"]}"#).unwrap();
        fs::write(dir.path().join("c.jsonl"), "{\"id\":\"4\",\"title\":\"Stew\"}\n\n{\"title\":\"No id\"}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let recs = load_records(dir.path()).unwrap();
        let ids: Vec<Option<&str>> = recs.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("1"), Some("2"), Some("3"), Some("4"), None]);
        assert_eq!(recs[2].ingredients, vec!["apple"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_records(&dir.path().join("absent.json")).is_err());
    }
}
