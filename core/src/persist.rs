use crate::catalog::RecipeCatalog;
use crate::error::{Error, Result};
use crate::handle::Snapshot;
use crate::index::IndexArtifact;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

pub const FORMAT_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
    /// Written into both blobs too; all three must agree for a load to succeed.
    pub build_stamp: u64,
}

static SAVES: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos() as u64;
    nanos ^ SAVES.fetch_add(1, Ordering::Relaxed).rotate_right(16)
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn artifact(&self) -> PathBuf { self.root.join("artifact.bin") }
    fn recipes(&self) -> PathBuf { self.root.join("recipes.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut f = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ArtifactUnavailable(format!("{} not found", path.display())),
        _ => Error::Io(e),
    })?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(buf)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    // write aside then rename so a reader never sees a half-written file
    let tmp = path.with_extension("tmp");
    let mut f = File::create(&tmp)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn corrupt(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Corrupt(format!("{}: {e}", path.display()))
}

pub fn save_snapshot(paths: &IndexPaths, snapshot: &Snapshot) -> Result<()> {
    create_dir_all(&paths.root)?;
    // an index without meta.json is unavailable, so drop it before touching the blobs
    match std::fs::remove_file(paths.meta()) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(Error::Io(e)),
        _ => {}
    }
    let build_stamp = next_stamp();
    let artifact = bincode::serialize(&(build_stamp, &snapshot.artifact)).map_err(|e| corrupt(&paths.artifact(), e))?;
    write_bytes(&paths.artifact(), &artifact)?;
    let recipes = bincode::serialize(&(build_stamp, &snapshot.catalog)).map_err(|e| corrupt(&paths.recipes(), e))?;
    write_bytes(&paths.recipes(), &recipes)?;

    let meta = MetaFile {
        num_docs: snapshot.artifact.num_docs() as u32,
        num_terms: snapshot.artifact.vocabulary().len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: FORMAT_VERSION,
        build_stamp,
    };
    let json = serde_json::to_string_pretty(&meta).map_err(|e| corrupt(&paths.meta(), e))?;
    write_bytes(&paths.meta(), json.as_bytes())?;
    tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, build_stamp, "saved index");
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let buf = read_bytes(&paths.meta())?;
    let meta: MetaFile = serde_json::from_slice(&buf).map_err(|e| corrupt(&paths.meta(), e))?;
    if meta.version != FORMAT_VERSION {
        return Err(corrupt(&paths.meta(), format!("unsupported version {}", meta.version)));
    }
    Ok(meta)
}

/// Load a snapshot written by [`save_snapshot`]. Missing files are `ArtifactUnavailable`;
/// blobs from different saves, or blobs that disagree with each other, are `Corrupt`.
pub fn load_snapshot(paths: &IndexPaths) -> Result<Snapshot> {
    let meta = load_meta(paths)?;
    let (artifact_stamp, artifact): (u64, IndexArtifact) =
        bincode::deserialize(&read_bytes(&paths.artifact())?).map_err(|e| corrupt(&paths.artifact(), e))?;
    let (recipes_stamp, catalog): (u64, RecipeCatalog) =
        bincode::deserialize(&read_bytes(&paths.recipes())?).map_err(|e| corrupt(&paths.recipes(), e))?;
    if artifact_stamp != meta.build_stamp {
        return Err(corrupt(&paths.artifact(), "written by a different save than meta.json"));
    }
    if recipes_stamp != meta.build_stamp {
        return Err(corrupt(&paths.recipes(), "written by a different save than meta.json"));
    }
    artifact.validate().map_err(|e| corrupt(&paths.artifact(), e))?;
    catalog.validate().map_err(|e| corrupt(&paths.recipes(), e))?;
    if artifact.num_docs() != meta.num_docs as usize || catalog.len() != artifact.num_docs() {
        return Err(corrupt(&paths.root, "document counts disagree between meta, artifact and recipes"));
    }
    if let Some((id, _)) = artifact.doc_ids().zip(catalog.iter()).find(|(id, r)| *id != r.id) {
        return Err(corrupt(&paths.root, format!("indexed document {id:?} is not at the same position in the catalog")));
    }
    tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, created_at = %meta.created_at, "loaded index");
    Ok(Snapshot::new(artifact, catalog))
}
