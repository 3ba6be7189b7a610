use crate::model::Park;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge la configuration du parc depuis un support.
    fn load(&self) -> anyhow::Result<Park>;
    /// Sauvegarde de manière atomique.
    fn save(&self, park: &Park) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parc vide tant que le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Park> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(Park::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Park> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let park: Park = serde_json::from_slice(&data)
            .with_context(|| format!("parsing park configuration {}", self.path.display()))?;
        Ok(park)
    }

    fn save(&self, park: &Park) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(park)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
