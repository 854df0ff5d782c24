use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::classifier::ClassifierBundle;

const ARTIFACT_FILENAME: &str = "model.json";
const CHECKSUM_FILENAME: &str = "model.json.sha256";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    #[error("Bundle was not loaded from an artifact and cannot be reloaded")]
    NotReloadable,
}

/// Reads and writes the persisted classifier bundle.
///
/// The bundle lives at `<dir>/model.json` with its SHA-256 digest next to it.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store in the default artifact directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_dir())
    }

    /// Returns the default artifact directory path
    pub fn get_default_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("DRUGWATCH_HOME") {
            return PathBuf::from(path).join("models");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("drugwatch").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("drugwatch").join("models");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("drugwatch").join("models")
    }

    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.dir.join(ARTIFACT_FILENAME)
    }

    pub fn checksum_path(&self) -> PathBuf {
        self.dir.join(CHECKSUM_FILENAME)
    }

    pub fn exists(&self) -> bool {
        let path = self.artifact_path();
        log::debug!("Checking for artifact at {:?} (exists: {})", path, path.exists());
        path.exists()
    }

    /// Serializes `bundle` and records its digest.
    ///
    /// Both files are staged next to their targets and renamed into place, so
    /// readers never see a partially written artifact.
    pub fn save(&self, bundle: &ClassifierBundle) -> Result<PathBuf, ArtifactError> {
        let path = self.artifact_path();
        let bytes = serde_json::to_vec_pretty(bundle)?;
        let hash = digest(&bytes);

        log::info!("Writing {} bytes to {:?}", bytes.len(), path);
        let staged_artifact = staging_path(&path);
        let staged_checksum = staging_path(&self.checksum_path());
        fs::write(&staged_artifact, &bytes)?;
        fs::write(&staged_checksum, format!("{}\n", hash))?;

        fs::rename(&staged_artifact, &path)?;
        fs::rename(&staged_checksum, self.checksum_path())?;
        log::info!("Artifact saved (sha256 {})", hash);
        Ok(path)
    }

    /// Reads the bundle back, verifying its digest when one was recorded.
    pub fn load(&self) -> Result<ClassifierBundle, ArtifactError> {
        let path = self.artifact_path();
        if !path.exists() {
            log::error!("No artifact at {:?}", path);
            return Err(ArtifactError::NotFound(path));
        }

        let bytes = fs::read(&path)?;
        log::debug!("Read {} bytes from {:?}", bytes.len(), path);

        if let Some(expected) = self.recorded_checksum()? {
            let actual = digest(&bytes);
            if actual != expected {
                log::error!("Artifact hash mismatch: expected {}, got {}", expected, actual);
                return Err(ArtifactError::ChecksumMismatch { expected, actual });
            }
        } else {
            log::warn!("No checksum recorded for {:?}, skipping verification", path);
        }

        let bundle: ClassifierBundle = serde_json::from_slice(&bytes)?;
        bundle
            .validate()
            .map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        log::info!(
            "Loaded classifier with {} features from {:?}",
            bundle.vectorizer.num_features(),
            path
        );
        Ok(bundle)
    }

    /// True if the artifact exists and matches its recorded digest.
    pub fn verify(&self) -> Result<bool, ArtifactError> {
        let path = self.artifact_path();
        if !path.exists() {
            return Ok(false);
        }
        let Some(expected) = self.recorded_checksum()? else {
            return Ok(false);
        };
        let actual = digest(&fs::read(&path)?);
        log::debug!("Verifying artifact: expected {}, got {}", expected, actual);
        Ok(actual == expected)
    }

    pub fn remove(&self) -> Result<(), ArtifactError> {
        for path in [self.artifact_path(), self.checksum_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn recorded_checksum(&self) -> Result<Option<String>, ArtifactError> {
        let path = self.checksum_path();
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?.trim().to_string()))
    }
}

/// Loads the artifact and scores `text` in one call.
///
/// Reads storage on every invocation; long-running callers should hold a
/// [`crate::BundleHandle`] instead.
pub fn predict_from_artifact<P: AsRef<Path>>(dir: P, text: &str) -> Result<f64, ArtifactError> {
    let store = ArtifactStore {
        dir: dir.as_ref().to_path_buf(),
    };
    let bundle = store.load()?;
    bundle
        .predict(text)
        .map_err(|e| ArtifactError::Invalid(e.to_string()))
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierBuilder;

    fn small_bundle() -> ClassifierBundle {
        ClassifierBuilder::new()
            .add_example("pills and weed", 1)
            .and_then(|b| b.add_example("walking the dog", 0))
            .and_then(|b| b.build())
            .expect("small bundle should fit")
    }

    #[test]
    fn test_save_and_load() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        assert!(!store.exists());

        let bundle = small_bundle();
        store.save(&bundle)?;
        assert!(store.exists());
        assert!(store.verify()?);

        let loaded = store.load()?;
        assert_eq!(loaded, bundle);
        Ok(())
    }

    #[test]
    fn test_corpus_bundle_reloads_bit_exact() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        let bundle = ClassifierBuilder::new()
            .with_corpus()
            .build()
            .expect("corpus should fit");
        store.save(&bundle)?;

        let loaded = store.load()?;
        let saved_bits: Vec<u64> = bundle.model.weights().iter().map(|w| w.to_bits()).collect();
        let loaded_bits: Vec<u64> = loaded.model.weights().iter().map(|w| w.to_bits()).collect();
        assert_eq!(saved_bits, loaded_bits);
        assert_eq!(bundle.model.bias().to_bits(), loaded.model.bias().to_bits());
        assert_eq!(loaded, bundle);
        Ok(())
    }

    #[test]
    fn test_save_leaves_no_staging_files() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        store.save(&small_bundle())?;
        store.save(&small_bundle())?;

        let mut names: Vec<String> = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;
        names.sort();
        assert_eq!(names, ["model.json", "model.json.sha256"]);
        assert!(store.verify()?);
        Ok(())
    }

    #[test]
    fn test_missing_artifact() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        assert!(matches!(store.load(), Err(ArtifactError::NotFound(_))));
        assert!(!store.verify()?);
        Ok(())
    }

    #[test]
    fn test_tampered_artifact() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        store.save(&small_bundle())?;

        fs::write(store.artifact_path(), "corrupted data")?;
        assert!(!store.verify()?);
        assert!(matches!(
            store.load(),
            Err(ArtifactError::ChecksumMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_corrupt_artifact_without_checksum() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        fs::write(store.artifact_path(), "{\"model\": 1}")?;
        assert!(matches!(store.load(), Err(ArtifactError::Serialization(_))));
        Ok(())
    }

    #[test]
    fn test_remove() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        store.save(&small_bundle())?;
        store.remove()?;
        assert!(!store.artifact_path().exists());
        assert!(!store.checksum_path().exists());
        Ok(())
    }

    #[test]
    fn test_predict_from_artifact() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        let bundle = small_bundle();
        store.save(&bundle)?;

        let from_disk = predict_from_artifact(dir.path(), "weed")?;
        let in_memory = bundle.predict("weed").unwrap();
        assert_eq!(from_disk, in_memory);
        Ok(())
    }

    #[test]
    fn test_default_dir() {
        env::set_var("DRUGWATCH_HOME", "/tmp/test-drugwatch");
        let path = ArtifactStore::get_default_dir();
        assert!(path.to_str().unwrap().contains("/tmp/test-drugwatch/models"));
        env::remove_var("DRUGWATCH_HOME");

        let path = ArtifactStore::get_default_dir();
        assert!(path.to_str().unwrap().contains("drugwatch"));
    }
}
