use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use log::{info, warn};

use crate::artifact::{ArtifactError, ArtifactStore};
use crate::classifier::ClassifierBundle;

/// Shared, swappable reference to the live classifier.
///
/// Readers take a cheap `Arc` snapshot; a reload replaces the snapshot only
/// once the new bundle has loaded and validated.
#[derive(Debug)]
pub struct BundleHandle {
    current: RwLock<Arc<ClassifierBundle>>,
    source: Option<ArtifactStore>,
}

impl BundleHandle {
    /// Wraps a bundle built in memory. Such a handle cannot be reloaded.
    pub fn new(bundle: ClassifierBundle) -> Self {
        Self {
            current: RwLock::new(Arc::new(bundle)),
            source: None,
        }
    }

    /// Loads the bundle from `store` and remembers it for [`reload`](Self::reload).
    pub fn load(store: ArtifactStore) -> Result<Self, ArtifactError> {
        let bundle = store.load()?;
        Ok(Self {
            current: RwLock::new(Arc::new(bundle)),
            source: Some(store),
        })
    }

    /// The bundle currently in use.
    pub fn get(&self) -> Arc<ClassifierBundle> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn source_path(&self) -> Option<PathBuf> {
        self.source.as_ref().map(ArtifactStore::artifact_path)
    }

    /// Re-reads the artifact. On failure the previous bundle stays active.
    pub fn reload(&self) -> Result<(), ArtifactError> {
        let store = self.source.as_ref().ok_or(ArtifactError::NotReloadable)?;
        let bundle = match store.load() {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!("Reload failed, keeping current classifier: {}", e);
                return Err(e);
            }
        };

        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(bundle);
        info!("Classifier reloaded from {:?}", store.artifact_path());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierBuilder;
    use std::fs;

    fn bundle(suspicious: &str) -> ClassifierBundle {
        ClassifierBuilder::new()
            .add_example(suspicious, 1)
            .and_then(|b| b.add_example("walking the dog", 0))
            .and_then(|b| b.build())
            .unwrap()
    }

    #[test]
    fn test_in_memory_handle_is_not_reloadable() {
        let handle = BundleHandle::new(bundle("pills"));
        assert!(handle.source_path().is_none());
        assert!(matches!(handle.reload(), Err(ArtifactError::NotReloadable)));
    }

    #[test]
    fn test_reload_swaps_bundle() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        store.save(&bundle("pills"))?;

        let handle = BundleHandle::load(store.clone())?;
        let before = handle.get();

        let replacement = bundle("weed for sale");
        store.save(&replacement)?;
        handle.reload()?;

        assert_eq!(*handle.get(), replacement);
        assert_ne!(*before, replacement);
        Ok(())
    }

    #[test]
    fn test_failed_reload_keeps_previous() -> Result<(), ArtifactError> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        let original = bundle("pills");
        store.save(&original)?;

        let handle = BundleHandle::load(store.clone())?;
        fs::write(store.artifact_path(), "garbage")?;

        assert!(handle.reload().is_err());
        assert_eq!(*handle.get(), original);
        Ok(())
    }
}
