use std::fs;

use drugwatch::corpus::TRAINING_CORPUS;
use drugwatch::{predict_from_artifact, ArtifactError, ArtifactStore, BundleHandle, ClassifierBundle};

#[test]
fn test_round_trip_preserves_predictions() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ArtifactStore::new(dir.path())?;
    let trained = ClassifierBundle::builder().with_corpus().build()?;
    store.save(&trained)?;

    let loaded = store.load()?;
    for (text, _) in TRAINING_CORPUS {
        assert_eq!(trained.predict(text)?, loaded.predict(text)?);
    }
    Ok(())
}

#[test]
fn test_artifact_is_a_two_field_object() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ArtifactStore::new(dir.path())?;
    store.save(&ClassifierBundle::builder().with_corpus().build()?)?;

    let json: serde_json::Value = serde_json::from_slice(&fs::read(store.artifact_path())?)?;
    let object = json.as_object().ok_or("artifact is not an object")?;
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["model", "vectorizer"]);
    Ok(())
}

#[test]
fn test_predict_from_missing_artifact_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let result = predict_from_artifact(dir.path(), "need plug in nyc dm for menu");
    assert!(matches!(result, Err(ArtifactError::NotFound(_))));
    Ok(())
}

#[test]
fn test_tampered_artifact_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ArtifactStore::new(dir.path())?;
    store.save(&ClassifierBundle::builder().with_corpus().build()?)?;

    let mut bytes = fs::read(store.artifact_path())?;
    bytes.extend_from_slice(b" ");
    fs::write(store.artifact_path(), bytes)?;

    assert!(matches!(
        store.load(),
        Err(ArtifactError::ChecksumMismatch { .. })
    ));
    assert!(matches!(
        BundleHandle::load(store),
        Err(ArtifactError::ChecksumMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_handle_serves_saved_bundle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = ArtifactStore::new(dir.path())?;
    let trained = ClassifierBundle::builder().with_corpus().build()?;
    store.save(&trained)?;

    let handle = BundleHandle::load(store.clone())?;
    assert_eq!(handle.source_path(), Some(store.artifact_path()));
    assert_eq!(
        handle.get().predict("special treats available signal only")?,
        predict_from_artifact(dir.path(), "special treats available signal only")?
    );
    Ok(())
}
