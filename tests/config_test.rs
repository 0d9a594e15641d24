use molino::{GalaxyCatalog, MolinoConfig, MolinoError, DEFAULT_BOX_SIZE, MOLINO_DIR_ENV};
use std::path::PathBuf;

// Only test in this binary that touches the process environment.
#[test]
fn test_root_from_environment() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("molino=warn")
        .with_test_writer()
        .try_init();

    std::env::remove_var(MOLINO_DIR_ENV);
    let config = MolinoConfig::from_env();
    assert_eq!(config.root_dir, None);
    assert_eq!(config.box_size, DEFAULT_BOX_SIZE);

    // A missing root is not fatal until something is read.
    let reader = GalaxyCatalog::new(config).unwrap();
    let err = reader
        .read(&molino::CatalogRequest::new("fiducial"))
        .unwrap_err();
    assert!(matches!(err, MolinoError::Config(_)));

    std::env::set_var(MOLINO_DIR_ENV, "/srv/molino");
    let config = MolinoConfig::from_env();
    assert_eq!(config.root_dir, Some(PathBuf::from("/srv/molino")));

    // File without root_dir picks the environment up.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("molino.toml");
    std::fs::write(&path, "box_size = 1000.0\n").unwrap();
    let config = MolinoConfig::load(&path).unwrap();
    assert_eq!(config.root_dir, Some(PathBuf::from("/srv/molino")));

    std::env::remove_var(MOLINO_DIR_ENV);
}

#[test]
fn test_unparseable_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("molino.toml");
    std::fs::write(&path, "box_size = \"big\"\n").unwrap();
    assert!(matches!(
        MolinoConfig::load(&path),
        Err(MolinoError::Config(_))
    ));
}

#[test]
fn test_reader_rejects_invalid_config() {
    let mut config = MolinoConfig::new("/srv/molino");
    config.box_size = 0.0;
    assert!(matches!(
        GalaxyCatalog::new(config),
        Err(MolinoError::Config(_))
    ));
}
