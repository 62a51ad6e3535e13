use country_card_core::block::{global, install, BlockRegistry, BLOCK_NAME};
use country_card_core::requirements::StaticEnvironment;
use country_card_core::{activate_global, CardError, PluginConfig};

// One test per binary: the registry is process-wide.
#[test]
fn activation_publishes_the_registry_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = PluginConfig::default();

    let failed = activate_global(&config, dir.path(), &StaticEnvironment::new("8.2", "6.4"));
    assert!(!failed.is_active());
    assert!(global().is_none());

    std::fs::create_dir_all(dir.path().join("build")).unwrap();
    std::fs::write(dir.path().join("build/block.json"), "{}").unwrap();
    let active = activate_global(&config, dir.path(), &StaticEnvironment::new("8.2", "6.4"));
    assert!(active.is_active());
    assert!(global().unwrap().is_registered(BLOCK_NAME));

    assert!(matches!(
        install(BlockRegistry::new()),
        Err(CardError::AlreadyRegistered(_))
    ));
    let again = activate_global(&config, dir.path(), &StaticEnvironment::new("8.2", "6.4"));
    assert!(again.is_active());
    assert_eq!(global().unwrap().len(), 1);
}
