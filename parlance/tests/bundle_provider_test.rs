use std::fs;
use std::path::Path;

use parlance::{
    default_locale, message_contract, set_default_locale, DefaultLocaleProvider, Locale, MemoryBundleLoader,
    MessageContract, MessageError, MessagesProvider, ProviderConfig,
};
use serial_test::serial;
use tempfile::TempDir;

message_contract! {
    pub contract BaseMessages in "test.A" {
        fn foo() -> String;
        fn only_in_a() -> String;
    }
}

message_contract! {
    pub contract ChildMessages in "test.B": BaseMessages {
        fn own() -> String;
        fn missing() -> String;
    }
}

fn loader() -> MemoryBundleLoader {
    MemoryBundleLoader::new()
        .with_properties("test.A", Locale::root(), "foo=A foo\nonly_in_a=Only in A\n")
        .unwrap()
        .with_properties("test.B", Locale::root(), "foo=The Foo Message\nown=Own\n")
        .unwrap()
        .with_properties(
            "test.B",
            Locale::language_only("de"),
            "foo=Die Foo Lokalisierung Nachricht\n",
        )
        .unwrap()
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_bundle_chain_follows_inheritance() {
    assert_eq!(ChildMessages::descriptor().bundle_chain(), vec!["test.B", "test.A"]);
    assert_eq!(BaseMessages::descriptor().bundle_chain(), vec!["test.A"]);
}

#[test]
fn test_child_bundle_shadows_parent() {
    let provider = MessagesProvider::for_locale(Locale::root()).with_loader(loader());
    let child: ChildMessages = provider.create().unwrap();
    let as_base: BaseMessages = child.view().unwrap();

    assert_eq!(as_base.foo().unwrap(), "The Foo Message");
    assert_eq!(as_base.only_in_a().unwrap(), "Only in A");
    assert_eq!(child.own().unwrap(), "Own");
    assert_eq!(child.missing().unwrap(), "???missing???");
}

#[test]
fn test_parent_created_alone_uses_its_own_bundle() {
    let provider = MessagesProvider::for_locale(Locale::root()).with_loader(loader());
    let base: BaseMessages = provider.create().unwrap();
    assert_eq!(base.foo().unwrap(), "A foo");
}

#[test]
fn test_fixed_locale_selects_localized_layer() {
    let provider =
        MessagesProvider::for_locale(Locale::new("de", "DE", "")).with_loader(loader());
    let child: ChildMessages = provider.create().unwrap();
    let as_base: BaseMessages = child.view().unwrap();

    assert_eq!(as_base.foo().unwrap(), "Die Foo Lokalisierung Nachricht");
    assert_eq!(child.own().unwrap(), "Own");
}

#[test]
#[serial]
fn test_default_locale_is_read_on_every_call() {
    let provider = MessagesProvider::with_locale_provider(DefaultLocaleProvider)
        .with_loader(loader());
    let child: ChildMessages = provider.create().unwrap();
    let as_base: BaseMessages = child.view().unwrap();
    let previous = default_locale();

    set_default_locale(Locale::language_only("en"));
    assert_eq!(as_base.foo().unwrap(), "The Foo Message");

    set_default_locale(Locale::language_only("de"));
    assert_eq!(as_base.foo().unwrap(), "Die Foo Lokalisierung Nachricht");

    set_default_locale(Locale::language_only("en"));
    assert_eq!(as_base.foo().unwrap(), "The Foo Message");

    set_default_locale(previous);
}

#[test]
#[serial]
fn test_fixed_root_locale_ignores_default_locale() {
    let previous = default_locale();
    let child: ChildMessages = MessagesProvider::for_locale(Locale::root())
        .with_loader(loader())
        .create()
        .unwrap();
    let as_base: BaseMessages = child.view().unwrap();

    set_default_locale(Locale::language_only("en"));
    let first = as_base.foo().unwrap();
    set_default_locale(Locale::language_only("de"));
    let second = as_base.foo().unwrap();

    set_default_locale(previous);
    assert_eq!(first, "The Foo Message");
    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_default_locale_fallback_can_be_disabled() {
    let previous = default_locale();
    set_default_locale(Locale::language_only("de"));

    let fallback: ChildMessages = MessagesProvider::for_locale(Locale::language_only("fr"))
        .with_loader(loader())
        .create()
        .unwrap();
    let as_base: BaseMessages = fallback.view().unwrap();
    assert_eq!(as_base.foo().unwrap(), "Die Foo Lokalisierung Nachricht");

    let strict: ChildMessages = MessagesProvider::for_locale(Locale::language_only("fr"))
        .with_loader(loader())
        .with_default_locale_fallback(false)
        .create()
        .unwrap();
    let as_base: BaseMessages = strict.view().unwrap();
    assert_eq!(as_base.foo().unwrap(), "The Foo Message");

    set_default_locale(previous);
}

#[test]
fn test_from_config_reads_directory_bundles() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(dir.path(), "bundles/test/A.properties", "foo=A foo\n");
    write(dir.path(), "bundles/test/B.properties", "own=Own\n");
    write(dir.path(), "bundles/test/B_de.yaml", "foo: Die Foo Lokalisierung Nachricht\n");
    let config_path = dir.path().join("parlance.yaml");
    fs::write(&config_path, "bundle_dir: bundles\nlocale: de\n").unwrap();

    let config = ProviderConfig::load(&config_path).unwrap();
    let provider = MessagesProvider::from_config(&config).unwrap();
    let child: ChildMessages = provider.create().unwrap();
    let as_base: BaseMessages = child.view().unwrap();

    assert_eq!(as_base.foo().unwrap(), "Die Foo Lokalisierung Nachricht");
    assert_eq!(child.own().unwrap(), "Own");
}

#[test]
fn test_malformed_bundle_surfaces_as_source_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(dir.path(), "bundles/test/B.properties", "broken=\\u12\n");
    let config = ProviderConfig {
        bundle_dir: dir.path().join("bundles"),
        locale: Some("en".to_string()),
        ..ProviderConfig::default()
    };

    let child: ChildMessages = MessagesProvider::from_config(&config)
        .unwrap()
        .create()
        .unwrap();
    assert!(matches!(child.own(), Err(MessageError::Source { .. })));
}

#[test]
fn test_invalid_config_locale_is_rejected() {
    let config = ProviderConfig {
        locale: Some("not a locale!".to_string()),
        ..ProviderConfig::default()
    };
    assert!(MessagesProvider::from_config(&config).is_err());
}
