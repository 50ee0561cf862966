//! Capturing trees into profiles and applying them back

use deskforge::catalog::{builtin_catalog, ConfigValue, PRESETS};
use deskforge::engine::SelectionTree;
use deskforge::profile::Profile;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_profile_survives_yaml() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut tree = SelectionTree::new(Arc::clone(&catalog));
    tree.toggle_category("languages").unwrap();
    tree.toggle_leaf("nf-firacode").unwrap();
    tree.set_configured_value("font-monospace", ConfigValue::Key("fira-code-nerd".into()))
        .unwrap();

    let yaml = Profile::capture(&tree).to_yaml().unwrap();
    let loaded = Profile::from_yaml(&yaml).unwrap();

    let mut restored = SelectionTree::new(catalog);
    assert!(restored.apply_profile(&loaded).is_clean());
    assert_eq!(restored.selected_items(), tree.selected_items());
    assert_eq!(
        restored.effective_value("font-monospace").unwrap(),
        ConfigValue::Key("fira-code-nerd".into())
    );
}

#[test]
fn test_apply_ignores_defaults_not_listed() {
    let mut tree = SelectionTree::new(Arc::new(builtin_catalog().unwrap()));
    let profile = Profile::from_yaml("selected_items: [vlc]\n").unwrap();

    tree.apply_profile(&profile);
    // zram is selected by default but absent from the profile
    assert_eq!(tree.selected_items(), vec!["vlc".to_string()]);
    assert_eq!(tree.configured_value("swappiness"), Some(&ConfigValue::Number(10)));
}

#[test]
fn test_every_preset_applies_cleanly() {
    let catalog = Arc::new(builtin_catalog().unwrap());
    for preset in PRESETS {
        let mut tree = SelectionTree::new(Arc::clone(&catalog));
        let report = tree.apply_profile(&Profile::from_preset(preset));
        assert!(report.is_clean(), "{}: {:?}", preset.name, report);
        assert_eq!(tree.selected_items().len(), preset.items.len());
    }
}

#[test]
fn test_capture_is_canonical_regardless_of_toggle_order() {
    let catalog = Arc::new(builtin_catalog().unwrap());

    let mut first = SelectionTree::new(Arc::clone(&catalog));
    first.toggle_leaf("gimp").unwrap();
    first.toggle_leaf("noto").unwrap();

    let mut second = SelectionTree::new(catalog);
    second.toggle_leaf("noto").unwrap();
    second.toggle_leaf("gimp").unwrap();

    assert_eq!(
        Profile::capture(&first).canonical().unwrap(),
        Profile::capture(&second).canonical().unwrap()
    );
}
