use super::{create_test_storage, new_category};
use crate::StorageError;
use cardbox_core::{CategoryId, CategoryPatch, NewCategory};

#[test]
fn create_and_get_category() {
    let (storage, _temp_dir) = create_test_storage();
    let created = storage
        .create_category(&NewCategory {
            name: "Technology".to_owned(),
            description: Some("Gadgets and code".to_owned()),
        })
        .unwrap();

    let fetched = storage.get_category(created.id).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("Gadgets and code"));
}

#[test]
fn get_missing_category_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.get_category(CategoryId(999_999)).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "category", .. }));
}

#[test]
fn direct_create_keeps_name_casing() {
    let (storage, _temp_dir) = create_test_storage();
    let created = storage.create_category(&new_category("lowercase name")).unwrap();
    assert_eq!(created.name, "lowercase name");
}

#[test]
fn list_categories_in_insertion_order() {
    let (storage, _temp_dir) = create_test_storage();
    for name in ["Zeta", "Alpha", "Mid"] {
        storage.create_category(&new_category(name)).unwrap();
    }
    let names: Vec<String> =
        storage.list_categories().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn name_contains_is_case_insensitive() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_category(&new_category("Technology")).unwrap();
    storage.create_category(&new_category("Biotech")).unwrap();
    storage.create_category(&new_category("Cooking")).unwrap();

    let names: Vec<String> = storage
        .find_categories_by_name_contains("TEC")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Technology", "Biotech"]);
}

#[test]
fn name_contains_folds_non_ascii_case() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_category(&new_category("Élan")).unwrap();
    storage.create_category(&new_category("ÜBER")).unwrap();
    storage.create_category(&new_category("Elan")).unwrap();

    let names: Vec<String> = storage
        .find_categories_by_name_contains("élan")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Élan"]);

    let names: Vec<String> = storage
        .find_categories_by_name_contains("über")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["ÜBER"]);
}

#[test]
fn name_contains_empty_needle_matches_all() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_category(&new_category("One")).unwrap();
    storage.create_category(&new_category("Two")).unwrap();
    assert_eq!(storage.find_categories_by_name_contains("").unwrap().len(), 2);
}

#[test]
fn name_contains_treats_wildcards_literally() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_category(&new_category("100% Cotton")).unwrap();
    storage.create_category(&new_category("Cotton")).unwrap();
    storage.create_category(&new_category("snake_case")).unwrap();
    storage.create_category(&new_category("snakeXcase")).unwrap();

    let percent = storage.find_categories_by_name_contains("%").unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].name, "100% Cotton");

    let underscore = storage.find_categories_by_name_contains("e_c").unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].name, "snake_case");
}

#[test]
fn update_description_only_keeps_name() {
    let (storage, _temp_dir) = create_test_storage();
    let created = storage.create_category(&new_category("Travel")).unwrap();

    let patch = CategoryPatch { name: None, description: Some(Some("Trips".to_owned())) };
    let updated = storage.update_category(created.id, &patch).unwrap();

    assert_eq!(updated.name, "Travel");
    assert_eq!(updated.description.as_deref(), Some("Trips"));
    assert_eq!(updated.created, created.created);
}

#[test]
fn update_can_clear_description() {
    let (storage, _temp_dir) = create_test_storage();
    let created = storage
        .create_category(&NewCategory {
            name: "Music".to_owned(),
            description: Some("Songs".to_owned()),
        })
        .unwrap();

    let patch = CategoryPatch { name: None, description: Some(None) };
    let updated = storage.update_category(created.id, &patch).unwrap();
    assert_eq!(updated.description, None);

    let renamed = storage
        .update_category(
            created.id,
            &CategoryPatch { name: Some("Audio".to_owned()), description: None },
        )
        .unwrap();
    assert_eq!(renamed.name, "Audio");
    assert_eq!(renamed.description, None);
}

#[test]
fn update_missing_category_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let patch = CategoryPatch { name: Some("Ghost".to_owned()), description: None };
    let err = storage.update_category(CategoryId(42), &patch).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn get_or_create_reuses_exact_name() {
    let (storage, _temp_dir) = create_test_storage();
    let (first, created) = storage.get_or_create_category("Tech").unwrap();
    assert!(created);
    let (second, created_again) = storage.get_or_create_category("Tech").unwrap();
    assert!(!created_again);
    assert_eq!(first.id, second.id);

    // exact match only: different casing is a different name
    let (other, created_other) = storage.get_or_create_category("tech").unwrap();
    assert!(created_other);
    assert_ne!(other.id, first.id);
}

#[test]
fn get_or_create_prefers_oldest_duplicate() {
    let (storage, _temp_dir) = create_test_storage();
    let oldest = storage.create_category(&new_category("Dup")).unwrap();
    storage.create_category(&new_category("Dup")).unwrap();

    let (found, created) = storage.get_or_create_category("Dup").unwrap();
    assert!(!created);
    assert_eq!(found.id, oldest.id);
}

#[test]
fn blank_name_is_rejected_by_schema() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.create_category(&new_category("   ")).unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)));
    assert!(storage.list_categories().unwrap().is_empty());
}
