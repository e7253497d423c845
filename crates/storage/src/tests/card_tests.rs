use super::{create_test_storage, new_card, new_category};
use crate::StorageError;
use cardbox_core::{CardId, CardPatch, CategoryId, NewCard};

#[test]
fn create_card_attaches_categories() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Ownership", &["Rust", "Memory"])).unwrap();

    assert_eq!(card.title, "Ownership");
    assert_eq!(card.description, "Ownership description");
    assert_eq!(card.category_names, vec!["Rust", "Memory"]);
    assert_eq!(card.created, card.updated);

    let fetched = storage.get_card(card.id).unwrap();
    assert_eq!(fetched, card);
}

#[test]
fn create_card_without_categories() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Loose", &[])).unwrap();
    assert!(card.category_names.is_empty());
    assert!(storage.list_categories().unwrap().is_empty());
}

#[test]
fn create_card_reuses_existing_category() {
    let (storage, _temp_dir) = create_test_storage();
    let existing = storage.create_category(&new_category("Rust")).unwrap();

    storage.create_card(&new_card("One", &["Rust"])).unwrap();
    storage.create_card(&new_card("Two", &["Rust"])).unwrap();

    let categories = storage.list_categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, existing.id);
}

#[test]
fn repeated_names_in_one_write_attach_once() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Twice", &["Tech", "Tech"])).unwrap();
    assert_eq!(card.category_names, vec!["Tech"]);
    assert_eq!(storage.list_categories().unwrap().len(), 1);
}

#[test]
fn get_missing_card_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.get_card(CardId(999_999)).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "card", .. }));
}

#[test]
fn list_cards_filters_by_category() {
    let (storage, _temp_dir) = create_test_storage();
    let rust_card = storage.create_card(&new_card("Traits", &["Rust"])).unwrap();
    storage.create_card(&new_card("Goroutines", &["Go"])).unwrap();
    let both = storage.create_card(&new_card("FFI", &["Go", "Rust"])).unwrap();

    let all = storage.list_cards(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].category_names, vec!["Rust", "Go"]);

    let rust_id = storage.get_or_create_category("Rust").unwrap().0.id;
    let rust_cards = storage.list_cards(Some(rust_id)).unwrap();
    let ids: Vec<CardId> = rust_cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![rust_card.id, both.id]);
    // filtering narrows the cards, not their category lists
    assert_eq!(rust_cards[1].category_names, vec!["Rust", "Go"]);
}

#[test]
fn list_cards_unknown_category_is_empty() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_card(&new_card("Something", &["Misc"])).unwrap();
    let cards = storage.list_cards(Some(CategoryId(12_345))).unwrap();
    assert!(cards.is_empty());
}

#[test]
fn update_card_partial_fields() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Draft", &["Notes"])).unwrap();

    let patch = CardPatch { title: Some("Final".to_owned()), ..CardPatch::default() };
    let updated = storage.update_card(card.id, &patch).unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description, card.description);
    assert_eq!(updated.category_names, vec!["Notes"]);
    assert_eq!(updated.created, card.created);
    assert!(updated.updated >= card.updated);
}

#[test]
fn update_card_refreshes_timestamp_with_empty_patch() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Stamp", &[])).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = storage.update_card(card.id, &CardPatch::default()).unwrap();
    assert!(updated.updated > card.updated);
    assert_eq!(updated.title, "Stamp");
}

#[test]
fn update_card_replaces_category_set() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Mover", &["Old", "Shared"])).unwrap();

    let patch = CardPatch {
        category_names: Some(vec!["Shared".to_owned(), "New".to_owned()]),
        ..CardPatch::default()
    };
    let updated = storage.update_card(card.id, &patch).unwrap();
    assert_eq!(updated.category_names, vec!["Shared", "New"]);

    // the detached category still exists
    let names: Vec<String> =
        storage.list_categories().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Old", "Shared", "New"]);

    let cleared = storage
        .update_card(card.id, &CardPatch { category_names: Some(vec![]), ..CardPatch::default() })
        .unwrap();
    assert!(cleared.category_names.is_empty());
}

#[test]
fn update_missing_card_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.update_card(CardId(7), &CardPatch::default()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn failed_category_resolution_rolls_back_card() {
    let (storage, _temp_dir) = create_test_storage();
    let input = NewCard {
        title: "Half done".to_owned(),
        description: String::new(),
        category_names: vec!["Good".to_owned(), "  ".to_owned()],
    };

    assert!(storage.create_card(&input).is_err());
    assert!(storage.list_cards(None).unwrap().is_empty());
    assert!(storage.list_categories().unwrap().is_empty());
}

#[test]
fn failed_update_keeps_previous_state() {
    let (storage, _temp_dir) = create_test_storage();
    let card = storage.create_card(&new_card("Stable", &["Keep"])).unwrap();

    let patch = CardPatch {
        title: Some("Changed".to_owned()),
        category_names: Some(vec!["Fresh".to_owned(), String::new()]),
        ..CardPatch::default()
    };
    assert!(storage.update_card(card.id, &patch).is_err());

    let after = storage.get_card(card.id).unwrap();
    assert_eq!(after, card);
    assert_eq!(storage.list_categories().unwrap().len(), 1);
}
