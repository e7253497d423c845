use std::sync::{Arc, Barrier};
use std::thread;

use super::{create_test_storage, new_card};

#[test]
fn concurrent_card_writes_create_category_once() {
    let (storage, _temp_dir) = create_test_storage();
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let storage = storage.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                storage.create_card(&new_card(&format!("card {i}"), &["Race"])).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let card = handle.join().unwrap();
        assert_eq!(card.category_names, vec!["Race"]);
    }

    let races: Vec<_> = storage
        .list_categories()
        .unwrap()
        .into_iter()
        .filter(|c| c.name == "Race")
        .collect();
    assert_eq!(races.len(), 1);

    let cards = storage.list_cards(Some(races[0].id)).unwrap();
    assert_eq!(cards.len(), workers);
}

#[test]
fn concurrent_get_or_create_returns_same_row() {
    let (storage, _temp_dir) = create_test_storage();
    let workers = 6;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let storage = storage.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                storage.get_or_create_category("Shared").unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let created = results.iter().filter(|(_, was_created)| *was_created).count();
    assert_eq!(created, 1);
    let first_id = results[0].0.id;
    assert!(results.iter().all(|(c, _)| c.id == first_id));
}
