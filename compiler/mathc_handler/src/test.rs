use crate::{Counter, Handler, Storage};

#[test]
fn storage_collects_in_order() {
    let storage = Storage::<String>::new();

    storage.receive("first");
    storage.receive("second");

    assert_eq!(storage.len(), 2);
    assert_eq!(storage.into_vec(), vec!["first", "second"]);
}

#[test]
fn take_empties_the_storage() {
    let storage = Storage::<u32>::default();

    storage.receive(1u32);

    assert_eq!(storage.take(), vec![1]);
    assert!(storage.is_empty());
}

#[test]
fn counter_counts_through_a_trait_object() {
    let counter = Counter::default();
    let handler: &dyn Handler<&str> = &counter;

    handler.receive("a");
    handler.receive("b");

    assert_eq!(counter.count(), 2);
}
