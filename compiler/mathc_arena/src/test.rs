use crate::{Arena, ID};

#[test]
fn insert_hands_out_sequential_ids() {
    let mut arena = Arena::new();

    let first = arena.insert("first");
    let second = arena.insert("second");

    assert_eq!(first, ID::new(0));
    assert_eq!(second, ID::new(1));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena[first], "first");
    assert_eq!(arena.get(second), Some(&"second"));
}

#[test]
fn iteration_follows_insertion_order() {
    let mut arena = Arena::new();

    for value in [3, 1, 2] {
        arena.insert(value);
    }

    let values = arena.iter().map(|(id, value)| (id.index(), *value));

    assert_eq!(values.collect::<Vec<_>>(), vec![(0, 3), (1, 1), (2, 2)]);
}

#[test]
fn unknown_id() {
    let mut arena = Arena::new();
    arena.insert(0u8);

    assert_eq!(arena.get(ID::new(0)), Some(&0));
    assert_eq!(arena.get(ID::new(7)), None);
    assert_eq!(format!("{:?}", ID::<u8>::new(7)), "#7");
}
