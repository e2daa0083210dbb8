//! Property-based tests for link ordering.
//!
//! A random sequence of add, delete and move operations is applied both to
//! the store and to a plain `Vec` of ids. After every step the listed order
//! must match the model and positions must stay distinct.

use std::collections::HashSet;

use newtab::database::Database;
use newtab::managers::link_manager::{LinkManager, LinkManagerTrait};
use newtab::types::link::{Direction, MoveOutcome};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    /// Index into the current model, reduced modulo its length.
    Delete(usize),
    Move(usize, Direction),
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Up), Just(Direction::Down)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        1 => any::<usize>().prop_map(Op::Delete),
        4 => (any::<usize>(), arb_direction()).prop_map(|(i, d)| Op::Move(i, d)),
    ]
}

fn listed_ids(manager: &LinkManager<'_>) -> Vec<i64> {
    manager.list_links().unwrap().iter().map(|l| l.id).collect()
}

fn apply_to_model(model: &mut [i64], index: usize, direction: Direction) -> MoveOutcome {
    let neighbour = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < model.len() => index + 1,
        _ => return MoveOutcome::AtBoundary,
    };
    model.swap(index, neighbour);
    MoveOutcome::Moved
}

// **Property: ordering follows a swap model**
//
// *For any* sequence of operations, the list order equals the model order
// and no two links share a position.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ordering_matches_swap_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut manager = LinkManager::new(db.connection());
        let mut model: Vec<i64> = Vec::new();

        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Add => {
                    let href = format!("https://site{}.example", step);
                    let id = manager.add_link(Some("site"), &href, Some("")).unwrap();
                    model.push(id);
                }
                Op::Delete(i) if !model.is_empty() => {
                    let id = model.remove(i % model.len());
                    prop_assert!(manager.delete_link(id).unwrap());
                }
                Op::Move(i, direction) if !model.is_empty() => {
                    let index = i % model.len();
                    let id = model[index];
                    let expected = apply_to_model(&mut model, index, direction);
                    prop_assert_eq!(manager.move_link(id, direction).unwrap(), expected);
                }
                _ => {}
            }

            prop_assert_eq!(&listed_ids(&manager), &model);
            let positions: HashSet<i64> = manager
                .list_links()
                .unwrap()
                .iter()
                .map(|l| l.position)
                .collect();
            prop_assert_eq!(positions.len(), model.len(), "positions must be distinct");
        }
    }

    #[test]
    fn move_up_then_down_restores_order(count in 2usize..10, pick in any::<usize>()) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut manager = LinkManager::new(db.connection());
        let ids: Vec<i64> = (0..count)
            .map(|i| manager.add_link(None, &format!("https://l{}.example", i), None).unwrap())
            .collect();

        // Never the first link, so the upward move always happens.
        let id = ids[1 + pick % (count - 1)];
        let before = manager.list_links().unwrap();

        prop_assert_eq!(manager.move_link(id, Direction::Up).unwrap(), MoveOutcome::Moved);
        prop_assert_eq!(manager.move_link(id, Direction::Down).unwrap(), MoveOutcome::Moved);
        prop_assert_eq!(manager.list_links().unwrap(), before);
    }

    #[test]
    fn boundary_moves_change_nothing(count in 1usize..8) {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mut manager = LinkManager::new(db.connection());
        let ids: Vec<i64> = (0..count)
            .map(|i| manager.add_link(Some("x"), &format!("https://b{}.example", i), None).unwrap())
            .collect();
        let before = manager.list_links().unwrap();

        let first = ids[0];
        let last = ids[count - 1];
        prop_assert_eq!(manager.move_link(first, Direction::Up).unwrap(), MoveOutcome::AtBoundary);
        prop_assert_eq!(manager.move_link(last, Direction::Down).unwrap(), MoveOutcome::AtBoundary);
        prop_assert_eq!(manager.list_links().unwrap(), before);
    }
}
