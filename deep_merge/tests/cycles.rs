//! Cycle termination and shared-owner handling.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use deep_merge::{MergeError, MergeFailure, Mergeable, Merger, merge};
use parking_lot::Mutex;
use rstest::rstest;

#[derive(Clone, Default, Mergeable)]
struct Node {
    name: String,
    next: Option<Rc<RefCell<Node>>>,
}

fn node(name: &str) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node {
        name: name.into(),
        next: None,
    }))
}

fn next_of(owner: &Rc<RefCell<Node>>) -> Option<Rc<RefCell<Node>>> {
    owner.borrow().next.clone()
}

#[rstest]
fn two_node_cycle_terminates() -> Result<()> {
    let a = node("a");
    let b = node("b");
    a.borrow_mut().next = Some(Rc::clone(&b));
    b.borrow_mut().next = Some(Rc::clone(&a));

    let mut destination = Rc::new(RefCell::new(Node::default()));
    merge(&mut destination, &a)?;

    ensure!(destination.borrow().name == "a", "head was not merged");
    let second = next_of(&destination).ok_or_else(|| anyhow!("second node missing"))?;
    ensure!(second.borrow().name == "b", "second node was not merged");
    ensure!(
        !Rc::ptr_eq(&second, &b),
        "destination nodes are fresh allocations"
    );
    ensure!(
        next_of(&second).is_none(),
        "revisited node must leave the destination slot empty"
    );

    // Break the reference cycle so the test does not leak.
    a.borrow_mut().next = None;
    Ok(())
}

#[rstest]
fn self_cycle_behind_mutex_terminates() -> Result<()> {
    #[derive(Clone, Default, Mergeable)]
    struct Shared {
        value: u32,
        me: Option<Arc<Mutex<Shared>>>,
    }

    let looped = Arc::new(Mutex::new(Shared {
        value: 7,
        me: None,
    }));
    looped.lock().me = Some(Arc::clone(&looped));

    let mut destination = Arc::new(Mutex::new(Shared::default()));
    merge(&mut destination, &looped)?;

    let merged = destination.lock();
    ensure!(merged.value == 7, "value was not merged");
    ensure!(
        merged.me.is_none(),
        "revisited record must not allocate a destination slot"
    );
    drop(merged);

    looped.lock().me = None;
    Ok(())
}

#[rstest]
fn shared_subtree_reached_twice_is_merged_once() -> Result<()> {
    #[derive(Clone, Default, Mergeable)]
    struct Pair {
        left: Option<Rc<RefCell<Node>>>,
        right: Option<Rc<RefCell<Node>>>,
    }

    let shared = node("shared");
    let source = Pair {
        left: Some(Rc::clone(&shared)),
        right: Some(Rc::clone(&shared)),
    };
    let mut destination = Pair::default();
    merge(&mut destination, &source)?;

    let left = destination
        .left
        .as_ref()
        .map(|owner| owner.borrow().name.clone());
    let right = destination
        .right
        .as_ref()
        .map(|owner| owner.borrow().name.clone());
    ensure!(left.as_deref() == Some("shared"), "left: {left:?}");
    ensure!(right.is_none(), "right: {right:?}");
    Ok(())
}

#[rstest]
fn merging_an_owner_into_itself_changes_nothing() -> Result<()> {
    let owner = node("solo");
    let merged = Merger::new()
        .merge([Rc::clone(&owner), Rc::clone(&owner)])
        .map_err(MergeFailure::into_error)?;
    ensure!(Rc::ptr_eq(&merged, &owner), "owner was replaced");
    ensure!(owner.borrow().name == "solo", "target was modified");
    Ok(())
}

#[rstest]
fn overlay_cloned_from_defaults_shares_owners_without_conflict() -> Result<()> {
    #[derive(Clone, Default, Mergeable)]
    struct Pool {
        size: u32,
    }

    #[derive(Clone, Default, Mergeable)]
    struct Config {
        name: String,
        pool: Option<Rc<RefCell<Pool>>>,
    }

    let pool = Rc::new(RefCell::new(Pool { size: 4 }));
    let defaults = Config {
        name: "dev".into(),
        pool: Some(Rc::clone(&pool)),
    };
    let overlay = Config {
        name: "prod".into(),
        ..defaults.clone()
    };

    let merged = Merger::new()
        .merge([defaults, overlay])
        .map_err(MergeFailure::into_error)?;
    ensure!(merged.name == "prod", "name: {}", merged.name);
    let shared = merged
        .pool
        .ok_or_else(|| anyhow!("pool slot missing"))?;
    ensure!(Rc::ptr_eq(&shared, &pool), "pool owner was replaced");
    ensure!(pool.borrow().size == 4, "pool target was modified");
    Ok(())
}

#[rstest]
fn source_pointing_back_into_the_destination_reports_a_borrow_conflict() {
    let target = node("target");
    let source = node("source");
    source.borrow_mut().next = Some(Rc::clone(&target));

    let mut destination = Rc::clone(&target);
    let Err(error) = merge(&mut destination, &source) else {
        panic!("the destination cell is borrowed while its alias is read");
    };
    assert!(matches!(
        error.root_cause(),
        MergeError::BorrowConflict { .. }
    ));
    assert_eq!(target.borrow().name, "source");
}
