//! Unit tests for shape classification and the built-in implementations.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use parking_lot::Mutex;
use rstest::rstest;

use super::*;

#[rstest]
#[case(&7_i32 as &dyn Mergeable, Kind::Scalar)]
#[case(&String::from("x") as &dyn Mergeable, Kind::Scalar)]
#[case(&Some(1_u8) as &dyn Mergeable, Kind::Reference)]
#[case(&Box::new(1_u8) as &dyn Mergeable, Kind::Reference)]
#[case(&vec![1_u8] as &dyn Mergeable, Kind::OrderedSequence)]
#[case(&VecDeque::<u8>::new() as &dyn Mergeable, Kind::OrderedSequence)]
#[case(&[1_u8, 2] as &dyn Mergeable, Kind::FixedSequence)]
#[case(&BTreeMap::<String, u8>::new() as &dyn Mergeable, Kind::Mapping)]
#[case(&HashMap::<u8, u8>::new() as &dyn Mergeable, Kind::Mapping)]
fn classifies_builtin_types(#[case] value: &dyn Mergeable, #[case] expected: Kind) {
    assert_eq!(classify(value), expected);
}

#[rstest]
fn shared_owners_classify_as_references() {
    let local = Rc::new(RefCell::new(1_u8));
    let shared = Arc::new(Mutex::new(1_u8));
    assert_eq!(classify(&local), Kind::Reference);
    assert_eq!(classify(&shared), Kind::Reference);
}

#[rstest]
#[case(&0_u32 as &dyn Mergeable, true)]
#[case(&1_u32 as &dyn Mergeable, false)]
#[case(&String::new() as &dyn Mergeable, true)]
#[case(&false as &dyn Mergeable, true)]
#[case(&None::<u8> as &dyn Mergeable, true)]
#[case(&Some(0_u8) as &dyn Mergeable, false)]
#[case(&Vec::<u8>::new() as &dyn Mergeable, true)]
#[case(&[0_u8; 3] as &dyn Mergeable, true)]
#[case(&[0_u8, 1, 0] as &dyn Mergeable, false)]
#[case(&-0.0_f64 as &dyn Mergeable, false)]
#[case(&0.0_f64 as &dyn Mergeable, true)]
fn reports_zero_values(#[case] value: &dyn Mergeable, #[case] expected: bool) {
    assert_eq!(value.is_zero(), expected);
}

#[rstest]
fn shared_owner_is_never_zero() {
    let owner = Rc::new(RefCell::new(0_u8));
    assert!(!owner.is_zero());
}

#[rstest]
fn only_shared_owners_are_addressable() {
    assert!(is_addressable(&Rc::new(RefCell::new(1_u8))));
    assert!(is_addressable(&Arc::new(Mutex::new(1_u8))));
    assert!(!is_addressable(&Some(1_u8)));
    assert!(!is_addressable(&Box::new(1_u8)));
    assert!(!is_addressable(&1_u8));
}

#[rstest]
fn clones_of_a_shared_owner_share_identity() {
    let owner = Arc::new(Mutex::new(String::new()));
    let alias = Arc::clone(&owner);
    assert_eq!(Mergeable::identity(&owner), Mergeable::identity(&alias));
}

#[rstest]
fn length_covers_sequences_and_mappings() {
    assert_eq!(length(&vec![1_u8, 2, 3]), Some(3));
    assert_eq!(length(&[0_u8; 5]), Some(5));
    assert_eq!(length(&BTreeMap::from([(1_u8, 2_u8)])), Some(1));
    assert_eq!(length(&7_u8), None);
    assert_eq!(length(&Some(vec![1_u8])), None);
}

#[rstest]
#[case(&1_u8 as &dyn Mergeable, &2_u8 as &dyn Mergeable, Compatibility::Same)]
#[case(&1_u8 as &dyn Mergeable, &Some(2_u8) as &dyn Mergeable, Compatibility::UnwrapSource)]
#[case(&Some(1_u8) as &dyn Mergeable, &2_u8 as &dyn Mergeable, Compatibility::UnwrapDestination)]
#[case(&1_u8 as &dyn Mergeable, &2_u16 as &dyn Mergeable, Compatibility::Mismatch)]
#[case(&1_u8 as &dyn Mergeable, &Some(Some(2_u8)) as &dyn Mergeable, Compatibility::Mismatch)]
fn reconciles_types(
    #[case] destination: &dyn Mergeable,
    #[case] source: &dyn Mergeable,
    #[case] expected: Compatibility,
) {
    assert_eq!(compatibility(destination, source), expected);
}

#[rstest]
fn overwrite_requires_matching_type() {
    let mut destination = String::from("old");
    assert!(!destination.overwrite_from(&7_u8));
    assert_eq!(destination, "old");
    assert!(destination.overwrite_from(&String::from("new")));
    assert_eq!(destination, "new");
}

#[rstest]
fn option_referent_mut_allocates_default() -> Result<()> {
    let mut value: Option<Vec<u8>> = None;
    {
        let ShapeMut::Reference(reference) = value.shape_mut() else {
            return Err(anyhow!("options are references"));
        };
        let target = reference
            .referent_mut()
            .map_err(|err| anyhow!("option referents never conflict: {err}"))?;
        ensure!(target.is_zero(), "fresh referent should be empty");
    }
    ensure!(value == Some(Vec::new()), "option was not filled: {value:?}");
    Ok(())
}

#[rstest]
fn busy_cell_refuses_borrow() -> Result<()> {
    let owner = Rc::new(RefCell::new(1_u8));
    let _guard = owner.borrow_mut();
    let Shape::Reference(reference) = owner.shape() else {
        return Err(anyhow!("shared owners are references"));
    };
    ensure!(
        matches!(reference.referent(), Err(BorrowBusy)),
        "borrow should be refused while mutably borrowed"
    );
    Ok(())
}

#[rstest]
fn mapping_merge_entry_rejects_foreign_key_type() -> Result<()> {
    let mut map = BTreeMap::from([(String::from("a"), 1_u8)]);
    let ShapeMut::Mapping(mapping) = map.shape_mut() else {
        return Err(anyhow!("maps are mappings"));
    };
    let outcome = mapping.merge_entry(&7_u8, &mut |_| Ok(()));
    ensure!(outcome.is_none(), "foreign key type should be refused");
    Ok(())
}

#[rstest]
fn mapping_merge_entry_discards_failed_insert() -> Result<()> {
    let mut map: BTreeMap<String, u8> = BTreeMap::new();
    {
        let ShapeMut::Mapping(mapping) = map.shape_mut() else {
            return Err(anyhow!("maps are mappings"));
        };
        let outcome = mapping.merge_entry(&String::from("new"), &mut |_| {
            Err(crate::MergeError::custom(&crate::FieldPath::root(), "refused"))
        });
        ensure!(matches!(outcome, Some(Err(_))), "merge error should surface");
    }
    ensure!(map.is_empty(), "failed entries must not be stored");
    Ok(())
}

#[rstest]
fn operand_display_names_type_and_kind() {
    let rendered = Operand::of(&vec![1_u8]).to_string();
    assert!(rendered.starts_with("alloc::vec::Vec<u8>"), "{rendered}");
    assert!(rendered.ends_with("(ordered sequence)"), "{rendered}");
}

#[rstest]
fn downcasts_through_trait_object() {
    let value: &dyn Mergeable = &42_u16;
    assert!(value.is::<u16>());
    assert_eq!(value.downcast_ref::<u16>(), Some(&42));
    assert!(value.downcast_ref::<u32>().is_none());
}
