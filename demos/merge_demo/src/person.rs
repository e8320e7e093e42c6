//! The record merged by the demo and its built-in operands.

use std::collections::BTreeMap;

use deep_merge::{MergeFailure, Mergeable, Merger};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::Result;

/// Where a person lives and who they know there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Mergeable)]
pub struct Address {
    /// Pastimes, merged by position.
    pub hobbies: Vec<String>,
    /// Whether the address is current.
    pub active: bool,
    /// Friends keyed by name, valued by relation.
    pub friends: BTreeMap<String, String>,
}

/// A person record with a nested, optional address.
///
/// Scalars come before tables so the record also renders as TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Mergeable)]
pub struct Person {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Whether the person is alive.
    pub is_alive: bool,
    /// Free-form payload.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub extra: Value,
    /// Home address, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// The base record: a name, an age and an active address.
#[must_use]
pub fn base() -> Person {
    Person {
        name: String::from("Alice"),
        age: 30,
        is_alive: true,
        extra: Value::Null,
        address: Some(Address {
            active: true,
            ..Address::default()
        }),
    }
}

/// An overlay that renames the person and fills in the address.
#[must_use]
pub fn overlay() -> Person {
    Person {
        name: String::from("Bob"),
        extra: Value::String(String::from("Extra Data")),
        address: Some(Address {
            hobbies: vec![String::from("Swimming")],
            friends: BTreeMap::from([(String::from("Tom"), String::from("Neighbor"))]),
            active: false,
        }),
        ..Person::default()
    }
}

/// Fold `operands` left to right into one record.
///
/// # Errors
///
/// Returns [`crate::error::DemoError::Merge`] when an operand cannot be
/// merged.
pub fn merge_all(operands: Vec<Person>) -> Result<Person> {
    info!(operands = operands.len(), "merging person records");
    let merged = Merger::new()
        .merge(operands)
        .map_err(MergeFailure::into_error)?;
    debug!(name = %merged.name, age = merged.age, "merged person record");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    //! Unit tests for the demo operands.

    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn base_and_overlay_merge_to_bob() -> Result<()> {
        let merged = merge_all(vec![base(), overlay()])?;
        ensure!(merged.name == "Bob", "unexpected name {}", merged.name);
        ensure!(merged.age == 30, "age should be kept");
        ensure!(merged.is_alive, "is_alive should be kept");
        let address = merged.address.unwrap_or_default();
        ensure!(address.active, "active flag should be kept");
        ensure!(address.hobbies == ["Swimming"], "unexpected hobbies");
        Ok(())
    }

    #[rstest]
    fn empty_operand_list_yields_default() -> Result<()> {
        let merged = merge_all(Vec::new())?;
        ensure!(merged == Person::default(), "expected the default record");
        Ok(())
    }
}
