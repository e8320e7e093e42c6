//! Shared record types for integration tests.

use std::collections::BTreeMap;

use deep_merge::Mergeable;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Mergeable)]
pub struct Address {
    pub hobbies: Vec<String>,
    pub friends: BTreeMap<String, String>,
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Mergeable)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub address: Option<Address>,
    pub is_alive: bool,
    pub extra: Value,
}

pub fn alice() -> Person {
    Person {
        name: "Alice".into(),
        age: 30,
        address: Some(Address {
            active: true,
            ..Address::default()
        }),
        is_alive: true,
        extra: Value::Null,
    }
}

pub fn bob_overlay() -> Person {
    Person {
        name: "Bob".into(),
        address: Some(Address {
            hobbies: vec!["Swimming".into()],
            friends: BTreeMap::from([("Tom".into(), "Neighbor".into())]),
            active: false,
        }),
        extra: json!("Extra Data"),
        ..Person::default()
    }
}

pub fn merged_person() -> Person {
    Person {
        name: "Bob".into(),
        age: 30,
        address: Some(Address {
            hobbies: vec!["Swimming".into()],
            friends: BTreeMap::from([("Tom".into(), "Neighbor".into())]),
            active: true,
        }),
        is_alive: true,
        extra: json!("Extra Data"),
    }
}
