//! Command-line surface for the merge demo.
//!
//! Every flag feeds a third operand that is merged over the built-in base
//! and overlay records. Flags left out stay empty, so they never override
//! the earlier operands.

use std::collections::BTreeMap;

use clap::{Parser, ValueEnum};
use serde_json::Value;

use crate::person::{Address, Person};

/// Output format for the merged record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// TOML document.
    Toml,
}

/// Merge a base person record with an overlay and optional CLI overrides.
#[derive(Debug, Default, Parser)]
#[command(name = "merge_demo", version, about)]
pub struct DemoCli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
    /// Override the name.
    #[arg(long)]
    pub name: Option<String>,
    /// Override the age.
    #[arg(long)]
    pub age: Option<u32>,
    /// Add a hobby; repeat to add several.
    #[arg(long = "hobby", value_name = "HOBBY")]
    pub hobbies: Vec<String>,
    /// Add a friend as `NAME=RELATION`; repeat to add several.
    #[arg(long = "friend", value_name = "NAME=RELATION", value_parser = parse_friend)]
    pub friends: Vec<(String, String)>,
    /// Set the free-form payload. Parsed as JSON when possible.
    #[arg(long)]
    pub extra: Option<String>,
    /// Skip the built-in overlay operand.
    #[arg(long)]
    pub no_overlay: bool,
}

impl DemoCli {
    /// Build the operand described by the flags.
    #[must_use]
    pub fn overrides(&self) -> Person {
        let address = (!self.hobbies.is_empty() || !self.friends.is_empty()).then(|| Address {
            hobbies: self.hobbies.clone(),
            friends: self.friends.iter().cloned().collect::<BTreeMap<_, _>>(),
            active: false,
        });
        Person {
            name: self.name.clone().unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            is_alive: false,
            extra: self.extra.as_deref().map_or(Value::Null, parse_extra),
            address,
        }
    }
}

fn parse_friend(raw: &str) -> Result<(String, String), String> {
    let Some((name, relation)) = raw.split_once('=') else {
        return Err(format!("expected NAME=RELATION, got `{raw}`"));
    };
    if name.trim().is_empty() {
        return Err(String::from("friend name must not be empty"));
    }
    Ok((name.trim().to_owned(), relation.trim().to_owned()))
}

fn parse_extra(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
