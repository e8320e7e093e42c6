//! Trybuild fixture verifying `#[mergeable(crate = "...")]` works with a
//! renamed import.

use deep_merge as merge_alias;
use merge_alias::{Mergeable, Merger};

#[derive(Clone, Default, Mergeable)]
#[mergeable(crate = "merge_alias")]
struct Aliased {
    value: String,
    count: u32,
}

fn main() {
    let merged = Merger::new().merge([Aliased::default(), Aliased::default()]);
    let _: Result<Aliased, merge_alias::MergeFailure<Aliased>> = merged;
}
