//! Trybuild fixture covering every derive form that should compile.

use std::collections::HashMap;

use deep_merge::{Mergeable, Merger};

#[derive(Clone, Default, Mergeable)]
struct Named {
    label: String,
    #[mergeable(skip)]
    cached: u64,
}

#[derive(Clone, Default, Mergeable)]
struct Tuple(u8, Vec<u16>);

#[derive(Clone, Default, Mergeable)]
struct Unit;

#[derive(Clone, Default, Mergeable)]
struct Generic<T>
where
    T: Clone + Default,
{
    inner: T,
    by_key: HashMap<String, T>,
}

#[derive(Clone, Copy, Default, PartialEq, Mergeable)]
#[mergeable(scalar)]
enum Level {
    #[default]
    Low,
    High,
}

#[derive(Clone, Default, PartialEq, Mergeable)]
#[mergeable(scalar)]
struct Opaque {
    raw: Vec<u8>,
}

fn main() {
    let _: Option<Named> = Merger::new().merge([Named::default()]).ok();
    let _: Option<Tuple> = Merger::new().merge([Tuple(1, vec![2])]).ok();
    let _: Option<Unit> = Merger::new().merge([Unit, Unit]).ok();
    let _: Option<Generic<Named>> = Merger::new().merge([Generic::default()]).ok();
    let _: Option<Level> = Merger::new().merge([Level::Low, Level::High]).ok();
    let _: Option<Opaque> = Merger::new().merge([Opaque::default()]).ok();
}
