//! Scalar implementations: values the engine treats as opaque and merges by
//! overwriting.

use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

use super::{Mergeable, Shape, ShapeMut, is_default, overwrite_with_clone};

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Mergeable for $ty {
                fn is_zero(&self) -> bool {
                    is_default(self)
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn shape_mut(&mut self) -> ShapeMut<'_> {
                    ShapeMut::Scalar
                }

                fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
                    overwrite_with_clone(self, source)
                }
            }
        )*
    };
}

// Floats are zero only for positive zero, so `-0.0` still overwrites.
macro_rules! impl_float_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Mergeable for $ty {
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar
                }

                fn shape_mut(&mut self) -> ShapeMut<'_> {
                    ShapeMut::Scalar
                }

                fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
                    overwrite_with_clone(self, source)
                }
            }
        )*
    };
}

impl_scalar!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    String,
    &'static str,
    Cow<'static, str>,
    Duration,
    PathBuf,
);

impl_float_scalar!(f32, f64);

#[cfg(feature = "serde_json")]
impl Mergeable for serde_json::Value {
    fn is_zero(&self) -> bool {
        self.is_null()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Scalar
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}
