//! Sequence implementations: `Vec<T>` and `VecDeque<T>` as ordered
//! sequences, `[T; N]` as fixed sequences.

use std::collections::VecDeque;

use super::{
    FixedSequence, Mergeable, OrderedSequence, Shape, ShapeMut, overwrite_with_clone,
};

impl<T> Mergeable for Vec<T>
where
    T: Mergeable + Clone + Default,
{
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::OrderedSequence(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::OrderedSequence(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T> OrderedSequence for Vec<T>
where
    T: Mergeable + Clone + Default,
{
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Mergeable> {
        <[T]>::get(self, index).map(|value| value as &dyn Mergeable)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable> {
        <[T]>::get_mut(self, index).map(|value| value as &mut dyn Mergeable)
    }

    fn grow_to(&mut self, len: usize) {
        if Self::len(self) < len {
            self.resize_with(len, T::default);
        }
    }
}

impl<T> Mergeable for VecDeque<T>
where
    T: Mergeable + Clone + Default,
{
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::OrderedSequence(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::OrderedSequence(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T> OrderedSequence for VecDeque<T>
where
    T: Mergeable + Clone + Default,
{
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Mergeable> {
        Self::get(self, index).map(|value| value as &dyn Mergeable)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable> {
        Self::get_mut(self, index).map(|value| value as &mut dyn Mergeable)
    }

    fn grow_to(&mut self, len: usize) {
        if Self::len(self) < len {
            self.resize_with(len, T::default);
        }
    }
}

impl<T, const N: usize> Mergeable for [T; N]
where
    T: Mergeable + Clone,
{
    fn is_zero(&self) -> bool {
        self.iter().all(Mergeable::is_zero)
    }

    fn shape(&self) -> Shape<'_> {
        Shape::FixedSequence(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::FixedSequence(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T, const N: usize> FixedSequence for [T; N]
where
    T: Mergeable + Clone,
{
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Mergeable> {
        self.as_slice().get(index).map(|value| value as &dyn Mergeable)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Mergeable> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|value| value as &mut dyn Mergeable)
    }
}
