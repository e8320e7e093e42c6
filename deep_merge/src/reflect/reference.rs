//! Reference implementations: `Option<T>`, `Box<T>`, `Rc<RefCell<T>>` and
//! `Arc<parking_lot::Mutex<T>>`.
//!
//! Only the shared owners are addressable. Their identity is the shared
//! allocation, so every clone of the same `Rc`/`Arc` reports the same handle.
//! Shared owners are never zero: an allocated owner is always "set", even
//! when its target is empty.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::{
    BorrowBusy, Identity, Mergeable, Reference, Referent, ReferentMut, Shape, ShapeMut,
    TypeIdentity, overwrite_with_clone,
};

impl<T> Mergeable for Option<T>
where
    T: Mergeable + Clone + Default,
{
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Reference(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T> Reference for Option<T>
where
    T: Mergeable + Clone + Default,
{
    fn referent_type(&self) -> TypeIdentity {
        TypeIdentity::of::<T>()
    }

    fn referent(&self) -> Result<Option<Referent<'_>>, BorrowBusy> {
        Ok(self.as_ref().map(|value| {
            let target: &dyn Mergeable = value;
            Box::new(target) as Referent<'_>
        }))
    }

    fn referent_mut(&mut self) -> Result<ReferentMut<'_>, BorrowBusy> {
        let target: &mut dyn Mergeable = self.get_or_insert_with(T::default);
        Ok(Box::new(target) as ReferentMut<'_>)
    }
}

impl<T> Mergeable for Box<T>
where
    T: Mergeable + Clone,
{
    fn is_zero(&self) -> bool {
        false
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Reference(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T> Reference for Box<T>
where
    T: Mergeable + Clone,
{
    fn referent_type(&self) -> TypeIdentity {
        TypeIdentity::of::<T>()
    }

    fn referent(&self) -> Result<Option<Referent<'_>>, BorrowBusy> {
        let target: &dyn Mergeable = &**self;
        Ok(Some(Box::new(target) as Referent<'_>))
    }

    fn referent_mut(&mut self) -> Result<ReferentMut<'_>, BorrowBusy> {
        let target: &mut dyn Mergeable = &mut **self;
        Ok(Box::new(target) as ReferentMut<'_>)
    }
}

impl<T: Mergeable> Mergeable for Rc<RefCell<T>> {
    fn is_zero(&self) -> bool {
        false
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Reference(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        // Assignment shares the owner, matching how the source refers to it.
        overwrite_with_clone(self, source)
    }
}

impl<T: Mergeable> Reference for Rc<RefCell<T>> {
    fn referent_type(&self) -> TypeIdentity {
        TypeIdentity::of::<T>()
    }

    fn referent(&self) -> Result<Option<Referent<'_>>, BorrowBusy> {
        let guard = self.try_borrow().map_err(|_| BorrowBusy)?;
        let target: Ref<'_, dyn Mergeable> = Ref::map(guard, |value| value as &dyn Mergeable);
        Ok(Some(Box::new(target) as Referent<'_>))
    }

    fn referent_mut(&mut self) -> Result<ReferentMut<'_>, BorrowBusy> {
        let guard = self.try_borrow_mut().map_err(|_| BorrowBusy)?;
        let target: RefMut<'_, dyn Mergeable> =
            RefMut::map(guard, |value| value as &mut dyn Mergeable);
        Ok(Box::new(target) as ReferentMut<'_>)
    }

    fn identity(&self) -> Option<Identity> {
        Some(Identity::of_allocation(Rc::as_ptr(self)))
    }
}

impl<T: Mergeable> Mergeable for Arc<Mutex<T>> {
    fn is_zero(&self) -> bool {
        false
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Reference(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<T: Mergeable> Reference for Arc<Mutex<T>> {
    fn referent_type(&self) -> TypeIdentity {
        TypeIdentity::of::<T>()
    }

    fn referent(&self) -> Result<Option<Referent<'_>>, BorrowBusy> {
        let guard = self.try_lock().ok_or(BorrowBusy)?;
        let target = MutexGuard::map(guard, |value| value as &mut dyn Mergeable);
        Ok(Some(Box::new(target) as Referent<'_>))
    }

    fn referent_mut(&mut self) -> Result<ReferentMut<'_>, BorrowBusy> {
        let guard = self.try_lock().ok_or(BorrowBusy)?;
        let target = MutexGuard::map(guard, |value| value as &mut dyn Mergeable);
        Ok(Box::new(target) as ReferentMut<'_>)
    }

    fn identity(&self) -> Option<Identity> {
        Some(Identity::of_allocation(Arc::as_ptr(self)))
    }
}
