//! Identity keys for reference tracking.
//!
//! Two handles have the same key exactly when they point at the same allocation as the same type,
//! so value-equal but distinct objects never collide.

use std::{any::TypeId, rc::Rc, sync::Arc};

/// Address and type of a tracked object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    address: usize,
    type_id: TypeId,
}

impl ObjectKey {
    fn of<T: ?Sized + 'static>(ptr: *const T) -> Self {
        Self {
            address: ptr.cast::<()>() as usize,
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Handles whose pointee identity can be tracked.
///
/// A `&T` borrowed from an `Rc<T>` or `Arc<T>` has the same key as the smart pointer itself.
/// Keys are only meaningful while the object is alive: a freed address may be reused. Zero-sized
/// values may share an address and should not be tracked.
pub trait Identity {
    fn key(&self) -> ObjectKey;
}

impl<T: ?Sized + 'static> Identity for &T {
    fn key(&self) -> ObjectKey {
        ObjectKey::of::<T>(*self)
    }
}

impl<T: ?Sized + 'static> Identity for Rc<T> {
    fn key(&self) -> ObjectKey {
        ObjectKey::of::<T>(Rc::as_ptr(self))
    }
}

impl<T: ?Sized + 'static> Identity for Arc<T> {
    fn key(&self) -> ObjectKey {
        ObjectKey::of::<T>(Arc::as_ptr(self))
    }
}
