////////////////////////////////////////////////////////////////////////////////
// This file is part of "Ad Astra", an embeddable scripting programming       //
// language platform.                                                         //
//                                                                            //
// This work is proprietary software with source-available code.              //
//                                                                            //
// To copy, use, distribute, or contribute to this work, you must agree to    //
// the terms of the General License Agreement:                                //
//                                                                            //
// https://github.com/Eliah-Lakhin/ad-astra/blob/master/EULA.md               //
//                                                                            //
// The agreement grants a Basic Commercial License, allowing you to use       //
// this work in non-commercial and limited commercial products with a total   //
// gross revenue cap. To remove this commercial limit for one of your         //
// products, you must acquire a Full Commercial License.                      //
//                                                                            //
// If you contribute to the source code, documentation, or related materials, //
// you must grant me an exclusive license to these contributions.             //
// Contributions are governed by the "Contributions" section of the General   //
// License Agreement.                                                         //
//                                                                            //
// Copying the work in parts is strictly forbidden, except as permitted       //
// under the General License Agreement.                                       //
//                                                                            //
// If you do not or cannot agree to the terms of this Agreement,              //
// do not use this work.                                                      //
//                                                                            //
// This work is provided "as is", without any warranties, express or implied, //
// except where such disclaimers are legally invalid.                         //
//                                                                            //
// Copyright (c) 2024 Ilya Lakhin (Илья Александрович Лахин).                 //
// All rights reserved.                                                       //
////////////////////////////////////////////////////////////////////////////////

use std::{
    any::{type_name, Any, TypeId},
    cell::{Ref, RefCell, RefMut},
    fmt::{Debug, Formatter},
    rc::Rc,
};

use crate::runtime::{hints::short_type_name, RuntimeError, RuntimeResult};

/// A reference-counted wrapper around one native instance.
///
/// The Object remembers the [TypeId] and the name of the wrapped type, and
/// provides the unwrap facility that the dispatch layer uses to recover the
/// receiver of a bound method: a shared borrow for `&self` methods and an
/// exclusive borrow for `&mut self` methods.
///
/// Cloning the Object is cheap, and all clones refer to the same instance.
/// The borrows are checked at runtime. A conflicting borrow fails with
/// [RuntimeError::InstanceBusy] instead of aliasing the instance.
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

struct ObjectInner {
    id: TypeId,
    name: &'static str,
    data: RefCell<Box<dyn Any>>,
}

impl Debug for Object {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_fmt(format_args!("Object({})", self.0.name))
    }
}

impl PartialEq for Object {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Object {}

impl Object {
    /// Wraps a native instance into a new Object.
    #[inline]
    pub fn new<C: 'static>(instance: C) -> Self {
        Self(Rc::new(ObjectInner {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            data: RefCell::new(Box::new(instance)),
        }))
    }

    /// Returns true if the Object wraps an instance of type `C`.
    #[inline(always)]
    pub fn is<C: 'static>(&self) -> bool {
        self.0.id == TypeId::of::<C>()
    }

    /// Returns the full Rust name of the wrapped type.
    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.0.name
    }

    /// Returns the wrapped type name without the module path.
    #[inline(always)]
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.0.name)
    }

    /// Returns true if both Objects refer to the same instance.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the wrapped instance for read.
    ///
    /// Fails with [RuntimeError::ReceiverMismatch] if the instance is not of
    /// type `C`, and with [RuntimeError::InstanceBusy] if the instance is
    /// currently borrowed for write.
    pub fn borrow_ref<C: 'static>(&self) -> RuntimeResult<Ref<'_, C>> {
        self.check::<C>()?;

        let guard = self
            .0
            .data
            .try_borrow()
            .map_err(|_| RuntimeError::InstanceBusy {
                class: self.0.name,
                exclusive: false,
            })?;

        Ref::filter_map(guard, |data| (**data).downcast_ref::<C>())
            .map_err(|_| self.mismatch::<C>())
    }

    /// Borrows the wrapped instance for write.
    ///
    /// Fails with [RuntimeError::ReceiverMismatch] if the instance is not of
    /// type `C`, and with [RuntimeError::InstanceBusy] if the instance is
    /// currently borrowed.
    pub fn borrow_mut<C: 'static>(&self) -> RuntimeResult<RefMut<'_, C>> {
        self.check::<C>()?;

        let guard = self
            .0
            .data
            .try_borrow_mut()
            .map_err(|_| RuntimeError::InstanceBusy {
                class: self.0.name,
                exclusive: true,
            })?;

        RefMut::filter_map(guard, |data| (**data).downcast_mut::<C>())
            .map_err(|_| self.mismatch::<C>())
    }

    #[inline(always)]
    fn check<C: 'static>(&self) -> RuntimeResult<()> {
        match self.is::<C>() {
            true => Ok(()),
            false => Err(self.mismatch::<C>()),
        }
    }

    #[inline(always)]
    fn mismatch<C: 'static>(&self) -> RuntimeError {
        RuntimeError::ReceiverMismatch {
            expected: type_name::<C>(),
            actual: self.0.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{Object, RuntimeError};

    struct Counter(usize);

    #[test]
    fn test_object_borrows() {
        let object = Object::new(Counter(3));

        {
            let first = object.borrow_ref::<Counter>().unwrap();
            let second = object.borrow_ref::<Counter>().unwrap();

            assert_eq!(first.0 + second.0, 6);

            assert!(matches!(
                object.borrow_mut::<Counter>(),
                Err(RuntimeError::InstanceBusy {
                    exclusive: true,
                    ..
                }),
            ));
        }

        object.borrow_mut::<Counter>().unwrap().0 += 1;

        assert_eq!(object.borrow_ref::<Counter>().unwrap().0, 4);

        assert!(matches!(
            object.borrow_ref::<String>(),
            Err(RuntimeError::ReceiverMismatch { .. }),
        ));

        assert_eq!(object.short_name(), "Counter");
        assert!(object.ptr_eq(&object.clone()));
    }
}
