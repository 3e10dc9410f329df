//! Fixed-width attribute vectors: the array mapping a dictionary-encoded
//! column's row offset to a [`ValueId`].
//!
//! Grounded on `original_source/src/lib/storage/fitted_attribute_vector.hpp`:
//! a single concrete width is chosen once at build time and the vector never
//! changes width afterwards.

use crate::error::{Error, Result};
use crate::ids::ValueId;

/// Storage width of an attribute vector, in bytes. Chosen at
/// dictionary-build time from the dictionary's cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    One,
    Two,
    Four,
}

impl Width {
    pub fn bytes(&self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
        }
    }

    /// The sentinel a vector of this width reserves for "no such value id" —
    /// the maximum representable value at this width.
    pub fn invalid_value_id(&self) -> ValueId {
        match self {
            Width::One => u8::MAX as ValueId,
            Width::Two => u16::MAX as ValueId,
            Width::Four => u32::MAX,
        }
    }
}

/// Picks the narrowest width that can address `dictionary_len` distinct
/// values while still reserving its maximum as the invalid sentinel
/// (spec §3: strict `<`, not `<=`).
pub fn fitted_width_for(dictionary_len: usize) -> Result<Width> {
    if dictionary_len < (1usize << 8) - 1 {
        Ok(Width::One)
    } else if dictionary_len < (1usize << 16) - 1 {
        Ok(Width::Two)
    } else if dictionary_len < (1usize << 32) - 1 {
        Ok(Width::Four)
    } else {
        Err(Error::DictionaryTooLarge(dictionary_len))
    }
}

/// Is `id` the invalid sentinel for a vector of the given `width`? Centralizes
/// the "past the end" special-casing that spec §9 (Open Question 3) requires
/// everywhere a `ValueId` participates in an ordering comparison.
pub fn is_invalid(id: ValueId, width: Width) -> bool {
    id == width.invalid_value_id()
}

/// Polymorphic capability set over a fixed-width `ValueId` array.
pub trait AttributeVector: std::fmt::Debug {
    fn get(&self, i: usize) -> ValueId;
    fn set(&mut self, i: usize, value_id: ValueId);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn width(&self) -> Width;
    fn clone_box(&self) -> Box<dyn AttributeVector>;
}

impl Clone for Box<dyn AttributeVector> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

/// An [`AttributeVector`] backed by a contiguous `Vec<W>`.
#[derive(Debug, Clone)]
pub struct FittedAttributeVector<W> {
    data: Vec<W>,
}

macro_rules! impl_fitted_attribute_vector {
    ($w:ty, $width:expr) => {
        impl FittedAttributeVector<$w> {
            pub fn new(len: usize) -> Self {
                Self {
                    data: vec![0; len],
                }
            }
        }

        impl AttributeVector for FittedAttributeVector<$w> {
            fn get(&self, i: usize) -> ValueId {
                debug_assert!(i < self.data.len(), "out of bounds get() on attribute vector");
                self.data[i] as ValueId
            }

            fn set(&mut self, i: usize, value_id: ValueId) {
                debug_assert!(i < self.data.len(), "out of bounds set() on attribute vector");
                self.data[i] = value_id as $w;
            }

            fn len(&self) -> usize {
                self.data.len()
            }

            fn width(&self) -> Width {
                $width
            }

            fn clone_box(&self) -> Box<dyn AttributeVector> {
                Box::new(self.clone())
            }
        }
    };
}

impl_fitted_attribute_vector!(u8, Width::One);
impl_fitted_attribute_vector!(u16, Width::Two);
impl_fitted_attribute_vector!(u32, Width::Four);

/// Builds an attribute vector of the width fitted to `dictionary_len`.
pub fn new_fitted(dictionary_len: usize, len: usize) -> Result<Box<dyn AttributeVector>> {
    Ok(match fitted_width_for(dictionary_len)? {
        Width::One => Box::new(FittedAttributeVector::<u8>::new(len)),
        Width::Two => Box::new(FittedAttributeVector::<u16>::new(len)),
        Width::Four => Box::new(FittedAttributeVector::<u32>::new(len)),
    })
}
