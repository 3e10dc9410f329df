//! [`DictionaryColumn`]: order-preserving dictionary compression. Built once
//! from a [`ValueColumn`] and immutable thereafter.
//!
//! Grounded on `original_source/src/lib/storage/dictionary_column.hpp`'s
//! build algorithm (sorted unique dictionary, side map from value to
//! `ValueId` to avoid repeated binary search on duplicates) and its
//! `lower_bound`/`upper_bound` contract.

use std::collections::HashMap;

use tracing::debug;

use crate::attribute_vector::{new_fitted, AttributeVector};
use crate::column::element::ColumnElement;
use crate::column::value_column::ValueColumn;
use crate::error::{Error, Result};
use crate::ids::ValueId;
use crate::value::Value;

#[derive(Debug)]
pub struct DictionaryColumn<T> {
    dictionary: Vec<T>,
    attribute_vector: Box<dyn AttributeVector>,
}

impl<T: Clone> Clone for DictionaryColumn<T> {
    fn clone(&self) -> Self {
        Self {
            dictionary: self.dictionary.clone(),
            attribute_vector: self.attribute_vector.clone_box(),
        }
    }
}

impl<T: ColumnElement> DictionaryColumn<T> {
    /// Builds a dictionary column from a value column, preserving row order.
    pub fn from_value_column(source: &ValueColumn<T>) -> Result<Self> {
        let values = source.values();

        let mut dictionary: Vec<T> = values.to_vec();
        dictionary.sort_by(|a, b| a.key().cmp(&b.key()));
        dictionary.dedup_by(|a, b| a.key() == b.key());

        let mut attribute_vector = new_fitted(dictionary.len(), values.len())?;

        debug!(
            distinct = dictionary.len(),
            rows = values.len(),
            width = attribute_vector.width().bytes(),
            "built dictionary column"
        );

        // Side map from value to ValueId avoids repeated binary search for
        // duplicate values within the source column.
        let mut seen: HashMap<T::Key, ValueId> = HashMap::new();
        for (i, value) in values.iter().enumerate() {
            let key = value.key();
            let id = match seen.get(&key) {
                Some(&id) => id,
                None => {
                    let id = dictionary
                        .binary_search_by(|probe| probe.key().cmp(&key))
                        .expect("value must be present in its own dictionary") as ValueId;
                    seen.insert(key, id);
                    id
                }
            };
            attribute_vector.set(i, id);
        }

        Ok(Self {
            dictionary,
            attribute_vector,
        })
    }

    pub fn element_at(&self, i: usize) -> Value {
        let id = self.attribute_vector.get(i);
        self.dictionary[id as usize].to_value()
    }

    pub fn get(&self, i: usize) -> T {
        let id = self.attribute_vector.get(i);
        self.dictionary[id as usize].clone()
    }

    /// Undefined for `INVALID_VALUE_ID`, per spec.
    pub fn value_by_value_id(&self, id: ValueId) -> T {
        self.dictionary[id as usize].clone()
    }

    /// First `ValueId` whose dictionary entry is `>= value`, or the
    /// width-relative invalid sentinel if none exists.
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let key = value.key();
        let idx = self.dictionary.partition_point(|probe| probe.key() < key);
        self.id_or_invalid(idx)
    }

    /// First `ValueId` whose dictionary entry is `> value`, or the
    /// width-relative invalid sentinel if none exists.
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let key = value.key();
        let idx = self.dictionary.partition_point(|probe| probe.key() <= key);
        self.id_or_invalid(idx)
    }

    fn id_or_invalid(&self, idx: usize) -> ValueId {
        if idx >= self.dictionary.len() {
            self.attribute_vector.width().invalid_value_id()
        } else {
            idx as ValueId
        }
    }

    pub fn attribute_vector(&self) -> &dyn AttributeVector {
        self.attribute_vector.as_ref()
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn size(&self) -> usize {
        self.attribute_vector.len()
    }

    pub fn append_value(&mut self, _value: &Value) -> Result<()> {
        Err(Error::Immutable)
    }
}
