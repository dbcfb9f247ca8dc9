use std::fmt;
use std::vec;

/// `GroupValues` is the lazy, single-pass sequence of values grouped under one key.
///
/// It can be iterated exactly once; it is neither `Clone` nor restartable.
pub struct GroupValues<V> {
    inner: vec::IntoIter<V>,
}

impl<V> GroupValues<V> {
    pub(crate) fn new(values: Vec<V>) -> Self {
        GroupValues {
            inner: values.into_iter(),
        }
    }
}

impl<V> Iterator for GroupValues<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for GroupValues<V> {}

impl<V: fmt::Debug> fmt::Debug for GroupValues<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

/// The `IntermediateInputKV` is a struct for passing input data to a `Reduce` or `Combine`.
///
/// `IntermediateInputKV` is a thin wrapper around a `(Key, GroupValues<Value>)`,
/// used for creating a clearer API.
/// It can be constructed normally or using `IntermediateInputKV::new()`.
#[derive(Debug)]
pub struct IntermediateInputKV<K, V> {
    pub key: K,
    pub values: GroupValues<V>,
}

impl<K, V> IntermediateInputKV<K, V> {
    pub fn new(key: K, values: Vec<V>) -> Self {
        IntermediateInputKV {
            key,
            values: GroupValues::new(values),
        }
    }
}
