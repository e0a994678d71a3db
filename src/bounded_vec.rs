use std::collections::VecDeque;

/// A deque that maintains a maximum capacity by removing oldest elements
#[derive(Debug, Clone)]
pub struct BoundedVec<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedVec<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the bound and immediately re-applies it, dropping the oldest
    /// elements if the current contents exceed the new capacity.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict();
    }

    /// Appends one element to the newest side and returns the length after
    /// eviction. With capacity 0 the element is dropped straight away.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push_back(item);
        self.evict();
        self.items.len()
    }

    /// Appends all elements in order, then removes the oldest excess in a
    /// single drain rather than element by element. A call supplying more
    /// items than the capacity keeps only the trailing `capacity` of them.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        self.items.extend(items);
        self.evict();
        self.items.len()
    }

    /// Indexed access with the usual negative-from-end convention: 0 is the
    /// oldest retained element, -1 the newest. Out of range yields None.
    pub fn at(&self, index: isize) -> Option<&T> {
        let idx = if index < 0 {
            self.items.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The newest `n` elements (or fewer, if the buffer holds fewer), oldest
    /// first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }

    fn evict(&mut self) {
        let len = self.items.len();
        if len > self.capacity {
            self.items.drain(..len - self.capacity);
        }
    }
}
