use super::error::FilterTreeError;
use super::FileFilter;

/// Ordered, owned child list of a composite filter. Duplicates are allowed and
/// insertion order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterList<T> {
    items: Vec<T>,
}

impl<T> Default for FilterList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> FilterList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes the first child equal to `item`. Returns false, leaving the
    /// list untouched, when there is none.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.items.iter().position(|existing| existing == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn remove_at(&mut self, index: usize) -> Result<T, FilterTreeError> {
        if index >= self.items.len() {
            return Err(FilterTreeError::index_out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// Swaps in `item` at `index` and hands back the previous child.
    pub fn replace_at(&mut self, index: usize, item: T) -> Result<T, FilterTreeError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| FilterTreeError::index_out_of_range(index, len))?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> FromIterator<T> for FilterList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Entry of a [`FileFilter::Chain`]: when `filter` matches, the chain stops
/// and answers `verdict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub filter: FileFilter,
    pub verdict: Verdict,
}

impl ChainLink {
    pub fn accept(filter: FileFilter) -> Self {
        Self {
            filter,
            verdict: Verdict::Accept,
        }
    }

    pub fn reject(filter: FileFilter) -> Self {
        Self {
            filter,
            verdict: Verdict::Reject,
        }
    }
}
