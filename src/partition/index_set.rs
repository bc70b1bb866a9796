/// IndexSet is a subset of `0..num_elems` with O(1) insert/remove/contains
/// and a dense slice view for uniform sampling.
#[derive(Debug, Clone)]
pub(crate) struct IndexSet {
    elems: Vec<usize>,
    position: Vec<Option<usize>>, // position[e] = Some(i) iff elems[i] == e
}

impl IndexSet {
    /// Create an empty set over a universe of `num_elems` elements.
    pub(crate) fn new(num_elems: usize) -> Self {
        Self { elems: Vec::new(), position: vec![None; num_elems] }
    }

    #[inline] pub(crate) fn len(&self) -> usize { self.elems.len() }

    #[cfg(test)]
    #[inline] pub(crate) fn is_empty(&self) -> bool { self.elems.is_empty() }

    #[inline]
    pub(crate) fn contains(&self, elem: usize) -> bool {
        debug_assert!(elem < self.position.len(), "element out of range");
        self.position[elem].is_some()
    }

    /// Elements currently present; order depends on insertion/removal history.
    #[inline] pub(crate) fn as_slice(&self) -> &[usize] { &self.elems }

    /// Insert `elem`; no-op if already present.
    pub(crate) fn insert(&mut self, elem: usize) {
        debug_assert!(elem < self.position.len(), "element out of range");
        if self.position[elem].is_none() {
            self.position[elem] = Some(self.elems.len());
            self.elems.push(elem);
        }
    }

    /// Remove `elem` by swapping in the last element; no-op if absent.
    pub(crate) fn remove(&mut self, elem: usize) {
        if let Some(pos) = self.position[elem].take() {
            let last = self.elems.pop().unwrap();
            if pos < self.elems.len() {
                self.elems[pos] = last;
                self.position[last] = Some(pos);
            }
        }
    }

    /// Insert or remove `elem` so that membership equals `present`.
    #[inline]
    pub(crate) fn set(&mut self, elem: usize, present: bool) {
        if present { self.insert(elem) } else { self.remove(elem) }
    }
}
