/// Three 1-based vertex indices into the owning store's vertex pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
}

impl Triangle {
    /// Creates a triangle from three 1-based vertex indices.
    #[must_use]
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }

    /// The three indices in winding order.
    #[must_use]
    pub fn indices(&self) -> [usize; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Returns this triangle with every index shifted by `offset`.
    #[must_use]
    pub fn offset(&self, offset: usize) -> Self {
        Self::new(self.v1 + offset, self.v2 + offset, self.v3 + offset)
    }

    /// Returns this triangle with the winding reversed (`v1` and `v3` swapped).
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.v3, self.v2, self.v1)
    }
}

impl From<[usize; 3]> for Triangle {
    fn from([v1, v2, v3]: [usize; 3]) -> Self {
        Self::new(v1, v2, v3)
    }
}
