//! Observation masks
//!
//! A [`Mask`] has the same shape as the tensor it describes. `true` marks an
//! observed entry, `false` a missing one. Decomposition routines read the
//! mask but never modify it.
//!
//! Masks are stored row-major, so a linear offset into the mask addresses the
//! same entry as the same offset into a contiguous [`DenseND`](crate::DenseND).

use scirs2_core::ndarray_ext::{Array, Dimension, IxDyn};
use scirs2_core::random::Rng;

/// Boolean N-dimensional mask of observed entries
///
/// # Examples
///
/// ```
/// use mncp_core::Mask;
///
/// let mask = Mask::from_vec(vec![true, false, true, true], &[2, 2]).unwrap();
/// assert_eq!(mask.n_observed(), 3);
/// assert_eq!(mask.missing_indices(), vec![1]);
/// assert!(!mask.is_observed(&[0, 1]));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Mask {
    data: Array<bool, IxDyn>,
}

impl Mask {
    /// Mask with every entry observed
    pub fn full(shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), true),
        }
    }

    /// Mask with every entry missing
    pub fn empty(shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), false),
        }
    }

    /// Build a mask from row-major flags
    pub fn from_vec(flags: Vec<bool>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if flags.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} mask entries, but got {}",
                shape,
                total,
                flags.len()
            );
        }
        let data = Array::from_shape_vec(IxDyn(shape), flags)?;
        Ok(Self { data })
    }

    /// Build a mask by evaluating `f` on every multi-index
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::Mask;
    ///
    /// // Hold out the diagonal
    /// let mask = Mask::from_fn(&[3, 3, 3], |idx| !(idx[0] == idx[1] && idx[1] == idx[2]));
    /// assert_eq!(mask.n_missing(), 3);
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> bool,
    {
        let data = Array::from_shape_fn(IxDyn(shape), |idx| f(idx.slice()));
        Self { data }
    }

    /// Observe each entry independently with probability `observed_fraction`
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::Mask;
    /// use scirs2_core::random::{SeedableRng, StdRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(0);
    /// let mask = Mask::bernoulli(&[10, 10, 10], 0.8, &mut rng);
    /// assert!(mask.n_observed() > 700 && mask.n_observed() < 900);
    /// ```
    pub fn bernoulli<R: Rng>(shape: &[usize], observed_fraction: f64, rng: &mut R) -> Self {
        let data = Array::from_shape_simple_fn(IxDyn(shape), || {
            rng.random::<f64>() < observed_fraction
        });
        Self { data }
    }

    /// Shape of the mask
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the mask has no entries at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the entry at `index` is observed. Out-of-bounds reads as missing.
    pub fn is_observed(&self, index: &[usize]) -> bool {
        index.len() == self.ndim() && self.data.get(IxDyn(index)).copied().unwrap_or(false)
    }

    /// Set the flag at `index`
    pub fn set(&mut self, index: &[usize], observed: bool) -> anyhow::Result<()> {
        let shape = self.shape().to_vec();
        if index.len() != shape.len() {
            anyhow::bail!("Index {:?} has wrong arity for mask of shape {:?}", index, shape);
        }
        match self.data.get_mut(IxDyn(index)) {
            Some(flag) => {
                *flag = observed;
                Ok(())
            }
            None => anyhow::bail!("Index {:?} out of bounds for mask of shape {:?}", index, shape),
        }
    }

    /// Number of observed entries
    pub fn n_observed(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Number of missing entries
    pub fn n_missing(&self) -> usize {
        self.len() - self.n_observed()
    }

    /// Row-major linear offsets of observed entries, ascending
    pub fn observed_indices(&self) -> Vec<usize> {
        self.indices_where(true)
    }

    /// Row-major linear offsets of missing entries, ascending
    pub fn missing_indices(&self) -> Vec<usize> {
        self.indices_where(false)
    }

    fn indices_where(&self, flag: bool) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b == flag).then_some(i))
            .collect()
    }

    /// Iterate the flags in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &bool> {
        self.data.iter()
    }

    /// Complement: observed entries become missing and vice versa
    pub fn inverted(&self) -> Self {
        Self {
            data: self.data.mapv(|b| !b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::random::{SeedableRng, StdRng};

    #[test]
    fn test_full_and_empty() {
        let full = Mask::full(&[2, 3, 4]);
        assert_eq!(full.n_observed(), 24);
        assert_eq!(full.n_missing(), 0);
        assert!(full.missing_indices().is_empty());

        let empty = Mask::empty(&[2, 3, 4]);
        assert_eq!(empty.n_observed(), 0);
        assert_eq!(empty.inverted(), full);
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Mask::from_vec(vec![true; 5], &[2, 3]).is_err());
        assert!(Mask::from_vec(vec![true; 6], &[2, 3]).is_ok());
    }

    #[test]
    fn test_indices_are_row_major() {
        let mut mask = Mask::full(&[2, 3, 4]);
        mask.set(&[1, 0, 2], false).unwrap();
        mask.set(&[0, 2, 3], false).unwrap();
        // 1*12 + 0*4 + 2 = 14, 0*12 + 2*4 + 3 = 11
        assert_eq!(mask.missing_indices(), vec![11, 14]);
        assert_eq!(mask.observed_indices().len(), 22);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut mask = Mask::full(&[2, 2]);
        assert!(mask.set(&[2, 0], false).is_err());
        assert!(mask.set(&[0], false).is_err());
        assert!(!mask.is_observed(&[5, 5]));
    }

    #[test]
    fn test_bernoulli_is_seeded() {
        let a = Mask::bernoulli(&[5, 5, 5], 0.5, &mut StdRng::seed_from_u64(3));
        let b = Mask::bernoulli(&[5, 5, 5], 0.5, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(Mask::bernoulli(&[4, 4], 1.0, &mut StdRng::seed_from_u64(0)).n_missing(), 0);
        assert_eq!(Mask::bernoulli(&[4, 4], 0.0, &mut StdRng::seed_from_u64(0)).n_observed(), 0);
    }
}
