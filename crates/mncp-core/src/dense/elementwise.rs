//! Element-wise difference of two tensors

use super::types::DenseND;
use scirs2_core::numeric::Num;

impl<'a, T> std::ops::Sub<&'a DenseND<T>> for &'a DenseND<T>
where
    T: Clone + Num,
{
    type Output = DenseND<T>;

    /// Element-wise difference.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    fn sub(self, rhs: &'a DenseND<T>) -> DenseND<T> {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "Shape mismatch in subtraction: {:?} vs {:?}",
            self.shape(),
            rhs.shape()
        );
        DenseND {
            data: &self.data - &rhs.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub() {
        let a = DenseND::from_vec(vec![5.0, 7.0, 9.0], &[3]).unwrap();
        let b = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        assert_eq!((&a - &b).to_vec(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "Shape mismatch")]
    fn test_sub_shape_mismatch_panics() {
        let a = DenseND::<f64>::zeros(&[2, 3]);
        let b = DenseND::<f64>::zeros(&[3, 2]);
        let _ = &a - &b;
    }
}
