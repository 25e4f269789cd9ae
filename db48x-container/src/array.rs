//! Vectors and matrices (spec.md §4.4, §6.3): a dense row-major store with
//! element-wise arithmetic, the standard linear-algebra operators, and the
//! rectangular/polar/cylindrical/spherical coordinate conversions.

use alloc::vec::Vec;
use core::ops::{
    Add,
    Mul,
    Neg,
    Sub,
};
use db48x_object::ErrorKind;

/// A dense row-major vector (1 row) or matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Array<T> {
    /// Build a row vector from `values`.
    pub fn from_vector(values: Vec<T>) -> Self {
        let cols = values.len();
        Array { rows: 1, cols, data: values }
    }

    /// Build a matrix from `rows` rows of `cols` columns each, row-major.
    pub fn from_matrix(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ErrorKind> {
        if data.len() != rows * cols {
            return Err(ErrorKind::InvalidDimension);
        }
        Ok(Array { rows, cols, data })
    }

    /// `CON`: a matrix of the given shape, every entry equal to `value`.
    pub fn con(rows: usize, cols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Array {
            rows,
            cols,
            data: alloc::vec![value; rows * cols],
        }
    }

    /// `IDN`: the `n`×`n` identity matrix.
    pub fn idn(n: usize, zero: T, one: T) -> Self
    where
        T: Clone,
    {
        let mut data = alloc::vec![zero; n * n];
        for i in 0..n {
            data[i * n + i] = one.clone();
        }
        Array { rows: n, cols: n, data }
    }

    /// `RANM`: a matrix of the given shape filled by repeated calls to
    /// `generator`.
    pub fn ranm(rows: usize, cols: usize, mut generator: impl FnMut() -> T) -> Self {
        let data = (0..rows * cols).map(|_| generator()).collect();
        Array { rows, cols, data }
    }

    /// The shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` for a single-row array.
    pub fn is_vector(&self) -> bool {
        self.rows == 1
    }

    /// The element at 1-based `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, ErrorKind> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(ErrorKind::IndexOutOfRange);
        }
        Ok(&self.data[(row - 1) * self.cols + (col - 1)])
    }

    /// Replace the element at 1-based `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), ErrorKind> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(ErrorKind::IndexOutOfRange);
        }
        self.data[(row - 1) * self.cols + (col - 1)] = value;
        Ok(())
    }

    /// Flatten to a single row vector, `→V`-style.
    pub fn to_vector(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    /// Transpose.
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c].clone());
            }
        }
        Array {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Conjugate transpose: transpose, then apply `conj` to every element
    /// (the identity function for real element types).
    pub fn conjugate_transpose(&self, conj: impl Fn(&T) -> T) -> Self
    where
        T: Clone,
    {
        let transposed = self.transpose_ref();
        Array {
            rows: transposed.0,
            cols: transposed.1,
            data: transposed.2.iter().map(&conj).collect(),
        }
    }

    fn transpose_ref(&self) -> (usize, usize, Vec<T>)
    where
        T: Clone,
    {
        let t = self.transpose();
        (t.rows, t.cols, t.data)
    }

    /// Element-wise addition; both arrays must share a shape.
    pub fn add(&self, other: &Array<T>) -> Result<Array<T>, ErrorKind>
    where
        T: Clone + Add<Output = T>,
    {
        self.zip_with(other, |a, b| a.clone() + b.clone())
    }

    /// Element-wise subtraction; both arrays must share a shape.
    pub fn sub(&self, other: &Array<T>) -> Result<Array<T>, ErrorKind>
    where
        T: Clone + Sub<Output = T>,
    {
        self.zip_with(other, |a, b| a.clone() - b.clone())
    }

    fn zip_with(&self, other: &Array<T>, f: impl Fn(&T, &T) -> T) -> Result<Array<T>, ErrorKind>
    where
        T: Clone,
    {
        if self.shape() != other.shape() {
            return Err(ErrorKind::InvalidDimension);
        }
        let data = self.data.iter().zip(other.data.iter()).map(|(a, b)| f(a, b)).collect();
        Ok(Array {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Scale every element by `scalar`.
    pub fn scale(&self, scalar: &T) -> Array<T>
    where
        T: Clone + Mul<Output = T>,
    {
        Array {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v.clone() * scalar.clone()).collect(),
        }
    }

    /// Matrix multiplication: `self`'s column count must equal `other`'s
    /// row count.
    pub fn matmul(&self, other: &Array<T>, zero: &T) -> Result<Array<T>, ErrorKind>
    where
        T: Clone + Add<Output = T> + Mul<Output = T>,
    {
        if self.cols != other.rows {
            return Err(ErrorKind::InvalidDimension);
        }
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut sum = zero.clone();
                for k in 0..self.cols {
                    sum = sum + self.data[r * self.cols + k].clone() * other.data[k * other.cols + c].clone();
                }
                data.push(sum);
            }
        }
        Ok(Array {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Dot product of two row vectors of equal length.
    pub fn dot(&self, other: &Array<T>, zero: &T) -> Result<T, ErrorKind>
    where
        T: Clone + Add<Output = T> + Mul<Output = T>,
    {
        if !self.is_vector() || !other.is_vector() || self.cols != other.cols {
            return Err(ErrorKind::InvalidDimension);
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(zero.clone(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }

    /// Cross product of two 3-element row vectors.
    pub fn cross(&self, other: &Array<T>) -> Result<Array<T>, ErrorKind>
    where
        T: Clone + Sub<Output = T> + Mul<Output = T>,
    {
        if !self.is_vector() || !other.is_vector() || self.cols != 3 || other.cols != 3 {
            return Err(ErrorKind::InvalidDimension);
        }
        let a = &self.data;
        let b = &other.data;
        Ok(Array::from_vector(alloc::vec![
            a[1].clone() * b[2].clone() - a[2].clone() * b[1].clone(),
            a[2].clone() * b[0].clone() - a[0].clone() * b[2].clone(),
            a[0].clone() * b[1].clone() - a[1].clone() * b[0].clone(),
        ]))
    }

    /// `ROW+`: insert `row` as a new row at 1-based position `at`.
    pub fn row_insert(&self, at: usize, row: &[T]) -> Result<Array<T>, ErrorKind>
    where
        T: Clone,
    {
        if row.len() != self.cols || at == 0 || at > self.rows + 1 {
            return Err(ErrorKind::InvalidDimension);
        }
        let mut data = Vec::with_capacity(self.data.len() + self.cols);
        data.extend_from_slice(&self.data[..(at - 1) * self.cols]);
        data.extend_from_slice(row);
        data.extend_from_slice(&self.data[(at - 1) * self.cols..]);
        Ok(Array {
            rows: self.rows + 1,
            cols: self.cols,
            data,
        })
    }

    /// `COL+`: insert `col` as a new column at 1-based position `at`.
    pub fn col_insert(&self, at: usize, col: &[T]) -> Result<Array<T>, ErrorKind>
    where
        T: Clone,
    {
        if col.len() != self.rows || at == 0 || at > self.cols + 1 {
            return Err(ErrorKind::InvalidDimension);
        }
        let new_cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for r in 0..self.rows {
            for c in 0..new_cols {
                if c + 1 == at {
                    data.push(col[r].clone());
                } else {
                    let src_c = if c + 1 < at { c } else { c - 1 };
                    data.push(self.data[r * self.cols + src_c].clone());
                }
            }
        }
        Ok(Array {
            rows: self.rows,
            cols: new_cols,
            data,
        })
    }

    /// `Extract`: the sub-block spanning 1-based, inclusive rows
    /// `[row_first, row_last]` and columns `[col_first, col_last]`.
    pub fn extract(&self, row_first: usize, row_last: usize, col_first: usize, col_last: usize) -> Result<Array<T>, ErrorKind>
    where
        T: Clone,
    {
        if row_first == 0 || col_first == 0 || row_last < row_first || col_last < col_first || row_last > self.rows || col_last > self.cols {
            return Err(ErrorKind::IndexOutOfRange);
        }
        let mut data = Vec::new();
        for r in row_first..=row_last {
            for c in col_first..=col_last {
                data.push(self.data[(r - 1) * self.cols + (c - 1)].clone());
            }
        }
        Ok(Array {
            rows: row_last - row_first + 1,
            cols: col_last - col_first + 1,
            data,
        })
    }

    /// `DET`: determinant via Gaussian elimination with partial pivoting,
    /// defined only for square matrices.
    pub fn det(&self, zero: &T, one: &T, epsilon: impl Fn(&T) -> bool) -> Result<T, ErrorKind>
    where
        T: Clone + PartialEq + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + core::ops::Div<Output = T> + Neg<Output = T>,
    {
        if self.rows != self.cols {
            return Err(ErrorKind::InvalidDimension);
        }
        let n = self.rows;
        let mut m = self.data.clone();
        let mut sign = one.clone();
        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !epsilon(&m[r * n + col])) else {
                return Ok(zero.clone());
            };
            if pivot_row != col {
                for c in 0..n {
                    m.swap(col * n + c, pivot_row * n + c);
                }
                sign = -sign;
            }
            let pivot = m[col * n + col].clone();
            for r in (col + 1)..n {
                let factor = m[r * n + col].clone() / pivot.clone();
                for c in col..n {
                    let reduced = m[r * n + c].clone() - factor.clone() * m[col * n + c].clone();
                    m[r * n + c] = reduced;
                }
            }
        }
        let mut det = sign;
        for i in 0..n {
            det = det * m[i * n + i].clone();
        }
        Ok(det)
    }

    /// `INV`: matrix inverse via Gauss-Jordan elimination on `[self | I]`,
    /// defined only for square, non-singular matrices.
    pub fn inv(&self, zero: &T, one: &T, epsilon: impl Fn(&T) -> bool) -> Result<Array<T>, ErrorKind>
    where
        T: Clone + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + core::ops::Div<Output = T>,
    {
        if self.rows != self.cols {
            return Err(ErrorKind::InvalidDimension);
        }
        let n = self.rows;
        let mut left = self.data.clone();
        let mut right = Array::idn(n, zero.clone(), one.clone()).data;

        for col in 0..n {
            let Some(pivot_row) = (col..n).find(|&r| !epsilon(&left[r * n + col])) else {
                return Err(ErrorKind::DivideByZero);
            };
            if pivot_row != col {
                for c in 0..n {
                    left.swap(col * n + c, pivot_row * n + c);
                    right.swap(col * n + c, pivot_row * n + c);
                }
            }
            let pivot = left[col * n + col].clone();
            for c in 0..n {
                left[col * n + c] = left[col * n + c].clone() / pivot.clone();
                right[col * n + c] = right[col * n + c].clone() / pivot.clone();
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = left[r * n + col].clone();
                for c in 0..n {
                    left[r * n + c] = left[r * n + c].clone() - factor.clone() * left[col * n + c].clone();
                    right[r * n + c] = right[r * n + c].clone() - factor.clone() * right[col * n + c].clone();
                }
            }
        }
        Ok(Array { rows: n, cols: n, data: right })
    }
}

impl Array<f64> {
    /// Euclidean (row-vector) or Frobenius (matrix) norm.
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.data.iter().map(|v| v * v).sum())
    }

    /// Sum of absolute values along each row, the row norm used for
    /// matrix condition estimates.
    pub fn row_norms(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| libm::fabs(self.data[r * self.cols + c])).sum())
            .collect()
    }

    /// Sum of absolute values along each column.
    pub fn col_norms(&self) -> Vec<f64> {
        (0..self.cols)
            .map(|c| (0..self.rows).map(|r| libm::fabs(self.data[r * self.cols + c])).sum())
            .collect()
    }
}

/// Rectangular to polar, `(x, y) -> (r, theta)` in radians.
pub fn rect_to_polar(x: f64, y: f64) -> (f64, f64) {
    (libm::hypot(x, y), libm::atan2(y, x))
}

/// Polar to rectangular, `(r, theta) -> (x, y)`.
pub fn polar_to_rect(r: f64, theta: f64) -> (f64, f64) {
    (r * libm::cos(theta), r * libm::sin(theta))
}

/// Rectangular to cylindrical, `(x, y, z) -> (r, theta, z)`.
pub fn rect_to_cylindrical(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (r, theta) = rect_to_polar(x, y);
    (r, theta, z)
}

/// Cylindrical to rectangular, `(r, theta, z) -> (x, y, z)`.
pub fn cylindrical_to_rect(r: f64, theta: f64, z: f64) -> (f64, f64, f64) {
    let (x, y) = polar_to_rect(r, theta);
    (x, y, z)
}

/// Rectangular to spherical, `(x, y, z) -> (rho, theta, phi)`: `theta` is
/// the azimuth in the xy-plane, `phi` the inclination from the z-axis.
pub fn rect_to_spherical(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let rho = libm::sqrt(x * x + y * y + z * z);
    let theta = libm::atan2(y, x);
    let phi = if rho == 0.0 { 0.0 } else { libm::acos(z / rho) };
    (rho, theta, phi)
}

/// Spherical to rectangular, `(rho, theta, phi) -> (x, y, z)`.
pub fn spherical_to_rect(rho: f64, theta: f64, phi: f64) -> (f64, f64, f64) {
    let x = rho * libm::sin(phi) * libm::cos(theta);
    let y = rho * libm::sin(phi) * libm::sin(theta);
    let z = rho * libm::cos(phi);
    (x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn is_zero(v: &f64) -> bool {
        *v == 0.0
    }

    #[test]
    fn add_requires_matching_shapes() {
        let a = Array::from_vector(vec![1, 2, 3]);
        let b = Array::from_vector(vec![1, 2]);
        assert_eq!(a.add(&b), Err(ErrorKind::InvalidDimension));
    }

    #[test]
    fn matmul_computes_the_standard_product() {
        let a = Array::from_matrix(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Array::from_matrix(2, 2, vec![5, 6, 7, 8]).unwrap();
        let product = a.matmul(&b, &0).unwrap();
        assert_eq!(product.to_vector(), vec![19, 22, 43, 50]);
    }

    #[test]
    fn idn_is_the_multiplicative_identity() {
        let a = Array::from_matrix(2, 2, vec![1, 2, 3, 4]).unwrap();
        let id = Array::idn(2, 0, 1);
        assert_eq!(a.matmul(&id, &0).unwrap(), a);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let a = Array::from_matrix(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(*t.get(2, 1).unwrap(), 2);
    }

    #[test]
    fn cross_product_of_standard_basis_vectors() {
        let x = Array::from_vector(vec![1.0, 0.0, 0.0]);
        let y = Array::from_vector(vec![0.0, 1.0, 0.0]);
        let z = x.cross(&y).unwrap();
        assert_eq!(z.to_vector(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn det_of_a_singular_matrix_is_zero() {
        let a = Array::from_matrix(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        let det = a.det(&0.0, &1.0, is_zero).unwrap();
        assert_eq!(det, 0.0);
    }

    #[test]
    fn inv_of_the_identity_is_the_identity() {
        let id = Array::idn(2, 0.0, 1.0);
        let inv = id.inv(&0.0, &1.0, is_zero).unwrap();
        assert_eq!(inv, id);
    }

    #[test]
    fn rect_polar_round_trip() {
        let (r, theta) = rect_to_polar(3.0, 4.0);
        assert!((r - 5.0).abs() < 1e-9);
        let (x, y) = polar_to_rect(r, theta);
        assert!((x - 3.0).abs() < 1e-9 && (y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn row_insert_preserves_column_count() {
        let a = Array::from_matrix(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = a.row_insert(2, &[9, 9]).unwrap();
        assert_eq!(b.shape(), (3, 2));
        assert_eq!(b.to_vector(), vec![1, 2, 9, 9, 3, 4]);
    }
}
