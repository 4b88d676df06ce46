use std::{array, fmt};

use crate::{
    shape::{Rank1, Rank2},
    view::SubViews,
    Array, Array2, ArrayError, Covector, Field, One, Part, Result, Vector, Zero,
};

mod ops;

/// A 1x1 matrix.
pub type Mat1<T> = Matrix<T, 1, 1>;
/// A 1x1 matrix with [`f32`] elements.
pub type Mat1f = Mat1<f32>;
/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;

/// A matrix with 2 rows and 3 columns.
pub type Mat2x3<T> = Matrix<T, 2, 3>;
/// A matrix with 3 rows and 2 columns.
pub type Mat3x2<T> = Matrix<T, 3, 2>;
/// A matrix with 3 rows and 4 columns.
pub type Mat3x4<T> = Matrix<T, 3, 4>;
/// A matrix with 4 rows and 3 columns.
pub type Mat4x3<T> = Matrix<T, 4, 3>;

/// A row-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// # Construction
///
/// There are several ways to create a [`Matrix`]:
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] allow filling a matrix with raw elements.
/// - [`Matrix::from_fn`] will create each element by invoking a closure with its row and column.
/// - [`Matrix::zero`] and [`Matrix::identity`] create the additive and multiplicative identities.
/// - [`Matrix::try_from_slice`] and [`Matrix::from_parts`] take the elements (in row-major order)
///   from a runtime sequence, validating its length.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row* (Y coordinate), the second is the *column* (X
/// coordinate), matching common mathematical notation. Indices are 0-based.
///
/// ```
/// # use euclidean::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices. [`Matrix::get`] and
/// [`Matrix::get_mut`] return a [`Result`] instead and can be used for checked indexing:
///
/// ```
/// # use euclidean::*;
/// let mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// assert_eq!(mat.get(0, 0), Ok(&0));
/// assert_eq!(mat.get(0, 1), Ok(&1));
/// assert!(mat.get(0, 2).is_err());
/// ```
///
/// # Algebra
///
/// `*` between two matrices is the matrix product, and is only defined when the number of columns
/// of the left operand matches the number of rows of the right operand. Column [`Vector`]s are
/// matrices with a single column, so the same operator computes matrix-vector products.
///
/// Square matrices of sizes 1 through 8 additionally provide [`determinant`], [`cofactor_matrix`],
/// [`adjugate`] and [`inverse`].
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
/// [`determinant`]: Matrix::<T, 3, 3>::determinant
/// [`cofactor_matrix`]: Matrix::<T, 3, 3>::cofactor_matrix
/// [`adjugate`]: Matrix::<T, 3, 3>::adjugate
/// [`inverse`]: Matrix::<T, 3, 3>::inverse
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const R: usize, const C: usize>(pub(crate) Array<T, Rank2<R, C>>);

unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

struct SubmatrixDims<const R: usize, const C: usize, const R2: usize, const C2: usize>;

impl<const R: usize, const C: usize, const R2: usize, const C2: usize> SubmatrixDims<R, C, R2, C2> {
    const VALID: () = assert!(
        R2 + 1 == R && C2 + 1 == C,
        "a submatrix has exactly one row and one column less than its matrix"
    );
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Wraps a two-dimensional [`Array`] holding the elements in row-major order.
    #[inline]
    pub const fn from_array(array: Array<T, Rank2<R, C>>) -> Self {
        Self(array)
    }

    /// Returns the underlying two-dimensional [`Array`].
    #[inline]
    pub fn into_inner(self) -> Array<T, Rank2<R, C>> {
        self.0
    }

    /// Returns a reference to the underlying two-dimensional [`Array`].
    #[inline]
    pub fn as_array(&self) -> &Array<T, Rank2<R, C>> {
        &self.0
    }

    /// Creates a [`Matrix`] from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<[T; C]>>(rows: [U; R]) -> Self {
        Self(Array2::from_nested(rows.map(Into::into)))
    }

    /// Creates a [`Matrix`] from an array of columns.
    ///
    /// Column [`Vector`]s can be passed directly:
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_columns([vec2(1, 2), vec2(3, 4)]);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [1, 3],
    ///     [2, 4],
    /// ]));
    /// ```
    pub fn from_columns<U: Into<[T; R]>>(columns: [U; C]) -> Self {
        Matrix::<T, C, R>::from_rows(columns).transpose()
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// This mirrors [`array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(Array::from_fn(|i| cb(i / C, i % C)))
    }

    /// Creates a [`Matrix`] by cloning its elements, in row-major order, from a slice.
    ///
    /// Returns [`ArrayError::LengthMismatch`] unless the slice contains exactly `R * C` elements.
    pub fn try_from_slice(elements: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Array::try_from_slice(elements).map(Self)
    }

    /// Creates a [`Matrix`] by concatenating scalars and slices, in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let v = vec2(3, 4);
    /// let parts = [Part::Scalar(1), Part::Scalar(2), Part::from(&v), Part::Scalar(5), Part::Scalar(6)];
    /// let mat = Mat2x3::from_parts(&parts)?;
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]));
    /// assert!(Mat2x3::from_parts(&parts[..4]).is_err());
    /// # Ok::<(), euclidean::ArrayError>(())
    /// ```
    pub fn from_parts(parts: &[Part<'_, T>]) -> Result<Self>
    where
        T: Clone,
    {
        Array::from_parts(parts).map(Self)
    }

    /// Applies a closure to each element, returning a new matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let mat = mat.map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  2,  4],
    ///     [ 6,  8, 10],
    /// ]));
    /// ```
    pub fn map<F, U>(self, f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(f))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R> {
        let mut rows = self.0.into_nested().map(<[T; C]>::into_iter);
        // Each row yields exactly `C` elements, one per output row.
        Matrix::from_rows(array::from_fn::<_, C, _>(|_| {
            rows.each_mut().map(|row| row.next().unwrap())
        }))
    }

    /// Returns a reference to the element at `(row, col)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Ok(&0));
    /// assert_eq!(mat.get(1, 0), Ok(&3));
    /// assert_eq!(
    ///     mat.get(2, 0),
    ///     Err(ArrayError::IndexOutOfBounds { axis: 0, index: 2, length: 2 }),
    /// );
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.0.get([row, col])
    }

    /// Returns a mutable reference to the element at `(row, col)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mut mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// if let Ok(elem) = mat.get_mut(1, 0) {
    ///     *elem = 999;
    /// }
    /// if let Ok(elem) = mat.get_mut(2, 0) {
    ///     *elem = 777;
    /// }
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [999, 4, 5],
    /// ]));
    /// ```
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.0.get_mut([row, col])
    }

    /// Returns the elements as a flat slice, in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Returns the elements as a flat mutable slice, in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_mut_slice()
    }

    /// Returns an iterator over references to the elements, in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Returns an iterator over the rows of this matrix, as borrowed views.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let sums: Vec<i32> = mat.rows().map(|row| row.as_slice().iter().sum()).collect();
    /// assert_eq!(sums, [3, 12]);
    /// ```
    pub fn rows(&self) -> SubViews<'_, T, Rank1<C>> {
        self.0.iterate()
    }

    /// Returns a copy of row `row`, as a row vector.
    pub fn row(&self, row: usize) -> Result<Covector<T, C>>
    where
        T: Clone,
    {
        if row >= R {
            return Err(ArrayError::IndexOutOfBounds {
                axis: 0,
                index: row,
                length: R,
            });
        }
        Ok(Matrix::from_fn(|_, col| self[(row, col)].clone()))
    }

    /// Returns a copy of column `col`, as a column vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.column(1)?, vec2(1, 4));
    /// assert_eq!(mat.row(1)?, Matrix::from_rows([[3, 4, 5]]));
    /// assert!(mat.column(3).is_err());
    /// # Ok::<(), euclidean::ArrayError>(())
    /// ```
    pub fn column(&self, col: usize) -> Result<Vector<T, R>>
    where
        T: Clone,
    {
        if col >= C {
            return Err(ArrayError::IndexOutOfBounds {
                axis: 1,
                index: col,
                length: C,
            });
        }
        Ok(Matrix::from_fn(|row, _| self[(row, col)].clone()))
    }

    /// Returns the matrix obtained by deleting row `skip_row` and column `skip_col`.
    ///
    /// The dimensions of the result, `R2` and `C2`, must be `R - 1` and `C - 1`. Any other choice
    /// fails to compile.
    ///
    /// # Panics
    ///
    /// Panics if `skip_row` or `skip_col` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    /// assert_eq!(mat.submatrix::<1, 2>(0, 1), Matrix::from_rows([[4, 6]]));
    /// assert_eq!(mat.submatrix::<1, 2>(1, 2), Matrix::from_rows([[1, 2]]));
    /// ```
    #[track_caller]
    pub fn submatrix<const R2: usize, const C2: usize>(
        &self,
        skip_row: usize,
        skip_col: usize,
    ) -> Matrix<T, R2, C2>
    where
        T: Clone,
    {
        #[allow(clippy::let_unit_value)]
        let () = SubmatrixDims::<R, C, R2, C2>::VALID;
        assert!(
            skip_row < R && skip_col < C,
            "submatrix index ({skip_row}, {skip_col}) out of bounds for {R}x{C} matrix"
        );

        Matrix::from_fn(|row, col| {
            let row = if row < skip_row { row } else { row + 1 };
            let col = if col < skip_col { col } else { col + 1 };
            self[(row, col)].clone()
        })
    }

    /// Element-wise (Hadamard) product of two matrices.
    pub fn mul_elementwise(self, rhs: Self) -> Matrix<T::Output, R, C>
    where
        T: std::ops::Mul,
    {
        Matrix(self.0 * rhs.0)
    }

    /// Element-wise division of two matrices.
    pub fn div_elementwise(self, rhs: Self) -> Matrix<T::Output, R, C>
    where
        T: std::ops::Div,
    {
        Matrix(self.0 / rhs.0)
    }
}

impl<T: Zero, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Returns a matrix with every element set to 0.
    pub fn zero() -> Self {
        Self(Array::zero())
    }
}

impl<T: Zero + One, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Returns the identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else. Multiplying any vector
    /// with this matrix returns the vector unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let v = vec3(1.0, -2.0, 3.5);
    /// assert_eq!(Mat3f::identity() * v, v);
    /// ```
    pub fn identity() -> Self {
        Self::from_fn(|row, col| if row == col { T::ONE } else { T::ZERO })
    }
}

impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// assert_eq!(Mat3f::identity().trace(), 3.0);
    /// ```
    pub fn trace(&self) -> T
    where
        T: Field,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug>(&'a [T]);
        impl<'a, T: fmt::Debug> fmt::Debug for FormatRow<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (col, elem) in self.0.iter().enumerate() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in self.rows() {
            list.entry(&FormatRow(row.as_slice()));
        }
        list.finish()
    }
}

impl<'a, T, const R: usize, const C: usize> From<&'a Matrix<T, R, C>> for Part<'a, T> {
    fn from(matrix: &'a Matrix<T, R, C>) -> Self {
        Part::Slice(matrix.as_slice())
    }
}

impl<T: Default, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self(Array::default())
    }
}

// Determinant and inverse exist for sizes 1 through 8; keep the docs above in sync!
impl<T: Field> Matrix<T, 1, 1> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        self[(0, 0)]
    }

    /// Returns the matrix of cofactors. For a 1x1 matrix, this is always `[[1]]`.
    pub fn cofactor_matrix(&self) -> Self {
        Self::identity()
    }

    /// Returns the adjugate (the transposed cofactor matrix).
    pub fn adjugate(&self) -> Self {
        self.cofactor_matrix()
    }

    /// Inverts this 1x1 matrix, returning [`None`] if its only element is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// assert_eq!(Mat1f::from_rows([[4.0]]).inverse(), Some(Mat1f::from_rows([[0.25]])));
    /// assert_eq!(Mat1f::zero().inverse(), None);
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::ZERO {
            log::debug!("refusing to invert singular 1x1 matrix");
            return None;
        }
        Some(Self::from_rows([[T::ONE / det]]))
    }
}

impl<T: Field> Matrix<T, 2, 2> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    #[inline]
    pub fn determinant(&self) -> T {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }

    /// Returns the matrix of signed cofactors.
    pub fn cofactor_matrix(&self) -> Self {
        let [[a, b], [c, d]] = self.0.into_nested();
        Self::from_rows([[d, -c], [-b, a]])
    }

    /// Returns the adjugate (the transposed cofactor matrix).
    pub fn adjugate(&self) -> Self {
        self.cofactor_matrix().transpose()
    }

    /// Inverts this 2x2 matrix, returning [`None`] if it is singular (its [`determinant()`] is
    /// zero).
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mat = Mat2f::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(mat.inverse(), Some(Mat2f::from_rows([[-2.0, 1.0], [1.5, -0.5]])));
    /// assert_eq!(Mat2f::zero().inverse(), None);
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == T::ZERO {
            log::debug!("refusing to invert singular 2x2 matrix");
            return None;
        }
        Some(self.adjugate() / det)
    }
}

macro_rules! cofactor_algebra {
    ($($n:literal => $minor:literal),+) => {
        $(
            impl<T: Field> Matrix<T, $n, $n> {
                /// Returns the [determinant] of the matrix, computed by cofactor expansion along
                /// the first row.
                ///
                /// [determinant]: https://en.wikipedia.org/wiki/Determinant
                pub fn determinant(&self) -> T {
                    (0..$n).fold(T::ZERO, |acc, col| {
                        let term = self[(0, col)] * self.submatrix::<$minor, $minor>(0, col).determinant();
                        if col % 2 == 0 {
                            acc + term
                        } else {
                            acc - term
                        }
                    })
                }

                /// Returns the matrix of signed cofactors.
                ///
                /// The element at `(row, col)` is the determinant of the submatrix without `row`
                /// and `col`, negated if `row + col` is odd.
                pub fn cofactor_matrix(&self) -> Self {
                    Self::from_fn(|row, col| {
                        let minor = self.submatrix::<$minor, $minor>(row, col).determinant();
                        if (row + col) % 2 == 0 {
                            minor
                        } else {
                            -minor
                        }
                    })
                }

                /// Returns the adjugate (the transposed cofactor matrix).
                pub fn adjugate(&self) -> Self {
                    self.cofactor_matrix().transpose()
                }

                /// Inverts this matrix, returning [`None`] if it is singular (its
                /// [`determinant()`] is zero).
                ///
                /// No tolerance is applied: only an exactly-zero determinant counts as singular.
                ///
                /// [`determinant()`]: Self::determinant
                pub fn inverse(&self) -> Option<Self> {
                    let cofactors = self.cofactor_matrix();
                    let det = (0..$n).fold(T::ZERO, |acc, col| acc + self[(0, col)] * cofactors[(0, col)]);
                    if det == T::ZERO {
                        log::debug!(concat!("refusing to invert singular ", $n, "x", $n, " matrix"));
                        return None;
                    }
                    Some(cofactors.transpose() / det)
                }
            }
        )+
    };
}

cofactor_algebra!(3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::{vec2, vec3};

    use super::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");

        // `#` modifier prints each row in its own line, but not each individual element.
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::zero()), "[[0.0, 0.0], [0.0, 0.0]]");
        assert_eq!(format!("{:?}", Mat2f::identity()), "[[1.0, 0.0], [0.0, 1.0]]");
        assert_eq!(
            Mat2x3::<i32>::identity(),
            Matrix::from_rows([[1, 0, 0], [0, 1, 0]])
        );
    }

    #[test]
    fn transpose() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat.transpose(), Matrix::from_rows([[1, 4], [2, 5], [3, 6]]));
        assert_eq!(mat.transpose().transpose(), mat);

        let strings = Matrix::from_rows([["a".to_string(), "b".to_string()]]);
        assert_eq!(
            strings.transpose(),
            Matrix::from_rows([["a".to_string()], ["b".to_string()]])
        );
    }

    #[test]
    fn mat_vec_mul() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat * vec3(7, 8, 9), vec2(50, 122));

        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        let vec = vec2(4, 5);
        assert_eq!(mat * vec, vec2(4 * 0 + 5 * 1, 4 * 2 + 5 * 3));
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Matrix::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Matrix::from_rows([
            [9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);

        let a = Mat2::from_rows([[1, 2], [3, 4]]);
        let b = Mat2::from_rows([[5, 6], [7, 8]]);
        assert_eq!(a * b, Mat2::from_rows([[19, 22], [43, 50]]));

        let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = Matrix::from_rows([[7, 8], [9, 10], [11, 12]]);
        assert_eq!(a * b, Mat2::from_rows([[58, 64], [139, 154]]));
    }

    #[test]
    fn submatrix() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(mat.submatrix::<2, 2>(0, 0), Mat2::from_rows([[5, 6], [8, 9]]));
        assert_eq!(mat.submatrix::<2, 2>(1, 1), Mat2::from_rows([[1, 3], [7, 9]]));
        assert_eq!(mat.submatrix::<2, 2>(2, 2), Mat2::from_rows([[1, 2], [4, 5]]));

        let wide = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(wide.submatrix::<1, 2>(1, 0), Matrix::from_rows([[2, 3]]));
    }

    #[test]
    #[should_panic = "out of bounds"]
    fn submatrix_out_of_bounds() {
        Mat3::<i32>::zero().submatrix::<2, 2>(3, 0);
    }

    #[test]
    fn row_and_column() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat.row(0), Ok(Matrix::from_rows([[1, 2, 3]])));
        assert_eq!(mat.column(2), Ok(vec2(3, 6)));
        assert_eq!(
            mat.row(2),
            Err(ArrayError::IndexOutOfBounds {
                axis: 0,
                index: 2,
                length: 2
            })
        );
        assert_eq!(mat.rows().count(), 2);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat1f::zero().determinant(), 0.0);
        assert_eq!(Mat2f::zero().determinant(), 0.0);
        assert_eq!(Mat3f::zero().determinant(), 0.0);
        assert_eq!(Mat1f::identity().determinant(), 1.0);
        assert_eq!(Mat2f::identity().determinant(), 1.0);
        assert_eq!(Mat3f::identity().determinant(), 1.0);
        assert_eq!(Matrix::<f64, 8, 8>::identity().determinant(), 1.0);

        assert_eq!(Mat1::from_rows([[4]]).determinant(), 4);
        assert_eq!(Mat2::from_rows([[1, 2], [3, 4]]).determinant(), -2);
        #[rustfmt::skip]
        let upper = Mat3::from_rows([
            [1, -2,  4],
            [0,  2, -4],
            [0,  0,  4],
        ]);
        assert_eq!(upper.determinant(), 8);

        // Expansion without alternating signs would give 34 here.
        #[rustfmt::skip]
        let testmat = Matrix::from_rows([
            [-2, -1,  2],
            [ 2,  1,  4],
            [-3,  3, -1],
        ]);
        assert_eq!(testmat.determinant(), 54);
        assert_eq!(testmat.transpose().determinant(), 54);

        // Swapping two rows flips the sign.
        let swapped = Matrix::from_rows([[2, 1, 4], [-2, -1, 2], [-3, 3, -1]]);
        assert_eq!(swapped.determinant(), -54);
    }

    #[test]
    fn inverse() {
        assert_eq!(
            Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]).inverse(),
            Some(Mat2::from_rows([[-2.0, 1.0], [1.5, -0.5]]))
        );

        #[rustfmt::skip]
        let mat = Mat3::from_rows([
            [1.0, -2.0,  4.0],
            [0.0,  2.0, -4.0],
            [0.0,  0.0,  4.0],
        ]);
        #[rustfmt::skip]
        let expected = Mat3::from_rows([
            [1.0, 1.0,  0.0],
            [0.0, 0.5,  0.5],
            [0.0, 0.0, 0.25],
        ]);
        let inverse = mat.inverse().unwrap();
        assert_relative_eq!(inverse, expected);
        assert_relative_eq!(inverse.inverse().unwrap(), mat);
        assert_abs_diff_eq!(mat * inverse, Mat3::identity(), epsilon = 1e-12);

        assert_eq!(Mat2f::zero().inverse(), None);
        assert_eq!(Mat3f::zero().inverse(), None);
        assert_eq!(
            Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 0.0]]).inverse(),
            None
        );
    }

    #[test]
    fn inverse_even_sizes() {
        #[rustfmt::skip]
        let mat = Mat4::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 0.0, 1.0],
            [1.0, 0.0, 6.0, 0.0],
            [2.0, 1.0, 0.0, 3.0],
        ]);
        let inverse = mat.inverse().unwrap();
        assert_abs_diff_eq!(mat * inverse, Mat4::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(inverse * mat, Mat4::identity(), epsilon = 1e-12);
        assert_relative_eq!(inverse.determinant() * mat.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cofactors() {
        let mat = Mat3::from_rows([[1, 2, 3], [0, 4, 5], [1, 0, 6]]);
        let cofactors = mat.cofactor_matrix();
        assert_eq!(
            cofactors,
            Mat3::from_rows([[24, 5, -4], [-12, 3, 2], [-2, -5, 4]])
        );
        assert_eq!(mat.adjugate(), cofactors.transpose());
        assert_eq!(mat * mat.adjugate(), Mat3::<i32>::identity() * mat.determinant());
    }

    #[test]
    fn scalar_ops() {
        let mat = Mat2::<f64>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(mat * 2.0, 2.0 * mat);
        assert_eq!((mat * 2.0)[(1, 1)], 8.0);
        assert_eq!((mat / 2.0)[(0, 1)], 1.0);
        assert_eq!(
            mat.mul_elementwise(mat),
            Mat2::from_rows([[1.0, 4.0], [9.0, 16.0]])
        );
        assert_eq!(mat.div_elementwise(mat), Mat2::from_rows([[1.0; 2]; 2]));

        let mut m = mat;
        m *= 3.0;
        m /= 3.0;
        m += mat;
        m -= mat;
        assert_eq!(m, mat);
        assert_eq!(-m + mat, Mat2::<f64>::zero());
        assert_eq!(mat.trace(), 5.0);
    }
}
