//! Tensors: arrays whose axes carry a variance.
//!
//! Each axis of a [`Tensor`] is described by a [`Dimension`], which combines the size of the axis
//! with a [`Variance`] marker ([`Covariant`] or [`Contravariant`]). The variance has no effect on
//! storage or element-wise arithmetic; it only distinguishes "row-like" from "column-like" axes at
//! the type level.
//!
//! Every axis of a tensor must have a size larger than 1. A tensor type violating this fails to
//! compile as soon as it is constructed.

use std::{
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Deref, DerefMut},
    slice,
};

use crate::{
    array::IntoIter,
    shape::{Rank1, Rank2, Rank3, Rank4},
    Array, Array1, Field, Matrix, Part, Result, Shape, Vector, Zero,
};

mod ops;

/// Runtime representation of a [`Variance`] marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarianceKind {
    Covariant,
    Contravariant,
}

/// Type-level variance of a tensor axis.
pub trait Variance: 'static {
    const KIND: VarianceKind;
}

/// Marker for covariant ("row-like") axes.
pub enum Covariant {}

/// Marker for contravariant ("column-like") axes.
pub enum Contravariant {}

impl Variance for Covariant {
    const KIND: VarianceKind = VarianceKind::Covariant;
}

impl Variance for Contravariant {
    const KIND: VarianceKind = VarianceKind::Contravariant;
}

/// A tensor axis of size `N` with variance `V`.
///
/// This type only exists at the type level and cannot be instantiated.
pub struct Dimension<V: Variance, const N: usize>(Infallible, PhantomData<V>);

/// A covariant axis of size `N`.
pub type Co<const N: usize> = Dimension<Covariant, N>;

/// A contravariant axis of size `N`.
pub type Contra<const N: usize> = Dimension<Contravariant, N>;

/// A list of [`Dimension`]s, given as a tuple with one to four elements.
pub trait Dimensions: 'static {
    /// The shape of the underlying [`Array`].
    type Shape: Shape;

    /// The variance of each axis.
    const VARIANCES: &'static [VarianceKind];

    #[doc(hidden)]
    const CHECK: ();
}

macro_rules! dimensions {
    ($($rank:ident: $(($v:ident, $n:ident)),+;)+) => {
        $(
            impl<$($v: Variance, const $n: usize),+> Dimensions for ($(Dimension<$v, $n>,)+) {
                type Shape = $rank<$($n),+>;

                const VARIANCES: &'static [VarianceKind] = &[$($v::KIND),+];

                const CHECK: () = assert!(
                    $($n > 1)&&+,
                    "tensor dimensions must be larger than 1"
                );
            }
        )+
    };
}

dimensions! {
    Rank1: (V0, N0);
    Rank2: (V0, N0), (V1, N1);
    Rank3: (V0, N0), (V1, N1), (V2, N2);
    Rank4: (V0, N0), (V1, N1), (V2, N2), (V3, N3);
}

/// A tensor with a single contravariant axis (a column vector).
pub type VectorTensor<T, const N: usize> = Tensor<T, (Contra<N>,)>;
/// A tensor with a single covariant axis (a row vector).
pub type CovectorTensor<T, const N: usize> = Tensor<T, (Co<N>,)>;
/// A tensor with `R` covariant rows and `C` contravariant columns.
pub type MatrixTensor<T, const R: usize, const C: usize> = Tensor<T, (Co<R>, Contra<C>)>;

/// A fixed-size tensor of `T`s, with axes described by `D`.
///
/// [`Tensor`] dereferences to the underlying [`Array`], so all of its element access and
/// iteration methods are available. Operations that produce a new value (operators, [`map`] and
/// friends) return [`Tensor`]s with the same dimensions.
///
/// # Examples
///
/// ```
/// # use euclidean::*;
/// let m = MatrixTensor::<i32, 2, 3>::from_fn(|i| i as i32);
/// assert_eq!(m[[1, 2]], 5);
/// assert_eq!(m.variances(), &[VarianceKind::Covariant, VarianceKind::Contravariant]);
///
/// let doubled = m * 2;
/// assert_eq!(doubled.as_slice(), &[0, 2, 4, 6, 8, 10]);
/// ```
///
/// Axes of size 1 are rejected at compile time, including when zeroing through `bytemuck`:
///
/// ```compile_fail
/// # use euclidean::*;
/// let v = VectorTensor::<f32, 1>::zero();
/// ```
///
/// ```compile_fail
/// # use euclidean::*;
/// let v: VectorTensor<f32, 1> = bytemuck::Zeroable::zeroed();
/// ```
///
/// Reinterpreting bytes with `bytemuck::cast` and friends does not go through a constructor, so
/// it is not covered by this check.
///
/// [`map`]: Tensor::map
#[repr(transparent)]
pub struct Tensor<T, D: Dimensions>(Array<T, D::Shape>);

unsafe impl<T: bytemuck::Zeroable, D: Dimensions> bytemuck::Zeroable for Tensor<T, D> {
    #[inline]
    fn zeroed() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = D::CHECK;
        Self(<Array<T, D::Shape> as bytemuck::Zeroable>::zeroed())
    }
}
unsafe impl<T: bytemuck::Pod, D: Dimensions> bytemuck::Pod for Tensor<T, D> where
    Array<T, D::Shape>: bytemuck::Pod
{
}

impl<T, D: Dimensions> Tensor<T, D> {
    /// The number of axes of this tensor type.
    pub const RANK: usize = <D::Shape as Shape>::RANK;

    /// The number of elements in this tensor type.
    pub const SIZE: usize = <D::Shape as Shape>::SIZE;

    /// Wraps an [`Array`] of matching shape.
    #[inline]
    pub fn from_array(array: Array<T, D::Shape>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = D::CHECK;
        Self(array)
    }

    /// Returns the underlying [`Array`].
    #[inline]
    pub fn into_array(self) -> Array<T, D::Shape> {
        self.0
    }

    /// Creates a [`Tensor`] by invoking a closure with the flat index of each element.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_array(Array::from_fn(f))
    }

    /// Creates a [`Tensor`] with every element set to `value`.
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_array(Array::splat(value))
    }

    /// Creates a [`Tensor`] with every element set to [`T::ZERO`][Zero::ZERO].
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::from_array(Array::zero())
    }

    /// Creates a [`Tensor`] by cloning the elements of a slice.
    ///
    /// See [`Array::try_from_slice`].
    pub fn try_from_slice(elements: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Array::try_from_slice(elements).map(Self::from_array)
    }

    /// Creates a [`Tensor`] from the elements yielded by an iterator.
    ///
    /// See [`Array::try_from_iter`].
    pub fn try_from_iter<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Array::try_from_iter(elements).map(Self::from_array)
    }

    /// Creates a [`Tensor`] by concatenating scalars and slices, in order.
    ///
    /// See [`Array::from_parts`].
    pub fn from_parts(parts: &[Part<'_, T>]) -> Result<Self>
    where
        T: Clone,
    {
        Array::from_parts(parts).map(Self::from_array)
    }

    /// Returns the variance of each axis.
    pub fn variances(&self) -> &'static [VarianceKind] {
        D::VARIANCES
    }

    /// Applies a closure to each element, returning a new tensor.
    pub fn map<U, F>(self, f: F) -> Tensor<U, D>
    where
        F: FnMut(T) -> U,
    {
        Tensor(self.0.map(f))
    }

    /// Combines each element with the corresponding element of `other`, returning a new tensor.
    pub fn zip_map<U, V, F>(self, other: Tensor<U, D>, f: F) -> Tensor<V, D>
    where
        F: FnMut(T, U) -> V,
    {
        Tensor(self.0.zip_map(other.0, f))
    }

    /// Combines each element with a scalar (`element op scalar`), returning a new tensor.
    pub fn map_scalar<U, V, F>(self, scalar: U, f: F) -> Tensor<V, D>
    where
        U: Clone,
        F: FnMut(T, U) -> V,
    {
        Tensor(self.0.map_scalar(scalar, f))
    }

    /// Combines a scalar with each element (`scalar op element`), returning a new tensor.
    pub fn scalar_map<U, V, F>(self, scalar: U, f: F) -> Tensor<V, D>
    where
        U: Clone,
        F: FnMut(U, T) -> V,
    {
        Tensor(self.0.scalar_map(scalar, f))
    }

    /// Updates each element in place, using the corresponding element of `other`.
    pub fn apply<U, F>(&mut self, other: Tensor<U, D>, f: F) -> &mut Self
    where
        F: FnMut(&mut T, U),
    {
        self.0.apply(other.0, f);
        self
    }

    /// Updates each element in place, using a scalar.
    pub fn apply_scalar<U, F>(&mut self, scalar: U, f: F) -> &mut Self
    where
        U: Clone,
        F: FnMut(&mut T, U),
    {
        self.0.apply_scalar(scalar, f);
        self
    }

    /// Updates each element in place.
    pub fn apply_each<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut T),
    {
        self.0.apply_each(f);
        self
    }
}

impl<T, D: Dimensions> Deref for Tensor<T, D> {
    type Target = Array<T, D::Shape>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, D: Dimensions> DerefMut for Tensor<T, D> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T, D: Dimensions> From<Array<T, D::Shape>> for Tensor<T, D> {
    fn from(array: Array<T, D::Shape>) -> Self {
        Self::from_array(array)
    }
}

impl<T, const R: usize, const C: usize> From<Matrix<T, R, C>> for MatrixTensor<T, R, C> {
    fn from(matrix: Matrix<T, R, C>) -> Self {
        Self::from_array(matrix.into_inner())
    }
}

impl<T, const R: usize, const C: usize> From<MatrixTensor<T, R, C>> for Matrix<T, R, C> {
    fn from(tensor: MatrixTensor<T, R, C>) -> Self {
        Matrix::from_array(tensor.0)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for VectorTensor<T, N> {
    fn from(vector: Vector<T, N>) -> Self {
        Self::from_array(Array1::from_nested(vector.into_array()))
    }
}

impl<T, const N: usize> From<VectorTensor<T, N>> for Vector<T, N> {
    fn from(tensor: VectorTensor<T, N>) -> Self {
        Vector::from(tensor.0.into_nested())
    }
}

/// Matrix product of two tensors.
///
/// Implemented for matrix-matrix and matrix-vector products. Mismatched inner dimensions fail to
/// compile.
pub trait MatrixProduct<Rhs> {
    type Output;

    fn matrix_product(self, rhs: Rhs) -> Self::Output;
}

impl<T, const R: usize, const K: usize, const C: usize> MatrixProduct<MatrixTensor<T, K, C>>
    for MatrixTensor<T, R, K>
where
    T: Field,
{
    type Output = MatrixTensor<T, R, C>;

    fn matrix_product(self, rhs: MatrixTensor<T, K, C>) -> Self::Output {
        (Matrix::from(self) * Matrix::from(rhs)).into()
    }
}

impl<T, const R: usize, const K: usize> MatrixProduct<VectorTensor<T, K>> for MatrixTensor<T, R, K>
where
    T: Field,
{
    type Output = VectorTensor<T, R>;

    fn matrix_product(self, rhs: VectorTensor<T, K>) -> Self::Output {
        (Matrix::from(self) * Vector::from(rhs)).into()
    }
}

/// Computes the matrix product `lhs * rhs` of two tensors.
///
/// # Examples
///
/// ```
/// # use euclidean::*;
/// let a = MatrixTensor::<i32, 2, 3>::try_from_slice(&[1, 2, 3, 4, 5, 6])?;
/// let b = MatrixTensor::<i32, 3, 2>::try_from_slice(&[7, 8, 9, 10, 11, 12])?;
/// assert_eq!(matrix_product(a, b).as_slice(), &[58, 64, 139, 154]);
///
/// let v = VectorTensor::<i32, 3>::try_from_slice(&[7, 8, 9])?;
/// assert_eq!(matrix_product(a, v).as_slice(), &[50, 122]);
/// # Ok::<(), euclidean::ArrayError>(())
/// ```
pub fn matrix_product<L, R>(lhs: L, rhs: R) -> L::Output
where
    L: MatrixProduct<R>,
{
    lhs.matrix_product(rhs)
}

impl<T: Clone, D: Dimensions> Clone for Tensor<T, D> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Copy, D: Dimensions> Copy for Tensor<T, D> where Array<T, D::Shape>: Copy {}

impl<T, U, D: Dimensions> PartialEq<Tensor<U, D>> for Tensor<T, D>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Tensor<U, D>) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq, D: Dimensions> Eq for Tensor<T, D> {}

impl<T: Hash, D: Dimensions> Hash for Tensor<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: Default, D: Dimensions> Default for Tensor<T, D> {
    fn default() -> Self {
        Self::from_array(Array::default())
    }
}

impl<T: fmt::Debug, D: Dimensions> fmt::Debug for Tensor<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("dimensions", &<D::Shape as Shape>::DIMENSIONS)
            .field("variances", &D::VARIANCES)
            .field("elements", &self.as_slice())
            .finish()
    }
}

impl<T, D: Dimensions> IntoIterator for Tensor<T, D> {
    type Item = T;
    type IntoIter = IntoIter<T, D::Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T, D: Dimensions> IntoIterator for &'a Tensor<T, D> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T, D: Dimensions> IntoIterator for &'a mut Tensor<T, D> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl<T, D: Dimensions> approx::AbsDiffEq for Tensor<T, D>
where
    T: approx::AbsDiffEq,
    T::Epsilon: Clone,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}

impl<T, D: Dimensions> approx::RelativeEq for Tensor<T, D>
where
    T: approx::RelativeEq,
    T::Epsilon: Clone,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0.relative_eq(&other.0, epsilon, max_relative)
    }
}

impl<T, D: Dimensions> approx::UlpsEq for Tensor<T, D>
where
    T: approx::UlpsEq,
    T::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.0.ulps_eq(&other.0, epsilon, max_ulps)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Array2, Mat2};

    use super::*;

    #[test]
    fn variances() {
        assert_eq!(
            VectorTensor::<f32, 3>::zero().variances(),
            &[VarianceKind::Contravariant]
        );
        assert_eq!(
            CovectorTensor::<f32, 3>::zero().variances(),
            &[VarianceKind::Covariant]
        );
        type Mixed = Tensor<u8, (Contra<2>, Co<3>, Co<2>)>;
        assert_eq!(
            Mixed::zero().variances(),
            &[
                VarianceKind::Contravariant,
                VarianceKind::Covariant,
                VarianceKind::Covariant
            ]
        );
        assert_eq!(Mixed::zero().dimensions(), &[2, 3, 2]);
        assert_eq!(Mixed::SIZE, 12);
    }

    #[test]
    fn zeroed_through_bytemuck() {
        let t: MatrixTensor<f32, 2, 3> = bytemuck::Zeroable::zeroed();
        assert_eq!(t, MatrixTensor::<f32, 2, 3>::zero());
        assert_eq!(t.dimensions(), &[2, 3]);
    }

    #[test]
    fn access_through_array() {
        let mut t = MatrixTensor::<i32, 2, 2>::from_fn(|i| i as i32);
        t[[1, 0]] = 7;
        assert_eq!(t.get([1, 0]), Ok(&7));
        assert_eq!(t.iter().copied().collect::<Vec<_>>(), [0, 1, 7, 3]);
        assert_eq!(t.iterate().count(), 2);
    }

    #[test]
    fn conversions() {
        let array = Array2::from_nested([[1, 2], [3, 4]]);
        let tensor = MatrixTensor::<i32, 2, 2>::from(array);
        let matrix = Mat2::from(tensor);
        assert_eq!(matrix, Mat2::from_rows([[1, 2], [3, 4]]));
        assert_eq!(MatrixTensor::<i32, 2, 2>::from(matrix).into_array(), array);

        let v = VectorTensor::<i32, 3>::try_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(Vector::from(v), Vector::from([1, 2, 3]));
    }

    #[test]
    fn products() {
        let a = MatrixTensor::<i32, 2, 2>::try_from_slice(&[1, 2, 3, 4]).unwrap();
        let b = MatrixTensor::<i32, 2, 2>::try_from_slice(&[5, 6, 7, 8]).unwrap();
        assert_eq!(matrix_product(a, b).as_slice(), &[19, 22, 43, 50]);

        // The `*` operator is element-wise on tensors.
        assert_eq!((a * b).as_slice(), &[5, 12, 21, 32]);
    }

    #[test]
    fn map_layer() {
        let mut t = VectorTensor::<f64, 2>::try_from_slice(&[1.0, 2.0]).unwrap();
        t.apply_scalar(2.0, |a, s| *a *= s).apply_each(|a| *a += 1.0);
        assert_eq!(t.as_slice(), &[3.0, 5.0]);
        assert_eq!(t.scalar_map(15.0, |s, a| s / a).as_slice(), &[5.0, 3.0]);
        assert_eq!(
            t.zip_map(t, |a, b| a == b).as_slice(),
            &[true, true]
        );
    }
}
