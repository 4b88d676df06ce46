use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem::ManuallyDrop,
    ops::{Index, IndexMut, Range},
    ptr, slice,
};

use itertools::zip_eq;

use crate::{
    shape::{Rank0, Rank1, Rank2, Rank3, Rank4, Rank5, Rank6},
    ArrayError, Result, Shape, Zero,
};

mod ops;

/// A one-dimensional array with `D0` elements.
pub type Array1<T, const D0: usize> = Array<T, Rank1<D0>>;
/// A two-dimensional array with `D0` rows and `D1` columns.
pub type Array2<T, const D0: usize, const D1: usize> = Array<T, Rank2<D0, D1>>;
/// A three-dimensional array.
pub type Array3<T, const D0: usize, const D1: usize, const D2: usize> =
    Array<T, Rank3<D0, D1, D2>>;
/// A four-dimensional array.
pub type Array4<T, const D0: usize, const D1: usize, const D2: usize, const D3: usize> =
    Array<T, Rank4<D0, D1, D2, D3>>;

/// A fixed-size, multi-dimensional array of `T`s with shape `S`.
///
/// The elements are stored inline, in row-major order (the last axis varies fastest). The shape
/// is part of the type, so there is no way to create an [`Array`] with the wrong number of
/// elements, and operations between arrays of different shapes fail to compile.
///
/// # Construction
///
/// - `Array::from_nested` (or [`From`]) takes the elements as a nested array literal. The nesting
///   has to match the shape exactly, so the number of elements is checked by the compiler.
/// - [`Array::from_fn`] invokes a closure with the flat index of each element.
/// - [`Array::zero`], [`Array::splat`] and [`Default`] fill the whole array with one value.
/// - [`Array::try_from_slice`], [`Array::try_from_iter`] and [`Array::from_parts`] take their
///   elements from a runtime sequence and validate its length.
///
/// # Element Access
///
/// Elements can be accessed with a flat index (an offset into the storage order) or with a
/// multi-index holding one index per axis:
///
/// ```
/// # use euclidean::*;
/// let mut array = Array2::from_nested([
///     [0, 1, 2],
///     [3, 4, 5],
/// ]);
/// assert_eq!(array[4], 4);
/// assert_eq!(array[[1, 1]], 4);
///
/// array[[0, 2]] = 9;
/// assert_eq!(array.as_slice(), &[0, 1, 9, 3, 4, 5]);
/// ```
///
/// A multi-index needs exactly one index per axis. Anything else fails to compile:
///
/// ```compile_fail
/// # use euclidean::*;
/// let array = Array2::<i32, 2, 3>::zero();
/// let _ = array[[0, 0, 0]];
/// ```
///
/// ```compile_fail
/// # use euclidean::*;
/// let array = Array2::<i32, 2, 3>::zero();
/// let _ = array[[1]];
/// ```
///
/// Indexing out of bounds panics in every build profile. [`Array::get`] and [`Array::get_flat`]
/// return an [`ArrayError`] instead:
///
/// ```
/// # use euclidean::*;
/// let array = Array2::from_nested([
///     [0, 1, 2],
///     [3, 4, 5],
/// ]);
/// assert_eq!(array.get([1, 2]), Ok(&5));
/// assert_eq!(
///     array.get([0, 3]).unwrap_err().to_string(),
///     "index (3) out of bounds [0-2] on axis 1",
/// );
/// assert!(array.get_flat(6).is_err());
/// ```
#[repr(transparent)]
pub struct Array<T, S: Shape>(pub(crate) S::Buffer<T>);

unsafe impl<T: bytemuck::Zeroable, S: Shape> bytemuck::Zeroable for Array<T, S> {}
unsafe impl<T: bytemuck::Pod, S: Shape> bytemuck::Pod for Array<T, S> where S::Buffer<T>: Copy {}

impl<T, S: Shape> Array<T, S> {
    /// The number of axes of this array type.
    pub const RANK: usize = S::RANK;

    /// The number of elements in this array type.
    pub const SIZE: usize = S::SIZE;

    /// Returns the elements as nested arrays.
    #[inline]
    pub fn into_nested(self) -> S::Buffer<T> {
        self.0
    }

    /// Creates an [`Array`] by invoking a closure with the flat index of each element.
    ///
    /// This mirrors [`std::array::from_fn`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array2::<usize, 2, 3>::from_fn(|i| i * 10);
    /// assert_eq!(array, Array2::from_nested([
    ///     [ 0, 10, 20],
    ///     [30, 40, 50],
    /// ]));
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(S::buffer_from_fn(f))
    }

    /// Creates an [`Array`] with every element set to `value`.
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    /// Creates an [`Array`] with every element set to [`T::ZERO`][Zero::ZERO].
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let zero = Array3::<f32, 2, 3, 4>::zero();
    /// assert!(zero.iter().all(|&elem| elem == 0.0));
    /// ```
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::from_fn(|_| T::ZERO)
    }

    /// Creates an [`Array`] by cloning the elements of a slice.
    ///
    /// Returns [`ArrayError::LengthMismatch`] unless the slice contains exactly
    /// [`Array::SIZE`] elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array2::<i32, 2, 2>::try_from_slice(&[1, 2, 3, 4])?;
    /// assert_eq!(array[[1, 0]], 3);
    ///
    /// assert!(Array2::<i32, 2, 2>::try_from_slice(&[1, 2, 3]).is_err());
    /// # Ok::<(), euclidean::ArrayError>(())
    /// ```
    pub fn try_from_slice(elements: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        if elements.len() != S::SIZE {
            log::trace!(
                "rejecting slice of {} elements for shape {:?}",
                elements.len(),
                S::DIMENSIONS,
            );
            return Err(ArrayError::LengthMismatch {
                expected: S::SIZE,
                found: elements.len(),
            });
        }
        Ok(Self::from_fn(|i| elements[i].clone()))
    }

    /// Creates an [`Array`] from the elements yielded by an iterator.
    ///
    /// At most [`Array::SIZE`] `+ 1` elements are pulled from the iterator, so unbounded iterators
    /// are rejected too. Returns [`ArrayError::LengthMismatch`] if it yields fewer than
    /// [`Array::SIZE`] elements, and [`ArrayError::TooManyElements`] if it yields more.
    pub fn try_from_iter<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut elements = elements.into_iter();
        let mut found = 0;
        let slots = Array::<Option<T>, S>::from_fn(|_| {
            let elem = elements.next();
            found += usize::from(elem.is_some());
            elem
        });
        if found != S::SIZE {
            log::trace!(
                "rejecting {} elements for shape {:?}",
                found,
                S::DIMENSIONS
            );
            return Err(ArrayError::LengthMismatch {
                expected: S::SIZE,
                found,
            });
        }
        if elements.next().is_some() {
            log::trace!(
                "rejecting more than {} elements for shape {:?}",
                S::SIZE,
                S::DIMENSIONS
            );
            return Err(ArrayError::TooManyElements { expected: S::SIZE });
        }

        // Every slot was filled, checked above.
        Ok(slots.map(|slot| slot.unwrap()))
    }

    /// Creates an [`Array`] by concatenating scalars and slices, in order.
    ///
    /// This allows composing an array from smaller pieces, like a 5-element array from two
    /// scalars, a 2-element array and another scalar. The total number of elements is validated at
    /// runtime.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let pair = Array1::from_nested([3, 4]);
    /// let array = Array1::<i32, 5>::from_parts(&[
    ///     Part::Scalar(1),
    ///     Part::Scalar(2),
    ///     Part::from(&pair),
    ///     Part::Slice(&[5]),
    /// ])?;
    /// assert_eq!(array, Array1::from_nested([1, 2, 3, 4, 5]));
    ///
    /// let err = Array1::<i32, 5>::from_parts(&[Part::Slice(&[1, 2, 3])]).unwrap_err();
    /// assert_eq!(err, ArrayError::LengthMismatch { expected: 5, found: 3 });
    /// # Ok::<(), euclidean::ArrayError>(())
    /// ```
    pub fn from_parts(parts: &[Part<'_, T>]) -> Result<Self>
    where
        T: Clone,
    {
        let found = parts.iter().map(|part| part.elements().len()).sum();
        if found != S::SIZE {
            return Err(ArrayError::LengthMismatch {
                expected: S::SIZE,
                found,
            });
        }
        Self::try_from_iter(parts.iter().flat_map(Part::elements).cloned())
    }

    /// Returns the size of each axis, outermost first.
    #[inline]
    pub fn dimensions(&self) -> &'static [usize] {
        S::DIMENSIONS
    }

    /// Returns the row-major stride of each axis.
    #[inline]
    pub fn strides(&self) -> &'static [usize] {
        S::STRIDES
    }

    /// Returns the elements as a flat slice, in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        S::flatten::<T>(&self.0)
    }

    /// Returns the elements as a flat mutable slice, in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        S::flatten_mut::<T>(&mut self.0)
    }

    /// Returns an iterator over references to the elements, in storage order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references to the elements, in storage order.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a reference to the element at a multi-index.
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if any index is outside of its axis.
    pub fn get(&self, index: S::Index) -> Result<&T> {
        let offset = S::offset(index.as_ref())?;
        Ok(&self.as_slice()[offset])
    }

    /// Returns a mutable reference to the element at a multi-index.
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if any index is outside of its axis.
    pub fn get_mut(&mut self, index: S::Index) -> Result<&mut T> {
        let offset = S::offset(index.as_ref())?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    /// Returns a reference to the element at a flat index.
    ///
    /// Returns [`ArrayError::FlatIndexOutOfBounds`] if `index` is not less than [`Array::SIZE`].
    pub fn get_flat(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::FlatIndexOutOfBounds {
                index,
                size: S::SIZE,
            })
    }

    /// Returns a mutable reference to the element at a flat index.
    ///
    /// Returns [`ArrayError::FlatIndexOutOfBounds`] if `index` is not less than [`Array::SIZE`].
    pub fn get_flat_mut(&mut self, index: usize) -> Result<&mut T> {
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::FlatIndexOutOfBounds {
                index,
                size: S::SIZE,
            })
    }

    /// Returns a reference to the element at a multi-index, without bounds checking.
    ///
    /// # Safety
    ///
    /// Every index must be less than the size of its axis.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: S::Index) -> &T {
        self.as_slice()
            .get_unchecked(S::offset_unchecked(index.as_ref()))
    }

    /// Returns a mutable reference to the element at a multi-index, without bounds checking.
    ///
    /// # Safety
    ///
    /// Every index must be less than the size of its axis.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: S::Index) -> &mut T {
        self.as_mut_slice()
            .get_unchecked_mut(S::offset_unchecked(index.as_ref()))
    }

    /// Returns a reference to the element at a flat index, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`Array::SIZE`].
    #[inline]
    pub unsafe fn get_flat_unchecked(&self, index: usize) -> &T {
        self.as_slice().get_unchecked(index)
    }

    /// Returns a mutable reference to the element at a flat index, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`Array::SIZE`].
    #[inline]
    pub unsafe fn get_flat_unchecked_mut(&mut self, index: usize) -> &mut T {
        self.as_mut_slice().get_unchecked_mut(index)
    }

    /// Applies a closure to each element, returning a new array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array1::from_nested([1, 2, 3]);
    /// assert_eq!(array.map(|i| i as f32 / 2.0), Array1::from_nested([0.5, 1.0, 1.5]));
    /// ```
    pub fn map<U, F>(self, f: F) -> Array<U, S>
    where
        F: FnMut(T) -> U,
    {
        Array(S::map_buffer::<T, U, F>(self.0, f))
    }

    /// Combines each element with the corresponding element of `other`, returning a new array.
    ///
    /// The element types of the two arrays may differ.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let counts = Array1::from_nested([1, 2, 3]);
    /// let chars = Array1::from_nested(['a', 'b', 'c']);
    /// let strings = chars.zip_map(counts, |c, n| c.to_string().repeat(n));
    /// assert_eq!(strings.as_slice(), &["a", "bb", "ccc"]);
    /// ```
    pub fn zip_map<U, V, F>(self, other: Array<U, S>, mut f: F) -> Array<V, S>
    where
        F: FnMut(T, U) -> V,
    {
        let mut other = other.into_iter();
        // Both arrays have `S::SIZE` elements.
        self.map(|a| f(a, other.next().unwrap()))
    }

    /// Combines each element with a scalar (`element op scalar`), returning a new array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array1::from_nested([2, 4, 8]);
    /// assert_eq!(array.map_scalar(2, |a, s| a / s), Array1::from_nested([1, 2, 4]));
    /// ```
    pub fn map_scalar<U, V, F>(self, scalar: U, mut f: F) -> Array<V, S>
    where
        U: Clone,
        F: FnMut(T, U) -> V,
    {
        self.map(|a| f(a, scalar.clone()))
    }

    /// Combines a scalar with each element (`scalar op element`), returning a new array.
    ///
    /// Unlike [`Array::map_scalar`], the scalar is passed as the *first* argument, which matters
    /// for non-commutative operations.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array1::from_nested([2, 4, 8]);
    /// assert_eq!(array.scalar_map(16, |s, a| s / a), Array1::from_nested([8, 4, 2]));
    /// ```
    pub fn scalar_map<U, V, F>(self, scalar: U, mut f: F) -> Array<V, S>
    where
        U: Clone,
        F: FnMut(U, T) -> V,
    {
        self.map(|a| f(scalar.clone(), a))
    }

    /// Updates each element in place, using the corresponding element of `other`.
    ///
    /// Returns `self` to allow chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mut array = Array1::from_nested([1, 2, 3]);
    /// array
    ///     .apply(Array1::from_nested([10, 20, 30]), |a, b| *a += b)
    ///     .apply_scalar(2, |a, s| *a *= s);
    /// assert_eq!(array, Array1::from_nested([22, 44, 66]));
    /// ```
    pub fn apply<U, F>(&mut self, other: Array<U, S>, mut f: F) -> &mut Self
    where
        F: FnMut(&mut T, U),
    {
        for (a, b) in zip_eq(self.iter_mut(), other) {
            f(a, b);
        }
        self
    }

    /// Updates each element in place, using a scalar.
    ///
    /// Returns `self` to allow chaining.
    pub fn apply_scalar<U, F>(&mut self, scalar: U, mut f: F) -> &mut Self
    where
        U: Clone,
        F: FnMut(&mut T, U),
    {
        for a in self.iter_mut() {
            f(a, scalar.clone());
        }
        self
    }

    /// Updates each element in place.
    ///
    /// Returns `self` to allow chaining.
    pub fn apply_each<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut T),
    {
        self.iter_mut().for_each(f);
        self
    }

    fn zip_ref<U, V, F>(&self, other: &Array<U, S>, mut f: F) -> Array<V, S>
    where
        F: FnMut(&T, &U) -> V,
    {
        let (lhs, rhs) = (self.as_slice(), other.as_slice());
        Array::from_fn(|i| f(&lhs[i], &rhs[i]))
    }

    /// Compares each element with the corresponding element of `other` for equality.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let a = Array1::from_nested([1, 2, 3]);
    /// let b = Array1::from_nested([1, 0, 3]);
    /// assert_eq!(a.eq_elementwise(&b), Array1::from_nested([true, false, true]));
    /// assert_eq!(a.lt_elementwise(&b), Array1::from_nested([false, false, false]));
    /// assert_eq!(a.ge_elementwise(&b).all(), true);
    /// ```
    pub fn eq_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialEq<U>,
    {
        self.zip_ref(other, |a, b| a == b)
    }

    /// Compares each element with the corresponding element of `other` for inequality.
    pub fn ne_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialEq<U>,
    {
        self.zip_ref(other, |a, b| a != b)
    }

    /// Returns whether each element is less than the corresponding element of `other`.
    pub fn lt_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialOrd<U>,
    {
        self.zip_ref(other, |a, b| a < b)
    }

    /// Returns whether each element is less than or equal to the corresponding element of `other`.
    pub fn le_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialOrd<U>,
    {
        self.zip_ref(other, |a, b| a <= b)
    }

    /// Returns whether each element is greater than the corresponding element of `other`.
    pub fn gt_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialOrd<U>,
    {
        self.zip_ref(other, |a, b| a > b)
    }

    /// Returns whether each element is greater than or equal to the corresponding element of
    /// `other`.
    pub fn ge_elementwise<U>(&self, other: &Array<U, S>) -> Array<bool, S>
    where
        T: PartialOrd<U>,
    {
        self.zip_ref(other, |a, b| a >= b)
    }
}

macro_rules! nested_constructors {
    ($($rank:ident<$($dim:ident),+> => $nested:ty;)+) => {
        $(
            impl<T, $(const $dim: usize),+> Array<T, $rank<$($dim),+>> {
                /// Creates an [`Array`] from its elements, given as nested arrays.
                ///
                /// The nesting has to match the shape, so the number of elements is checked at
                /// compile time.
                #[inline]
                pub const fn from_nested(elements: $nested) -> Self {
                    Self(elements)
                }
            }

            impl<T, $(const $dim: usize),+> From<$nested> for Array<T, $rank<$($dim),+>> {
                #[inline]
                fn from(elements: $nested) -> Self {
                    Self(elements)
                }
            }
        )+
    };
}

nested_constructors! {
    Rank1<D0> => [T; D0];
    Rank2<D0, D1> => [[T; D1]; D0];
    Rank3<D0, D1, D2> => [[[T; D2]; D1]; D0];
    Rank4<D0, D1, D2, D3> => [[[[T; D3]; D2]; D1]; D0];
    Rank5<D0, D1, D2, D3, D4> => [[[[[T; D4]; D3]; D2]; D1]; D0];
    Rank6<D0, D1, D2, D3, D4, D5> => [[[[[[T; D5]; D4]; D3]; D2]; D1]; D0];
}

impl<T> Array<T, Rank0> {
    /// Creates a scalar-shaped [`Array`] holding `elem`.
    #[inline]
    pub const fn from_nested(elem: T) -> Self {
        Self(elem)
    }

    /// Returns the single element of a scalar-shaped [`Array`].
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S: Shape> Array<bool, S> {
    /// Element-wise logical *and*.
    pub fn and(&self, other: &Self) -> Self {
        self.zip_ref(other, |&a, &b| a && b)
    }

    /// Element-wise logical *or*.
    pub fn or(&self, other: &Self) -> Self {
        self.zip_ref(other, |&a, &b| a || b)
    }

    /// Returns `true` if every element is `true`.
    pub fn all(&self) -> bool {
        self.iter().all(|&b| b)
    }

    /// Returns `true` if at least one element is `true`.
    pub fn any(&self) -> bool {
        self.iter().any(|&b| b)
    }
}

/// A piece of an [`Array`] passed to [`Array::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a, T> {
    /// A single element.
    Scalar(T),
    /// A run of elements, in order.
    Slice(&'a [T]),
}

impl<'a, T> Part<'a, T> {
    /// Returns the elements contributed by this part.
    pub fn elements(&self) -> &[T] {
        match self {
            Part::Scalar(elem) => slice::from_ref(elem),
            Part::Slice(elems) => elems,
        }
    }
}

impl<'a, T> From<&'a [T]> for Part<'a, T> {
    fn from(elems: &'a [T]) -> Self {
        Part::Slice(elems)
    }
}

impl<'a, T, S: Shape> From<&'a Array<T, S>> for Part<'a, T> {
    fn from(array: &'a Array<T, S>) -> Self {
        Part::Slice(array.as_slice())
    }
}

impl<T: Clone, S: Shape> Clone for Array<T, S> {
    fn clone(&self) -> Self {
        let elems = self.as_slice();
        Self::from_fn(|i| elems[i].clone())
    }
}

impl<T: Copy, S: Shape> Copy for Array<T, S> where S::Buffer<T>: Copy {}

// More general `PartialEq` impl than what a derive would generate.
impl<T, U, S: Shape> PartialEq<Array<U, S>> for Array<T, S>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<U, S>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: Shape> Eq for Array<T, S> {}

impl<T: Hash, S: Shape> Hash for Array<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Default, S: Shape> Default for Array<T, S> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for Array<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array{:?} ", S::DIMENSIONS)?;
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, S: Shape> Index<usize> for Array<T, S> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get_flat(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, S: Shape> IndexMut<usize> for Array<T, S> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_flat_mut(index) {
            Ok(elem) => elem,
            Err(e) => panic!("{e}"),
        }
    }
}

// One impl per rank, so that a multi-index of the wrong length fails to compile.
macro_rules! multi_index {
    ($($rank:literal => $shape:ty $(, $dim:ident)*;)+) => {
        $(
            impl<T, $(const $dim: usize),*> Index<[usize; $rank]> for Array<T, $shape> {
                type Output = T;

                #[track_caller]
                fn index(&self, index: [usize; $rank]) -> &T {
                    match self.get(index) {
                        Ok(elem) => elem,
                        Err(e) => panic!("{e}"),
                    }
                }
            }

            impl<T, $(const $dim: usize),*> IndexMut<[usize; $rank]> for Array<T, $shape> {
                #[track_caller]
                fn index_mut(&mut self, index: [usize; $rank]) -> &mut T {
                    match self.get_mut(index) {
                        Ok(elem) => elem,
                        Err(e) => panic!("{e}"),
                    }
                }
            }
        )+
    };
}

multi_index! {
    0 => Rank0;
    1 => Rank1<D0>, D0;
    2 => Rank2<D0, D1>, D0, D1;
    3 => Rank3<D0, D1, D2>, D0, D1, D2;
    4 => Rank4<D0, D1, D2, D3>, D0, D1, D2, D3;
    5 => Rank5<D0, D1, D2, D3, D4>, D0, D1, D2, D3, D4;
    6 => Rank6<D0, D1, D2, D3, D4, D5>, D0, D1, D2, D3, D4, D5;
}

/// A by-value iterator over the elements of an [`Array`], in storage order.
pub struct IntoIter<T, S: Shape> {
    buffer: ManuallyDrop<S::Buffer<T>>,
    alive: Range<usize>,
}

impl<T, S: Shape> IntoIter<T, S> {
    /// Returns the elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        &S::flatten::<T>(&*self.buffer)[self.alive.clone()]
    }
}

impl<T, S: Shape> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let index = self.alive.next()?;
        // Safety: `index` has just been removed from `alive`, so the element is never read again.
        Some(unsafe { ptr::read(&S::flatten::<T>(&*self.buffer)[index]) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.alive.size_hint()
    }
}

impl<T, S: Shape> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        let index = self.alive.next_back()?;
        // Safety: see `next`.
        Some(unsafe { ptr::read(&S::flatten::<T>(&*self.buffer)[index]) })
    }
}

impl<T, S: Shape> ExactSizeIterator for IntoIter<T, S> {}
impl<T, S: Shape> FusedIterator for IntoIter<T, S> {}

impl<T, S: Shape> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        let alive = self.alive.clone();
        // Safety: only the elements in `alive` are still owned by the iterator.
        unsafe {
            ptr::drop_in_place(&mut S::flatten_mut::<T>(&mut *self.buffer)[alive]);
        }
    }
}

impl<T, S: Shape> IntoIterator for Array<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buffer: ManuallyDrop::new(self.0),
            alive: 0..S::SIZE,
        }
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a Array<T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a mut Array<T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, S: Shape> approx::AbsDiffEq for Array<T, S>
where
    T: approx::AbsDiffEq,
    T::Epsilon: Clone,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        zip_eq(self, other).all(|(a, b)| a.abs_diff_eq(b, epsilon.clone()))
    }
}

impl<T, S: Shape> approx::RelativeEq for Array<T, S>
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
        zip_eq(self, other).all(|(a, b)| a.relative_eq(b, epsilon.clone(), max_relative.clone()))
    }
}

impl<T, S: Shape> approx::UlpsEq for Array<T, S>
where
    T: approx::UlpsEq,
    T::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        zip_eq(self, other).all(|(a, b)| a.ulps_eq(b, epsilon.clone(), max_ulps))
    }
}
