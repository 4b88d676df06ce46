//! Borrowed views into an [`Array`], and iteration over lower-rank sub-views.
//!
//! A [`View`] of shape `Rank3<A, B, C>` iterates over `A` views of shape `Rank2<B, C>`, each of
//! which iterates over `B` views of shape `Rank1<C>`, down to [`Rank0`] views that dereference to
//! a single element. Views never copy: they borrow a contiguous run of the parent's storage.
//!
//! ```
//! # use euclidean::*;
//! let array = Array3::<usize, 3, 3, 2>::from_fn(|i| i);
//! let mut flat = Vec::new();
//! for plane in array.iterate() {
//!     for row in plane {
//!         for elem in row {
//!             flat.push(*elem);
//!         }
//!     }
//! }
//! assert_eq!(flat, array.as_slice());
//! ```

use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    slice,
};

use crate::{shape::Nested, Array, Rank0, Result, Shape};

/// A shared view of an array (or of a part of one) with shape `S`.
pub struct View<'a, T, S: Shape> {
    elements: &'a [T],
    _shape: PhantomData<S>,
}

/// A mutable view of an array (or of a part of one) with shape `S`.
pub struct ViewMut<'a, T, S: Shape> {
    elements: &'a mut [T],
    _shape: PhantomData<S>,
}

impl<'a, T, S: Shape> View<'a, T, S> {
    fn new(elements: &'a [T]) -> Self {
        debug_assert_eq!(elements.len(), S::SIZE);
        Self {
            elements,
            _shape: PhantomData,
        }
    }

    /// Returns the size of each axis of the view.
    pub fn dimensions(&self) -> &'static [usize] {
        S::DIMENSIONS
    }

    /// Returns the viewed elements as a flat slice, in storage order.
    pub fn as_slice(&self) -> &'a [T] {
        self.elements
    }

    /// Returns a reference to the element at a multi-index, relative to the view.
    pub fn get(&self, index: S::Index) -> Result<&'a T> {
        let elements = self.elements;
        S::offset(index.as_ref()).map(|offset| &elements[offset])
    }
}

impl<'a, T, S: Nested> View<'a, T, S> {
    /// Returns an iterator over the sub-views along the first axis.
    pub fn iter(&self) -> SubViews<'a, T, S::Inner> {
        SubViews::new(self.elements)
    }
}

impl<'a, T> View<'a, T, Rank0> {
    /// Returns the single element this view refers to.
    pub fn value(&self) -> &'a T {
        &self.elements[0]
    }
}

impl<'a, T, S: Shape> Clone for View<'a, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, S: Shape> Copy for View<'a, T, S> {}

impl<'a, T> Deref for View<'a, T, Rank0> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value()
    }
}

impl<'a, T, S: Nested> IntoIterator for View<'a, T, S> {
    type Item = View<'a, T, S::Inner>;
    type IntoIter = SubViews<'a, T, S::Inner>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Shape> ViewMut<'a, T, S> {
    fn new(elements: &'a mut [T]) -> Self {
        debug_assert_eq!(elements.len(), S::SIZE);
        Self {
            elements,
            _shape: PhantomData,
        }
    }

    /// Returns the size of each axis of the view.
    pub fn dimensions(&self) -> &'static [usize] {
        S::DIMENSIONS
    }

    /// Reborrows this view as a shared [`View`].
    pub fn as_view(&self) -> View<'_, T, S> {
        View::new(self.elements)
    }

    /// Returns the viewed elements as a flat slice, in storage order.
    pub fn as_slice(&self) -> &[T] {
        self.elements
    }

    /// Returns the viewed elements as a flat mutable slice, in storage order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.elements
    }

    /// Returns a mutable reference to the element at a multi-index, relative to the view.
    pub fn get_mut(&mut self, index: S::Index) -> Result<&mut T> {
        let offset = S::offset(index.as_ref())?;
        Ok(&mut self.elements[offset])
    }
}

impl<'a, T, S: Nested> ViewMut<'a, T, S> {
    /// Returns an iterator over the mutable sub-views along the first axis.
    pub fn iter_mut(&mut self) -> SubViewsMut<'_, T, S::Inner> {
        SubViewsMut::new(self.elements)
    }
}

impl<'a, T> Deref for ViewMut<'a, T, Rank0> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.elements[0]
    }
}

impl<'a, T> DerefMut for ViewMut<'a, T, Rank0> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.elements[0]
    }
}

impl<'a, T, S: Nested> IntoIterator for ViewMut<'a, T, S> {
    type Item = ViewMut<'a, T, S::Inner>;
    type IntoIter = SubViewsMut<'a, T, S::Inner>;

    fn into_iter(self) -> Self::IntoIter {
        SubViewsMut::new(self.elements)
    }
}

impl<'a, T: fmt::Debug, S: Shape> fmt::Debug for View<'a, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View{:?} ", S::DIMENSIONS)?;
        f.debug_list().entries(self.elements).finish()
    }
}

impl<'a, T: fmt::Debug, S: Shape> fmt::Debug for ViewMut<'a, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_view(), f)
    }
}

/// Iterator over consecutive sub-views of shape `S`.
///
/// Returned by [`View::iter`] and [`Array::iterate`].
pub struct SubViews<'a, T, S: Shape> {
    chunks: slice::ChunksExact<'a, T>,
    _shape: PhantomData<S>,
}

impl<'a, T, S: Shape> Clone for SubViews<'a, T, S> {
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks.clone(),
            _shape: PhantomData,
        }
    }
}

impl<'a, T, S: Shape> SubViews<'a, T, S> {
    fn new(elements: &'a [T]) -> Self {
        Self {
            chunks: elements.chunks_exact(S::SIZE),
            _shape: PhantomData,
        }
    }
}

impl<'a, T, S: Shape> Iterator for SubViews<'a, T, S> {
    type Item = View<'a, T, S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(View::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<'a, T, S: Shape> DoubleEndedIterator for SubViews<'a, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks.next_back().map(View::new)
    }
}

impl<'a, T, S: Shape> ExactSizeIterator for SubViews<'a, T, S> {}
impl<'a, T, S: Shape> FusedIterator for SubViews<'a, T, S> {}

/// Iterator over consecutive mutable sub-views of shape `S`.
///
/// Returned by [`ViewMut::iter_mut`] and [`Array::iterate_mut`].
pub struct SubViewsMut<'a, T, S: Shape> {
    chunks: slice::ChunksExactMut<'a, T>,
    _shape: PhantomData<S>,
}

impl<'a, T, S: Shape> SubViewsMut<'a, T, S> {
    fn new(elements: &'a mut [T]) -> Self {
        Self {
            chunks: elements.chunks_exact_mut(S::SIZE),
            _shape: PhantomData,
        }
    }
}

impl<'a, T, S: Shape> Iterator for SubViewsMut<'a, T, S> {
    type Item = ViewMut<'a, T, S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(ViewMut::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<'a, T, S: Shape> DoubleEndedIterator for SubViewsMut<'a, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks.next_back().map(ViewMut::new)
    }
}

impl<'a, T, S: Shape> ExactSizeIterator for SubViewsMut<'a, T, S> {}
impl<'a, T, S: Shape> FusedIterator for SubViewsMut<'a, T, S> {}

impl<T, S: Shape> Array<T, S> {
    /// Returns a shared [`View`] of the whole array.
    pub fn view(&self) -> View<'_, T, S> {
        View::new(self.as_slice())
    }

    /// Returns a mutable [`ViewMut`] of the whole array.
    pub fn view_mut(&mut self) -> ViewMut<'_, T, S> {
        ViewMut::new(self.as_mut_slice())
    }
}

impl<T, S: Nested> Array<T, S> {
    /// Returns an iterator over the sub-views along the first axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let array = Array2::from_nested([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let rows: Vec<_> = array.iterate().map(|row| row.as_slice()).collect();
    /// assert_eq!(rows, [[0, 1, 2], [3, 4, 5]]);
    /// ```
    pub fn iterate(&self) -> SubViews<'_, T, S::Inner> {
        SubViews::new(self.as_slice())
    }

    /// Returns an iterator over the mutable sub-views along the first axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let mut array = Array2::from_nested([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// for (i, mut row) in array.iterate_mut().enumerate() {
    ///     row.as_mut_slice()[0] = 10 * i;
    /// }
    /// assert_eq!(array, Array2::from_nested([
    ///     [ 0, 1, 2],
    ///     [10, 4, 5],
    /// ]));
    /// ```
    pub fn iterate_mut(&mut self) -> SubViewsMut<'_, T, S::Inner> {
        SubViewsMut::new(self.as_mut_slice())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Array1, Array3, ArrayError, Rank2};

    use super::*;

    #[test]
    fn nested_iteration_preserves_order() {
        let array = Array3::<usize, 3, 3, 2>::from_fn(|i| i);

        let outer = array.iterate();
        assert_eq!(outer.len(), 3);

        let mut flat = Vec::new();
        for plane in outer {
            assert_eq!(plane.dimensions(), &[3, 2]);
            assert_eq!(plane.iter().len(), 3);
            for row in plane.iter() {
                assert_eq!(row.as_slice().len(), 2);
                flat.extend(row.iter().map(|elem| *elem.value()));
            }
        }
        assert_eq!(flat, (0..18).collect::<Vec<_>>());
    }

    #[test]
    fn restartable() {
        let array = Array3::<usize, 2, 2, 2>::from_fn(|i| i);
        let planes = array.iterate();
        let first: Vec<_> = planes.clone().map(|v| v.as_slice()).collect();
        let second: Vec<_> = planes.map(|v| v.as_slice()).collect();
        assert_eq!(first, second);
        assert_eq!(first, [&[0, 1, 2, 3][..], &[4, 5, 6, 7][..]]);

        let reversed: Vec<_> = array.iterate().rev().map(|v| v.as_slice()[0]).collect();
        assert_eq!(reversed, [4, 0]);
    }

    #[test]
    fn view_indexing() {
        let array = Array3::<usize, 3, 3, 2>::from_fn(|i| i);
        let plane: View<'_, usize, Rank2<3, 2>> = array.iterate().nth(1).unwrap();
        assert_eq!(plane.get([2, 1]), Ok(&(6 + 2 * 2 + 1)));
        assert_eq!(
            plane.get([3, 0]),
            Err(ArrayError::IndexOutOfBounds {
                axis: 0,
                index: 3,
                length: 3,
            })
        );
    }

    #[test]
    fn mutation_through_views() {
        let mut array = Array3::<i32, 3, 3, 2>::zero();
        for (i, plane) in array.iterate_mut().enumerate() {
            for mut row in plane {
                for mut elem in row.iter_mut() {
                    *elem += i as i32 + 1;
                }
            }
        }
        assert_eq!(&array.as_slice()[..6], &[1; 6]);
        assert_eq!(&array.as_slice()[12..], &[3; 6]);

        let mut view = array.view_mut();
        *view.get_mut([0, 0, 0]).unwrap() = -1;
        assert_eq!(array[0], -1);
    }

    #[test]
    fn rank1_views_yield_scalars() {
        let array = Array1::from_nested([1, 2, 3]);
        let sum: i32 = array.iterate().map(|elem| *elem).sum();
        assert_eq!(sum, 6);
        assert_eq!(format!("{:?}", array.view()), "View[3] [1, 2, 3]");
    }
}
