//! Compile-time array shapes.
//!
//! Rust's const generics can't express a variadic list of dimensions, so the *rank* of an array is
//! selected by a marker type ([`Rank1`] through [`Rank6`]), and the dimensions are the const
//! parameters of that marker. `Array<f32, Rank3<3, 3, 2>>` is a 3x3x2 array of [`f32`]s.
//!
//! The element storage for a shape is a nested fixed-size array (`[[[T; 2]; 3]; 3]` for the
//! example above). Rust lays nested arrays out contiguously, with the last dimension varying
//! fastest, which is exactly the row-major layout described by [`Shape::STRIDES`].

use std::{array, fmt, slice};

use crate::{ArrayError, Result};

/// The shape of a fixed-size, row-major, multi-dimensional array.
///
/// This trait is implemented by the marker types [`Rank0`] through [`Rank6`] and is not meant to
/// be implemented outside of this crate.
pub trait Shape: 'static {
    /// The number of axes.
    const RANK: usize;

    /// The total number of elements (the product of all dimensions).
    ///
    /// Evaluating this constant for a shape with a zero-sized dimension is a compile-time error.
    const SIZE: usize;

    /// The size of each axis, outermost first.
    const DIMENSIONS: &'static [usize];

    /// The row-major stride of each axis.
    ///
    /// `STRIDES[k]` is the product of `DIMENSIONS[k + 1..]`, so the stride of the last axis is
    /// always 1.
    const STRIDES: &'static [usize];

    /// Multi-index type, holding exactly one index per axis.
    type Index: AsRef<[usize]> + Copy + fmt::Debug;

    /// The contiguous storage for `SIZE` elements of type `T`.
    type Buffer<T>;

    /// Creates a buffer by invoking `f` with every flat index, in ascending order.
    fn buffer_from_fn<T, F: FnMut(usize) -> T>(f: F) -> Self::Buffer<T>;

    /// Views the buffer as a flat slice in storage order.
    fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T];

    /// Views the buffer as a flat mutable slice in storage order.
    fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T];

    /// Applies `f` to every element of the buffer, in storage order.
    fn map_buffer<T, U, F: FnMut(T) -> U>(buffer: Self::Buffer<T>, f: F) -> Self::Buffer<U>;

    /// Computes the flat offset of a multi-index, checking every index against its axis.
    ///
    /// `index` must contain exactly [`Shape::RANK`] indices.
    fn offset(index: &[usize]) -> Result<usize> {
        debug_assert_eq!(index.len(), Self::RANK);
        index
            .iter()
            .zip(Self::DIMENSIONS)
            .zip(Self::STRIDES)
            .enumerate()
            .try_fold(0, |offset, (axis, ((&index, &length), &stride))| {
                if index < length {
                    Ok(offset + index * stride)
                } else {
                    Err(ArrayError::IndexOutOfBounds {
                        axis,
                        index,
                        length,
                    })
                }
            })
    }

    /// Computes the flat offset of a multi-index without any bounds checking.
    ///
    /// The result is only meaningful if every index is smaller than its dimension.
    fn offset_unchecked(index: &[usize]) -> usize {
        index
            .iter()
            .zip(Self::STRIDES)
            .map(|(index, stride)| index * stride)
            .sum()
    }
}

/// Shapes with at least one axis, which can be split into their first axis and the rest.
///
/// Used by [`View`][crate::View] to iterate over an array as a sequence of lower-rank sub-views.
pub trait Nested: Shape {
    /// The shape with the first axis removed.
    type Inner: Shape;
}

/// Computes row-major strides for the given dimensions.
///
/// # Examples
///
/// ```
/// # use euclidean::shape::row_major_strides;
/// assert_eq!(row_major_strides([3, 3, 2]), [6, 2, 1]);
/// assert_eq!(row_major_strides([4]), [1]);
/// ```
pub const fn row_major_strides<const RANK: usize>(dimensions: [usize; RANK]) -> [usize; RANK] {
    let mut strides = [1; RANK];
    let mut axis = RANK;
    while axis > 1 {
        axis -= 1;
        strides[axis - 1] = strides[axis] * dimensions[axis];
    }
    strides
}

const fn checked_size(dimensions: &[usize]) -> usize {
    let mut size = 1;
    let mut axis = 0;
    while axis < dimensions.len() {
        assert!(dimensions[axis] > 0, "array dimensions must be non-zero");
        size *= dimensions[axis];
        axis += 1;
    }
    size
}

macro_rules! nested_buffer {
    ($t:ty;) => { $t };
    ($t:ty; $head:ident $($tail:ident)*) => { [nested_buffer!($t; $($tail)*); $head] };
}

macro_rules! nested_from_fn {
    ($leaf:expr;) => { $leaf };
    ($leaf:expr; $head:ident $($tail:ident)*) => {
        array::from_fn(|_| nested_from_fn!($leaf; $($tail)*))
    };
}

macro_rules! flatten {
    ($buffer:expr; $head:ident) => { $buffer.as_slice() };
    ($buffer:expr; $head:ident $($tail:ident)+) => { flatten!($buffer; $($tail)+).as_flattened() };
}

macro_rules! flatten_mut {
    ($buffer:expr; $head:ident) => { $buffer.as_mut_slice() };
    ($buffer:expr; $head:ident $($tail:ident)+) => {
        flatten_mut!($buffer; $($tail)+).as_flattened_mut()
    };
}

macro_rules! nested_map {
    ($buffer:expr, $f:ident;) => { $f($buffer) };
    ($buffer:expr, $f:ident; $head:ident $($tail:ident)*) => {
        $buffer.map(|inner| nested_map!(inner, $f; $($tail)*))
    };
}

macro_rules! ranks {
    ($(
        $(#[$attr:meta])*
        $name:ident<$($dim:ident),+> = $rank:literal;
    )+) => {
        $(
            $(#[$attr])*
            pub enum $name<$(const $dim: usize),+> {}

            impl<$(const $dim: usize),+> Shape for $name<$($dim),+> {
                const RANK: usize = $rank;
                const SIZE: usize = checked_size(&[$($dim),+]);
                const DIMENSIONS: &'static [usize] = &[$($dim),+];
                const STRIDES: &'static [usize] = &row_major_strides([$($dim),+]);

                type Index = [usize; $rank];
                type Buffer<T> = nested_buffer!(T; $($dim)+);

                fn buffer_from_fn<T, F: FnMut(usize) -> T>(mut f: F) -> Self::Buffer<T> {
                    let mut flat = 0;
                    nested_from_fn!(
                        {
                            let elem = f(flat);
                            flat += 1;
                            elem
                        };
                        $($dim)+
                    )
                }

                #[inline]
                fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T] {
                    flatten!(buffer; $($dim)+)
                }

                #[inline]
                fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T] {
                    flatten_mut!(buffer; $($dim)+)
                }

                fn map_buffer<T, U, F: FnMut(T) -> U>(
                    buffer: Self::Buffer<T>,
                    mut f: F,
                ) -> Self::Buffer<U> {
                    nested_map!(buffer, f; $($dim)+)
                }
            }
        )+
    };
}

ranks! {
    /// Shape of a one-dimensional array with `D0` elements.
    Rank1<D0> = 1;
    /// Shape of a two-dimensional array with `D0` rows and `D1` columns.
    Rank2<D0, D1> = 2;
    /// Shape of a three-dimensional `D0` x `D1` x `D2` array.
    Rank3<D0, D1, D2> = 3;
    /// Shape of a four-dimensional array.
    Rank4<D0, D1, D2, D3> = 4;
    /// Shape of a five-dimensional array.
    Rank5<D0, D1, D2, D3, D4> = 5;
    /// Shape of a six-dimensional array.
    Rank6<D0, D1, D2, D3, D4, D5> = 6;
}

/// Shape of a scalar: no axes, a single element.
///
/// This is what a [`Rank1`] array decomposes into when iterated as sub-views.
pub enum Rank0 {}

impl Shape for Rank0 {
    const RANK: usize = 0;
    const SIZE: usize = 1;
    const DIMENSIONS: &'static [usize] = &[];
    const STRIDES: &'static [usize] = &[];

    type Index = [usize; 0];
    type Buffer<T> = T;

    fn buffer_from_fn<T, F: FnMut(usize) -> T>(mut f: F) -> Self::Buffer<T> {
        f(0)
    }

    #[inline]
    fn flatten<T>(buffer: &Self::Buffer<T>) -> &[T] {
        slice::from_ref(buffer)
    }

    #[inline]
    fn flatten_mut<T>(buffer: &mut Self::Buffer<T>) -> &mut [T] {
        slice::from_mut(buffer)
    }

    fn map_buffer<T, U, F: FnMut(T) -> U>(buffer: Self::Buffer<T>, mut f: F) -> Self::Buffer<U> {
        f(buffer)
    }
}

impl<const D0: usize> Nested for Rank1<D0> {
    type Inner = Rank0;
}
impl<const D0: usize, const D1: usize> Nested for Rank2<D0, D1> {
    type Inner = Rank1<D1>;
}
impl<const D0: usize, const D1: usize, const D2: usize> Nested for Rank3<D0, D1, D2> {
    type Inner = Rank2<D1, D2>;
}
impl<const D0: usize, const D1: usize, const D2: usize, const D3: usize> Nested
    for Rank4<D0, D1, D2, D3>
{
    type Inner = Rank3<D1, D2, D3>;
}
impl<const D0: usize, const D1: usize, const D2: usize, const D3: usize, const D4: usize> Nested
    for Rank5<D0, D1, D2, D3, D4>
{
    type Inner = Rank4<D1, D2, D3, D4>;
}
impl<
        const D0: usize,
        const D1: usize,
        const D2: usize,
        const D3: usize,
        const D4: usize,
        const D5: usize,
    > Nested for Rank6<D0, D1, D2, D3, D4, D5>
{
    type Inner = Rank5<D1, D2, D3, D4, D5>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Rank0::RANK, 0);
        assert_eq!(Rank0::SIZE, 1);

        assert_eq!(Rank1::<4>::SIZE, 4);
        assert_eq!(Rank1::<4>::STRIDES, &[1]);

        assert_eq!(Rank2::<2, 3>::RANK, 2);
        assert_eq!(Rank2::<2, 3>::SIZE, 6);
        assert_eq!(Rank2::<2, 3>::DIMENSIONS, &[2, 3]);
        assert_eq!(Rank2::<2, 3>::STRIDES, &[3, 1]);

        assert_eq!(Rank3::<3, 3, 2>::SIZE, 18);
        assert_eq!(Rank3::<3, 3, 2>::STRIDES, &[6, 2, 1]);

        assert_eq!(Rank6::<2, 3, 4, 5, 6, 7>::SIZE, 5040);
        assert_eq!(
            Rank6::<2, 3, 4, 5, 6, 7>::STRIDES,
            &[2520, 840, 210, 42, 7, 1]
        );
    }

    #[test]
    fn offsets_are_injective() {
        type S = Rank3<3, 3, 2>;
        let mut seen = HashSet::new();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..2 {
                    let offset = S::offset(&[i, j, k]).unwrap();
                    assert_eq!(offset, i * 6 + j * 2 + k);
                    assert_eq!(offset, S::offset_unchecked(&[i, j, k]));
                    assert!(seen.insert(offset));
                }
            }
        }
        assert_eq!(seen.len(), S::SIZE);
    }

    #[test]
    fn offset_out_of_bounds() {
        assert_eq!(
            Rank3::<3, 3, 2>::offset(&[0, 1, 2]),
            Err(ArrayError::IndexOutOfBounds {
                axis: 2,
                index: 2,
                length: 2,
            })
        );
        assert_eq!(
            Rank2::<2, 3>::offset(&[2, 0]),
            Err(ArrayError::IndexOutOfBounds {
                axis: 0,
                index: 2,
                length: 2,
            })
        );
        assert_eq!(Rank0::offset(&[]), Ok(0));
    }

    #[test]
    fn buffers_are_row_major() {
        let buffer = Rank3::<2, 2, 3>::buffer_from_fn(|i| i);
        assert_eq!(
            buffer,
            [[[0, 1, 2], [3, 4, 5]], [[6, 7, 8], [9, 10, 11]]]
        );
        assert_eq!(
            Rank3::<2, 2, 3>::flatten(&buffer),
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
        );
        assert_eq!(
            Rank3::<2, 2, 3>::map_buffer(buffer, |i| i * 10),
            [[[0, 10, 20], [30, 40, 50]], [[60, 70, 80], [90, 100, 110]]]
        );

        let mut scalar = Rank0::buffer_from_fn(|i| i + 7);
        assert_eq!(scalar, 7);
        Rank0::flatten_mut(&mut scalar)[0] = 9;
        assert_eq!(scalar, 9);
    }
}
