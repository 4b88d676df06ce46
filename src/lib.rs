//! Fixed-size multidimensional arrays, tensors, matrices and vectors.
//!
//! All sizes are part of the types. An [`Array`] is described by a [`Shape`] (one of [`Rank0`]
//! through [`Rank6`]) and stores its elements inline, in row-major order, without any heap
//! allocation. On top of that:
//!
//! - [`View`] and [`ViewMut`] borrow an array (or part of one) and iterate over it as a sequence of
//!   lower-rank sub-views.
//! - [`Tensor`] attaches a variance ([`Covariant`] or [`Contravariant`]) to every axis of an array.
//! - [`Matrix`] is a 2-dimensional array supporting matrix products, transposition, determinants
//!   and inverses. [`Vector`] is a matrix with a single column.
//!
//! # Goals & Non-Goals
//!
//! - Don't support dynamically-sized arrays. Relying on const generics for all dimensions means
//!   shape mismatches are compile errors instead of runtime errors.
//! - Support only a single, row-major, unpadded data layout.
//! - Be generic over the element type. Element-wise operators only require the operator they use,
//!   while actual algebra requires a [`Field`].
//! - Bounds-check every access. Unchecked access is available via `unsafe` methods.
//!
//! # Example
//!
//! ```
//! use euclidean::*;
//!
//! let m = Mat3::from_rows([
//!     [-2.0, -1.0,  2.0],
//!     [ 2.0,  1.0,  4.0],
//!     [-3.0,  3.0, -1.0],
//! ]);
//! assert_eq!(m.determinant(), 54.0);
//!
//! let inv = m.inverse().expect("matrix is invertible");
//! approx::assert_abs_diff_eq!(m * inv, Mat3::identity(), epsilon = 1e-12);
//! ```

mod array;
mod error;
mod matrix;
pub mod shape;
mod tensor;
mod traits;
mod vector;
mod view;

pub use array::*;
pub use error::*;
pub use matrix::*;
pub use shape::{Nested, Rank0, Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Shape};
pub use tensor::*;
pub use traits::*;
pub use vector::*;
pub use view::*;
