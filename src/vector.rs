use crate::{traits::Sqrt, Array2, Field, Matrix, One, Zero};

mod view;

pub use view::{X, XY, XYZ, XYZW};

/// An `N`-element column vector storing elements of type `T`.
///
/// Vectors are [`Matrix`]es with a single column, so everything a matrix supports works for vectors
/// too. In particular, `Matrix * Vector` is simply a matrix product.
///
/// # Construction
///
/// - The freestanding [`vec1`], [`vec2`], [`vec3`] and [`vec4`] functions directly create vectors
///   from provided values.
/// - Vectors can be created from arrays using their [`From`] implementation.
/// - For vectors with up to 4 dimensions, `Vector::X`, `Vector::Y`, `Vector::Z` and `Vector::W` can
///   be used to obtain unit vectors pointing in the given direction.
///
/// # Element Access
///
/// - For vectors with up to 4 dimensions, elements can be accessed as fields `x`, `y`, `z`, or `w`.
/// - Indexing with a single `usize` accesses the N-th component.
/// - [`Vector::into_array`] and the [`From`] impl for arrays convert a vector back into its
///   components.
///
/// ```
/// # use euclidean::*;
/// let mut v = vec3(1, 2, 3);
/// v.y = 20;
/// assert_eq!(v[1], 20);
/// assert_eq!(v.x + v.z, 4);
/// ```
pub type Vector<T, const N: usize> = Matrix<T, N, 1>;

/// An `N`-element row vector storing elements of type `T`.
pub type Covector<T, const N: usize> = Matrix<T, 1, N>;

/// A 1-dimensional vector.
pub type Vec1<T> = Vector<T, 1>;
/// A 1-dimensional vector with [`f32`] elements.
pub type Vec1f = Vec1<f32>;
/// A 2-dimensional vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 2-dimensional vector with [`f32`] elements.
pub type Vec2f = Vec2<f32>;
/// A 3-dimensional vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 3-dimensional vector with [`f32`] elements.
pub type Vec3f = Vec3<f32>;
/// A 4-dimensional vector.
pub type Vec4<T> = Vector<T, 4>;
/// A 4-dimensional vector with [`f32`] elements.
pub type Vec4f = Vec4<f32>;

/// Creates a 1-dimensional vector.
#[inline]
pub const fn vec1<T>(x: T) -> Vec1<T> {
    Matrix::from_array(Array2::from_nested([[x]]))
}

/// Creates a 2-dimensional vector.
#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Matrix::from_array(Array2::from_nested([[x], [y]]))
}

/// Creates a 3-dimensional vector.
#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Matrix::from_array(Array2::from_nested([[x], [y], [z]]))
}

/// Creates a 4-dimensional vector.
#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Matrix::from_array(Array2::from_nested([[x], [y], [z], [w]]))
}

impl<T: Zero + One> Vector<T, 1> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = vec1(T::ONE);
}

impl<T: Zero + One> Vector<T, 2> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = vec2(T::ONE, T::ZERO);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = vec2(T::ZERO, T::ONE);
}

impl<T: Zero + One> Vector<T, 3> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = vec3(T::ONE, T::ZERO, T::ZERO);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = vec3(T::ZERO, T::ONE, T::ZERO);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = vec3(T::ZERO, T::ZERO, T::ONE);
}

impl<T: Zero + One> Vector<T, 4> {
    /// A unit vector pointing in the X direction.
    pub const X: Self = vec4(T::ONE, T::ZERO, T::ZERO, T::ZERO);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = vec4(T::ZERO, T::ONE, T::ZERO, T::ZERO);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = vec4(T::ZERO, T::ZERO, T::ONE, T::ZERO);
    /// A unit vector pointing in the W direction.
    pub const W: Self = vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE);
}

impl<T, const N: usize> Vector<T, N> {
    /// Converts this vector into an array of its components.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// let [x, y] = vec2(1, 2).into_array();
    /// assert_eq!((x, y), (1, 2));
    /// ```
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0.into_nested().map(|[elem]| elem)
    }

    /// Computes the dot product of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// assert_eq!(vec3(1, 2, 3).dot(vec3(4, 5, 6)), 32);
    /// ```
    pub fn dot(self, other: Self) -> T
    where
        T: Field,
    {
        (0..N).fold(T::ZERO, |acc, i| acc + self[i] * other[i])
    }

    /// Returns the squared length of this vector.
    pub fn length2(self) -> T
    where
        T: Field,
    {
        self.dot(self)
    }

    /// Returns the length (magnitude) of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// assert_eq!(vec3(0.0, 3.0, -4.0).length(), 5.0);
    /// ```
    pub fn length(self) -> T
    where
        T: Field + Sqrt,
    {
        self.length2().sqrt()
    }

    /// Returns a vector pointing in the same direction as `self`, with a length of 1.
    ///
    /// The zero vector has no direction; normalizing it divides by zero, which yields NaN components
    /// for floating-point element types.
    pub fn normalize(self) -> Self
    where
        T: Field + Sqrt,
    {
        self / self.length()
    }
}

impl<T: Field> Vector<T, 3> {
    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is orthogonal to both inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use euclidean::*;
    /// assert_eq!(vec3(1, 0, 0).cross(vec3(0, 1, 0)), vec3(0, 0, 1));
    /// assert_eq!(vec3(1, 2, 3).cross(vec3(4, 5, 6)), vec3(-3, 6, -3));
    /// ```
    pub fn cross(self, other: Self) -> Self {
        let [a1, a2, a3] = self.into_array();
        let [b1, b2, b3] = other.into_array();
        vec3(a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1)
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(elements: [T; N]) -> Self {
        Matrix::from_array(Array2::from_nested(elements.map(|elem| [elem])))
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(vector: Vector<T, N>) -> Self {
        vector.into_array()
    }
}
