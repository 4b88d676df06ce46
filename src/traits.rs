use std::ops;

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Element types that support the basic arithmetic operations of a [field].
///
/// This is the capability required by everything in this crate that does actual algebra (matrix
/// products, determinants, inverses, dot and cross products). Element-wise operators on
/// [`Array`][crate::Array] and [`Tensor`][crate::Tensor] only require the individual operator they
/// use.
///
/// Note that the field axioms (associativity, commutativity, distributivity, existence of inverses)
/// are *not* checked; floating-point numbers famously violate several of them. Unsigned integers
/// do not implement [`ops::Neg`] and are therefore not a [`Field`].
///
/// [field]: https://en.wikipedia.org/wiki/Field_(mathematics)
#[doc(alias = "AlgebraicElement")]
pub trait Field:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Field for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

macro_rules! int_identities {
    ($($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0;
            }
            impl One for $types {
                const ONE: Self = 1;
            }
        )+
    };
}
int_identities!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Zero for f32 {
    const ZERO: Self = 0.0;
}
impl Zero for f64 {
    const ZERO: Self = 0.0;
}
impl One for f32 {
    const ONE: Self = 1.0;
}
impl One for f64 {
    const ONE: Self = 1.0;
}

impl Sqrt for f32 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}
impl Sqrt for f64 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}
