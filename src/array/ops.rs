//! Element-wise implementations of `std::ops`.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Sub, SubAssign,
};

use crate::{Array, Shape};

/// Element-wise negation.
impl<T, S: Shape> Neg for Array<T, S>
where
    T: Neg,
{
    type Output = Array<T::Output, S>;

    fn neg(self) -> Self::Output {
        self.map(T::neg)
    }
}

/// Element-wise logical (or bitwise) negation.
impl<T, S: Shape> Not for Array<T, S>
where
    T: Not,
{
    type Output = Array<T::Output, S>;

    fn not(self) -> Self::Output {
        self.map(T::not)
    }
}

// NB: both operands share the element type `T`. A more general `Add<Array<U, S>>` impl would
// overlap with the array-scalar impls; mixed element types can use `zip_map` and `map_scalar`.

macro_rules! elementwise_ops {
    ($(
        $trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident, $what:literal;
    )+) => {
        $(
            #[doc = concat!("Element-wise ", $what, ".")]
            impl<T, S: Shape> $trait<Array<T, S>> for Array<T, S>
            where
                T: $trait,
            {
                type Output = Array<T::Output, S>;

                fn $method(self, rhs: Array<T, S>) -> Self::Output {
                    self.zip_map(rhs, T::$method)
                }
            }

            #[doc = concat!("Element-wise ", $what, ".")]
            impl<T, S: Shape> $assign_trait<Array<T, S>> for Array<T, S>
            where
                T: $assign_trait,
            {
                fn $assign_method(&mut self, rhs: Array<T, S>) {
                    self.apply(rhs, T::$assign_method);
                }
            }

            #[doc = concat!("Array-scalar ", $what, " (`array[i] op scalar`).")]
            impl<T, S: Shape> $trait<T> for Array<T, S>
            where
                T: $trait + Clone,
            {
                type Output = Array<T::Output, S>;

                fn $method(self, rhs: T) -> Self::Output {
                    self.map_scalar(rhs, T::$method)
                }
            }

            #[doc = concat!("Array-scalar ", $what, " (`array[i] op scalar`).")]
            impl<T, S: Shape> $assign_trait<T> for Array<T, S>
            where
                T: $assign_trait + Clone,
            {
                fn $assign_method(&mut self, rhs: T) {
                    self.apply_scalar(rhs, T::$assign_method);
                }
            }
        )+
    };
}

elementwise_ops! {
    Add::add, AddAssign::add_assign, "addition";
    Sub::sub, SubAssign::sub_assign, "subtraction";
    Mul::mul, MulAssign::mul_assign, "multiplication";
    Div::div, DivAssign::div_assign, "division";
    Rem::rem, RemAssign::rem_assign, "remainder";
    BitAnd::bitand, BitAndAssign::bitand_assign, "bitwise and";
    BitOr::bitor, BitOrAssign::bitor_assign, "bitwise or";
    BitXor::bitxor, BitXorAssign::bitxor_assign, "bitwise xor";
}

// Scalar-array operations (`scalar op array[i]`) can only be implemented for concrete scalar types.
macro_rules! scalar_array_ops {
    ($($t:ty),+) => {
        $(
            scalar_array_ops!(@impl $t; Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);
        )+
    };
    (@impl $t:ty; $($trait:ident::$method:ident),+) => {
        $(
            impl<S: Shape> $trait<Array<$t, S>> for $t {
                type Output = Array<$t, S>;

                fn $method(self, rhs: Array<$t, S>) -> Self::Output {
                    rhs.scalar_map(self, <$t as $trait>::$method)
                }
            }
        )+
    };
}

scalar_array_ops!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{Array1, Array2, Array3};

    #[test]
    fn arithmetic() {
        let a = Array2::from_nested([[1, 2], [3, 4]]);
        let b = Array2::from_nested([[5, 6], [7, 8]]);

        assert_eq!(a + b, Array2::from_nested([[6, 8], [10, 12]]));
        assert_eq!(a - b, Array2::from_nested([[-4, -4], [-4, -4]]));
        assert_eq!(a * b, Array2::from_nested([[5, 12], [21, 32]]));
        assert_eq!(b / a, Array2::from_nested([[5, 3], [2, 2]]));
        assert_eq!(b % a, Array2::from_nested([[0, 0], [1, 0]]));
        assert_eq!(-a, Array2::from_nested([[-1, -2], [-3, -4]]));

        assert_eq!(a + b, b + a);
        assert_eq!(a - a, Array2::<i32, 2, 2>::zero());
    }

    #[test]
    fn scalar_broadcast() {
        let a = Array1::<f64, 3>::from_nested([1.0, 2.0, 4.0]);

        let scaled = a * 3.0;
        let scaled_lhs = 3.0 * a;
        for i in 0..3 {
            assert_eq!(scaled[i], a[i] * 3.0);
            assert_eq!(scaled_lhs[i], 3.0 * a[i]);
        }

        // Operand order matters for non-commutative operations.
        assert_eq!(a / 2.0, Array1::from_nested([0.5, 1.0, 2.0]));
        assert_eq!(2.0 / a, Array1::from_nested([2.0, 1.0, 0.5]));
        assert_eq!(a - 1.0, Array1::from_nested([0.0, 1.0, 3.0]));
        assert_eq!(1.0 - a, Array1::from_nested([0.0, -1.0, -3.0]));
        assert_eq!(10i32 % Array1::from_nested([3, 4]), Array1::from_nested([1, 2]));
    }

    #[test]
    fn compound_assignment() {
        let mut a = Array1::from_nested([1, 2, 3]);
        a += Array1::from_nested([1, 1, 1]);
        a *= 2;
        a -= 1;
        a /= Array1::from_nested([1, 5, 7]);
        a %= 2;
        assert_eq!(a, Array1::from_nested([1, 1, 1]));

        let mut bits = Array1::from_nested([0b1100u8, 0b1010]);
        bits &= Array1::from_nested([0b0110, 0b0110]);
        bits |= 0b0001;
        bits ^= Array1::from_nested([0b0001, 0b0000]);
        assert_eq!(bits, Array1::from_nested([0b0100, 0b0011]));
    }

    #[test]
    fn boolean_logic() {
        let a = Array1::from_nested([true, true, false, false]);
        let b = Array1::from_nested([true, false, true, false]);
        assert_eq!(a & b, Array1::from_nested([true, false, false, false]));
        assert_eq!(a | b, Array1::from_nested([true, true, true, false]));
        assert_eq!(a ^ b, Array1::from_nested([false, true, true, false]));
        assert_eq!(!a, Array1::from_nested([false, false, true, true]));
        assert_eq!(!Array1::from_nested([0u8, 0xf0]), Array1::from_nested([0xff, 0x0f]));
    }

    #[test]
    fn float_division_by_zero() {
        let numerators = Array1::from_nested([1.0, -1.0, 0.0]);
        let quotient = numerators / Array1::<f64, 3>::zero();
        assert_eq!(quotient[0], f64::INFINITY);
        assert_eq!(quotient[1], f64::NEG_INFINITY);
        assert!(quotient[2].is_nan());

        let quotient = numerators / 0.0;
        assert_eq!(quotient[0], f64::INFINITY);
        assert!(quotient[2].is_nan());
    }

    #[test]
    #[should_panic]
    fn integer_division_by_zero() {
        let _ = Array1::from_nested([1, 2]) / Array1::from_nested([1, 0]);
    }

    #[test]
    fn associativity() {
        let a = Array3::<f64, 2, 2, 2>::from_fn(|i| i as f64 * 0.1);
        let b = Array3::<f64, 2, 2, 2>::from_fn(|i| 1.0 / (i as f64 + 1.0));
        let c = Array3::<f64, 2, 2, 2>::splat(0.3);
        assert_relative_eq!((a + b) + c, a + (b + c), epsilon = 1e-12);
    }
}
