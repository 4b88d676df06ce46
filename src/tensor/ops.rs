use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Sub, SubAssign,
};

use super::{Dimensions, Tensor};

/// Element-wise negation.
impl<T, D: Dimensions> Neg for Tensor<T, D>
where
    T: Neg,
{
    type Output = Tensor<T::Output, D>;

    fn neg(self) -> Self::Output {
        Tensor(-self.0)
    }
}

/// Element-wise logical (or bitwise) negation.
impl<T, D: Dimensions> Not for Tensor<T, D>
where
    T: Not,
{
    type Output = Tensor<T::Output, D>;

    fn not(self) -> Self::Output {
        Tensor(!self.0)
    }
}

macro_rules! elementwise_ops {
    ($(
        $trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident, $op:tt, $assign_op:tt;
    )+) => {
        $(
            impl<T, D: Dimensions> $trait<Tensor<T, D>> for Tensor<T, D>
            where
                T: $trait,
            {
                type Output = Tensor<T::Output, D>;

                fn $method(self, rhs: Tensor<T, D>) -> Self::Output {
                    Tensor(self.0 $op rhs.0)
                }
            }

            impl<T, D: Dimensions> $assign_trait<Tensor<T, D>> for Tensor<T, D>
            where
                T: $assign_trait,
            {
                fn $assign_method(&mut self, rhs: Tensor<T, D>) {
                    self.0 $assign_op rhs.0;
                }
            }

            impl<T, D: Dimensions> $trait<T> for Tensor<T, D>
            where
                T: $trait + Clone,
            {
                type Output = Tensor<T::Output, D>;

                fn $method(self, rhs: T) -> Self::Output {
                    Tensor(self.0 $op rhs)
                }
            }

            impl<T, D: Dimensions> $assign_trait<T> for Tensor<T, D>
            where
                T: $assign_trait + Clone,
            {
                fn $assign_method(&mut self, rhs: T) {
                    self.0 $assign_op rhs;
                }
            }
        )+
    };
}

elementwise_ops! {
    Add::add, AddAssign::add_assign, +, +=;
    Sub::sub, SubAssign::sub_assign, -, -=;
    Mul::mul, MulAssign::mul_assign, *, *=;
    Div::div, DivAssign::div_assign, /, /=;
    Rem::rem, RemAssign::rem_assign, %, %=;
    BitAnd::bitand, BitAndAssign::bitand_assign, &, &=;
    BitOr::bitor, BitOrAssign::bitor_assign, |, |=;
    BitXor::bitxor, BitXorAssign::bitxor_assign, ^, ^=;
}

macro_rules! scalar_tensor_ops {
    ($($t:ty),+) => {
        $(
            scalar_tensor_ops!(@impl $t; Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);
        )+
    };
    (@impl $t:ty; $($trait:ident::$method:ident),+) => {
        $(
            impl<D: Dimensions> $trait<Tensor<$t, D>> for $t {
                type Output = Tensor<$t, D>;

                fn $method(self, rhs: Tensor<$t, D>) -> Self::Output {
                    rhs.scalar_map(self, <$t as $trait>::$method)
                }
            }
        )+
    };
}

scalar_tensor_ops!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
