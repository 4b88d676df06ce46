//! Randomized checks of the algebraic identities, with `nalgebra` as the reference for determinants
//! and inverses.

use anyhow::Context;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use euclidean::*;
use fastrand::Rng;

const ITERATIONS: usize = 50;

fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn random_matrix<const R: usize, const C: usize>(rng: &mut Rng) -> Matrix<f64, R, C> {
    Matrix::from_fn(|_, _| rng.f64() * 4.0 - 2.0)
}

/// Diagonally dominant, and therefore never singular.
fn invertible_matrix<const N: usize>(rng: &mut Rng) -> Matrix<f64, N, N> {
    let mut mat = random_matrix::<N, N>(rng);
    for i in 0..N {
        mat[(i, i)] += 4.0 * N as f64;
    }
    mat
}

fn reference<const R: usize, const C: usize>(mat: &Matrix<f64, R, C>) -> nalgebra::SMatrix<f64, R, C> {
    nalgebra::SMatrix::<f64, R, C>::from_row_slice(mat.as_slice())
}

#[test]
fn determinant_matches_reference() {
    init_logger();

    macro_rules! check {
        ($($n:literal),+) => {$({
            let mut rng = Rng::with_seed($n);
            for _ in 0..ITERATIONS {
                let mat = random_matrix::<$n, $n>(&mut rng);
                let expected = reference(&mat).determinant();
                assert_relative_eq!(mat.determinant(), expected, epsilon = 1e-9, max_relative = 1e-9);
                assert_relative_eq!(mat.transpose().determinant(), expected, epsilon = 1e-9, max_relative = 1e-9);
            }
        })+};
    }

    check!(1, 2, 3, 4, 5, 6);
}

#[test]
fn inverse_matches_reference() -> anyhow::Result<()> {
    init_logger();

    macro_rules! check {
        ($($n:literal),+) => {$({
            let mut rng = Rng::with_seed(100 + $n);
            for _ in 0..ITERATIONS {
                let mat = invertible_matrix::<$n>(&mut rng);
                let inverse = mat.inverse().with_context(|| format!("{mat:?} should be invertible"))?;
                let expected = reference(&mat)
                    .try_inverse()
                    .context("reference implementation failed to invert")?;
                for row in 0..$n {
                    for col in 0..$n {
                        assert_relative_eq!(inverse[(row, col)], expected[(row, col)], epsilon = 1e-12);
                    }
                }
                assert_abs_diff_eq!(mat * inverse, Matrix::identity(), epsilon = 1e-12);
                assert_abs_diff_eq!(inverse.inverse().context("inverse of an inverse")?, mat, epsilon = 1e-9);
            }
        })+};
    }

    check!(1, 2, 3, 4, 5, 6);
    Ok(())
}

#[test]
fn singular_matrices_have_no_inverse() {
    init_logger();

    macro_rules! check {
        ($($n:literal),+) => {$({
            let mut rng = Rng::with_seed(200 + $n);
            for _ in 0..ITERATIONS {
                let mut mat = Matrix::<i64, $n, $n>::from_fn(|_, _| rng.i64(-9..=9));
                // Make the last row a multiple of the first.
                for col in 0..$n {
                    mat[($n - 1, col)] = mat[(0, col)] * 2;
                }
                assert_eq!(mat.determinant(), 0);
                assert_eq!(mat.map(|x| x as f64).inverse(), None);
            }
        })+};
    }

    check!(2, 3, 4, 5);
}

#[test]
fn transpose_identities() {
    let mut rng = Rng::with_seed(1);
    for _ in 0..ITERATIONS {
        let a = random_matrix::<2, 3>(&mut rng);
        let b = random_matrix::<3, 4>(&mut rng);
        assert_eq!(a.transpose().transpose(), a);
        assert_relative_eq!((a * b).transpose(), b.transpose() * a.transpose());
        assert_relative_eq!(reference(&(a * b)), reference(&a) * reference(&b), epsilon = 1e-12);
    }
}

#[test]
fn product_is_associative() {
    let mut rng = Rng::with_seed(2);
    for _ in 0..ITERATIONS {
        let a = Matrix::<i64, 2, 3>::from_fn(|_, _| rng.i64(-100..100));
        let b = Matrix::<i64, 3, 4>::from_fn(|_, _| rng.i64(-100..100));
        let c = Matrix::<i64, 4, 2>::from_fn(|_, _| rng.i64(-100..100));
        assert_eq!((a * b) * c, a * (b * c));
        assert_eq!(a * Matrix::<i64, 3, 3>::identity(), a);
    }
}

#[test]
fn cross_product_is_orthogonal() {
    let mut rng = Rng::with_seed(3);
    for _ in 0..ITERATIONS {
        let a = vec3(rng.i32(-1000..1000), rng.i32(-1000..1000), rng.i32(-1000..1000)).map(i64::from);
        let b = vec3(rng.i32(-1000..1000), rng.i32(-1000..1000), rng.i32(-1000..1000)).map(i64::from);
        let c = a.cross(b);
        assert_eq!(c.dot(a), 0);
        assert_eq!(c.dot(b), 0);
        assert_eq!(b.cross(a), -c);

        // The cross product is the determinant of the matrix with rows `a` and `b`, expanded along
        // a row of unit vectors.
        let m = Matrix::from_rows([a.into_array(), b.into_array(), [0, 0, 1]]);
        assert_eq!(c.z, m.determinant());
    }
}

#[test]
fn scalar_broadcast_matches_splat() {
    let mut rng = Rng::with_seed(4);
    for _ in 0..ITERATIONS {
        let array = Array3::<i32, 2, 3, 4>::from_fn(|_| rng.i32(-1000..1000));
        let scalar = rng.i32(1..100);
        let splat = Array3::splat(scalar);
        assert_eq!(array + scalar, array + splat);
        assert_eq!(array - scalar, array - splat);
        assert_eq!(array * scalar, array * splat);
        assert_eq!(array / scalar, array / splat);
        assert_eq!(scalar - array, splat - array);
        assert_eq!(array % scalar, array % splat);
        assert!((array * scalar).eq_elementwise(&(scalar * array)).all());
    }
}

#[test]
fn views_visit_elements_in_storage_order() {
    let array = Array3::<u32, 3, 2, 4>::from_fn(|i| i as u32);
    let mut flat = Vec::new();
    for plane in array.iterate() {
        for row in plane {
            flat.extend(row.as_slice().iter().copied());
        }
    }
    assert_eq!(flat, array.as_slice());

    for i in 0..3 {
        for j in 0..2 {
            for k in 0..4 {
                let offset = i * 8 + j * 4 + k;
                assert_eq!(array[[i, j, k]], offset as u32);
                assert_eq!(array.get([i, j, k]), Ok(&array[offset]));
            }
        }
    }
}

#[test]
fn tensors_interoperate_with_matrices() -> anyhow::Result<()> {
    let mut rng = Rng::with_seed(5);
    for _ in 0..ITERATIONS {
        let mat = Matrix::<i64, 2, 3>::from_fn(|_, _| rng.i64(-50..50));
        let vec = vec3(rng.i64(-50..50), rng.i64(-50..50), rng.i64(-50..50));

        let tensor = MatrixTensor::from(mat);
        assert_eq!(tensor.as_slice(), mat.as_slice());
        assert_eq!(Matrix::from(tensor), mat);

        let product = matrix_product(tensor, VectorTensor::from(vec));
        assert_eq!(Vector::from(product), mat * vec);

        let elements = VectorTensor::<i64, 3>::try_from_slice(vec.as_slice())?;
        assert_eq!(Vector::from(elements), vec);
    }
    Ok(())
}
