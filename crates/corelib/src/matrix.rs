//! Flat row-major matrices and their composition.
//!
//! Layout follows the WebGL convention: a 3x3 stores the 2D translation in its
//! bottom row (elements 6 and 7), a 4x4 stores the 3D translation in elements
//! 12..14. Read column-major, the same arrays are exactly glam's layout, which
//! is what the `From` conversions below rely on.

use std::fmt;
use std::ops::{Index, Mul};

use glam::{DMat3, DMat4};
use xform_core::{XformError, XformResult};

/// Three numbers without an implicit homogeneous component.
pub type Vector3 = [f64; 3];
/// Homogeneous point or direction.
pub type Vector4 = [f64; 4];

/// 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3x3(pub [f64; 9]);

/// 3D affine or projective transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4x4(pub [f64; 16]);

impl Matrix3x3 {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.0[row * 3 + col]
    }

    #[inline]
    pub fn to_f32_array(&self) -> [f32; 9] {
        self.0.map(|v| v as f32)
    }
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
    pub const ZERO: Self = Self([0.0; 16]);

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.0[row * 4 + col]
    }

    #[inline]
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.0.map(|v| v as f32)
    }

    /// Rows as `[[f32; 4]; 4]`, the shape uniform buffers expect.
    pub fn to_f32_rows(&self) -> [[f32; 4]; 4] {
        let f = self.to_f32_array();
        [
            [f[0], f[1], f[2], f[3]],
            [f[4], f[5], f[6], f[7]],
            [f[8], f[9], f[10], f[11]],
            [f[12], f[13], f[14], f[15]],
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Matrix3x3 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// `a * b` is `multiply_3d(&[a, b])`: `b` becomes the left-hand operand of
/// the row-major product.
impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        product_4(&rhs, &self)
    }
}

impl Mul for Matrix3x3 {
    type Output = Matrix3x3;

    fn mul(self, rhs: Matrix3x3) -> Matrix3x3 {
        product_3(&rhs, &self)
    }
}

impl fmt::Display for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks_exact(3) {
            writeln!(f, "[{:>12.6} {:>12.6} {:>12.6}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks_exact(4) {
            writeln!(
                f,
                "[{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

impl From<Matrix4x4> for DMat4 {
    #[inline]
    fn from(m: Matrix4x4) -> Self {
        DMat4::from_cols_array(&m.0)
    }
}

impl From<DMat4> for Matrix4x4 {
    #[inline]
    fn from(m: DMat4) -> Self {
        Matrix4x4(m.to_cols_array())
    }
}

impl From<Matrix3x3> for DMat3 {
    #[inline]
    fn from(m: Matrix3x3) -> Self {
        DMat3::from_cols_array(&m.0)
    }
}

impl From<DMat3> for Matrix3x3 {
    #[inline]
    fn from(m: DMat3) -> Self {
        Matrix3x3(m.to_cols_array())
    }
}

/// Row-major `l * r`, term order kept fixed so results are reproducible bit for bit.
fn product_3(l: &Matrix3x3, r: &Matrix3x3) -> Matrix3x3 {
    let (l, r) = (&l.0, &r.0);
    let mut out = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] =
                l[row * 3] * r[col] + l[row * 3 + 1] * r[3 + col] + l[row * 3 + 2] * r[6 + col];
        }
    }
    Matrix3x3(out)
}

fn product_4(l: &Matrix4x4, r: &Matrix4x4) -> Matrix4x4 {
    let (l, r) = (&l.0, &r.0);
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = l[row * 4] * r[col]
                + l[row * 4 + 1] * r[4 + col]
                + l[row * 4 + 2] * r[8 + col]
                + l[row * 4 + 3] * r[12 + col];
        }
    }
    Matrix4x4(out)
}

/// Fold `rest` onto `first`: every next matrix is the left operand and the
/// accumulated result the right one, `m_n * (... * (m_2 * m_1))`.
pub(crate) fn compose_2d(first: Matrix3x3, rest: &[Matrix3x3]) -> Matrix3x3 {
    rest.iter().fold(first, |acc, next| product_3(next, &acc))
}

pub(crate) fn compose_3d(first: Matrix4x4, rest: &[Matrix4x4]) -> Matrix4x4 {
    rest.iter().fold(first, |acc, next| product_4(next, &acc))
}

/// Compose 2D transforms in the order given. Fails with [`XformError::NoMatrix`]
/// on an empty slice.
pub fn multiply_2d(matrices: &[Matrix3x3]) -> XformResult<Matrix3x3> {
    let (first, rest) = matrices.split_first().ok_or(XformError::NoMatrix)?;
    Ok(compose_2d(*first, rest))
}

/// Compose 3D transforms in the order given. Fails with [`XformError::NoMatrix`]
/// on an empty slice.
pub fn multiply_3d(matrices: &[Matrix4x4]) -> XformResult<Matrix4x4> {
    let (first, rest) = matrices.split_first().ok_or(XformError::NoMatrix)?;
    Ok(compose_3d(*first, rest))
}

pub fn transpose(m: &Matrix4x4) -> Matrix4x4 {
    let m = &m.0;
    Matrix4x4([
        m[0], m[4], m[8], m[12], //
        m[1], m[5], m[9], m[13], //
        m[2], m[6], m[10], m[14], //
        m[3], m[7], m[11], m[15],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix4x4 {
        Matrix4x4([
            2.0, 0.5, -1.0, 0.0, //
            1.0, 3.0, 0.25, 0.0, //
            0.0, -2.0, 1.5, 0.0, //
            4.0, 5.0, 6.0, 1.0,
        ])
    }

    #[test]
    fn empty_list_is_an_error() {
        assert_eq!(multiply_2d(&[]), Err(XformError::NoMatrix));
        assert_eq!(multiply_3d(&[]), Err(XformError::NoMatrix));
    }

    #[test]
    fn single_matrix_passes_through() {
        let m = sample();
        assert_eq!(multiply_3d(&[m]).unwrap(), m);
    }

    #[test]
    fn identity_law() {
        let m = sample();
        assert_eq!(multiply_3d(&[Matrix4x4::IDENTITY, m]).unwrap(), m);
        assert_eq!(multiply_3d(&[m, Matrix4x4::IDENTITY]).unwrap(), m);

        let m2 = Matrix3x3([1.0, 2.0, 0.0, -3.0, 0.5, 0.0, 7.0, 8.0, 1.0]);
        assert_eq!(multiply_2d(&[Matrix3x3::IDENTITY, m2]).unwrap(), m2);
        assert_eq!(multiply_2d(&[m2, Matrix3x3::IDENTITY]).unwrap(), m2);
    }

    #[test]
    fn later_matrix_is_left_operand() {
        let t = Matrix3x3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 0.0, 1.0]);
        let s = Matrix3x3([2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0]);

        // s · t: the translation row passes through the scale untouched.
        let ts = multiply_2d(&[t, s]).unwrap();
        assert_eq!(ts.0, product_3(&s, &t).0);
        assert_eq!(ts.0[6], 5.0);
        assert_eq!(ts.0[0], 2.0);

        // t · s: the translation row gets scaled.
        let st = multiply_2d(&[s, t]).unwrap();
        assert_eq!(st.0[6], 10.0);
    }

    #[test]
    fn three_way_fold_order() {
        let m1 = sample();
        let m2 = transpose(&sample());
        let m3 = Matrix4x4([
            1.0, 2.0, 3.0, 4.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            -1.0, 0.0, 2.0, 1.0,
        ]);
        let folded = multiply_3d(&[m1, m2, m3]).unwrap();
        let explicit = product_4(&m3, &product_4(&m2, &m1));
        assert_eq!(folded, explicit);
        assert_eq!(m1 * m2 * m3, folded);
    }

    #[test]
    fn mul_matches_glam() {
        let a = sample();
        let b = Matrix4x4([
            0.0, 1.0, 0.0, 0.0, //
            -1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 2.0, 0.0, //
            3.0, -4.0, 1.0, 1.0,
        ]);
        let ours = DMat4::from(a * b);
        let theirs = DMat4::from(a) * DMat4::from(b);
        assert!(ours.abs_diff_eq(theirs, 1e-12));
    }

    #[test]
    fn transpose_is_an_involution() {
        let m = sample();
        assert_eq!(transpose(&transpose(&m)), m);
        assert_eq!(transpose(&m).at(0, 3), m.at(3, 0));
    }

    #[test]
    fn transpose_does_not_alias_identity() {
        let t = transpose(&sample());
        assert_eq!(Matrix4x4::IDENTITY.0[12], 0.0);
        assert_eq!(t.0[3], 4.0);
    }

    #[test]
    fn glam_roundtrip_keeps_translation_slot() {
        let m = sample();
        let g = DMat4::from(m);
        assert_eq!(g.w_axis.x, 4.0);
        assert_eq!(g.w_axis.y, 5.0);
        assert_eq!(g.w_axis.z, 6.0);
        assert_eq!(Matrix4x4::from(g), m);
    }

    #[test]
    fn f32_rows_follow_flat_layout() {
        let rows = sample().to_f32_rows();
        assert_eq!(rows[3], [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(rows[1][2], 0.25);
    }
}
