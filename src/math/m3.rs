// 3×3 row-major matrices for 2D affine transforms
//
// Same layout and multiplication order as `m4`, with the translation in the
// last row and the last column fixed at `(0, 0, 1)`.

pub type Mat3 = [f32; 9];

#[rustfmt::skip]
pub const IDENTITY: Mat3 = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];

/// Map pixel space `[0,width]×[0,height]` into clip space, Y flipped.
#[rustfmt::skip]
pub fn projection(width: f32, height: f32) -> Mat3 {
    [
        2.0 / width, 0.0,           0.0,
        0.0,         -2.0 / height, 0.0,
        -1.0,        1.0,           1.0,
    ]
}

/// Product `b · a`: `b` is applied to a point first, then `a`.
///
/// Same order as [`super::m4::multiply`].
pub fn multiply(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [0.0f32; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] =
                b[row * 3] * a[col] + b[row * 3 + 1] * a[3 + col] + b[row * 3 + 2] * a[6 + col];
        }
    }
    out
}

#[rustfmt::skip]
pub fn translation(tx: f32, ty: f32) -> Mat3 {
    [
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        tx,  ty,  1.0,
    ]
}

/// Rotation in the plane, same signs as [`super::m4::z_rotation`] so one
/// angle turns the flat and the solid F the same way.
#[rustfmt::skip]
pub fn rotation(angle_in_radians: f32) -> Mat3 {
    let (s, c) = angle_in_radians.sin_cos();
    [
        c,   s,   0.0,
        -s,  c,   0.0,
        0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn scaling(sx: f32, sy: f32) -> Mat3 {
    [
        sx,  0.0, 0.0,
        0.0, sy,  0.0,
        0.0, 0.0, 1.0,
    ]
}

pub fn translate(m: &Mat3, tx: f32, ty: f32) -> Mat3 {
    multiply(m, &translation(tx, ty))
}

pub fn rotate(m: &Mat3, angle_in_radians: f32) -> Mat3 {
    multiply(m, &rotation(angle_in_radians))
}

pub fn scale(m: &Mat3, sx: f32, sy: f32) -> Mat3 {
    multiply(m, &scaling(sx, sy))
}

/// Apply `m` to the point `(x, y, 1)` as a row vector.
pub fn transform_point(m: &Mat3, point: [f32; 2]) -> [f32; 3] {
    let v = [point[0], point[1], 1.0];
    let mut out = [0.0f32; 3];
    for (col, slot) in out.iter_mut().enumerate() {
        *slot = v[0] * m[col] + v[1] * m[3 + col] + v[2] * m[6 + col];
    }
    out
}

/// Widen each 3-float row to 4 floats.
///
/// WGSL lays out a `mat3x3<f32>` uniform with a 16-byte stride per column.
pub fn to_padded_columns(m: &Mat3) -> [[f32; 4]; 3] {
    [
        [m[0], m[1], m[2], 0.0],
        [m[3], m[4], m[5], 0.0],
        [m[6], m[7], m[8], 0.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn identity_laws() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(multiply(&IDENTITY, &m), m);
        assert_eq!(multiply(&m, &IDENTITY), m);
        assert_eq!(translation(0.0, 0.0), IDENTITY);
        assert_eq!(scaling(1.0, 1.0), IDENTITY);
        assert_eq!(rotation(0.0), IDENTITY);
    }

    #[test]
    fn projection_flips_y() {
        let p = projection(400.0, 300.0);
        let top_left = transform_point(&p, [0.0, 0.0]);
        assert_abs_diff_eq!(top_left[0], -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(top_left[1], 1.0, epsilon = 1e-5);
        let bottom_right = transform_point(&p, [400.0, 300.0]);
        assert_abs_diff_eq!(bottom_right[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(bottom_right[1], -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(bottom_right[2], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn quarter_rotation() {
        let p = transform_point(&rotation(FRAC_PI_2), [1.0, 0.0]);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_matches_4x4_z_rotation() {
        let flat = rotation(0.6);
        let full = super::super::m4::z_rotation(0.6);
        assert_eq!([flat[0], flat[1], flat[3], flat[4]], [full[0], full[1], full[4], full[5]]);
    }

    #[test]
    fn multiply_applies_second_argument_first() {
        let m = multiply(&translation(10.0, 0.0), &scaling(2.0, 1.0));
        assert_eq!(transform_point(&m, [1.0, 0.0])[0], 12.0);
    }

    #[test]
    fn chain_scales_then_translates() {
        let m = scale(&translate(&IDENTITY, 10.0, 20.0), 2.0, 3.0);
        let p = transform_point(&m, [1.0, 1.0]);
        assert_abs_diff_eq!(p[0], 12.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p[1], 23.0, epsilon = 1e-5);
    }

    #[test]
    fn rotate_combinator_matches_multiply() {
        let m = projection(640.0, 480.0);
        assert_eq!(rotate(&m, FRAC_PI_3), multiply(&m, &rotation(FRAC_PI_3)));
    }

    #[test]
    fn padded_columns_keep_values_in_order() {
        let cols = to_padded_columns(&translation(7.0, 8.0));
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(cols[2], [7.0, 8.0, 1.0, 0.0]);
    }
}
