// 4×4 row-major transform matrices
//
// Element (row `r`, column `c`) lives at index `r * 4 + c`, translation in the
// last row. Points are row vectors multiplied on the left of a matrix, so the
// flat array can be handed to a `mat4x4<f32>` uniform as-is.

/// Flat 4×4 matrix, row-major.
pub type Mat4 = [f32; 16];

#[rustfmt::skip]
pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Map pixel space `[0,width]×[0,height]×[0,depth]` into clip space.
///
/// Y is flipped so that pixel row 0 is the top of the viewport.
#[rustfmt::skip]
pub fn projection(width: f32, height: f32, depth: f32) -> Mat4 {
    [
        2.0 / width, 0.0,           0.0,         0.0,
        0.0,         -2.0 / height, 0.0,         0.0,
        0.0,         0.0,           2.0 / depth, 0.0,
        -1.0,        1.0,           0.0,         1.0,
    ]
}

/// Product `b · a`: `b` is applied to a point first, then `a`.
///
/// With row vectors, `v · (b · a) = (v · b) · a`. The combinators below pass
/// the accumulated matrix as `a`, so each new transform runs before everything
/// already in `m`.
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0f32; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = b[row * 4] * a[col]
                + b[row * 4 + 1] * a[4 + col]
                + b[row * 4 + 2] * a[8 + col]
                + b[row * 4 + 3] * a[12 + col];
        }
    }
    out
}

#[rustfmt::skip]
pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        tx,  ty,  tz,  1.0,
    ]
}

#[rustfmt::skip]
pub fn x_rotation(angle_in_radians: f32) -> Mat4 {
    let (s, c) = angle_in_radians.sin_cos();
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, c,   s,   0.0,
        0.0, -s,  c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Rotation about Y.
///
/// The sine terms are mirrored relative to [`x_rotation`] and [`z_rotation`];
/// rendered output depends on this pattern.
#[rustfmt::skip]
pub fn y_rotation(angle_in_radians: f32) -> Mat4 {
    let (s, c) = angle_in_radians.sin_cos();
    [
        c,   0.0, -s,  0.0,
        0.0, 1.0, 0.0, 0.0,
        s,   0.0, c,   0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn z_rotation(angle_in_radians: f32) -> Mat4 {
    let (s, c) = angle_in_radians.sin_cos();
    [
        c,   s,   0.0, 0.0,
        -s,  c,   0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
    [
        sx,  0.0, 0.0, 0.0,
        0.0, sy,  0.0, 0.0,
        0.0, 0.0, sz,  0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

pub fn translate(m: &Mat4, tx: f32, ty: f32, tz: f32) -> Mat4 {
    multiply(m, &translation(tx, ty, tz))
}

pub fn x_rotate(m: &Mat4, angle_in_radians: f32) -> Mat4 {
    multiply(m, &x_rotation(angle_in_radians))
}

pub fn y_rotate(m: &Mat4, angle_in_radians: f32) -> Mat4 {
    multiply(m, &y_rotation(angle_in_radians))
}

pub fn z_rotate(m: &Mat4, angle_in_radians: f32) -> Mat4 {
    multiply(m, &z_rotation(angle_in_radians))
}

pub fn scale(m: &Mat4, sx: f32, sy: f32, sz: f32) -> Mat4 {
    multiply(m, &scaling(sx, sy, sz))
}

/// Apply `m` to the point `(x, y, z, 1)` as a row vector.
///
/// Returns the homogeneous result `[x, y, z, w]`.
pub fn transform_point(m: &Mat4, point: [f32; 3]) -> [f32; 4] {
    let v = [point[0], point[1], point[2], 1.0];
    let mut out = [0.0f32; 4];
    for (col, slot) in out.iter_mut().enumerate() {
        *slot = v[0] * m[col] + v[1] * m[4 + col] + v[2] * m[8 + col] + v[3] * m[12 + col];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-6;

    fn assert_mat_eq(a: &Mat4, b: &Mat4, epsilon: f32) {
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).abs() <= epsilon, "mismatch at index {i}: {x} vs {y}");
        }
    }

    fn sample() -> Mat4 {
        [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ]
    }

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let m = sample();
        assert_eq!(multiply(&IDENTITY, &m), m);
        assert_eq!(multiply(&m, &IDENTITY), m);
    }

    #[test]
    fn zero_translation_and_unit_scaling_are_identity() {
        assert_eq!(translation(0.0, 0.0, 0.0), IDENTITY);
        assert_eq!(scaling(1.0, 1.0, 1.0), IDENTITY);
    }

    #[test]
    fn zero_rotations_are_identity() {
        assert_eq!(x_rotation(0.0), IDENTITY);
        assert_eq!(y_rotation(0.0), IDENTITY);
        assert_eq!(z_rotation(0.0), IDENTITY);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let p = transform_point(&z_rotation(FRAC_PI_2), [1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = EPS);
        assert_abs_diff_eq!(p[1], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(p[2], 0.0, epsilon = EPS);
        assert_abs_diff_eq!(p[3], 1.0, epsilon = EPS);
    }

    #[test]
    fn rotation_sign_patterns() {
        let x = x_rotation(FRAC_PI_2);
        assert_abs_diff_eq!(x[6], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(x[9], -1.0, epsilon = EPS);

        let y = y_rotation(FRAC_PI_2);
        assert_abs_diff_eq!(y[2], -1.0, epsilon = EPS);
        assert_abs_diff_eq!(y[8], 1.0, epsilon = EPS);

        let z = z_rotation(FRAC_PI_2);
        assert_abs_diff_eq!(z[1], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(z[4], -1.0, epsilon = EPS);
    }

    #[test]
    fn multiply_applies_second_argument_first() {
        let m = multiply(&translation(10.0, 0.0, 0.0), &scaling(2.0, 1.0, 1.0));
        // scale 1 -> 2, then translate -> 12; the other order would give 22
        assert_eq!(transform_point(&m, [1.0, 0.0, 0.0])[0], 12.0);
    }

    #[test]
    fn multiply_is_not_commutative() {
        let a = translation(10.0, 20.0, 30.0);
        let b = z_rotation(FRAC_PI_4);
        assert_ne!(multiply(&a, &b), multiply(&b, &a));
    }

    #[test]
    fn multiply_is_associative() {
        let a = translation(10.0, -20.0, 5.0);
        let b = y_rotation(0.7);
        let c = scaling(2.0, 0.5, -1.0);
        let left = multiply(&multiply(&a, &b), &c);
        let right = multiply(&a, &multiply(&b, &c));
        assert_mat_eq(&left, &right, 1e-4);
    }

    #[test]
    fn multiply_matches_column_major_product() {
        let a = multiply(&translation(3.0, 4.0, 5.0), &x_rotation(0.3));
        let b = multiply(&scaling(2.0, 3.0, 4.0), &z_rotation(1.1));
        let expected = glam::Mat4::from_cols_array(&a) * glam::Mat4::from_cols_array(&b);
        assert_mat_eq(&multiply(&a, &b), &expected.to_cols_array(), 1e-4);
    }

    #[test]
    fn projection_maps_pixel_box_to_clip_space() {
        let p = projection(400.0, 300.0, 400.0);

        let origin = transform_point(&p, [0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(origin[0], -1.0, epsilon = EPS);
        assert_abs_diff_eq!(origin[1], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(origin[2], 0.0, epsilon = EPS);

        let corner = transform_point(&p, [400.0, 300.0, 400.0]);
        assert_abs_diff_eq!(corner[0], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(corner[1], -1.0, epsilon = EPS);
        assert_abs_diff_eq!(corner[2], 2.0, epsilon = EPS);
        assert_abs_diff_eq!(corner[3], 1.0, epsilon = EPS);
    }

    #[test]
    fn combinators_append_after_accumulated_matrix() {
        let m = projection(400.0, 300.0, 400.0);
        assert_eq!(translate(&m, 1.0, 2.0, 3.0), multiply(&m, &translation(1.0, 2.0, 3.0)));
        assert_eq!(x_rotate(&m, 0.5), multiply(&m, &x_rotation(0.5)));
        assert_eq!(y_rotate(&m, 0.5), multiply(&m, &y_rotation(0.5)));
        assert_eq!(z_rotate(&m, 0.5), multiply(&m, &z_rotation(0.5)));
        assert_eq!(scale(&m, 2.0, 3.0, 4.0), multiply(&m, &scaling(2.0, 3.0, 4.0)));
    }

    #[test]
    fn chained_translation_is_applied_before_projection() {
        let m = translate(&projection(400.0, 300.0, 400.0), 45.0, 150.0, 0.0);
        let p = transform_point(&m, [0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(p[0], 45.0 * 2.0 / 400.0 - 1.0, epsilon = EPS);
        assert_abs_diff_eq!(p[1], -150.0 * 2.0 / 300.0 + 1.0, epsilon = EPS);
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let flat = scaling(0.0, 1.0, 1.0);
        assert_eq!(transform_point(&flat, [5.0, 1.0, 1.0])[0], 0.0);
        assert!(projection(0.0, 300.0, 400.0)[0].is_infinite());
        assert!(x_rotation(f32::NAN)[5].is_nan());
    }
}
