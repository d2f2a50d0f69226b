// Static vertex data for the letter F

/// Six triangles, three vertices each.
pub const VERTEX_COUNT: u32 = 18;

/// The F in pixel units: left column, top rung, middle rung. Flat at z = 0.
#[rustfmt::skip]
pub const F_POSITIONS_3D: [[f32; 3]; 18] = [
    // left column
    [0.0, 0.0, 0.0],
    [30.0, 0.0, 0.0],
    [0.0, 150.0, 0.0],
    [0.0, 150.0, 0.0],
    [30.0, 0.0, 0.0],
    [30.0, 150.0, 0.0],

    // top rung
    [30.0, 0.0, 0.0],
    [100.0, 0.0, 0.0],
    [30.0, 30.0, 0.0],
    [30.0, 30.0, 0.0],
    [100.0, 0.0, 0.0],
    [100.0, 30.0, 0.0],

    // middle rung
    [30.0, 60.0, 0.0],
    [67.0, 60.0, 0.0],
    [30.0, 90.0, 0.0],
    [30.0, 90.0, 0.0],
    [67.0, 60.0, 0.0],
    [67.0, 90.0, 0.0],
];

/// Same outline as [`F_POSITIONS_3D`] without the z component.
pub const F_POSITIONS_2D: [[f32; 2]; 18] = {
    let mut out = [[0.0f32; 2]; 18];
    let mut i = 0;
    while i < 18 {
        out[i] = [F_POSITIONS_3D[i][0], F_POSITIONS_3D[i][1]];
        i += 1;
    }
    out
};

/// Each quad of the F maps the whole texture.
#[rustfmt::skip]
pub const F_TEX_COORDS: [[f32; 2]; 18] = [
    [0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0],
    [0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0],
    [0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0],
];
