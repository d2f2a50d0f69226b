// Interactive state for the F: one slider per transform parameter

use glam::Vec3;

use crate::config::Config;
use crate::math::{deg_to_rad, m3, m4, rad_to_deg, Transform};

/// A transform parameter the user can adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    X,
    Y,
    Z,
    AngleX,
    AngleY,
    AngleZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Param {
    pub const ALL: [Param; 9] = [
        Param::X,
        Param::Y,
        Param::Z,
        Param::AngleX,
        Param::AngleY,
        Param::AngleZ,
        Param::ScaleX,
        Param::ScaleY,
        Param::ScaleZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Param::X => "x",
            Param::Y => "y",
            Param::Z => "z",
            Param::AngleX => "angleX",
            Param::AngleY => "angleY",
            Param::AngleZ => "angleZ",
            Param::ScaleX => "scaleX",
            Param::ScaleY => "scaleY",
            Param::ScaleZ => "scaleZ",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A clamped scalar with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Slider {
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        let mut slider = Self {
            value,
            min,
            max,
            step,
        };
        slider.set(value);
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max.max(self.min));
    }

    pub fn nudge(&mut self, steps: f32) {
        self.set(self.value + steps * self.step);
    }

    /// Moves the upper bound and re-clamps the current value.
    pub fn set_max(&mut self, max: f32) {
        self.max = max;
        self.set(self.value);
    }
}

/// Everything needed to build one frame's matrix.
#[derive(Debug, Clone)]
pub struct Scene {
    sliders: [Slider; 9],
    selected: Param,
    depth: f32,
    pub color: [f32; 4],
}

impl Scene {
    /// Creates the scene in its starting pose for a `config.width` by
    /// `config.height` viewport.
    pub fn new(config: &Config) -> Self {
        let color = match config.color {
            Some([r, g, b]) => [r, g, b, 1.0],
            None => [fastrand::f32(), fastrand::f32(), fastrand::f32(), 1.0],
        };
        let mut scene = Self {
            sliders: initial_sliders(config.width as f32, config.height as f32),
            selected: Param::X,
            depth: config.depth,
            color,
        };
        scene.apply(&Transform::initial());
        log::debug!("scene created: {:?}", scene.transform());
        scene
    }

    pub fn slider(&self, param: Param) -> &Slider {
        &self.sliders[param.index()]
    }

    pub fn value(&self, param: Param) -> f32 {
        self.slider(param).value()
    }

    pub fn set(&mut self, param: Param, value: f32) {
        self.sliders[param.index()].set(value);
    }

    pub fn selected(&self) -> Param {
        self.selected
    }

    pub fn select(&mut self, param: Param) {
        self.selected = param;
        log::info!("selected {} = {}", param.name(), self.value(param));
    }

    pub fn select_next(&mut self) {
        let next = (self.selected.index() + 1) % Param::ALL.len();
        self.select(Param::ALL[next]);
    }

    pub fn select_prev(&mut self) {
        let len = Param::ALL.len();
        let prev = (self.selected.index() + len - 1) % len;
        self.select(Param::ALL[prev]);
    }

    /// Moves the selected slider by `steps` increments.
    pub fn nudge(&mut self, steps: f32) {
        let param = self.selected;
        self.sliders[param.index()].nudge(steps);
        log::debug!("{} = {}", param.name(), self.value(param));
    }

    /// Translation sliders follow the viewport: x up to the width, y and z up
    /// to the height.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.sliders[Param::X.index()].set_max(width as f32);
        self.sliders[Param::Y.index()].set_max(height as f32);
        self.sliders[Param::Z.index()].set_max(height as f32);
    }

    /// Puts every slider back to the starting pose.
    pub fn reset(&mut self) {
        self.apply(&Transform::initial());
        self.selected = Param::X;
    }

    /// Current slider values, angles converted to radians.
    pub fn transform(&self) -> Transform {
        let v = |p| self.value(p);
        Transform::new(
            Vec3::new(v(Param::X), v(Param::Y), v(Param::Z)),
            Vec3::new(
                deg_to_rad(v(Param::AngleX)),
                deg_to_rad(v(Param::AngleY)),
                deg_to_rad(v(Param::AngleZ)),
            ),
            Vec3::new(v(Param::ScaleX), v(Param::ScaleY), v(Param::ScaleZ)),
        )
    }

    pub fn matrix(&self, width: f32, height: f32) -> m4::Mat4 {
        self.transform().matrix(width, height, self.depth)
    }

    pub fn matrix_2d(&self, width: f32, height: f32) -> m3::Mat3 {
        self.transform().matrix_2d(width, height)
    }

    fn apply(&mut self, transform: &Transform) {
        let values = [
            transform.translation.x,
            transform.translation.y,
            transform.translation.z,
            rad_to_deg(transform.rotation.x),
            rad_to_deg(transform.rotation.y),
            rad_to_deg(transform.rotation.z),
            transform.scale.x,
            transform.scale.y,
            transform.scale.z,
        ];
        for (slider, value) in self.sliders.iter_mut().zip(values) {
            slider.set(value);
        }
    }
}

fn initial_sliders(width: f32, height: f32) -> [Slider; 9] {
    let translation = |max| Slider::new(0.0, 0.0, max, 1.0);
    let angle = || Slider::new(0.0, 0.0, 360.0, 1.0);
    let scale = || Slider::new(1.0, -5.0, 5.0, 0.01);
    [
        translation(width),
        translation(height),
        translation(height),
        angle(),
        angle(),
        angle(),
        scale(),
        scale(),
        scale(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        Scene::new(&Config {
            color: Some([0.2, 0.4, 0.6]),
            ..Config::default()
        })
    }

    #[test]
    fn starts_in_initial_pose() {
        let scene = scene();
        assert_eq!(scene.value(Param::X), 45.0);
        assert_eq!(scene.value(Param::Y), 150.0);
        assert_relative_eq!(scene.value(Param::AngleX), 40.0, max_relative = 1e-5);
        assert_relative_eq!(scene.value(Param::AngleZ), 325.0, max_relative = 1e-5);
        assert_eq!(scene.value(Param::ScaleY), 1.0);
        assert_eq!(scene.color, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn random_color_is_opaque() {
        let scene = Scene::new(&Config::default());
        assert_eq!(scene.color[3], 1.0);
        assert!(scene.color[..3].iter().all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn sliders_clamp_to_range() {
        let mut scene = scene();
        scene.set(Param::X, 10_000.0);
        assert_eq!(scene.value(Param::X), 400.0);
        scene.set(Param::ScaleX, -9.0);
        assert_eq!(scene.value(Param::ScaleX), -5.0);
        scene.set(Param::AngleY, 720.0);
        assert_eq!(scene.value(Param::AngleY), 360.0);
    }

    #[test]
    fn nudge_moves_selected_slider_by_step() {
        let mut scene = scene();
        scene.select(Param::ScaleZ);
        scene.nudge(-10.0);
        assert_relative_eq!(scene.value(Param::ScaleZ), 0.9, max_relative = 1e-5);

        scene.select(Param::Z);
        scene.nudge(3.0);
        assert_eq!(scene.value(Param::Z), 3.0);
    }

    #[test]
    fn selection_wraps() {
        let mut scene = scene();
        scene.select_prev();
        assert_eq!(scene.selected(), Param::ScaleZ);
        scene.select_next();
        assert_eq!(scene.selected(), Param::X);
    }

    #[test]
    fn resize_reclamps_translation() {
        let mut scene = scene();
        scene.resize(30, 100);
        assert_eq!(scene.value(Param::X), 30.0);
        assert_eq!(scene.value(Param::Y), 100.0);
        assert_eq!(scene.slider(Param::Z).max, 100.0);
    }

    #[test]
    fn reset_restores_pose_after_edits() {
        let mut scene = scene();
        scene.set(Param::X, 0.0);
        scene.select(Param::AngleY);
        scene.reset();
        assert_eq!(scene.value(Param::X), 45.0);
        assert_eq!(scene.selected(), Param::X);
    }

    #[test]
    fn matrix_uses_degrees_as_radians() {
        let scene = scene();
        let expected = Transform::initial().matrix(400.0, 300.0, 400.0);
        for (got, want) in scene.matrix(400.0, 300.0).iter().zip(expected.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-5);
        }
    }
}
