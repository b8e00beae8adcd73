use std::time::Duration;

use bytemuck::{Pod, Zeroable};

use crate::complex::Complex;

/// Camera uniform: pan, zoom and the viewport's width/height ratio.
///
/// Laid out as four `f32`s so it can be uploaded to a uniform buffer as-is.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub offset: [f32; 2],
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl CameraConfig {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            offset: [0.0, 0.0],
            zoom: 1.0,
            aspect_ratio,
        }
    }

    pub fn with_offset(mut self, offset: Complex) -> Self {
        self.offset = [offset.real, offset.imaginary];
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Map a normalized device coordinate (`[-1, 1]²`, y up) to fractal space.
pub fn project(frag_coord: [f32; 2], camera: &CameraConfig) -> Complex {
    let x = frag_coord[0] * camera.aspect_ratio;
    let y = frag_coord[1];
    Complex::new(
        camera.zoom * x - camera.offset[0],
        camera.zoom * y - camera.offset[1],
    )
}

/// Keys the camera responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
}

impl Key {
    pub fn from_virtual_keycode(keycode: winit::event::VirtualKeyCode) -> Option<Self> {
        use winit::event::VirtualKeyCode;
        match keycode {
            VirtualKeyCode::W | VirtualKeyCode::Up => Some(Key::Up),
            VirtualKeyCode::S | VirtualKeyCode::Down => Some(Key::Down),
            VirtualKeyCode::A | VirtualKeyCode::Left => Some(Key::Left),
            VirtualKeyCode::D | VirtualKeyCode::Right => Some(Key::Right),
            VirtualKeyCode::Equals | VirtualKeyCode::NumpadAdd => Some(Key::ZoomIn),
            VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => Some(Key::ZoomOut),
            _ => None,
        }
    }
}

/// Pan speed in fractal units per second at zoom 1.
const PAN_SPEED: f32 = 1.0;

/// Zoom factor applied per second a zoom key is held.
const ZOOM_RATE: f32 = 1.7;

#[derive(Debug, Default)]
pub struct CameraController {
    is_up_pressed: bool,
    is_down_pressed: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
    zoom_in: bool,
    zoom_out: bool,
    aspect_ratio: Option<f32>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, key: Key, is_pressed: bool) {
        match key {
            Key::Up => self.is_up_pressed = is_pressed,
            Key::Down => self.is_down_pressed = is_pressed,
            Key::Left => self.is_left_pressed = is_pressed,
            Key::Right => self.is_right_pressed = is_pressed,
            Key::ZoomIn => self.zoom_in = is_pressed,
            Key::ZoomOut => self.zoom_out = is_pressed,
        }
    }

    /// Returns `true` if the event was a camera key.
    pub fn process_events(&mut self, event: &winit::event::WindowEvent) -> bool {
        use winit::event::{ElementState, KeyboardInput, WindowEvent};
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => match Key::from_virtual_keycode(*keycode) {
                Some(key) => {
                    self.process_key(key, *state == ElementState::Pressed);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = Some(aspect_ratio);
    }

    /// Whether a held key will keep moving the camera.
    pub fn is_moving(&self) -> bool {
        self.is_up_pressed
            || self.is_down_pressed
            || self.is_left_pressed
            || self.is_right_pressed
            || self.zoom_in
            || self.zoom_out
    }

    /// Apply held keys and any pending aspect ratio. Returns whether the
    /// camera changed.
    pub fn update_camera(&mut self, dt: Duration, camera: &mut CameraConfig) -> bool {
        let dt = dt.as_secs_f32();
        let amount = dt * PAN_SPEED * camera.zoom;
        let zoom_amount = ZOOM_RATE.powf(dt);
        let mut updated = false;
        if let Some(r) = self.aspect_ratio.take() {
            camera.aspect_ratio = r;
            updated = true;
        }
        if self.is_up_pressed {
            camera.offset[1] -= amount;
            updated = true;
        }
        if self.is_down_pressed {
            camera.offset[1] += amount;
            updated = true;
        }
        if self.is_left_pressed {
            camera.offset[0] += amount;
            updated = true;
        }
        if self.is_right_pressed {
            camera.offset[0] -= amount;
            updated = true;
        }
        if self.zoom_out {
            camera.zoom *= zoom_amount;
            updated = true;
        }
        if self.zoom_in {
            camera.zoom /= zoom_amount;
            updated = true;
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_camera_maps_origin_to_origin() {
        let camera = CameraConfig::default();
        assert_eq!(project([0.0, 0.0], &camera), Complex::ZERO);
    }

    #[test]
    fn aspect_ratio_scales_x_only() {
        let camera = CameraConfig::new(2.0);
        assert_eq!(project([1.0, 1.0], &camera), Complex::new(2.0, 1.0));
    }

    #[test]
    fn zoom_then_offset() {
        let camera = CameraConfig::new(1.5)
            .with_zoom(0.5)
            .with_offset(Complex::new(0.25, -1.0));
        assert_eq!(project([1.0, -1.0], &camera), Complex::new(0.5, 0.5));
    }

    #[test]
    fn uniform_is_four_floats() {
        let camera = CameraConfig::new(1.25)
            .with_zoom(3.0)
            .with_offset(Complex::new(-0.5, 0.75));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&camera));
        assert_eq!(floats, &[-0.5, 0.75, 3.0, 1.25]);
    }

    #[test]
    fn idle_controller_leaves_camera_alone() {
        let mut controller = CameraController::new();
        let mut camera = CameraConfig::default();
        assert!(!controller.update_camera(Duration::from_millis(16), &mut camera));
        assert_eq!(camera, CameraConfig::default());
    }

    #[test]
    fn pan_scales_with_zoom() {
        let mut controller = CameraController::new();
        let mut camera = CameraConfig::default().with_zoom(2.0);
        controller.process_key(Key::Up, true);
        controller.process_key(Key::Left, true);
        assert!(controller.update_camera(Duration::from_millis(500), &mut camera));
        assert_eq!(camera.offset, [1.0, -1.0]);

        controller.process_key(Key::Up, false);
        controller.process_key(Key::Left, false);
        controller.process_key(Key::Down, true);
        controller.process_key(Key::Right, true);
        assert!(controller.update_camera(Duration::from_millis(500), &mut camera));
        assert_eq!(camera.offset, [0.0, 0.0]);
    }

    #[test]
    fn zoom_in_and_out_are_inverse() {
        let mut controller = CameraController::new();
        let mut camera = CameraConfig::default();
        controller.process_key(Key::ZoomIn, true);
        assert!(controller.update_camera(Duration::from_secs(1), &mut camera));
        assert!((camera.zoom - 1.0 / 1.7).abs() < 1e-6);

        controller.process_key(Key::ZoomIn, false);
        controller.process_key(Key::ZoomOut, true);
        assert!(controller.is_moving());
        controller.update_camera(Duration::from_secs(1), &mut camera);
        assert!((camera.zoom - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pending_aspect_ratio_is_applied_once() {
        let mut controller = CameraController::new();
        let mut camera = CameraConfig::default();
        controller.update_aspect_ratio(16.0 / 9.0);
        assert!(controller.update_camera(Duration::ZERO, &mut camera));
        assert_eq!(camera.aspect_ratio, 16.0 / 9.0);
        assert!(!controller.update_camera(Duration::ZERO, &mut camera));
    }

    #[test]
    fn keycodes_map_to_keys() {
        use winit::event::VirtualKeyCode;
        assert_eq!(Key::from_virtual_keycode(VirtualKeyCode::W), Some(Key::Up));
        assert_eq!(Key::from_virtual_keycode(VirtualKeyCode::Right), Some(Key::Right));
        assert_eq!(Key::from_virtual_keycode(VirtualKeyCode::NumpadAdd), Some(Key::ZoomIn));
        assert_eq!(Key::from_virtual_keycode(VirtualKeyCode::Minus), Some(Key::ZoomOut));
        assert_eq!(Key::from_virtual_keycode(VirtualKeyCode::Q), None);
    }
}
