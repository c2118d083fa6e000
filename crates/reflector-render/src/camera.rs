//! Viewer camera and per-eye views.

use glam::{Mat4, Vec3};
use reflector_core::{Eye, Pose, StereoOptions};

use crate::backend::ViewCamera;

/// The real viewer camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space pose.
    pub pose: Pose,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Explicit projection, e.g. an asymmetric per-eye frustum from an XR
    /// runtime. Replaces the symmetric perspective when set.
    pub projection_override: Option<Mat4>,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            pose: Pose::new(Vec3::new(0.0, 0.0, 3.0), glam::Quat::IDENTITY),
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
            projection_override: None,
        }
    }

    /// Places the camera at `position` looking at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.pose = Pose::looking_at(position, target, up);
    }

    /// Returns the camera position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.view_matrix()
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_override
            .unwrap_or_else(|| Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far))
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Camera matrices for a scene pass.
    #[must_use]
    pub fn view_camera(&self) -> ViewCamera {
        ViewCamera {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            position: self.position(),
        }
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }

    /// Sets the near clipping plane.
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(0.001);
    }

    /// Sets the far clipping plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 0.1);
    }

    /// Views to render this frame.
    ///
    /// Without stereo this is the camera itself. With stereo, two eyes are
    /// placed half the eye separation to either side along the camera's right
    /// axis, sharing its orientation and projection.
    #[must_use]
    pub fn eye_views(&self, stereo: &StereoOptions) -> Vec<EyeView> {
        if !stereo.enabled {
            return vec![EyeView::new(Eye::Mono, self.clone())];
        }
        let half = stereo.eye_separation * 0.5;
        [(Eye::Left, -half), (Eye::Right, half)]
            .into_iter()
            .map(|(eye, offset)| {
                let mut camera = self.clone();
                camera.pose = self.pose.offset_right(offset);
                EyeView::new(eye, camera)
            })
            .collect()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

/// The camera used to render one eye of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EyeView {
    /// Which eye this is.
    pub eye: Eye,
    /// The real camera for that eye.
    pub camera: Camera,
}

impl EyeView {
    /// Creates an eye view.
    #[must_use]
    pub fn new(eye: Eye, camera: Camera) -> Self {
        Self { eye, camera }
    }
}
