//! Orbit camera and picking rays for the 3D scene.
//!
//! The scene is Y-up and measured in meters. The camera orbits a target
//! point; its state survives item rebuilds and room resizes, so a user's
//! chosen viewpoint is kept while editing.

use glam::{DMat4, DVec3};

/// A picking ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the horizontal plane `y = height`, in front of the origin.
    pub fn intersect_horizontal_plane(&self, height: f64) -> Option<DVec3> {
        if self.direction.y.abs() < 1e-12 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.at(t))
    }

    /// Distance along the ray to an axis-aligned box, if it is hit.
    ///
    /// Slab test; a ray starting inside the box hits at `t = 0`.
    pub fn intersect_aabb(&self, min: DVec3, max: DVec3) -> Option<f64> {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            if dir.abs() < 1e-12 {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - origin) / dir;
            let t2 = (max[axis] - origin) / dir;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            None
        } else {
            Some(t_near.max(0.0))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneCamera {
    pub target: DVec3,
    pub distance: f64,
    pub yaw: f64,   // radians, around +Y from +X toward +Z
    pub pitch: f64, // radians
    pub fov: f64,   // degrees
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    controls_enabled: bool,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::look_at(DVec3::new(3.0, 1.6, 3.0), DVec3::new(0.0, 0.9, 0.0), 45.0)
    }
}

impl SceneCamera {
    /// Place the camera at `eye`, orbiting `target`.
    pub fn look_at(eye: DVec3, target: DVec3, fov_deg: f64) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-6);
        Self {
            target,
            distance,
            yaw: offset.z.atan2(offset.x),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            fov: fov_deg,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 100.0,
            min_distance: 0.5,
            max_distance: 50.0,
            controls_enabled: true,
        }
    }

    pub fn update_aspect_ratio(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Orbit controls are switched off while an item is dragged.
    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        if !self.controls_enabled {
            return;
        }
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        // Keep the camera off the poles so the up vector stays valid
        let limit = 89.0f64.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    pub fn zoom(&mut self, delta: f64) {
        if !self.controls_enabled {
            return;
        }
        self.distance -= delta;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn eye_position(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        // Y-up convention
        let offset = DVec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw) * self.distance;

        self.target + offset
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// World point to normalized device coordinates (x right, y up, in [-1, 1]).
    pub fn project_to_ndc(&self, point: DVec3) -> DVec3 {
        (self.projection_matrix() * self.view_matrix()).project_point3(point)
    }

    /// Picking ray through normalized device coordinates.
    pub fn ray_through(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_look_at_reconstructs_eye() {
        let camera = SceneCamera::default();
        let eye = camera.eye_position();
        assert!((eye - DVec3::new(3.0, 1.6, 3.0)).length() < EPS);
        assert!((camera.distance - 4.3).abs() < EPS);
    }

    #[test]
    fn test_target_projects_to_centre() {
        let mut camera = SceneCamera::default();
        camera.update_aspect_ratio(800.0, 520.0);
        let ndc = camera.project_to_ndc(camera.target);
        assert!(ndc.x.abs() < 1e-9 && ndc.y.abs() < 1e-9);
    }

    #[test]
    fn test_centre_ray_points_at_target() {
        let camera = SceneCamera::default();
        let ray = camera.ray_through(0.0, 0.0);
        let to_target = (camera.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 1.0 - 1e-9);
    }

    #[test]
    fn test_disabled_controls_freeze_orbit() {
        let mut camera = SceneCamera::default();
        let before = camera;
        camera.set_controls_enabled(false);
        camera.orbit(0.5, 0.5);
        camera.zoom(1.0);
        assert_eq!(camera.eye_position(), before.eye_position());

        camera.set_controls_enabled(true);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= 89.0f64.to_radians());
    }

    #[test]
    fn test_ray_plane_and_box() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(ray.intersect_horizontal_plane(0.0), Some(DVec3::ZERO));
        assert_eq!(ray.intersect_horizontal_plane(5.0), None);

        let hit = ray.intersect_aabb(DVec3::new(-0.5, 0.0, -0.5), DVec3::new(0.5, 0.72, 0.5));
        assert!((hit.unwrap() - 1.28).abs() < EPS);
        assert_eq!(
            ray.intersect_aabb(DVec3::new(1.0, 0.0, 1.0), DVec3::new(2.0, 1.0, 2.0)),
            None
        );
    }
}
