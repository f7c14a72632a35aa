//! Orbit camera controller with mouse look and zoom

use glam::Vec3;
use strider_core::lerp;
use strider_scene::{Entity, Scene};
use tracing::{debug, trace};

use crate::input::{InputSource, PointerDelta};

use super::CameraConfig;

/// Lerp factor pulling the camera's position toward its orbit point each frame
pub const FOLLOW_SMOOTHING: f32 = 0.15;

/// How far above the target's origin the camera aims
pub const LOOK_AT_HEIGHT: f32 = 0.8;

/// Lowest height the orbit point may take, keeping the camera above the ground
pub const MIN_CAMERA_HEIGHT: f32 = 0.5;

/// Distance change per wheel unit
pub const WHEEL_ZOOM_SCALE: f32 = 0.01;

/// Name looked up when no target entity is configured
pub const DEFAULT_TARGET_NAME: &str = "player";

/// Third-person camera orbiting a target entity.
///
/// Input moves the `target_*` values immediately; each tick eases the
/// `current_*` values toward them and then eases the camera's position toward
/// the resulting orbit point. Both stages are plain per-frame lerps, so how
/// quickly the camera settles depends on the frame rate.
pub struct OrbitCameraController {
    /// Configuration
    pub config: CameraConfig,
    /// The camera entity this controller moves
    entity: Entity,
    /// Entity to orbit; falls back to [`DEFAULT_TARGET_NAME`] when `None`
    target: Option<Entity>,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    current_yaw: f32,
    current_pitch: f32,
    current_distance: f32,
    /// Whether the last tick was skipped for lack of a target
    target_missing: bool,
}

impl OrbitCameraController {
    /// Create a camera controller for `entity` with default config
    pub fn new(entity: Entity) -> Self {
        Self::with_config(entity, CameraConfig::default())
    }

    /// Create a camera controller with custom config
    pub fn with_config(entity: Entity, config: CameraConfig) -> Self {
        let distance = config.clamp_distance(config.distance);
        Self {
            config,
            entity,
            target: None,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: distance,
            current_yaw: 0.0,
            current_pitch: 0.0,
            current_distance: distance,
            target_missing: false,
        }
    }

    /// Orbit a specific entity
    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    /// Change the orbited entity; `None` restores the name lookup
    pub fn set_target(&mut self, target: Option<Entity>) {
        self.target = target;
    }

    /// The camera entity this controller moves
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Smoothed yaw in radians
    pub fn yaw(&self) -> f32 {
        self.current_yaw
    }

    /// Smoothed pitch in radians
    pub fn pitch(&self) -> f32 {
        self.current_pitch
    }

    /// Smoothed distance from the target
    pub fn distance(&self) -> f32 {
        self.current_distance
    }

    /// Yaw the camera is easing toward
    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    /// Pitch the camera is easing toward
    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }

    /// Distance the camera is easing toward
    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Handle mouse look input (device units)
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.target_yaw -= dx * self.config.sensitivity;
        self.target_pitch = self
            .config
            .clamp_pitch(self.target_pitch - dy * self.config.sensitivity);
    }

    /// Handle scroll wheel zoom; positive deltas move the camera away
    pub fn handle_wheel(&mut self, delta: f32) {
        self.target_distance = self
            .config
            .clamp_distance(self.target_distance + delta * WHEEL_ZOOM_SCALE);
    }

    /// Apply one pointer event drained from an input source
    pub fn apply_pointer(&mut self, delta: PointerDelta) {
        if delta.dx != 0.0 || delta.dy != 0.0 {
            self.handle_mouse_motion(delta.dx, delta.dy);
        }
        if delta.wheel != 0.0 {
            self.handle_wheel(delta.wheel);
        }
    }

    /// Set the camera yaw directly, skipping smoothing
    pub fn set_yaw(&mut self, yaw: f32) {
        self.target_yaw = yaw;
        self.current_yaw = yaw;
    }

    /// Set the camera pitch directly, skipping smoothing
    pub fn set_pitch(&mut self, pitch: f32) {
        let clamped = self.config.clamp_pitch(pitch);
        self.target_pitch = clamped;
        self.current_pitch = clamped;
    }

    /// Set the zoom distance directly (for settings/init)
    pub fn set_distance(&mut self, distance: f32) {
        let clamped = self.config.clamp_distance(distance);
        self.target_distance = clamped;
        self.current_distance = clamped;
    }

    /// Offset from the target for the smoothed spherical coordinates
    pub fn offset(&self) -> Vec3 {
        let r = self.current_distance;
        let cos_pitch = self.current_pitch.cos();
        Vec3::new(
            r * cos_pitch * self.current_yaw.sin(),
            r * self.current_pitch.sin(),
            r * cos_pitch * self.current_yaw.cos(),
        )
    }

    /// Resolve the entity to orbit: the configured one, else the entity named
    /// [`DEFAULT_TARGET_NAME`].
    pub fn resolve_target(&self, scene: &Scene) -> Option<Entity> {
        match self.target {
            Some(target) if scene.is_alive(target) => Some(target),
            Some(_) => None,
            None => scene.find_by_name(DEFAULT_TARGET_NAME),
        }
    }

    /// Advance one frame.
    ///
    /// Pending pointer events are applied first, one at a time. Without a target (or without
    /// the camera entity itself) the rest of the frame is skipped: smoothed
    /// values, position and orientation stay as they were.
    pub fn tick(&mut self, scene: &mut Scene, input: &mut impl InputSource) {
        for delta in input.poll_pointer_delta() {
            self.apply_pointer(delta);
        }

        let Some(target_position) = self.target_position(scene) else {
            return;
        };

        let smoothing = self.config.smoothing;
        self.current_yaw = lerp(self.current_yaw, self.target_yaw, smoothing);
        self.current_pitch = lerp(self.current_pitch, self.target_pitch, smoothing);
        self.current_distance = lerp(self.current_distance, self.target_distance, smoothing);

        let desired = Self::orbit_point(target_position, self.offset());
        let Some(transform) = scene.transform_mut(self.entity) else {
            return;
        };
        transform.position = transform.position.lerp(desired, FOLLOW_SMOOTHING);
        transform.look_at(target_position + Vec3::Y * LOOK_AT_HEIGHT, Vec3::Y);

        trace!(
            position = ?transform.position,
            yaw = self.current_yaw,
            pitch = self.current_pitch,
            distance = self.current_distance,
            "camera tick"
        );
    }

    /// Jump straight to the orbit point for the current target angles.
    ///
    /// Used when placing the camera for the first time, so it does not sweep in
    /// from wherever the entity was spawned. Returns `false` when no target or
    /// camera entity resolves.
    pub fn snap_to_target(&mut self, scene: &mut Scene) -> bool {
        let Some(target_position) = self.target_position(scene) else {
            return false;
        };

        self.current_yaw = self.target_yaw;
        self.current_pitch = self.target_pitch;
        self.current_distance = self.target_distance;

        let desired = Self::orbit_point(target_position, self.offset());
        let Some(transform) = scene.transform_mut(self.entity) else {
            return false;
        };
        transform.position = desired;
        transform.look_at(target_position + Vec3::Y * LOOK_AT_HEIGHT, Vec3::Y);
        true
    }

    /// Position of the orbited entity, if both it and the camera are present
    fn target_position(&mut self, scene: &Scene) -> Option<Vec3> {
        let position = self
            .resolve_target(scene)
            .and_then(|target| scene.transform(target))
            .map(|transform| transform.position)
            .filter(|_| scene.is_alive(self.entity));

        if position.is_none() != self.target_missing {
            self.target_missing = position.is_none();
            if self.target_missing {
                debug!("Camera {} has no target, holding still", self.entity);
            } else {
                debug!("Camera {} acquired its target", self.entity);
            }
        }
        position
    }

    /// Orbit point for a target position and offset, kept above the ground
    fn orbit_point(target_position: Vec3, offset: Vec3) -> Vec3 {
        let mut desired = target_position + offset;
        desired.y = desired.y.max(MIN_CAMERA_HEIGHT);
        desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_core::Transform;
    use winit::event::MouseScrollDelta;

    use crate::input::InputHandler;

    fn setup_with_player(player_position: Vec3) -> (Scene, Entity, OrbitCameraController) {
        let mut scene = Scene::new();
        let player = scene
            .spawn_named(DEFAULT_TARGET_NAME, Transform::from_position(player_position))
            .unwrap();
        let camera = scene.spawn(Transform::from_position(Vec3::new(0.0, 2.0, 6.0)));
        (scene, player, OrbitCameraController::new(camera))
    }

    fn camera_transform(scene: &Scene, camera: &OrbitCameraController) -> Transform {
        *scene.transform(camera.entity()).unwrap()
    }

    #[test]
    fn test_camera_controller_creation() {
        let camera = OrbitCameraController::new(Entity::from_raw(0, 0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.distance(), 6.0);
        assert_eq!(camera.target_distance(), 6.0);
    }

    #[test]
    fn test_starting_distance_is_clamped() {
        let config = CameraConfig {
            distance: 30.0,
            ..Default::default()
        };
        let camera = OrbitCameraController::with_config(Entity::from_raw(0, 0), config);
        assert_eq!(camera.distance(), 12.0);
    }

    #[test]
    fn test_mouse_motion_updates_targets() {
        let mut camera = OrbitCameraController::new(Entity::from_raw(0, 0));
        camera.handle_mouse_motion(100.0, 50.0);
        assert!((camera.target_yaw() + 0.2).abs() < 1e-6);
        assert!((camera.target_pitch() + 0.1).abs() < 1e-6);
        // Smoothed values only move on tick
        assert_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn test_camera_pitch_clamping() {
        let mut camera = OrbitCameraController::new(Entity::from_raw(0, 0));
        let limit = camera.config.pitch_limit_rad();

        for dy in [300.0, 5000.0, -120.0, -90_000.0, 42.0, 1e9] {
            camera.handle_mouse_motion(0.0, dy);
            assert!(camera.target_pitch().abs() <= limit + 1e-6);
        }

        camera.handle_mouse_motion(0.0, -1e6);
        assert!((camera.target_pitch() - limit).abs() < 1e-6);

        camera.set_pitch(100f32.to_radians());
        assert!(camera.pitch() <= limit + 1e-6);
    }

    #[test]
    fn test_wheel_zoom_clamps() {
        let mut camera = OrbitCameraController::new(Entity::from_raw(0, 0));
        camera.handle_wheel(100.0);
        assert!((camera.target_distance() - 7.0).abs() < 1e-6);

        camera.handle_wheel(-10_000.0);
        assert_eq!(camera.target_distance(), 2.0);
    }

    #[test]
    fn test_zoom_out_converges_to_max_distance() {
        let (mut scene, _, mut camera) = setup_with_player(Vec3::new(0.0, 0.5, 0.0));
        let mut input = InputHandler::new();

        for _ in 0..300 {
            camera.handle_wheel(100.0);
            camera.tick(&mut scene, &mut input);
            assert!(camera.target_distance() <= 12.0);
            assert!(camera.distance() <= 12.0 && camera.distance() >= 2.0);
        }
        assert_eq!(camera.target_distance(), 12.0);
        assert!((camera.distance() - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_target_leaves_camera_untouched() {
        let mut scene = Scene::new();
        let mut start = Transform::from_position(Vec3::new(3.0, 4.0, 5.0));
        start.look_at(Vec3::ZERO, Vec3::Y);
        let entity = scene.spawn(start);
        let mut camera = OrbitCameraController::new(entity);
        let mut input = InputHandler::new();
        input.handle_mouse_motion((200.0, 0.0));

        camera.tick(&mut scene, &mut input);

        assert_eq!(*scene.transform(entity).unwrap(), start);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.distance(), 6.0);
        // The pointer travel still landed on the target angle
        assert!((camera.target_yaw() + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_despawned_explicit_target_skips() {
        let (mut scene, player, camera) = setup_with_player(Vec3::ZERO);
        let other = scene.spawn(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)));
        let mut camera = camera.with_target(other);
        scene.despawn(other);

        let before = camera_transform(&scene, &camera);
        camera.tick(&mut scene, &mut InputHandler::new());
        // No fallback to the named player once a target was configured
        assert_eq!(camera.resolve_target(&scene), None);
        assert_eq!(camera_transform(&scene, &camera), before);

        camera.set_target(None);
        assert_eq!(camera.resolve_target(&scene), Some(player));
    }

    #[test]
    fn test_explicit_target_preferred() {
        let (mut scene, player, camera) = setup_with_player(Vec3::ZERO);
        let other = scene.spawn(Transform::from_position(Vec3::new(10.0, 0.0, 0.0)));
        let camera = camera.with_target(other);
        assert_eq!(camera.resolve_target(&scene), Some(other));
        assert_ne!(camera.resolve_target(&scene), Some(player));
    }

    #[test]
    fn test_pointer_events_clamp_one_at_a_time() {
        let (mut scene, _, mut camera) = setup_with_player(Vec3::ZERO);
        let mut input = InputHandler::new();
        // Slam against the upper limit, then come back down within one frame
        input.handle_mouse_motion((0.0, -1e6));
        input.handle_mouse_motion((0.0, 100.0));
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, -50.0));
        input.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));

        camera.tick(&mut scene, &mut input);

        let mut direct = OrbitCameraController::new(camera.entity());
        direct.handle_mouse_motion(0.0, -1e6);
        direct.handle_mouse_motion(0.0, 100.0);
        direct.handle_wheel(5000.0);
        direct.handle_wheel(-100.0);

        let limit = camera.config.pitch_limit_rad();
        assert!((camera.target_pitch() - (limit - 0.2)).abs() < 1e-5);
        assert_eq!(camera.target_pitch(), direct.target_pitch());
        assert!((camera.target_distance() - 11.0).abs() < 1e-5);
        assert_eq!(camera.target_distance(), direct.target_distance());
    }

    #[test]
    fn test_tick_smooths_and_follows() {
        let (mut scene, _, mut camera) = setup_with_player(Vec3::new(0.0, 0.5, 0.0));
        let mut input = InputHandler::new();
        input.handle_mouse_motion((-500.0, 0.0));
        let start = camera_transform(&scene, &camera).position;

        camera.tick(&mut scene, &mut input);

        // Target yaw is +1.0 rad; one tick covers 12% of it
        assert!((camera.target_yaw() - 1.0).abs() < 1e-6);
        assert!((camera.yaw() - 0.12).abs() < 1e-6);

        let desired = Vec3::new(0.0, 0.5, 0.0) + camera.offset();
        let expected = start.lerp(desired, FOLLOW_SMOOTHING);
        let position = camera_transform(&scene, &camera).position;
        assert!((position - expected).length() < 1e-5);
    }

    #[test]
    fn test_offset_spherical_to_cartesian() {
        let mut camera = OrbitCameraController::new(Entity::from_raw(0, 0));
        camera.set_distance(4.0);
        assert!((camera.offset() - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-6);

        camera.set_yaw(std::f32::consts::FRAC_PI_2);
        camera.set_pitch(30f32.to_radians());
        let expected = Vec3::new(4.0 * 30f32.to_radians().cos(), 2.0, 0.0);
        assert!((camera.offset() - expected).length() < 1e-5);
    }

    #[test]
    fn test_camera_stays_above_ground() {
        let (mut scene, _, mut camera) = setup_with_player(Vec3::new(0.0, 0.5, 0.0));
        camera.set_pitch(-1.2);

        assert!(camera.snap_to_target(&mut scene));
        let position = camera_transform(&scene, &camera).position;
        assert_eq!(position.y, MIN_CAMERA_HEIGHT);
    }

    #[test]
    fn test_looks_above_target() {
        let player_position = Vec3::new(2.0, 0.5, -1.0);
        let (mut scene, _, mut camera) = setup_with_player(player_position);
        camera.set_pitch(0.4);
        camera.set_yaw(0.7);
        assert!(camera.snap_to_target(&mut scene));

        let transform = camera_transform(&scene, &camera);
        let aim = player_position + Vec3::Y * LOOK_AT_HEIGHT;
        let expected = (aim - transform.position).normalize();
        assert!((transform.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn test_follows_moving_target() {
        let (mut scene, player, mut camera) = setup_with_player(Vec3::new(0.0, 0.5, 0.0));
        let mut input = InputHandler::new();
        camera.snap_to_target(&mut scene);

        scene.transform_mut(player).unwrap().position = Vec3::new(5.0, 0.5, 0.0);
        for _ in 0..200 {
            camera.tick(&mut scene, &mut input);
        }

        let expected = Vec3::new(5.0, 0.5, 0.0) + camera.offset();
        let position = camera_transform(&scene, &camera).position;
        assert!((position - expected).length() < 1e-3);
    }

    #[test]
    fn test_missing_camera_entity_skips() {
        let (mut scene, _, mut camera) = setup_with_player(Vec3::ZERO);
        scene.despawn(camera.entity());
        camera.handle_mouse_motion(100.0, 0.0);

        camera.tick(&mut scene, &mut InputHandler::new());
        assert_eq!(camera.yaw(), 0.0);
        assert!(!camera.snap_to_target(&mut scene));
    }
}
