//! Player controller with WASD movement, jumping and ground collision

use glam::Vec3;
use strider_core::{lerp, MIN_DELTA_SECONDS};
use strider_scene::{Entity, Scene};
use tracing::{debug, trace};

use crate::input::{InputAction, InputSource};

use super::movement::{GRAVITY, GROUND_Y};
use super::MovementConfig;

/// Below this squared horizontal length the camera is looking (nearly)
/// straight up or down and gives no usable heading.
const MIN_FLAT_LOOK_SQ: f32 = 1e-6;

/// Player controller handling input, movement, and ground collision
pub struct PlayerController {
    /// Movement configuration
    pub config: MovementConfig,
    /// The entity this controller moves
    entity: Entity,
    /// Camera to move relative to; the scene's active camera when `None`
    camera: Option<Entity>,
    /// Current velocity in units per second
    velocity: Vec3,
    /// Whether the player rests on the ground plane
    grounded: bool,
    /// Whether the last frame moved along world axes for lack of a camera
    world_axes: bool,
    /// Whether the last frame found the player entity missing
    entity_missing: bool,
}

impl PlayerController {
    /// Create a controller for `entity` with default config
    pub fn new(entity: Entity) -> Self {
        Self::with_config(entity, MovementConfig::default())
    }

    /// Create a controller with custom config
    pub fn with_config(entity: Entity, config: MovementConfig) -> Self {
        Self {
            config,
            entity,
            camera: None,
            velocity: Vec3::ZERO,
            grounded: true,
            world_axes: false,
            entity_missing: false,
        }
    }

    /// Move relative to a specific camera instead of the scene's active one
    pub fn with_camera(mut self, camera: Entity) -> Self {
        self.camera = Some(camera);
        self
    }

    /// The entity this controller moves
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Get the player's current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Check if the player is grounded
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Advance one frame of `delta_seconds`.
    pub fn tick(&mut self, scene: &mut Scene, input: &impl InputSource, delta_seconds: f32) {
        if !scene.is_alive(self.entity) {
            if !self.entity_missing {
                debug!("Player entity {} not in scene, skipping movement", self.entity);
                self.entity_missing = true;
            }
            return;
        }
        self.entity_missing = false;

        let dt = delta_seconds.max(MIN_DELTA_SECONDS);

        let (ix, iz) = Self::input_axes(input);
        let camera_forward = self
            .camera
            .or_else(|| scene.active_camera())
            .and_then(|camera| scene.transform(camera))
            .map(|transform| transform.forward());
        let desired = self.desired_velocity(ix, iz, camera_forward);

        let blend = self.config.blend_factor(dt);
        self.velocity.x = lerp(self.velocity.x, desired.x, blend);
        self.velocity.z = lerp(self.velocity.z, desired.z, blend);

        // Held jump re-triggers on every grounded frame
        if input.is_pressed(InputAction::Jump) && self.grounded {
            self.velocity.y = self.config.jump_speed;
            self.grounded = false;
        }

        self.velocity.y += GRAVITY * dt;

        let Some(transform) = scene.transform_mut(self.entity) else {
            return;
        };
        transform.translate(self.velocity * dt);

        if transform.position.y <= GROUND_Y {
            transform.position.y = GROUND_Y;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        trace!(
            position = ?transform.position,
            velocity = ?self.velocity,
            grounded = self.grounded,
            "player tick"
        );
    }

    /// Movement axes from held keys: `ix` is +1 right, `iz` is -1 forward.
    /// Opposite keys cancel.
    fn input_axes(input: &impl InputSource) -> (f32, f32) {
        let mut ix = 0.0;
        let mut iz = 0.0;
        if input.is_pressed(InputAction::MoveForward) {
            iz -= 1.0;
        }
        if input.is_pressed(InputAction::MoveBackward) {
            iz += 1.0;
        }
        if input.is_pressed(InputAction::MoveRight) {
            ix += 1.0;
        }
        if input.is_pressed(InputAction::MoveLeft) {
            ix -= 1.0;
        }
        (ix, iz)
    }

    /// Horizontal velocity the input asks for.
    ///
    /// With a camera, forward is its look direction flattened onto the ground
    /// and right is perpendicular to it around the up axis. Without one, or
    /// when the camera looks straight up or down, world axes are used with -Z
    /// as forward.
    fn desired_velocity(&mut self, ix: f32, iz: f32, camera_forward: Option<Vec3>) -> Vec3 {
        let basis = camera_forward.and_then(|look| {
            let flat = Vec3::new(look.x, 0.0, look.z);
            if flat.length_squared() < MIN_FLAT_LOOK_SQ {
                return None;
            }
            let forward = flat.normalize();
            let right = forward.cross(Vec3::Y).normalize();
            Some((forward, right))
        });

        if basis.is_none() != self.world_axes {
            self.world_axes = basis.is_none();
            if self.world_axes {
                debug!("No usable camera, moving along world axes");
            } else {
                debug!("Moving relative to camera");
            }
        }

        let direction = match basis {
            Some((forward, right)) => forward * -iz + right * ix,
            None => Vec3::new(ix, 0.0, iz),
        };
        direction.normalize_or_zero() * self.config.max_speed
    }
}
