//! Strider - third-person movement and orbit camera demo
//!
//! Runs a scripted input session headlessly at a fixed 60 Hz and logs where the
//! player and camera end up. Set `RUST_LOG=debug` (or `trace`) for per-frame
//! detail from the controllers.

mod settings;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use strider_core::{GameTime, Transform, Vec3};
use strider_game::player::GROUND_Y;
use strider_game::{InputHandler, InputSource, OrbitCameraController, PlayerController};
use strider_scene::Scene;

use settings::GameSettings;

/// Host frame interval in milliseconds
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Length of the scripted session in frames
const SESSION_FRAMES: u64 = 360;

/// How often positions are logged
const REPORT_EVERY: u64 = 60;

/// A raw event the script delivers before a given frame
#[derive(Debug, Clone, Copy)]
enum ScriptedEvent {
    Press(KeyCode),
    Release(KeyCode),
    MouseMotion(f64, f64),
    Scroll(f32),
    TogglePause,
}

/// (frame, event) pairs, in frame order
const SCRIPT: &[(u64, ScriptedEvent)] = &[
    (0, ScriptedEvent::Press(KeyCode::KeyW)),
    (30, ScriptedEvent::MouseMotion(-250.0, 0.0)),
    (31, ScriptedEvent::MouseMotion(-250.0, 40.0)),
    (60, ScriptedEvent::Press(KeyCode::Space)),
    (61, ScriptedEvent::Release(KeyCode::Space)),
    (90, ScriptedEvent::Press(KeyCode::KeyD)),
    (120, ScriptedEvent::Scroll(-2.0)),
    (150, ScriptedEvent::Release(KeyCode::KeyW)),
    (180, ScriptedEvent::Release(KeyCode::KeyD)),
    (200, ScriptedEvent::Scroll(4.0)),
    (240, ScriptedEvent::Press(KeyCode::KeyS)),
    (300, ScriptedEvent::Release(KeyCode::KeyS)),
    (310, ScriptedEvent::Press(KeyCode::KeyA)),
    (320, ScriptedEvent::TogglePause),
    (321, ScriptedEvent::MouseMotion(300.0, 0.0)),
    (340, ScriptedEvent::TogglePause),
    (341, ScriptedEvent::Release(KeyCode::KeyA)),
];

/// Application state
struct StriderApp {
    scene: Scene,
    input: InputHandler,
    player: PlayerController,
    camera: OrbitCameraController,
    game_time: GameTime,
}

impl StriderApp {
    fn new(settings: &GameSettings) -> Result<Self> {
        let mut scene = Scene::new();

        let player = scene
            .spawn_named(
                "player",
                Transform::from_position(Vec3::new(0.0, GROUND_Y, 0.0)),
            )
            .context("Failed to spawn player")?;
        let camera = scene
            .spawn_named("camera", Transform::from_position(Vec3::new(0.0, 3.0, 6.0)))
            .context("Failed to spawn camera")?;
        scene
            .set_active_camera(camera)
            .context("Failed to set active camera")?;

        let mut camera = OrbitCameraController::with_config(camera, settings.camera.clone());
        if !camera.snap_to_target(&mut scene) {
            anyhow::bail!("Camera has no target to orbit");
        }

        Ok(Self {
            scene,
            input: InputHandler::new(),
            player: PlayerController::with_config(player, settings.movement.clone()),
            camera,
            game_time: GameTime::new(settings.time.clone()),
        })
    }

    fn deliver(&mut self, event: ScriptedEvent) {
        match event {
            ScriptedEvent::Press(key) => self
                .input
                .handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed),
            ScriptedEvent::Release(key) => self
                .input
                .handle_keyboard(PhysicalKey::Code(key), ElementState::Released),
            ScriptedEvent::MouseMotion(dx, dy) => self.input.handle_mouse_motion((dx, dy)),
            ScriptedEvent::Scroll(lines) => self
                .input
                .handle_scroll(MouseScrollDelta::LineDelta(0.0, lines)),
            ScriptedEvent::TogglePause => {
                self.game_time.toggle_pause();
                info!(paused = self.game_time.paused, "pause toggled");
            }
        }
    }

    /// One host frame: player first so the camera follows this frame's position.
    /// While paused the controllers do not run and pointer travel is dropped.
    fn update(&mut self, delta_ms: f32) {
        self.game_time.update(delta_ms);

        if self.game_time.paused {
            self.input.poll_pointer_delta();
            return;
        }

        self.player.tick(&mut self.scene, &self.input, self.game_time.delta_time);
        self.camera.tick(&mut self.scene, &mut self.input);
    }

    fn report(&self) {
        let player = self
            .scene
            .transform(self.player.entity())
            .map(|t| t.position)
            .unwrap_or_default();
        let camera = self
            .scene
            .transform(self.camera.entity())
            .map(|t| t.position)
            .unwrap_or_default();

        info!(
            frame = self.game_time.frame_count,
            time = %format!("{:.2}s", self.game_time.total_time),
            player = %format!("({:.2}, {:.2}, {:.2})", player.x, player.y, player.z),
            grounded = self.player.is_grounded(),
            camera = %format!("({:.2}, {:.2}, {:.2})", camera.x, camera.y, camera.z),
            distance = %format!("{:.2}", self.camera.distance()),
            "state"
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Strider...");

    let settings = GameSettings::load();
    let mut app = StriderApp::new(&settings)?;
    app.report();

    let mut script = SCRIPT.iter().peekable();
    for frame in 0..SESSION_FRAMES {
        while let Some((_, event)) = script.next_if(|(at, _)| *at == frame) {
            app.deliver(*event);
        }

        app.update(FRAME_MS);

        if (frame + 1) % REPORT_EVERY == 0 {
            app.report();
        }
    }

    info!("Session finished after {} frames", app.game_time.frame_count);
    Ok(())
}
