//! Application state and the per-frame steps
//!
//! One mesh, one camera, one light. The frame loop in `main` drives:
//! input -> update -> render -> present.

use crate::config::{ConfigError, ViewerConfig};
use crate::mesh::Mesh;
use crate::rasterizer::{
    project_mesh, render_triangles, Camera, CullMode, Framebuffer, Light, Mat4, PixelSink,
    RenderMode, RenderSettings, Texture, Vec3,
};

/// Discrete events fed in by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Render mode preset 1-4
    SelectMode(u8),
    SetCull(CullMode),
}

/// Main application state
pub struct AppState {
    pub config: ViewerConfig,
    pub mesh: Mesh,
    pub camera: Camera,
    pub light: Light,
    pub projection: Mat4,
    pub settings: RenderSettings,
    /// Radians per second per axis
    pub angular_velocity: Vec3,
    pub fb: Framebuffer,
    pub backdrop: Option<Texture>,
    pub running: bool,
    /// Simulated time in seconds
    pub elapsed: f32,
}

impl AppState {
    /// Build the scene from a config, loading the mesh and backdrop it names.
    ///
    /// An unloadable mesh falls back to the builtin cube; an unloadable
    /// backdrop is dropped. Only an invalid config is an error.
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mesh = match &config.mesh_path {
            Some(path) => Mesh::load_from_file(path).unwrap_or_else(|e| {
                log::error!("Failed to load mesh {}: {}, using builtin cube", path.display(), e);
                Mesh::builtin_cube()
            }),
            None => Mesh::builtin_cube(),
        };

        let backdrop = config.backdrop_path.as_ref().and_then(|path| match Texture::from_file(path) {
            Ok(tex) => {
                log::info!("Loaded backdrop: {} ({}x{})", tex.name, tex.width, tex.height);
                Some(tex)
            }
            Err(e) => {
                log::warn!("Failed to load backdrop {}: {}", path.display(), e);
                None
            }
        });

        Ok(Self::with_mesh(config, mesh, backdrop))
    }

    /// Build the scene around an already loaded mesh
    pub fn with_mesh(config: ViewerConfig, mut mesh: Mesh, backdrop: Option<Texture>) -> Self {
        mesh.translation = config.mesh_translation;
        mesh.scale = config.mesh_scale;

        log::info!(
            "Scene: {} vertices, {} faces, {}x{} framebuffer",
            mesh.vertices.len(),
            mesh.faces.len(),
            config.width,
            config.height
        );

        Self {
            mesh,
            camera: Camera::new(config.camera_position),
            light: config.light(),
            projection: config.projection(),
            settings: config.render_settings(),
            angular_velocity: config.angular_velocity(),
            fb: Framebuffer::new(config.width, config.height),
            backdrop,
            running: true,
            elapsed: 0.0,
            config,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
            InputEvent::SelectMode(index) => match RenderMode::from_preset(index) {
                Some(mode) => {
                    log::info!("Render mode {}: {:?}", index, mode);
                    self.settings.mode = mode;
                }
                None => log::warn!("No render mode preset {}", index),
            },
            InputEvent::SetCull(cull) => {
                log::info!("Cull mode: {:?}", cull);
                self.settings.cull = cull;
            }
        }
    }

    /// Advance simulated time and the mesh rotation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        self.mesh.update(dt, self.angular_velocity);
    }

    /// Draw one frame into the framebuffer. Returns the triangle count.
    pub fn render(&mut self) -> usize {
        self.fb.clear(self.config.background);
        if let Some(backdrop) = &self.backdrop {
            self.fb.blit(0, 0, backdrop);
        }
        self.fb.draw_grid(self.config.grid_spacing, self.config.grid_color);

        let triangles = project_mesh(
            &self.mesh,
            &self.camera,
            &self.light,
            &self.projection,
            &self.settings,
            self.fb.width,
            self.fb.height,
        );
        render_triangles(&mut self.fb, &triangles, &self.settings);

        log::trace!("frame at {:.3}s: {} triangles", self.elapsed, triangles.len());
        triangles.len()
    }

    pub fn present<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        self.fb.present(sink);
    }

    /// Input, update, render, present. Returns false once quit was requested.
    pub fn step<S: PixelSink + ?Sized>(&mut self, events: &[InputEvent], dt: f32, sink: &mut S) -> bool {
        for &event in events {
            self.handle_event(event);
        }
        if !self.running {
            return false;
        }
        self.update(dt);
        self.render();
        self.present(sink);
        true
    }
}
