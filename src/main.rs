use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use raytracer::{export, render, scene, Movement, RenderState, Scene};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Nudge {
    Left,
    Right,
    Forward,
    Back,
    Up,
    Down,
}

impl From<Nudge> for Movement {
    fn from(n: Nudge) -> Self {
        match n {
            Nudge::Left => Movement::Left,
            Nudge::Right => Movement::Right,
            Nudge::Forward => Movement::Forward,
            Nudge::Back => Movement::Back,
            Nudge::Up => Movement::Up,
            Nudge::Down => Movement::Down,
        }
    }
}

#[derive(Parser)]
#[command(name = "raytracer")]
#[command(about = "Render a scene of spheres and point lights to an image")]
struct Cli {
    /// JSON scene file. Renders the built-in demo scene when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image; never overwritten if it already exists
    #[arg(short, long, default_value = "renders/render.png")]
    output: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Supersampling factor
    #[arg(long)]
    ssaa: Option<u32>,

    /// Trace one pixel per N×N block of output pixels
    #[arg(long)]
    pixel_spacing: Option<u32>,

    /// Seed for blurred reflections
    #[arg(long)]
    seed: Option<u64>,

    /// Move the camera one step before rendering (repeatable)
    #[arg(long, value_enum)]
    nudge: Vec<Nudge>,

    /// No progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    // Checked again on save; this just avoids a wasted render.
    if cli.output.exists() {
        anyhow::bail!("{} already exists, refusing to overwrite", cli.output.display());
    }

    let mut scene = match &cli.scene {
        Some(path) => scene::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => Scene::demo(),
    };

    let settings = &mut scene.settings;
    settings.width = cli.width.unwrap_or(settings.width);
    settings.height = cli.height.unwrap_or(settings.height);
    settings.ssaa = cli.ssaa.unwrap_or(settings.ssaa);
    settings.pixel_spacing = cli.pixel_spacing.unwrap_or(settings.pixel_spacing);
    settings.seed = cli.seed.unwrap_or(settings.seed);
    let scene = Scene::new(scene.spheres, scene.lights, scene.camera, scene.settings)?;

    let mut state = RenderState::new(scene.camera);
    for step in &cli.nudge {
        state.nudge((*step).into());
    }

    let cam = &state.camera;
    info!("=== CAMERA ===");
    info!(" position : {:?}", cam.position);
    info!(" focal    : {:.3}", cam.focal_length);
    info!(" fov (°)  : {:.2}", cam.fov.to_degrees());
    info!(" depth    : {}", cam.max_reflection_depth);
    info!("=== {} SPHERES, {} LIGHTS ===", scene.spheres.len(), scene.lights.len());
    for (i, s) in scene.spheres.iter().enumerate() {
        debug!(" [{}] Sphere {{ center: {:?}, radius: {:.4}, albedo: {:?} }}",
               i, s.center, s.radius, s.material.albedo);
    }
    for (i, l) in scene.lights.iter().enumerate() {
        debug!(" [{}] Light {{ pos: {:?}, diffuse: {:.2}, specular: {:.2} }}",
               i, l.position, l.diffuse_component, l.specular_component);
    }

    let image = render(&scene, &state, !cli.quiet)?;
    export::save(&image, &cli.output)?;
    Ok(())
}
