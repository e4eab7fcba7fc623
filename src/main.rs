use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, error, info};
use winit::{
    dpi::LogicalSize,
    error::EventLoopError,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{Renderer, SpriteBatch, TextureHandle};
use game::{Edition, GameConfig, Session};

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 300;

/// Top-down sprite arena
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Which release of the game to run
    #[arg(long, value_enum, default_value_t = Edition::Chase)]
    edition: Edition,

    /// Directory holding the sprite assets
    #[arg(long, default_value = "data")]
    assets: PathBuf,

    /// Do not draw hitbox outlines
    #[arg(long)]
    no_hitboxes: bool,

    /// Go back to the walking pose as soon as an attack ends
    #[arg(long)]
    release_attack_pose: bool,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        let mut config = GameConfig::for_edition(self.edition).with_assets_dir(self.assets);
        if self.no_hitboxes {
            config.show_hitboxes = false;
        }
        config.release_attack_pose = self.release_attack_pose;
        config
    }
}

/// First error that stopped the event loop, reported once the loop returns
#[derive(Debug, Clone, Default)]
struct Fatal(Rc<RefCell<Option<anyhow::Error>>>);

impl Fatal {
    /// Record an error; later ones are only logged by the caller
    fn set(&self, err: anyhow::Error) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Exit status of the whole run
    fn finish(self, run: std::result::Result<(), EventLoopError>) -> Result<()> {
        if let Some(err) = self.0.take() {
            return Err(err);
        }
        run.map_err(|e| anyhow!("Event loop error: {}", e))
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Cli::parse().into_config();
    info!("Starting Sprite Arena ({:?} edition)...", config.edition);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), config.screen_size()))?;

    let loader = AssetLoader::new(&config.assets_dir);
    let mut session: Session<TextureHandle> =
        Session::build(&config, &loader, |image| renderer.upload_image(image)).with_context(
            || format!("Failed to load assets from {}", config.assets_dir.display()),
        )?;

    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new(config.tick_rate);
    let mut batch = SpriteBatch::new();

    let fatal = Fatal::default();
    let fatal_in_loop = fatal.clone();

    let run = event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                input.process_keyboard_event(&event);
            }
            WindowEvent::Focused(false) => input.reset(),
            WindowEvent::Resized(physical_size) => renderer.resize(physical_size),
            WindowEvent::RedrawRequested => {
                for _ in 0..game_loop.begin_frame() {
                    session.tick(&input.controls(), game_loop.elapsed_ms());
                    input.end_tick();
                }

                if let Err(e) = draw(&session, &mut renderer, &mut batch) {
                    error!("Rendering failed: {:#}", e);
                    fatal_in_loop.set(e);
                    elwt.exit();
                    return;
                }

                if game_loop.frame_count() % FPS_LOG_INTERVAL == 0 {
                    debug!(
                        "FPS: {:.1}, ticks: {}, entities: {}, quads: {}",
                        game_loop.fps(),
                        game_loop.tick_count(),
                        session.world().len(),
                        batch.quad_count()
                    );
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            // Sleep until the next tick is due, then redraw
            let next_tick = game_loop.next_tick_at();
            if Instant::now() >= next_tick {
                window.request_redraw();
            } else {
                elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));
            }
        }
        _ => {}
    });

    fatal.finish(run)
}

fn draw(
    session: &Session<TextureHandle>,
    renderer: &mut Renderer,
    batch: &mut SpriteBatch,
) -> Result<()> {
    let items = session.draw_list()?;
    batch.rebuild(&items, renderer.white_texture());
    renderer.render(batch)
}
