//! Canvas Pong entry point
//!
//! On the web this wires the canvas, pointer, speed buttons and score text to
//! the simulation and runs the frame loop. Natively it plays a headless match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use canvas_pong::renderer::{RenderState, frame_vertices};
    use canvas_pong::sim::{GameEvent, GameState, TickInput, tick};
    use canvas_pong::{Settings, SpeedTier};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut state = GameState::new(seed);
            // Applied on the first serve; the match has not started yet
            state.speed_tier = settings.speed_tier;
            Self {
                state,
                settings,
                render_state: None,
                input: TickInput::default(),
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, time);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame_vertices(&self.state)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Refresh the score text when a point was scored this frame
        fn update_hud(&self) {
            let scored = self
                .state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Scored { .. }));
            if !scored {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("scorePlayer") {
                el.set_text_content(Some(&format!("Player: {}", self.state.right.score)));
            }
            if let Some(el) = document.get_element_by_id("scoreBot") {
                el.set_text_content(Some(&format!("Bot: {}", self.state.left.score)));
            }
        }

        fn select_speed(&mut self, tier: SpeedTier) {
            self.input.speed_tier = Some(tier);
            self.settings.speed_tier = tier;
            self.settings.save();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Canvas Pong starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Settings::load())));
        log::info!("Game initialized with seed: {}", seed);

        // Canvas backing store matches the field
        let (field_w, field_h) = {
            let g = game.borrow();
            (g.state.tuning.field_width, g.state.tuning.field_height)
        };
        let width = field_w as u32;
        let height = field_h as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (field_w, field_h)).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up speed buttons
        setup_speed_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Canvas Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move anywhere in the window, mapped into field space
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let bounds = canvas_clone.get_bounding_client_rect();
                if bounds.height() <= 0.0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let scale = g.state.tuning.field_height / bounds.height() as f32;
                let y = (event.client_y() as f64 - bounds.top()) as f32 * scale;
                g.input.pointer_y = Some(y);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the field starts the match
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.serve = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_speed_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for tier in SpeedTier::ALL {
            let Some(btn) = document.get_element_by_id(tier.button_id()) else {
                log::warn!("No #{} button", tier.button_id());
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().select_speed(tier);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode plays a headless match - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => canvas_pong::Tuning::default(),
    };

    headless_match(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<canvas_pong::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(canvas_pong::Tuning::from_json(&json)?)
}

/// Play one minute of 60 Hz frames with a pointer that trails the ball
#[cfg(not(target_arch = "wasm32"))]
fn headless_match(tuning: canvas_pong::Tuning) {
    use canvas_pong::consts::FRAME_MS;
    use canvas_pong::sim::{GameEvent, GameState, TickInput, tick};

    const FRAMES: u32 = 60 * 60;

    let mut state = match GameState::with_tuning(2024, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            return;
        }
    };
    let mut input = TickInput {
        serve: true,
        ..Default::default()
    };

    for frame in 0..FRAMES {
        tick(&mut state, &input, frame as f64 * FRAME_MS);

        for event in &state.events {
            if let GameEvent::Scored { side } = event {
                let (bot, player) = state.score();
                log::info!("Frame {frame}: {side:?} scored, Bot {bot} - Player {player}");
            }
        }

        // Pointer reads last frame's ball, so the human lags by a frame
        input = TickInput {
            pointer_y: Some(state.ball.pos.y),
            ..Default::default()
        };
    }

    let (bot, player) = state.score();
    log::info!("Final score after {FRAMES} frames: Bot {bot} - Player {player}");
}
