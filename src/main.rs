//! Tilehop entry point
//!
//! Handles platform-specific initialization and runs the game loop. On wasm
//! this wires keyboard events and requestAnimationFrame to the simulation;
//! natively it runs a short headless demo of the sim.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use tilehop::assets;
    use tilehop::input::{apply_key, Key};
    use tilehop::render::{draw_frame, CanvasSink};
    use tilehop::sim::{tick, GameState, SessionPhase, TickInput, Viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        canvas: HtmlCanvasElement,
        sink: CanvasSink,
        last_phase: SessionPhase,
    }

    impl Game {
        /// Run one simulation step and clear the one-shot inputs it consumed
        fn update(&mut self, view: Viewport) {
            tick(&mut self.state, &self.input, view);
            self.input.shoot = false;
            self.input.restart = false;

            if self.state.phase != self.last_phase {
                log::info!(
                    "session phase: {:?} (score {})",
                    self.state.phase,
                    self.state.score
                );
                self.last_phase = self.state.phase;
            }
        }
    }

    /// Match the canvas backing store to the window size
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tilehop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Load barrier: the loop starts only once every sprite has decoded
        let assets = match assets::load_all().await {
            Ok(assets) => assets,
            Err(err) => {
                log::error!("{err}; refusing to start the game loop");
                return;
            }
        };

        // Level geometry anchors to the viewport height at load time
        let state = GameState::new(canvas.height() as f32);
        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            canvas: canvas.clone(),
            sink: CanvasSink::new(ctx, assets),
            last_phase: SessionPhase::Playing,
        }));

        setup_resize_handler(canvas);
        setup_keyboard_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Tilehop running!");
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    apply_key(&mut g.input, key, true, event.repeat());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    let mut g = game.borrow_mut();
                    apply_key(&mut g.input, key, false, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let g = &mut *game.borrow_mut();

            // The viewport is re-read every frame; resizes take effect here
            let view = Viewport {
                w: g.canvas.width() as f32,
                h: g.canvas.height() as f32,
            };
            g.update(view);

            g.sink.begin_frame(view);
            draw_frame(&g.state, view, &mut g.sink);
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
    use tilehop::sim::{tick, GameState, TickInput, Viewport};

    env_logger::init();
    log::info!("Tilehop (native) starting...");
    log::info!("Native mode is headless - build for wasm32 for the playable version");

    // Headless demo: hold right and hop periodically, report the outcome
    let view = Viewport { w: 800.0, h: 600.0 };
    let mut state = GameState::new(view.h);
    let mut frames = 0u32;
    while !state.is_terminal() && frames < 3600 {
        let input = TickInput {
            right: true,
            jump: frames % 30 < 15,
            ..Default::default()
        };
        tick(&mut state, &input, view);
        frames += 1;
    }

    println!(
        "demo finished after {} frames: {:?}, score {}, player at x={:.0}",
        frames, state.phase, state.score, state.player.pos.x
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
