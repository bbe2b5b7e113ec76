//! Tsum Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use glam::Vec2;
    use tsum_drop::GameConfig;
    use tsum_drop::consts::*;
    use tsum_drop::renderer::{CanvasBackend, build_frame};
    use tsum_drop::sim::{InputEvent, SelectionOutcome, Viewport, World, handle_input};

    /// Game instance holding all state
    struct Game {
        world: World,
        backend: CanvasBackend,
        accumulator: f32,
        last_time: f64,
        /// Last score written to the HUD
        shown_score: Option<u64>,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, backend: CanvasBackend) -> Self {
            Self {
                world: World::new(seed, Viewport::new(0.0, 0.0), config),
                backend,
                accumulator: 0.0,
                last_time: 0.0,
                shown_score: None,
            }
        }

        /// Size the canvas to the window and hand the viewport to the world
        fn fit_viewport(&mut self, event: fn(Viewport) -> InputEvent) {
            let viewport = window_viewport();
            self.backend
                .resize(viewport.width as u32, viewport.height as u32);
            self.input(event(viewport));
        }

        fn input(&mut self, event: InputEvent) {
            if let Some(SelectionOutcome::Committed { count, points }) =
                handle_input(&mut self.world, event)
            {
                log::debug!("Committed {} tokens for {} points", count, points);
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.world.tick();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of trying to catch up
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&self) {
            self.backend.execute(&build_frame(&self.world));
        }

        /// Write the score to the DOM when it changed
        fn update_hud(&mut self) {
            let score = self.world.score;
            if self.shown_score == Some(score) {
                return;
            }
            let el = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("score"));
            if let Some(el) = el {
                el.set_text_content(Some(&score.to_string()));
            }
            self.shown_score = Some(score);
        }
    }

    fn window_viewport() -> Viewport {
        let size = web_sys::window().map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width as f32, height as f32)
        });
        let (width, height) = size.unwrap_or((0.0, 0.0));
        Viewport::new(width, height)
    }

    fn pointer_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Tsum Drop starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let backend = CanvasBackend::new(canvas.clone())?;
        let game = Rc::new(RefCell::new(Game::new(seed, config, backend)));

        game.borrow_mut().fit_viewport(InputEvent::Reset);
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone())?;
        setup_reset_button(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Tsum Drop running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Pointer down starts (or extends) a chain
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut()
                    .input(InputEvent::PointerDown(pointer_pos(&event)));
            });
            canvas.add_event_listener_with_callback(
                "pointerdown",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Dragging with a button held extends the chain
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input(InputEvent::PointerMove {
                    pos: pointer_pos(&event),
                    pressed: event.buttons() > 0,
                });
            });
            canvas.add_event_listener_with_callback(
                "pointermove",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Release anywhere on the page ends the drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input(InputEvent::PointerUp);
            });
            window.add_event_listener_with_callback(
                "pointerup",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Resize restarts the world at the new size
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_viewport(InputEvent::Resize);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_reset_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().fit_viewport(InputEvent::Reset);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("No #reset-btn element, reset disabled");
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tsum Drop (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable game");

    let path = std::env::args().nth(1);
    let config = tsum_drop::GameConfig::load_from(path.as_deref());
    headless_demo(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let a batch fall and settle, then drag the longest chain reachable from
/// the first token and release it.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(config: tsum_drop::GameConfig) {
    use tsum_drop::distance;
    use tsum_drop::sim::{InputEvent, Viewport, World, handle_input};

    let viewport = Viewport::new(480.0, 800.0);
    let mut world = World::new(42, viewport, config);
    handle_input(&mut world, InputEvent::Reset(viewport));

    // Five seconds of simulated time
    for _ in 0..300 {
        world.tick();
    }
    log::info!(
        "After {} ticks: {} tokens live, {} pending",
        world.time_ticks,
        world.tokens.len(),
        world.pending_spawns()
    );

    let Some(first) = world.tokens.first().cloned() else {
        log::warn!("No tokens landed");
        return;
    };

    // Greedy walk: next unvisited token of the same kind within link range
    let mut path = vec![first.pos];
    let mut visited = vec![first.id];
    while let Some(next) = world.tokens.iter().find(|t| {
        t.kind == first.kind
            && !visited.contains(&t.id)
            && path
                .last()
                .is_some_and(|&tail| distance(tail, t.pos) < world.config.link_distance)
    }) {
        path.push(next.pos);
        visited.push(next.id);
    }

    handle_input(&mut world, InputEvent::PointerDown(path[0]));
    for &pos in &path[1..] {
        handle_input(&mut world, InputEvent::PointerMove { pos, pressed: true });
    }
    let outcome = handle_input(&mut world, InputEvent::PointerUp);

    log::info!(
        "Dragged {} {:?} token(s): {:?}, score {}",
        path.len(),
        first.kind,
        outcome,
        world.score
    );
    println!("score: {}", world.score);
}
