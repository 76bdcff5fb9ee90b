//! Astro Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use astro_blaster::consts::SIM_DT;
    use astro_blaster::hud::HudSnapshot;
    use astro_blaster::render::{CanvasScene, draw_frame};
    use astro_blaster::sim::PlayerAction;
    use astro_blaster::{Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        scene: CanvasScene,
        last_time: f64,
    }

    impl Game {
        /// Run simulation steps for this frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            self.session.advance(dt);

            // Events only matter to logs here; keep the buffer from growing
            for event in self.session.take_events() {
                log::trace!("{:?}", event);
            }
        }

        fn render(&mut self) {
            let state = self.session.state();
            let hud = HudSnapshot::from_state(state);
            draw_frame(&mut self.scene, state, &hud);
        }

        fn handle_key(&mut self, key: &str) -> bool {
            let action = match key {
                "ArrowLeft" | "a" | "A" => Some(PlayerAction::MoveLeft),
                "ArrowRight" | "d" | "D" => Some(PlayerAction::MoveRight),
                " " => Some(PlayerAction::Fire),
                _ => None,
            };

            if let Some(action) = action {
                self.session.queue_action(action);
                return true;
            }

            match key {
                "r" | "R" | "Enter" if !self.session.is_running() => {
                    self.restart();
                    true
                }
                "i" | "I" => {
                    let enabled = !self.session.autopilot();
                    self.session.set_autopilot(enabled);
                    true
                }
                _ => false,
            }
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            match self.session.restart(seed) {
                Ok(()) => {
                    self.last_time = 0.0;
                    log::info!("Game restarted with seed: {}", seed);
                }
                Err(e) => log::error!("Restart failed: {}", e),
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {}", e).into());
        }

        log::info!("Astro Blaster starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let tuning = Tuning::load();
        canvas.set_width(tuning.screen_width as u32);
        canvas.set_height(tuning.screen_height as u32);
        let size = glam::Vec2::new(tuning.screen_width, tuning.screen_height);
        let scene = CanvasScene::new(&canvas, size)?;

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            scene,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, game.clone())?;
        request_animation_frame(game);

        log::info!("Astro Blaster running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().handle_key(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
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
            g.update(time);
            g.render();
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
    log::info!("Astro Blaster (native) starting...");
    log::info!("Native mode runs a headless demo game - run with `trunk serve` to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    if let Err(e) = headless::run(seed) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use astro_blaster::consts::SIM_DT;
    use astro_blaster::sim::SpawnError;
    use astro_blaster::{Session, Tuning};

    /// Ten simulated minutes is far past any possible game length
    const MAX_STEPS: u32 = 10 * 60 * 60;

    pub fn run(seed: u64) -> Result<(), SpawnError> {
        let mut session = Session::new(seed, Tuning::load())?;
        session.set_autopilot(true);

        let mut steps = 0;
        while session.is_running() && steps < MAX_STEPS {
            steps += session.advance(SIM_DT);
        }

        let state = session.state();
        match state.outcome {
            Some(outcome) => println!(
                "seed {}: {:?} after {:.1}s (shots left {}, boss hp {})",
                seed,
                outcome,
                state.now_ms / 1000.0,
                state.remaining_shots,
                state.boss.hp
            ),
            None => println!("seed {}: no result after {} steps", seed, steps),
        }
        Ok(())
    }
}
