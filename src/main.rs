//! Hop Runner entry point
//!
//! In the browser this wires the login form, keyboard and resize events to a
//! [`hop_runner::Game`] and drives it with `requestAnimationFrame`. Natively it
//! plays a few headless runs with a simple autopilot and records every event
//! in an in-memory ledger.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent};

    use hop_runner::consts::*;
    use hop_runner::platform;
    use hop_runner::renderer::canvas::CanvasPainter;
    use hop_runner::sim::Surface;
    use hop_runner::telemetry::EventLog;
    use hop_runner::telemetry::http::FetchTransport;
    use hop_runner::{Game, GamePhase, Settings, Tuning};

    const CANVAS_ID: &str = "gameCanvas";
    const LOGIN_FORM_ID: &str = "loginForm";
    const LOGIN_BUTTON: &str = "#loginForm button";
    const NAME_INPUT_ID: &str = "name";
    const STUDENT_ID_INPUT_ID: &str = "studentId";

    /// Everything the page callbacks share
    struct App {
        game: Game,
        canvas: HtmlCanvasElement,
        painter: CanvasPainter,
        events: EventLog,
        transport: Rc<FetchTransport>,
        settings: Settings,
    }

    impl App {
        /// Match the canvas to the window and tell the game
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_SURFACE_WIDTH as f64);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_SURFACE_HEIGHT as f64);

            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.game.resize(width as f32, height as f32);
        }

        fn paint(&self) {
            self.painter.paint(&self.game.scene());
        }

        /// Hand new gameplay events to the dispatcher, starting it if idle
        fn flush_events(&mut self) {
            for event in self.game.drain_events() {
                if !self.settings.send_events {
                    log::info!("Event (not sent): {}", event);
                    continue;
                }
                if self.events.enqueue(&event) {
                    let events = self.events.clone();
                    let transport = Rc::clone(&self.transport);
                    spawn_local(async move {
                        events.dispatch(transport.as_ref()).await;
                    });
                }
            }
        }
    }

    fn set_display(id: &str, value: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", value);
        }
    }

    fn input_value(id: &str) -> String {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), JsValue> {
        let settings = Settings::load();
        platform::init_logging(settings.level_filter());
        log::info!("Hop Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("missing game canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        let painter = CanvasPainter::from_canvas(&canvas).ok_or("no 2d context")?;

        let app = Rc::new(RefCell::new(App {
            game: Game::new(
                Tuning::default(),
                Surface::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT),
            ),
            canvas,
            painter,
            events: EventLog::new(),
            transport: Rc::new(FetchTransport::new(settings.event_endpoint.clone())),
            settings,
        }));

        setup_login(Rc::clone(&app))?;
        setup_keyboard(Rc::clone(&app))?;
        setup_resize(app)?;

        log::info!("Hop Runner ready, waiting for login");
        Ok(())
    }

    fn setup_login(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let Some(button) = document.query_selector(LOGIN_BUTTON)? else {
            log::warn!("Login button not found");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let name = input_value(NAME_INPUT_ID);
            let student_id = input_value(STUDENT_ID_INPUT_ID);

            {
                let mut a = app.borrow_mut();
                let result = a
                    .game
                    .login(&name, &student_id, platform::run_seed(), platform::now_ms())
                    .cloned();
                match result {
                    Ok(session) => a.events.set_session(session),
                    Err(e) => {
                        log::warn!("Login rejected: {}", e);
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(e.prompt());
                        }
                        return;
                    }
                }

                set_display(LOGIN_FORM_ID, "none");
                set_display(CANVAS_ID, "block");
                a.fit_to_window();
                a.flush_events();
            }

            request_animation_frame(Rc::clone(&app));
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.code().as_str() {
                "Space" => {
                    event.prevent_default();
                    app.borrow_mut().game.request_jump();
                }
                "KeyR" => {
                    let restarted = {
                        let mut a = app.borrow_mut();
                        let restarted = a.game.restart(platform::run_seed(), platform::now_ms());
                        if restarted {
                            a.flush_events();
                        }
                        restarted
                    };
                    if restarted {
                        request_animation_frame(Rc::clone(&app));
                    }
                }
                _ => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            if a.game.phase() == GamePhase::NotStarted {
                return;
            }
            a.fit_to_window();
            // The loop is stopped after a game over; redraw the overlay here
            if a.game.phase() == GamePhase::GameOver {
                a.paint();
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let keep_going = a.game.frame(platform::now_ms());
            a.paint();
            a.flush_events();
            keep_going
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use hop_runner::ledger::{Ledger, MemorySheet};
    use hop_runner::sim::{GameState, Surface};
    use hop_runner::telemetry::EventLog;
    use hop_runner::{Game, GamePhase, Tuning};

    /// One display refresh at 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a run that outlives this many frames
    const MAX_FRAMES: u32 = 20_000;
    /// Ticks between takeoff and reaching the obstacle
    const JUMP_LEAD_TICKS: f32 = 22.0;

    /// Jump when the next obstacle is about to reach the player
    fn should_jump(state: &GameState) -> bool {
        if !state.player.on_ground {
            return false;
        }
        let player_right = state.player.rect.right();
        let lead = JUMP_LEAD_TICKS * state.obstacle_step();
        state
            .obstacles
            .iter()
            .map(|o| o.rect.left() - player_right)
            .filter(|gap| *gap > 0.0)
            .any(|gap| gap <= lead)
    }

    fn forward_events(game: &mut Game, events: &EventLog, ledger: &Ledger<MemorySheet>) {
        for event in game.drain_events() {
            if events.enqueue(&event) {
                pollster::block_on(events.dispatch(ledger));
            }
        }
    }

    pub fn run(tuning: Tuning, runs: u32) {
        let surface = Surface::default();
        let mut game = Game::new(tuning, surface);
        let events = EventLog::new();
        let ledger = Ledger::new(MemorySheet::new());

        let mut now = hop_runner::platform::now_ms();
        let session = match game.login("autopilot", "0000000", 1, now).cloned() {
            Ok(session) => session,
            Err(e) => {
                log::error!("Demo login failed: {}", e);
                return;
            }
        };
        events.set_session(session);
        forward_events(&mut game, &events, &ledger);

        for run in 1..=runs {
            let mut frames = 0;
            while frames < MAX_FRAMES {
                if should_jump(game.state()) {
                    game.request_jump();
                }
                now += FRAME_MS;
                frames += 1;
                let keep_going = game.frame(now);
                forward_events(&mut game, &events, &ledger);
                if !keep_going {
                    break;
                }
            }

            let state = game.state();
            if game.phase() == GamePhase::GameOver {
                println!(
                    "Run {}: game over after {} frames, score {}",
                    run, state.frame, state.score
                );
            } else {
                println!(
                    "Run {}: still alive after {} frames, score {}",
                    run, state.frame, state.score
                );
                break;
            }

            if run < runs {
                game.restart(u64::from(run) + 1, now);
                forward_events(&mut game, &events, &ledger);
            }
        }

        let stats = events.stats();
        println!(
            "\nEvents delivered: {}, failed: {}",
            stats.delivered, stats.failed
        );
        let printed = ledger.with_store(|sheet| {
            for row in sheet.rows() {
                println!("{}", row.cells().join("\t"));
            }
        });
        if let Err(e) = printed {
            log::error!("Could not read ledger: {}", e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hop_runner::{Settings, Tuning, platform};

    let settings = Settings::load();
    platform::init_logging(settings.level_filter());
    log::info!("Hop Runner (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => Tuning::default(),
    };

    native_demo::run(tuning, 3);
}
