//! Meteor Storm entry point
//!
//! Wires the simulation core to its host: on wasm32 it mounts against a
//! fixed 800x600 page region, stages pointer/keyboard intent, and drives
//! one tick per animation frame while the run is live. Natively it runs a
//! short headless demo so the core can be exercised without a browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, KeyboardEvent, MouseEvent};

    use meteor_storm::sim::{GameState, Phase, SimSnapshot, TickInput, tick};
    use meteor_storm::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        high_score: HighScore,
        settings: Settings,
        /// Handle of the pending animation frame, if one is scheduled.
        /// Every phase transition either cancels it or lets it lapse, so a
        /// stale frame can never tick a run that already changed phase.
        frame_handle: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                high_score: HighScore::load(),
                settings: Settings::load(),
                frame_handle: None,
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
        web_sys::window()
            .and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
    }

    /// Cancel any pending frame. Part of leaving `Running`, not cleanup.
    fn halt_loop(game: &Rc<RefCell<Game>>) {
        if let Some(handle) = game.borrow_mut().frame_handle.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(handle);
        }
    }

    /// Start the frame loop if the run is live and no frame is pending.
    ///
    /// The loop re-borrows the game on every frame rather than capturing
    /// any state, and reschedules itself only while the phase is still
    /// `Running`.
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let g = game.borrow();
            if g.frame_handle.is_some() || g.state.phase != Phase::Running {
                return;
            }
        }

        let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let frame_outer = frame.clone();
        let game_rc = game.clone();

        *frame_outer.borrow_mut() = Some(Closure::new(move |now: f64| {
            let snapshot = {
                let mut g = game_rc.borrow_mut();
                g.frame_handle = None;
                let input = std::mem::take(&mut g.input);
                tick(&mut g.state, &input, now);
                let score = g.state.score;
                g.high_score.observe(score);
                g.state.snapshot(now, g.high_score.best())
            };
            update_hud(&snapshot);

            let still_running = game_rc.borrow().state.phase == Phase::Running;
            if still_running && let Some(cb) = frame.borrow().as_ref() {
                let handle = request_frame(cb);
                game_rc.borrow_mut().frame_handle = handle;
            }
        }));

        if let Some(cb) = frame_outer.borrow().as_ref() {
            let handle = request_frame(cb);
            game.borrow_mut().frame_handle = handle;
        }
    }

    /// Repaint the readouts from current state, outside the frame loop.
    /// Needed after any host-driven transition, since no frame runs to do it.
    fn repaint(game: &Rc<RefCell<Game>>) {
        let snapshot = {
            let g = game.borrow();
            g.state.snapshot(now_ms(), g.high_score.best())
        };
        update_hud(&snapshot);
    }

    /// Mirror the readouts into the page, when the host markup has them
    fn update_hud(snapshot: &SimSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let phase = match snapshot.phase {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game-over",
        };
        let fields = [
            ("game-score", snapshot.score.to_string()),
            ("game-high-score", snapshot.high_score.to_string()),
            ("game-level", snapshot.level.to_string()),
            ("game-weapon", snapshot.weapon_tier.to_string()),
            ("game-phase", phase.to_string()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
    }

    fn setup_pointer(game: Rc<RefCell<Game>>, field: Element) {
        let rect_source = field.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = rect_source.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            // Stage intent only; the next tick applies and clamps it, and
            // motion outside `Running` is discarded at the staging step
            let mut g = game.borrow_mut();
            let phase = g.state.phase;
            g.input.stage_pointer(phase, Vec2::new(x, y));
        });
        let _ = field
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let pause_key = game.borrow().settings.pause_key.clone();
            if event.key() != pause_key {
                return;
            }
            event.prevent_default();
            let phase = game.borrow().state.phase;
            match phase {
                Phase::Running => {
                    game.borrow_mut().state.toggle_pause(now_ms());
                    halt_loop(&game);
                    repaint(&game);
                }
                Phase::Paused => {
                    let mut g = game.borrow_mut();
                    g.state.toggle_pause(now_ms());
                    g.input = TickInput::default();
                    drop(g);
                    ensure_loop(&game);
                    repaint(&game);
                }
                Phase::Idle | Phase::GameOver => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>, document: &web_sys::Document) {
        // Start and restart are the same transition
        for id in ["game-start", "game-restart"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let phase = game.borrow().state.phase;
                    if matches!(phase, Phase::Idle | Phase::GameOver) {
                        let mut g = game.borrow_mut();
                        g.state.start();
                        g.input = TickInput::default();
                        drop(g);
                        ensure_loop(&game);
                        repaint(&game);
                    }
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("game-menu") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().state.return_to_menu();
                repaint(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        if game.borrow().settings.auto_pause_hidden {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && game.borrow().state.phase == Phase::Running
                {
                    game.borrow_mut().state.toggle_pause(now_ms());
                    halt_loop(&game);
                    repaint(&game);
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        if game.borrow().settings.auto_pause_blur {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if game.borrow().state.phase == Phase::Running {
                    game.borrow_mut().state.toggle_pause(now_ms());
                    halt_loop(&game);
                    repaint(&game);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Meteor Storm starting");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document to mount into");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        // Paint the persisted readouts before any run starts
        let snapshot = {
            let g = game.borrow();
            g.state.snapshot(now_ms(), g.high_score.best())
        };
        update_hud(&snapshot);

        if let Some(field) = document.get_element_by_id("game-field") {
            setup_pointer(game.clone(), field);
        } else {
            log::warn!("no #game-field element; pointer input disabled");
        }
        setup_keyboard(game.clone());
        setup_buttons(game.clone(), &document);
        setup_auto_pause(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;

    use meteor_storm::consts::*;
    use meteor_storm::sim::{GameState, Phase, TickInput, tick};
    use meteor_storm::HighScore;

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let mut high_score = HighScore::load();

    log::info!("Meteor Storm (native) headless demo, seed {seed}");
    state.start();

    // Sweep the player along the bottom and let auto-fire do its thing
    let mut now = 0.0;
    while state.phase == Phase::Running && now < 120_000.0 {
        now += 1000.0 / 60.0;
        let t = now as f32 / 1000.0;
        let center_x = PLAYER_SIZE / 2.0
            + (FIELD_WIDTH - PLAYER_SIZE) * 0.5 * (1.0 + (t * 0.8).sin());
        let input = TickInput {
            pointer: Some(Vec2::new(center_x, PLAYER_START_Y + PLAYER_SIZE / 2.0)),
        };
        tick(&mut state, &input, now);
        high_score.observe(state.score);
    }

    let snapshot = state.snapshot(now, high_score.best());
    println!(
        "survived {:.1}s - score {}, level {}, best {}",
        now / 1000.0,
        snapshot.score,
        snapshot.level,
        snapshot.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
