//! Drift Blaster entry point
//!
//! Web: wires keyboard events and `requestAnimationFrame` into the host loop and
//! exposes `snapshot_json` to the page's renderer.
//! Native: runs a headless autopilot session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, FocusEvent, KeyboardEvent, VisibilityState};

    use drift_blaster::audio::AudioManager;
    use drift_blaster::consts::SIM_DT;
    use drift_blaster::persistence::LocalStorageStore;
    use drift_blaster::platform::key_from_code;
    use drift_blaster::{App, GameConfig};

    type WebApp = App<LocalStorageStore, AudioManager>;

    /// Game instance plus frame timing
    struct Game {
        app: WebApp,
        last_time: f64,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Current frame as JSON for the page's renderer
    #[wasm_bindgen]
    pub fn snapshot_json() -> String {
        GAME.with(|slot| {
            slot.borrow()
                .as_ref()
                .and_then(|game| serde_json::to_string(&game.borrow().app.snapshot()).ok())
                .unwrap_or_default()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Drift Blaster starting...");

        let app = App::new(
            GameConfig::default(),
            LocalStorageStore::new(),
            AudioManager::new(),
        );
        let game = Rc::new(RefCell::new(Game { app, last_time: 0.0 }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        setup_keyboard(game.clone());
        setup_focus_release(game.clone());
        request_animation_frame(game);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; input disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // First gesture unlocks audio
                g.app.audio_mut().unlock();
                if let Some(key) = key_from_code(&event.key()) {
                    event.prevent_default();
                    g.app.input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_from_code(&event.key()) {
                    game.borrow_mut().app.input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Key-ups are lost while the page is unfocused, so drop held keys on blur or hide
    fn setup_focus_release(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_: FocusEvent| {
                game.borrow_mut().app.release_input();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = window.document() else {
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: Event| {
            if doc.visibility_state() == VisibilityState::Hidden {
                game.borrow_mut().app.release_input();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.app.frame(dt);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Drift Blaster (native) starting headless demo...");

    let config = match std::env::args().nth(1) {
        Some(path) => drift_blaster::GameConfig::load(std::path::Path::new(&path)),
        None => drift_blaster::GameConfig::default(),
    };
    demo::run(config);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use drift_blaster::audio::NullAudio;
    use drift_blaster::persistence::JsonFileStore;
    use drift_blaster::platform::Key;
    use drift_blaster::sim::{Entity, GameMode};
    use drift_blaster::{App, GameConfig, normalize_angle};

    /// Wall-clock frame rate of the scripted session
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this many seconds of play
    const MAX_SECONDS: u32 = 180;

    type DemoApp = App<JsonFileStore, NullAudio>;

    pub fn run(config: GameConfig) {
        let path = std::env::temp_dir().join("drift_blaster").join("high_score.json");
        let store = JsonFileStore::new(path);
        log::info!("High score file: {}", store.path().display());
        let mut app = App::new(config, store, NullAudio::default());

        app.input.key_down(Key::Start);
        app.frame(FRAME_DT);
        app.input.key_up(Key::Start);

        let mut frames = 0u32;
        while app.mode() == GameMode::Play && frames < MAX_SECONDS * 60 {
            steer(&mut app);
            app.frame(FRAME_DT);
            frames += 1;
        }

        let scores = &app.state.scores;
        log::info!(
            "Demo finished after {:.1}s: score {}, wave {}, lives {}, high score {}",
            frames as f32 * FRAME_DT,
            scores.score,
            app.state.wave + 1,
            app.state.lives,
            scores.high_score
        );
    }

    /// Turn toward the nearest hazard and keep firing
    fn steer(app: &mut DemoApp) {
        let ship = &app.state.ship;
        let target = app
            .state
            .asteroids
            .iter()
            .filter(|a| !a.is_dead())
            .min_by(|a, b| {
                let da = a.body.pos.distance_squared(ship.body.pos);
                let db = b.body.pos.distance_squared(ship.body.pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|a| a.body.pos - ship.body.pos);

        let (mut left, mut right, mut thrust) = (false, false, false);
        if let Some(offset) = target {
            let error = normalize_angle(offset.y.atan2(offset.x) - ship.angle);
            left = error < -0.05;
            right = error > 0.05;
            thrust = offset.length() > 260.0;
        }

        set_key(app, Key::Left, left);
        set_key(app, Key::Right, right);
        set_key(app, Key::Thrust, thrust);
        set_key(app, Key::Fire, true);
    }

    fn set_key(app: &mut DemoApp, key: Key, down: bool) {
        if down {
            app.input.key_down(key);
        } else {
            app.input.key_up(key);
        }
    }
}
