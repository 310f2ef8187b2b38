//! Grammar Defense entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use grammar_defense::audio::AudioEngine;
    use grammar_defense::consts::*;
    use grammar_defense::render::Renderer;
    use grammar_defense::sim::{self, GameEvent, GameState, MatchPhase};
    use grammar_defense::vocab::{GameMode, WordCategory};
    use grammar_defense::BestScore;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: AudioEngine,
        renderer: Option<Renderer>,
        best: BestScore,
        accumulator: f32,
        last_time: f64,
        /// Cosmetic display mode: hide the Japanese gloss line
        english_only: bool,
        /// Set when the finished match produced a new best score
        new_record: bool,
        /// Track phase for music and best-score transitions
        last_phase: MatchPhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed, GameMode::Normal),
                audio: AudioEngine::new(),
                renderer: None,
                best: BestScore::load(),
                accumulator: 0.0,
                last_time: 0.0,
                english_only: false,
                new_record: false,
                last_phase: MatchPhase::Menu,
            }
        }

        /// Run simulation ticks at the fixed timestep
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                sim::tick(&mut self.state, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.pump_events();
            self.watch_phase();
        }

        /// Route queued simulation cues into the audio engine
        fn pump_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::Speak(text) => self.audio.speak(text),
                }
            }
        }

        /// React to phase transitions: menu music and best-score recording
        fn watch_phase(&mut self) {
            let phase = self.state.phase;
            if phase == self.last_phase {
                return;
            }

            match phase {
                MatchPhase::Menu => self.audio.start_menu_music(),
                MatchPhase::Playing | MatchPhase::GameOver => self.audio.stop_music(),
            }

            if phase == MatchPhase::GameOver {
                self.new_record = self.best.record(self.state.score);
                if self.new_record {
                    log::info!("New best score: {}", self.state.score);
                }
            }

            self.last_phase = phase;
        }

        /// Category shot - synchronous, resolved before the handler returns
        fn shoot(&mut self, category: WordCategory) {
            sim::shoot(&mut self.state, category);
            self.pump_events();
        }

        fn start_match(&mut self, mode: GameMode) {
            self.audio.resume();
            self.audio.stop_music();
            self.new_record = false;
            self.state.start_match(mode);
            self.pump_events();
            log::info!("Match started ({:?})", mode);
        }

        fn to_menu(&mut self) {
            self.state.to_menu();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut renderer) = self.renderer {
                renderer.render(&self.state, self.english_only);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let in_menu = self.state.phase == MatchPhase::Menu;

            // Score (menu shows the stored best instead)
            if let Some(el) = document.query_selector("#hud-score .hud-label").ok().flatten() {
                el.set_text_content(Some(if in_menu { "HI-SCORE" } else { "SCORE" }));
            }
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                let shown = if in_menu {
                    self.best.score
                } else {
                    self.state.score
                };
                el.set_text_content(Some(&format!("{shown:06}")));
            }

            // Hit points as hearts
            if let Some(el) = document.get_element_by_id("hud-hearts") {
                if in_menu {
                    let _ = el.set_attribute("class", "hidden");
                } else {
                    let _ = el.set_attribute("class", "");
                    let full = self.state.hp as usize;
                    let empty = INITIAL_HP as usize - full;
                    el.set_text_content(Some(&format!(
                        "{}{}",
                        "\u{2665}".repeat(full),
                        "\u{2661}".repeat(empty)
                    )));
                }
            }

            // Language toggle label
            if let Some(el) = document.get_element_by_id("btn-lang") {
                el.set_text_content(Some(if self.english_only {
                    "ENG ONLY"
                } else {
                    "JP & EN"
                }));
            }

            // Mute toggle label
            if let Some(el) = document.get_element_by_id("btn-mute") {
                el.set_text_content(Some(if self.audio.is_muted() {
                    "SOUND OFF"
                } else {
                    "SOUND ON"
                }));
            }

            // Menu overlay
            if let Some(el) = document.get_element_by_id("menu-overlay") {
                let _ = el.set_attribute("class", if in_menu { "" } else { "hidden" });
            }

            // Game over overlay
            if let Some(el) = document.get_element_by_id("game-over-overlay") {
                if self.state.phase == MatchPhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(banner) = document.get_element_by_id("new-record") {
                        let _ = banner
                            .set_attribute("class", if self.new_record { "" } else { "hidden" });
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grammar Defense starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            g.renderer = Renderer::new(&canvas);
            if g.renderer.is_none() {
                log::warn!("Canvas 2D context unavailable - rendering disabled");
            }
            // Menu music arms now; it stays silent until a gesture resumes
            // the audio context
            g.audio.start_menu_music();
        }

        setup_input_handlers(game.clone());
        setup_audio_resume(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Grammar Defense running!");
    }

    /// First user gesture wakes the audio context
    fn setup_audio_resume(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        for event_name in ["click", "keydown", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow().audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(
        document: &web_sys::Document,
        id: &str,
        handler: impl FnMut(web_sys::MouseEvent) + 'static,
    ) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing element #{id}");
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Category buttons
        for (id, category) in [
            ("btn-noun", WordCategory::Noun),
            ("btn-verb", WordCategory::Verb),
            ("btn-adj", WordCategory::Adjective),
        ] {
            let game = game.clone();
            on_click(&document, id, move |_| {
                game.borrow_mut().shoot(category);
            });
        }

        // Menu: start buttons pick the mode
        for (id, mode) in [
            ("btn-start", GameMode::Normal),
            ("btn-imabari", GameMode::Imabari),
        ] {
            let game = game.clone();
            on_click(&document, id, move |_| {
                game.borrow_mut().start_match(mode);
            });
        }

        // Game over: retry keeps the mode, or fall back to the menu
        {
            let game = game.clone();
            on_click(&document, "btn-retry", move |_| {
                let mode = game.borrow().state.mode;
                game.borrow_mut().start_match(mode);
            });
        }
        {
            let game = game.clone();
            on_click(&document, "btn-menu", move |_| {
                game.borrow_mut().to_menu();
            });
        }

        // Language toggle
        {
            let game = game.clone();
            on_click(&document, "btn-lang", move |_| {
                let mut g = game.borrow_mut();
                g.english_only = !g.english_only;
                g.audio.play(sim::SoundCue::Blip);
            });
        }

        // Mute toggle
        {
            let game = game.clone();
            on_click(&document, "btn-mute", move |_| {
                let mut g = game.borrow_mut();
                let muted = g.audio.toggle_mute();
                if !muted && g.state.phase == MatchPhase::Menu {
                    g.audio.start_menu_music();
                }
            });
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let category = match event.key().as_str() {
                    "1" | "n" | "N" => Some(WordCategory::Noun),
                    "2" | "v" | "V" => Some(WordCategory::Verb),
                    "3" | "a" | "A" => Some(WordCategory::Adjective),
                    _ => None,
                };
                if let Some(category) = category {
                    game.borrow_mut().shoot(category);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
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

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grammar Defense (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning countdown check...");
    check_countdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn check_countdown() {
    use grammar_defense::consts::SIM_DT;
    use grammar_defense::sim::Countdown;

    let mut countdown = Countdown::start();
    let mut cues = 0;
    while countdown.is_active() {
        if countdown.tick(SIM_DT).is_some() {
            cues += 1;
        }
    }
    assert_eq!(cues, 4, "three beeps and a go tone");
    println!("✓ Countdown machine check passed!");
}
