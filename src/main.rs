//! Press Runner entry point
//!
//! Web: wires DOM pointer events to the run loop and redraws the track every
//! animation frame. Native: plays a headless autopilot run and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, PointerEvent};

    use press_runner::platform::{
        FpsMeter, FrameOutcome, FrameToken, RunLoop, RunObserver, client_to_track_y,
    };
    use press_runner::renderer::{terminal_banner, track_markup};
    use press_runner::sim::{RankInfo, RunSnapshot, TerminalReason};
    use press_runner::{HighScores, RunnerTuning, Settings};

    /// DOM view of the run; only ever reads snapshots
    struct Hud {
        document: Document,
        tuning: RunnerTuning,
        settings: Settings,
        best: HighScores,
        last_distance: f32,
        rank_name: String,
    }

    impl Hud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    impl RunObserver for Hud {
        fn on_tick(&mut self, snapshot: &RunSnapshot) {
            if let Some(track) = self.document.get_element_by_id("obstacles") {
                track.set_inner_html(&track_markup(
                    snapshot,
                    &self.tuning,
                    self.settings.show_hitboxes,
                ));
            }
            if let Some(player) = self
                .document
                .get_element_by_id("player")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = player
                    .style()
                    .set_property("top", &format!("{:.2}%", snapshot.player_y));
            }
            // Slow-changing fields only when they change
            if snapshot.distance.floor() != self.last_distance.floor() {
                self.set_text("hud-distance", &format!("{:.0}", snapshot.distance));
                if let Some(bar) = self
                    .document
                    .get_element_by_id("progress-bar")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = bar
                        .style()
                        .set_property("width", &format!("{:.0}%", snapshot.distance));
                }
            }
            self.last_distance = snapshot.distance;
        }

        fn on_rank_change(&mut self, rank: &RankInfo) {
            self.rank_name = rank.name.clone();
            self.set_text("hud-rank", &rank.name);
            if let Some(el) = self
                .document
                .get_element_by_id("hud-rank")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el.style().set_property("color", &rank.accent);
                let class = if self.settings.effective_rank_flash() {
                    "hud-value pop"
                } else {
                    "hud-value"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        fn on_terminal(&mut self, reason: TerminalReason) {
            let (title, icon) = terminal_banner(reason);
            self.set_text("over-title", title);
            self.set_text("over-icon", icon);
            self.set_text("over-distance", &format!("{:.1}", self.last_distance));
            self.set_hidden("run-over", false);

            let place = self.best.add_run(
                self.last_distance,
                reason,
                &self.rank_name,
                js_sys::Date::now(),
            );
            if let Some(place) = place {
                self.best.save();
                self.set_text("over-place", &format!("#{}", place));
            }
            log::info!("Run over: {:?} at {:.1}", reason, self.last_distance);
        }
    }

    struct Game {
        run: RunLoop,
        hud: Hud,
        fps: FpsMeter,
    }

    impl Game {
        fn frame(&mut self, token: FrameToken, time: f64) -> FrameOutcome {
            let outcome = self.run.frame(token, time, &mut self.hud);
            let fps = self.fps.record(time);
            if self.hud.settings.show_fps {
                self.hud.set_text("hud-fps", &fps.to_string());
            }
            outcome
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.run.set_locale(self.hud.settings.locale);
            self.run.restart(seed);
            self.hud.last_distance = 0.0;
            let snapshot = self.run.snapshot();
            self.hud.on_tick(&snapshot);
            if let Some(rank) = self.run.state().ranks.get(snapshot.rank_index) {
                self.hud.on_rank_change(rank);
            }
            self.hud.set_hidden("run-over", true);
            self.hud.set_hidden("start-prompt", false);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: FrameToken, time: f64) {
        let outcome = game.borrow_mut().frame(token, time);
        if let FrameOutcome::Reschedule(next) = outcome {
            request_animation_frame(game, next);
        }
    }

    fn track_y(track: &Element, client_y: i32) -> f32 {
        let rect = track.get_bounding_client_rect();
        client_to_track_y(client_y as f32, rect.top() as f32, rect.height() as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Press Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let track = document.get_element_by_id("track").expect("no track");

        let settings = Settings::load();
        let tuning = RunnerTuning::load();
        let seed = js_sys::Date::now() as u64;

        let hud = Hud {
            document: document.clone(),
            tuning: tuning.clone(),
            settings: settings.clone(),
            best: HighScores::load(),
            last_distance: 0.0,
            rank_name: String::new(),
        };
        let game = Rc::new(RefCell::new(Game {
            run: RunLoop::new(seed, tuning, settings.locale),
            hud,
            fps: FpsMeter::new(),
        }));
        {
            let mut g = game.borrow_mut();
            g.hud.set_hidden("hud-fps", !settings.show_fps);
            let snapshot = g.run.snapshot();
            g.hud.on_tick(&snapshot);
            if let Some(rank) = g.run.state().ranks.get(snapshot.rank_index).cloned() {
                g.hud.on_rank_change(&rank);
            }
        }

        setup_pointer_handlers(&track, game.clone());
        setup_keyboard(game.clone());
        setup_restart_button(game.clone());
        if settings.pause_on_blur {
            setup_auto_pause(game);
        }

        log::info!("Press Runner ready (seed {})", seed);
    }

    fn setup_pointer_handlers(track: &Element, game: Rc<RefCell<Game>>) {
        // Press: start/resume and aim
        {
            let game = game.clone();
            let track_el = track.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let y = track_y(&track_el, event.client_y());
                let token = {
                    let mut g = game.borrow_mut();
                    g.hud.set_hidden("start-prompt", true);
                    g.run.pointer_down(y)
                };
                if let Some(token) = token {
                    request_animation_frame(game.clone(), token);
                }
            });
            let _ = track
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag
        {
            let game = game.clone();
            let track_el = track.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let y = track_y(&track_el, event.client_y());
                game.borrow_mut().run.pointer_move(y);
            });
            let _ = track
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release/leave: target freezes
        for name in ["pointerup", "pointerleave", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().run.pointer_up();
            });
            let _ = track.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            match event.key().as_str() {
                "Escape" | "p" | "P" => {
                    let token = {
                        let mut g = game.borrow_mut();
                        if g.run.state().phase == press_runner::sim::RunPhase::Paused {
                            g.run.resume()
                        } else {
                            g.run.pause();
                            None
                        }
                    };
                    if let Some(token) = token {
                        request_animation_frame(game.clone(), token);
                    }
                }
                "r" | "R" => game.borrow_mut().restart(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
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
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().run.pause();
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
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().run.pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
    use press_runner::platform::{FrameOutcome, RunLoop, RunObserver};
    use press_runner::sim::{RankInfo, RunSnapshot, TerminalReason, autopilot_target};
    use press_runner::{HighScores, Locale, RunnerTuning};

    /// Logs engine output; used for the headless demo
    #[derive(Default)]
    struct LogObserver {
        distance: f32,
        rank: String,
        outcome: Option<TerminalReason>,
    }

    impl RunObserver for LogObserver {
        fn on_tick(&mut self, snapshot: &RunSnapshot) {
            self.distance = snapshot.distance;
            log::trace!(
                "d={:.2} y={:.1} obstacles={}",
                snapshot.distance,
                snapshot.player_y,
                snapshot.obstacles.len()
            );
        }

        fn on_rank_change(&mut self, rank: &RankInfo) {
            log::info!("Rank up at {:.0}: {}", self.distance, rank.name);
            self.rank = rank.name.clone();
        }

        fn on_terminal(&mut self, reason: TerminalReason) {
            self.outcome = Some(reason);
        }
    }

    env_logger::init();

    // press-runner [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = match args.next() {
        Some(path) => RunnerTuning::load_file(std::path::Path::new(&path)),
        None => RunnerTuning::default(),
    };

    log::info!("Press Runner (native) autopilot run, seed {}", seed);

    let mut run = RunLoop::new(seed, tuning, Locale::En);
    let mut observer = LogObserver::default();
    if let Some(rank) = run.state().ranks.get(run.state().rank_index()) {
        observer.rank = rank.name.clone();
    }
    let mut token = run.pointer_down(50.0);
    let mut now = 0.0;
    let mut frames = 0u64;
    while let Some(t) = token {
        let target = autopilot_target(run.state(), run.tuning());
        run.steer(target);
        token = match run.frame(t, now, &mut observer) {
            FrameOutcome::Reschedule(next) => Some(next),
            FrameOutcome::Stop => None,
        };
        now += 1000.0 / 60.0;
        frames += 1;
    }

    let mut best = HighScores::load();
    let outcome = observer.outcome.unwrap_or(TerminalReason::Collision);
    let place = best.add_run(observer.distance, outcome, &observer.rank, now);
    best.save();

    println!(
        "{:?} after {} frames: distance {:.1}, rank {}, board place {:?}",
        outcome, frames, observer.distance, observer.rank, place
    );
}
