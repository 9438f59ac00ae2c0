//! Idle Shooter entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use idle_shooter::renderer::{FrameEffects, build_frame, canvas};
    use idle_shooter::sim::{FrameTicket, RestartMode, Session, SessionSummary, TickStatus};
    use idle_shooter::{Settings, Tuning};

    /// Game instance holding all host-side state
    struct Game {
        session: Session,
        settings: Settings,
        effects: FrameEffects,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Pending animation frame, cancelled on end/restart
        frame_id: Option<i32>,
        /// Summaries waiting to be re-emitted once `Game` is no longer borrowed
        game_overs: Rc<RefCell<Vec<SessionSummary>>>,
    }

    impl Game {
        /// Feed this tick's events to the host effects
        fn flush_events(&mut self) {
            for event in self.session.drain_events() {
                self.effects.on_event(&event, &self.settings);
            }
        }

        fn render(&mut self) {
            let cmds = build_frame(&self.session.snapshot(), &self.settings, &self.effects);
            canvas::execute(
                &self.ctx,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
                &cmds,
            );
            self.effects.advance();
        }

        fn cancel_frame(&mut self) {
            if let Some(id) = self.frame_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }

        /// Match the canvas backing store to its layout size
        fn sync_canvas_size(&mut self) {
            let w = self.canvas.client_width().max(0) as u32;
            let h = self.canvas.client_height().max(0) as u32;
            if w != self.canvas.width() || h != self.canvas.height() {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
            }
            self.session.resize(w as f32, h as f32);
        }
    }

    /// Re-emit the session summary as a `gameOver` DOM event
    fn dispatch_game_over(summary: &SessionSummary) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let detail = js_sys::Object::new();
        let _ = js_sys::Reflect::set(
            &detail,
            &"score".into(),
            &JsValue::from_f64(summary.final_score as f64),
        );
        let _ = js_sys::Reflect::set(
            &detail,
            &"survivedSeconds".into(),
            &JsValue::from_f64(summary.survived_seconds as f64),
        );
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        match web_sys::CustomEvent::new_with_event_init_dict("gameOver", &init) {
            Ok(event) => {
                let _ = document.dispatch_event(&event);
            }
            Err(err) => log::warn!("Could not create gameOver event: {:?}", err),
        }
    }

    /// Emit queued game-over notices. Page listeners may call straight back
    /// into the game, so this must run with no borrow of `Game` held.
    fn dispatch_game_overs(game: &Rc<RefCell<Game>>) {
        let pending = std::mem::take(&mut *game.borrow().game_overs.borrow_mut());
        for summary in &pending {
            dispatch_game_over(summary);
        }
    }

    /// Optional balance overrides embedded in the page
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("shooter-tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring tuning overrides: {err}");
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Idle Shooter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into().ok());
        let ctx: Option<CanvasRenderingContext2d> = canvas.as_ref().and_then(|c| {
            c.get_context("2d")
                .ok()
                .flatten()
                .and_then(|ctx| ctx.dyn_into().ok())
        });
        let (Some(canvas), Some(ctx)) = (canvas, ctx) else {
            log::error!("No 2D canvas available; game disabled");
            return;
        };

        let w = canvas.client_width().max(0) as u32;
        let h = canvas.client_height().max(0) as u32;
        canvas.set_width(w);
        canvas.set_height(h);

        let seed = js_sys::Date::now() as u64;
        let mut session = match Session::from_surface(Some((w as f32, h as f32)), load_tuning(&document), seed)
        {
            Ok(session) => session,
            Err(err) => {
                log::error!("Cannot start game: {err}");
                return;
            }
        };

        let game_overs = Rc::new(RefCell::new(Vec::new()));
        {
            let outbox = game_overs.clone();
            session.set_game_over_handler(move |summary| {
                log::info!("Game Over! Score: {}", summary.final_score);
                outbox.borrow_mut().push(*summary);
            });
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            settings: Settings::load(),
            effects: FrameEffects::default(),
            canvas: canvas.clone(),
            ctx,
            frame_id: None,
            game_overs,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());
        setup_keyboard_handler(game.clone());
        setup_lifecycle_buttons(game.clone());

        game.borrow_mut().render();
        log::info!("Idle Shooter ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .session
                    .set_pointer_x(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        for kind in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().session.set_pointer_x(x);
                }
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.sync_canvas_size();
            if g.frame_id.is_none() {
                // Not animating: redraw the static screen at the new size
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            if !g.settings.toggle_for_key(&event.key()) {
                return;
            }
            g.settings.save();
            log::info!("Settings changed: {:?}", g.settings);
            if g.frame_id.is_none() {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, action: fn(&Rc<RefCell<Game>>)) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("No #{id} button on the page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| action(&game));
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_lifecycle_buttons(game: Rc<RefCell<Game>>) {
        on_click("startGameBtn", game.clone(), |game| {
            if game.borrow_mut().session.start() {
                schedule_frame(game);
            }
        });
        on_click("endGameBtn", game.clone(), |game| {
            {
                let mut g = game.borrow_mut();
                if g.session.end().is_some() {
                    g.cancel_frame();
                    g.flush_events();
                    g.render();
                }
            }
            dispatch_game_overs(game);
        });
        on_click("restartBtn", game, |game| {
            let restarted = {
                let mut g = game.borrow_mut();
                g.cancel_frame();
                g.session.restart(RestartMode::Immediate)
            };
            if restarted {
                schedule_frame(game);
            }
        });
    }

    fn schedule_frame(game: &Rc<RefCell<Game>>) {
        let Some(ticket) = game.borrow().session.frame_ticket() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_clone = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_frame(game_clone, ticket);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(err) => log::error!("requestAnimationFrame failed: {:?}", err),
        }
        closure.forget();
    }

    fn game_frame(game: Rc<RefCell<Game>>, ticket: FrameTicket) {
        let status = {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            let status = g.session.tick(ticket);
            if status != TickStatus::Stale {
                g.flush_events();
                g.render();
            }
            status
        };
        dispatch_game_overs(&game);

        if status == TickStatus::Continue {
            schedule_frame(&game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use idle_shooter::sim::{PlayField, Session, SessionSummary, TickStatus};
    use idle_shooter::{GameError, Tuning};

    /// Three minutes of simulated play
    const MAX_TICKS: u32 = 60 * 180;

    /// Play one headless session with a pointer sweeping across the field
    pub fn run() -> Result<SessionSummary, GameError> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let field = PlayField::new(480.0, 720.0)?;
        let mut session = Session::new(field, Tuning::default(), seed)?;
        session.start();

        for i in 0..MAX_TICKS {
            let phase = i as f32 * 0.02;
            session.set_pointer_x(field.center_x() + phase.sin() * field.width() * 0.45);

            let Some(ticket) = session.frame_ticket() else {
                break;
            };
            if let TickStatus::Ended(summary) = session.tick(ticket) {
                return Ok(summary);
            }
        }

        Ok(session.end().unwrap_or_else(|| session.state().summary()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Idle Shooter (native) starting headless demo...");

    match demo::run() {
        Ok(summary) => match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Could not serialize summary: {err}"),
        },
        Err(err) => {
            log::error!("Demo failed: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
