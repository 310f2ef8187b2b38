//! Canvas2D frame drawing.
//!
//! Everything renders onto a fixed 480x640 logical surface; CSS scales the
//! canvas up with image smoothing off for the pixel look. The renderer reads
//! simulation state and never mutates it.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{Countdown, GameState, MatchPhase, ParticleColor};
use crate::vocab::GameMode;

const BACKGROUND: &str = "#000000";
const TEXT_MAIN: &str = "#FFFFFF";
const TEXT_GLOSS: &str = "#AAAAAA";
const ACCENT_GREEN: &str = "#39FF14";
const ACCENT_CYAN: &str = "#00FFFF";
const ACCENT_RED: &str = "#FF3333";
const ACCENT_YELLOW: &str = "#FFD700";

const WORD_FONT: &str = "24px \"DotGothic16\"";
const GLOSS_FONT: &str = "16px \"DotGothic16\"";
const COUNTDOWN_FONT: &str = "80px \"DotGothic16\"";

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    /// Frame counter driving the background wave animation
    frame: u64,
}

impl Renderer {
    /// Attach to a canvas, pinning it to the logical resolution
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_image_smoothing_enabled(false);
        Some(Self { ctx, frame: 0 })
    }

    /// Draw one frame
    pub fn render(&mut self, state: &GameState, english_only: bool) {
        self.frame = self.frame.wrapping_add(1);

        match state.mode {
            GameMode::Imabari => {
                self.draw_imabari_background();
                // Darken slightly so the word boxes stay readable
                self.ctx.set_fill_style_str("rgba(0,0,0,0.3)");
                self.ctx
                    .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            }
            GameMode::Normal => {
                self.ctx.set_fill_style_str(BACKGROUND);
                self.ctx
                    .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            }
        }

        if state.phase != MatchPhase::Playing {
            return;
        }

        self.draw_enemies(state, english_only);
        self.draw_particles(state);

        if state.countdown.is_active() {
            self.draw_countdown(&state.countdown);
        }
    }

    fn draw_enemies(&self, state: &GameState, english_only: bool) {
        let ctx = &self.ctx;
        for enemy in &state.enemies {
            let x = enemy.pos.x as f64;
            let y = enemy.pos.y as f64;

            // Box sized from the measured text, floor 160 px
            ctx.set_font(WORD_FONT);
            let text_width = ctx
                .measure_text(enemy.word.text)
                .map(|m| m.width())
                .unwrap_or(0.0);
            let box_w = (text_width + 40.0).max(160.0);
            let box_h = if english_only { 40.0 } else { 60.0 };

            ctx.set_stroke_style_str(ACCENT_YELLOW);
            ctx.set_line_width(2.0);
            ctx.set_fill_style_str(BACKGROUND);
            ctx.begin_path();
            ctx.rect(x - box_w / 2.0, y - box_h / 2.0, box_w, box_h);
            ctx.fill();
            ctx.stroke();

            ctx.set_fill_style_str(TEXT_MAIN);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let text_y = if english_only { y } else { y - 10.0 };
            ctx.fill_text(enemy.word.text, x, text_y).ok();

            if !english_only {
                ctx.set_fill_style_str(TEXT_GLOSS);
                ctx.set_font(GLOSS_FONT);
                ctx.fill_text(enemy.word.gloss, x, y + 15.0).ok();
            }
        }
    }

    fn draw_particles(&self, state: &GameState) {
        let ctx = &self.ctx;
        for p in &state.particles {
            let color = match p.color {
                ParticleColor::Green => ACCENT_GREEN,
                ParticleColor::Red => ACCENT_RED,
            };
            ctx.set_fill_style_str(color);
            ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_countdown(&self, countdown: &Countdown) {
        let ctx = &self.ctx;
        let cx = FIELD_WIDTH as f64 / 2.0;
        let cy = FIELD_HEIGHT as f64 / 2.0;

        ctx.set_fill_style_str("rgba(0,0,0,0.5)");
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        ctx.set_font(COUNTDOWN_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        match countdown {
            Countdown::Armed { .. } => {
                ctx.set_fill_style_str(ACCENT_CYAN);
                ctx.fill_text("READY?", cx, cy).ok();
            }
            Countdown::Counting { n, .. } => {
                let digit = n.to_string();
                ctx.set_fill_style_str(ACCENT_YELLOW);
                ctx.fill_text(&digit, cx, cy).ok();
                // Drop shadow
                ctx.set_fill_style_str("rgba(255,255,255,0.3)");
                ctx.fill_text(&digit, cx + 4.0, cy + 4.0).ok();
            }
            Countdown::Go { .. } => {
                ctx.set_fill_style_str(ACCENT_GREEN);
                ctx.fill_text("START!", cx, cy).ok();
            }
            Countdown::Inactive => {}
        }
    }

    /// Twilight seascape: sky, stars, islands, animated waves and the
    /// suspension bridge
    fn draw_imabari_background(&self) {
        let ctx = &self.ctx;
        let w = FIELD_WIDTH as f64;
        let h = FIELD_HEIGHT as f64;

        // Sky
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h * 0.6);
        sky.add_color_stop(0.0, "#000033").ok();
        sky.add_color_stop(1.0, "#1A1A5E").ok();
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Stars
        ctx.set_fill_style_str(TEXT_MAIN);
        for (x, y) in [
            (50.0, 50.0),
            (120.0, 80.0),
            (300.0, 40.0),
            (400.0, 100.0),
            (200.0, 20.0),
            (80.0, 200.0),
        ] {
            ctx.fill_rect(x, y, 2.0, 2.0);
        }

        // Island silhouettes on the horizon
        ctx.set_fill_style_str("#004d00");
        ctx.begin_path();
        ctx.move_to(0.0, 450.0);
        ctx.line_to(80.0, 380.0);
        ctx.line_to(160.0, 450.0);
        ctx.line_to(240.0, 400.0);
        ctx.line_to(320.0, 450.0);
        ctx.line_to(400.0, 350.0);
        ctx.line_to(480.0, 450.0);
        ctx.line_to(480.0, 640.0);
        ctx.line_to(0.0, 640.0);
        ctx.fill();

        // Sea
        ctx.set_fill_style_str("#000066");
        ctx.fill_rect(0.0, 450.0, w, h - 450.0);
        ctx.set_fill_style_str("#000099");
        let drift = (self.frame % 60) as f64;
        for i in 0..10 {
            ctx.fill_rect(i as f64 * 60.0 + drift, 500.0, 40.0, 2.0);
            ctx.fill_rect(i as f64 * 60.0 - drift + 30.0, 550.0, 40.0, 2.0);
        }

        // Bridge towers
        ctx.set_stroke_style_str("#CCCCCC");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(140.0, 450.0);
        ctx.line_to(140.0, 250.0);
        ctx.move_to(160.0, 450.0);
        ctx.line_to(160.0, 250.0);
        ctx.move_to(130.0, 280.0);
        ctx.line_to(170.0, 280.0);
        ctx.move_to(320.0, 450.0);
        ctx.line_to(320.0, 250.0);
        ctx.move_to(340.0, 450.0);
        ctx.line_to(340.0, 250.0);
        ctx.move_to(310.0, 280.0);
        ctx.line_to(350.0, 280.0);
        ctx.stroke();

        // Cables
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(160.0, 250.0);
        ctx.quadratic_curve_to(240.0, 400.0, 320.0, 250.0);
        ctx.move_to(140.0, 250.0);
        ctx.line_to(0.0, 350.0);
        ctx.move_to(340.0, 250.0);
        ctx.line_to(480.0, 350.0);
        ctx.stroke();

        // Road deck
        ctx.set_line_width(6.0);
        ctx.set_stroke_style_str("#444444");
        ctx.begin_path();
        ctx.move_to(0.0, 380.0);
        ctx.line_to(480.0, 380.0);
        ctx.stroke();
    }
}
