// What you SEE:
// • "canvas": your drawing (white board, paint-by-number board, or the live
//   camera with your strokes on top when --use-camera-stream is given).
// • "tracking": the live camera with the marker blob highlighted and an X on its center
//   (yellow when a jump was rejected as shake).
// • "score" (paint-by-number only): how many regions have the right color.
//
// Keys (focus the canvas window):
//   R/G/B color · +/- thickness · L line · O circle · S square · E ellipse
//   C clear · W save · N new board · Q/ESC quit · any other key (not Shift/Ctrl/Alt)
//   releases a shape.

mod camera;
mod cli;
mod command;
mod compose;
mod config;
mod cursor;
mod draw;
mod error;
mod jitter;
mod save;
mod score;
mod segment;
mod session;
mod shapes;
mod types;
mod vision;

use camera::{FrameSource, Webcam};
use clap::Parser;
use cli::Cli;
use command::Command;
use compose::{highlight, overlay};
use config::ColorRange;
use draw::{Drawer, draw_cross, draw_hud};
use error::Error;
use jitter::Verdict;
use score::{SCOREBOARD_SIZE, render_scoreboard};
use session::{Flow, Session};
use shapes::fill_disc;
use types::{FrameBuffer, Point, Rgb};

/// ~50 ms between key polls.
const TICK_FPS: usize = 20;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.paint_by_number && cli.use_camera_stream {
        tracing::warn!("--use-camera-stream overrides --paint-by-number");
    }

    /* --- Config first: a bad limits file stops us before any camera/window opens --- */
    let range = ColorRange::load(&cli.json)?;
    tracing::info!(path = %cli.json.display(), ?range, "color limits loaded");

    /* --- Camera + windows --- */
    let mut cam = Webcam::open(cli.camera, cli.width, cli.height)?;
    let (w, h) = cam.resolution();
    tracing::info!("camera streaming at {}x{}", w, h);

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut session = Session::new(cli.session_options(seed), range, w, h);

    let mut canvas_win = Drawer::new("canvas", w, h)?;
    canvas_win.limit_fps(TICK_FPS);
    let mut tracking_win = Drawer::new("tracking", w, h)?;
    let mut score_win = if session.is_paint_by_number() {
        let (sw, sh) = SCOREBOARD_SIZE;
        Some(Drawer::new("score", sw, sh)?)
    } else {
        None
    };

    /* --- Reusable screen buffers --- */
    let mut screen = FrameBuffer::filled(w, h, Rgb::BLACK);
    let mut tracking_view = FrameBuffer::filled(w, h, Rgb::BLACK);
    let overlay_mode = cli.use_camera_stream;

    /* ------------------------------ Main loop ------------------------------ */
    while canvas_win.is_open() {
        /* 1) Grab a frame; losing the camera ends the session. */
        let frame = cam.next_frame()?;

        /* 2) Track the marker and move the pencil. */
        let tracking = session.track(&frame);
        match tracking.blob {
            Some(blob) => {
                highlight(&frame, &tracking.components, blob.label, &mut tracking_view)?;
                // Yellow X: the jitter filter held the pencil back this tick.
                let cross = match tracking.verdict {
                    Some(Verdict::Rejected) => Rgb::new(255, 255, 0),
                    _ => Rgb::RED,
                };
                draw_cross(&mut tracking_view, blob.pixel(), 5, cross);
            }
            None => tracking_view.pixels.copy_from_slice(&frame.pixels),
        }

        /* 3) Canvas view: preview while shaping, committed otherwise. */
        let shown = session.cursor().display();
        if overlay_mode {
            overlay(&frame, shown, &mut screen)?;
        } else {
            screen.pixels.copy_from_slice(&shown.pixels);
        }
        draw_hud(&mut screen, 8, 8, &session.hud_text(), Rgb::WHITE);
        fill_disc(&mut screen, Point::new(w as i32 - 16, 12), 6, session.cursor().color);

        /* 4) Present (this is also when key state is refreshed). */
        canvas_win.present(&screen)?;
        tracking_win.present(&tracking_view)?;
        if let Some(win) = score_win.as_mut() {
            if let Some(score) = session.rescore() {
                win.present(&render_scoreboard(score))?;
            }
        }

        /* 5) Keys: each press is one command; unknown keys release a shape. */
        let mut flow = Flow::Continue;
        for cmd in canvas_win.keys_pressed().into_iter().filter_map(Command::from_key_or_finalize) {
            flow = session.apply(cmd);
            if flow == Flow::Quit {
                break;
            }
        }
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
