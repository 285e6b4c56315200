//! Interactive 3D cube using kiss3d.

use kiss3d::event::{Action, Key, WindowEvent};
use kiss3d::prelude::*;
use log::warn;
use rand::Rng;

use cubestate::geometry::{Axis, Direction};
use cubestate::notation::twist_for_key;
use cubestate::persistence;
use cubestate::pieces::{Color as StickerColor, Cube};
use cubestate::session::{Session, SessionConfig, TwistOutcome};
use cubestate::stats::{format_optional_time, format_time};

/// Size of each cubie body (slightly smaller than 1.0 for visible gaps).
const CUBIE_SIZE: f32 = 0.95;
/// Edge length of a sticker.
const STICKER_SIZE: f32 = 0.8;
/// How far a sticker sticks out of its cubie.
const STICKER_THICKNESS: f32 = 0.04;
/// Frames between scramble moves, so the scramble plays out visibly.
const SCRAMBLE_STEP_FRAMES: u32 = 6;

/// Returns the display color for a sticker.
fn sticker_color(color: StickerColor) -> Color {
    match color {
        StickerColor::White => Color::new(0.95, 0.95, 0.95, 1.0),
        StickerColor::Yellow => Color::new(1.0, 0.85, 0.1, 1.0),
        StickerColor::Red => Color::new(0.85, 0.1, 0.1, 1.0),
        StickerColor::Orange => Color::new(1.0, 0.5, 0.05, 1.0),
        StickerColor::Blue => Color::new(0.1, 0.3, 0.9, 1.0),
        StickerColor::Green => Color::new(0.1, 0.7, 0.2, 1.0),
    }
}

/// Builds scene nodes for every visible cubie and sticker.
///
/// Cube coordinates map directly to world units: x->X, y->Y, z->Z, with the
/// core at the origin.
fn build_scene(scene: &mut SceneNode3d, cube: &Cube) -> Vec<SceneNode3d> {
    let body_color = Color::new(0.08, 0.08, 0.08, 1.0);
    let mut nodes = Vec::new();

    for piece in cube.pieces() {
        // the core is never visible
        if piece.stickers.count() == 0 {
            continue;
        }

        let (x, y, z) = piece.position;
        let center = Vec3::new(x as f32, y as f32, z as f32);
        let body = scene
            .add_cube(CUBIE_SIZE, CUBIE_SIZE, CUBIE_SIZE)
            .set_color(body_color)
            .set_position(center);
        nodes.push(body);

        for (face, color) in piece.stickers.iter() {
            let (nx, ny, nz) = face.normal();
            let normal = Vec3::new(nx as f32, ny as f32, nz as f32);
            let extent = |along_normal: bool| {
                if along_normal {
                    STICKER_THICKNESS
                } else {
                    STICKER_SIZE
                }
            };
            let sticker = scene
                .add_cube(extent(nx != 0), extent(ny != 0), extent(nz != 0))
                .set_color(sticker_color(color))
                .set_position(center + normal * (CUBIE_SIZE / 2.0));
            nodes.push(sticker);
        }
    }

    nodes
}

/// Maps a letter key to its character.
fn key_letter(key: Key) -> Option<char> {
    Some(match key {
        Key::R => 'r',
        Key::L => 'l',
        Key::U => 'u',
        Key::D => 'd',
        Key::F => 'f',
        Key::B => 'b',
        Key::M => 'm',
        Key::E => 'e',
        Key::S => 's',
        _ => return None,
    })
}

/// Saves stats after a solve. Failure only costs the saved stats, so it is
/// logged and play continues.
fn save_stats(session: &Session) {
    let path = &session.config().stats_path;
    if let Err(e) = persistence::save(session.stats(), path) {
        warn!("failed to save stats to {}: {e}", path.display());
    }
}

/// Handles one key press. Returns whether the cube changed.
fn handle_key<R: Rng + ?Sized>(
    session: &mut Session,
    key: Key,
    shift_held: bool,
    rng: &mut R,
) -> bool {
    if let Some(twist) = key_letter(key).and_then(|letter| twist_for_key(letter, shift_held)) {
        return match session.twist(twist) {
            TwistOutcome::Ignored => false,
            TwistOutcome::Applied => true,
            TwistOutcome::Solved { time, moves } => {
                println!("Solved in {} with {moves} moves", format_time(time));
                save_stats(session);
                true
            }
        };
    }

    match key {
        Key::Left => session.rotate_whole_cube(Axis::Y, Direction::Cw),
        Key::Right => session.rotate_whole_cube(Axis::Y, Direction::Ccw),
        Key::Up => session.rotate_whole_cube(Axis::X, Direction::Cw),
        Key::Down => session.rotate_whole_cube(Axis::X, Direction::Ccw),
        Key::Space => return session.start_scramble(rng),
        Key::Back => session.reset(),
        Key::Z => return session.undo().is_some(),
        _ => return false,
    }
    true
}

/// Window title showing moves, timer, and status.
fn title(session: &Session) -> String {
    let status = if session.is_animating() {
        "Scrambling..."
    } else if session.is_scrambled() && !session.is_solved() {
        "Solving..."
    } else if session.is_solved() && !session.history().is_empty() {
        "Solved!"
    } else {
        ""
    };
    format!(
        "Moves {} - {} - Best {} - Solves {} {}",
        session.history().len(),
        format_time(session.elapsed()),
        format_optional_time(session.stats().best_time),
        session.stats().total_solves,
        status,
    )
}

/// Opens the interactive viewer.
pub fn display(config: SessionConfig) {
    pollster::block_on(display_async(config));
}

async fn display_async(config: SessionConfig) {
    let stats = persistence::load(&config.stats_path).unwrap_or_default();
    let mut session = Session::new(config).with_stats(stats);
    let mut rng = rand::rng();

    let mut window = Window::new(&title(&session)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(9.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut nodes = build_scene(&mut scene, session.cube());

    let mut shift_held = false;
    let mut frames_since_step = 0;

    loop {
        let mut needs_rebuild = false;

        for event in window.events().iter() {
            if let WindowEvent::Key(key, action, _) = event.value {
                match (key, action) {
                    (Key::LShift | Key::RShift, Action::Press) => shift_held = true,
                    (Key::LShift | Key::RShift, Action::Release) => shift_held = false,
                    (_, Action::Press) => {
                        needs_rebuild |= handle_key(&mut session, key, shift_held, &mut rng);
                    }
                    _ => {}
                }
            }
        }

        if session.is_animating() {
            frames_since_step += 1;
            if frames_since_step >= SCRAMBLE_STEP_FRAMES {
                frames_since_step = 0;
                needs_rebuild |= session.advance_scramble().is_some();
            }
        }

        if needs_rebuild {
            for mut node in nodes.drain(..) {
                node.remove();
            }
            nodes = build_scene(&mut scene, session.cube());
        }
        window.set_title(&title(&session));

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
