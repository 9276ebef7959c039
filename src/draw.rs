//! Frame drawing
//!
//! Issues blit and text calls for the current world against the engine's
//! [`Canvas`]. Reads the world only; nothing here affects the simulation.

use glam::Vec2;

use crate::consts::BLOCK_SIZE;
use crate::platform::{Canvas, Sprite};
use crate::sim::{Floor, ThemeId, World};

/// Sky colour
const BACKGROUND_COLOR: u8 = 12;
const TEXT_COLOR: u8 = 7;
const SHADOW_COLOR: u8 = 1;
/// Width of one glyph in the built-in font
const GLYPH_WIDTH: f32 = 4.0;
/// Widest run of blocks drawn with a single blit
const BLOCK_RUN: f32 = 48.0;

/// Shown while standing or moving up
pub const PLAYER_UP: Sprite = Sprite::new(0, 0, 0, 16, 16, Some(12));
pub const PLAYER_FALLING: Sprite = Sprite::new(0, 16, 0, 16, 16, Some(12));

pub const FRUIT: [Sprite; 4] = [
    Sprite::new(0, 32, 0, 16, 16, Some(12)),
    Sprite::new(0, 48, 0, 16, 16, Some(12)),
    Sprite::new(0, 64, 0, 16, 16, Some(12)),
    Sprite::new(0, 80, 0, 16, 16, Some(12)),
];

pub const CLOUD_FAR: Sprite = Sprite::new(0, 0, 32, 56, 8, Some(12));
pub const CLOUD_NEAR: Sprite = Sprite::new(0, 0, 40, 56, 8, Some(12));

const FAR_CLOUDS: [(f32, f32); 3] = [(-10.0, 75.0), (40.0, 65.0), (90.0, 60.0)];
const NEAR_CLOUDS: [(f32, f32); 3] = [(10.0, 25.0), (70.0, 35.0), (120.0, 15.0)];

/// A row of the block sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTheme {
    /// Four blocks wide, cropped for shorter runs
    pub blocks: Sprite,
}

impl LevelTheme {
    pub fn new(theme: ThemeId) -> Self {
        let v = u16::from(theme.0) * BLOCK_SIZE as u16;
        Self {
            blocks: Sprite::new(1, 0, v, 64, 16, None),
        }
    }

    /// Tile a rectangle with runs of blocks
    pub fn draw_blocks(&self, canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32) {
        let mut x_offset = 0.0;
        while x_offset < w {
            let mut y_offset = 0.0;
            while y_offset < h {
                let run_w = (w - x_offset).min(BLOCK_RUN);
                let run_h = (h - y_offset).min(BLOCK_SIZE);
                let sprite = self.blocks.cropped(run_w as u16, run_h as u16);
                canvas.blit(x + x_offset, y + y_offset, &sprite);
                y_offset += BLOCK_SIZE;
            }
            x_offset += BLOCK_RUN;
        }
    }
}

/// Format seconds as `m:ss.s`
pub fn format_game_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    format!("{}:{:04.1}", minutes, seconds % 60.0)
}

/// Text with a one-pixel drop shadow
fn shadowed_text(canvas: &mut dyn Canvas, x: f32, y: f32, text: &str) {
    canvas.text(x + 1.0, y, text, SHADOW_COLOR);
    canvas.text(x, y, text, TEXT_COLOR);
}

/// Shadowed text right-aligned against the screen edge
fn right_aligned_text(canvas: &mut dyn Canvas, y: f32, text: &str) {
    let x = canvas.width() - 5.0 - GLYPH_WIDTH * text.chars().count() as f32;
    shadowed_text(canvas, x, y, text);
}

fn draw_clouds(canvas: &mut dyn Canvas, clouds: &[(f32, f32)], sprite: &Sprite, offset: f32) {
    let span = canvas.width() + f32::from(sprite.w);
    for &(x, y) in clouds {
        let x = (x - offset).rem_euclid(span) - f32::from(sprite.w);
        canvas.blit(x, y, sprite);
    }
}

fn draw_floor(canvas: &mut dyn Canvas, floor: &Floor) {
    let theme = LevelTheme::new(floor.theme);
    theme.draw_blocks(
        canvas,
        floor.left(),
        floor.top(),
        floor.rect.width,
        floor.rect.height,
    );
}

/// Draw one frame of the world
pub fn draw_frame(world: &World, canvas: &mut dyn Canvas) {
    canvas.clear(BACKGROUND_COLOR);

    let phase = world.clock.scroll_phase();
    draw_clouds(canvas, &FAR_CLOUDS, &CLOUD_FAR, phase * 0.25);
    draw_clouds(canvas, &NEAR_CLOUDS, &CLOUD_NEAR, phase * 0.5);

    for floor in world.floors.iter().filter(|f| f.active) {
        draw_floor(canvas, floor);
    }

    for pickup in world.active_pickups() {
        canvas.blit(pickup.pos.x, pickup.pos.y, &FRUIT[pickup.kind.index()]);
    }

    let player_sprite = if world.player.is_falling() {
        PLAYER_FALLING
    } else {
        PLAYER_UP
    };
    let Vec2 { x, y } = world.player.pos;
    canvas.blit(x, y, &player_sprite);

    shadowed_text(canvas, 4.0, 4.0, &format!("SCORE {:>4}", world.score));
    right_aligned_text(canvas, 4.0, &format_game_time(world.clock.game_time()));
    right_aligned_text(canvas, 11.0, &format!("SPEED {:.2}x", world.clock.speed()));
}

/// Overlay shown while the hot-reload harness is driving the game
pub fn draw_debug_banner(canvas: &mut dyn Canvas) {
    let y = canvas.height() - 8.0;
    canvas.text(5.0, y, "DEBUG MODE", TEXT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::collision::Rect;
    use crate::sim::{Pickup, PickupKind};

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear(u8),
        Blit(f32, f32, Sprite),
        Text(f32, f32, String, u8),
    }

    #[derive(Default)]
    struct Recording(Vec<Call>);

    impl Canvas for Recording {
        fn width(&self) -> f32 {
            256.0
        }

        fn height(&self) -> f32 {
            256.0
        }

        fn clear(&mut self, color: u8) {
            self.0.push(Call::Clear(color));
        }

        fn blit(&mut self, x: f32, y: f32, sprite: &Sprite) {
            self.0.push(Call::Blit(x, y, *sprite));
        }

        fn text(&mut self, x: f32, y: f32, text: &str, color: u8) {
            self.0.push(Call::Text(x, y, text.to_string(), color));
        }
    }

    impl Recording {
        fn texts(&self) -> Vec<&str> {
            self.0
                .iter()
                .filter_map(|c| match c {
                    Call::Text(_, _, s, TEXT_COLOR) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    #[test]
    fn test_format_game_time() {
        assert_eq!(format_game_time(0.0), "0:00.0");
        assert_eq!(format_game_time(65.34), "1:05.3");
        assert_eq!(format_game_time(600.0), "10:00.0");
    }

    #[test]
    fn test_block_tiling_splits_wide_floors() {
        let mut canvas = Recording::default();
        let theme = LevelTheme::new(ThemeId(2));
        theme.draw_blocks(&mut canvas, 0.0, 0.0, 112.0, 16.0);

        let widths: Vec<u16> = canvas
            .0
            .iter()
            .filter_map(|c| match c {
                Call::Blit(_, _, s) => Some(s.w),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![48, 48, 16]);
        assert!(matches!(&canvas.0[0], Call::Blit(x, y, s) if *x == 0.0 && *y == 0.0 && s.v == 32));
    }

    #[test]
    fn test_frame_draws_entities_and_hud() {
        let floors = vec![Floor {
            rect: Rect::new(64.0, 128.0, 32.0, 16.0),
            active: true,
            theme: ThemeId(0),
        }];
        let mut pickups = vec![
            Pickup::new(Vec2::new(10.0, 50.0), PickupKind::Grape),
            Pickup::new(Vec2::new(30.0, 50.0), PickupKind::Cherry),
        ];
        pickups[1].active = false;
        let mut world = World::with_layout(SimConfig::default(), floors, pickups);
        world.score = 300;

        let mut canvas = Recording::default();
        draw_frame(&world, &mut canvas);

        assert_eq!(canvas.0[0], Call::Clear(BACKGROUND_COLOR));
        assert!(canvas.0.contains(&Call::Blit(10.0, 50.0, FRUIT[3])));
        assert!(!canvas.0.contains(&Call::Blit(30.0, 50.0, FRUIT[0])));
        assert!(canvas.0.contains(&Call::Blit(72.0, 25.0, PLAYER_UP)));
        assert_eq!(canvas.texts(), vec!["SCORE  300", "0:00.0", "SPEED 1.00x"]);
    }

    #[test]
    fn test_player_sprite_follows_vertical_direction() {
        let mut world = World::with_layout(SimConfig::default(), Vec::new(), Vec::new());
        let sprite_for = |world: &World| {
            let mut canvas = Recording::default();
            draw_frame(world, &mut canvas);
            canvas
                .0
                .into_iter()
                .find_map(|c| match c {
                    Call::Blit(x, y, s) if x == 72.0 && y == 25.0 && s.v == 0 && s.u <= 16 => {
                        Some(s)
                    }
                    _ => None,
                })
                .unwrap()
        };

        world.player.vy = -3.0;
        assert_eq!(sprite_for(&world), PLAYER_UP);
        world.player.vy = 3.0;
        assert_eq!(sprite_for(&world), PLAYER_FALLING);
        assert_eq!(PLAYER_FALLING.u, 16);
    }
}
