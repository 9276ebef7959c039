//! Procedural level layout and entity recycling
//!
//! All randomness comes from the world's seeded `Pcg32`, so a seed always
//! produces the same level and the same sequence of recycled entities.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Floor, Pickup, PickupKind, ThemeId};
use crate::consts::*;
use crate::tuning::Tuning;

/// Floor placement ranges, in blocks
const FLOOR_X_BLOCKS: std::ops::RangeInclusive<i32> = 0..=12;
const FLOOR_Y_BLOCKS: std::ops::RangeInclusive<i32> = 8..=16;
const FLOOR_WIDTH_BLOCKS: std::ops::RangeInclusive<i32> = 1..=10;
const FLOOR_HEIGHT_BLOCKS: i32 = 1;

/// Pickup placement
const PICKUP_SPACING: f32 = 60.0;
const PICKUP_START_Y: std::ops::RangeInclusive<i32> = 40..=104;
const PICKUP_RECYCLE_Y: std::ops::RangeInclusive<i32> = 32..=104;

fn random_kind(rng: &mut Pcg32) -> PickupKind {
    PickupKind::from_index(rng.random_range(0..PickupKind::ALL.len()))
}

/// Lay out the floors for a fresh level
pub fn generate_floors(rng: &mut Pcg32) -> Vec<Floor> {
    (0..FLOOR_COUNT)
        .map(|i| {
            let x = rng.random_range(FLOOR_X_BLOCKS);
            let y = rng.random_range(FLOOR_Y_BLOCKS);
            let width = rng.random_range(FLOOR_WIDTH_BLOCKS);
            Floor::from_blocks(x, y, width, FLOOR_HEIGHT_BLOCKS, ThemeId::for_index(i))
        })
        .collect()
}

/// Lay out the pickups for a fresh level, evenly spaced left to right
pub fn generate_pickups(rng: &mut Pcg32) -> Vec<Pickup> {
    (0..PICKUP_COUNT)
        .map(|i| {
            let y = rng.random_range(PICKUP_START_Y) as f32;
            let kind = random_kind(rng);
            Pickup::new(Vec2::new(i as f32 * PICKUP_SPACING, y), kind)
        })
        .collect()
}

/// Move floors and pickups left (endless mode)
pub fn scroll(floors: &mut [Floor], pickups: &mut [Pickup], dx: f32) {
    for floor in floors.iter_mut() {
        floor.rect.left -= dx;
    }
    for pickup in pickups.iter_mut() {
        pickup.pos.x -= dx;
    }
}

/// Relocate anything that has left the screen on the left.
///
/// Floors reappear at the right screen edge at a new random height, pickups
/// jump ahead by the wrap distance with a new height and kind. Both come
/// back active. Returns the number of entities recycled.
pub fn recycle(
    floors: &mut [Floor],
    pickups: &mut [Pickup],
    rng: &mut Pcg32,
    tuning: &Tuning,
    screen_width: f32,
) -> usize {
    let mut recycled = 0;

    for floor in floors.iter_mut() {
        if floor.right() < tuning.recycle_boundary {
            floor.rect.left = screen_width;
            floor.rect.top = rng.random_range(FLOOR_Y_BLOCKS) as f32 * BLOCK_SIZE;
            floor.active = true;
            recycled += 1;
        }
    }

    for pickup in pickups.iter_mut() {
        if pickup.pos.x < tuning.recycle_boundary {
            pickup.pos.x += tuning.pickup_wrap_distance;
            pickup.pos.y = rng.random_range(PICKUP_RECYCLE_Y) as f32;
            pickup.kind = random_kind(rng);
            pickup.active = true;
            recycled += 1;
        }
    }

    recycled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generated_floors_stay_in_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let floors = generate_floors(&mut rng);
        assert_eq!(floors.len(), FLOOR_COUNT);
        for (i, floor) in floors.iter().enumerate() {
            assert!(floor.active);
            assert_eq!(floor.theme, ThemeId::for_index(i));
            assert!((0.0..=192.0).contains(&floor.left()));
            assert!((128.0..=256.0).contains(&floor.top()));
            assert!((16.0..=160.0).contains(&floor.rect.width));
            assert_eq!(floor.rect.height, BLOCK_SIZE);
        }
    }

    #[test]
    fn test_generated_pickups_spaced() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pickups = generate_pickups(&mut rng);
        for (i, pickup) in pickups.iter().enumerate() {
            assert_eq!(pickup.pos.x, i as f32 * PICKUP_SPACING);
            assert!((40.0..=104.0).contains(&pickup.pos.y));
            assert!(pickup.active);
        }
    }

    #[test]
    fn test_recycle_relocates_offscreen_entities() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        let mut floors = vec![
            Floor::from_blocks(0, 8, 2, 1, ThemeId(0)),
            Floor::from_blocks(4, 8, 2, 1, ThemeId(1)),
        ];
        floors[0].rect.left = -80.0;
        floors[0].active = false;

        let mut pickups = vec![
            Pickup::new(Vec2::new(-41.0, 50.0), PickupKind::Cherry),
            Pickup::new(Vec2::new(-39.0, 50.0), PickupKind::Cherry),
        ];
        pickups[0].active = false;
        pickups[1].active = false;

        let recycled = recycle(&mut floors, &mut pickups, &mut rng, &tuning, SCREEN_WIDTH);
        assert_eq!(recycled, 2);

        assert_eq!(floors[0].left(), SCREEN_WIDTH);
        assert!(floors[0].active);
        assert_eq!(floors[1].left(), 64.0);

        assert_eq!(pickups[0].pos.x, -41.0 + 240.0);
        assert!((32.0..=104.0).contains(&pickups[0].pos.y));
        assert!(pickups[0].active);
        // Not yet past the boundary
        assert_eq!(pickups[1].pos.x, -39.0);
        assert!(!pickups[1].active);
    }

    #[test]
    fn test_scroll_moves_everything_left() {
        let mut floors = vec![Floor::from_blocks(4, 8, 2, 1, ThemeId(0))];
        let mut pickups = vec![Pickup::new(Vec2::new(100.0, 50.0), PickupKind::Lemon)];
        scroll(&mut floors, &mut pickups, 2.5);
        assert_eq!(floors[0].left(), 61.5);
        assert_eq!(pickups[0].pos.x, 97.5);
    }
}
