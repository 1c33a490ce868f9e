//! Black circular holes for the swiss-cheese effect.
//!
//! With an average radius `r`, `r / 2` holes of radius `r`, `r / 4` holes of
//! radius `r / 2` and `r / 4` holes of radius `3r / 2` are punched at
//! uniformly random centers. A pixel at (row i, col j) is inside a hole
//! centered at (x, y) when (j - x)² + (i - y)² <= radius².

use alloc::vec::Vec;

use enough::Stop;
use rand::Rng;

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::BLACK;

/// One hole: center column `x`, center row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl Circle {
    /// Whether (row, col) lies inside or on the circle.
    #[inline]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        let dx = i64::from(col) - i64::from(self.x);
        let dy = i64::from(row) - i64::from(self.y);
        let r = i64::from(self.radius);
        dx * dx + dy * dy <= r * r
    }
}

/// 8% of the shorter side, truncated.
pub fn average_hole_radius(width: u32, height: u32) -> u32 {
    (u64::from(width.min(height)) * 8 / 100) as u32
}

/// Pick hole centers and radii. Each center draws x in `0..width`, then
/// y in `0..height`; average holes come first, then small, then large.
pub fn plan_holes<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    average_radius: u32,
    rng: &mut R,
) -> Vec<Circle> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let sizes = [
        (average_radius / 2, average_radius),
        (average_radius / 4, average_radius / 2),
        (average_radius / 4, average_radius * 3 / 2),
    ];
    let mut circles = Vec::new();
    for (count, radius) in sizes {
        for _ in 0..count {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            circles.push(Circle { x, y, radius });
        }
    }
    circles
}

/// Paint every pixel inside `circle` black.
pub fn punch_hole(image: &mut Image, circle: &Circle) {
    if image.is_empty() {
        return;
    }
    let r = circle.radius;
    let rows = circle.y.saturating_sub(r)..=circle.y.saturating_add(r).min(image.height() - 1);
    let first_col = circle.x.saturating_sub(r);
    let last_col = circle.x.saturating_add(r).min(image.width() - 1);
    for i in rows {
        let row = image.row_mut(i as usize);
        for j in first_col..=last_col {
            if circle.contains(i, j) {
                row[j as usize] = BLACK;
            }
        }
    }
}

/// Plan and punch the full set of holes for `average_radius`. Returns the
/// circles drawn.
pub fn swiss_cheese_holes<R: Rng + ?Sized>(
    image: &mut Image,
    average_radius: u32,
    rng: &mut R,
    stop: &dyn Stop,
) -> Result<Vec<Circle>, BitmapError> {
    let circles = plan_holes(image.width(), image.height(), average_radius, rng);
    for (n, circle) in circles.iter().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        punch_hole(image, circle);
    }
    Ok(circles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WHITE: Pixel = Pixel { r: 255, g: 255, b: 255 };

    #[test]
    fn radius_is_eight_percent_of_short_side() {
        assert_eq!(average_hole_radius(640, 480), 38);
        assert_eq!(average_hole_radius(100, 1000), 8);
        assert_eq!(average_hole_radius(12, 12), 0);
        assert_eq!(average_hole_radius(25, 50), 2);
    }

    #[test]
    fn plans_three_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let circles = plan_holes(200, 100, 8, &mut rng);
        let radii: Vec<u32> = circles.iter().map(|c| c.radius).collect();
        assert_eq!(radii, [8, 8, 8, 8, 4, 4, 12, 12]);
        assert!(circles.iter().all(|c| c.x < 200 && c.y < 100));
    }

    #[test]
    fn same_seed_same_holes() {
        let a = plan_holes(50, 50, 12, &mut StdRng::seed_from_u64(42));
        let b = plan_holes(50, 50, 12, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn punch_paints_exactly_the_disc() {
        let mut img = Image::filled(9, 7, WHITE).unwrap();
        let circle = Circle { x: 1, y: 5, radius: 2 };
        punch_hole(&mut img, &circle);
        for i in 0..7 {
            for j in 0..9 {
                let px = img.get(i as usize, j as usize).unwrap();
                if circle.contains(i, j) {
                    assert_eq!(px, BLACK, "({i}, {j}) should be black");
                } else {
                    assert_eq!(px, WHITE, "({i}, {j}) should be untouched");
                }
            }
        }
        // Boundary is inclusive: (row 5, col 3) is exactly radius 2 away.
        assert_eq!(img.get(5, 3).unwrap(), BLACK);
        assert_eq!(img.get(3, 3).unwrap(), WHITE);
    }

    #[test]
    fn holes_contain_only_black_and_original() {
        let mut img = Image::filled(100, 75, WHITE).unwrap();
        let radius = average_hole_radius(100, 75);
        let circles =
            swiss_cheese_holes(&mut img, radius, &mut StdRng::seed_from_u64(3), &Unstoppable)
                .unwrap();
        // radius 6: three average, one small, one large.
        assert_eq!(circles.len(), 5);
        for i in 0..75u32 {
            for j in 0..100u32 {
                let inside = circles.iter().any(|c| c.contains(i, j));
                let px = img.get(i as usize, j as usize).unwrap();
                assert_eq!(px, if inside { BLACK } else { WHITE });
            }
        }
    }

    #[test]
    fn empty_image_gets_no_holes() {
        let mut img = Image::filled(0, 10, WHITE).unwrap();
        let circles =
            swiss_cheese_holes(&mut img, 5, &mut StdRng::seed_from_u64(1), &Unstoppable).unwrap();
        assert!(circles.is_empty());
    }
}
