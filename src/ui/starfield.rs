use crate::animation;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const DEFAULT_STAR_COUNT: usize = 100;

/// One background star. Position is in percent of the area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarDescriptor {
    pub top: f64,
    pub left: f64,
    pub size: f64,
    pub opacity: f64,
    /// Twinkle period in seconds.
    pub duration: f64,
}

impl StarDescriptor {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            top: rng.gen_range(0.0..100.0),
            left: rng.gen_range(0.0..100.0),
            size: rng.gen_range(1.0..3.0),
            opacity: rng.gen_range(0.5..1.0),
            duration: rng.gen_range(2.0..5.0),
        }
    }
}

/// A fixed set of stars, generated once and only borrowed when drawn.
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<StarDescriptor>,
}

impl StarField {
    pub fn new(count: usize) -> Self {
        Self::generate(count, &mut rand::thread_rng())
    }

    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::generate(count, &mut StdRng::seed_from_u64(seed))
    }

    fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let stars = (0..count).map(|_| StarDescriptor::random(rng)).collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[StarDescriptor] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn widget(&self, elapsed: Duration) -> StarfieldWidget<'_> {
        StarfieldWidget {
            field: self,
            elapsed,
        }
    }
}

pub struct StarfieldWidget<'a> {
    field: &'a StarField,
    elapsed: Duration,
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for star in self.field.stars() {
            let (col, row) = star_cell(star, area);
            let period = Duration::from_secs_f64(star.duration);
            let twinkle = animation::twinkle(animation::phase(self.elapsed, period));
            let brightness = star.opacity * twinkle / 0.8;

            let (ch, color) = star_appearance(star.size, brightness);
            let cell = &mut buf[(area.x + col, area.y + row)];
            cell.set_char(ch);
            cell.set_fg(color);
        }
    }
}

/// Cell a star lands on, always inside `area`.
fn star_cell(star: &StarDescriptor, area: Rect) -> (u16, u16) {
    let col = (star.left / 100.0 * area.width as f64) as u16;
    let row = (star.top / 100.0 * area.height as f64) as u16;
    (col.min(area.width - 1), row.min(area.height - 1))
}

fn star_appearance(size: f64, brightness: f64) -> (char, Color) {
    let b = (brightness * 255.0).clamp(0.0, 255.0) as u8;
    let ch = if size < 1.7 {
        '·'
    } else if size < 2.4 {
        if brightness > 0.6 { '•' } else { '∙' }
    } else if brightness > 0.7 {
        '✦'
    } else {
        '•'
    };
    (ch, Color::Rgb(b, b, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_exact_count_within_ranges() {
        for count in [0, 1, 100, 437] {
            let field = StarField::seeded(count, 99);
            assert_eq!(field.len(), count);
            for s in field.stars() {
                assert!((0.0..=100.0).contains(&s.top));
                assert!((0.0..=100.0).contains(&s.left));
                assert!((1.0..=3.0).contains(&s.size));
                assert!((0.5..=1.0).contains(&s.opacity));
                assert!((2.0..=5.0).contains(&s.duration));
            }
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        assert_eq!(
            StarField::seeded(50, 3).stars(),
            StarField::seeded(50, 3).stars()
        );
    }

    #[test]
    fn test_render_draws_every_star_in_bounds() {
        let field = StarField::seeded(40, 11);
        let area = Rect::new(0, 0, 300, 200);
        let mut buf = Buffer::empty(area);
        field.widget(Duration::ZERO).render(area, &mut buf);

        for star in field.stars() {
            let (col, row) = star_cell(star, area);
            assert_ne!(buf[(col, row)].symbol(), " ");
        }
        let drawn = buf
            .content()
            .iter()
            .filter(|c| c.symbol() != " ")
            .count();
        assert!(drawn <= 40);
    }

    #[test]
    fn test_render_is_stable_and_does_not_touch_descriptors() {
        let field = StarField::seeded(25, 5);
        let before = field.stars().to_vec();
        let area = Rect::new(0, 0, 40, 10);
        let mut a = Buffer::empty(area);
        let mut b = Buffer::empty(area);
        field.widget(Duration::from_millis(700)).render(area, &mut a);
        field.widget(Duration::from_millis(700)).render(area, &mut b);
        assert_eq!(a, b);
        assert_eq!(field.stars(), before.as_slice());
    }

    #[test]
    fn test_star_on_far_edge_is_clamped() {
        let star = StarDescriptor {
            top: 100.0,
            left: 100.0,
            size: 1.0,
            opacity: 1.0,
            duration: 2.0,
        };
        assert_eq!(star_cell(&star, Rect::new(0, 0, 10, 5)), (9, 4));
    }
}
