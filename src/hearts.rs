//! Floating hearts generated once at reveal time.

pub const HEART_COUNT: usize = 20;
/// Mostly hollow hearts, some filled.
pub const HEART_GLYPHS: [&str; 2] = ["\u{2661}", "\u{2764}\u{FE0F}"];

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Small linear congruential generator (Numerical Recipes constants). Not
/// cryptographic; only used to scatter decorations.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from browser entropy when the `rng` feature is on, otherwise from
    /// the page clock.
    pub fn from_entropy() -> Self {
        #[cfg(feature = "rng")]
        {
            let mut buf = [0u8; 4];
            if getrandom::getrandom(&mut buf).is_ok() {
                return Self::new(u32::from_le_bytes(buf));
            }
            log::warn!("getrandom unavailable, seeding hearts from the clock");
        }
        let now = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        Self::new(now as u64 as u32)
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state as f64 / (u32::MAX as f64 + 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeartSpec {
    pub glyph: &'static str,
    pub left_percent: f64,
    pub font_size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl HeartSpec {
    pub fn random(rng: &mut impl RandomSource) -> Self {
        let glyph_idx = ((rng.next_f64() * HEART_GLYPHS.len() as f64) as usize)
            .min(HEART_GLYPHS.len() - 1);
        Self {
            glyph: HEART_GLYPHS[glyph_idx],
            left_percent: rng.next_f64() * 90.0 + 5.0,
            font_size_px: rng.next_f64() * 14.0 + 10.0,
            duration_s: rng.next_f64() * 7.0 + 7.0,
            delay_s: rng.next_f64() * 10.0,
        }
    }

    /// Inline style declarations `(property, value)` for the heart span.
    pub fn style(&self) -> [(&'static str, String); 4] {
        [
            ("left", format!("{}%", self.left_percent)),
            ("font-size", format!("{}px", self.font_size_px)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
        ]
    }
}

/// The full batch of hearts for one reveal.
pub fn generate_hearts(rng: &mut impl RandomSource) -> Vec<HeartSpec> {
    (0..HEART_COUNT).map(|_| HeartSpec::random(&mut *rng)).collect()
}
