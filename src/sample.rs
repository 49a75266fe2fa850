//! Fixed-arity 8-bit color samples.
//!
//! A sample kind fixes two things at compile time: the ordered set of component
//! tags (`COMPONENTS`, which is also the tie-break order used by median cut) and
//! the byte layout of one interleaved pixel (`BYTE_ORDER`).

use core::fmt::Debug;
use core::hash::Hash;

use rgb::RGB8;

/// Component tag of a color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

/// An immutable color value with a fixed set of named 8-bit components.
pub trait Sample: Copy + Eq + Ord + Hash + Debug {
    /// Component tags, in the order used to break spread ties.
    const COMPONENTS: &'static [Channel];

    /// Which component each byte of an interleaved pixel holds.
    const BYTE_ORDER: &'static [Channel];

    /// Builds a sample from one pixel laid out in [`Self::BYTE_ORDER`].
    ///
    /// `bytes` must hold at least `COMPONENTS.len()` bytes.
    fn from_bytes(bytes: &[u8]) -> Self;

    /// Value of one component.
    ///
    /// # Panics
    ///
    /// If `tag` is not one of [`Self::COMPONENTS`].
    fn component(&self, tag: Channel) -> u8;

    /// Color part of the sample, used for the emitted color table.
    fn rgb(&self) -> RGB8;

    /// Alpha of the sample, `None` for kinds without an alpha component.
    fn alpha(&self) -> Option<u8> {
        None
    }

    /// Fully transparent sentinel, if this kind can express one.
    fn transparent() -> Option<Self> {
        None
    }

    /// Euclidean distance over every component, alpha included.
    fn distance(&self, other: &Self) -> f64 {
        let mut sum = 0.0f64;
        for &tag in Self::COMPONENTS {
            let d = f64::from(self.component(tag)) - f64::from(other.component(tag));
            sum += d * d;
        }
        sqrt(sum)
    }
}

#[cfg(feature = "std")]
#[inline]
fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

fn byte_for(order: &[Channel], bytes: &[u8], tag: Channel) -> u8 {
    let pos = order.iter().position(|&c| c == tag).unwrap_or(0);
    bytes[pos]
}

/// Four-component sample read from pixels stored as `B, G, R, A`.
///
/// This is the native layout of little-endian 32-bit ARGB surfaces, the layout
/// most platform decoders hand out. Spread ties break in the same `B, G, R, A`
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bgra {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Bgra {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The pixel bytes this sample was read from.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

impl Sample for Bgra {
    const COMPONENTS: &'static [Channel] = &[Channel::B, Channel::G, Channel::R, Channel::A];
    const BYTE_ORDER: &'static [Channel] = &[Channel::B, Channel::G, Channel::R, Channel::A];

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            r: byte_for(Self::BYTE_ORDER, bytes, Channel::R),
            g: byte_for(Self::BYTE_ORDER, bytes, Channel::G),
            b: byte_for(Self::BYTE_ORDER, bytes, Channel::B),
            a: byte_for(Self::BYTE_ORDER, bytes, Channel::A),
        }
    }

    fn component(&self, tag: Channel) -> u8 {
        match tag {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    fn rgb(&self) -> RGB8 {
        RGB8::new(self.r, self.g, self.b)
    }

    fn alpha(&self) -> Option<u8> {
        Some(self.a)
    }

    fn transparent() -> Option<Self> {
        Some(Self::new(0, 0, 0, 0))
    }
}

impl From<rgb::RGBA8> for Bgra {
    fn from(c: rgb::RGBA8) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

/// Four-component sample read from pixels stored as `R, G, B, A`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Sample for Rgba {
    const COMPONENTS: &'static [Channel] = &[Channel::R, Channel::G, Channel::B, Channel::A];
    const BYTE_ORDER: &'static [Channel] = &[Channel::R, Channel::G, Channel::B, Channel::A];

    fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    fn component(&self, tag: Channel) -> u8 {
        match tag {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    fn rgb(&self) -> RGB8 {
        RGB8::new(self.r, self.g, self.b)
    }

    fn alpha(&self) -> Option<u8> {
        Some(self.a)
    }

    fn transparent() -> Option<Self> {
        Some(Self::new(0, 0, 0, 0))
    }
}

impl From<rgb::RGBA8> for Rgba {
    fn from(c: rgb::RGBA8) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

/// Opaque three-component sample read from pixels stored as `R, G, B`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Sample for Rgb {
    const COMPONENTS: &'static [Channel] = &[Channel::R, Channel::G, Channel::B];
    const BYTE_ORDER: &'static [Channel] = &[Channel::R, Channel::G, Channel::B];

    fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    fn component(&self, tag: Channel) -> u8 {
        match tag {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => panic!("Rgb samples have no alpha component"),
        }
    }

    fn rgb(&self) -> RGB8 {
        RGB8::new(self.r, self.g, self.b)
    }
}

impl From<RGB8> for Rgb {
    fn from(c: RGB8) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_bytes_map_to_rgba_components() {
        let s = Bgra::from_bytes(&[10, 20, 30, 40]);
        assert_eq!(s, Bgra::new(30, 20, 10, 40));
        assert_eq!(s.component(Channel::R), 30);
        assert_eq!(s.component(Channel::B), 10);
        assert_eq!(s.to_bytes(), [10, 20, 30, 40]);
    }

    #[test]
    fn rgba_bytes_keep_their_order() {
        let s = Rgba::from_bytes(&[10, 20, 30, 40]);
        assert_eq!(s.rgb(), RGB8::new(10, 20, 30));
        assert_eq!(s.alpha(), Some(40));
    }

    #[test]
    fn distance_includes_alpha() {
        let a = Bgra::new(0, 0, 0, 0);
        let b = Bgra::new(0, 0, 0, 255);
        assert!((a.distance(&b) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn distance_matches_libm_root() {
        let a = Rgba::new(255, 0, 17, 3);
        let b = Rgba::new(0, 255, 200, 250);
        let sum: f64 = [255.0f64, 255.0, 183.0, 247.0].iter().map(|d| d * d).sum();
        assert_eq!(a.distance(&b), libm::sqrt(sum));
        assert_eq!(sqrt(sum), libm::sqrt(sum));
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_equal() {
        let a = Rgb::new(3, 4, 0);
        let b = Rgb::new(0, 0, 0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn transparent_sentinel_is_a_capability() {
        assert_eq!(Bgra::transparent(), Some(Bgra::new(0, 0, 0, 0)));
        assert_eq!(Rgb::transparent(), None);
        assert_eq!(Rgb::new(1, 2, 3).alpha(), None);
    }

    #[test]
    #[should_panic(expected = "no alpha")]
    fn undefined_component_fails_fast() {
        Rgb::new(1, 2, 3).component(Channel::A);
    }
}
