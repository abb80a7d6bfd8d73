//! Quadtree keys.
//!
//! One symbol per zoom level, most significant level first. The symbol for
//! a level is `q = 2 * ybit + xbit`, written as a decimal digit or as the
//! `q`-th character of a caller-supplied four-symbol alphabet.

use crate::core::geo::TileCoord;
use std::fmt;

const DIGITS: [char; 4] = ['0', '1', '2', '3'];

fn bit(value: i64, i: u8) -> i64 {
    (value >> i.min(63)) & 1
}

/// Encode tile `(x, y)` at `zoom` as a quadkey.
///
/// `alphabet` supplies the four symbols for `q = 0..=3`; with `None` the
/// digits `0`-`3` are used. An alphabet shorter than four symbols falls
/// back to the digit for the missing positions.
pub fn encode_quadkey(x: i64, y: i64, zoom: u8, alphabet: Option<&str>) -> String {
    let symbols: Vec<char> = alphabet.map(|a| a.chars().collect()).unwrap_or_default();
    let mut key = String::with_capacity(zoom as usize);

    for i in (0..zoom).rev() {
        let q = (2 * bit(y, i) + bit(x, i)) as usize;
        key.push(symbols.get(q).copied().unwrap_or(DIGITS[q]));
    }
    key
}

/// Inverse of [`encode_quadkey`]; `None` if a symbol is not in the alphabet.
pub fn decode_quadkey(key: &str, alphabet: Option<&str>) -> Option<TileCoord> {
    let symbols: Vec<char> = alphabet.unwrap_or("0123").chars().collect();
    let mut x = 0_i64;
    let mut y = 0_i64;
    let mut zoom = 0_u8;

    for c in key.chars() {
        let q = symbols.iter().take(4).position(|&s| s == c)? as i64;
        x = (x << 1) | (q % 2);
        y = (y << 1) | (q / 2);
        zoom = zoom.checked_add(1)?;
    }
    Some(TileCoord::new(x, y, zoom))
}

/// A decimal quadkey with tree navigation helpers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadKey(String);

impl QuadKey {
    pub fn from_tile(tile: &TileCoord) -> Self {
        Self(encode_quadkey(tile.x, tile.y, tile.z, None))
    }

    pub fn parse(key: &str) -> Option<Self> {
        decode_quadkey(key, None).map(|_| Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn zoom(&self) -> u8 {
        self.0.len() as u8
    }

    pub fn to_tile(&self) -> TileCoord {
        // `parse` and `from_tile` only ever store valid keys
        decode_quadkey(&self.0, None).unwrap_or(TileCoord::new(0, 0, 0))
    }

    pub fn parent(&self) -> Option<QuadKey> {
        if self.0.is_empty() {
            None
        } else {
            Some(QuadKey(self.0[..self.0.len() - 1].to_string()))
        }
    }

    /// True if `other` lies strictly inside this key's tile at a deeper zoom.
    pub fn is_ancestor_of(&self, other: &QuadKey) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(encode_quadkey(0, 0, 0, None), "");
        assert_eq!(encode_quadkey(1, 0, 1, None), "1");
        assert_eq!(encode_quadkey(0, 1, 1, None), "2");
        assert_eq!(encode_quadkey(3, 5, 3, None), "213");
        assert_eq!(encode_quadkey(8, 8, 4, None), "3000");
    }

    #[test]
    fn test_custom_alphabet() {
        assert_eq!(encode_quadkey(3, 5, 3, Some("qrts")), "trs");
        assert_eq!(encode_quadkey(3, 5, 3, Some("ab")), "2b3");
    }

    #[test]
    fn test_decode_reconstructs_tile() {
        for z in 0..=6u8 {
            let n = 1_i64 << z;
            for x in 0..n {
                for y in 0..n {
                    let key = encode_quadkey(x, y, z, None);
                    assert_eq!(key.len(), z as usize);
                    assert_eq!(decode_quadkey(&key, None), Some(TileCoord::new(x, y, z)));
                }
            }
        }
        assert_eq!(decode_quadkey("trs", Some("qrts")), Some(TileCoord::new(3, 5, 3)));
        assert_eq!(decode_quadkey("14", None), None);
    }

    #[test]
    fn test_quadkey_tree() {
        let key = QuadKey::from_tile(&TileCoord::new(3, 5, 3));
        assert_eq!(key.as_str(), "213");
        assert_eq!(key.zoom(), 3);
        assert_eq!(key.to_tile(), TileCoord::new(3, 5, 3));

        let parent = key.parent().unwrap();
        assert_eq!(parent.as_str(), "21");
        assert_eq!(parent.to_tile(), TileCoord::new(3, 5, 3).parent().unwrap());
        assert!(parent.is_ancestor_of(&key));
        assert!(!key.is_ancestor_of(&parent));
        assert!(!key.is_ancestor_of(&key));
        assert!(QuadKey::parse("").unwrap().parent().is_none());
        assert!(QuadKey::parse("x").is_none());
    }
}
