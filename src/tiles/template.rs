//! Tile URL templates
//!
//! A template is an ordinary URL with placeholder tokens of the form
//! `{name}` or `{name:args}`:
//!
//! | token | substitution |
//! |---|---|
//! | `{z}` `{x}` `{y}` | zoom, column, row |
//! | `{-y}` | row counted from the bottom, `2^z - 1 - y` |
//! | `{s:abc}` | shard symbol `abc[(x + y) mod 3]` |
//! | `{s:1-4}` | shard number `1 + (x + y) mod 4` |
//! | `{qt}` `{qt:abcd}` | quadkey, digits or the given alphabet |
//! | `{custom:key}` | URL looked up through a [`CustomResolver`] |
//!
//! Anything else, including malformed shard specs, is left verbatim. The
//! template is scanned once when parsed; resolving it afterwards only walks
//! the precomputed segments.

use crate::core::geo::TileCoord;
use crate::tiles::custom::{CustomResolver, NoCustomResolver};
use crate::tiles::quadkey::encode_quadkey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}:]+)(?::([^}]+))?\}").expect("token pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shard {
    Symbols(Vec<char>),
    /// `span` is `max - min + 1`, checked at parse time.
    Range { min: i64, span: i64 },
}

impl Shard {
    fn parse(spec: &str) -> Option<Shard> {
        if spec.contains('-') {
            let mut bounds = spec.split('-');
            let min = bounds.next()?.trim().parse::<i64>().ok()?;
            let max = bounds.next()?.trim().parse::<i64>().ok()?;
            // a span that does not fit in i64 leaves the token verbatim
            let span = max.checked_sub(min)?.checked_add(1)?;
            (span > 0).then_some(Shard::Range { min, span })
        } else {
            Some(Shard::Symbols(spec.chars().collect()))
        }
    }

    fn select(&self, coord: &TileCoord) -> String {
        let k = coord.x.wrapping_add(coord.y);
        match self {
            Shard::Symbols(symbols) => {
                let i = k.rem_euclid(symbols.len() as i64) as usize;
                symbols[i].to_string()
            }
            Shard::Range { min, span } => (min + k.rem_euclid(*span)).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Zoom,
    X,
    Y,
    FlippedY,
    Shard(Shard),
    QuadKey(Option<String>),
    Custom(String),
}

impl Token {
    fn parse(name: &str, args: Option<&str>) -> Option<Token> {
        match (name, args) {
            ("z", _) => Some(Token::Zoom),
            ("x", _) => Some(Token::X),
            ("y", _) => Some(Token::Y),
            ("-y", _) => Some(Token::FlippedY),
            ("s", Some(spec)) => Shard::parse(spec).map(Token::Shard),
            ("qt", alphabet) => Some(Token::QuadKey(alphabet.map(str::to_string))),
            ("custom", Some(key)) => Some(Token::Custom(key.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// A parsed tile URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TileTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl TileTemplate {
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN_PATTERN.captures_iter(raw) {
            let Some(whole) = caps.get(0) else { continue };
            literal.push_str(&raw[last..whole.start()]);
            last = whole.end();

            let name = caps.get(1).map_or("", |m| m.as_str());
            let args = caps.get(2).map(|m| m.as_str());
            match Token::parse(name, args) {
                Some(token) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token(token));
                }
                None => literal.push_str(whole.as_str()),
            }
        }

        literal.push_str(&raw[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True if resolving this template performs a blocking lookup.
    pub fn uses_custom(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Token(Token::Custom(_))))
    }

    /// True if the template contains no recognized tokens.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// URL for `coord`. A failed custom lookup substitutes the empty string.
    pub fn resolve(&self, coord: TileCoord, resolver: &dyn CustomResolver) -> String {
        self.render(coord, resolver, |key| {
            log::debug!("custom lookup {} failed for tile {}; substituting nothing", key, coord);
            Some(String::new())
        })
        .unwrap_or_default()
    }

    /// URL for `coord`, or `None` if any custom lookup failed, so that the
    /// caller can leave the tile out instead of requesting a broken URL.
    pub fn try_resolve(&self, coord: TileCoord, resolver: &dyn CustomResolver) -> Option<String> {
        self.render(coord, resolver, |_| None)
    }

    fn render(
        &self,
        coord: TileCoord,
        resolver: &dyn CustomResolver,
        on_missing: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let mut url = String::with_capacity(self.raw.len() + 16);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Token(Token::Zoom) => url.push_str(&coord.z.to_string()),
                Segment::Token(Token::X) => url.push_str(&coord.x.to_string()),
                Segment::Token(Token::Y) => url.push_str(&coord.y.to_string()),
                Segment::Token(Token::FlippedY) => url.push_str(&coord.flipped_y().to_string()),
                Segment::Token(Token::Shard(shard)) => url.push_str(&shard.select(&coord)),
                Segment::Token(Token::QuadKey(alphabet)) => url.push_str(&encode_quadkey(
                    coord.x,
                    coord.y,
                    coord.z,
                    alphabet.as_deref(),
                )),
                Segment::Token(Token::Custom(key)) => {
                    let value = match resolver.resolve(key, coord) {
                        Some(value) => value,
                        None => on_missing(key)?,
                    };
                    url.push_str(&value);
                }
            }
        }
        Some(url)
    }
}

impl From<String> for TileTemplate {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for TileTemplate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<TileTemplate> for String {
    fn from(template: TileTemplate) -> Self {
        template.raw
    }
}

impl FromStr for TileTemplate {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TileTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Resolve `template` for `coord` without a custom-lookup backend.
pub fn resolve_tile_url(template: &str, coord: TileCoord) -> String {
    TileTemplate::parse(template).resolve(coord, &NoCustomResolver)
}

/// Resolve `template` for `coord`, sending `{custom:..}` tokens to `resolver`.
pub fn resolve_tile_url_with(
    template: &str,
    coord: TileCoord,
    resolver: &dyn CustomResolver,
) -> String {
    TileTemplate::parse(template).resolve(coord, resolver)
}

/// Resolve on tokio's blocking pool so a custom lookup cannot stall the
/// async executor.
#[cfg(feature = "tokio-runtime")]
pub async fn resolve_tile_url_async(
    template: TileTemplate,
    coord: TileCoord,
    resolver: std::sync::Arc<dyn CustomResolver>,
) -> crate::Result<String> {
    if !template.uses_custom() {
        return Ok(template.resolve(coord, &NoCustomResolver));
    }
    let url = tokio::task::spawn_blocking(move || template.resolve(coord, resolver.as_ref()))
        .await?;
    Ok(url)
}
