//! Text form of a region boundary: space-separated `lat,lon` pairs, e.g.
//! `"10.00000,170.00000 10.00000,-170.00000 -5.00000,-175.00000"`.
//!
//! This is what the download job receives. Longitudes are always in
//! `[-180, 180)` here; the unwrapped values used while editing never leak
//! into the string.

use crate::core::geo::LatLng;
use crate::{MapError, Result};

/// Format points as `lat,lon` tokens with `precision` decimals.
pub fn format_boundary(points: &[LatLng], precision: usize) -> String {
    points
        .iter()
        .map(|p| format!("{:.prec$},{:.prec$}", p.lat, p.lng, prec = precision))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a boundary string back into points. Empty input yields no points.
pub fn parse_boundary(text: &str) -> Result<Vec<LatLng>> {
    text.split_whitespace()
        .map(|pair| -> Result<LatLng> {
            let (lat, lng) = pair
                .split_once(',')
                .ok_or_else(|| MapError::ParseError(format!("expected lat,lon: {:?}", pair)))?;
            let lat = parse_degrees(lat, pair)?;
            let lng = parse_degrees(lng, pair)?;
            Ok(LatLng::new(lat, lng))
        })
        .collect()
}

fn parse_degrees(value: &str, pair: &str) -> Result<f64> {
    let degrees: f64 = value
        .trim()
        .parse()
        .map_err(|_| MapError::ParseError(format!("bad coordinate {:?} in {:?}", value, pair)))?;
    if !degrees.is_finite() {
        return Err(MapError::ParseError(format!("non-finite coordinate in {:?}", pair)).into());
    }
    Ok(degrees)
}

/// Reject boundaries that cannot bound a download region.
pub fn validate_boundary(points: &[LatLng]) -> Result<()> {
    if points.len() < 3 {
        return Err(MapError::InvalidCoordinates(format!(
            "a region needs at least 3 points, got {}",
            points.len()
        ))
        .into());
    }
    for p in points {
        if !(-90.0..=90.0).contains(&p.lat) || !(-180.0..=180.0).contains(&p.lng) {
            return Err(MapError::InvalidCoordinates(format!(
                "coordinates out of range: {},{}",
                p.lat, p.lng
            ))
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_boundary() {
        let points = [LatLng::new(1.0, -179.0), LatLng::new(-2.123456, 3.5)];
        assert_eq!(format_boundary(&points, 5), "1.00000,-179.00000 -2.12346,3.50000");
        assert_eq!(format_boundary(&points, 0), "1,-179 -2,4");
        assert_eq!(format_boundary(&[], 5), "");
    }

    #[test]
    fn test_parse_boundary() {
        let points = parse_boundary(" 1.5,2  -3,-179.25\n4,5 ").unwrap();
        assert_eq!(
            points,
            vec![LatLng::new(1.5, 2.0), LatLng::new(-3.0, -179.25), LatLng::new(4.0, 5.0)]
        );
        assert!(parse_boundary("").unwrap().is_empty());
        assert!(parse_boundary("1.0;2.0").is_err());
        assert!(parse_boundary("1.0,east").is_err());
        assert!(parse_boundary("NaN,1").is_err());
    }

    #[test]
    fn test_validate_boundary() {
        let ok = parse_boundary("0,0 0,10 10,10").unwrap();
        assert!(validate_boundary(&ok).is_ok());
        assert!(validate_boundary(&ok[..2]).is_err());
        assert!(validate_boundary(&parse_boundary("0,0 0,10 95,10").unwrap()).is_err());
        assert!(validate_boundary(&parse_boundary("0,0 0,181 5,10").unwrap()).is_err());
    }
}
