//! # Sky Math
//!
//! Converts astronomical star descriptions (right ascension / declination /
//! magnitude) into plot positions for the constellation canvas. The mapping
//! is a plain linear projection onto a fixed square plot: illustrative, not
//! astrometric.

use log::debug;

use crate::core::payload::{Star, default_stars};

/// Side length of the square plotting area, excluding margins.
pub const PLOT_SIZE: f64 = 300.0;
/// Margin added on every side of the plot.
pub const PLOT_MARGIN: f64 = 50.0;

/// Smallest rendered star size; keeps magnitude-6 stars visible.
const MIN_STAR_SIZE: f64 = 0.5;
const SIZE_SCALE: f64 = 1.5;
const MIN_BRIGHTNESS: f64 = 0.3;

/// Size and brightness used when a star carries no magnitude.
const DEFAULT_SIZE: f64 = 2.0;
const DEFAULT_BRIGHTNESS: f64 = 0.8;

/// Full extent of the plot including both margins.
pub fn plot_extent() -> f64 {
    PLOT_SIZE + 2.0 * PLOT_MARGIN
}

/// Parses right ascension hours from strings like "10h" or "10h30m".
/// Everything after the hour marker is ignored.
fn parse_ra_hours(ra: &str) -> Option<f64> {
    let hours: f64 = ra.split('h').next()?.trim().parse().ok()?;
    hours.is_finite().then_some(hours)
}

/// Parses declination degrees from strings like "45°" or "-8°".
fn parse_dec_degrees(dec: &str) -> Option<f64> {
    let degrees: f64 = dec.split('°').next()?.trim().parse().ok()?;
    degrees.is_finite().then_some(degrees)
}

fn size_for_magnitude(magnitude: Option<f64>) -> f64 {
    match magnitude {
        Some(m) => ((6.0 - m) * SIZE_SCALE).max(MIN_STAR_SIZE),
        None => DEFAULT_SIZE,
    }
}

fn brightness_for_magnitude(magnitude: Option<f64>) -> f64 {
    match magnitude {
        Some(m) => (1.0 - m / 6.0).clamp(MIN_BRIGHTNESS, 1.0),
        None => DEFAULT_BRIGHTNESS,
    }
}

/// Projects one star's RA/Dec onto the plot.
fn project(ra_hours: f64, dec_degrees: f64) -> (f64, f64) {
    let x = (ra_hours / 24.0) * PLOT_SIZE + PLOT_MARGIN;
    let y = ((90.0 - dec_degrees) / 180.0) * PLOT_SIZE + PLOT_MARGIN;
    (x, y)
}

/// Resolves every star to concrete plot coordinates.
///
/// Stars with astronomical coordinates are projected; a star whose RA or Dec
/// fails numeric conversion falls back to the default star at the same
/// index, or passes through unchanged when no default exists there. Stars
/// without coordinates keep whatever x/y they came with.
pub fn process_stars(stars: &[Star]) -> Vec<Star> {
    let defaults = default_stars();
    stars
        .iter()
        .enumerate()
        .map(|(index, star)| {
            let Some(coords) = &star.coordinates else {
                return star.clone();
            };

            let (Some(ra), Some(dec)) = (
                parse_ra_hours(&coords.ra),
                parse_dec_degrees(&coords.dec),
            ) else {
                debug!(
                    "star {} has unparseable coordinates ({:?}/{:?}); substituting default",
                    index, coords.ra, coords.dec
                );
                return defaults.get(index).cloned().unwrap_or_else(|| star.clone());
            };

            let (x, y) = project(ra, dec);
            Star {
                x: Some(x),
                y: Some(y),
                size: Some(size_for_magnitude(star.magnitude)),
                brightness: Some(brightness_for_magnitude(star.magnitude)),
                ..star.clone()
            }
        })
        .collect()
}
