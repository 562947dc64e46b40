//! # Sky Canvas
//!
//! Braille-canvas drawings for the two diagram payloads: the constellation
//! star field and the solar-system orbit chart. Both are static pictures:
//! placement happens once per draw, there is no frame animation.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};

use crate::core::payload::{ConstellationLine, ConstellationPayload, SolarSystemPayload, Star};
use crate::core::skymap::{plot_extent, process_stars};

/// A star resolved to drawable numbers.
#[derive(Debug, PartialEq)]
pub struct PlottedStar {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub brightness: f64,
    pub name: Option<String>,
}

/// Extracts the drawable stars, skipping any with missing or non-finite
/// coordinates (the canvas equivalent of the upstream "skip invalid stars"
/// guard).
pub fn plottable_stars(stars: &[Star]) -> Vec<PlottedStar> {
    stars
        .iter()
        .filter_map(|star| {
            let (x, y) = (star.x?, star.y?);
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            let size = star.size.unwrap_or(2.0);
            if !size.is_finite() {
                return None;
            }
            Some(PlottedStar {
                x,
                y,
                size,
                brightness: star.brightness.unwrap_or(0.8).clamp(0.0, 1.0),
                name: star.name.clone(),
            })
        })
        .collect()
}

/// Resolves line segments to endpoint pairs, skipping segments whose star
/// indices are out of range or whose endpoints have no position.
pub fn line_segments(stars: &[Star], lines: &[ConstellationLine]) -> Vec<((f64, f64), (f64, f64))> {
    lines
        .iter()
        .filter_map(|line| {
            let from = stars.get(line.from)?;
            let to = stars.get(line.to)?;
            let (x1, y1) = (from.x?, from.y?);
            let (x2, y2) = (to.x?, to.y?);
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                return None;
            }
            Some(((x1, y1), (x2, y2)))
        })
        .collect()
}

fn brightness_color(brightness: f64) -> Color {
    let v = (55.0 + brightness * 200.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(v, v, v)
}

/// Deterministic faint background stars (the original sprinkles random
/// ones; a hash keeps the picture stable across redraws).
fn background_stars(extent: f64) -> Vec<(f64, f64)> {
    (0u64..60)
        .map(|i| {
            let h = i.wrapping_mul(2654435761).wrapping_add(40503);
            let x = (h % 1000) as f64 / 1000.0 * extent;
            let y = ((h / 1000) % 1000) as f64 / 1000.0 * extent;
            (x, y)
        })
        .collect()
}

/// Draws the constellation star field.
pub fn draw_constellation(frame: &mut Frame, area: Rect, payload: &ConstellationPayload) {
    let extent = plot_extent();
    let processed = process_stars(&payload.stars);
    let stars = plottable_stars(&processed);
    let segments = line_segments(&processed, &payload.lines);
    let backdrop = background_stars(extent);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, extent])
        .y_bounds([0.0, extent])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &backdrop,
                color: Color::Rgb(70, 70, 90),
            });

            // Plot y grows downward; canvas y grows upward.
            for ((x1, y1), (x2, y2)) in &segments {
                ctx.draw(&CanvasLine {
                    x1: *x1,
                    y1: extent - *y1,
                    x2: *x2,
                    y2: extent - *y2,
                    color: Color::Rgb(120, 120, 140),
                });
            }

            for star in &stars {
                let cy = extent - star.y;
                let color = brightness_color(star.brightness);
                ctx.draw(&Points {
                    coords: &[(star.x, cy)],
                    color,
                });
                // A short halo makes brighter stars read larger.
                if star.size >= 2.5 {
                    let r = star.size;
                    ctx.draw(&Points {
                        coords: &[
                            (star.x - r, cy),
                            (star.x + r, cy),
                            (star.x, cy - r),
                            (star.x, cy + r),
                        ],
                        color,
                    });
                }
                if let Some(name) = &star.name {
                    ctx.print(
                        star.x + 4.0,
                        cy + 4.0,
                        TextLine::styled(name.clone(), Color::Gray),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

/// Draws the solar-system orbit chart: Sun at the center, one orbit ring
/// per planet, each planet placed at a fixed angle on its ring.
pub fn draw_solar_system(frame: &mut Frame, area: Rect, payload: &SolarSystemPayload) {
    let extent = plot_extent();
    let center = extent / 2.0;
    let max_orbit = payload
        .planets
        .iter()
        .map(|p| p.orbit_radius)
        .fold(1.0_f64, f64::max);
    let orbit_scale = (center - 20.0) / max_orbit;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, extent])
        .y_bounds([0.0, extent])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: center,
                y: center,
                radius: 8.0,
                color: Color::Yellow,
            });
            ctx.print(
                center + 10.0,
                center + 10.0,
                TextLine::styled("Sun", Color::Yellow),
            );

            for planet in &payload.planets {
                let radius = planet.orbit_radius * orbit_scale;
                let color = super::payload_view::hex_color(&planet.color);
                ctx.draw(&Circle {
                    x: center,
                    y: center,
                    radius,
                    color: Color::Rgb(60, 60, 70),
                });

                // Static placement: the orbit speed seeds the angle so each
                // planet lands somewhere distinct on its ring.
                let angle = (planet.orbit_speed * 8.0).to_radians();
                let (px, py) = (
                    center + radius * angle.cos(),
                    center + radius * angle.sin(),
                );
                ctx.draw(&Points {
                    coords: &[(px, py)],
                    color,
                });
                ctx.draw(&Circle {
                    x: px,
                    y: py,
                    radius: (planet.size * 0.3).clamp(1.0, 7.0),
                    color,
                });
                ctx.print(
                    px + 5.0,
                    py + 5.0,
                    TextLine::styled(planet.name.clone(), color),
                );
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::{SkyCoordinates, default_lines, default_stars};

    #[test]
    fn test_plottable_stars_skips_missing_positions() {
        let stars = vec![
            Star {
                x: Some(10.0),
                y: Some(20.0),
                ..Star::default()
            },
            Star {
                coordinates: Some(SkyCoordinates {
                    ra: "1h".to_string(),
                    dec: "2°".to_string(),
                }),
                ..Star::default() // never processed: no x/y
            },
        ];
        let plotted = plottable_stars(&stars);
        assert_eq!(plotted.len(), 1);
        assert_eq!(plotted[0].x, 10.0);
    }

    #[test]
    fn test_plottable_stars_skips_non_finite() {
        let stars = vec![Star {
            x: Some(f64::NAN),
            y: Some(20.0),
            ..Star::default()
        }];
        assert!(plottable_stars(&stars).is_empty());
    }

    #[test]
    fn test_plottable_defaults_fill_size_and_brightness() {
        let stars = vec![Star {
            x: Some(1.0),
            y: Some(2.0),
            ..Star::default()
        }];
        let plotted = plottable_stars(&stars);
        assert_eq!(plotted[0].size, 2.0);
        assert_eq!(plotted[0].brightness, 0.8);
    }

    #[test]
    fn test_line_segments_follow_default_constellation() {
        let stars = default_stars();
        let segments = line_segments(&stars, &default_lines());
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[0].0, (50.0, 50.0));
        assert_eq!(segments[0].1, (100.0, 60.0));
    }

    #[test]
    fn test_line_segments_skip_out_of_range_indices() {
        let stars = default_stars();
        let lines = vec![
            ConstellationLine { from: 0, to: 99 },
            ConstellationLine { from: 1, to: 2 },
        ];
        let segments = line_segments(&stars, &lines);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_line_segments_skip_positionless_endpoints() {
        let stars = vec![
            Star {
                x: Some(1.0),
                y: Some(1.0),
                ..Star::default()
            },
            Star::default(),
        ];
        let lines = vec![ConstellationLine { from: 0, to: 1 }];
        assert!(line_segments(&stars, &lines).is_empty());
    }

    #[test]
    fn test_background_stars_are_deterministic_and_in_bounds() {
        let extent = plot_extent();
        let a = background_stars(extent);
        let b = background_stars(extent);
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);
        assert!(
            a.iter()
                .all(|(x, y)| (0.0..=extent).contains(x) && (0.0..=extent).contains(y))
        );
    }
}
