//! # Render Payloads
//!
//! The fully-typed, component-specific structures handed to the display
//! surface. Each mirrors one generated-UI component and fills missing props
//! with that component's defaults, so a sparse directive still renders
//! something sensible.

use serde::Deserialize;

/// Fact text used for the default/empty display state.
pub const WELCOME_FACT: &str = "I can create visual explanations about astronomy! Ask me to show you a planet, the solar system, or a constellation.";

fn default_unknown() -> String {
    "Unknown".to_string()
}

// ============================================================================
// PlanetCard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanetCardPayload {
    pub name: String,
    pub description: String,
    pub color: String,
    pub diameter: String,
    pub distance_from_sun: String,
    pub day_length: String,
    pub year_length: String,
    pub temperature: String,
    pub moons: u32,
}

impl Default for PlanetCardPayload {
    fn default() -> Self {
        PlanetCardPayload {
            name: "Unknown Planet".to_string(),
            description: "No description available".to_string(),
            color: "#4B90E6".to_string(),
            diameter: default_unknown(),
            distance_from_sun: default_unknown(),
            day_length: default_unknown(),
            year_length: default_unknown(),
            temperature: default_unknown(),
            moons: 0,
        }
    }
}

// ============================================================================
// SolarSystemDiagram
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetOrbit {
    pub name: String,
    pub color: String,
    pub size: f64,
    pub orbit_radius: f64,
    pub orbit_speed: f64,
}

impl PlanetOrbit {
    fn new(name: &str, color: &str, size: f64, orbit_radius: f64, orbit_speed: f64) -> Self {
        PlanetOrbit {
            name: name.to_string(),
            color: color.to_string(),
            size,
            orbit_radius,
            orbit_speed,
        }
    }
}

/// The eight planets, sized and spaced for the diagram rather than to scale.
pub fn default_planets() -> Vec<PlanetOrbit> {
    vec![
        PlanetOrbit::new("Mercury", "#A9A9A9", 3.8, 50.0, 8.0),
        PlanetOrbit::new("Venus", "#E6C229", 9.5, 75.0, 12.0),
        PlanetOrbit::new("Earth", "#4B90E6", 10.0, 100.0, 16.0),
        PlanetOrbit::new("Mars", "#E67F4B", 5.3, 125.0, 20.0),
        PlanetOrbit::new("Jupiter", "#E6A54B", 20.0, 170.0, 30.0),
        PlanetOrbit::new("Saturn", "#EAD6A6", 17.0, 210.0, 35.0),
        PlanetOrbit::new("Uranus", "#73C2FB", 14.0, 250.0, 40.0),
        PlanetOrbit::new("Neptune", "#3E66F9", 13.5, 290.0, 45.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolarSystemPayload {
    pub title: String,
    pub description: String,
    pub planets: Vec<PlanetOrbit>,
}

impl Default for SolarSystemPayload {
    fn default() -> Self {
        SolarSystemPayload {
            title: "Our Solar System".to_string(),
            description: "The eight planets of our solar system orbit around the Sun.".to_string(),
            planets: default_planets(),
        }
    }
}

// ============================================================================
// ConstellationMap
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkyCoordinates {
    /// Right ascension, e.g. "10h"
    pub ra: String,
    /// Declination, e.g. "45°"
    pub dec: String,
}

/// A star as the model describes it: either pixel placement (x/y/size/
/// brightness) or astronomical placement (coordinates + magnitude).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Star {
    pub name: Option<String>,
    pub magnitude: Option<f64>,
    pub coordinates: Option<SkyCoordinates>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub brightness: Option<f64>,
}

/// A constellation line between two star indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConstellationLine {
    pub from: usize,
    pub to: usize,
}

fn plotted_star(x: f64, y: f64, size: f64, brightness: f64, name: &str, magnitude: f64) -> Star {
    Star {
        name: Some(name.to_string()),
        magnitude: Some(magnitude),
        coordinates: None,
        x: Some(x),
        y: Some(y),
        size: Some(size),
        brightness: Some(brightness),
    }
}

/// Default constellation (Big Dipper)
pub fn default_stars() -> Vec<Star> {
    vec![
        plotted_star(50.0, 50.0, 2.0, 0.8, "Star 1", 2.0),
        plotted_star(100.0, 60.0, 3.0, 0.9, "Star 2", 1.0),
        plotted_star(150.0, 70.0, 2.0, 0.7, "Star 3", 3.0),
        plotted_star(200.0, 90.0, 2.5, 0.8, "Star 4", 2.0),
        plotted_star(220.0, 140.0, 2.0, 0.7, "Star 5", 3.0),
        plotted_star(260.0, 180.0, 3.0, 0.9, "Star 6", 1.0),
        plotted_star(300.0, 200.0, 2.5, 0.8, "Star 7", 2.0),
    ]
}

pub fn default_lines() -> Vec<ConstellationLine> {
    (0..6)
        .map(|i| ConstellationLine { from: i, to: i + 1 })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstellationPayload {
    pub constellation: String,
    pub description: String,
    pub stars: Vec<Star>,
    pub lines: Vec<ConstellationLine>,
}

impl Default for ConstellationPayload {
    fn default() -> Self {
        ConstellationPayload {
            constellation: String::new(),
            description: "A beautiful constellation in the night sky.".to_string(),
            stars: default_stars(),
            lines: default_lines(),
        }
    }
}

// ============================================================================
// SpaceMission
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceMissionPayload {
    pub name: String,
    pub description: String,
    pub launch_date: String,
    pub destination: String,
    pub achievements: Vec<String>,
    pub image_url: Option<String>,
}

impl Default for SpaceMissionPayload {
    fn default() -> Self {
        SpaceMissionPayload {
            name: "Apollo 11".to_string(),
            description: "The first manned mission to land on the Moon.".to_string(),
            launch_date: "July 16, 1969".to_string(),
            destination: "The Moon".to_string(),
            achievements: vec![
                "First humans to land on the Moon".to_string(),
                "Collected lunar samples".to_string(),
                "Conducted scientific experiments".to_string(),
            ],
            image_url: None,
        }
    }
}

// ============================================================================
// SpaceComparison
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonType {
    #[default]
    Size,
    Distance,
    Temperature,
}

impl ComparisonType {
    /// Unit label rendered after each item's value.
    pub fn unit(&self) -> &'static str {
        match self {
            ComparisonType::Size => "km",
            ComparisonType::Distance => "million km",
            ComparisonType::Temperature => "°C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonItem {
    pub name: String,
    pub size: f64,
    pub color: String,
    pub description: String,
}

impl ComparisonItem {
    fn new(name: &str, size: f64, color: &str, description: &str) -> Self {
        ComparisonItem {
            name: name.to_string(),
            size,
            color: color.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceComparisonPayload {
    pub title: String,
    pub description: String,
    pub items: Vec<ComparisonItem>,
    pub comparison_type: ComparisonType,
}

impl Default for SpaceComparisonPayload {
    fn default() -> Self {
        SpaceComparisonPayload {
            title: "Planet Size Comparison".to_string(),
            description: "A comparison of planet sizes in our solar system".to_string(),
            items: vec![
                ComparisonItem::new("Earth", 100.0, "#4B90E6", "Our home planet"),
                ComparisonItem::new(
                    "Jupiter",
                    1120.0,
                    "#E6A54B",
                    "The largest planet in our solar system",
                ),
                ComparisonItem::new("Mars", 53.0, "#E67F4B", "The red planet"),
            ],
            comparison_type: ComparisonType::Size,
        }
    }
}

// ============================================================================
// AstronomyFact
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FactPayload {
    pub fact: String,
}

impl Default for FactPayload {
    fn default() -> Self {
        FactPayload {
            fact: "There are more stars in the universe than grains of sand on all the beaches on Earth!"
                .to_string(),
        }
    }
}

impl FactPayload {
    pub fn with_text(fact: impl Into<String>) -> Self {
        FactPayload { fact: fact.into() }
    }
}

// ============================================================================
// RenderPayload
// ============================================================================

/// One of the six display shapes. The display surface accepts every variant;
/// the default is the welcome fact, so the surface is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPayload {
    Planet(PlanetCardPayload),
    SolarSystem(SolarSystemPayload),
    Constellation(ConstellationPayload),
    Mission(SpaceMissionPayload),
    Comparison(SpaceComparisonPayload),
    Fact(FactPayload),
}

impl Default for RenderPayload {
    fn default() -> Self {
        RenderPayload::Fact(FactPayload::with_text(WELCOME_FACT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_planet_card_fills_missing_fields() {
        let payload: PlanetCardPayload =
            serde_json::from_value(json!({"name": "Mars", "moons": 2})).unwrap();
        assert_eq!(payload.name, "Mars");
        assert_eq!(payload.moons, 2);
        assert_eq!(payload.diameter, "Unknown");
        assert_eq!(payload.color, "#4B90E6");
    }

    #[test]
    fn test_planet_card_camel_case_fields() {
        let payload: PlanetCardPayload = serde_json::from_value(json!({
            "distanceFromSun": "142 million miles",
            "dayLength": "24.6 hours",
            "yearLength": "687 Earth days"
        }))
        .unwrap();
        assert_eq!(payload.distance_from_sun, "142 million miles");
        assert_eq!(payload.day_length, "24.6 hours");
        assert_eq!(payload.year_length, "687 Earth days");
    }

    #[test]
    fn test_solar_system_defaults_to_eight_planets() {
        let payload = SolarSystemPayload::default();
        assert_eq!(payload.planets.len(), 8);
        assert_eq!(payload.planets[0].name, "Mercury");
        assert_eq!(payload.planets[7].name, "Neptune");
        // Orbit radii increase monotonically
        assert!(
            payload
                .planets
                .windows(2)
                .all(|w| w[0].orbit_radius < w[1].orbit_radius)
        );
    }

    #[test]
    fn test_constellation_defaults_to_big_dipper() {
        let payload = ConstellationPayload::default();
        assert_eq!(payload.stars.len(), 7);
        assert_eq!(payload.lines.len(), 6);
        assert_eq!(payload.lines[0], ConstellationLine { from: 0, to: 1 });
        assert_eq!(payload.lines[5], ConstellationLine { from: 5, to: 6 });
    }

    #[test]
    fn test_star_accepts_astronomical_coordinates() {
        let star: Star = serde_json::from_value(json!({
            "name": "Regulus",
            "magnitude": 1.4,
            "coordinates": {"ra": "10h", "dec": "12°"}
        }))
        .unwrap();
        assert_eq!(star.coordinates.as_ref().unwrap().ra, "10h");
        assert!(star.x.is_none());
    }

    #[test]
    fn test_comparison_type_units() {
        assert_eq!(ComparisonType::Size.unit(), "km");
        assert_eq!(ComparisonType::Distance.unit(), "million km");
        assert_eq!(ComparisonType::Temperature.unit(), "°C");
    }

    #[test]
    fn test_comparison_type_wire_names() {
        let payload: SpaceComparisonPayload =
            serde_json::from_value(json!({"comparisonType": "temperature"})).unwrap();
        assert_eq!(payload.comparison_type, ComparisonType::Temperature);
        // Items fall back to the default trio
        assert_eq!(payload.items.len(), 3);
    }

    #[test]
    fn test_mission_defaults() {
        let payload = SpaceMissionPayload::default();
        assert_eq!(payload.name, "Apollo 11");
        assert_eq!(payload.achievements.len(), 3);
        assert!(payload.image_url.is_none());
    }

    #[test]
    fn test_default_render_payload_is_welcome_fact() {
        match RenderPayload::default() {
            RenderPayload::Fact(fact) => assert_eq!(fact.fact, WELCOME_FACT),
            other => panic!("expected fact, got {:?}", other),
        }
    }
}
