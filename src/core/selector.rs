//! # Component Selection
//!
//! Resolves a parsed directive into the typed payload the display surface
//! paints. Props that fail to deserialize collapse to the component's
//! defaults rather than erroring; the surface always receives something.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::directive::{ComponentType, Directive};
use crate::core::payload::{
    ConstellationPayload, FactPayload, PlanetCardPayload, RenderPayload, SolarSystemPayload,
    SpaceComparisonPayload, SpaceMissionPayload,
};

/// Shown for `AstronomyFact` and unrecognized tags. The directive's own
/// props are deliberately not forwarded here; upstream behaves the same
/// way, and the quirk is preserved rather than corrected.
pub const LEARNING_PLACEHOLDER: &str = "I'm learning about that space topic!";

fn props_into<T: DeserializeOwned + Default>(component: &str, props: Value) -> T {
    match serde_json::from_value(props) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("{component} props did not deserialize ({e}); using defaults");
            T::default()
        }
    }
}

/// Maps a directive onto a render payload.
pub fn select(directive: Directive) -> RenderPayload {
    let props = directive.props;
    match directive.component_type {
        ComponentType::PlanetCard => {
            RenderPayload::Planet(props_into::<PlanetCardPayload>("PlanetCard", props))
        }
        ComponentType::SolarSystemDiagram => {
            RenderPayload::SolarSystem(props_into::<SolarSystemPayload>("SolarSystemDiagram", props))
        }
        ComponentType::ConstellationMap => {
            RenderPayload::Constellation(props_into::<ConstellationPayload>("ConstellationMap", props))
        }
        ComponentType::SpaceMission => {
            RenderPayload::Mission(props_into::<SpaceMissionPayload>("SpaceMission", props))
        }
        ComponentType::SpaceComparison => {
            RenderPayload::Comparison(props_into::<SpaceComparisonPayload>("SpaceComparison", props))
        }
        ComponentType::AstronomyFact | ComponentType::Unrecognized => {
            RenderPayload::Fact(FactPayload::with_text(LEARNING_PLACEHOLDER))
        }
    }
}
