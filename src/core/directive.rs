//! # Directive Parsing
//!
//! Interprets one finished model response as an instruction to render a
//! display component. The envelope text goes through up to two JSON decodes:
//!
//! ```text
//! raw envelope ── outer decode ──> {role, content} ── inner decode ──> {componentType, props}
//!      │                 │                                  │
//!      └─ not JSON       └─ content missing/not a string    └─ malformed or falsy props
//!         Fallback(raw)     Fallback(raw)                      Fallback(apology)
//! ```
//!
//! Every branch resolves to a [`Reply`]; nothing escapes as an error. The
//! display surface is therefore never left empty.

use serde_json::Value;

/// Shown when the envelope parsed but its content is not a usable directive.
pub const UNPARSEABLE_DIRECTIVE_APOLOGY: &str = "I understand your question but couldn't generate the visualization. Please try asking about a specific space topic.";

/// The six display components the model may name, plus a catch-all for
/// anything else it invents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    PlanetCard,
    SolarSystemDiagram,
    ConstellationMap,
    SpaceMission,
    SpaceComparison,
    AstronomyFact,
    Unrecognized,
}

impl ComponentType {
    /// Resolves a wire tag. Unknown tags map to `Unrecognized` rather than
    /// failing; the selector decides what that means.
    pub fn from_tag(tag: &str) -> ComponentType {
        match tag {
            "PlanetCard" => ComponentType::PlanetCard,
            "SolarSystemDiagram" => ComponentType::SolarSystemDiagram,
            "ConstellationMap" => ComponentType::ConstellationMap,
            "SpaceMission" => ComponentType::SpaceMission,
            "SpaceComparison" => ComponentType::SpaceComparison,
            "AstronomyFact" => ComponentType::AstronomyFact,
            _ => ComponentType::Unrecognized,
        }
    }
}

/// A recovered `{componentType, props}` instruction. Transient: created per
/// response, consumed by the selector, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub component_type: ComponentType,
    pub props: Value,
}

/// Outcome of parsing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Directive(Directive),
    Fallback(String),
}

/// JavaScript truthiness for a JSON value. A falsy `props` field means
/// "no directive" by policy, matching the upstream check.
fn js_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a raw response into a directive or a human-readable fallback.
/// Never fails; see the module docs for the branch map.
pub fn parse_reply(raw: &str) -> Reply {
    let trimmed = raw.trim();

    let Ok(outer) = serde_json::from_str::<Value>(trimmed) else {
        // Not JSON at all: show the prose as-is.
        return Reply::Fallback(trimmed.to_string());
    };

    let Some(content) = outer.get("content").and_then(Value::as_str) else {
        return Reply::Fallback(trimmed.to_string());
    };

    let Ok(inner) = serde_json::from_str::<Value>(content) else {
        return Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string());
    };

    let Some(tag) = inner.get("componentType").and_then(Value::as_str) else {
        return Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string());
    };

    let props = inner.get("props").cloned().unwrap_or(Value::Null);
    if !js_truthy(&props) {
        return Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string());
    }

    Reply::Directive(Directive {
        component_type: ComponentType::from_tag(tag),
        props,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Wraps a directive payload the way the transport envelope does.
    fn envelope(content: &str) -> String {
        json!({"role": "assistant", "content": content}).to_string()
    }

    #[test]
    fn test_plain_prose_is_fallback() {
        let raw = "Mars is red because of iron oxide.";
        assert_eq!(parse_reply(raw), Reply::Fallback(raw.to_string()));
    }

    #[test]
    fn test_empty_string_is_fallback() {
        assert_eq!(parse_reply(""), Reply::Fallback(String::new()));
    }

    #[test]
    fn test_partial_json_is_fallback() {
        let raw = r#"{"content": "#;
        assert_eq!(parse_reply(raw), Reply::Fallback(raw.trim().to_string()));
    }

    #[test]
    fn test_outer_json_without_content_is_fallback() {
        let raw = r#"{"role":"assistant"}"#;
        assert_eq!(parse_reply(raw), Reply::Fallback(raw.to_string()));
    }

    #[test]
    fn test_outer_json_with_non_string_content_is_fallback() {
        let raw = r#"{"content":{"componentType":"PlanetCard","props":{"name":"Mars"}}}"#;
        assert_eq!(parse_reply(raw), Reply::Fallback(raw.to_string()));
    }

    #[test]
    fn test_outer_json_non_object_is_fallback() {
        assert_eq!(parse_reply("42"), Reply::Fallback("42".to_string()));
        assert_eq!(parse_reply("[1,2]"), Reply::Fallback("[1,2]".to_string()));
    }

    #[test]
    fn test_inner_not_json_is_apology() {
        let raw = envelope("Jupiter is the biggest planet!");
        assert_eq!(
            parse_reply(&raw),
            Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string())
        );
    }

    #[test]
    fn test_inner_missing_component_type_is_apology() {
        let raw = envelope(r#"{"props":{"name":"Mars"}}"#);
        assert_eq!(
            parse_reply(&raw),
            Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string())
        );
    }

    #[test]
    fn test_inner_non_string_component_type_is_apology() {
        let raw = envelope(r#"{"componentType":7,"props":{"name":"Mars"}}"#);
        assert_eq!(
            parse_reply(&raw),
            Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string())
        );
    }

    #[test]
    fn test_falsy_props_variants_are_apology() {
        for props in ["null", "0", "\"\"", "false"] {
            let inner = format!(r#"{{"componentType":"PlanetCard","props":{props}}}"#);
            let raw = envelope(&inner);
            assert_eq!(
                parse_reply(&raw),
                Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string()),
                "props={props} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_props_is_apology() {
        let raw = envelope(r#"{"componentType":"PlanetCard"}"#);
        assert_eq!(
            parse_reply(&raw),
            Reply::Fallback(UNPARSEABLE_DIRECTIVE_APOLOGY.to_string())
        );
    }

    #[test]
    fn test_empty_object_props_is_accepted() {
        // {} is truthy in the upstream check, so it is a valid directive.
        let raw = envelope(r#"{"componentType":"PlanetCard","props":{}}"#);
        match parse_reply(&raw) {
            Reply::Directive(d) => {
                assert_eq!(d.component_type, ComponentType::PlanetCard);
                assert_eq!(d.props, json!({}));
            }
            other => panic!("expected directive, got {:?}", other),
        }
    }

    #[test]
    fn test_well_formed_directive_round_trip() {
        let raw = r#"{"content":"{\"componentType\":\"PlanetCard\",\"props\":{\"name\":\"Mars\"}}"}"#;
        match parse_reply(raw) {
            Reply::Directive(d) => {
                assert_eq!(d.component_type, ComponentType::PlanetCard);
                assert_eq!(d.props, json!({"name": "Mars"}));
            }
            other => panic!("expected directive, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_maps_to_unrecognized() {
        let raw = envelope(r#"{"componentType":"GalaxySpinner","props":{"x":1}}"#);
        match parse_reply(&raw) {
            Reply::Directive(d) => assert_eq!(d.component_type, ComponentType::Unrecognized),
            other => panic!("expected directive, got {:?}", other),
        }
    }

    #[test]
    fn test_leading_whitespace_is_trimmed() {
        let padded = format!(
            "  {}\n",
            envelope(r#"{"componentType":"AstronomyFact","props":{"fact":"hi"}}"#)
        );
        assert!(matches!(parse_reply(&padded), Reply::Directive(_)));
    }

    #[test]
    fn test_component_type_from_tag_covers_all_six() {
        assert_eq!(
            ComponentType::from_tag("PlanetCard"),
            ComponentType::PlanetCard
        );
        assert_eq!(
            ComponentType::from_tag("SolarSystemDiagram"),
            ComponentType::SolarSystemDiagram
        );
        assert_eq!(
            ComponentType::from_tag("ConstellationMap"),
            ComponentType::ConstellationMap
        );
        assert_eq!(
            ComponentType::from_tag("SpaceMission"),
            ComponentType::SpaceMission
        );
        assert_eq!(
            ComponentType::from_tag("SpaceComparison"),
            ComponentType::SpaceComparison
        );
        assert_eq!(
            ComponentType::from_tag("AstronomyFact"),
            ComponentType::AstronomyFact
        );
        assert_eq!(
            ComponentType::from_tag("planetcard"),
            ComponentType::Unrecognized
        );
    }

    #[test]
    fn test_js_truthy() {
        assert!(!js_truthy(&json!(null)));
        assert!(!js_truthy(&json!(false)));
        assert!(!js_truthy(&json!(0)));
        assert!(!js_truthy(&json!(0.0)));
        assert!(!js_truthy(&json!("")));
        assert!(js_truthy(&json!(true)));
        assert!(js_truthy(&json!(1)));
        assert!(js_truthy(&json!("x")));
        assert!(js_truthy(&json!([])));
        assert!(js_truthy(&json!({})));
    }
}
