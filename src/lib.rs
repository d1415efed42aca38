//! Price estimation and page behavior for the UCE Monitoring site.
//!
//! The estimator maps a facility type, a surface and an optional
//! instrumentation session to an annual price in RON. Everything in this
//! library is pure so it can be unit-tested natively; the browser wiring
//! lives in the binary.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use wasm_bindgen::prelude::*;

pub mod contact;
pub mod format;
pub mod page;

use format::{PriceFormatter, RomanianFormatter};

/// Tariff parameters for the 2025 launch promotion.
pub mod tariff {
    /// Surface covered by one pricing block, in m².
    pub const BLOCK_SQUARE_METERS: f64 = 100.0;
    /// Surcharge per started block, in percent of the base price.
    pub const SURCHARGE_PERCENT_PER_BLOCK: u64 = 15;
    /// Flat fee for one basic instrumentation session, added after rounding.
    pub const INSTRUMENTATION_FEE_RON: u64 = 1500;
}

pub const ESTIMATE_LABEL: &str = "Estimare:";
pub const PRICE_SUFFIX: &str = "lei/an + TVA";
pub const DISCLAIMER: &str = "Include 1 vizită & raport scurt";

// Longest prefix a browser's parseFloat would accept
static LEADING_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FacilityType {
    #[default]
    ApartmentBuilding,
    House,
    Warehouse,
    OfficeBuilding,
}

impl FacilityType {
    pub const ALL: [FacilityType; 4] = [
        FacilityType::ApartmentBuilding,
        FacilityType::House,
        FacilityType::Warehouse,
        FacilityType::OfficeBuilding,
    ];

    /// Resolve a `<select name="tip">` value. Anything unknown falls back to
    /// the default facility type.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "bloc" => FacilityType::ApartmentBuilding,
            "casa" => FacilityType::House,
            "hala" => FacilityType::Warehouse,
            "birouri" => FacilityType::OfficeBuilding,
            other => {
                if !other.is_empty() {
                    debug!("Unknown facility type '{}', using default", other);
                }
                FacilityType::default()
            }
        }
    }

    pub fn form_value(self) -> &'static str {
        match self {
            FacilityType::ApartmentBuilding => "bloc",
            FacilityType::House => "casa",
            FacilityType::Warehouse => "hala",
            FacilityType::OfficeBuilding => "birouri",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FacilityType::ApartmentBuilding => "Bloc de locuințe",
            FacilityType::House => "Casă",
            FacilityType::Warehouse => "Hală",
            FacilityType::OfficeBuilding => "Clădire de birouri",
        }
    }

    /// Annual base price in RON before any adjustment.
    pub fn base_price(self) -> u64 {
        match self {
            FacilityType::ApartmentBuilding => 3990,
            FacilityType::House => 2990,
            FacilityType::Warehouse => 5490,
            FacilityType::OfficeBuilding => 4490,
        }
    }
}

impl From<String> for FacilityType {
    fn from(value: String) -> Self {
        FacilityType::from_form_value(&value)
    }
}

impl From<FacilityType> for &'static str {
    fn from(value: FacilityType) -> Self {
        value.form_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimateInput {
    #[serde(default, deserialize_with = "deserialize_facility")]
    pub facility_type: FacilityType,
    #[serde(default, deserialize_with = "deserialize_surface")]
    pub surface_square_meters: f64,
    #[serde(default, deserialize_with = "deserialize_instrumentation")]
    pub include_instrumentation: bool,
}

impl PriceEstimateInput {
    /// Build an input from the raw values of the estimator form controls.
    pub fn from_form_values(facility: &str, surface: &str, include_instrumentation: bool) -> Self {
        Self {
            facility_type: FacilityType::from_form_value(facility),
            surface_square_meters: parse_surface(surface),
            include_instrumentation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimateResult {
    pub annual_price_ron: u64,
    pub formatted_price: String,
    pub display_text: String,
}

/// Parse a surface the way `parseFloat` reads a text field: leading
/// whitespace is skipped and the longest numeric prefix wins. Empty,
/// non-numeric, negative and non-finite values all become 0.
pub fn parse_surface(text: &str) -> f64 {
    let parsed = LEADING_FLOAT_REGEX
        .captures(text)
        .and_then(|captures| captures[1].parse::<f64>().ok())
        .unwrap_or(0.0);
    sanitize_surface(parsed)
}

fn sanitize_surface(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn deserialize_surface<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SurfaceField {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match SurfaceField::deserialize(deserializer)? {
        SurfaceField::Number(value) => sanitize_surface(value),
        SurfaceField::Text(text) => parse_surface(&text),
        SurfaceField::Other(_) => 0.0,
    })
}

fn deserialize_facility<'de, D>(deserializer: D) -> Result<FacilityType, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FacilityField {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match FacilityField::deserialize(deserializer)? {
        FacilityField::Text(text) => FacilityType::from_form_value(&text),
        FacilityField::Other(_) => FacilityType::default(),
    })
}

fn deserialize_instrumentation<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagField {
        Flag(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(match FlagField::deserialize(deserializer)? {
        FlagField::Flag(flag) => flag,
        FlagField::Other(_) => false,
    })
}

/// Number of started 100 m² blocks. A partial block counts as a full one.
pub fn surface_blocks(surface_square_meters: f64) -> u64 {
    let surface = sanitize_surface(surface_square_meters);
    // float-to-int casts saturate
    (surface / tariff::BLOCK_SQUARE_METERS).ceil() as u64
}

/// Surcharge rate for a surface, e.g. 0.15 for one block.
pub fn surface_factor(surface_square_meters: f64) -> f64 {
    surface_blocks(surface_square_meters).saturating_mul(tariff::SURCHARGE_PERCENT_PER_BLOCK) as f64
        / 100.0
}

/// Annual price in RON, without formatting.
///
/// `round(base * (1 + factor))` is evaluated in integer hundredths so that
/// exact halves (3990 * 1.45 = 5785.5) always round up.
pub fn annual_price(input: &PriceEstimateInput) -> u64 {
    let base = input.facility_type.base_price();
    let percent = surface_blocks(input.surface_square_meters)
        .saturating_mul(tariff::SURCHARGE_PERCENT_PER_BLOCK)
        .saturating_add(100);
    let mut total = base.saturating_mul(percent).saturating_add(50) / 100;

    if input.include_instrumentation {
        total = total.saturating_add(tariff::INSTRUMENTATION_FEE_RON);
    }
    total
}

pub fn estimate_with(input: &PriceEstimateInput, formatter: &dyn PriceFormatter) -> PriceEstimateResult {
    let annual_price_ron = annual_price(input);
    let formatted_price = formatter.format_price(annual_price_ron);
    let display_text = format!(
        "{} ~{} {}. {}",
        ESTIMATE_LABEL, formatted_price, PRICE_SUFFIX, DISCLAIMER
    );

    PriceEstimateResult {
        annual_price_ron,
        formatted_price,
        display_text,
    }
}

/// Estimate the annual price with Romanian number formatting.
pub fn estimate(input: &PriceEstimateInput) -> PriceEstimateResult {
    estimate_with(input, &RomanianFormatter)
}

/// Estimator entry point for plain JavaScript callers.
///
/// Accepts `{ facilityType, surfaceSquareMeters, includeInstrumentation }`.
/// Malformed input is estimated as the default input rather than rejected.
#[wasm_bindgen(js_name = estimatePrice)]
pub fn estimate_price(input_js: JsValue) -> JsValue {
    let input: PriceEstimateInput = match serde_wasm_bindgen::from_value(input_js) {
        Ok(input) => input,
        Err(e) => {
            warn!("Malformed estimator input, using defaults: {}", e);
            PriceEstimateInput::default()
        }
    };

    serde_wasm_bindgen::to_value(&estimate(&input)).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainFormatter;

    impl PriceFormatter for PlainFormatter {
        fn format_price(&self, amount: u64) -> String {
            amount.to_string()
        }
    }

    fn input(facility_type: FacilityType, surface: f64, instrumentation: bool) -> PriceEstimateInput {
        PriceEstimateInput {
            facility_type,
            surface_square_meters: surface,
            include_instrumentation: instrumentation,
        }
    }

    #[test]
    fn zero_surface_returns_base_price_for_every_facility() {
        for facility in FacilityType::ALL {
            let result = estimate(&input(facility, 0.0, false));
            assert_eq!(result.annual_price_ron, facility.base_price());
        }
        assert_eq!(estimate(&input(FacilityType::ApartmentBuilding, 0.0, false)).annual_price_ron, 3990);
        assert_eq!(estimate(&input(FacilityType::Warehouse, 0.0, false)).annual_price_ron, 5490);
    }

    #[test]
    fn zero_surface_has_no_surcharge() {
        assert_eq!(surface_blocks(0.0), 0);
        assert_eq!(surface_factor(0.0), 0.0);
    }

    #[test]
    fn partial_blocks_round_up() {
        assert_eq!(surface_factor(1.0), 0.15);
        assert_eq!(surface_factor(100.0), 0.15);
        assert_eq!(surface_factor(101.0), 0.30);
        assert_eq!(surface_blocks(0.01), 1);
    }

    #[test]
    fn concrete_scenarios() {
        assert_eq!(annual_price(&input(FacilityType::ApartmentBuilding, 250.0, false)), 5786);
        assert_eq!(annual_price(&input(FacilityType::House, 50.0, true)), 4939);
    }

    #[test]
    fn instrumentation_is_added_after_rounding() {
        let without = annual_price(&input(FacilityType::House, 0.0, false));
        let with = annual_price(&input(FacilityType::House, 0.0, true));
        assert_eq!(with, without + 1500);

        // 3990 * 1.45 = 5785.5 rounds to 5786 before the fee is added
        let with = annual_price(&input(FacilityType::ApartmentBuilding, 250.0, true));
        assert_eq!(with, 7286);
    }

    #[test]
    fn estimate_is_idempotent() {
        let request = input(FacilityType::OfficeBuilding, 333.3, true);
        assert_eq!(estimate(&request), estimate(&request));
    }

    #[test]
    fn unknown_facility_behaves_like_apartment_building() {
        for surface in ["0", "1", "100", "101", "250", "12345"] {
            let unknown = PriceEstimateInput::from_form_values("castel", surface, false);
            let apartment = PriceEstimateInput::from_form_values("bloc", surface, false);
            assert_eq!(estimate(&unknown), estimate(&apartment));
        }
        assert_eq!(FacilityType::from_form_value(""), FacilityType::ApartmentBuilding);
    }

    #[test]
    fn form_values_map_to_facility_types() {
        for facility in FacilityType::ALL {
            assert_eq!(FacilityType::from_form_value(facility.form_value()), facility);
        }
        assert_eq!(FacilityType::from_form_value(" hala "), FacilityType::Warehouse);
    }

    #[test]
    fn surface_parsing_matches_browser_coercion() {
        assert_eq!(parse_surface(""), 0.0);
        assert_eq!(parse_surface("abc"), 0.0);
        assert_eq!(parse_surface("  120"), 120.0);
        assert_eq!(parse_surface("12abc"), 12.0);
        assert_eq!(parse_surface("12.5m2"), 12.5);
        assert_eq!(parse_surface(".5"), 0.5);
        assert_eq!(parse_surface("1e3"), 1000.0);
        assert_eq!(parse_surface("-5"), 0.0);
        assert_eq!(parse_surface("Infinity"), 0.0);
    }

    #[test]
    fn negative_or_non_finite_surfaces_are_treated_as_zero() {
        assert_eq!(annual_price(&input(FacilityType::House, -150.0, false)), 2990);
        assert_eq!(annual_price(&input(FacilityType::House, f64::NAN, false)), 2990);
        assert_eq!(annual_price(&input(FacilityType::House, f64::INFINITY, false)), 2990);
    }

    #[test]
    fn huge_surfaces_saturate_instead_of_overflowing() {
        let result = annual_price(&input(FacilityType::Warehouse, 1e300, true));
        assert!(result > 5490);
    }

    #[test]
    fn huge_surface_factor_saturates() {
        let factor = surface_factor(1e300);
        assert!(factor.is_finite());
        assert_eq!(factor, u64::MAX as f64 / 100.0);
    }

    #[test]
    fn display_text_uses_romanian_grouping() {
        let result = estimate(&input(FacilityType::ApartmentBuilding, 250.0, false));
        assert_eq!(result.formatted_price, "5.786");
        assert_eq!(
            result.display_text,
            "Estimare: ~5.786 lei/an + TVA. Include 1 vizită & raport scurt"
        );
    }

    #[test]
    fn formatter_is_pluggable() {
        let result = estimate_with(&input(FacilityType::House, 50.0, true), &PlainFormatter);
        assert_eq!(result.formatted_price, "4939");
        assert!(result.display_text.contains("~4939 lei/an"));
    }

    #[test]
    fn js_input_shape_is_camel_case_and_lenient() {
        let parsed: PriceEstimateInput = serde_json::from_str(
            r#"{"facilityType":"hala","surfaceSquareMeters":150,"includeInstrumentation":true}"#,
        )
        .unwrap();
        assert_eq!(parsed, input(FacilityType::Warehouse, 150.0, true));

        let parsed: PriceEstimateInput =
            serde_json::from_str(r#"{"facilityType":"castel","surfaceSquareMeters":"250 mp"}"#).unwrap();
        assert_eq!(parsed, input(FacilityType::ApartmentBuilding, 250.0, false));

        let parsed: PriceEstimateInput =
            serde_json::from_str(r#"{"surfaceSquareMeters":null}"#).unwrap();
        assert_eq!(parsed, PriceEstimateInput::default());
    }

    #[test]
    fn wrongly_typed_fields_fall_back_without_dropping_the_rest() {
        let parsed: PriceEstimateInput =
            serde_json::from_str(r#"{"facilityType":null,"surfaceSquareMeters":250}"#).unwrap();
        assert_eq!(parsed, input(FacilityType::ApartmentBuilding, 250.0, false));
        assert_eq!(estimate(&parsed).annual_price_ron, 5786);

        let parsed: PriceEstimateInput = serde_json::from_str(
            r#"{"facilityType":3,"surfaceSquareMeters":250,"includeInstrumentation":true}"#,
        )
        .unwrap();
        assert_eq!(parsed, input(FacilityType::ApartmentBuilding, 250.0, true));

        let parsed: PriceEstimateInput = serde_json::from_str(
            r#"{"facilityType":"casa","surfaceSquareMeters":50,"includeInstrumentation":"yes"}"#,
        )
        .unwrap();
        assert_eq!(parsed, input(FacilityType::House, 50.0, false));
    }

    #[test]
    fn result_serializes_for_javascript() {
        let result = estimate(&input(FacilityType::ApartmentBuilding, 0.0, false));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["annualPriceRon"], 3990);
        assert_eq!(json["formattedPrice"], "3.990");
        assert_eq!(
            serde_json::to_value(FacilityType::OfficeBuilding).unwrap(),
            "birouri"
        );
    }
}
