//! Built-in object factory for the session script types.

use chrono::NaiveDate;

use crate::domain::error::{ObjregError, ParseError};
use crate::domain::index::RateIndex;
use crate::domain::instrument::{OptionType, VanillaOption};
use crate::domain::object::{Holder, Object};
use crate::domain::registry::Registry;
use crate::domain::script::ObjectSpec;
use crate::domain::tenor::{Tenor, TimeUnit};
use crate::ports::factory_port::ObjectFactory;

/// Standard two-day spot lag for period tenors.
const DEFAULT_FIXING_DAYS: u32 = 2;

pub struct InstrumentFactory;

impl InstrumentFactory {
    pub fn new() -> Self {
        InstrumentFactory
    }

    fn expect_args(spec: &ObjectSpec, count: usize) -> Result<(), ObjregError> {
        if spec.args.len() != count {
            return Err(ObjregError::InvalidSpec {
                type_name: spec.type_name.clone(),
                reason: format!("expected {} arguments, got {}", count, spec.args.len()),
            });
        }
        Ok(())
    }

    /// Map a tenor token to a tenor plus its implied fixing days.
    ///
    /// The money-market forms carry the fixing days themselves: overnight,
    /// tom-next and spot-next are all one-day tenors fixing 0, 1 and 2 days
    /// ahead, and `SW` is the one-week tenor. `1D` does not say which of the
    /// three daily indexes is meant and is rejected.
    fn resolve_tenor(text: &str) -> Result<(Tenor, u32), String> {
        match text.to_ascii_uppercase().as_str() {
            "ON" => Ok((Tenor::new(1, TimeUnit::Days), 0)),
            "TN" => Ok((Tenor::new(1, TimeUnit::Days), 1)),
            "SN" => Ok((Tenor::new(1, TimeUnit::Days), 2)),
            "SW" => Ok((Tenor::new(1, TimeUnit::Weeks), DEFAULT_FIXING_DAYS)),
            "1D" => Err("'1D' is ambiguous: use ON, TN, or SN".to_string()),
            _ => {
                let tenor: Tenor = text.parse().map_err(|e: ParseError| e.message)?;
                Ok((tenor.normalized(), DEFAULT_FIXING_DAYS))
            }
        }
    }

    fn make_index(spec: &ObjectSpec) -> Result<Box<dyn Object>, ObjregError> {
        Self::expect_args(spec, 3)?;
        let (tenor, fixing_days) =
            Self::resolve_tenor(&spec.args[1]).map_err(|reason| ObjregError::InvalidSpec {
                type_name: spec.type_name.clone(),
                reason,
            })?;
        Ok(Box::new(RateIndex::new(
            &spec.args[0],
            tenor,
            fixing_days,
            &spec.args[2],
        )))
    }

    fn make_option(
        registry: &Registry,
        spec: &ObjectSpec,
    ) -> Result<Box<dyn Object>, ObjregError> {
        Self::expect_args(spec, 4)?;
        let option_type: OptionType =
            spec.args[0]
                .parse()
                .map_err(|e: ParseError| ObjregError::InvalidSpec {
                    type_name: spec.type_name.clone(),
                    reason: e.message,
                })?;
        let strike: f64 = spec.args[1].parse().map_err(|_| ObjregError::InvalidSpec {
            type_name: spec.type_name.clone(),
            reason: format!("'{}' is not a valid strike", spec.args[1]),
        })?;
        let expiry = NaiveDate::parse_from_str(&spec.args[2], "%Y-%m-%d").map_err(|_| {
            ObjregError::InvalidSpec {
                type_name: spec.type_name.clone(),
                reason: format!("invalid expiry '{}', expected YYYY-MM-DD", spec.args[2]),
            }
        })?;
        let underlying = registry.retrieve_as::<RateIndex>(&spec.args[3])?;
        Ok(Box::new(VanillaOption::new(
            option_type,
            strike,
            expiry,
            underlying,
        )))
    }

    fn make_quote(spec: &ObjectSpec) -> Result<Box<dyn Object>, ObjregError> {
        Self::expect_args(spec, 1)?;
        let value: f64 = spec.args[0].parse().map_err(|_| ObjregError::InvalidSpec {
            type_name: spec.type_name.clone(),
            reason: format!("'{}' is not a number", spec.args[0]),
        })?;
        Ok(Box::new(Holder::new(value)))
    }
}

impl Default for InstrumentFactory {
    fn default() -> Self {
        InstrumentFactory::new()
    }
}

impl ObjectFactory for InstrumentFactory {
    fn make(
        &self,
        registry: &Registry,
        spec: &ObjectSpec,
    ) -> Result<Box<dyn Object>, ObjregError> {
        match spec.type_name.as_str() {
            "INDEX" => Self::make_index(spec),
            "OPTION" => Self::make_option(registry, spec),
            "QUOTE" => Self::make_quote(spec),
            other => Err(ObjregError::UnknownType {
                type_name: other.to_string(),
            }),
        }
    }

    fn type_names(&self) -> Vec<&'static str> {
        vec![
            "INDEX(family, tenor, currency)",
            "OPTION(CALL|PUT, strike, expiry, underlying)",
            "QUOTE(value)",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(type_name: &str, args: &[&str]) -> ObjectSpec {
        ObjectSpec {
            type_name: type_name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn make(registry: &Registry, s: &ObjectSpec) -> Result<Box<dyn Object>, ObjregError> {
        InstrumentFactory::new().make(registry, s)
    }

    #[test]
    fn index_with_period_tenor_gets_spot_lag() {
        let registry = Registry::new();
        let object = make(&registry, &spec("INDEX", &["Euribor", "6M", "EUR"])).unwrap();
        let index = object.as_any().downcast_ref::<RateIndex>().unwrap();
        assert_eq!(index.tenor(), Tenor::new(6, TimeUnit::Months));
        assert_eq!(index.fixing_days(), 2);
        assert_eq!(index.family(), "Euribor");
        assert_eq!(index.currency(), "EUR");
    }

    #[test]
    fn money_market_tenors_imply_fixing_days() {
        let registry = Registry::new();
        for (token, days) in [("ON", 0), ("TN", 1), ("SN", 2)] {
            let object = make(&registry, &spec("INDEX", &["Euribor", token, "EUR"])).unwrap();
            let index = object.as_any().downcast_ref::<RateIndex>().unwrap();
            assert_eq!(index.tenor(), Tenor::new(1, TimeUnit::Days));
            assert_eq!(index.fixing_days(), days);
        }
    }

    #[test]
    fn spot_week_is_one_week() {
        let registry = Registry::new();
        let object = make(&registry, &spec("INDEX", &["Euribor", "SW", "EUR"])).unwrap();
        let index = object.as_any().downcast_ref::<RateIndex>().unwrap();
        assert_eq!(index.tenor(), Tenor::new(1, TimeUnit::Weeks));
    }

    #[test]
    fn period_tenors_are_normalized() {
        let registry = Registry::new();
        let object = make(&registry, &spec("INDEX", &["Euribor", "24M", "EUR"])).unwrap();
        let index = object.as_any().downcast_ref::<RateIndex>().unwrap();
        assert_eq!(index.tenor(), Tenor::new(2, TimeUnit::Years));
    }

    #[test]
    fn one_day_tenor_is_rejected_as_ambiguous() {
        let registry = Registry::new();
        let err = make(&registry, &spec("INDEX", &["Euribor", "1D", "EUR"])).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
        let lowercase = make(&registry, &spec("INDEX", &["Euribor", "1d", "EUR"])).unwrap_err();
        assert!(lowercase.to_string().contains("ambiguous"));
    }

    #[test]
    fn bad_tenor_is_an_invalid_spec() {
        let registry = Registry::new();
        let err = make(&registry, &spec("INDEX", &["Euribor", "6Q", "EUR"])).unwrap_err();
        assert!(matches!(err, ObjregError::InvalidSpec { .. }));
    }

    #[test]
    fn wrong_argument_count_is_an_invalid_spec() {
        let registry = Registry::new();
        let err = make(&registry, &spec("INDEX", &["Euribor", "6M"])).unwrap_err();
        assert!(matches!(err, ObjregError::InvalidSpec { .. }));
        assert!(err.to_string().contains("expected 3 arguments"));
    }

    #[test]
    fn quote_wraps_a_number() {
        let registry = Registry::new();
        let object = make(&registry, &spec("QUOTE", &["0.05"])).unwrap();
        assert_eq!(object.to_string(), "0.05");
    }

    #[test]
    fn quote_rejects_non_numeric_value() {
        let registry = Registry::new();
        let err = make(&registry, &spec("QUOTE", &["five"])).unwrap_err();
        assert!(matches!(err, ObjregError::InvalidSpec { .. }));
    }

    #[test]
    fn option_resolves_its_underlying_from_the_registry() {
        let mut registry = Registry::new();
        registry.store(
            "Idx",
            RateIndex::new("Euribor", Tenor::new(6, TimeUnit::Months), 2, "EUR"),
        );
        let object = make(
            &registry,
            &spec("OPTION", &["CALL", "1.05", "2025-06-30", "Idx"]),
        )
        .unwrap();
        let option = object.as_any().downcast_ref::<VanillaOption>().unwrap();
        assert_eq!(option.option_type(), OptionType::Call);
        assert_eq!(option.underlying().family(), "Euribor");
    }

    #[test]
    fn option_with_unknown_underlying_fails_with_not_found() {
        let registry = Registry::new();
        let err = make(
            &registry,
            &spec("OPTION", &["CALL", "1.05", "2025-06-30", "Missing"]),
        )
        .unwrap_err();
        assert!(matches!(err, ObjregError::NotFound { .. }));
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn option_on_a_non_index_fails_with_type_mismatch() {
        let mut registry = Registry::new();
        registry.store("Q", Holder::new(1.0));
        let err = make(
            &registry,
            &spec("OPTION", &["CALL", "1.05", "2025-06-30", "Q"]),
        )
        .unwrap_err();
        assert!(matches!(err, ObjregError::TypeMismatch { .. }));
    }

    #[test]
    fn option_rejects_bad_expiry() {
        let mut registry = Registry::new();
        registry.store(
            "Idx",
            RateIndex::new("Euribor", Tenor::new(6, TimeUnit::Months), 2, "EUR"),
        );
        let err = make(
            &registry,
            &spec("OPTION", &["CALL", "1.05", "30/06/2025", "Idx"]),
        )
        .unwrap_err();
        assert!(matches!(err, ObjregError::InvalidSpec { .. }));
    }

    #[test]
    fn unknown_type_is_reported() {
        let registry = Registry::new();
        let err = make(&registry, &spec("SWAPTION", &["1"])).unwrap_err();
        assert!(matches!(err, ObjregError::UnknownType { .. }));
    }

    #[test]
    fn type_names_cover_the_built_ins() {
        let names = InstrumentFactory::new().type_names();
        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("INDEX("));
    }
}
