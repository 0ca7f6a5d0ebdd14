//! CLDR plural category selection backed by ICU4X compiled data.

use crate::error::{TranslateError, TranslateResult};
use crate::tree::PluralCategory;
use fixed_decimal::Decimal;
use icu_locale_core::Locale;
use icu_plurals::{PluralCategory as IcuPluralCategory, PluralOperands, PluralRuleType, PluralRules};
use serde_json::Value;
use unic_langid::LanguageIdentifier;

/// Which CLDR rule set selects the category.
///
/// The lowercase name doubles as the parameter that carries the count.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PluralKind {
    Cardinal,
    Ordinal,
}

impl PluralKind {
    pub const ALL: [PluralKind; 2] = [PluralKind::Cardinal, PluralKind::Ordinal];

    /// Name of the parameter holding the count.
    pub fn parameter(self) -> &'static str {
        self.into()
    }

    fn rule_type(self) -> PluralRuleType {
        match self {
            PluralKind::Cardinal => PluralRuleType::Cardinal,
            PluralKind::Ordinal => PluralRuleType::Ordinal,
        }
    }
}

impl From<IcuPluralCategory> for PluralCategory {
    fn from(category: IcuPluralCategory) -> Self {
        match category {
            IcuPluralCategory::Zero => PluralCategory::Zero,
            IcuPluralCategory::One => PluralCategory::One,
            IcuPluralCategory::Two => PluralCategory::Two,
            IcuPluralCategory::Few => PluralCategory::Few,
            IcuPluralCategory::Many => PluralCategory::Many,
            IcuPluralCategory::Other => PluralCategory::Other,
        }
    }
}

/// Selects the plural category of `count` under the rules of `language`.
///
/// `count` must be a number or a numeric string; anything else is reported
/// as an invalid value of the `cardinal`/`ordinal` parameter.
pub fn plural_category(
    language: &LanguageIdentifier,
    kind: PluralKind,
    count: &Value,
) -> TranslateResult<PluralCategory> {
    let operands = operands(count).ok_or_else(|| TranslateError::InvalidParameterValue {
        path: kind.parameter().to_string(),
        value: count.clone(),
    })?;

    let rules = plural_rules(language, kind)?;
    let category = PluralCategory::from(rules.category_for(operands));

    tracing::trace!(
        "Selected plural category '{}' for {} {} in '{}'",
        category,
        kind,
        count,
        language
    );
    Ok(category)
}

fn plural_rules(language: &LanguageIdentifier, kind: PluralKind) -> TranslateResult<PluralRules> {
    let locale = language
        .to_string()
        .parse::<Locale>()
        .map_err(|error| TranslateError::PluralRules {
            language: language.clone(),
            reason: error.to_string(),
        })?;

    PluralRules::try_new(locale.into(), kind.rule_type().into()).map_err(|error| {
        TranslateError::PluralRules {
            language: language.clone(),
            reason: error.to_string(),
        }
    })
}

fn operands(count: &Value) -> Option<PluralOperands> {
    match count {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                return Some(n.into());
            }
            if let Some(n) = number.as_i64() {
                return Some(n.unsigned_abs().into());
            }
            number.as_f64().and_then(float_operands)
        },
        Value::String(text) => text.trim().parse::<f64>().ok().and_then(float_operands),
        _ => None,
    }
}

// 2^53, the largest range where every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn float_operands(number: f64) -> Option<PluralOperands> {
    if !number.is_finite() {
        return None;
    }

    let magnitude = number.abs();
    if magnitude.fract() == 0.0 && magnitude <= MAX_EXACT_INTEGER {
        return Some((magnitude as u64).into());
    }

    let decimal = magnitude.to_string().parse::<Decimal>().ok()?;
    Some(PluralOperands::from(&decimal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use unic_langid::langid;

    #[rstest]
    #[case(langid!("en"), PluralKind::Cardinal, json!(1), PluralCategory::One)]
    #[case(langid!("en"), PluralKind::Cardinal, json!(0), PluralCategory::Other)]
    #[case(langid!("en"), PluralKind::Cardinal, json!(5), PluralCategory::Other)]
    #[case(langid!("en"), PluralKind::Cardinal, json!(-1), PluralCategory::One)]
    #[case(langid!("en"), PluralKind::Cardinal, json!(1.5), PluralCategory::Other)]
    #[case(langid!("en"), PluralKind::Cardinal, json!("2.75"), PluralCategory::Other)]
    #[case(langid!("ru"), PluralKind::Cardinal, json!(1.5), PluralCategory::Other)]
    #[case(langid!("en"), PluralKind::Cardinal, json!(" 1 "), PluralCategory::One)]
    #[case(langid!("en"), PluralKind::Ordinal, json!(1), PluralCategory::One)]
    #[case(langid!("en"), PluralKind::Ordinal, json!(22), PluralCategory::Two)]
    #[case(langid!("en"), PluralKind::Ordinal, json!(3), PluralCategory::Few)]
    #[case(langid!("en"), PluralKind::Ordinal, json!(11), PluralCategory::Other)]
    #[case(langid!("ru"), PluralKind::Cardinal, json!(21), PluralCategory::One)]
    #[case(langid!("ru"), PluralKind::Cardinal, json!(3), PluralCategory::Few)]
    #[case(langid!("ru"), PluralKind::Cardinal, json!(5), PluralCategory::Many)]
    #[case(langid!("ar"), PluralKind::Cardinal, json!(0), PluralCategory::Zero)]
    #[case(langid!("ar"), PluralKind::Cardinal, json!(2), PluralCategory::Two)]
    fn selects_cldr_category(
        #[case] language: LanguageIdentifier,
        #[case] kind: PluralKind,
        #[case] count: Value,
        #[case] expected: PluralCategory,
    ) {
        assert_eq!(plural_category(&language, kind, &count).unwrap(), expected);
    }

    #[rstest]
    #[case(json!("many"))]
    #[case(json!(true))]
    #[case(json!([1]))]
    fn non_numeric_count_is_an_invalid_parameter(#[case] count: Value) {
        let error = plural_category(&langid!("en"), PluralKind::Ordinal, &count).unwrap_err();

        assert!(matches!(
            error,
            TranslateError::InvalidParameterValue { ref path, .. } if path == "ordinal"
        ));
    }
}
