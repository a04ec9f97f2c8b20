use crate::error::{BktError, Result};

/// 检查数组是否包含无效值 (NaN 或 Inf)
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// 校验概率值：必须有限且位于 [0, 1]
pub fn ensure_probability(context: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(BktError::validation(context, format!("{value} is not finite")));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(BktError::validation(
            context,
            format!("{value} is outside [0, 1]"),
        ));
    }
    Ok(value)
}

/// 校验有限数值
pub fn ensure_finite(context: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BktError::validation(context, format!("{value} is not finite")))
    }
}

/// 校验非负有限数值
pub fn ensure_non_negative(context: &str, value: f64) -> Result<f64> {
    let value = ensure_finite(context, value)?;
    if value < 0.0 {
        return Err(BktError::validation(context, format!("{value} is negative")));
    }
    Ok(value)
}

/// 判断分母是否退化：恰好为零或非有限值
pub fn is_degenerate_denominator(denominator: f64) -> bool {
    !denominator.is_finite() || denominator == 0.0
}
