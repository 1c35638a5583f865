//! 數值換算工具
//!
//! 時間、產能與數量使用 `f64`；金額使用 `Decimal`。

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{Result, TocError};

/// 剩餘產能可容納的整數單位數（向下取整，不小於零）
///
/// `per_unit` 必須為正數；呼叫端負責排除零耗用。
/// 回傳值保證 `units * per_unit <= remaining`，扣減後剩餘產能不會為負。
pub fn units_within(remaining: f64, per_unit: f64) -> f64 {
    let mut units = (remaining / per_unit).floor().max(0.0);
    // 商向上捨入時，floor 可能多出一單位
    while units > 0.0 && units * per_unit > remaining {
        units -= 1.0;
    }
    units
}

/// 數量轉換為 Decimal，用於金額乘法
pub fn units_to_decimal(units: f64) -> Result<Decimal> {
    Decimal::try_from(units)
        .map_err(|e| TocError::CalculationError(format!("數量 {} 無法轉換為 Decimal: {}", units, e)))
}

/// Decimal 轉換為 f64，用於比率計算
pub fn decimal_to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| TocError::CalculationError(format!("金額 {} 無法轉換為 f64", value)))
}
