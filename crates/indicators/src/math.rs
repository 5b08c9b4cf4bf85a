use rust_decimal::Decimal;

/// Newton's method square root for `Decimal`.
///
/// `Decimal` has no built-in sqrt; this converges well within 100
/// iterations for the magnitudes seen in price data. Zero and negative
/// inputs return zero (variances are never negative, so a negative here
/// can only be a rounding artifact).
pub fn sqrt(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let epsilon = Decimal::new(1, 10);
    let mut guess = value / Decimal::TWO;
    if guess.is_zero() {
        guess = value;
    }

    for _ in 0..100 {
        let refined = (guess + value / guess) / Decimal::TWO;
        let step = (refined - guess).abs();
        guess = refined;
        if step < epsilon {
            break;
        }
    }
    guess
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn exact_squares() {
        assert!((sqrt(dec!(4)) - dec!(2)).abs() < dec!(0.000001));
        assert!((sqrt(dec!(144)) - dec!(12)).abs() < dec!(0.000001));
    }

    #[test]
    fn fractional_input() {
        assert!((sqrt(dec!(0.25)) - dec!(0.5)).abs() < dec!(0.000001));
    }

    #[test]
    fn zero_and_negative_are_zero() {
        assert_eq!(sqrt(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(sqrt(dec!(-1)), Decimal::ZERO);
    }
}
