use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayment {
    pub confirmed: bool,
    pub amount: Decimal,
    pub currency: String,
}

impl VerifiedPayment {
    pub fn not_confirmed() -> Self {
        Self {
            confirmed: false,
            amount: Decimal::ZERO,
            currency: String::new(),
        }
    }
}
