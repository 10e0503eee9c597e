use thiserror::Error;

/// Errors raised by the fixed-point math layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("tick {0} is outside the supported range")]
    TickOutOfRange(i32),

    #[error("sqrt price {0} is outside the supported range")]
    SqrtPriceOutOfRange(u128),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
}
