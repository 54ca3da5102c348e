use crate::error::MathError;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An exact rational number.
///
/// The denominator is always positive and never zero. Fractions are not
/// reduced; equality and ordering compare by cross-multiplication.
#[derive(Clone, Debug)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        let (numerator, denominator) = (numerator.into(), denominator.into());
        if denominator.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self::normalized(numerator, denominator))
    }

    #[inline]
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numerator: value.into(),
            denominator: BigInt::one(),
        }
    }

    #[inline]
    fn normalized(numerator: BigInt, denominator: BigInt) -> Self {
        if denominator.is_negative() {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    #[inline]
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after removing the quotient, over the same denominator.
    pub fn remainder(&self) -> Fraction {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn invert(&self) -> Result<Fraction, MathError> {
        Fraction::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, MathError> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction::from_integer(value)
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // both denominators are positive
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator + &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction {
                numerator: &self.numerator - &other.numerator,
                denominator: self.denominator.clone(),
            };
        }
        Fraction {
            numerator: &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

impl Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        Fraction {
            numerator: &self.numerator * &other.numerator,
            denominator: &self.denominator * &other.denominator,
        }
    }
}

macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<Fraction> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $method(self, other: Fraction) -> Fraction {
                (&self).$method(&other)
            }
        }

        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $method(self, other: &Fraction) -> Fraction {
                (&self).$method(other)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

/// A fraction read as a percentage, e.g. `Percent::new(50, 10_000)` is 0.5%.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        Fraction::new(numerator, denominator).map(Percent)
    }

    #[inline]
    pub fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Percent(fraction)
    }
}

impl Add for &Percent {
    type Output = Percent;

    fn add(self, other: &Percent) -> Percent {
        Percent(&self.0 + &other.0)
    }
}

impl Sub for &Percent {
    type Output = Percent;

    fn sub(self, other: &Percent) -> Percent {
        Percent(&self.0 - &other.0)
    }
}

impl Mul for &Percent {
    type Output = Percent;

    fn mul(self, other: &Percent) -> Percent {
        Percent(&self.0 * &other.0)
    }
}
