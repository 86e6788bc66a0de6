//! A totally ordered domain extended with abstract infinities.
//!
//! Search folds its child values starting from `NegInf`/`PosInf` instead
//! of sentinel integers, so "no child seen yet" and "unbounded" are
//! representable without `i32::MIN`-style hacks.

use std::ops::Neg;

/// `NegInf < Value(a) < PosInf` for every `a`; `Value` compares by `T`.
///
/// The variant declaration order is load-bearing: the derived `Ord` is the
/// total order search relies on, and `max`/`min`/comparison operators all
/// come from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extended<T> {
    NegInf,
    Value(T),
    PosInf,
}

impl<T> Extended<T> {
    /// The finite payload, if this is a `Value`.
    pub fn value(self) -> Option<T> {
        match self {
            Extended::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Extended::Value(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Extended<U> {
        match self {
            Extended::NegInf => Extended::NegInf,
            Extended::Value(v) => Extended::Value(f(v)),
            Extended::PosInf => Extended::PosInf,
        }
    }
}

impl<T: Default + Ord> Extended<T> {
    pub fn is_positive(&self) -> bool {
        match self {
            Extended::NegInf => false,
            Extended::Value(v) => *v > T::default(),
            Extended::PosInf => true,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Extended::NegInf => true,
            Extended::Value(v) => *v < T::default(),
            Extended::PosInf => false,
        }
    }

    /// Only a finite value can be zero; infinities never are.
    pub fn is_zero(&self) -> bool {
        matches!(self, Extended::Value(v) if *v == T::default())
    }
}

impl<T: Neg<Output = T>> Neg for Extended<T> {
    type Output = Extended<T>;

    /// Swaps the infinities and negates a finite value. Its own inverse.
    fn neg(self) -> Extended<T> {
        match self {
            Extended::NegInf => Extended::PosInf,
            Extended::Value(v) => Extended::Value(-v),
            Extended::PosInf => Extended::NegInf,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Extended<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extended::NegInf => write!(f, "-inf"),
            Extended::Value(v) => write!(f, "{v}"),
            Extended::PosInf => write!(f, "+inf"),
        }
    }
}

#[cfg(test)]
#[path = "extended_tests.rs"]
mod extended_tests;
