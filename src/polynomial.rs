//! Dense univariate polynomials with exact integration.
//!
//! Every integrand the engine produces (products of basis functions, their derivatives and
//! polynomial sources pulled back to the reference element) is a polynomial, so all element
//! integrals are evaluated with closed-form antiderivatives instead of quadrature.
use crate::FieldScalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Sub};

/// A polynomial $p(X) = \sum_k c_k X^k$ stored by ascending coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial<T> {
    coefficients: Vec<T>,
}

impl<T: FieldScalar> Polynomial<T> {
    /// Constructs the polynomial with the given ascending coefficients.
    ///
    /// Trailing zero coefficients are removed.
    pub fn from_coefficients(coefficients: Vec<T>) -> Self {
        let mut p = Self { coefficients };
        p.trim();
        p
    }

    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    pub fn constant(c: T) -> Self {
        Self::from_coefficients(vec![c])
    }

    /// The linear polynomial $c_0 + c_1 X$.
    pub fn linear(c0: T, c1: T) -> Self {
        Self::from_coefficients(vec![c0, c1])
    }

    /// The monomial $X^k$.
    pub fn monomial(k: usize) -> Self {
        let mut coefficients = vec![T::zero(); k + 1];
        coefficients[k] = T::one();
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Degree of the polynomial, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    fn trim(&mut self) {
        while let Some(last) = self.coefficients.last() {
            if last.is_zero() {
                self.coefficients.pop();
            } else {
                break;
            }
        }
    }

    /// Evaluates the polynomial with Horner's scheme.
    pub fn evaluate(&self, x: &T) -> T {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, c| acc * x.clone() + c.clone())
    }

    pub fn derivative(&self) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, c)| c.clone() * from_index::<T>(k))
            .collect();
        Self::from_coefficients(coefficients)
    }

    /// The antiderivative vanishing at zero.
    pub fn antiderivative(&self) -> Self {
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(T::zero());
        coefficients.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(k, c)| c.clone() / from_index::<T>(k + 1)),
        );
        Self::from_coefficients(coefficients)
    }

    pub fn scale(&self, factor: &T) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| c.clone() * factor.clone())
            .collect();
        Self::from_coefficients(coefficients)
    }

    /// Returns the polynomial $X \mapsto p(a + b X)$.
    pub fn compose_affine(&self, offset: &T, slope: &T) -> Self {
        let map = Polynomial::linear(offset.clone(), slope.clone());
        self.coefficients
            .iter()
            .rev()
            .fold(Polynomial::zero(), |acc, c| &(&acc * &map) + &Polynomial::constant(c.clone()))
    }

    /// Computes $\int_a^b p(X) \\, \mathrm{d}X$ exactly (up to the arithmetic of `T`).
    pub fn definite_integral(&self, a: &T, b: &T) -> T {
        let antiderivative = self.antiderivative();
        antiderivative.evaluate(b) - antiderivative.evaluate(a)
    }

    /// Computes $\int_{-1}^1 p(X) \\, \mathrm{d}X$ on the reference interval.
    ///
    /// Odd monomials integrate to zero and $X^{2m}$ integrates to $2 / (2m + 1)$.
    pub fn integrate_reference(&self) -> T {
        let two = from_index::<T>(2);
        self.coefficients
            .iter()
            .enumerate()
            .step_by(2)
            .fold(T::zero(), |acc, (k, c)| acc + c.clone() * two.clone() / from_index::<T>(k + 1))
    }

    /// Converts the coefficients to another scalar type.
    ///
    /// Returns `None` if a coefficient cannot be represented in the target type.
    pub fn try_convert<U: FieldScalar>(&self) -> Option<Polynomial<U>> {
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| c.to_f64().and_then(U::from_f64))
            .collect::<Option<Vec<_>>>()?;
        Some(Polynomial::from_coefficients(coefficients))
    }
}

fn from_index<T: FieldScalar>(k: usize) -> T {
    T::from_usize(k).expect("Small integers must be representable by T")
}

impl<'a, 'b, T: FieldScalar> Add<&'b Polynomial<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn add(self, rhs: &'b Polynomial<T>) -> Self::Output {
        let n = self.coefficients.len().max(rhs.coefficients.len());
        let coefficients = (0..n)
            .map(|k| {
                let a = self.coefficients.get(k).cloned().unwrap_or_else(T::zero);
                let b = rhs.coefficients.get(k).cloned().unwrap_or_else(T::zero);
                a + b
            })
            .collect();
        Polynomial::from_coefficients(coefficients)
    }
}

impl<'a, 'b, T: FieldScalar> Sub<&'b Polynomial<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn sub(self, rhs: &'b Polynomial<T>) -> Self::Output {
        self + &rhs.scale(&-T::one())
    }
}

impl<'a, 'b, T: FieldScalar> Mul<&'b Polynomial<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: &'b Polynomial<T>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut coefficients = vec![T::zero(); self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                coefficients[i + j] += a.clone() * b.clone();
            }
        }
        Polynomial::from_coefficients(coefficients)
    }
}

impl<T: FieldScalar> Display for Polynomial<T> {
    /// Formats the polynomial in the reference variable `X`, e.g. `1/2 - 1/2*X`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (k, c) in self.coefficients.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let negative = *c < T::zero();
            let magnitude = c.abs_value();
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
                (true, false) => {}
            }
            let unit = magnitude.is_one();
            match (k, unit) {
                (0, _) => write!(f, "{}", magnitude)?,
                (1, true) => write!(f, "X")?,
                (1, false) => write!(f, "{}*X", magnitude)?,
                (_, true) => write!(f, "X^{}", k)?,
                (_, false) => write!(f, "{}*X^{}", magnitude, k)?,
            }
            first = false;
        }
        Ok(())
    }
}
