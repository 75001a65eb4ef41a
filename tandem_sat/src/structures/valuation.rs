/*!
The value of a variable on a (partial) valuation.

A tagged variant rather than a nullable boolean, so a match on the value of a variable is always exhaustive.
*/

use crate::structures::literal::Lit;

/// The value of a variable: true, false, or not (yet) valued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Value {
    True,
    False,
    #[default]
    Undef,
}

impl Value {
    /// The value with true and false swapped, undefined is fixed.
    #[inline(always)]
    pub fn negated(self) -> Self {
        match self {
            Value::True => Value::False,
            Value::False => Value::True,
            Value::Undef => Value::Undef,
        }
    }

    /// The value a variable must take for `lit` to be true.
    #[inline(always)]
    pub fn satisfying(lit: Lit) -> Self {
        match lit.polarity() {
            true => Value::True,
            false => Value::False,
        }
    }

    /// The value of `lit` given this value of its variable.
    #[inline(always)]
    pub fn under(self, lit: Lit) -> Self {
        match lit.polarity() {
            true => self,
            false => self.negated(),
        }
    }

    /// True exactly when some value has been taken.
    #[inline(always)]
    pub fn is_set(self) -> bool {
        !matches!(self, Value::Undef)
    }
}

impl From<bool> for Value {
    fn from(polarity: bool) -> Self {
        match polarity {
            true => Value::True,
            false => Value::False,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_fixes_undef() {
        assert_eq!(Value::True.negated(), Value::False);
        assert_eq!(Value::Undef.negated(), Value::Undef);
    }

    #[test]
    fn value_under_literal() {
        let p = Lit::positive(0);
        assert_eq!(Value::True.under(p), Value::True);
        assert_eq!(Value::True.under(!p), Value::False);
        assert_eq!(Value::Undef.under(!p), Value::Undef);
    }
}
