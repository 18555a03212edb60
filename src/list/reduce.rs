//! Homogeneous fold reducers over numeric entries.

use crate::error::{Error, Result};
use crate::list::PackList;
use crate::value::Value;

/// Running accumulator: exact integer arithmetic until the first float
/// entry, f64 from then on.
enum Acc {
    Int(i128),
    Flt(f64),
}

impl Acc {
    fn to_float(&self) -> f64 {
        match *self {
            Acc::Int(v) => v as f64,
            Acc::Flt(v) => v,
        }
    }

    fn into_value(self) -> Value<'static> {
        match self {
            Acc::Flt(v) => Value::Float64(v),
            Acc::Int(v) => {
                if v < 0 {
                    match i64::try_from(v) {
                        Ok(n) => Value::Signed(n),
                        Err(_) => Value::Signed128(v),
                    }
                } else {
                    match u64::try_from(v) {
                        Ok(n) => Value::Unsigned(n),
                        Err(_) => Value::Unsigned128(v as u128),
                    }
                }
            }
        }
    }
}

/// Numeric view of one entry.
enum Num {
    Int(i128),
    Flt(f64),
}

fn numeric(v: &Value<'_>) -> Result<Num> {
    match v {
        Value::Signed(n) => Ok(Num::Int(*n as i128)),
        Value::Unsigned(n) => Ok(Num::Int(*n as i128)),
        Value::Signed128(n) => Ok(Num::Int(*n)),
        Value::Unsigned128(n) => {
            i128::try_from(*n).map(Num::Int).map_err(|_| Error::EncodingOverflow)
        }
        Value::Float32(f) => Ok(Num::Flt(*f as f64)),
        Value::Float64(f) => Ok(Num::Flt(*f)),
        _ => Err(Error::BadArgument),
    }
}

impl PackList {
    /// Sum every entry.  All entries must be numeric; integer overflow is
    /// [`Error::EncodingOverflow`], and the first float entry switches the
    /// whole fold to f64.
    pub fn sum(&self) -> Result<Value<'static>> {
        self.fold(Acc::Int(0), |a, b| a.checked_add(b), |a, b| a + b)
    }

    /// Multiply every entry, with the same numeric rules as [`sum`].
    ///
    /// [`sum`]: PackList::sum
    pub fn product(&self) -> Result<Value<'static>> {
        self.fold(Acc::Int(1), |a, b| a.checked_mul(b), |a, b| a * b)
    }

    fn fold(
        &self,
        mut acc: Acc,
        int_op: impl Fn(i128, i128) -> Option<i128>,
        flt_op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value<'static>> {
        let mut pos = self.head();
        while pos < self.end() {
            let v = self.get(pos)?;
            acc = match (acc, numeric(&v)?) {
                (Acc::Int(a), Num::Int(b)) => {
                    Acc::Int(int_op(a, b).ok_or(Error::EncodingOverflow)?)
                }
                (acc, Num::Int(b)) => Acc::Flt(flt_op(acc.to_float(), b as f64)),
                (acc, Num::Flt(b)) => Acc::Flt(flt_op(acc.to_float(), b)),
            };
            pos = self.next(pos).ok_or(Error::Corrupt)?;
        }
        Ok(acc.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Endpoint;

    #[test]
    fn integer_sum_and_product() {
        let mut c = PackList::new();
        for v in [3i64, -1, 10] {
            c.push(&Value::Signed(v), Endpoint::Tail).unwrap();
        }
        assert_eq!(c.sum().unwrap(), Value::Unsigned(12));
        assert_eq!(c.product().unwrap(), Value::Signed(-30));
    }

    #[test]
    fn float_entry_switches_to_f64() {
        let mut c = PackList::new();
        c.push(&Value::Unsigned(2), Endpoint::Tail).unwrap();
        c.push(&Value::Float32(0.5), Endpoint::Tail).unwrap();
        assert_eq!(c.sum().unwrap(), Value::Float64(2.5));
        assert_eq!(c.product().unwrap(), Value::Float64(1.0));
    }

    #[test]
    fn empty_folds_are_identities() {
        let c = PackList::new();
        assert_eq!(c.sum().unwrap(), Value::Unsigned(0));
        assert_eq!(c.product().unwrap(), Value::Unsigned(1));
    }

    #[test]
    fn non_numeric_entries_are_rejected() {
        let mut c = PackList::new();
        c.push(&Value::from(1u64), Endpoint::Tail).unwrap();
        c.push(&Value::from("x"), Endpoint::Tail).unwrap();
        assert_eq!(c.sum().err(), Some(Error::BadArgument));
    }

    #[test]
    fn overflow_is_reported() {
        let mut c = PackList::new();
        c.push(&Value::Signed128(i128::MAX), Endpoint::Tail).unwrap();
        c.push(&Value::Unsigned(1), Endpoint::Tail).unwrap();
        assert_eq!(c.sum().err(), Some(Error::EncodingOverflow));
    }
}
