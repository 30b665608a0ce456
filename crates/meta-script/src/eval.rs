//! Tree-walking evaluator.

use std::cmp::Ordering;

use serde_json::Value;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ScriptError;
use crate::value::{display, float_value, is_truthy, loose_eq, type_name};
use crate::Bindings;

pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<Value, ScriptError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::List(items) => items
            .iter()
            .map(|item| evaluate(item, bindings))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expr::Ident(name) => bindings
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::UnknownBinding(name.clone())),
        Expr::Member(base, field) => member(evaluate(base, bindings)?, field),
        Expr::Call(name, args) => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, args)
        }
        Expr::Unary(UnaryOp::Not, operand) => {
            Ok(Value::Bool(!is_truthy(&evaluate(operand, bindings)?)))
        }
        Expr::Unary(UnaryOp::Neg, operand) => negate(evaluate(operand, bindings)?),
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            if !is_truthy(&evaluate(lhs, bindings)?) {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(is_truthy(&evaluate(rhs, bindings)?)))
        }
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            if is_truthy(&evaluate(lhs, bindings)?) {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(is_truthy(&evaluate(rhs, bindings)?)))
        }
        Expr::Binary(op, lhs, rhs) => {
            let left = evaluate(lhs, bindings)?;
            let right = evaluate(rhs, bindings)?;
            binary(*op, left, right)
        }
    }
}

fn member(base: Value, field: &str) -> Result<Value, ScriptError> {
    match base {
        Value::Object(mut map) => Ok(map.remove(field).unwrap_or(Value::Null)),
        Value::Null => Err(ScriptError::NullMember(field.to_string())),
        other => Err(ScriptError::TypeMismatch(format!(
            "cannot read '{}' of {}",
            field,
            type_name(&other)
        ))),
    }
}

fn negate(value: Value) -> Result<Value, ScriptError> {
    match &value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i
                .checked_neg()
                .map(|v| Value::Number(v.into()))
                .ok_or(ScriptError::NumberOutOfRange),
            None => float_value(-n.as_f64().unwrap_or_default()),
        },
        other => Err(ScriptError::TypeMismatch(format!(
            "cannot negate {}",
            type_name(other)
        ))),
    }
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ScriptError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(loose_eq(&left, &right))),
        BinaryOp::Ne => Ok(Value::Bool(!loose_eq(&left, &right))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(op, &left, &right)?;
            let result = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::In => contains(&right, &left).map(Value::Bool),
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            arithmetic(op, &left, &right)
        }
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators are handled in evaluate"),
    }
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> ScriptError {
    ScriptError::TypeMismatch(format!(
        "{} {} {}",
        type_name(left),
        op.symbol(),
        type_name(right)
    ))
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, ScriptError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
            a.partial_cmp(&b).ok_or_else(|| mismatch(op, left, right))
        }
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => Err(mismatch(op, left, right)),
    }
}

fn contains(haystack: &Value, needle: &Value) -> Result<bool, ScriptError> {
    match (haystack, needle) {
        (Value::Null, _) => Ok(false),
        (Value::Array(items), _) => Ok(items.iter().any(|item| loose_eq(item, needle))),
        (Value::String(s), Value::String(part)) => Ok(s.contains(part.as_str())),
        (Value::Object(map), Value::String(key)) => Ok(map.contains_key(key)),
        _ => Err(mismatch(BinaryOp::In, needle, haystack)),
    }
}

fn add(left: Value, right: Value) -> Result<Value, ScriptError> {
    match (left, right) {
        (Value::String(a), right) => Ok(Value::String(a + &display(&right))),
        (left, Value::String(b)) => Ok(Value::String(display(&left) + &b)),
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Ok(Value::Array(a))
        }
        (left, right) => arithmetic(BinaryOp::Add, &left, &right),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ScriptError> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(mismatch(op, left, right));
    };

    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        let exact = match op {
            BinaryOp::Add => x.checked_add(y),
            BinaryOp::Sub => x.checked_sub(y),
            BinaryOp::Mul => x.checked_mul(y),
            BinaryOp::Div | BinaryOp::Rem if y == 0 => return Err(ScriptError::DivisionByZero),
            BinaryOp::Div if x.checked_rem(y) == Some(0) => x.checked_div(y),
            BinaryOp::Div => None,
            BinaryOp::Rem => x.checked_rem(y),
            _ => None,
        };
        if let Some(v) = exact {
            return Ok(Value::Number(v.into()));
        }
        if op != BinaryOp::Div {
            return Err(ScriptError::NumberOutOfRange);
        }
    }

    let (x, y) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
    let result = match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div | BinaryOp::Rem if y == 0.0 => return Err(ScriptError::DivisionByZero),
        BinaryOp::Div => x / y,
        BinaryOp::Rem => x % y,
        _ => return Err(mismatch(op, left, right)),
    };
    float_value(result)
}

fn arity(name: &str, args: &[Value], expected: usize) -> Result<(), ScriptError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::Arity {
            function: name.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn call(name: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
    match name {
        "empty" => {
            arity(name, &args, 1)?;
            Ok(Value::Bool(is_empty(&args[0])))
        }
        "notEmpty" => {
            arity(name, &args, 1)?;
            Ok(Value::Bool(!is_empty(&args[0])))
        }
        "size" => {
            arity(name, &args, 1)?;
            let size = match &args[0] {
                Value::Null => 0,
                Value::String(s) => s.chars().count(),
                Value::Array(items) => items.len(),
                Value::Object(map) => map.len(),
                other => {
                    return Err(ScriptError::TypeMismatch(format!(
                        "size of {}",
                        type_name(other)
                    )))
                }
            };
            Ok(Value::Number((size as u64).into()))
        }
        "contains" => {
            arity(name, &args, 2)?;
            contains(&args[0], &args[1]).map(Value::Bool)
        }
        "lower" | "upper" => {
            arity(name, &args, 1)?;
            match &args[0] {
                Value::Null => Ok(Value::Null),
                Value::String(s) if name == "lower" => Ok(Value::String(s.to_lowercase())),
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                other => Err(ScriptError::TypeMismatch(format!(
                    "{} of {}",
                    name,
                    type_name(other)
                ))),
            }
        }
        _ => Err(ScriptError::UnknownFunction(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use serde_json::json;

    fn eval(src: &str) -> Result<Value, ScriptError> {
        let bindings = json!({
            "amount": 150,
            "rate": 0.5,
            "name": "Invoice",
            "lines": [1, 2, 3],
            "__user__": {"code": "demo", "group": null, "roles": ["sales"]},
        });
        let Value::Object(bindings) = bindings else { unreachable!() };
        evaluate(&parse(src)?, &bindings)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("amount * 2 + 1").unwrap(), json!(301));
        assert_eq!(eval("7 / 2").unwrap(), json!(3.5));
        assert_eq!(eval("6 / 2").unwrap(), json!(3));
        assert_eq!(eval("amount * rate").unwrap(), json!(75.0));
        assert_eq!(eval("-amount").unwrap(), json!(-150));
        assert_eq!(eval("7 % 4").unwrap(), json!(3));
    }

    #[test]
    fn test_overflowing_division_falls_back() {
        let quotient = eval("(-9223372036854775807 - 1) / -1").unwrap();
        assert_eq!(quotient.as_f64(), Some(9_223_372_036_854_775_808.0));
        assert_eq!(
            eval("(-9223372036854775807 - 1) % -1").unwrap_err(),
            ScriptError::NumberOutOfRange
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1 / 0").unwrap_err(), ScriptError::DivisionByZero);
    }

    #[test]
    fn test_comparison_and_logic() {
        assert_eq!(eval("amount > 100 && name == 'Invoice'").unwrap(), json!(true));
        assert_eq!(eval("amount <= 100 or not lines").unwrap(), json!(false));
        assert_eq!(eval("'a' < 'b'").unwrap(), json!(true));
        assert_eq!(eval("1 == 1.0").unwrap(), json!(true));
    }

    #[test]
    fn test_short_circuit_skips_unknown_binding() {
        assert_eq!(eval("false && missing").unwrap(), json!(false));
        assert_eq!(eval("true || missing").unwrap(), json!(true));
    }

    #[test]
    fn test_membership() {
        assert_eq!(eval("2 in lines").unwrap(), json!(true));
        assert_eq!(eval("'sales' in __user__.roles").unwrap(), json!(true));
        assert_eq!(eval("'voice' in name").unwrap(), json!(true));
        assert_eq!(eval("'code' in __user__").unwrap(), json!(true));
    }

    #[test]
    fn test_member_access() {
        assert_eq!(eval("__user__.code").unwrap(), json!("demo"));
        assert_eq!(eval("__user__.missing").unwrap(), Value::Null);
        assert_eq!(
            eval("__user__.group.code").unwrap_err(),
            ScriptError::NullMember("code".into())
        );
    }

    #[test]
    fn test_string_concat() {
        assert_eq!(eval("name + ' #' + amount").unwrap(), json!("Invoice #150"));
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("size(lines)").unwrap(), json!(3));
        assert_eq!(eval("empty(__user__.group)").unwrap(), json!(true));
        assert_eq!(eval("notEmpty(name)").unwrap(), json!(true));
        assert_eq!(eval("upper(name)").unwrap(), json!("INVOICE"));
        assert_eq!(eval("contains(lines, 4)").unwrap(), json!(false));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            eval("unknown == 1").unwrap_err(),
            ScriptError::UnknownBinding("unknown".into())
        );
        assert_eq!(
            eval("frobnicate(1)").unwrap_err(),
            ScriptError::UnknownFunction("frobnicate".into())
        );
        assert!(matches!(
            eval("size(1, 2)").unwrap_err(),
            ScriptError::Arity { expected: 1, found: 2, .. }
        ));
        assert!(matches!(
            eval("lines < 3").unwrap_err(),
            ScriptError::TypeMismatch(_)
        ));
    }
}
