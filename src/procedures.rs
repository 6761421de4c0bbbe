//! Demonstration procedures served by the bundled binary

use serde_json::{json, Value};
use tracing::info;

use crate::rpc::{ProcedureError, ProcedureResult, Registry};

const ADD_OP_PARAMS_ERROR: &str = "Invalid parameters custom error";

pub fn demo_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_zero("hello", hello)
        .register_one("addOp", add_op)
        .register_zero("doSomething", do_something);
    registry
}

fn hello() -> ProcedureResult {
    Ok(json!("Hello world!"))
}

/// Adds the two numbers of a `[a, b]` array.
fn add_op(params: Value) -> ProcedureResult {
    let Some([a, b]) = params.as_array().map(Vec::as_slice) else {
        return Err(ProcedureError::invalid_params(ADD_OP_PARAMS_ERROR));
    };

    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a
            .checked_add(b)
            .map(|sum| json!(sum))
            .ok_or_else(|| ProcedureError::implementation("integer overflow"));
    }

    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => Ok(json!(a + b)),
        _ => Err(ProcedureError::invalid_params(ADD_OP_PARAMS_ERROR)),
    }
}

fn do_something() -> ProcedureResult {
    info!("doSomething invoked");
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::Arity;

    #[test]
    fn registry_exposes_demo_methods() {
        let registry = demo_registry();
        assert_eq!(registry.lookup("hello"), Some(Arity::Zero));
        assert_eq!(registry.lookup("addOp"), Some(Arity::One));
        assert_eq!(registry.lookup("doSomething"), Some(Arity::Zero));
    }

    #[test]
    fn add_op_sums_integers_and_floats() {
        assert_eq!(add_op(json!([43, 21])), Ok(json!(64)));
        assert_eq!(add_op(json!([1.5, 2])), Ok(json!(3.5)));
    }

    #[test]
    fn add_op_rejects_other_shapes() {
        for params in [json!("lalala"), json!([1]), json!([1, 2, 3]), json!(["a", 1])] {
            assert_eq!(
                add_op(params),
                Err(ProcedureError::invalid_params(ADD_OP_PARAMS_ERROR))
            );
        }
    }

    #[test]
    fn add_op_reports_overflow() {
        let err = add_op(json!([i64::MAX, 1])).expect_err("overflow");
        assert!(matches!(err, ProcedureError::Implementation(_)));
    }
}
