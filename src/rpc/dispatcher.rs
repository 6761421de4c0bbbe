//! Invokes bound procedures for validated calls

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{info, warn};

use crate::rpc::error::{ErrorKind, ErrorObject};
use crate::rpc::registry::{Procedure, Registry};
use crate::rpc::validator::ValidatedCall;

pub type DispatchOutcome = Result<Value, ErrorObject>;

/// Runs the procedure bound to `call.method`.
///
/// Procedure errors map onto their protocol kinds. A panicking procedure is
/// reported as an internal error instead of unwinding into the caller.
pub fn dispatch(registry: &Registry, call: ValidatedCall) -> DispatchOutcome {
    let ValidatedCall { method, params, id } = call;

    let outcome = match (registry.get(&method), params) {
        (Some(procedure), params) => invoke(procedure, params),
        (None, _) => Err(ErrorObject::from_kind(ErrorKind::MethodNotFound)),
    };

    info!(
        method = %method,
        notification = id.is_notification(),
        outcome = match &outcome {
            Ok(_) => "success",
            Err(_) => "failure",
        },
        code = ?outcome.as_ref().err().map(|error| error.code),
        "rpc call dispatched"
    );

    outcome
}

fn invoke(procedure: &Procedure, params: Option<Value>) -> DispatchOutcome {
    let call = AssertUnwindSafe(|| match (procedure, params) {
        (Procedure::Zero(f), None) => Some(f()),
        (Procedure::One(f), Some(value)) => Some(f(value)),
        _ => None,
    });

    match panic::catch_unwind(call) {
        Ok(Some(Ok(value))) => Ok(value),
        Ok(Some(Err(err))) => Err(err.to_error_object()),
        Ok(None) => Err(ErrorObject::from_kind(ErrorKind::InvalidParams)),
        Err(payload) => {
            warn!(panic = panic_message(payload.as_ref()), "procedure panicked");
            Err(ErrorObject::from_kind(ErrorKind::InternalError))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::error::ProcedureError;
    use crate::rpc::types::{EntryId, RequestId};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_zero("hello", || Ok(json!("Hello world!")))
            .register_one("double", |value| {
                let n = value
                    .as_i64()
                    .ok_or_else(|| ProcedureError::invalid_params("expected an integer"))?;
                Ok(json!(n * 2))
            })
            .register_zero("broken", || Err(ProcedureError::implementation("not wired up")))
            .register_zero("flaky", || Err(ProcedureError::internal("backend gone")))
            .register_zero("explode", || panic!("boom"));
        registry
    }

    fn call(method: &str, params: Option<Value>) -> ValidatedCall {
        ValidatedCall {
            method: method.to_string(),
            params,
            id: EntryId::Present(RequestId::Number(1)),
        }
    }

    #[test]
    fn zero_arity_procedure_gets_no_argument() {
        assert_eq!(
            dispatch(&registry(), call("hello", None)),
            Ok(json!("Hello world!"))
        );
    }

    #[test]
    fn one_arity_procedure_gets_its_argument() {
        assert_eq!(dispatch(&registry(), call("double", Some(json!(21)))), Ok(json!(42)));
    }

    #[test]
    fn invalid_params_error_keeps_procedure_message() {
        let err = dispatch(&registry(), call("double", Some(json!("x"))))
            .expect_err("string is rejected");
        assert_eq!(err.code, -32602);
        assert_eq!(err.message, "expected an integer");
    }

    #[test]
    fn implementation_error_maps_to_its_code() {
        let err = dispatch(&registry(), call("broken", None)).expect_err("broken fails");
        assert_eq!(err.code, -32001);
        assert_eq!(err.message, "not wired up");
    }

    #[test]
    fn other_failures_become_internal_errors() {
        let err = dispatch(&registry(), call("flaky", None)).expect_err("flaky fails");
        assert_eq!(err.code, -32603);

        let err = dispatch(&registry(), call("explode", None)).expect_err("panic is caught");
        assert_eq!(err.code, -32603);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn panic_message_is_recovered_from_payload() {
        let literal = panic::catch_unwind(|| panic!("boom")).expect_err("panics");
        assert_eq!(panic_message(literal.as_ref()), "boom");

        let formatted = panic::catch_unwind(|| panic!("bad input {}", 7)).expect_err("panics");
        assert_eq!(panic_message(formatted.as_ref()), "bad input 7");

        let other = panic::catch_unwind(|| panic::panic_any(42_u8)).expect_err("panics");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn unbound_method_is_method_not_found() {
        let err = dispatch(&registry(), call("missing", None)).expect_err("not bound");
        assert_eq!(err.code, -32601);
    }
}
