//! Verifier type emission.

use mockgen_core::go_quote;
use mockgen_model::{Interface, Method};

use crate::{builder::CodeBuilder, generator::EmitContext};

/// Emit the verifier struct, the three `VerifyWasCalled*` constructors on
/// the mock and one verification method per interface method.
pub(crate) fn emit_verifier(ctx: &EmitContext<'_>, iface: &Interface, b: &mut CodeBuilder) {
    let mock = (ctx.naming.mock_type)(&iface.name);
    let verifier = (ctx.naming.verifier_type)(&iface.name);
    let matcher = ctx.runtime.symbol("Matcher");
    let in_order = ctx.runtime.symbol("InOrderContext");

    b.push_block(&format!("type {} struct {{", verifier), |b| {
        b.push_line(&format!("mock *{}", mock));
        b.push_line(&format!("invocationCountMatcher {}", matcher));
        b.push_line(&format!("inOrderContext *{}", in_order));
    });
    b.push_blank();

    let constructors = [
        (
            "VerifyWasCalledOnce()".to_string(),
            format!("mock, {}(1), nil", ctx.runtime.symbol("Times")),
        ),
        (
            format!("VerifyWasCalled(invocationCountMatcher {})", matcher),
            "mock, invocationCountMatcher, nil".to_string(),
        ),
        (
            format!(
                "VerifyWasCalledInOrder(invocationCountMatcher {}, inOrderContext *{})",
                matcher, in_order
            ),
            "mock, invocationCountMatcher, inOrderContext".to_string(),
        ),
    ];
    for (signature, fields) in &constructors {
        let header = format!("func (mock *{}) {} *{} {{", mock, signature, verifier);
        b.push_block(&header, |b| {
            b.push_line(&format!("return &{}{{{}}}", verifier, fields));
        });
        b.push_blank();
    }

    for method in &iface.methods {
        emit_method(ctx, &verifier, method, b);
        b.push_blank();
    }
}

fn emit_method(ctx: &EmitContext<'_>, verifier: &str, method: &Method, b: &mut CodeBuilder) {
    let sig = ctx.signature(method);
    let header = format!(
        "func (verifier *{}) {}({}){} {{",
        verifier, method.name, sig.param_list, sig.return_clause
    );

    b.push_block(&header, |b| {
        let mut args = vec![
            "verifier.inOrderContext".to_string(),
            "verifier.invocationCountMatcher".to_string(),
            go_quote(&method.name),
        ];
        args.extend(sig.push_forwarded_args(b));
        b.push_line(&format!(
            "{}(verifier.mock).Verify({})",
            ctx.runtime.symbol("GetGenericMockFrom"),
            args.join(", ")
        ));
        sig.push_zero_return(b);
    });
}
