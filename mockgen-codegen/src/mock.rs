//! Mock type emission.

use mockgen_core::go_quote;
use mockgen_model::{Interface, Method};

use crate::{builder::CodeBuilder, generator::EmitContext};

/// Emit the mock struct, its constructor and one forwarding method per
/// interface method.
pub(crate) fn emit_mock(ctx: &EmitContext<'_>, iface: &Interface, b: &mut CodeBuilder) {
    let mock = (ctx.naming.mock_type)(&iface.name);
    let constructor = (ctx.naming.constructor)(&mock);

    b.push_comment(&format!("Mock of {} interface", iface.name));
    b.push_block(&format!("type {} struct {{", mock), |b| {
        b.push_line("fail func(message string, callerSkip ...int)");
    });
    b.push_blank();

    b.push_block(&format!("func {}() *{} {{", constructor, mock), |b| {
        b.push_line(&format!(
            "return &{}{{fail: {}}}",
            mock,
            ctx.runtime.symbol("GlobalFailHandler")
        ));
    });
    b.push_blank();

    for method in &iface.methods {
        emit_method(ctx, &mock, method, b);
        b.push_blank();
    }
}

fn emit_method(ctx: &EmitContext<'_>, mock: &str, method: &Method, b: &mut CodeBuilder) {
    let sig = ctx.signature(method);
    let header = format!(
        "func (mock *{}) {}({}){} {{",
        mock, method.name, sig.param_list, sig.return_clause
    );

    b.push_block(&header, |b| {
        let mut args = vec![go_quote(&method.name)];
        args.extend(sig.push_forwarded_args(b));
        let invoke = format!(
            "{}(mock).Invoke({})",
            ctx.runtime.symbol("GetGenericMockFrom"),
            args.join(", ")
        );

        if !sig.has_results() {
            b.push_line(&invoke);
            return;
        }

        b.push_line(&format!("result := {}", invoke));
        b.push_block("if len(result) == 0 {", |b| {
            sig.push_zero_return(b);
        });
        b.push_line(&sig.typed_return("result"));
    });
}
