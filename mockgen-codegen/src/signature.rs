//! Rendered method signatures shared by the mock and verifier emitters.

use mockgen_model::{Method, PackageAliases};

use crate::{builder::CodeBuilder, naming::GO_NAMING};

/// A method signature rendered as Go source fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Each input as `name type`, variadic last as `name ...type`
    pub params: Vec<String>,
    /// Resolved input names, unnamed and blank inputs become `_paramN`
    pub param_names: Vec<String>,
    /// `params` joined with `", "`
    pub param_list: String,
    /// Rendered output types in declaration order
    pub return_types: Vec<String>,
    /// `""`, `" T"` or `" (T1, T2)"`
    pub return_clause: String,
    /// `param_names` joined with `", "`
    pub call_args: String,
    variadic: bool,
}

impl Signature {
    /// Render `method` with types qualified through `aliases`.
    ///
    /// Types belonging to `local_package` are written unqualified.
    pub fn build<A>(method: &Method, aliases: &A, local_package: Option<&str>) -> Self
    where
        A: PackageAliases + ?Sized,
    {
        let mut params = Vec::new();
        let mut param_names = Vec::new();

        let inputs = method
            .params
            .iter()
            .map(|p| (p, false))
            .chain(method.variadic.iter().map(|p| (p, true)));
        for (index, (param, is_variadic)) in inputs.enumerate() {
            let name = match param.name.as_deref() {
                Some(name) if name != "_" => name.to_string(),
                _ => GO_NAMING.synthesized_param(index),
            };
            let ty = param.ty.render(aliases, local_package);
            if is_variadic {
                params.push(format!("{} ...{}", name, ty));
            } else {
                params.push(format!("{} {}", name, ty));
            }
            param_names.push(name);
        }

        let return_types: Vec<String> = method
            .results
            .iter()
            .map(|r| r.ty.render(aliases, local_package))
            .collect();
        let return_clause = match return_types.len() {
            0 => String::new(),
            1 => format!(" {}", return_types[0]),
            _ => format!(" ({})", return_types.join(", ")),
        };

        Self {
            param_list: params.join(", "),
            call_args: param_names.join(", "),
            params,
            param_names,
            return_types,
            return_clause,
            variadic: method.variadic.is_some(),
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn has_results(&self) -> bool {
        !self.return_types.is_empty()
    }

    /// Arguments to pass to a runtime primitive on behalf of this method.
    ///
    /// A variadic tail is flattened into a `_params` slice first, so the
    /// primitive sees every argument individually.
    pub fn push_forwarded_args(&self, b: &mut CodeBuilder) -> Vec<String> {
        let Some((tail, fixed)) = self.param_names.split_last().filter(|_| self.variadic) else {
            return self.param_names.clone();
        };

        b.push_line(&format!("_params := []interface{{}}{{{}}}", fixed.join(", ")));
        b.push_block(&format!("for _, _param := range {} {{", tail), |b| {
            b.push_line("_params = append(_params, _param)");
        });
        vec!["_params...".to_string()]
    }

    /// Declare one zero-valued local per output and return them.
    pub fn push_zero_return(&self, b: &mut CodeBuilder) {
        if !self.has_results() {
            return;
        }
        let mut names = Vec::with_capacity(self.return_types.len());
        for (i, ty) in self.return_types.iter().enumerate() {
            let name = format!("ret{}", i);
            b.push_line(&format!("var {} {}", name, ty));
            names.push(name);
        }
        b.push_line(&format!("return {}", names.join(", ")));
    }

    /// `return result[0].(T0), ...` for a non-empty result slice.
    pub fn typed_return(&self, result: &str) -> String {
        let casts: Vec<String> = self
            .return_types
            .iter()
            .enumerate()
            .map(|(i, ty)| format!("{}[{}].({})", result, i, ty))
            .collect();
        format!("return {}", casts.join(", "))
    }
}
