//! Model file parsing and lowering into the [`Package`] model.

use std::collections::HashSet;

use super::{InterfaceDecl, MethodDecl, Model, ModelFile, ParamDecl, validate::ParseContext};
use crate::{
    Interface, Method, Package, Parameter, Result, Type, TypeScope, error::SourceContext,
    parse_type,
};

/// Parse a model file from a string (uses "mockgen.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Model> {
    parse_str_with_filename(content, "mockgen.toml")
}

/// Parse a model file from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Model> {
    let source_ctx = SourceContext::new(content, filename);
    let file: ModelFile = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    let ctx = ParseContext::new(content, filename);
    let package = file.lower(&ctx)?;
    tracing::debug!(
        package = %package.name,
        interfaces = package.interfaces.len(),
        "loaded model from {}",
        filename
    );

    Ok(Model {
        package,
        generate: file.generate,
    })
}

impl ModelFile {
    /// Validate the file and build the package model.
    fn lower(&self, ctx: &ParseContext<'_>) -> Result<Package> {
        ctx.validate_name(&self.package.name, "package")?;

        for (qualifier, path) in &self.imports {
            ctx.validate_name(qualifier, "import qualifier")?;
            if path.trim().is_empty() {
                return Err(ctx.source_context().validation_error(
                    format!("import '{}' has an empty path", qualifier),
                    ctx.find_span(qualifier),
                ));
            }
        }

        if let Some(name) = &self.generate.package {
            ctx.validate_name(name, "output package")?;
        }

        let scope = TypeScope {
            imports: &self.imports,
            local_package: self.package.path.as_deref(),
        };

        let mut seen = HashSet::new();
        let mut interfaces = Vec::with_capacity(self.interfaces.len());
        for decl in &self.interfaces {
            if !seen.insert(decl.name.as_str()) {
                return Err(ctx.source_context().validation_error(
                    format!("interface '{}' is declared more than once", decl.name),
                    ctx.find_span(&decl.name),
                ));
            }
            interfaces.push(decl.lower(ctx, scope)?);
        }

        Ok(Package {
            name: self.package.name.clone(),
            path: self.package.path.clone(),
            dot_imports: self.package.dot_imports.clone(),
            interfaces,
        })
    }
}

impl InterfaceDecl {
    fn lower(&self, ctx: &ParseContext<'_>, scope: TypeScope<'_>) -> Result<Interface> {
        ctx.validate_name(&self.name, "interface")?;

        if let Some(embedded) = self.embeds.first() {
            return Err(ctx.source_context().embedded_interface_error(
                &self.name,
                embedded,
                ctx.find_span(embedded),
            ));
        }

        let iface_ctx = ctx.push(&self.name);
        let mut seen = HashSet::new();
        let mut methods = Vec::with_capacity(self.methods.len());
        for decl in &self.methods {
            if !seen.insert(decl.name.as_str()) {
                return Err(ctx.source_context().validation_error(
                    format!(
                        "method '{}' is declared more than once in '{}'",
                        decl.name, self.name
                    ),
                    ctx.find_span(&decl.name),
                ));
            }
            methods.push(decl.lower(&iface_ctx, scope)?);
        }

        Ok(Interface {
            name: self.name.clone(),
            methods,
        })
    }
}

impl MethodDecl {
    fn lower(&self, ctx: &ParseContext<'_>, scope: TypeScope<'_>) -> Result<Method> {
        ctx.validate_name(&self.name, "method")?;

        let method_ctx = ctx.push(&self.name);
        let mut names = HashSet::new();

        for decl in &self.params {
            if let Some(name) = decl.name() {
                method_ctx.validate_input_name(name, "parameter")?;
            }
        }
        if let Some(name) = self.variadic.as_ref().and_then(ParamDecl::name) {
            method_ctx.validate_input_name(name, "variadic parameter")?;
        }

        let params = lower_params(&self.params, &method_ctx, scope, "parameter", &mut names)?;
        let variadic = match &self.variadic {
            Some(decl) => Some(decl.lower(&method_ctx, scope, "variadic parameter", &mut names)?),
            None => None,
        };
        let results = lower_params(&self.results, &method_ctx, scope, "result", &mut names)?;

        Ok(Method {
            name: self.name.clone(),
            params,
            variadic,
            results,
        })
    }
}

fn lower_params<'n>(
    decls: &'n [ParamDecl],
    ctx: &ParseContext<'_>,
    scope: TypeScope<'_>,
    kind: &str,
    names: &mut HashSet<&'n str>,
) -> Result<Vec<Parameter>> {
    decls
        .iter()
        .map(|decl| decl.lower(ctx, scope, kind, names))
        .collect()
}

impl ParamDecl {
    fn lower<'n>(
        &'n self,
        ctx: &ParseContext<'_>,
        scope: TypeScope<'_>,
        kind: &str,
        names: &mut HashSet<&'n str>,
    ) -> Result<Parameter> {
        if let Some(name) = self.name() {
            ctx.validate_name(name, kind)?;
            if name != "_" && !names.insert(name) {
                return Err(ctx.source_context().validation_error(
                    format!("duplicate {} name '{}'", ctx.context_for(kind), name),
                    ctx.find_span(name),
                ));
            }
        }

        let expr = self.type_expr();
        let ty: Type = parse_type(expr, scope).map_err(|e| {
            let span = ctx
                .find_span(expr)
                .map(|s| miette::SourceSpan::from((s.offset() + e.offset.min(expr.len()), 1)));
            ctx.source_context()
                .type_error(expr, ctx.context_for(kind), e.message, span)
        })?;

        Ok(Parameter {
            name: self.name().map(str::to_string),
            ty,
        })
    }
}
