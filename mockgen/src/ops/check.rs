//! Check operation - model validation summary.

use mockgen_codegen::{GenerateOptions, Generator, Signature, Source};
use mockgen_model::MockToml;

use crate::reports::{CheckReport, InterfaceSummary};

/// Execute the check operation.
///
/// The model is already validated by loading it; this collects what a
/// generation run would produce from it with its `[generate]` settings.
pub fn check(mock_toml: &MockToml) -> CheckReport {
    let package = mock_toml.package();
    let section = mock_toml.generate();

    let mut options = GenerateOptions::for_package(package);
    if let Some(self_package) = &section.self_package {
        options = options.with_self_package(self_package.as_str());
    }
    if let Some(runtime) = &section.runtime {
        options = options.with_runtime_import(runtime.as_str());
    }
    let generator = Generator::new(
        package,
        Source::File(mock_toml.path().display().to_string()),
        options,
    );
    let aliases = generator.aliases();
    let self_package = generator.options().self_package.as_deref();

    let interfaces = package
        .interfaces
        .iter()
        .map(|iface| InterfaceSummary {
            name: iface.name.clone(),
            methods: iface
                .methods
                .iter()
                .map(|method| {
                    let sig = Signature::build(method, &aliases, self_package);
                    format!("{}({}){}", method.name, sig.param_list, sig.return_clause)
                })
                .collect(),
        })
        .collect();

    CheckReport {
        model_path: mock_toml.path().to_path_buf(),
        package_name: package.name.clone(),
        package_path: package.path.clone(),
        interfaces,
        aliases: aliases
            .iter()
            .map(|(path, alias)| (path.to_string(), alias.to_string()))
            .collect(),
    }
}
