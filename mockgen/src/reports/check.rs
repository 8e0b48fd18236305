//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from model validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the model file.
    pub model_path: PathBuf,
    pub package_name: String,
    pub package_path: Option<String>,
    pub interfaces: Vec<InterfaceSummary>,
    /// Resolved `(import path, alias)` pairs, sorted by path.
    pub aliases: Vec<(String, String)>,
}

/// An interface and its rendered method signatures.
#[derive(Debug)]
pub struct InterfaceSummary {
    pub name: String,
    pub methods: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.model_path.display()));
        out.newline();

        match &self.package_path {
            Some(path) => out.key_value("Package", &format!("{} ({})", self.package_name, path)),
            None => out.key_value("Package", &self.package_name),
        }
        out.newline();

        let count = self.interfaces.len();
        out.section(&format!(
            "{} interface{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for iface in &self.interfaces {
            out.list_item(&iface.name);
            for method in &iface.methods {
                out.nested_item(method);
            }
        }

        if !self.aliases.is_empty() {
            out.newline();
            out.section("Imports");
            for (path, alias) in &self.aliases {
                out.key_value_indented(alias, path);
            }
        }
    }
}
