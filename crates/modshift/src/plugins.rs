/// Plugin selection per target format
///
/// Each target format maps to a fixed, ordered list of rewrite plugins.
/// Plugins run in sequence; later entries see the output of earlier ones.

use crate::format::ModuleFormat;

/// How default exports are bridged between module systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportInterop {
    /// Never synthesize a default-export interop wrapper.
    None,
    /// Babel-compatible `__esModule` interop.
    Babel,
    /// Node.js semantics: `module.exports` is the default export.
    Node,
}

impl ImportInterop {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportInterop::None => "none",
            ImportInterop::Babel => "babel",
            ImportInterop::Node => "node",
        }
    }
}

/// A rewrite plugin together with its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plugin {
    ModulesAmd { interop: ImportInterop },
    ModulesCommonJs { interop: ImportInterop },
    ModulesSystemJs { interop: ImportInterop },
    /// Keeps `import()` expressions as native syntax.
    DynamicImport,
}

impl Plugin {
    /// Stable identifier, used in logs
    pub fn id(&self) -> &'static str {
        match self {
            Plugin::ModulesAmd { .. } => "transform-modules-amd",
            Plugin::ModulesCommonJs { .. } => "transform-modules-commonjs",
            Plugin::ModulesSystemJs { .. } => "transform-modules-systemjs",
            Plugin::DynamicImport => "syntax-dynamic-import",
        }
    }

    pub fn interop(&self) -> Option<ImportInterop> {
        match self {
            Plugin::ModulesAmd { interop }
            | Plugin::ModulesCommonJs { interop }
            | Plugin::ModulesSystemJs { interop } => Some(*interop),
            Plugin::DynamicImport => None,
        }
    }
}

const AMD: &[Plugin] = &[Plugin::ModulesAmd { interop: ImportInterop::None }];

const COMMONJS: &[Plugin] = &[Plugin::ModulesCommonJs { interop: ImportInterop::None }];

const SYSTEMJS: &[Plugin] = &[
    Plugin::ModulesSystemJs { interop: ImportInterop::None },
    Plugin::DynamicImport,
];

/// Plugins needed to produce `format`.
///
/// ESM needs no rewriting and gets an empty list.
pub fn select_plugins(format: ModuleFormat) -> &'static [Plugin] {
    match format {
        ModuleFormat::Amd => AMD,
        ModuleFormat::CommonJs => COMMONJS,
        ModuleFormat::SystemJs => SYSTEMJS,
        ModuleFormat::Esm => &[],
    }
}

/// Comma-separated plugin ids with their interop mode, for logging
pub fn describe(plugins: &[Plugin]) -> String {
    plugins
        .iter()
        .map(|plugin| match plugin.interop() {
            Some(interop) => format!("{} (interop: {})", plugin.id(), interop.as_str()),
            None => plugin.id().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amd_uses_single_plugin_without_interop() {
        assert_eq!(
            select_plugins(ModuleFormat::Amd),
            &[Plugin::ModulesAmd { interop: ImportInterop::None }]
        );
    }

    #[test]
    fn test_commonjs_uses_single_plugin_without_interop() {
        assert_eq!(
            select_plugins(ModuleFormat::CommonJs),
            &[Plugin::ModulesCommonJs { interop: ImportInterop::None }]
        );
    }

    #[test]
    fn test_systemjs_adds_dynamic_import_after_module_transform() {
        let plugins = select_plugins(ModuleFormat::SystemJs);
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0], Plugin::ModulesSystemJs { interop: ImportInterop::None });
        assert_eq!(plugins[1], Plugin::DynamicImport);
        assert_eq!(plugins[1].interop(), None);
    }

    #[test]
    fn test_esm_has_no_plugins() {
        assert!(select_plugins(ModuleFormat::Esm).is_empty());
    }

    #[test]
    fn test_selection_is_deterministic() {
        for format in ModuleFormat::ALL {
            assert_eq!(select_plugins(format), select_plugins(format));
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(select_plugins(ModuleFormat::SystemJs)),
            "transform-modules-systemjs (interop: none), syntax-dynamic-import"
        );
        assert_eq!(
            describe(&[Plugin::ModulesCommonJs { interop: ImportInterop::Node }]),
            "transform-modules-commonjs (interop: node)"
        );
        assert_eq!(describe(&[]), "");
    }
}
