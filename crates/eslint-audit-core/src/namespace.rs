//! Plugin namespace projection.
//!
//! ESLint plugins are npm packages named with an `eslint-plugin` infix;
//! the rules they export are addressed by a shorter namespace prefix.
//! This module projects between the two spellings:
//!
//! ```text
//! eslint-plugin-import           <->  import
//! @scope/eslint-plugin-widgets   <->  @scope/widgets
//! @scope/eslint-plugin           <->  @scope
//! ```

/// The package-name infix that marks an ESLint plugin.
const PLUGIN_INFIX: &str = "eslint-plugin";

/// Derives the rule-id prefix from a plugin package name.
///
/// Strips a leading `eslint-plugin-` (or a bare `eslint-plugin`),
/// preserving any `@scope/` prefix. Names without the infix pass through
/// unmodified, which makes the projection idempotent; the caller is
/// responsible for valid plugin package names.
#[must_use]
pub fn namespace_prefix(package_name: &str) -> String {
    if let Some(rest) = package_name.strip_prefix('@') {
        match rest.split_once('/') {
            Some((scope, tail)) if tail == PLUGIN_INFIX => format!("@{scope}"),
            Some((scope, tail)) => match tail.strip_prefix("eslint-plugin-") {
                Some(short) => format!("@{scope}/{short}"),
                None => package_name.to_string(),
            },
            None => package_name.to_string(),
        }
    } else if package_name == PLUGIN_INFIX {
        String::new()
    } else {
        package_name
            .strip_prefix("eslint-plugin-")
            .unwrap_or(package_name)
            .to_string()
    }
}

/// Expands a short plugin name (as written in a legacy `plugins` array)
/// to the full package name.
///
/// Names that already carry the `eslint-plugin` infix pass through.
#[must_use]
pub fn plugin_package_name(short_name: &str) -> String {
    if short_name.contains(PLUGIN_INFIX) {
        return short_name.to_string();
    }
    if let Some(rest) = short_name.strip_prefix('@') {
        match rest.split_once('/') {
            Some((scope, tail)) => format!("@{scope}/eslint-plugin-{tail}"),
            None => format!("{short_name}/eslint-plugin"),
        }
    } else {
        format!("eslint-plugin-{short_name}")
    }
}

/// Joins a namespace prefix and a bare rule id into a qualified rule id.
///
/// An empty prefix yields the bare id.
#[must_use]
pub fn qualify(prefix: &str, rule_id: &str) -> String {
    if prefix.is_empty() {
        rule_id.to_string()
    } else {
        format!("{prefix}/{rule_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unscoped_infix() {
        assert_eq!(namespace_prefix("eslint-plugin-plugin"), "plugin");
        assert_eq!(namespace_prefix("eslint-plugin-import"), "import");
    }

    #[test]
    fn bare_unscoped_infix_is_empty() {
        assert_eq!(namespace_prefix("eslint-plugin"), "");
    }

    #[test]
    fn strips_scoped_infix() {
        assert_eq!(
            namespace_prefix("@scope/eslint-plugin-scoped-plugin"),
            "@scope/scoped-plugin"
        );
        assert_eq!(
            namespace_prefix("@scope-with-dash/eslint-plugin-scoped-with-dash-plugin"),
            "@scope-with-dash/scoped-with-dash-plugin"
        );
    }

    #[test]
    fn scope_only_package_keeps_scope() {
        assert_eq!(namespace_prefix("@scope/eslint-plugin"), "@scope");
        assert_eq!(namespace_prefix("@scope-with-dash/eslint-plugin"), "@scope-with-dash");
    }

    #[test]
    fn malformed_names_pass_through() {
        assert_eq!(namespace_prefix("jsonPlugin"), "jsonPlugin");
        assert_eq!(namespace_prefix("@scope"), "@scope");
        assert_eq!(namespace_prefix("@scope/other"), "@scope/other");
    }

    #[test]
    fn projection_is_idempotent() {
        for name in ["plugin", "@scope/scoped-plugin", "@scope", "jsonPlugin"] {
            assert_eq!(namespace_prefix(name), name);
        }
    }

    #[test]
    fn expands_short_names() {
        assert_eq!(plugin_package_name("plugin"), "eslint-plugin-plugin");
        assert_eq!(plugin_package_name("@scope"), "@scope/eslint-plugin");
        assert_eq!(
            plugin_package_name("@scope/scoped-plugin"),
            "@scope/eslint-plugin-scoped-plugin"
        );
    }

    #[test]
    fn expand_keeps_full_names() {
        assert_eq!(plugin_package_name("eslint-plugin-plugin"), "eslint-plugin-plugin");
        assert_eq!(
            plugin_package_name("@scope/eslint-plugin-scoped-plugin"),
            "@scope/eslint-plugin-scoped-plugin"
        );
    }

    #[test]
    fn expand_then_strip_round_trips() {
        for short in ["plugin", "@scope", "@scope/scoped-plugin"] {
            assert_eq!(namespace_prefix(&plugin_package_name(short)), short);
        }
    }

    #[test]
    fn qualify_joins_with_slash() {
        assert_eq!(qualify("plugin", "foo-rule"), "plugin/foo-rule");
        assert_eq!(qualify("@scope", "foo-rule"), "@scope/foo-rule");
        assert_eq!(qualify("", "foo-rule"), "foo-rule");
    }
}
