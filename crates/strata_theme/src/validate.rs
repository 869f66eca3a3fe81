//! Permission validation for theme layers
//!
//! Each variable key a layer attempts to set is checked against the static
//! allow/deny table for the layer's scope. Violating keys are stripped from
//! the layer; the layer itself stays active. Partial application is always
//! preferred over wholesale rejection.

use crate::layer::ThemeLayer;
use crate::scope::{permission_for, scope_definition, ThemePermission, ThemeScope};
use smallvec::SmallVec;

/// Why a variable key was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationReason {
    /// Category is on the scope's forbidden list
    Forbidden,
    /// Category is absent from the scope's allowed list
    NotAllowed,
    /// Key does not classify into any semantic category
    UnrecognizedKey,
}

/// One rejected variable key
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeViolation {
    pub key: String,
    pub permission: Option<ThemePermission>,
    pub reason: ViolationReason,
}

/// Outcome of validating a layer or a proposed change.
///
/// Non-fatal: `valid == false` means at least one key was stripped, not that
/// the layer was rejected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeValidationResult {
    pub valid: bool,
    pub violations: SmallVec<[ThemeViolation; 4]>,
}

impl ThemeValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            violations: SmallVec::new(),
        }
    }
}

fn check_key(scope: ThemeScope, key: &str) -> Result<ThemePermission, ThemeViolation> {
    let def = scope_definition(scope);
    match permission_for(key) {
        None => Err(ThemeViolation {
            key: key.to_string(),
            permission: None,
            reason: ViolationReason::UnrecognizedKey,
        }),
        Some(permission) if def.forbidden.contains(&permission) => Err(ThemeViolation {
            key: key.to_string(),
            permission: Some(permission),
            reason: ViolationReason::Forbidden,
        }),
        Some(permission) if !def.allowed.contains(&permission) => Err(ThemeViolation {
            key: key.to_string(),
            permission: Some(permission),
            reason: ViolationReason::NotAllowed,
        }),
        Some(permission) => Ok(permission),
    }
}

/// Strip violating variable keys from a layer in place.
///
/// Returns the validation result for observability; violations are also
/// logged.
pub fn validate_layer(layer: &mut ThemeLayer) -> ThemeValidationResult {
    let mut violations: SmallVec<[ThemeViolation; 4]> = SmallVec::new();

    layer.variables.retain(|key, _| match check_key(layer.scope, key) {
        Ok(_) => true,
        Err(violation) => {
            violations.push(violation);
            false
        }
    });

    for violation in &violations {
        tracing::warn!(
            layer = %layer.id,
            scope = %layer.scope,
            key = %violation.key,
            reason = ?violation.reason,
            "theme variable stripped"
        );
    }

    ThemeValidationResult {
        valid: violations.is_empty(),
        violations,
    }
}

/// Check a proposed set of permission categories against a scope level
/// without touching any layer.
pub fn validate_theme_change(
    scope: ThemeScope,
    permissions: &[ThemePermission],
) -> ThemeValidationResult {
    let def = scope_definition(scope);
    let mut violations: SmallVec<[ThemeViolation; 4]> = SmallVec::new();

    for &permission in permissions {
        let reason = if def.forbidden.contains(&permission) {
            Some(ViolationReason::Forbidden)
        } else if !def.allowed.contains(&permission) {
            Some(ViolationReason::NotAllowed)
        } else {
            None
        };
        if let Some(reason) = reason {
            violations.push(ThemeViolation {
                key: format!("{permission:?}").to_lowercase(),
                permission: Some(permission),
                reason,
            });
        }
    }

    ThemeValidationResult {
        valid: violations.is_empty(),
        violations,
    }
}
