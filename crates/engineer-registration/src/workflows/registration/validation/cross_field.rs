use super::{ErrorSet, ValidationErrorKind};
use crate::workflows::registration::domain::FieldValue;

/// Add or clear `PasswordMismatch` on the confirmation field. Other kinds are left alone.
///
/// Returns `true` when the two values differ.
pub(crate) fn apply_password_match(
    password: &FieldValue,
    confirmation: &FieldValue,
    confirmation_errors: &mut ErrorSet,
) -> bool {
    let mismatch = password != confirmation;
    if mismatch {
        confirmation_errors.insert(ValidationErrorKind::PasswordMismatch);
    } else {
        confirmation_errors.remove(ValidationErrorKind::PasswordMismatch);
    }
    mismatch
}
