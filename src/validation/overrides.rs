//! Discounting validation failures the edit surface is not responsible for
//!
//! Post-derived fields (`post_title`, `post_content`, ...) take their value
//! from the enclosing post and cannot be edited here, so the host's failures
//! on them are cleared. Any other failure still rejects the submission.

use tracing::debug;

use super::result::ValidationResult;
use crate::model::FieldType;

/// Field type marker of post-derived fields
pub const POST_FIELD_MARKER: &str = "post_";

/// Adjusts host validation results for the edit surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOverride {
    excluded_markers: Vec<String>,
}

impl Default for ValidationOverride {
    fn default() -> Self {
        Self {
            excluded_markers: vec![POST_FIELD_MARKER.to_string()],
        }
    }
}

impl ValidationOverride {
    /// Exclude field types containing any of the given markers
    /// (case-insensitive). An empty list excludes nothing.
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excluded_markers(&self) -> &[String] {
        &self.excluded_markers
    }

    pub fn is_excluded(&self, field_type: &FieldType) -> bool {
        self.excluded_markers
            .iter()
            .any(|marker| field_type.matches_marker(marker))
    }

    /// Clear failures on excluded fields and recompute the overall flag
    ///
    /// Accepted results pass through untouched. With no fields there is
    /// nothing to discount, so the overall flag stays as the host set it.
    pub fn apply(&self, mut result: ValidationResult) -> ValidationResult {
        if result.is_valid || result.fields.is_empty() {
            return result;
        }

        for field in result.fields.iter_mut().filter(|f| f.failed) {
            if self.is_excluded(&field.field_type) {
                debug!(
                    field_id = %field.field_id,
                    field_type = %field.field_type,
                    "Ignoring validation failure on non-editable field"
                );
                field.failed = false;
            }
        }

        result.is_valid = !result.has_failures();
        result
    }
}
