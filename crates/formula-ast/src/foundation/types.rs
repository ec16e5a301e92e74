//! The type catalog.
//!
//! Every value flowing through the compiler has exactly one [`DataType`]. The
//! catalog is totally ordered and the order is significant: implicit
//! coercion only ever widens a value towards a greater type, and only inside
//! the numeric chain `Bool < Int < Float < Rgba < Vec3`. Socket types beyond
//! `Vec3` (geometry, strings, data-blocks) only match themselves.
//!
//! # Examples
//!
//! ```
//! # use formula_ast::foundation::DataType;
//! assert!(DataType::Int < DataType::Float);
//! assert!(DataType::Bool.can_coerce_to(DataType::Vec3));
//! assert!(!DataType::Float.can_coerce_to(DataType::Int));
//! assert_eq!(DataType::Int.coercion_cost(DataType::Float), Some(1));
//! assert_eq!(DataType::Geometry.coercion_cost(DataType::Shader), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element of the ordered type catalog.
///
/// # Invariant
///
/// Declaration order is catalog order; `PartialOrd`/`Ord` are derived from it
/// and the coercion rules depend on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DataType {
    /// Placeholder for expressions whose checking failed
    Unknown = 0,
    /// Boolean
    Bool,
    /// Integer
    Int,
    /// Floating-point scalar
    Float,
    /// Color with alpha
    Rgba,
    /// 3D vector
    Vec3,
    /// Geometry set
    Geometry,
    /// String
    String,
    /// Shader closure
    Shader,
    /// Object data-block
    Object,
    /// Image data-block
    Image,
    /// Collection data-block
    Collection,
    /// Texture data-block
    Texture,
    /// Material data-block
    Material,
}

const TYPE_NAMES: &[&str] = &[
    "unknown",
    "bool",
    "int",
    "float",
    "rgba",
    "vec3",
    "geometry",
    "string",
    "shader",
    "object",
    "image",
    "collection",
    "texture",
    "material",
];

impl DataType {
    /// Every catalog entry, in catalog order.
    pub const ALL: [DataType; 14] = [
        DataType::Unknown,
        DataType::Bool,
        DataType::Int,
        DataType::Float,
        DataType::Rgba,
        DataType::Vec3,
        DataType::Geometry,
        DataType::String,
        DataType::Shader,
        DataType::Object,
        DataType::Image,
        DataType::Collection,
        DataType::Texture,
        DataType::Material,
    ];

    /// Position in the catalog.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Lower-case catalog name.
    pub fn name(self) -> &'static str {
        TYPE_NAMES[self as usize]
    }

    /// Look a type up by its catalog name.
    pub fn from_name(name: &str) -> Option<DataType> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Member of the widening chain `Bool..=Vec3`.
    pub fn is_numeric(self) -> bool {
        (DataType::Bool..=DataType::Vec3).contains(&self)
    }

    /// Whether a value of `self` may be used where `to` is expected.
    ///
    /// `Unknown` is compatible with everything so one failure does not
    /// produce follow-up errors.
    pub fn can_coerce_to(self, to: DataType) -> bool {
        if self == to || self == DataType::Unknown || to == DataType::Unknown {
            return true;
        }
        self.is_numeric() && to.is_numeric() && self < to
    }

    /// Number of catalog steps needed to widen `self` into `to`.
    ///
    /// `None` when no implicit coercion exists.
    pub fn coercion_cost(self, to: DataType) -> Option<u32> {
        if self == to {
            return Some(0);
        }
        if !self.can_coerce_to(to) {
            return None;
        }
        Some(u32::from(to.rank().abs_diff(self.rank())))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a list of types as `(int, float)`.
pub fn format_types(types: &[DataType]) -> String {
    let names: Vec<&str> = types.iter().map(|ty| ty.name()).collect();
    format!("({})", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_cover_catalog() {
        assert_eq!(TYPE_NAMES.len(), DataType::ALL.len());
        for ty in DataType::ALL {
            assert_eq!(DataType::from_name(ty.name()), Some(ty));
        }
    }

    #[test]
    fn test_catalog_is_totally_ordered() {
        for pair in DataType::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].rank() + 1, pair[1].rank());
        }
    }

    #[test]
    fn test_widening_only() {
        for from in DataType::ALL {
            for to in DataType::ALL {
                if from.is_numeric() && to.is_numeric() {
                    assert_eq!(from.can_coerce_to(to), from <= to, "{from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_non_numeric_types_only_match_themselves() {
        assert!(DataType::Geometry.can_coerce_to(DataType::Geometry));
        assert!(!DataType::Float.can_coerce_to(DataType::Geometry));
        assert!(!DataType::Geometry.can_coerce_to(DataType::String));
    }

    #[test]
    fn test_coercion_cost_counts_steps() {
        assert_eq!(DataType::Float.coercion_cost(DataType::Float), Some(0));
        assert_eq!(DataType::Bool.coercion_cost(DataType::Float), Some(2));
        assert_eq!(DataType::Int.coercion_cost(DataType::Vec3), Some(3));
        assert_eq!(DataType::Vec3.coercion_cost(DataType::Float), None);
    }

    #[test]
    fn test_unknown_absorbs() {
        assert!(DataType::Unknown.can_coerce_to(DataType::Material));
        assert!(DataType::Geometry.can_coerce_to(DataType::Unknown));
    }

    #[test]
    fn test_format_types() {
        assert_eq!(format_types(&[DataType::Int, DataType::Vec3]), "(int, vec3)");
        assert_eq!(format_types(&[]), "()");
    }
}
