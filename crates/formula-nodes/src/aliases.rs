//! Alias tables: user-facing call names mapped to instance table keys.

/// Call name to instance table key.
pub type AliasTable = &'static [(&'static str, &'static str)];

/// Aliases only meaningful in shader node trees.
pub static SHADER_ALIASES: AliasTable = &[
    ("coords", "tex_coords"),
    ("new_geometry", "geometry"),
];

/// Aliases only meaningful in geometry node trees.
pub static GEOMETRY_ALIASES: AliasTable = &[
    ("pos", "position"),
    ("idx", "index"),
    ("set_pos", "set_position"),
];

/// Aliases shared by shader and geometry node trees.
pub static SHADER_GEO_ALIASES: AliasTable = &[
    ("vec", "combine_xyz"),
    ("vec3", "combine_xyz"),
    ("separate", "separate_xyz"),
    ("minimum", "min"),
    ("maximum", "max"),
    ("power", "pow"),
    ("arctan2", "atan2"),
    ("mad", "multiply_add"),
    ("fraction", "fract"),
];
