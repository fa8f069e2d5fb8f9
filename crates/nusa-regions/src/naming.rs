use nusa_geo::Feature;
use nusa_geom::Rgb;

/// Base colors, indexed by feature index modulo length.
pub const PALETTE: [Rgb; 34] = [
    Rgb::from_hex(0x3498db),
    Rgb::from_hex(0x2ecc71),
    Rgb::from_hex(0xe74c3c),
    Rgb::from_hex(0xf39c12),
    Rgb::from_hex(0x9b59b6),
    Rgb::from_hex(0x1abc9c),
    Rgb::from_hex(0xe67e22),
    Rgb::from_hex(0x34495e),
    Rgb::from_hex(0x16a085),
    Rgb::from_hex(0x27ae60),
    Rgb::from_hex(0x2980b9),
    Rgb::from_hex(0x8e44ad),
    Rgb::from_hex(0xd35400),
    Rgb::from_hex(0xc0392b),
    Rgb::from_hex(0x16a085),
    Rgb::from_hex(0x2ecc71),
    Rgb::from_hex(0x3498db),
    Rgb::from_hex(0xe74c3c),
    Rgb::from_hex(0xf39c12),
    Rgb::from_hex(0x9b59b6),
    Rgb::from_hex(0x1abc9c),
    Rgb::from_hex(0xe67e22),
    Rgb::from_hex(0x34495e),
    Rgb::from_hex(0x16a085),
    Rgb::from_hex(0x27ae60),
    Rgb::from_hex(0x2980b9),
    Rgb::from_hex(0x8e44ad),
    Rgb::from_hex(0xd35400),
    Rgb::from_hex(0xc0392b),
    Rgb::from_hex(0x16a085),
    Rgb::from_hex(0x2ecc71),
    Rgb::from_hex(0x3498db),
    Rgb::from_hex(0xe74c3c),
    Rgb::from_hex(0xf39c12),
];

#[inline]
pub fn palette_color(feature_index: usize) -> Rgb {
    PALETTE[feature_index % PALETTE.len()]
}

/// Resolves the name shown for a feature. Source properties win unless they
/// are missing or a generic "Province ..." placeholder; then the content
/// table name for that index, then a numbered fallback.
pub fn display_name(feature: &Feature, feature_index: usize, table_name: Option<&str>) -> String {
    match feature.name_property() {
        Some(name) if !name.contains("Province") => name.to_string(),
        _ => match table_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Province {}", feature_index + 1),
        },
    }
}
