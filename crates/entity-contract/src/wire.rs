//! Field-name to wire-key resolution.

/// Static override table of `(field name, wire key)` pairs.
pub type WireKeys = &'static [(&'static str, &'static str)];

/// Wire key for `name`: the table entry when `remap` is on and one exists,
/// `name` itself otherwise.
pub fn wire_key<'a>(keys: &[(&'a str, &'a str)], name: &'a str, remap: bool) -> &'a str {
    if !remap {
        return name;
    }
    keys.iter()
        .find(|(field, _)| *field == name)
        .map_or(name, |(_, wire)| *wire)
}
