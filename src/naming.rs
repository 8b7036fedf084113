//! Object-name suffixes that game engine importers interpret as import hints.

/// Suffixes with a known meaning, in the order they are usually offered.
pub const KNOWN_SUFFIXES: [&str; 10] = [
    "-navmesh",
    "-occ",
    "-rigid",
    "-cycle",
    "-vehicle",
    "-wheel",
    "-col",
    "-convcol",
    "-colonly",
    "-convcolonly",
];

/// Appends `suffix` unless the name already contains it anywhere.
pub fn add_suffix(name: &str, suffix: &str) -> String {
    if name.contains(suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// Removes every occurrence of `suffix`, not just a trailing one.
pub fn remove_suffix(name: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return name.to_string();
    }
    name.replace(suffix, "")
}

pub fn suffix_description(suffix: &str) -> &'static str {
    match suffix {
        "-navmesh" => "Suffix '-navmesh' is used for navigation mesh objects.",
        "-occ" => "Suffix '-occ' indicates occlusion objects.",
        "-rigid" => "Suffix '-rigid' is used for rigid body objects.",
        "-cycle" => "Suffix '-cycle' relates to cyclic animations or cycles.",
        "-vehicle" => "Suffix '-vehicle' is designated for vehicle objects.",
        "-wheel" => "Suffix '-wheel' is used for wheel objects.",
        "-col" => "Suffix '-col' marks collision objects.",
        "-convcol" => "Suffix '-convcol' is for convex collision objects.",
        "-colonly" => "Suffix '-colonly' is used for collision-only objects.",
        "-convcolonly" => "Suffix '-convcolonly' is for convex collision-only objects.",
        _ => "No description available for this suffix.",
    }
}
