use std::collections::HashSet;

use anyhow::{bail, Result};
use root_motion::Rig;

/// Rigs picked for an operation, each remembering where it sat in the file.
pub struct Selection {
    pub picked: Vec<(usize, Rig)>,
    pub rest: Vec<(usize, Rig)>,
}

/// An empty `names` list selects every rig. Unknown names are reported and ignored.
pub fn select(rigs: Vec<Rig>, names: &[String]) -> Selection {
    for name in names {
        if !rigs.iter().any(|rig| &rig.name == name) {
            log::warn!("no rig named `{}` in the file", name);
        }
    }
    let (picked, rest) = rigs
        .into_iter()
        .enumerate()
        .partition(|(_, rig)| names.is_empty() || names.contains(&rig.name));
    Selection { picked, rest }
}

/// Puts picked and untouched rigs back into file order.
pub fn merge(picked: Vec<(usize, Rig)>, rest: Vec<(usize, Rig)>) -> Vec<Rig> {
    let mut all: Vec<_> = picked.into_iter().chain(rest).collect();
    all.sort_by_key(|(position, _)| *position);
    all.into_iter().map(|(_, rig)| rig).collect()
}

/// Renames every picked rig. Nothing changes if two rigs would end up sharing a name.
pub fn rename(selection: &mut Selection, apply: impl Fn(&str) -> String) -> Result<()> {
    let renamed: Vec<String> = selection.picked.iter().map(|(_, rig)| apply(&rig.name)).collect();
    {
        let untouched = selection.rest.iter().map(|(_, rig)| rig.name.as_str());
        let mut seen = HashSet::new();
        for name in renamed.iter().map(String::as_str).chain(untouched) {
            if !seen.insert(name) {
                bail!("more than one rig would be named `{}`", name);
            }
        }
    }
    for ((_, rig), name) in selection.picked.iter_mut().zip(renamed) {
        if name != rig.name {
            log::info!("renamed `{}` to `{}`", rig.name, name);
            rig.name = name;
        }
    }
    Ok(())
}
