//! Loaded-file records and the conventions tying uploads to the engine's
//! persistent filesystem.

/// First byte of the base-archive header tag (`IWAD`). Add-on archives
/// (`PWAD`, zips, EPKs) start differently.
pub const IWAD_MAGIC: u8 = b'I';

/// Mount point of the engine's persistent filesystem. The same string
/// names the IndexedDB database backing that mount and the engine's
/// `-home` directory, so the three must never drift apart.
pub const ENGINE_HOME: &str = "/edge-classic";

/// Extensions the file picker accepts, lower-case.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["wad", "zip", "epk", "7z"];

/// One user-supplied or built-in game data file.
///
/// Records with `error` set never enter the active selection; they exist
/// only to carry a per-file failure back to the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedWad {
    pub name: String,
    /// True when this is the base game archive (detected from content,
    /// or declared by convention for built-in catalog entries).
    pub iwad: bool,
    pub error: Option<String>,
}

impl LoadedWad {
    pub fn loaded(name: &str, iwad: bool) -> Self {
        Self {
            name: name.to_string(),
            iwad,
            error: None,
        }
    }

    pub fn failed(name: &str, error: &str) -> Self {
        Self {
            name: name.to_string(),
            iwad: false,
            error: Some(error.to_string()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Base-archive detection: the first byte is compared against the `I` of
/// the `IWAD` magic and nothing else is inspected. A deliberately shallow
/// check; any unrelated file that happens to start with `I` is
/// misclassified.
pub fn is_iwad_bytes(contents: &[u8]) -> bool {
    contents.first() == Some(&IWAD_MAGIC)
}

pub fn has_allowed_extension(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

/// First name, in input order, that fails the extension allow-list.
/// One offender rejects the whole batch before anything is ingested.
pub fn find_unsupported<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().find(|name| !has_allowed_extension(name))
}

/// Key under which a file's bytes are stored in the persistent store.
pub fn stored_path(name: &str) -> String {
    format!("{ENGINE_HOME}/{name}")
}

/// The same file as the engine command line refers to it: no leading
/// slash, resolved by the engine against its filesystem root.
pub fn command_path(name: &str) -> String {
    format!("{}/{name}", ENGINE_HOME.trim_start_matches('/'))
}

/// Batch aggregation rule: an ingest that produced nothing leaves the
/// selection unset, so "has a selection" stays a plain `is_some()` and
/// never an empty-but-present vector.
pub fn selection_from_ingest(wads: Vec<LoadedWad>) -> Option<Vec<LoadedWad>> {
    if wads.is_empty() {
        None
    } else {
        Some(wads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_byte_decides_iwad() {
        assert!(is_iwad_bytes(b"IWAD\x00\x00\x00\x00"));
        assert!(is_iwad_bytes(b"I"));
        // Anything starting with 'I' passes, valid archive or not.
        assert!(is_iwad_bytes(b"Invalid stuff"));

        assert!(!is_iwad_bytes(b"PWAD\x00\x00\x00\x00"));
        assert!(!is_iwad_bytes(b"PK\x03\x04"));
        assert!(!is_iwad_bytes(b""));
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_allowed_extension("doom.wad"));
        assert!(has_allowed_extension("DOOM.WAD"));
        assert!(has_allowed_extension("mod.Epk"));
        assert!(has_allowed_extension("maps.zip"));
        assert!(has_allowed_extension("pack.7z"));

        assert!(!has_allowed_extension("readme.txt"));
        assert!(!has_allowed_extension("noextension"));
        assert!(!has_allowed_extension("archive.wad.bak"));
    }

    #[test]
    fn first_offender_is_reported_in_input_order() {
        assert_eq!(
            find_unsupported(["a.wad", "b.exe", "c.txt"]),
            Some("b.exe")
        );
        assert_eq!(find_unsupported(["a.wad", "b.zip", "c.epk"]), None);

        let empty: [&str; 0] = [];
        assert_eq!(find_unsupported(empty), None);
    }

    #[test]
    fn stored_and_command_paths_share_the_home_root() {
        assert_eq!(stored_path("freedoom2.wad"), "/edge-classic/freedoom2.wad");
        assert_eq!(command_path("freedoom2.wad"), "edge-classic/freedoom2.wad");
        // The command-line form is the stored key minus the leading slash.
        assert_eq!(format!("/{}", command_path("x.wad")), stored_path("x.wad"));
    }

    #[test]
    fn empty_ingest_leaves_selection_unset() {
        assert_eq!(selection_from_ingest(Vec::new()), None);

        let one = vec![LoadedWad::loaded("a.wad", true)];
        assert_eq!(selection_from_ingest(one.clone()), Some(one));
    }

    #[test]
    fn failed_records_carry_their_error() {
        let bad = LoadedWad::failed("b.wad", "Error reading wad");
        assert!(!bad.is_loaded());
        assert_eq!(bad.error.as_deref(), Some("Error reading wad"));

        assert!(LoadedWad::loaded("a.wad", false).is_loaded());
    }
}
