//! Engine command-line assembly.
//!
//! The engine is started once per page load and reads everything from its
//! argument list: home directory, window size, the base archive, add-on
//! files, and gameplay flags. The argument order is part of the contract;
//! `-iwad` comes from the fixed block, `-file` pairs follow it, and the
//! tail is either a quick-start preset or the user's saved override,
//! never both.

use crate::wad::{command_path, LoadedWad, ENGINE_HOME};

/// Built-in base archive used when the selection contains no IWAD.
pub const DEFAULT_IWAD: &str = "freedoom2.wad";

/// Built-in base archive behind the bot-deathmatch quick-start.
pub const DEATHMATCH_IWAD: &str = "freedm.wad";

/// Gameplay flags appended for the bot-deathmatch quick-start. A
/// non-empty custom override replaces these wholesale.
pub const DEATHMATCH_PRESET: [&str; 9] = [
    "-deathmatch",
    "1",
    "-nomonsters",
    "-skill",
    "2",
    "-bots",
    "1",
    "-warp",
    "map03",
];

/// Archives the engine ships its own copy of. They are referenced by bare
/// name; anything else is expected under the uploaded-file path.
fn is_builtin(name: &str) -> bool {
    name == DEFAULT_IWAD || name == DEATHMATCH_IWAD
}

/// Builds the full argument list for one engine launch.
///
/// The base archive is the first record flagged `iwad`, falling back to
/// [`DEFAULT_IWAD`]; every record not flagged `iwad` contributes one
/// `-file` pair. `custom` is the already-normalized override string; when
/// present and non-empty its tokens form the tail of the list and any
/// derived gameplay preset is dropped.
pub fn build_engine_args(
    selection: &[LoadedWad],
    width: u32,
    height: u32,
    custom: Option<&str>,
) -> Vec<String> {
    let primary = selection
        .iter()
        .find(|wad| wad.iwad)
        .map(|wad| wad.name.as_str())
        .unwrap_or(DEFAULT_IWAD);

    let iwad_path = if is_builtin(primary) {
        primary.to_string()
    } else {
        command_path(primary)
    };

    let mut args: Vec<String> = vec![
        "-home".to_string(),
        ENGINE_HOME.to_string(),
        "-windowed".to_string(),
        "-width".to_string(),
        width.to_string(),
        "-height".to_string(),
        height.to_string(),
        "-iwad".to_string(),
        iwad_path,
    ];

    // Extra IWAD-flagged records are skipped entirely; only the first one
    // can be the base archive and they make no sense as `-file` entries.
    for wad in selection.iter().filter(|wad| !wad.iwad) {
        args.push("-file".to_string());
        args.push(command_path(&wad.name));
    }

    match custom.filter(|c| !c.is_empty()) {
        Some(custom) => args.extend(custom.split_whitespace().map(str::to_string)),
        None if primary == DEATHMATCH_IWAD => {
            args.extend(DEATHMATCH_PRESET.iter().map(|flag| flag.to_string()));
        }
        None => {}
    }

    args
}

/// Cleans a raw custom command line for storage and use: surrounding
/// whitespace dropped, newlines flattened to spaces. `None` means "no
/// override".
pub fn normalize_custom_args(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace('\n', " ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// The game menu is opened right after boot unless the command line
/// already warps into a map.
pub fn wants_menu_on_boot(args: &[String]) -> bool {
    !args.iter().any(|arg| arg.starts_with("-warp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_after(args: &[String], flag: &str) -> Option<String> {
        let at = args.iter().position(|arg| arg == flag)?;
        args.get(at + 1).cloned()
    }

    #[test]
    fn default_launch_uses_the_builtin_iwad() {
        let args = build_engine_args(&[], 1280, 720, None);
        assert_eq!(
            args,
            vec![
                "-home",
                "/edge-classic",
                "-windowed",
                "-width",
                "1280",
                "-height",
                "720",
                "-iwad",
                "freedoom2.wad",
            ]
        );
    }

    #[test]
    fn uploaded_primary_is_referenced_through_the_home_dir() {
        let selection = vec![LoadedWad::loaded("x.wad", true)];
        let args = build_engine_args(&selection, 800, 600, None);

        assert_eq!(
            pair_after(&args, "-iwad").as_deref(),
            Some("edge-classic/x.wad")
        );
        assert!(!args.iter().any(|arg| arg == "-file"));
    }

    #[test]
    fn one_file_pair_per_secondary_after_the_iwad_pair() {
        let selection = vec![
            LoadedWad::loaded("a.wad", true),
            LoadedWad::loaded("b.pk3", false),
        ];
        let args = build_engine_args(&selection, 800, 600, None);

        let file_count = args.iter().filter(|arg| *arg == "-file").count();
        assert_eq!(file_count, 1);
        assert_eq!(
            pair_after(&args, "-file").as_deref(),
            Some("edge-classic/b.pk3")
        );

        let iwad_at = args.iter().position(|arg| arg == "-iwad").unwrap();
        let file_at = args.iter().position(|arg| arg == "-file").unwrap();
        assert!(iwad_at < file_at);
    }

    #[test]
    fn secondaries_without_a_primary_fall_back_to_the_default() {
        let selection = vec![LoadedWad::loaded("b.pk3", false)];
        let args = build_engine_args(&selection, 800, 600, None);

        assert_eq!(pair_after(&args, "-iwad").as_deref(), Some("freedoom2.wad"));
        assert_eq!(
            pair_after(&args, "-file").as_deref(),
            Some("edge-classic/b.pk3")
        );
    }

    #[test]
    fn extra_iwad_records_are_skipped() {
        let selection = vec![
            LoadedWad::loaded("a.wad", true),
            LoadedWad::loaded("c.wad", true),
        ];
        let args = build_engine_args(&selection, 800, 600, None);

        assert_eq!(
            pair_after(&args, "-iwad").as_deref(),
            Some("edge-classic/a.wad")
        );
        assert!(!args.iter().any(|arg| arg == "-file"));
    }

    #[test]
    fn deathmatch_builtin_appends_the_preset() {
        let selection = vec![LoadedWad::loaded(DEATHMATCH_IWAD, true)];
        let args = build_engine_args(&selection, 800, 600, None);

        assert_eq!(pair_after(&args, "-iwad").as_deref(), Some("freedm.wad"));
        assert!(args.ends_with(&DEATHMATCH_PRESET.map(String::from)));
    }

    #[test]
    fn custom_override_replaces_the_preset_entirely() {
        let selection = vec![LoadedWad::loaded(DEATHMATCH_IWAD, true)];
        let args = build_engine_args(&selection, 800, 600, Some("-warp map01"));

        assert!(args.iter().any(|arg| arg == "map01"));
        assert!(!args.iter().any(|arg| arg == "-deathmatch"));
        assert!(!args.iter().any(|arg| arg == "-bots"));
    }

    #[test]
    fn custom_tokens_split_on_whitespace_runs() {
        let args = build_engine_args(&[], 800, 600, Some(" -turbo   255  -nomusic "));

        let tail = &args[args.len() - 3..];
        assert_eq!(tail, ["-turbo", "255", "-nomusic"]);
        assert!(!args.iter().any(String::is_empty));
    }

    #[test]
    fn normalize_flattens_newlines_and_drops_empty() {
        assert_eq!(
            normalize_custom_args("  -warp map01\n-nomonsters  ").as_deref(),
            Some("-warp map01 -nomonsters")
        );
        assert_eq!(normalize_custom_args("   "), None);
        assert_eq!(normalize_custom_args(""), None);
    }

    #[test]
    fn menu_opens_unless_the_command_line_warps() {
        let plain = build_engine_args(&[], 800, 600, None);
        assert!(wants_menu_on_boot(&plain));

        let deathmatch = build_engine_args(
            &[LoadedWad::loaded(DEATHMATCH_IWAD, true)],
            800,
            600,
            None,
        );
        assert!(!wants_menu_on_boot(&deathmatch));

        let custom = build_engine_args(&[], 800, 600, Some("-warp map02"));
        assert!(!wants_menu_on_boot(&custom));
    }
}
