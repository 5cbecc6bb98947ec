//! Chooser metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test
//! the quick-start and suggested-project inventories on the host.

use edge_launch::args::{DEATHMATCH_IWAD, DEFAULT_IWAD};

/// One-click launch options offered before any file is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickStart {
    Freedoom,
    BotDeathmatch,
    WadFiles,
}

impl QuickStart {
    pub fn label(self) -> &'static str {
        match self {
            QuickStart::Freedoom => "Play Freedoom",
            QuickStart::BotDeathmatch => "Play Bot Death Match",
            QuickStart::WadFiles => "Play Wad, EPK, or Zip files",
        }
    }

    /// Built-in base archive this option launches with; `None` for the
    /// option that opens the file picker instead.
    pub fn iwad(self) -> Option<&'static str> {
        match self {
            QuickStart::Freedoom => Some(DEFAULT_IWAD),
            QuickStart::BotDeathmatch => Some(DEATHMATCH_IWAD),
            QuickStart::WadFiles => None,
        }
    }

    pub fn all() -> &'static [QuickStart] {
        &[
            QuickStart::Freedoom,
            QuickStart::BotDeathmatch,
            QuickStart::WadFiles,
        ]
    }
}

/// Community add-on highlighted next to the chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedProject {
    pub name: &'static str,
    pub image: &'static str,
    pub link: &'static str,
}

pub const SUGGESTED_PROJECTS: &[SuggestedProject] = &[
    SuggestedProject {
        name: "Operation: Arctic Wolf Revisited",
        image: "./assets/images/articwolf.png",
        link: "https://www.moddb.com/mods/edge-classic-add-ons/downloads/arctic-wolf-revisited",
    },
    SuggestedProject {
        name: "Astral Pathfinder",
        image: "./assets/images/astralpathfinder.png",
        link: "https://www.moddb.com/mods/edge-classic-add-ons/downloads/astral-pathfinder1",
    },
    SuggestedProject {
        name: "Aliens: Stranded",
        image: "./assets/images/aliensstranded.png",
        link: "https://www.moddb.com/mods/edge-classic-add-ons/downloads/aliens-stranded",
    },
];

pub const LOGO_IMAGE: &str = "./assets/eclogo.png";
pub const DISCORD_URL: &str = "https://discord.gg/jUhEKHGWZm";
pub const DISCORD_ICON: &str = "./assets/discord-mark-white.svg";
pub const GITHUB_URL: &str = "https://github.com/edge-classic/EDGE-classic";
pub const GITHUB_ICON: &str = "./assets/github-mark-white.svg";

#[cfg(test)]
mod tests {
    use super::*;
    use edge_launch::wad::has_allowed_extension;

    #[test]
    fn quick_start_inventory_is_stable() {
        let all = QuickStart::all();
        assert_eq!(all.len(), 3);

        let mut labels: Vec<&'static str> = all.iter().copied().map(QuickStart::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 3);

        for option in all {
            assert!(!option.label().trim().is_empty());
        }
    }

    #[test]
    fn builtin_quick_starts_name_real_archives() {
        // Exactly one option defers to the file picker.
        let pickers = QuickStart::all()
            .iter()
            .filter(|option| option.iwad().is_none())
            .count();
        assert_eq!(pickers, 1);

        for option in QuickStart::all() {
            if let Some(name) = option.iwad() {
                assert!(has_allowed_extension(name), "{name} fails the allow-list");
            }
        }
    }

    #[test]
    fn suggested_projects_inventory_is_stable() {
        assert_eq!(SUGGESTED_PROJECTS.len(), 3);

        for project in SUGGESTED_PROJECTS {
            assert!(!project.name.trim().is_empty());
            assert!(project.link.starts_with("https://"));
            assert!(project.image.starts_with("./assets/"));
        }
    }

    #[test]
    fn site_links_are_external() {
        assert!(DISCORD_URL.starts_with("https://"));
        assert!(GITHUB_URL.starts_with("https://"));
    }
}
