//! Built-in catalog and presets shipped with deskforge.

use super::registry::Catalog;
use super::types::{Configurable, DropdownOption, NodeDef};
use crate::Result;

/// Id of the built-in catalog root
pub const ROOT_ID: &str = "root";

/// Nested definition of the built-in catalog
pub fn builtin_def() -> NodeDef {
    NodeDef::category(
        ROOT_ID,
        "Desktop setup",
        vec![
            NodeDef::category(
                "system",
                "System tuning",
                vec![
                    NodeDef::leaf("zram", "zram swap", "Compressed swap in RAM").selected(),
                    NodeDef::leaf("fstrim", "Periodic TRIM", "Weekly fstrim timer").selected(),
                    NodeDef::leaf("swappiness", "Swappiness", "vm.swappiness kernel setting")
                        .with_configurable(Configurable::slider(0, 100, None, 10)),
                    NodeDef::leaf("cpu-governor", "CPU governor", "Default cpufreq governor")
                        .with_configurable(Configurable::dropdown(
                            vec![
                                DropdownOption::new("schedutil", "schedutil"),
                                DropdownOption::new("performance", "performance"),
                                DropdownOption::new("powersave", "powersave"),
                            ],
                            "schedutil",
                        )),
                ],
            ),
            NodeDef::category(
                "fonts",
                "Fonts",
                vec![
                    NodeDef::leaf("noto", "Noto", "Noto font family"),
                    NodeDef::leaf("roboto", "Roboto", "Roboto font family"),
                    NodeDef::leaf("nf-jetbrains", "JetBrains Mono Nerd Font", "Patched JetBrains Mono"),
                    NodeDef::leaf("nf-firacode", "FiraCode Nerd Font", "Patched Fira Code"),
                ],
            ),
            NodeDef::category(
                "appearance",
                "Appearance",
                vec![
                    NodeDef::leaf("font-monospace", "Monospace font", "Terminal and editor font")
                        .with_configurable(Configurable::dropdown(
                            vec![
                                DropdownOption::new("dejavu-sans-mono", "DejaVu Sans Mono"),
                                DropdownOption::requiring(
                                    "jetbrains-mono-nerd",
                                    "JetBrainsMono Nerd Font",
                                    "nf-jetbrains",
                                ),
                                DropdownOption::requiring(
                                    "fira-code-nerd",
                                    "FiraCode Nerd Font",
                                    "nf-firacode",
                                ),
                            ],
                            "dejavu-sans-mono",
                        )),
                    NodeDef::leaf("font-size", "Font size", "Default monospace font size")
                        .with_configurable(Configurable::slider(8, 24, Some("pt"), 11)),
                    NodeDef::leaf("dark-theme", "Dark theme", "Prefer dark GTK/Qt themes"),
                ],
            ),
            NodeDef::category(
                "development",
                "Development",
                vec![
                    NodeDef::category(
                        "editors",
                        "Editors",
                        vec![
                            NodeDef::leaf("neovim", "Neovim", "Terminal editor"),
                            NodeDef::leaf("vscode", "VS Code", "Graphical editor"),
                            NodeDef::leaf("helix", "Helix", "Modal terminal editor"),
                        ],
                    ),
                    NodeDef::category(
                        "languages",
                        "Languages",
                        vec![
                            NodeDef::leaf("rust", "Rust", "rustup toolchain"),
                            NodeDef::leaf("python", "Python", "Python 3 with pip"),
                            NodeDef::leaf("nodejs", "Node.js", "Node LTS with npm"),
                            NodeDef::leaf("go", "Go", "Go toolchain"),
                        ],
                    ),
                    NodeDef::leaf("git", "Git", "Version control").selected(),
                    NodeDef::leaf("docker", "Docker", "Container runtime"),
                ],
            ),
            NodeDef::category(
                "browsers",
                "Browsers",
                vec![
                    NodeDef::leaf("firefox", "Firefox", "Mozilla Firefox").selected(),
                    NodeDef::leaf("chromium", "Chromium", "Open-source Chrome"),
                ],
            ),
            NodeDef::category(
                "media",
                "Media",
                vec![
                    NodeDef::leaf("mpv", "mpv", "Video player"),
                    NodeDef::leaf("vlc", "VLC", "Video player"),
                    NodeDef::leaf("gimp", "GIMP", "Image editor"),
                    NodeDef::leaf("obs", "OBS Studio", "Screen recording"),
                ],
            ),
        ],
    )
}

/// Build the built-in catalog
pub fn builtin_catalog() -> Result<Catalog> {
    Catalog::from_def(builtin_def())
}

/// A named, read-only starting point copied into the store's templates
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [&'static str],
    pub values: &'static [(&'static str, &'static str)],
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "minimal",
        description: "Base system tuning and a browser",
        items: &["zram", "fstrim", "git", "firefox"],
        values: &[],
    },
    Preset {
        name: "developer",
        description: "Editors, toolchains and a nerd font",
        items: &[
            "zram",
            "fstrim",
            "nf-jetbrains",
            "dark-theme",
            "neovim",
            "vscode",
            "rust",
            "python",
            "git",
            "docker",
            "firefox",
        ],
        values: &[("font-monospace", "jetbrains-mono-nerd"), ("swappiness", "10")],
    },
    Preset {
        name: "multimedia",
        description: "Players, editors and recording tools",
        items: &["zram", "noto", "roboto", "mpv", "vlc", "gimp", "obs", "firefox"],
        values: &[("cpu-governor", "performance")],
    },
];
