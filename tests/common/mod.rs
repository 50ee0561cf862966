//! Helpers shared by the integration tests

#![allow(dead_code)]

use deskforge::catalog::{Catalog, NodeDef};
use deskforge::io::StoreLayout;
use deskforge::store::{GitBackend, ProfileStore};
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Whether a usable `git` is on PATH; store tests are skipped without one
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Open a git-backed store rooted at `dir`
pub fn open_git_store(dir: &Path) -> ProfileStore<GitBackend> {
    let backend = GitBackend::new(dir).with_identity("deskforge test", "test@localhost");
    ProfileStore::open(StoreLayout::new(dir), backend).expect("store should open")
}

/// root -> fonts {noto, roboto} and dev -> {editors {neovim}, langs {rust, go}}
pub fn small_catalog() -> Arc<Catalog> {
    let def = NodeDef::category(
        "root",
        "Root",
        vec![
            NodeDef::category(
                "fonts",
                "Fonts",
                vec![
                    NodeDef::leaf("noto", "Noto", ""),
                    NodeDef::leaf("roboto", "Roboto", ""),
                ],
            ),
            NodeDef::category(
                "dev",
                "Development",
                vec![
                    NodeDef::category("editors", "Editors", vec![NodeDef::leaf("neovim", "Neovim", "")]),
                    NodeDef::category(
                        "langs",
                        "Languages",
                        vec![NodeDef::leaf("rust", "Rust", ""), NodeDef::leaf("go", "Go", "")],
                    ),
                ],
            ),
        ],
    );
    Arc::new(Catalog::from_def(def).expect("catalog should be valid"))
}
