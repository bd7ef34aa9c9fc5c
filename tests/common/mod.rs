//! Shared utilities for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use deeplink_router::{BackStackEntry, Destination, MemorySink};

/// A fresh attached sink plus a handle for observing it.
#[allow(dead_code)]
pub fn shared_sink() -> (Arc<MemorySink>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (sink.clone(), sink)
}

#[allow(dead_code)]
pub fn entry(id: &str) -> BackStackEntry {
    BackStackEntry::new(Destination::new(id))
}

/// Write `contents` to a uniquely named file in the temp dir.
#[allow(dead_code)]
pub fn write_route_table(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "deeplink-router-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Route table mirroring the demo app's deep links.
#[allow(dead_code)]
pub const DEMO_TABLE: &str = r#"
default_transition = "simple_swap"

[home]
id = "home"

[[links]]
pattern = "navigation"
[[links.destinations]]
id = "navigation-demo"
args = { index = "0", display_up_mode = "show_for_children_only" }
enter = "fade"
exit = "fade"

[[links]]
pattern = "transitions"
mode = "verbatim"
[[links.destinations]]
id = "home"

[[links]]
pattern = "master-detail/{item}"
[[links.destinations]]
id = "master-detail-list"
[[links.destinations]]
id = "master-detail-item"
args = { index = "{item}" }

[[links]]
pattern = "team/{teamId}/member/{memberId}"
transition = "horizontal_slide"
[[links.destinations]]
id = "member"
args = { team = "{teamId}", member = "{memberId}" }
"#;
