#![forbid(unsafe_code)]

//! Demonstrates the declare-where-used workflow end to end:
//! tweaks declared inline in the code paths that read them, one live
//! binding onto a shared settings object, and an editor-style pass that
//! enumerates the registry and applies edits.
//!
//! Logging honors `RUST_LOG` (try `RUST_LOG=livetweak_core=trace`).

use livetweak_core::{TweakStore, Value};
use livetweak_inline::{DeclValue, Declaration, scan, tweak_bind, tweak_value};
use std::env;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
livetweak demo: runtime-tunable parameters in action

USAGE:
    livetweak-demo [OPTIONS]

OPTIONS:
    --list           Print the registry tree and exit
    --help, -h       Show this help message
    --version, -V    Show version
";

/// Parameters registered up front from a table, the way generated code
/// would; everything else in this demo is declared inline at its call site.
static DECLARATIONS: [Declaration; 2] = [
    Declaration::new("Network", "Timeouts", "retryCount", DeclValue::Int(3))
        .with_range(DeclValue::Int(1), DeclValue::Int(5)),
    Declaration::new("Network", "Timeouts", "backoffMs", DeclValue::UInt(250)),
];

/// Shared settings object a binding keeps in sync.
struct HudSettings {
    rows: AtomicI64,
}

/// A code path that declares its parameters where it uses them.
fn simulate_frame() -> String {
    let speed = tweak_value!("Animation", "Playback", "speed", 1.0f64, 0.25, 4.0);
    let label: String = tweak_value!("Animation", "Playback", "label", "cruise");
    let vsync = tweak_value!("Render", "Output", "vsync", true);
    format!("frame: speed={speed} label={label} vsync={vsync}")
}

fn print_tree(store: &TweakStore) {
    for category in store.categories() {
        println!("{}", category.name());
        for collection in category.collections() {
            println!("  {}", collection.name());
            for tweak in collection.tweaks() {
                let range = match (tweak.min_value(), tweak.max_value()) {
                    (Some(min), Some(max)) => format!(" [{min}..{max}]"),
                    _ => String::new(),
                };
                println!(
                    "    {} = {}{} (default {})",
                    tweak.name(),
                    tweak.effective_value(),
                    range,
                    tweak.default_value(),
                );
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut list_only = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--list" => list_only = true,
            "--help" | "-h" => {
                print!("{HELP_TEXT}");
                return;
            }
            "--version" | "-V" => {
                println!("livetweak-demo {VERSION}");
                return;
            }
            other => {
                eprintln!("unknown option: {other}");
                process::exit(2);
            }
        }
    }

    let store = TweakStore::shared();

    // Table-declared parameters materialize once at startup.
    match scan(store, &DECLARATIONS) {
        Ok(count) => info!(count, "declaration table registered"),
        Err(error) => eprintln!("declaration table rejected: {error}"),
    }

    // Inline declaration sites run once; the registry fills in as code
    // executes.
    println!("{}", simulate_frame());

    // A live binding keeps a settings field synchronized.
    let hud = Arc::new(HudSettings {
        rows: AtomicI64::new(0),
    });
    let binding = tweak_bind!(
        &hud,
        |hud, rows| hud.rows.store(rows, Ordering::SeqCst),
        "UI",
        "Hud",
        "rows",
        20i64,
        5i64,
        50i64
    );
    println!("hud rows (bound): {}", hud.rows.load(Ordering::SeqCst));

    if list_only {
        print_tree(store);
        return;
    }

    // An editor finds tweaks by identity and applies edits.
    info!("applying editor edits");
    if let Some(speed) = store.find("Animation", "Playback", "speed") {
        speed.set_current(Value::Float(2.0)).expect("kind matches");
    }
    if let Some(rows) = store.find("UI", "Hud", "rows") {
        rows.set_current(Value::Int(120)).expect("kind matches"); // clamps to 50
    }

    println!("{}", simulate_frame());
    println!("hud rows after edit: {}", hud.rows.load(Ordering::SeqCst));

    // Detached bindings stop tracking.
    if let Some(binding) = &binding {
        binding.detach();
    }
    if let Some(rows) = store.find("UI", "Hud", "rows") {
        rows.set_current(Value::Int(10)).expect("kind matches");
    }
    println!("hud rows after detach: {}", hud.rows.load(Ordering::SeqCst));

    println!();
    print_tree(store);
}
