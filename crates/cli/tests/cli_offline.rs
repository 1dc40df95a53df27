//! Binary tests that stay off the network: placeholders feed the optimizer.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn memehoard(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_memehoard"))
        .args(args)
        .current_dir(dir)
        .env_remove("MEMEHOARD_CONFIG")
        .env("RUST_LOG", "error") // Quiet logs during tests
        .output()
        .expect("Failed to run memehoard")
}

#[test]
fn test_generate_then_optimize() {
    let temp = TempDir::new().unwrap();

    let out = memehoard(temp.path(), &["generate", "--count", "3", "--size", "64"]);
    assert!(out.status.success(), "generate failed: {:?}", out);
    let assets = temp.path().join("assets").join("memes");
    for n in 1..=3 {
        assert!(assets.join(format!("meme_{:03}.png", n)).exists());
    }
    assert!(!temp.path().join("memes.json").exists());

    let out = memehoard(temp.path(), &["optimize"]);
    assert!(out.status.success(), "optimize failed: {:?}", out);
    assert!(assets.join("webp").join("meme_002.webp").exists());
    assert!(assets.join("thumbs").join("meme_003.webp").exists());

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("memes.json")).unwrap())
            .unwrap();
    assert_eq!(doc["count"], 0);
    assert_eq!(doc["memes"].as_array().unwrap().len(), 3);
    assert_eq!(doc["memes"][0]["local"], "assets/memes/webp/meme_001.webp");
}

#[test]
fn test_config_file_and_flags() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("memehoard.toml"),
        "[paths]\noutput_dir = \"placeholders\"\n\n[placeholder]\ncount = 2\nsize = 32\n",
    )
    .unwrap();

    let out = memehoard(temp.path(), &["generate", "--count", "1"]);
    assert!(out.status.success(), "generate failed: {:?}", out);
    let names: Vec<_> = std::fs::read_dir(temp.path().join("placeholders"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["meme_001.png"]);
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let temp = TempDir::new().unwrap();

    let out = memehoard(temp.path(), &["fetch", "--batch-size", "0"]);
    assert!(!out.status.success());
    assert!(!temp.path().join("memes.json").exists());
}

#[test]
fn test_missing_explicit_config_exits_nonzero() {
    let temp = TempDir::new().unwrap();

    let out = memehoard(temp.path(), &["--config", "nope.toml", "optimize"]);
    assert!(!out.status.success());
}
