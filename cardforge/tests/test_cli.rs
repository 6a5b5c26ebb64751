// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::{tempdir, NamedTempFile};

const CARD_JSON: &str = r#"{
    "title": "Ember Drake",
    "username": "player_one",
    "monster_name": "Ashwing",
    "race_preset": "龙族",
    "class_count": 2,
    "techniques": ["Flame Breath", "Tail Whip", "Wing Gust"]
}"#;

fn write_temp(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

/// Config that skips system font discovery to keep tests fast.
fn fast_config() -> NamedTempFile {
    write_temp(br#"{"load_system_fonts": false}"#)
}

fn validate_png_header(data: &[u8]) -> bool {
    data.len() >= 8 && data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
}

fn png_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}

#[test]
fn check_no_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cardforge"));
    Ok(())
}

#[test]
fn test_styles() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("neo"))
        .stdout(predicate::str::contains("holo"))
        .stdout(predicate::str::contains("魔族"));
    Ok(())
}

#[test]
fn test_template_is_default_card() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("cardforge")?;
    let output = cmd.arg("template").output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["frame_style"], "neo");
    assert_eq!(value["class_count"], 1);
    assert_eq!(value["techniques"].as_array().unwrap().len(), 24);
    assert_eq!(value["title"], "");
    Ok(())
}

#[rstest]
#[case(None, (720, 1136))]
#[case(Some("0.5"), (360, 568))]
fn test_render_to_file(
    #[case] scale: Option<&str>,
    #[case] expected: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(CARD_JSON.as_bytes());
    let config = fast_config();
    let dir = tempdir()?;
    let output = dir.path().join("out.png");

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("-o").arg(&output)
        .arg("--config").arg(config.path());
    if let Some(scale) = scale {
        cmd.arg("--scale").arg(scale);
    }
    cmd.assert().success();

    assert_eq!(png_dimensions(&output), expected);
    Ok(())
}

#[test]
fn test_render_output_dir_uses_title() -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(CARD_JSON.as_bytes());
    let config = fast_config();
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("--output-dir").arg(dir.path())
        .arg("--config").arg(config.path())
        .assert()
        .success();

    assert!(dir.path().join("Ember Drake.png").exists());
    Ok(())
}

#[test]
fn test_render_untitled_falls_back_to_card_png() -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(b"{}");
    let config = fast_config();
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("--output-dir").arg(dir.path())
        .arg("--config").arg(config.path())
        .assert()
        .success();

    assert!(dir.path().join("card.png").exists());
    Ok(())
}

#[test]
fn test_render_stdin_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let config = fast_config();

    let mut child = Command::cargo_bin("cardforge")?
        .arg("render")
        .arg("-o").arg("-")
        .arg("--config").arg(config.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .unwrap()
        .write_all(CARD_JSON.as_bytes())?;
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert!(validate_png_header(&output.stdout));
    Ok(())
}

#[test]
fn test_render_with_illustration() -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(CARD_JSON.as_bytes());
    let art_dir = tempdir()?;
    let art = art_dir.path().join("red.png");
    image::RgbaImage::from_pixel(2, 1, image::Rgba([255, 0, 0, 255])).save(&art)?;
    let config = fast_config();
    let dir = tempdir()?;
    let output = dir.path().join("art.png");

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("-o").arg(&output)
        .arg("--illustration").arg(&art)
        .arg("--config").arg(config.path())
        .assert()
        .success();

    // A 2x1 red image contained in the 624x580 panel spans its full width
    let img = image::open(&output)?.to_rgba8();
    assert_eq!(img.get_pixel(360, 470).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(100, 470).0, [255, 0, 0, 255]);
    Ok(())
}

#[test]
fn test_bad_illustration_still_renders() -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(CARD_JSON.as_bytes());
    let art = write_temp(b"not an image");
    let config = fast_config();
    let dir = tempdir()?;
    let output = dir.path().join("fallback.png");

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("-o").arg(&output)
        .arg("--illustration").arg(art.path())
        .arg("--config").arg(config.path())
        .assert()
        .success();

    assert_eq!(png_dimensions(&output), (720, 1136));
    Ok(())
}

#[rstest]
#[case(r#"{"class_count": 9}"#, "Failed to parse card JSON")]
#[case("not json", "Failed to parse card JSON")]
fn test_render_rejects_bad_card(
    #[case] json: &str,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(json.as_bytes());
    let config = fast_config();
    let dir = tempdir()?;

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("-o").arg(dir.path().join("never.png"))
        .arg("--config").arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));

    assert!(!dir.path().join("never.png").exists());
    Ok(())
}

#[test]
fn test_render_rejects_unknown_style() -> Result<(), Box<dyn std::error::Error>> {
    let card = write_temp(CARD_JSON.as_bytes());
    let config = fast_config();

    let mut cmd = Command::cargo_bin("cardforge")?;
    cmd.arg("render")
        .arg("-i").arg(card.path())
        .arg("-o").arg("-")
        .arg("--style").arg("neon")
        .arg("--config").arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown frame style: neon"));
    Ok(())
}
