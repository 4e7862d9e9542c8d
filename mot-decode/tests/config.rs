use std::io::Write;

use mot_core::DecoderConfig;
use mot_decode::{Config, Envelope, PayloadFormat};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_keep_calibration() {
    let config = Config::default();

    assert_eq!(config.decoder.humidity_correction, 0.91);
    assert_eq!(config.input.format, PayloadFormat::Hex);
    assert_eq!(config.output.envelope, Envelope::Outcome);
    assert!(!config.output.pretty);
    assert_eq!(config.decoder_config().unwrap(), DecoderConfig::default());
}

#[test]
fn load_full_file() -> color_eyre::Result<()> {
    let file = write_config(
        r#"
[decoder]
humidity_correction = 1.0

[input]
format = "base64"

[output]
pretty = true
envelope = "record"
"#,
    );

    let config = Config::load(file.path())?;

    assert_eq!(config.decoder.humidity_correction, 1.0);
    assert_eq!(config.input.format, PayloadFormat::Base64);
    assert!(config.output.pretty);
    assert_eq!(config.output.envelope, Envelope::Record);
    Ok(())
}

#[test]
fn missing_sections_fall_back_to_defaults() -> color_eyre::Result<()> {
    let file = write_config("[input]\nformat = \"bytes\"\n");

    let config = Config::load(file.path())?;

    assert_eq!(config.input.format, PayloadFormat::Bytes);
    assert_eq!(config.decoder.humidity_correction, 0.91);
    assert_eq!(config.output.envelope, Envelope::Outcome);
    Ok(())
}

#[test]
fn empty_file_is_default() -> color_eyre::Result<()> {
    let file = write_config("");
    assert_eq!(Config::load(file.path())?, Config::default());
    Ok(())
}

#[test]
fn unknown_format_is_rejected() {
    let file = write_config("[input]\nformat = \"ascii85\"\n");
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn non_finite_correction_is_rejected() {
    let file = write_config("[decoder]\nhumidity_correction = nan\n");
    assert!(Config::load(file.path()).is_err());

    let mut config = Config::default();
    config.decoder.humidity_correction = f64::INFINITY;
    assert!(config.decoder_config().is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    assert!(Config::load(&dir.path().join("absent.toml")).is_err());
}
