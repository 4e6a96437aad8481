use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run_with_input, stderr};

#[test]
fn test_init_creates_default_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0));
    let config: Value = serde_json::from_str(&test.read_file(".langkitrc.json")?)?;
    assert_eq!(config["extract"]["rootDir"], "./src");
    assert_eq!(config["extract"]["outputDir"], "./src/i18n");
    assert_eq!(config["extract"]["langCode"], "en");
    assert_eq!(config["extract"]["lookupFn"], "getLangResource");
    assert_eq!(config["reconcile"]["primary"]["path"], "zh.json");
    assert_eq!(config["reconcile"]["secondary"]["locale"], "en");
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".langkitrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".langkitrc.json already exists"));
    assert_eq!(test.read_file(".langkitrc.json")?, "{}");
    Ok(())
}
