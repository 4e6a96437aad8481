use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_with_input, stderr, stdout};

const APP_TSX: &str = r#"import './App.css';

export function App() {
    return <h1 title="app.title">{'app.heading'}</h1>;
}
"#;

fn setup_sources(test: &CliTest) -> Result<()> {
    test.write_file("src/App.tsx", APP_TSX)?;
    test.write_file("src/api/client.ts", "export const BASE = 'api.base';\n")?;
    test.write_file("src/App.css", ".title { color: 'red' }\n")
}

#[test]
fn test_extract_confirmed_rewrites_sources() -> Result<()> {
    let test = CliTest::new()?;
    setup_sources(&test)?;

    let output = run_with_input(test.extract_command(), "yes\n")?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(out.contains("File: ./src/App.tsx"));
    assert!(out.contains("  + import { getLangResource } from \"./i18n/utils\";  line 2"));
    assert!(out.contains("  \"app.title\" -> getLangResource(\"app.title\")  line 4"));
    assert!(out.contains("确认结果？（yes/no）："));
    assert!(out.contains("Rewrote 2 source files (4 replacements, 2 imports added)"));

    assert_eq!(
        test.read_file("src/App.tsx")?,
        r#"import getLangResource("./App.css");
import { getLangResource } from "./i18n/utils";

export function App() {
    return <h1 title=getLangResource("app.title")>{getLangResource("app.heading")}</h1>;
}
"#
    );
    assert_eq!(
        test.read_file("src/api/client.ts")?,
        "import { getLangResource } from \"../i18n/utils\";\n\
         export const BASE = getLangResource(\"api.base\");\n"
    );
    // Non-source files are left alone.
    assert_eq!(test.read_file("src/App.css")?, ".title { color: 'red' }\n");

    let app_json = test.read_file("src/i18n/App_en.json")?;
    insta::assert_snapshot!(app_json, @r#"
    {
        "": {
            "/App": {
                "css": "./App.css"
            }
        },
        "app": {
            "title": "app.title",
            "heading": "app.heading"
        }
    }
    "#);
    assert_eq!(
        test.read_file("src/i18n/client_en.json")?,
        "{\n    \"api\": {\n        \"base\": \"api.base\"\n    }\n}"
    );
    Ok(())
}

#[test]
fn test_extract_declined_keeps_sources() -> Result<()> {
    let test = CliTest::new()?;
    setup_sources(&test)?;

    let output = run_with_input(test.extract_command(), "no\n")?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Replacement cancelled"));
    assert_eq!(test.read_file("src/App.tsx")?, APP_TSX);
    // Preview resources are still written.
    assert!(test.exists("src/i18n/App_en.json"));
    assert!(test.exists("src/i18n/client_en.json"));
    Ok(())
}

#[test]
fn test_extract_requires_exact_yes() -> Result<()> {
    let test = CliTest::new()?;
    setup_sources(&test)?;

    let output = run_with_input(test.extract_command(), "y\n")?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("src/App.tsx")?, APP_TSX);
    Ok(())
}

#[test]
fn test_extract_yes_is_case_insensitive() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", "x = 'a.b'\n")?;

    let output = run_with_input(test.extract_command(), "YES\n")?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/a.ts")?,
        "import { getLangResource } from \"./i18n/utils\";\nx = getLangResource(\"a.b\")\n"
    );
    Ok(())
}

#[test]
fn test_extract_yes_flag_skips_prompt() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", "x = 'a.b'\n")?;

    let mut cmd = test.extract_command();
    cmd.arg("--yes");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("确认结果"));
    assert_eq!(
        test.read_file("src/a.ts")?,
        "import { getLangResource } from \"./i18n/utils\";\nx = getLangResource(\"a.b\")\n"
    );
    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".langkitrc.json",
        r#"{
            "extract": {
                "rootDir": "./app",
                "outputDir": "./locales",
                "langCode": "zh",
                "extensions": [".tsx"],
                "ignoreTexts": ["use client"],
                "lookupFn": "t"
            }
        }"#,
    )?;
    test.write_file("app/page.tsx", "'use client';\nconst a = 'page.title';\n")?;
    test.write_file("app/util.ts", "const b = 'skipped';\n")?;

    let mut cmd = test.extract_command();
    cmd.arg("--yes");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("app/page.tsx")?,
        "'use client';\nimport { t } from \"./i18n/utils\";\nconst a = t(\"page.title\");\n"
    );
    assert_eq!(test.read_file("app/util.ts")?, "const b = 'skipped';\n");
    assert!(test.exists("locales/page_zh.json"));
    Ok(())
}

#[test]
fn test_extract_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("web/a.ts", "x = 'a.b'\n")?;

    let mut cmd = test.extract_command();
    cmd.args(["--root-dir", "web", "--output-dir", "out", "--lang-code", "ja", "--yes"]);
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.exists("out/a_ja.json"));
    Ok(())
}

#[test]
fn test_extract_no_import_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", "x = 'a.b'\n")?;

    let mut cmd = test.extract_command();
    cmd.args(["--no-import", "--yes"]);
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Rewrote 1 source file (1 replacement)"));
    assert_eq!(test.read_file("src/a.ts")?, "x = getLangResource(\"a.b\")\n");
    Ok(())
}

#[test]
fn test_extract_lookup_import_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".langkitrc.json",
        r#"{ "extract": { "lookupImport": "./lib/i18n" } }"#,
    )?;
    test.write_file(
        "src/pages/Home.tsx",
        "import React from \"react\";\n\nexport const Home = () => <h1>{'home.title'}</h1>;\n",
    )?;

    let mut cmd = test.extract_command();
    cmd.arg("--yes");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("src/pages/Home.tsx")?,
        "import React from getLangResource(\"react\");\n\
         import { getLangResource } from \"../../lib/i18n\";\n\
         \n\
         export const Home = () => <h1>{getLangResource(\"home.title\")}</h1>;\n"
    );
    Ok(())
}

#[test]
fn test_extract_key_conflict_exits_with_failure() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", "import x from 'react';\nimport y from 'react.dom';\n")?;

    let mut cmd = test.extract_command();
    cmd.arg("--yes");
    let output = run_with_input(cmd, "")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("conflict: \"react.dom\""));
    assert_eq!(
        test.read_file("src/i18n/a_en.json")?,
        "{\n    \"react\": \"react\"\n}"
    );
    Ok(())
}

#[test]
fn test_extract_missing_root_dir_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = run_with_input(test.extract_command(), "")?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source directory './src' does not exist"));
    Ok(())
}

#[test]
fn test_extract_empty_tree_does_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/readme.md", "'not scanned'")?;

    let output = run_with_input(test.extract_command(), "")?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No source files matching .ts, .tsx found in ./src"));
    assert!(!test.exists("src/i18n"));
    Ok(())
}
