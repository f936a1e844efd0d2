//! Test fixtures for sample configurations and scripts.

use tempfile::TempDir;

/// Path to the JSON Lines agent script used by external-process tests.
#[allow(dead_code)]
pub fn mock_agent_script() -> String {
    format!("{}/tests/common/mock_agent.py", env!("CARGO_MANIFEST_DIR"))
}

/// Create a temporary project with a populated `.agent-gallery/` directory.
///
/// Entrypoints:
/// - `topic-echo`: mock delegate over `[topic, audience]`
/// - `fragile`: failing mock delegate, failures captured
/// - `strict`: failing mock delegate, failures propagated
/// - `keyed`: mock delegate that requires `GALLERY_FIXTURE_KEY`
/// - `locked`: mock delegate that requires a key nobody sets
/// - `script`: external process running `mock_agent.py`
/// - `duo`: team of `topic-echo` and `script`
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();
    let entrypoints = root.join(".agent-gallery/entrypoints");
    std::fs::create_dir_all(&entrypoints)?;

    std::fs::write(
        root.join(".agent-gallery/config.toml"),
        "env-file = \"fixture.env\"\ndefault-input = \"Tell me a story\"\n",
    )?;
    std::fs::write(root.join("fixture.env"), "GALLERY_FIXTURE_KEY=fixture-secret\n")?;

    let files = [
        (
            "topic-echo.md",
            "---\nname: topic-echo\ndescription: Echoes the topic\nmodel: test-model\nfields: [topic, audience]\n---\n\nRepeat the topic.\n".to_string(),
        ),
        (
            "fragile.md",
            "---\nname: fragile\nmodel: test-failure-model\nfailure-policy: capture\n---\n".to_string(),
        ),
        (
            "strict.md",
            "---\nname: strict\nmodel: test-failure-model\n---\n".to_string(),
        ),
        (
            "keyed.md",
            "---\nname: keyed\nmodel: test-model\nfields: [question]\ncredential-env: GALLERY_FIXTURE_KEY\n---\n".to_string(),
        ),
        (
            "locked.md",
            "---\nname: locked\nmodel: test-model\ncredential-env: GALLERY_KEY_NOBODY_SETS\n---\n".to_string(),
        ),
        (
            "script.yaml",
            format!(
                "name: script\nkind: cli\ncommand: python3\nargs: [\"{}\"]\nfields: [question]\n",
                mock_agent_script()
            ),
        ),
        (
            "duo.yaml",
            "name: duo\nkind: team\nmembers: [topic-echo, script]\nmax-turns: 2\n".to_string(),
        ),
    ];

    for (file, content) in files {
        std::fs::write(entrypoints.join(file), content)?;
    }

    Ok(temp_dir)
}
