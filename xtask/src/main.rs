//! Developer tasks (schema generation, conformance runs, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(webglguard_types::WebglguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(webglguard_settings::WebglguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "webglguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "webglguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated (for CI).
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("  - missing: {}", name);
    }
    for name in &mismatched {
        eprintln!("  - out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Unity fixtures are directories with a `ProjectSettings/` or `Assets/` folder.
fn is_unity_fixture(dir: &Path) -> bool {
    dir.join("ProjectSettings").is_dir() || dir.join("Assets").is_dir()
}

/// Run the built binary on every Unity fixture and validate its report against the
/// generated report schema.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema())?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;

    let mut bin = project_root().join("target").join("debug").join("webglguard");
    if cfg!(target_os = "windows") {
        bin.set_extension("exe");
    }
    if !bin.exists() {
        bail!(
            "webglguard binary not found at {}.\nRun `cargo build -p webglguard-cli` first.",
            bin.display()
        );
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir() && is_unity_fixture(p))
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for fixture_dir in entries {
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--project-root")
            .arg(&fixture_dir)
            .arg("check")
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run webglguard on fixture '{}'", name))?;

        let code = output.status.code();
        if !matches!(code, Some(0..=2)) {
            errors.push(format!("fixture '{}': unexpected exit {:?}", name, code));
            continue;
        }
        if !report_out.exists() {
            errors.push(format!("fixture '{}': no report output generated", name));
            continue;
        }

        let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_out)?)
            .with_context(|| format!("Failed to parse report for fixture '{}'", name))?;
        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        println!("  ✓ fixture '{}' (exit {:?})", name, code);
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance failed with {} errors", errors.len());
    }

    println!("\n✓ Conformance checks passed!");
    Ok(())
}

/// Validate that all rule IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use webglguard_types::explain;

    let rule_ids = explain::all_rule_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in rule_ids
        .iter()
        .map(|id| ("Rule ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if text.is_empty() {
                        errors.push(format!("{} '{}' has empty {}", kind, id, field));
                    }
                }
            }
            None => errors.push(format!("{} '{}' has no explanation", kind, id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule IDs have explanations", rule_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run webglguard on Unity fixtures and validate reports");
    eprintln!("  explain-coverage  Validate all rule IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
