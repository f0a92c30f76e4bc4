//! CLI command implementations
//!
//! Each command returns the `data` payload of the success envelope. `run`
//! owns stdout: it prints exactly one envelope per invocation and returns
//! the error (for a non-zero exit) when the command failed.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::declaration::{Declaration, DeclarationCatalog};
use crate::resolution::{validate_tenant_isolation, DashboardResolver, ResolutionContext, ResolvedDashboard};
use crate::snapshot::{OfflineEvaluator, Snapshot, SnapshotGenerator, SnapshotVerifier};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_json_file, write_error, write_response};

/// Parse arguments, run the command, print the envelope
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match run_command(cli) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), e.message())?;
            Err(e)
        }
    }
}

/// Load configuration and dispatch
pub fn run_command(cli: Cli) -> CliResult<Value> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_logging()?;

    match cli.command {
        Command::Catalog => catalog(&config),
        Command::Resolve {
            dashboard,
            version,
            context,
        } => resolve(&config, &dashboard, version.as_deref(), &context),
        Command::Snapshot {
            dashboard,
            version,
            context,
            expiration_ms,
            out,
        } => snapshot(
            &config,
            &dashboard,
            version.as_deref(),
            &context,
            expiration_ms,
            out.as_deref(),
        ),
        Command::Verify { snapshot } => verify(&snapshot),
        Command::Evaluate { snapshot } => evaluate(&snapshot),
        Command::Isolation { left, right } => isolation(&left, &right),
    }
}

/// List declarations as `{id, version, scope, sections}` rows
pub fn catalog(config: &Config) -> CliResult<Value> {
    let catalog = config.catalog()?;
    let rows: Vec<Value> = catalog
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "version": d.version,
                "scope": d.scope,
                "sections": d.sections.len(),
            })
        })
        .collect();
    Ok(json!({ "declarations": rows }))
}

/// Resolve a dashboard against a context file
pub fn resolve(
    config: &Config,
    dashboard: &str,
    version: Option<&str>,
    context_path: &Path,
) -> CliResult<Value> {
    let resolved = resolve_from_files(config, dashboard, version, context_path)?;
    Ok(serde_json::to_value(&resolved)?)
}

/// Resolve and snapshot; writes to `out` when given
pub fn snapshot(
    config: &Config,
    dashboard: &str,
    version: Option<&str>,
    context_path: &Path,
    expiration_ms: Option<u64>,
    out: Option<&Path>,
) -> CliResult<Value> {
    let resolved = resolve_from_files(config, dashboard, version, context_path)?;
    let generator = SnapshotGenerator::new()
        .with_expiration_ms(expiration_ms.unwrap_or(config.snapshot_expiration_ms));
    let snapshot = generator.generate(&resolved);

    match out {
        Some(path) => {
            snapshot.write_to_file(path)?;
            Ok(json!({
                "id": snapshot.id,
                "path": path.display().to_string(),
                "signature": snapshot.signature,
                "expiresAt": snapshot.expires_at,
            }))
        }
        None => Ok(serde_json::to_value(&snapshot)?),
    }
}

/// Verdict for a snapshot file. An invalid snapshot is still a successful
/// command; the verdict says why.
pub fn verify(snapshot_path: &Path) -> CliResult<Value> {
    let snapshot = Snapshot::read_from_file(snapshot_path)?;
    let verdict = SnapshotVerifier::new().verify(&snapshot);
    Ok(serde_json::to_value(&verdict)?)
}

/// Offline evaluation of a snapshot file
pub fn evaluate(snapshot_path: &Path) -> CliResult<Value> {
    let snapshot = Snapshot::read_from_file(snapshot_path)?;
    let evaluation = OfflineEvaluator::new().evaluate(&snapshot)?;
    Ok(serde_json::to_value(&evaluation)?)
}

/// Isolation check between two context files
pub fn isolation(left_path: &Path, right_path: &Path) -> CliResult<Value> {
    let left: ResolutionContext = read_json_file(left_path)?;
    let right: ResolutionContext = read_json_file(right_path)?;
    validate_tenant_isolation(&left, &right)?;
    Ok(json!({ "isolated": true }))
}

fn resolve_from_files(
    config: &Config,
    dashboard: &str,
    version: Option<&str>,
    context_path: &Path,
) -> CliResult<ResolvedDashboard> {
    let catalog = config.catalog()?;
    let declaration = lookup(&catalog, dashboard, version)?;
    let context: ResolutionContext = read_json_file(context_path)?;
    Ok(DashboardResolver::new().resolve(declaration, &context)?)
}

fn lookup<'a>(
    catalog: &'a DeclarationCatalog,
    dashboard: &str,
    version: Option<&str>,
) -> CliResult<&'a Declaration> {
    Ok(catalog.find(dashboard, version)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::PARTNER_DASHBOARD_ID;
    use std::fs;
    use tempfile::TempDir;

    fn write_context(dir: &Path, name: &str, body: Value) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    fn limited_context(dir: &Path) -> std::path::PathBuf {
        write_context(
            dir,
            "ctx.json",
            json!({
                "partnerId": "partner-1",
                "permissions": ["partner:overview:read", "tenants:read"]
            }),
        )
    }

    #[test]
    fn test_catalog_lists_builtin() {
        let data = catalog(&Config::default()).unwrap();
        let rows = data["declarations"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], PARTNER_DASHBOARD_ID);
        assert_eq!(rows[0]["sections"], 9);
    }

    #[test]
    fn test_resolve_unknown_dashboard() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = limited_context(temp_dir.path());

        let err = resolve(&Config::default(), "nope", None, &ctx).unwrap_err();
        assert_eq!(err.code(), "DASH_CATALOG_NOT_FOUND");
    }

    #[test]
    fn test_resolve_blank_partner() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = write_context(temp_dir.path(), "ctx.json", json!({ "partnerId": "" }));

        let err = resolve(&Config::default(), PARTNER_DASHBOARD_ID, None, &ctx).unwrap_err();
        assert_eq!(err.code(), "DASH_VALIDATION_PARTNER_REQUIRED");
    }

    #[test]
    fn test_snapshot_verify_evaluate_via_files() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = limited_context(temp_dir.path());
        let out = temp_dir.path().join("snapshot.json");

        let written = snapshot(
            &Config::default(),
            PARTNER_DASHBOARD_ID,
            Some("1.0.0"),
            &ctx,
            None,
            Some(&out),
        )
        .unwrap();
        assert!(written["signature"].as_str().unwrap().starts_with("sig_"));

        let verdict = verify(&out).unwrap();
        assert_eq!(verdict["valid"], true);

        let evaluation = evaluate(&out).unwrap();
        let visible = evaluation["visibleSections"].as_array().unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_evaluate_tampered_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = limited_context(temp_dir.path());
        let out = temp_dir.path().join("snapshot.json");
        snapshot(&Config::default(), PARTNER_DASHBOARD_ID, None, &ctx, None, Some(&out)).unwrap();

        let mut snap = Snapshot::read_from_file(&out).unwrap();
        snap.resolved.sections[0].visible = !snap.resolved.sections[0].visible;
        snap.write_to_file(&out).unwrap();

        let verdict = verify(&out).unwrap();
        assert_eq!(verdict["tampered"], true);

        let err = evaluate(&out).unwrap_err();
        assert_eq!(err.code(), "DASH_SNAPSHOT_INTEGRITY");
    }

    #[test]
    fn test_isolation_command() {
        let temp_dir = TempDir::new().unwrap();
        let left = write_context(temp_dir.path(), "a.json", json!({ "partnerId": "p1", "tenantId": "t1" }));
        let same = write_context(temp_dir.path(), "b.json", json!({ "partnerId": "p1" }));
        let other = write_context(temp_dir.path(), "c.json", json!({ "partnerId": "p1", "tenantId": "t2" }));

        assert_eq!(isolation(&left, &same).unwrap()["isolated"], true);
        let err = isolation(&left, &other).unwrap_err();
        assert_eq!(err.code(), "DASH_ISOLATION_CROSS_TENANT");
    }
}
