use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use fieldmap_core::{flatten, normalize_document};
use fieldmap_export::{CsvSheetWriter, SheetWriter, build_sheet};
use fieldmap_ingest::{import_canonical, import_collection, merge_endpoints, parse_payload};
use fieldmap_model::{Endpoint, Project, TargetSelection};
use fieldmap_persistence::{load_project, save_project};
use fieldmap_reconcile::{OptionCatalog, reconcile, rows_from_state, save_rows};

use crate::cli::{
    ExportArgs, FlattenArgs, ImportCollectionArgs, ImportDtoArgs, InitArgs, ShowArgs, SyncArgs,
};
use crate::render::{flat_field_table, mapping_row_table};

pub fn run_init(args: &InitArgs) -> Result<()> {
    if args.project.exists() && !args.force {
        bail!(
            "project file {} already exists (use --force to overwrite)",
            args.project.display()
        );
    }
    let mut project = Project::new(args.courier.clone());
    project.project_notes = args.notes.clone();
    save_project(&mut project, &args.project).context("save project")?;
    println!(
        "created project for courier '{}' at {}",
        args.courier,
        args.project.display()
    );
    Ok(())
}

pub fn run_flatten(args: &FlattenArgs) -> Result<()> {
    let text = fs::read_to_string(&args.payload)
        .with_context(|| format!("read payload {}", args.payload.display()))?;
    let document = parse_payload(&text).context("parse payload")?;
    let Some(document) = normalize_document(document) else {
        println!("payload has no fields");
        return Ok(());
    };
    let fields = flatten(&document);
    println!("{}", flat_field_table(&fields));
    println!("{} fields", fields.len());
    Ok(())
}

pub fn run_import_dto(args: &ImportDtoArgs) -> Result<()> {
    let mut project = load_project(&args.project).context("load project")?;
    let text = fs::read_to_string(&args.dto_file)
        .with_context(|| format!("read model {}", args.dto_file.display()))?;
    let source: serde_json::Value = serde_json::from_str(&text).context("parse model JSON")?;
    let import = import_canonical(&source).context("import canonical model")?;

    let leaves = flatten(&import.document).len();
    if import.skipped > 0 {
        warn!(skipped = import.skipped, "schema records without identifiers");
    }
    project.insert_dto(args.name.clone(), import.document);
    save_project(&mut project, &args.project).context("save project")?;
    println!(
        "imported model '{}' with {leaves} leaves ({} records skipped)",
        args.name, import.skipped
    );
    Ok(())
}

pub fn run_import_collection(args: &ImportCollectionArgs) -> Result<()> {
    let mut project = load_project(&args.project).context("load project")?;
    let text = fs::read_to_string(&args.collection)
        .with_context(|| format!("read collection {}", args.collection.display()))?;
    let document: serde_json::Value =
        serde_json::from_str(&text).context("parse collection JSON")?;
    let imported = import_collection(&document).context("import collection")?;

    let found = imported.len();
    let added = merge_endpoints(&mut project, imported);
    save_project(&mut project, &args.project).context("save project")?;
    println!("added {added} of {found} endpoints ({} already existed)", found - added);
    Ok(())
}

pub fn run_sync(args: &SyncArgs) -> Result<()> {
    let mut project = load_project(&args.project).context("load project")?;
    let text = fs::read_to_string(&args.payload)
        .with_context(|| format!("read payload {}", args.payload.display()))?;
    let document = parse_payload(&text).context("parse payload")?;
    let Some(document) = normalize_document(document) else {
        bail!("payload has no fields");
    };
    let fields = flatten(&document);

    if !project.endpoints.contains_key(&args.endpoint) {
        if !args.create {
            bail!(
                "endpoint '{}' not found (use --create to add it)",
                args.endpoint
            );
        }
        project
            .endpoints
            .insert(args.endpoint.clone(), Endpoint::new(args.method.clone()));
        info!(endpoint = %args.endpoint, "created endpoint");
    }

    let catalog = OptionCatalog::from_library(&project.dto_library);
    if catalog.is_empty() {
        warn!("DTO library is empty, no targets can resolve");
    }
    let direction = args.direction.into();
    let endpoint = project.endpoint_mut(&args.endpoint)?;
    let state = endpoint.direction(direction);

    let rows = reconcile(&fields, state, &catalog);
    let stale = rows
        .iter()
        .filter(|row| matches!(row.target, TargetSelection::Stale(_)))
        .count();
    let done = rows.iter().filter(|row| row.is_done()).count();
    let outcome = save_rows(&rows);

    for conflict in &outcome.conflicts {
        println!(
            "conflict: target {} claimed by '{}' and '{}', kept '{}'",
            conflict.target_id, conflict.kept, conflict.rejected, conflict.kept
        );
    }
    if stale > 0 {
        println!("{stale} stale targets no longer resolve against the DTO library");
    }

    *endpoint.direction_mut(direction) = outcome.state;
    save_project(&mut project, &args.project).context("save project")?;
    println!(
        "synced {} fields for '{}' {} ({done} done)",
        rows.len(),
        args.endpoint,
        direction.as_str()
    );
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let project = load_project(&args.project).context("load project")?;
    let catalog = OptionCatalog::from_library(&project.dto_library);
    let endpoint = project.endpoint(&args.endpoint)?;
    let direction = args.direction.into();
    let rows = rows_from_state(endpoint.direction(direction), &catalog);
    if rows.is_empty() {
        println!(
            "no saved fields for '{}' {}",
            args.endpoint,
            direction.as_str()
        );
        return Ok(());
    }
    println!("{} {} [{}]", args.endpoint, direction.as_str(), endpoint.method);
    println!("{}", mapping_row_table(&rows, &catalog));
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let project = load_project(&args.project).context("load project")?;
    let catalog = OptionCatalog::from_library(&project.dto_library);
    let endpoint = project.endpoint(&args.endpoint)?;
    let direction = args.direction.into();
    let rows = rows_from_state(endpoint.direction(direction), &catalog);

    let sheet = build_sheet(&args.endpoint, direction, endpoint, &rows, &catalog);
    let writer = CsvSheetWriter;
    let bytes = writer.render(&sheet).context("render sheet")?;

    let output = args.output.clone().unwrap_or_else(|| {
        let name = format!(
            "{}-{}.{}",
            args.endpoint,
            direction.as_str(),
            writer.extension()
        );
        args.project
            .parent()
            .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    });
    fs::write(&output, bytes).with_context(|| format!("write {}", output.display()))?;
    println!(
        "exported {} rows to {}",
        sheet.rows.len(),
        output.display()
    );
    Ok(())
}
