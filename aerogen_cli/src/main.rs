use std::env;
use std::path::{Path, PathBuf};

use aerogen_pipeline::{annotate_all, generate_scenes};
use aerogen_project::{DatasetConfig, load_config};
use aerogen_scene::naming::REPORT_FILE;
use aerogen_validate::{Inventory, Profile, ValidationReport, load_summary, validate};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "generate" => generate_command(&args, &cwd),
        "annotate" => annotate_command(&args, &cwd),
        "validate" => validate_command(&args, &cwd),
        "pipeline" => pipeline_command(&args, &cwd),
        "report" => report_command(&args, &cwd),
        _ => {
            print_usage();
            Err(format!("unknown command `{command}`"))
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  aerogen generate [--root <dir>] [--scenes <n>] [--seed <n>]");
    eprintln!("  aerogen annotate [--root <dir>]");
    eprintln!("  aerogen validate [--root <dir>] [--lenient] [--no-save]");
    eprintln!("  aerogen pipeline [--root <dir>] [--scenes <n>] [--seed <n>]");
    eprintln!("  aerogen report   [--root <dir>]");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Config from `aerogen.toml` in the working directory, overridden by
/// command-line flags.
fn resolve_config(args: &[String], cwd: &Path) -> Result<DatasetConfig, String> {
    let mut config = load_config(cwd).map_err(|err| format!("failed to load config: {err}"))?;

    if let Some(root) = parse_flag_value(args, "--root") {
        config.output_root = PathBuf::from(root);
    }
    if let Some(raw) = parse_flag_value(args, "--scenes") {
        config.scenes = raw
            .parse()
            .map_err(|_| format!("invalid --scenes value `{raw}`"))?;
    }
    if let Some(raw) = parse_flag_value(args, "--seed") {
        config.seed = Some(
            raw.parse()
                .map_err(|_| format!("invalid --seed value `{raw}`"))?,
        );
    }
    if config.output_root.is_relative() {
        config.output_root = cwd.join(&config.output_root);
    }
    Ok(config)
}

fn rng_for(config: &DatasetConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn generate_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let config = resolve_config(args, cwd)?;
    let mut rng = rng_for(&config);
    let scenes = generate_scenes(&config.output_root, config.scenes, config.resolution, &mut rng);

    println!(
        "generated {}/{} scenes at {}",
        scenes.len(),
        config.scenes,
        config.output_root.display()
    );
    Ok(())
}

fn annotate_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let config = resolve_config(args, cwd)?;
    let records = annotate_all(&config.output_root)
        .map_err(|err| format!("annotation failed for {}: {err}", config.output_root.display()))?;

    println!(
        "annotated {} scenes at {}",
        records.len(),
        config.output_root.display()
    );
    Ok(())
}

fn validate_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let config = resolve_config(args, cwd)?;
    let profile = if has_flag(args, "--lenient") {
        Profile::Lenient
    } else {
        Profile::Strict
    };

    let inventory = Inventory::scan(&config.output_root).map_err(|err| format!("{err}"))?;
    let report = validate(&inventory, profile);
    print_report(&report);

    if !has_flag(args, "--no-save") {
        let report_path = config.output_root.join(REPORT_FILE);
        report
            .save(&report_path)
            .map_err(|err| format!("failed to save report to {}: {err}", report_path.display()))?;
        println!("report saved: {}", report_path.display());
    }
    Ok(())
}

fn pipeline_command(args: &[String], cwd: &Path) -> Result<(), String> {
    generate_command(args, cwd)?;
    annotate_command(args, cwd)?;
    validate_command(args, cwd)
}

fn report_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let config = resolve_config(args, cwd)?;
    let report_path = config.output_root.join(REPORT_FILE);
    let summary = load_summary(&report_path)
        .map_err(|err| format!("failed to read report {}: {err}", report_path.display()))?;

    for (name, check) in summary.checks() {
        println!(
            "[{}] {name}: {} ({} findings)",
            if check.status { "ok" } else { "fail" },
            check.summary,
            check.details_count
        );
    }
    println!(
        "overall: {}",
        if summary.passed() { "passed" } else { "failed" }
    );
    Ok(())
}

fn print_report(report: &ValidationReport) {
    let line = |name: &str, status: bool, summary: &str| {
        println!("[{}] {name}: {summary}", if status { "ok" } else { "fail" });
    };
    line(
        "directory_structure",
        report.directory_structure.status,
        &report.directory_structure.summary,
    );
    line("image_files", report.image_files.status, &report.image_files.summary);
    line(
        "metadata_files",
        report.metadata_files.status,
        &report.metadata_files.summary,
    );
    line(
        "annotation_files",
        report.annotation_files.status,
        &report.annotation_files.summary,
    );
    line(
        "data_consistency",
        report.data_consistency.status,
        &report.data_consistency.summary,
    );

    for issue in &report.data_consistency.details {
        println!("  {} missing: {}", issue.image, issue.missing_files.join(", "));
    }

    println!(
        "overall: {}",
        if report.passed() { "passed" } else { "failed" }
    );
}
