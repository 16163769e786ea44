use std::{fs, path::PathBuf};

use tempfile::tempdir;

use coptree_cli::{Args, run};

const VIEWS: [&str; 6] = ["text", "graph", "table", "svg", "html", "conllu"];

/// Collects all .conllu files from a directory
fn collect_conllu_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("conllu")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Samples live at the workspace root, not inside the crate.
fn samples_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

fn args_for(input: &PathBuf, view: &str, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        view: view.to_string(),
        output: Some(output.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_samples = collect_conllu_files(samples_path());
    assert!(
        !valid_samples.is_empty(),
        "No valid samples found in samples/"
    );

    let mut failed_samples = Vec::new();

    for sample_path in &valid_samples {
        let stem = sample_path.file_stem().unwrap().to_string_lossy();
        for view in VIEWS {
            let output_path = temp_dir.path().join(format!("{stem}.{view}"));
            let args = args_for(sample_path, view, output_path.clone());

            match run(&args) {
                Ok(()) => {
                    let written = fs::read_to_string(&output_path).unwrap();
                    assert!(
                        !written.trim().is_empty(),
                        "{view} output of {} is empty",
                        sample_path.display()
                    );
                }
                Err(e) => failed_samples.push((sample_path.clone(), view, e)),
            }
        }
    }

    if !failed_samples.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, view, err) in &failed_samples {
            eprintln!("  - {} ({view}): {}", path.display(), err);
        }
        panic!(
            "{} valid sample render(s) failed unexpectedly",
            failed_samples.len()
        );
    }

    println!("✅ All {} valid samples passed", valid_samples.len());
}

#[test]
fn e2e_smoke_test_every_sentence() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = samples_path().join("shenoute.conllu");

    let output_path = temp_dir.path().join("all.txt");
    let args = Args {
        all: true,
        ..args_for(&input, "text", output_path.clone())
    };
    run(&args).unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("Sentence 1 of 3"));
    assert!(written.contains("sentence 2 could not be parsed"));
    assert!(written.contains("Sentence 3 of 3"));

    // One sentence of an SVG per file.
    let args = Args {
        all: true,
        ..args_for(&input, "svg", temp_dir.path().join("all.svg"))
    };
    assert!(run(&args).is_err());
}

#[test]
fn e2e_smoke_test_selected_sentence() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = samples_path().join("shenoute.conllu");

    let output_path = temp_dir.path().join("third.conllu");
    let args = Args {
        sentence: Some(3),
        ..args_for(&input, "conllu", output_path.clone())
    };
    run(&args).unwrap();
    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("ⲛⲟⲩⲧⲉ"));
    assert!(!written.contains("ⲥⲱⲧⲙ"));

    for sentence in [0, 4] {
        let args = Args {
            sentence: Some(sentence),
            ..args_for(&input, "text", temp_dir.path().join("none.txt"))
        };
        assert!(run(&args).is_err(), "sentence {sentence} should be rejected");
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_samples = collect_conllu_files(samples_path().join("errors"));
    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for sample_path in &error_samples {
        let output_path = temp_dir.path().join(format!(
            "error_{}.txt",
            sample_path.file_stem().unwrap().to_string_lossy()
        ));
        let args = args_for(sample_path, "text", output_path);

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(sample_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error sample(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error samples failed as expected",
        error_samples.len()
    );
}
