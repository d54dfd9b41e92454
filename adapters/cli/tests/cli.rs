use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cellmaze"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch the cellmaze binary")
}

#[test]
fn seeded_run_prints_the_grid_and_spawn() {
    let output = run(&["--difficulty", "2", "--stage", "1", "--seed", "7"]);
    assert!(output.status.success(), "cellmaze should succeed");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<&str> = stdout.lines().collect();

    // 30 grid rows followed by the spawn and turn lines.
    assert_eq!(lines.len(), 32);
    assert!(lines[..30].iter().all(|line| line.chars().count() == 51));
    assert_eq!(stdout.matches('S').count(), 1);
    assert!(stdout.contains('E'));
    assert!(lines[30].starts_with("spawn: ("));
    assert!(lines[31].starts_with("turns: "));
}

#[test]
fn identical_seeds_print_identical_maps() {
    let first = run(&["--difficulty", "1", "--seed", "11"]);
    let second = run(&["--difficulty", "1", "--seed", "11"]);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn unknown_difficulty_fails() {
    let output = run(&["--difficulty", "5", "--seed", "1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown difficulty") || stderr.contains("difficulty 5"));
}
