use std::sync::Arc;

use chrono::Datelike;
use prioritizer::error::AppError;
use prioritizer::import::ProjectImport;
use prioritizer::projects::{PriorityFilter, ProjectService};
use prioritizer::scoring::{ProjectAnswers, ScoringEngine};

use crate::cli::{ImportArgs, ScoreArgs};
use crate::infra::{seed_releases, InMemoryProjectRepository};

/// Score one questionnaire snapshot from a JSON file and print the result.
pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.answers)?;
    let answers: ProjectAnswers = serde_json::from_str(&raw)
        .map_err(|err| AppError::InvalidInput(format!("answers file does not parse: {err}")))?;

    let result = ScoringEngine::standard().score(&answers);

    println!("Value points:  {}", result.value_points);
    println!("Cost points:   {}", result.cost_points);
    println!("Score:         {:.2}", result.score);
    println!(
        "Complexity:    {} (class {})",
        result.complexity.label(),
        result.complexity.rank()
    );
    println!("Effort:        {} person-days", result.effort_days);

    Ok(())
}

/// Load a CSV batch into an in-memory service and print the priority board.
pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let import = ProjectImport::from_path(&args.csv)?;

    let year = chrono::Local::now().year();
    let service = ProjectService::new(
        Arc::new(InMemoryProjectRepository::default()),
        ScoringEngine::standard(),
        seed_releases(year),
    );

    let summary = import.apply(&service)?;

    println!("Imported {} projects", summary.imported);
    if summary.skipped.is_empty() {
        println!("Skipped rows: none");
    } else {
        println!("Skipped rows:");
        for row in &summary.skipped {
            println!("  - line {}: {}", row.line, row.reason);
        }
    }

    let board = service.prioritized(PriorityFilter::default())?;
    if board.is_empty() {
        println!("\nPriority board: empty");
        return Ok(());
    }

    println!("\nPriority board");
    for (position, project) in board.iter().enumerate() {
        println!(
            "{:>3}. {} | score {:.2} | complexity {} | {} person-days{}",
            position + 1,
            project.title,
            project.score,
            project.complexity,
            project.effort_days,
            if project.retenu { " | retenu" } else { "" }
        );
    }

    Ok(())
}
