use std::io::Read;

use chrono::NaiveDate;

use super::normalizer::normalize_text;
use super::{ImportError, SkippedRow};
use crate::projects::ProjectSubmission;
use crate::scoring::{CostField, ProjectAnswers, ValueField};

// Normalized header aliases; the French spellings come from the
// spreadsheets this importer replaces.
const TITLE_COLUMNS: [&str; 3] = ["title", "titre", "nomenclature du projet"];
const DESCRIPTION_COLUMNS: [&str; 2] = ["description", "description du projet"];
const DATE_COLUMNS: [&str; 3] = ["target live date", "date mep", "date de mep prevue"];
const REQUEST_TYPE_COLUMNS: [&str; 2] = ["request type", "type de demande"];
const CATEGORY_COLUMNS: [&str; 2] = ["category id", "categorie"];

// Questionnaire columns as the spreadsheets spell them, normalized.
const ANSWER_ALIASES: [(&str, &str); 12] = [
    ("alignement strategique", "strategic_alignment"),
    ("impact chiffre d'affaires", "revenue_impact"),
    ("impact satisfaction client", "satisfaction_impact"),
    ("acquisition clients", "client_acquisition"),
    ("maitrise des couts", "cost_mastery"),
    ("reduction des menaces", "threat_mitigation"),
    ("creation d'opportunites", "opportunity_creation"),
    ("conditions techniques", "technical_conditions"),
    ("echeance reglementaire", "regulatory_deadline"),
    ("pression concurrentielle", "competitive_pressure"),
    ("echeances strategiques", "strategic_deadlines"),
    ("urgence obsolescence", "obsolescence_urgency"),
];

/// Columns recognized per header after normalization.
#[derive(Debug)]
enum Column {
    Title,
    Description,
    TargetLiveDate,
    RequestType,
    CategoryId,
    Answer(&'static str),
    Ignored,
}

pub(crate) struct ParsedRows {
    pub(crate) submissions: Vec<ProjectSubmission>,
    pub(crate) skipped: Vec<SkippedRow>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<ParsedRows, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: Vec<Column> = headers.iter().map(classify_header).collect();

    if !columns.iter().any(|column| matches!(column, Column::Title)) {
        return Err(ImportError::MissingColumn("title".to_string()));
    }
    if !columns
        .iter()
        .any(|column| matches!(column, Column::TargetLiveDate))
    {
        return Err(ImportError::MissingColumn("target live date".to_string()));
    }

    let mut submissions = Vec::new();
    let mut skipped = Vec::new();

    // Header occupies line 1; data rows start at 2.
    for (offset, record) in csv_reader.records().enumerate() {
        let line = (offset + 2) as u64;
        let record = record?;

        match parse_row(&columns, &record) {
            Ok(submission) => submissions.push(submission),
            Err(reason) => skipped.push(SkippedRow { line, reason }),
        }
    }

    Ok(ParsedRows {
        submissions,
        skipped,
    })
}

fn classify_header(header: &str) -> Column {
    let normalized = normalize_text(header);
    match normalized.as_str() {
        h if TITLE_COLUMNS.contains(&h) => Column::Title,
        h if DESCRIPTION_COLUMNS.contains(&h) => Column::Description,
        h if DATE_COLUMNS.contains(&h) => Column::TargetLiveDate,
        h if REQUEST_TYPE_COLUMNS.contains(&h) => Column::RequestType,
        h if CATEGORY_COLUMNS.contains(&h) => Column::CategoryId,
        other => {
            let answer = ValueField::ALL
                .iter()
                .map(|field| field.name())
                .chain(CostField::ALL.iter().map(|field| field.name()))
                .find(|name| normalize_text(name) == other)
                .or_else(|| {
                    ANSWER_ALIASES
                        .iter()
                        .find(|(alias, _)| *alias == other)
                        .map(|(_, name)| *name)
                });
            match answer {
                Some(name) => Column::Answer(name),
                None => Column::Ignored,
            }
        }
    }
}

fn parse_row(columns: &[Column], record: &csv::StringRecord) -> Result<ProjectSubmission, String> {
    let mut title = String::new();
    let mut description = String::new();
    let mut request_type = String::new();
    let mut category_id = None;
    let mut target_live_date = None;
    let mut answers = ProjectAnswers::default();

    for (column, raw) in columns.iter().zip(record.iter()) {
        let cell = raw.trim();
        if cell.is_empty() || normalize_text(cell).is_empty() {
            continue;
        }
        match column {
            Column::Title => title = cell.to_string(),
            Column::Description => description = cell.to_string(),
            Column::RequestType => request_type = cell.to_string(),
            Column::CategoryId => {
                category_id = cell.parse::<u32>().ok();
            }
            Column::TargetLiveDate => {
                let parsed = NaiveDate::parse_from_str(cell, "%Y-%m-%d")
                    .map_err(|err| format!("invalid target live date '{cell}': {err}"))?;
                target_live_date = Some(parsed);
            }
            Column::Answer(name) => {
                answers.set(name, cell.to_string());
            }
            Column::Ignored => {}
        }
    }

    if title.is_empty() {
        return Err("missing title".to_string());
    }
    let target_live_date = target_live_date.ok_or_else(|| "missing target live date".to_string())?;

    Ok(ProjectSubmission {
        title,
        description,
        request_type,
        category_id,
        target_live_date,
        answers,
    })
}
