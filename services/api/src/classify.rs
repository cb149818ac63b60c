use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tcm_constitution::config::ClassificationSource;
use tcm_constitution::constitution::answers::parse_item_key;
use tcm_constitution::constitution::{
    AnswerSet, CategoryTable, ClassificationEngine, ClassificationResult,
    ClassificationThresholds,
};
use tcm_constitution::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// JSON file holding `"qN": value` answers
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Single answer such as `q12=4`; repeatable and applied after --answers
    #[arg(long, value_parser = parse_answer_pair)]
    pub(crate) answer: Vec<(u16, i64)>,
    /// Alternate category table (JSON); defaults to the standard table
    #[arg(long)]
    pub(crate) table: Option<PathBuf>,
    /// Print the raw JSON result instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CategoriesArgs {
    /// Alternate category table (JSON); defaults to the standard table
    #[arg(long)]
    pub(crate) table: Option<PathBuf>,
}

pub(crate) fn parse_answer_pair(raw: &str) -> Result<(u16, i64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected qN=VALUE, got '{raw}'"))?;
    let index = parse_item_key(key.trim())
        .ok_or_else(|| format!("'{key}' is not a questionnaire item such as q12"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("answer for {key} must be an integer ({err})"))?;
    Ok((index, value))
}

fn load_table(path: Option<PathBuf>) -> Result<CategoryTable, AppError> {
    let source = ClassificationSource { table_path: path };
    Ok(source.load_table()?)
}

pub(crate) fn collect_answers(args: &ClassifyArgs) -> Result<AnswerSet, AppError> {
    let mut answers = match &args.answers {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader::<_, AnswerSet>(reader)?
        }
        None => AnswerSet::new(),
    };

    for &(index, value) in &args.answer {
        answers.insert(index, value);
    }
    Ok(answers)
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let table = load_table(args.table.clone())?;
    let answers = collect_answers(&args)?;
    let engine = ClassificationEngine::new(table, ClassificationThresholds::default());

    let result = engine.classify(&answers);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_result(&engine, &answers, &result);
    }
    Ok(())
}

pub(crate) fn run_categories(args: CategoriesArgs) -> Result<(), AppError> {
    let table = load_table(args.table)?;

    println!("Constitution categories ({} total)", table.len());
    for view in table.views() {
        let marker = if view.balanced { " [balanced]" } else { "" };
        println!(
            "  - {} ({}): {} items{}",
            view.display_name, view.key, view.item_count, marker
        );
    }
    Ok(())
}

fn render_result(
    engine: &ClassificationEngine,
    answers: &AnswerSet,
    result: &ClassificationResult,
) {
    println!("Constitution questionnaire");
    println!(
        "Answered items: {} of {}",
        answers.answered(),
        engine.table().max_item_index()
    );

    println!("\nCategory scores");
    for category in engine.table().categories() {
        if let Some(score) = result.all_scores.get(&category.key) {
            println!(
                "  - {:<18} raw {:>3}  converted {:>4}",
                score.display_name, score.raw_score, score.converted_score
            );
        }
    }

    if result.main_constitutions.is_empty() {
        println!("\nNo constitution stands out.");
        return;
    }

    println!("\nResult");
    for finding in &result.main_constitutions {
        println!(
            "  - {} ({}), score {}",
            finding.display_name,
            finding.status.label(),
            finding.converted_score
        );
        println!("    {}", finding.advice);
    }
    if let Some(summary) = &result.summary {
        println!("\nSummary: {summary}");
    }
}
