mod logging;
mod terminal;

use clap::{Parser, Subcommand};
use questionnaire::{
    Choices, LintReport, QuestionnaireSpec, ScriptStep, ScriptedPicker, check_references,
    spec::schema,
};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use terminal::TerminalPicker;
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const DEMO_SPEC: &str = include_str!("../../questionnaire/tests/fixtures/activities.json");

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Conditional questionnaire runner",
    long_about = "Asks a sequence of list questions whose variants depend on earlier answers; press h or left arrow to revise the previous answer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the questions and print the answers as JSON.
    Run {
        /// Questionnaire definition (JSON). Defaults to the bundled day planner.
        #[arg(long, value_name = "SPEC", env = "QUESTIONNAIRE_SPEC")]
        spec: Option<PathBuf>,
        /// Replay a JSON array of option labels instead of reading the terminal; "<back>" steps back.
        #[arg(long, value_name = "SCRIPT")]
        script: Option<PathBuf>,
        /// Pretty-print the answers.
        #[arg(long)]
        pretty: bool,
    },
    /// Build a questionnaire definition and check that conditions only refer to earlier questions.
    Check {
        /// Questionnaire definition (JSON). Defaults to the bundled day planner.
        #[arg(long, value_name = "SPEC", env = "QUESTIONNAIRE_SPEC")]
        spec: Option<PathBuf>,
    },
    /// Print the JSON schema of questionnaire definition files.
    Schema,
}

fn main() -> CliResult<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            spec,
            script,
            pretty,
        } => run_questionnaire(spec.as_deref(), script.as_deref(), pretty),
        Command::Check { spec } => run_check(spec.as_deref()),
        Command::Schema => run_schema(),
    }
}

fn load_spec(path: Option<&Path>) -> CliResult<QuestionnaireSpec> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)?,
        None => DEMO_SPEC.to_string(),
    };
    Ok(QuestionnaireSpec::from_json(&contents)?)
}

fn run_questionnaire(
    spec_path: Option<&Path>,
    script: Option<&Path>,
    pretty: bool,
) -> CliResult<()> {
    let spec = load_spec(spec_path)?;
    let mut questionnaire = spec.build()?;

    let answers = match script {
        Some(path) => {
            let steps: Vec<ScriptStep> = serde_json::from_str(&fs::read_to_string(path)?)?;
            info!(steps = steps.len(), "replaying scripted answers");
            let mut picker = ScriptedPicker::new(steps);
            questionnaire.run(&mut picker)?
        }
        None => {
            if !io::stdin().is_terminal() {
                return Err("stdin is not a terminal; pass --script to replay answers".into());
            }
            let mut picker = TerminalPicker::new(spec.title.clone());
            questionnaire.run(&mut picker)?
        }
    };

    print_answers(&answers, pretty)
}

fn print_answers(answers: &Choices, pretty: bool) -> CliResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(answers)?
    } else {
        serde_json::to_string(answers)?
    };
    println!("{}", rendered);
    Ok(())
}

fn run_check(spec_path: Option<&Path>) -> CliResult<()> {
    let spec = load_spec(spec_path)?;
    let questionnaire = spec.build()?;
    let report = check_references(&questionnaire);

    let variants: usize = questionnaire
        .questions()
        .map(|(_, variants)| variants.len())
        .sum();
    println!(
        "Check result: {} ({} keys, {} variants)",
        if report.valid { "valid" } else { "invalid" },
        questionnaire.keys().count(),
        variants
    );
    describe_report(&report);

    if report.valid {
        Ok(())
    } else {
        Err("questionnaire check failed".into())
    }
}

fn describe_report(report: &LintReport) {
    if !report.issues.is_empty() {
        println!("Issues:");
        for issue in &report.issues {
            println!("  {}", issue);
        }
    }
}

fn run_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&schema())?);
    Ok(())
}
