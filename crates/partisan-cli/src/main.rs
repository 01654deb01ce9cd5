use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use partisan::{Affiliation, FittedPipeline, Kernel, MajorityClassifier, StopwordSet, TweetRecord};
use tracing::info;

#[derive(Parser)]
#[command(name = "partisan")]
#[command(about = "Classify tweets by political affiliation", long_about = None)]
struct Cli {
    /// Labeled training CSV (columns: text, screen_name)
    #[arg(long, value_name = "PATH")]
    train: PathBuf,

    /// Labeled validation CSV to report accuracy on
    #[arg(long, value_name = "PATH")]
    validation: Option<PathBuf>,

    /// SVM kernel function
    #[arg(short, long, value_enum, default_value = "linear")]
    kernel: KernelChoice,

    /// Custom stop-word list, one normalized word per line
    #[arg(long, value_name = "PATH")]
    stop_words: Option<PathBuf>,

    /// Also report the majority-label baseline accuracy
    #[arg(long)]
    baseline: bool,

    /// Text to classify after training
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Classify the contents of a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Batch classify texts (one per line)
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "file"])]
    batch: Option<PathBuf>,

    /// Batch classify from a JSON array of strings
    #[arg(long, value_name = "PATH", conflicts_with_all = ["text", "file", "batch"])]
    batch_json: Option<PathBuf>,

    /// Read the text to classify from stdin
    #[arg(long, conflicts_with_all = ["text", "file", "batch", "batch_json"])]
    stdin: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "label")]
    format: OutputFormat,

    /// Custom class labels (comma-separated: label0,label1)
    #[arg(long, value_delimiter = ',', num_args = 2, default_values = ["republican", "democratic"])]
    labels: Vec<String>,

    /// Verbose mode (timings and debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum KernelChoice {
    Linear,
    Poly,
    Rbf,
    Sigmoid,
}

impl From<KernelChoice> for Kernel {
    fn from(choice: KernelChoice) -> Self {
        match choice {
            KernelChoice::Linear => Kernel::Linear,
            KernelChoice::Poly => Kernel::Polynomial {
                degree: 3,
                coef0: 0.0,
            },
            KernelChoice::Rbf => Kernel::Rbf,
            KernelChoice::Sigmoid => Kernel::Sigmoid { coef0: 0.0 },
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    /// Output the numeric class (0 or 1)
    Class,
    /// Output the class label (default)
    Label,
    /// Output as JSON
    Json,
    /// Human-readable output
    Human,
}

enum InputSource {
    None,
    Single(String),
    Batch(Vec<String>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let tweets = partisan::load_tweets_csv(&cli.train)
        .with_context(|| format!("Failed to load training data from {}", cli.train.display()))?;
    let stop_words = load_stop_words(cli.stop_words.as_deref())?;

    let start = cli.verbose.then(Instant::now);
    let pipeline = FittedPipeline::train_with(&tweets, cli.kernel.into(), stop_words)?;
    if let Some(start_time) = start {
        eprintln!("Training time: {:?}", start_time.elapsed());
    }

    report_accuracy(&cli, &pipeline, &tweets)?;

    match determine_input_source(&cli)? {
        InputSource::None => {}
        InputSource::Single(text) => {
            let label = pipeline.classify(&text)?;
            output_result(label, &cli)?;
        }
        InputSource::Batch(texts) => {
            let labels = pipeline.classify_batch(&texts)?;
            output_batch_results(&labels, &cli)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_stop_words(path: Option<&std::path::Path>) -> Result<StopwordSet> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stop-word file: {}", path.display()))?;
            Ok(StopwordSet::from_words(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            ))
        }
        None => Ok(StopwordSet::english()),
    }
}

/// Report validation accuracy (or training accuracy when no validation
/// split was given), plus the majority baseline when asked.
fn report_accuracy(cli: &Cli, pipeline: &FittedPipeline, train: &[TweetRecord]) -> Result<()> {
    let (split_name, tweets) = match &cli.validation {
        Some(path) => {
            let validation = partisan::load_tweets_csv(path).with_context(|| {
                format!("Failed to load validation data from {}", path.display())
            })?;
            ("validation", std::borrow::Cow::Owned(validation))
        }
        None => ("training", std::borrow::Cow::Borrowed(train)),
    };

    let accuracy = pipeline.evaluate(&tweets)?;
    eprintln!("{split_name} accuracy: {accuracy:.4}");

    if cli.baseline {
        let processed = partisan::process_all(&tweets);
        let labels = partisan::create_labels(&processed);
        let docs: Vec<&[String]> = processed
            .iter()
            .map(|tweet| tweet.tokens.as_slice())
            .collect();
        let features = pipeline.vectorizer().transform(&docs);

        let mut baseline = MajorityClassifier::new();
        baseline.fit(&features, &labels)?;
        let predictions = baseline.predict(&features)?;
        let baseline_accuracy = partisan::accuracy(&labels, &predictions)?;
        eprintln!("{split_name} baseline accuracy: {baseline_accuracy:.4}");
    }

    info!("Accuracy reporting complete");
    Ok(())
}

/// Determine what to classify from CLI args
fn determine_input_source(cli: &Cli) -> Result<InputSource> {
    use std::io::Read;

    if let Some(text) = &cli.text {
        return Ok(InputSource::Single(text.clone()));
    }

    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return Ok(InputSource::Single(text));
    }

    if let Some(path) = &cli.batch {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
        let texts: Vec<String> = contents.lines().map(String::from).collect();
        return Ok(InputSource::Batch(texts));
    }

    if let Some(path) = &cli.batch_json {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON batch file: {}", path.display()))?;
        let texts: Vec<String> =
            serde_json::from_str(&contents).with_context(|| "Failed to parse JSON array")?;
        return Ok(InputSource::Batch(texts));
    }

    if cli.stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return Ok(InputSource::Single(buffer));
    }

    Ok(InputSource::None)
}

fn class_label(label: Affiliation, cli: &Cli) -> String {
    let class_idx = i64::from(label) as usize;
    cli.labels
        .get(class_idx)
        .cloned()
        .unwrap_or_else(|| label.to_string())
}

/// Output a single result based on format
fn output_result(label: Affiliation, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Class => {
            println!("{}", i64::from(label));
        }
        OutputFormat::Label => {
            println!("{}", class_label(label, cli));
        }
        OutputFormat::Json => {
            let json_output = serde_json::json!({
                "class": i64::from(label),
                "class_label": class_label(label, cli),
            });
            println!("{}", serde_json::to_string(&json_output)?);
        }
        OutputFormat::Human => {
            println!("Affiliation: {}", class_label(label, cli));
        }
    }
    Ok(())
}

/// Output batch results
fn output_batch_results(labels: &[Affiliation], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let json_array: Vec<_> = labels
                .iter()
                .map(|&label| {
                    serde_json::json!({
                        "class": i64::from(label),
                        "class_label": class_label(label, cli),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&json_array)?);
        }
        _ => {
            for &label in labels {
                output_result(label, cli)?;
            }
        }
    }
    Ok(())
}
