use anyhow::{Context, Result, bail};
use catalog::{CatalogItem, CatalogKind, Catalogs, DrinkCategory};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use phrasing::prompts::recommendation_prompt;
use phrasing::{DEFAULT_TIMEOUT, OpenAiPhraser, PhrasingService, StaticPhraser, TimeoutPhraser};
use questionnaire::{QuestionnaireError, SCRIPT, resolve_question_view};
use recommender::{Outcome, RecommendationEngine, Severity, SidePolicy, WineScorer};
use server::{AnswerReply, BartenderService};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Bartender - drink recommendations from a four-question chat
#[derive(Parser)]
#[command(name = "bartender")]
#[command(about = "Query the drink catalogs and try the questionnaire offline", long_about = None)]
struct Cli {
    /// House catalog (JSON array of drinks)
    #[arg(long, env = "BARTENDER_PRIMARY_CATALOG", default_value = "data/main_drinks.json")]
    primary_catalog: PathBuf,

    /// Retail catalog (JSON array of drinks)
    #[arg(long, env = "BARTENDER_VENDOR_CATALOG", default_value = "data/systembolaget.json")]
    vendor_catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Which {
    Main,
    Vendor,
    Both,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog items
    Catalog {
        #[arg(long, value_enum, default_value = "both")]
        which: Which,

        /// Only show one category ("beer", "red wine", "white wine")
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the question script as each drink type sees it
    Questions,

    /// Recommend drinks for a full set of answers
    Recommend {
        /// Answers in order: drink, flavors, strength, occasion
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,

        #[arg(long, default_value = "error")]
        primary_miss: Severity,

        #[arg(long, default_value = "error")]
        vendor_miss: Severity,

        /// Wine names that always win when present (repeatable)
        #[arg(long = "pin")]
        pins: Vec<String>,

        /// Print the prompt the phrasing service would receive
        #[arg(long)]
        show_prompt: bool,
    },

    /// Walk through the questionnaire on the terminal
    Play {
        /// Use the phrasing service instead of canned replies
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        openai_api_key: Option<String>,

        #[arg(long, default_value = phrasing::openai::DEFAULT_BASE_URL)]
        openai_base_url: String,

        #[arg(long, default_value = phrasing::openai::DEFAULT_MODEL)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Questions need no catalogs
    if let Commands::Questions = cli.command {
        handle_questions();
        return Ok(());
    }

    let start = Instant::now();
    let catalogs = Arc::new(Catalogs::load_from_files(
        &cli.primary_catalog,
        &cli.vendor_catalog,
    ));
    let (primary, vendor) = catalogs.counts();
    println!(
        "{} Loaded {} main and {} vendor drinks in {:?}",
        "✓".green(),
        primary,
        vendor,
        start.elapsed()
    );

    match cli.command {
        Commands::Catalog { which, category } => handle_catalog(&catalogs, which, category)?,
        Commands::Questions => {}
        Commands::Recommend {
            answers,
            primary_miss,
            vendor_miss,
            pins,
            show_prompt,
        } => handle_recommend(
            catalogs,
            &answers,
            SidePolicy::new(primary_miss, vendor_miss),
            pins,
            show_prompt,
        )?,
        Commands::Play {
            openai_api_key,
            openai_base_url,
            model,
        } => {
            let phraser: Arc<dyn PhrasingService> = match openai_api_key {
                Some(key) => Arc::new(TimeoutPhraser::new(
                    OpenAiPhraser::new(key, openai_base_url, model)?,
                    DEFAULT_TIMEOUT,
                )),
                None => Arc::new(StaticPhraser::default()),
            };
            handle_play(BartenderService::new(catalogs, phraser)).await?
        }
    }

    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(catalogs: &Catalogs, which: Which, category: Option<String>) -> Result<()> {
    let category = match category {
        Some(raw) => Some(
            DrinkCategory::parse(&raw).with_context(|| format!("Unknown category '{}'", raw))?,
        ),
        None => None,
    };

    let kinds: &[CatalogKind] = match which {
        Which::Main => &[CatalogKind::Primary],
        Which::Vendor => &[CatalogKind::Vendor],
        Which::Both => &[CatalogKind::Primary, CatalogKind::Vendor],
    };

    for &kind in kinds {
        println!("{}", format!("{} catalog:", kind).bold().blue());
        let items: Vec<&CatalogItem> = catalogs
            .get(kind)
            .iter()
            .filter(|item| category.is_none_or(|c| item.is_in_category(c)))
            .collect();

        if items.is_empty() {
            println!("  {}", "(no drinks)".dimmed());
        }
        for item in items {
            println!(
                "{}{} [{}] {}",
                "• ".green(),
                item.name.bold(),
                item.category,
                level_label(item).yellow()
            );
            if !item.flavor_profile.is_empty() {
                println!("    {}", item.flavor_profile);
            }
        }
    }
    Ok(())
}

fn level_label(item: &CatalogItem) -> String {
    match item.alcohol_content {
        Some(abv) => format!("{} ({:.1}%)", item.level, abv),
        None => item.level.clone(),
    }
}

/// Handle the 'questions' command
fn handle_questions() {
    for spec in SCRIPT.iter() {
        let marker = if spec.is_terminal { " (last)" } else { "" };
        println!("{}", format!("Q{}{}: {}", spec.index, marker, spec.prompt).bold().blue());

        if spec.is_conditional() {
            for category in DrinkCategory::ALL {
                let view = resolve_question_view(spec, &[category.to_string()]);
                println!(
                    "  {} {}: {}",
                    "•".green(),
                    category,
                    view.answer_options.join(", ")
                );
            }
        } else {
            println!("  {} {}", "•".green(), spec.answer_options.join(", "));
        }
        if spec.allow_multiple {
            println!("  pick {}", spec.required_selections);
        }
    }
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalogs: Arc<Catalogs>,
    answers: &[String],
    policy: SidePolicy,
    pins: Vec<String>,
    show_prompt: bool,
) -> Result<()> {
    debug!(?answers, ?policy, pins = pins.len(), "Recommending");
    let engine =
        RecommendationEngine::new(catalogs).with_wine_scorer(WineScorer::new().with_pinned(pins));

    match engine.recommend(answers, policy)? {
        Outcome::Recommended(rec) => {
            print!("{}", "Recommendations:\n".bold().blue());
            print_drink("main", &rec.primary);
            print_drink("systembolaget", &rec.vendor);

            if show_prompt {
                let occasion = answers.last().map(String::as_str).unwrap_or_default();
                println!();
                println!("{}", "Prompt:".bold());
                println!("{}", recommendation_prompt(&rec.primary, occasion));
            }
        }
        Outcome::Warning(message) => println!("{} {}", "!".yellow(), message),
    }
    Ok(())
}

fn print_drink(label: &str, item: &CatalogItem) {
    println!("{} {}: {}", "•".green(), label, item.name.bold());
    println!("    Flavor: {}", item.flavor_profile);
    println!("    Strength: {}", level_label(item));
    if !item.pairing.is_empty() {
        println!("    Pairing: {}", item.pairing);
    }
    if !item.description.is_empty() {
        println!("    {}", item.description.dimmed());
    }
}

/// Handle the 'play' command
async fn handle_play(service: BartenderService) -> Result<()> {
    let id = service.start();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let view = match service.question(&id) {
            Ok(view) => view,
            Err(QuestionnaireError::NoMoreQuestions) => break,
            Err(e) => bail!(e),
        };

        println!("{}", view.prompt.bold().blue());
        for (n, option) in view.answer_options.iter().enumerate() {
            println!("  {} {}", format!("{}.", n + 1).green(), option);
        }
        if view.allow_multiple {
            println!("  (pick {}, separated by commas)", view.required_selections);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let answer = pick_options(line?.trim(), &view.answer_options);

        match service.answer(&id, answer.as_str().into()).await? {
            AnswerReply::Banter(text) => println!("{}\n", text.italic()),
            AnswerReply::Recommended {
                primary,
                vendor,
                response,
            } => {
                println!("{}\n", response.italic());
                print_drink("main", &primary);
                print_drink("systembolaget", &vendor);
            }
            AnswerReply::Warning(text) | AnswerReply::Rejected(text) => {
                println!("{} {}", "!".yellow(), text)
            }
        }
    }
    Ok(())
}

/// Map "1, 3" style input to option labels; other text is kept as typed.
fn pick_options(input: &str, options: &[String]) -> String {
    let picked: Option<Vec<&str>> = input
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| options.get(n))
                .map(String::as_str)
        })
        .collect();

    match picked {
        Some(labels) if !labels.is_empty() => labels.join(", "),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Light", "Fruity", "Malty"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pick_options_by_number() {
        assert_eq!(pick_options("1, 3", &options()), "Light, Malty");
    }

    #[test]
    fn test_pick_options_keeps_free_text() {
        assert_eq!(pick_options("Fruity, Sour", &options()), "Fruity, Sour");
        assert_eq!(pick_options("7", &options()), "7");
    }
}
